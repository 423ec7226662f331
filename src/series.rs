// src/series.rs

use ndarray::{s, Array1, ArrayView1};
use ndarray_stats::QuantileExt;

use crate::error::{PlotError, Result};

/// One windowed sequence ready for plotting.
#[derive(Debug, Clone)]
pub struct WindowedSeries {
    pub values: Array1<f64>,
    pub label: Option<String>,
}

impl WindowedSeries {
    /// `(index, value)` points, indices relative to the window start.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

/// Sequences after order inversion and windowing.
#[derive(Debug, Clone)]
pub struct SeriesSet {
    pub series: Vec<WindowedSeries>,
    /// Length of the window applied to the first input sequence.
    pub windowed_length: usize,
    pub min: f64,
    pub max: f64,
}

impl SeriesSet {
    /// Validates the inputs, applies `invert_order`, then slices every
    /// sequence to `[window_start, window_end)`.
    ///
    /// `window_end` defaults to the length of `sequences[0]` and is clamped to
    /// each sequence's length.
    pub fn prepare<S: AsRef<[f64]>>(
        sequences: &[S],
        labels: Option<&[String]>,
        invert_order: bool,
        window_start: usize,
        window_end: Option<usize>,
    ) -> Result<Self> {
        if sequences.is_empty() {
            return Err(PlotError::invalid_input("no sequences to plot"));
        }
        if let Some(labels) = labels {
            if labels.len() != sequences.len() {
                return Err(PlotError::invalid_input(format!(
                    "{} labels given for {} sequences",
                    labels.len(),
                    sequences.len()
                )));
            }
        }
        for (i, seq) in sequences.iter().enumerate() {
            let seq = seq.as_ref();
            if seq.is_empty() {
                return Err(PlotError::invalid_input(format!("sequence {i} is empty")));
            }
            if let Some(pos) = seq.iter().position(|v| !v.is_finite()) {
                return Err(PlotError::invalid_input(format!(
                    "sequence {i} has a non-finite value at index {pos}"
                )));
            }
        }

        let reference_len = sequences[0].as_ref().len();
        let end = window_end.unwrap_or(reference_len);
        let windowed_length = end.min(reference_len).saturating_sub(window_start);
        if windowed_length == 0 {
            return Err(PlotError::invalid_input(format!(
                "window [{window_start}, {end}) is empty for a sequence of length {reference_len}"
            )));
        }

        let mut order: Vec<usize> = (0..sequences.len()).collect();
        if invert_order {
            order.reverse();
        }

        let mut series = Vec::with_capacity(sequences.len());
        for idx in order {
            let view = ArrayView1::from(sequences[idx].as_ref());
            let values = window(view, window_start, end);
            if values.is_empty() {
                return Err(PlotError::invalid_input(format!(
                    "sequence {idx} has no samples in window [{window_start}, {end})"
                )));
            }
            series.push(WindowedSeries {
                values,
                label: labels.map(|l| l[idx].clone()),
            });
        }

        let (min, max) = extremes(&series)?;

        Ok(Self {
            series,
            windowed_length,
            min,
            max,
        })
    }

    pub fn has_labels(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }

    /// All windowed values, concatenated in plotting order.
    pub fn all_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.values.iter().copied())
    }
}

/// Slices `[start, end)` with both ends clamped to the data, like a
/// slice expression on a list.
fn window(data: ArrayView1<f64>, start: usize, end: usize) -> Array1<f64> {
    let len = data.len();
    let start = start.min(len);
    let end = end.clamp(start, len);
    data.slice(s![start..end]).to_owned()
}

fn extremes(series: &[WindowedSeries]) -> Result<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        let s_min = *s.values.min().map_err(|e| PlotError::invalid_input(e.to_string()))?;
        let s_max = *s.values.max().map_err(|e| PlotError::invalid_input(e.to_string()))?;
        min = min.min(s_min);
        max = max.max(s_max);
    }
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_window_is_full_length() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]];
        let set = SeriesSet::prepare(&data, None, false, 0, None).unwrap();
        assert_eq!(set.windowed_length, 5);
        assert_eq!(set.series[0].values.len(), 5);
    }

    #[test]
    fn test_window_slice() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]];
        let set = SeriesSet::prepare(&data, None, false, 1, Some(4)).unwrap();
        assert_eq!(set.series[0].values.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(set.windowed_length, 3);
        assert_eq!((set.min, set.max), (2.0, 4.0));
    }

    #[test]
    fn test_window_end_is_clamped() {
        let data = vec![vec![1.0, 2.0, 3.0]];
        let set = SeriesSet::prepare(&data, None, false, 1, Some(100)).unwrap();
        assert_eq!(set.series[0].values.to_vec(), vec![2.0, 3.0]);
        assert_eq!(set.windowed_length, 2);
    }

    #[test]
    fn test_invert_order_keeps_labels_aligned() {
        let data = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        let names = labels(&["a", "b"]);
        let inverted = SeriesSet::prepare(&data, Some(names.as_slice()), true, 0, None).unwrap();

        let pre_reversed = vec![vec![2.0, 2.0], vec![1.0, 1.0]];
        let pre_names = labels(&["b", "a"]);
        let plain =
            SeriesSet::prepare(&pre_reversed, Some(pre_names.as_slice()), false, 0, None).unwrap();

        for (x, y) in inverted.series.iter().zip(plain.series.iter()) {
            assert_eq!(x.values, y.values);
            assert_eq!(x.label, y.label);
        }
        assert_eq!(inverted.series[0].label.as_deref(), Some("b"));
    }

    #[test]
    fn test_extremes_span_all_series() {
        let data = vec![vec![1.0, 4.4], vec![-2.0, 3.0]];
        let set = SeriesSet::prepare(&data, None, false, 0, None).unwrap();
        assert_eq!(set.min, -2.0);
        assert_eq!(set.max, 4.4);
        assert_eq!(set.all_values().count(), 4);
    }

    #[test]
    fn test_invalid_inputs() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            SeriesSet::prepare(&empty, None, false, 0, None),
            Err(PlotError::InvalidInput(_))
        ));

        let data = vec![vec![1.0], vec![]];
        assert!(matches!(
            SeriesSet::prepare(&data, None, false, 0, None),
            Err(PlotError::InvalidInput(_))
        ));

        let data = vec![vec![1.0, 2.0]];
        let names = labels(&["a", "b"]);
        assert!(matches!(
            SeriesSet::prepare(&data, Some(names.as_slice()), false, 0, None),
            Err(PlotError::InvalidInput(_))
        ));

        let data = vec![vec![1.0, f64::NAN]];
        assert!(matches!(
            SeriesSet::prepare(&data, None, false, 0, None),
            Err(PlotError::InvalidInput(_))
        ));

        let data = vec![vec![1.0, 2.0]];
        assert!(matches!(
            SeriesSet::prepare(&data, None, false, 2, None),
            Err(PlotError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_shorter_later_sequence_outside_window() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0]];
        assert!(matches!(
            SeriesSet::prepare(&data, None, false, 2, None),
            Err(PlotError::InvalidInput(_))
        ));
    }
}
