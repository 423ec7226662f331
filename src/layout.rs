// src/layout.rs

//! Figure layouts: everything a figure needs (ranges, ticks, titles, data)
//! computed before any drawing happens.

use std::ops::Range;

use tracing::debug;

use crate::constants::{HISTOGRAM_BAR_FILL, HISTOGRAM_Y_LABEL, MAX_HISTOGRAM_BINS};
use crate::error::{PlotError, Result};
use crate::options::{PlotOptions, XTickMode};
use crate::series::SeriesSet;
use crate::ticks;

/// Data margin applied to both ends of the index axis.
const INDEX_AXIS_MARGIN: f64 = 0.05;

/// A labelled graduation mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// One axis of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub range: Range<f64>,
    /// Explicit ticks, or `None` to let the backend choose.
    pub ticks: Option<Vec<Tick>>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineFigureLayout {
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub traces: Vec<LineTrace>,
    pub legend: bool,
}

/// Counts of one sequence over the shared bins.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramDataset {
    pub counts: Vec<usize>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayout {
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub bin_edges: Vec<f64>,
    pub datasets: Vec<HistogramDataset>,
    pub legend: bool,
}

impl HistogramLayout {
    pub fn bin_count(&self) -> usize {
        self.bin_edges.len().saturating_sub(1)
    }

    /// Bar rectangles `(x0, x1, height)` for dataset `index`. Datasets share
    /// each bin side by side, filling 80% of the bin width.
    pub fn bars(&self, index: usize) -> Vec<(f64, f64, f64)> {
        let n_sets = self.datasets.len().max(1) as f64;
        let Some(dataset) = self.datasets.get(index) else {
            return Vec::new();
        };
        self.bin_edges
            .windows(2)
            .zip(dataset.counts.iter())
            .map(|(edge, &count)| {
                let width = edge[1] - edge[0];
                let bar_width = width * HISTOGRAM_BAR_FILL / n_sets;
                let x0 =
                    edge[0] + width * (1.0 - HISTOGRAM_BAR_FILL) / 2.0 + index as f64 * bar_width;
                (x0, x0 + bar_width, count as f64)
            })
            .collect()
    }
}

/// Formats a tick value with as many decimals as the step needs.
fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn value_axis(lower: i64, upper: i64, title: Option<String>) -> AxisSpec {
    let step = ticks::order_of_magnitude_step(upper);
    let tick_marks = match ticks::value_axis_ticks(lower, upper) {
        Some(values) => Some(
            values
                .into_iter()
                .map(|value| Tick {
                    value,
                    label: format_tick(value, step),
                })
                .collect(),
        ),
        None => {
            debug!("Value axis [{lower}, {upper}] too wide for step {step}; using default ticks");
            None
        }
    };
    AxisSpec {
        range: lower as f64..upper as f64,
        ticks: tick_marks,
        title,
    }
}

/// Index axis range with a 5% margin on both sides.
fn index_axis_range(points: usize) -> Range<f64> {
    let last = points.saturating_sub(1) as f64;
    if last <= 0.0 {
        return -0.5..0.5;
    }
    let margin = last * INDEX_AXIS_MARGIN;
    -margin..last + margin
}

/// Lays out the line plot.
pub fn line_figure(set: &SeriesSet, options: &PlotOptions) -> Result<LineFigureLayout> {
    let (y_lower, y_upper) = ticks::value_axis_bounds(set.min, set.max);
    let (y_title, x_title) = match &options.axis_titles {
        Some((y, x)) => (Some(y.clone()), Some(x.clone())),
        None => (None, None),
    };

    let longest = set.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    let x_ticks = match options.xtick_mode {
        XTickMode::Relative => Some(
            ticks::relative_x_ticks(set.windowed_length, options.frames_per_ns)?
                .into_iter()
                .map(|(position, label)| Tick {
                    value: position as f64,
                    label: label.to_string(),
                })
                .collect(),
        ),
        XTickMode::None | XTickMode::Absolute => None,
    };

    Ok(LineFigureLayout {
        x: AxisSpec {
            range: index_axis_range(longest),
            ticks: x_ticks,
            title: x_title,
        },
        y: value_axis(y_lower, y_upper, y_title),
        traces: set
            .series
            .iter()
            .map(|s| LineTrace {
                points: s.points(),
                label: s.label.clone(),
            })
            .collect(),
        legend: set.has_labels(),
    })
}

/// Equal-width bin edges over `[min, max]`; a degenerate range is widened
/// by 0.5 on each side.
pub fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let bins = bins.max(1);
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + i as f64 * width).collect()
}

/// Counts values per bin. Bins are half-open except the last, which also
/// takes values equal to the upper edge.
pub fn bin_counts(values: impl Iterator<Item = f64>, edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[bins];
    let width = (hi - lo) / bins as f64;
    for v in values {
        if v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Lays out the companion histogram.
pub fn histogram_figure(set: &SeriesSet, options: &PlotOptions) -> Result<HistogramLayout> {
    let (lower, upper) = ticks::value_axis_bounds(set.min, set.max);
    let bins = ticks::histogram_bin_count(lower, upper, options.bins_factor);
    if bins > MAX_HISTOGRAM_BINS {
        return Err(PlotError::invalid_input(format!(
            "histogram over [{lower}, {upper}] needs {bins} bins (limit {MAX_HISTOGRAM_BINS}); \
             lower bins_factor"
        )));
    }
    let edges = bin_edges(set.min, set.max, bins);

    let datasets = set
        .series
        .iter()
        .map(|s| HistogramDataset {
            counts: bin_counts(s.values.iter().copied(), &edges),
            label: s.label.clone(),
        })
        .collect();

    let count_step = ticks::histogram_count_step(set.windowed_length) as f64;
    let count_ticks = ticks::histogram_count_ticks(set.windowed_length)
        .into_iter()
        .map(|value| Tick {
            value,
            label: format_tick(value, count_step),
        })
        .collect();

    let (x_title, y_title) = match &options.axis_titles {
        Some((y, _)) => (Some(y.clone()), Some(HISTOGRAM_Y_LABEL.to_string())),
        None => (None, None),
    };

    Ok(HistogramLayout {
        x: value_axis(lower, upper, x_title),
        y: AxisSpec {
            range: 0.0..set.windowed_length as f64,
            ticks: Some(count_ticks),
            title: y_title,
        },
        bin_edges: edges,
        datasets,
        legend: set.has_labels(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(data: Vec<Vec<f64>>, labels: Option<Vec<String>>) -> SeriesSet {
        SeriesSet::prepare(&data, labels.as_deref(), false, 0, None).unwrap()
    }

    #[test]
    fn test_line_figure_y_axis() {
        let set = set_of(vec![vec![1.0, 4.4]], None);
        let options = PlotOptions {
            xtick_mode: XTickMode::None,
            ..Default::default()
        };
        let layout = line_figure(&set, &options).unwrap();
        assert_eq!(layout.y.range, 0.0..5.0);
        let labels: Vec<&str> = layout
            .y
            .ticks
            .as_ref()
            .unwrap()
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labels, vec!["0", "1", "2", "3", "4", "5"]);
        assert!(layout.x.ticks.is_none());
        assert!(!layout.legend);
    }

    #[test]
    fn test_line_figure_wide_negative_range_uses_default_ticks() {
        let set = set_of(vec![vec![-1.0e6, 0.4]], None);
        let options = PlotOptions {
            xtick_mode: XTickMode::None,
            ..Default::default()
        };
        let layout = line_figure(&set, &options).unwrap();
        assert_eq!(layout.y.range, -1_000_001.0..1.0);
        assert!(layout.y.ticks.is_none());
    }

    #[test]
    fn test_line_figure_relative_ticks_and_titles() {
        let data = vec![(0..20_000).map(|i| (i % 7) as f64).collect::<Vec<_>>()];
        let set = set_of(data, Some(vec!["d1".to_string()]));
        let options = PlotOptions {
            axis_titles: Some(("Distance".to_string(), "Time (ns)".to_string())),
            ..Default::default()
        };
        let layout = line_figure(&set, &options).unwrap();
        // 20000 frames / 10000 per ns -> 2; ticks every 2000 samples labelled 0, 20, ...
        let ticks = layout.x.ticks.unwrap();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[1], Tick { value: 2000.0, label: "20".to_string() });
        assert_eq!(layout.x.title.as_deref(), Some("Time (ns)"));
        assert_eq!(layout.y.title.as_deref(), Some("Distance"));
        assert!(layout.legend);
        assert_eq!(layout.traces[0].points.len(), 20_000);
    }

    #[test]
    fn test_line_figure_short_window_relative_ticks_fail() {
        let set = set_of(vec![vec![1.0, 2.0, 3.0]], None);
        assert!(line_figure(&set, &PlotOptions::default()).is_err());
    }

    #[test]
    fn test_fractional_value_ticks() {
        let set = set_of(vec![vec![0.2, 1.1]], None);
        let options = PlotOptions {
            xtick_mode: XTickMode::None,
            ..Default::default()
        };
        let layout = line_figure(&set, &options).unwrap();
        // bounds [round(-0.35), round(1.65)] = [0, 2], step 0.1
        assert_eq!(layout.y.range, 0.0..2.0);
        let ticks = layout.y.ticks.unwrap();
        assert_eq!(ticks[1].label, "0.1");
        assert_eq!(ticks.last().unwrap().label, "2.0");
    }

    #[test]
    fn test_bin_edges_and_counts() {
        let edges = bin_edges(0.0, 5.0, 5);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let counts = bin_counts([0.0, 0.5, 1.0, 4.9, 5.0, 6.0].into_iter(), &edges);
        assert_eq!(counts, vec![2, 1, 0, 0, 2]);
    }

    #[test]
    fn test_bin_edges_degenerate() {
        let edges = bin_edges(3.0, 3.0, 2);
        assert_eq!(edges, vec![2.5, 3.0, 3.5]);
    }

    #[test]
    fn test_histogram_figure() {
        let data = vec![vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0]];
        let set = set_of(data, Some(vec!["a".to_string(), "b".to_string()]));
        let options = PlotOptions {
            bins_factor: 2.0,
            axis_titles: Some(("Distance".to_string(), "Time".to_string())),
            ..Default::default()
        };
        let layout = histogram_figure(&set, &options).unwrap();
        // bounds [round(-0.55), round(5.55)] = [-1, 6] -> 7 * 2 bins
        assert_eq!(layout.bin_count(), 14);
        assert_eq!(layout.x.range, -1.0..6.0);
        assert_eq!(layout.y.range, 0.0..6.0);
        assert_eq!(layout.datasets[0].counts.iter().sum::<usize>(), 6);
        assert_eq!(layout.datasets[1].counts.iter().sum::<usize>(), 6);
        assert_eq!(layout.x.title.as_deref(), Some("Distance"));
        assert_eq!(layout.y.title.as_deref(), Some("Number of occurrences"));
        assert!(layout.legend);
    }

    #[test]
    fn test_histogram_figure_rejects_excessive_bins() {
        let set = set_of(vec![vec![-1.0e6, 0.4]], None);
        let err = histogram_figure(&set, &PlotOptions::default()).unwrap_err();
        assert!(matches!(err, PlotError::InvalidInput(_)));
    }

    #[test]
    fn test_histogram_bars_side_by_side() {
        let layout = HistogramLayout {
            x: AxisSpec {
                range: 0.0..1.0,
                ticks: None,
                title: None,
            },
            y: AxisSpec {
                range: 0.0..4.0,
                ticks: None,
                title: None,
            },
            bin_edges: vec![0.0, 1.0],
            datasets: vec![
                HistogramDataset { counts: vec![3], label: None },
                HistogramDataset { counts: vec![1], label: None },
            ],
            legend: false,
        };
        let first = layout.bars(0);
        let second = layout.bars(1);
        assert!((first[0].0 - 0.1).abs() < 1e-12);
        assert!((first[0].1 - 0.5).abs() < 1e-12);
        assert!((second[0].0 - 0.5).abs() < 1e-12);
        assert!((second[0].1 - 0.9).abs() < 1e-12);
        assert_eq!(first[0].2, 3.0);
        assert!(layout.bars(2).is_empty());
    }
}
