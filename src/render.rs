// src/render.rs

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::{PlotError, Result};
use crate::layout::{self, HistogramLayout, LineFigureLayout};
use crate::options::{FigureKind, PlotOptions, SaveTarget};
use crate::plot_framework::{self, Destination, Raster};
use crate::series::SeriesSet;
use crate::style::PresentationStyle;

/// Everything computed for one render call before drawing.
#[derive(Debug, Clone)]
pub struct FigurePlan {
    pub series: SeriesSet,
    pub line: LineFigureLayout,
    pub histogram: Option<HistogramLayout>,
    pub save_target: Option<SaveTarget>,
}

/// One produced figure.
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    pub kind: FigureKind,
    /// The PNG written, when a save target was configured.
    pub path: Option<PathBuf>,
    /// The RGB pixels, when no save target was configured.
    pub preview: Option<Raster>,
}

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub plan: FigurePlan,
    pub figures: Vec<RenderedFigure>,
}

impl RenderReport {
    pub fn written_files(&self) -> Vec<&Path> {
        self.figures.iter().filter_map(|f| f.path.as_deref()).collect()
    }
}

/// Validates the call and lays out every requested figure without drawing.
///
/// A bad save setting is reported and rejected before anything else is
/// looked at.
pub fn plan_figures<S: AsRef<[f64]>>(
    sequences: &[S],
    labels: Option<&[String]>,
    options: &PlotOptions,
) -> Result<FigurePlan> {
    let save_target = options.save.resolve().inspect_err(|e| error!("{e}"))?;
    options.validate()?;

    let series = SeriesSet::prepare(
        sequences,
        labels,
        options.invert_order,
        options.window_start,
        options.window_end,
    )?;
    let line = layout::line_figure(&series, options)?;
    let histogram = options
        .histogram
        .then(|| layout::histogram_figure(&series, options))
        .transpose()?;

    debug!(
        "Planned figure: {} series, window of {} frames, y range {:?}",
        series.series.len(),
        series.windowed_length,
        line.y.range
    );
    if let Some(hist) = &histogram {
        debug!("Planned histogram: {} bins over {:?}", hist.bin_count(), hist.x.range);
    }

    Ok(FigurePlan {
        series,
        line,
        histogram,
        save_target,
    })
}

fn draw_figure<F>(kind: FigureKind, target: Option<&SaveTarget>, draw: F) -> Result<RenderedFigure>
where
    F: FnOnce(Destination<'_>) -> std::result::Result<Option<Raster>, Box<dyn std::error::Error>>,
{
    match target {
        Some(target) => {
            let path = target.file_path(kind);
            draw(Destination::File(&path)).map_err(PlotError::backend)?;
            info!("Figure saved as '{}'.", path.display());
            Ok(RenderedFigure {
                kind,
                path: Some(path),
                preview: None,
            })
        }
        None => {
            let preview = draw(Destination::Memory).map_err(PlotError::backend)?;
            debug!("Rendered {kind:?} figure in memory");
            Ok(RenderedFigure {
                kind,
                path: None,
                preview,
            })
        }
    }
}

/// Renders a line plot of `sequences` and, when requested, a histogram of
/// the same windowed data.
///
/// With a save target the figures are written as `plot_<stem>.png` and
/// `hist_<stem>.png`; otherwise their pixels are returned in the report.
/// Each figure is drawn on a fresh canvas that is released before return.
pub fn render_series<S: AsRef<[f64]>>(
    sequences: &[S],
    labels: Option<&[String]>,
    options: &PlotOptions,
    style: &PresentationStyle,
) -> Result<RenderReport> {
    let plan = plan_figures(sequences, labels, options)?;

    if let Some(target) = &plan.save_target {
        target.ensure_directory()?;
    }

    let mut figures = Vec::with_capacity(2);
    figures.push(draw_figure(FigureKind::Line, plan.save_target.as_ref(), |dest| {
        plot_framework::draw_line_figure(&plan.line, style, dest)
    })?);

    if let Some(hist) = &plan.histogram {
        figures.push(draw_figure(FigureKind::Histogram, plan.save_target.as_ref(), |dest| {
            plot_framework::draw_histogram_figure(hist, style, dest)
        })?);
    }

    Ok(RenderReport { plan, figures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{SaveSetting, XTickMode};

    #[test]
    fn test_plan_rejects_non_string_save_before_validation() {
        // Empty input would also fail, but the save setting is checked first.
        let empty: Vec<Vec<f64>> = vec![];
        let options = PlotOptions {
            save: SaveSetting::Other(serde_json::json!(123)),
            ..Default::default()
        };
        let err = plan_figures(&empty, None, &options).unwrap_err();
        assert!(matches!(err, PlotError::Usage(_)));
    }

    #[test]
    fn test_plan_rejects_absolute_ticks() {
        let data = vec![vec![1.0, 2.0]];
        let options = PlotOptions {
            xtick_mode: XTickMode::Absolute,
            ..Default::default()
        };
        assert!(matches!(
            plan_figures(&data, None, &options),
            Err(PlotError::Unsupported(_))
        ));
    }

    #[test]
    fn test_plan_with_histogram() {
        let data = vec![vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]];
        let options = PlotOptions {
            histogram: true,
            xtick_mode: XTickMode::None,
            save: SaveSetting::from("plots/run1"),
            ..Default::default()
        };
        let plan = plan_figures(&data, None, &options).unwrap();
        assert!(plan.histogram.is_some());
        let target = plan.save_target.unwrap();
        assert_eq!(target.file_path(FigureKind::Line), PathBuf::from("plots/plot_run1.png"));
    }

    #[test]
    fn test_plan_without_histogram() {
        let data = vec![vec![0.0, 1.0]];
        let options = PlotOptions {
            xtick_mode: XTickMode::None,
            ..Default::default()
        };
        let plan = plan_figures(&data, None, &options).unwrap();
        assert!(plan.histogram.is_none());
        assert!(plan.save_target.is_none());
    }
}
