// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdplot::data_input::series_table::SeriesTable;
use mdplot::{
    enable_presentation_style, render_series, PlotOptions, PresentationStyle, SaveSetting,
    XTickMode,
};

#[derive(Parser, Debug)]
#[command(name = "mdplot", version = mdplot::crate_version())]
#[command(about = "Plot trajectory-analysis series from a CSV file", long_about = None)]
struct Args {
    /// CSV file with one column per series and a header row of labels
    input: PathBuf,

    /// Columns to plot (default: all)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Treat the first CSV column as a frame/time index and skip it
    #[arg(long)]
    index_column: bool,

    /// JSON file with plot options; flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Output name, optionally prefixed with one directory (e.g. plots/run1)
    #[arg(short, long)]
    save: Option<String>,

    /// Also draw a histogram of the windowed data
    #[arg(long)]
    histogram: bool,

    /// Draw the first series last (on top)
    #[arg(long)]
    invert_order: bool,

    /// X tick mode: relative, absolute or none
    #[arg(long)]
    xticks: Option<XTickMode>,

    /// Trajectory frames per nanosecond
    #[arg(long)]
    frames_per_ns: Option<usize>,

    /// First frame to plot
    #[arg(long)]
    start: Option<usize>,

    /// Frame to stop before
    #[arg(long)]
    end: Option<usize>,

    /// Multiplier for the histogram bin count
    #[arg(long)]
    bins_factor: Option<f64>,

    /// Y axis title
    #[arg(long, requires = "x_title")]
    y_title: Option<String>,

    /// X axis title
    #[arg(long, requires = "y_title")]
    x_title: Option<String>,

    /// Hide the legend
    #[arg(long)]
    no_legend: bool,

    /// ggplot theme with TeX-style serif text
    #[arg(long)]
    presentation: bool,

    /// Log filter, e.g. "info" or "mdplot=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn plot_options(&self) -> Result<PlotOptions> {
        let mut options = match &self.options {
            Some(path) => PlotOptions::from_json_file(path)
                .with_context(|| format!("loading options from '{}'", path.display()))?,
            None => PlotOptions::default(),
        };

        if let Some(save) = &self.save {
            options.save = SaveSetting::from(save.as_str());
        }
        options.histogram |= self.histogram;
        options.invert_order |= self.invert_order;
        if let Some(mode) = self.xticks {
            options.xtick_mode = mode;
        }
        if let Some(fpn) = self.frames_per_ns {
            options.frames_per_ns = fpn;
        }
        if let Some(start) = self.start {
            options.window_start = start;
        }
        if self.end.is_some() {
            options.window_end = self.end;
        }
        if let Some(factor) = self.bins_factor {
            options.bins_factor = factor;
        }
        if let (Some(y), Some(x)) = (&self.y_title, &self.x_title) {
            options.axis_titles = Some((y.clone(), x.clone()));
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let options = args.plot_options()?;

    let mut table = SeriesTable::from_path(&args.input, args.index_column)
        .with_context(|| format!("reading '{}'", args.input.display()))?;
    if !args.columns.is_empty() {
        table = table.select(&args.columns)?;
    }

    let style = if args.presentation {
        enable_presentation_style()
    } else {
        PresentationStyle::default()
    };
    let labels = (!args.no_legend).then_some(table.labels.as_slice());

    let report = render_series(&table.columns, labels, &options, &style)?;

    if report.written_files().is_empty() {
        tracing::info!(
            "Rendered {} figure(s) in memory; pass --save to write PNG files",
            report.figures.len()
        );
    }
    for path in report.written_files() {
        println!("{}", path.display());
    }
    Ok(())
}
