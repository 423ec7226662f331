// src/lib.rs - Library interface

//! Line plots and histograms for one-dimensional series from
//! molecular-dynamics trajectory analysis.
//!
//! ```no_run
//! use mdplot::{enable_presentation_style, render_series, PlotOptions, SaveSetting};
//!
//! let distances = vec![vec![3.1, 3.4, 3.3, 3.8], vec![4.0, 4.2, 3.9, 4.1]];
//! let labels = vec!["d1".to_string(), "d2".to_string()];
//! let options = PlotOptions {
//!     histogram: true,
//!     frames_per_ns: 2,
//!     save: SaveSetting::from("plots/run1"),
//!     ..Default::default()
//! };
//! render_series(&distances, Some(labels.as_slice()), &options, &enable_presentation_style())?;
//! # Ok::<(), mdplot::PlotError>(())
//! ```

pub mod constants;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod layout;
pub mod options;
pub mod plot_framework;
pub mod render;
pub mod series;
pub mod style;
pub mod ticks;
pub mod typeset;

pub use error::{PlotError, Result};
pub use options::{FigureKind, PlotOptions, SaveSetting, SaveTarget, XTickMode};
pub use render::{plan_figures, render_series, FigurePlan, RenderReport, RenderedFigure};
pub use style::{enable_presentation_style, PresentationStyle, Theme};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
