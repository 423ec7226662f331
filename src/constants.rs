// src/constants.rs

use plotters::style::RGBColor;

// Figure geometry. A 6.4 x 4.8 inch figure rasterised at 300 DPI.
pub const FIGURE_DPI: u32 = 300;
pub const FIGURE_WIDTH_IN: f64 = 6.4;
pub const FIGURE_HEIGHT_IN: f64 = 4.8;
pub const PLOT_WIDTH: u32 = (FIGURE_WIDTH_IN * FIGURE_DPI as f64) as u32; // 1920
pub const PLOT_HEIGHT: u32 = (FIGURE_HEIGHT_IN * FIGURE_DPI as f64) as u32; // 1440

// Margins around the axes, in pixels.
pub const FIGURE_MARGIN: u32 = 30;
pub const X_LABEL_AREA_SIZE: u32 = 150;
pub const Y_LABEL_AREA_SIZE: u32 = 190;

// Font sizes in pixels (10 pt at 300 DPI is ~42 px).
pub const FONT_SIZE_TICK_LABEL: i32 = 38;
pub const FONT_SIZE_AXIS_LABEL: i32 = 42;
pub const FONT_SIZE_LEGEND: i32 = 38;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 4;
pub const LINE_WIDTH_LEGEND: u32 = 6;
pub const LINE_WIDTH_AXIS: u32 = 3;
pub const LINE_WIDTH_GRID: u32 = 3;

// Tick marks drawn outside the axes.
pub const TICK_LENGTH_PX: i32 = 14;
pub const TICK_LABEL_GAP_PX: i32 = 10;

// Legend panel placed to the right of the axes.
pub const LEGEND_HANDLE_LENGTH_PX: i32 = 60;
pub const LEGEND_HANDLE_GAP_PX: i32 = 20;
pub const LEGEND_PADDING_PX: i32 = 20;
pub const LEGEND_ROW_SPACING_PX: i32 = 14;
/// Vertical anchor of the legend's upper-left corner in axes coordinates.
pub const LEGEND_ANCHOR_Y: f64 = 1.01;

// Y-axis padding applied before rounding the data extremes.
pub const Y_RANGE_PADDING: f64 = 0.55;
/// Above this many value-axis ticks the backend picks its own key points.
pub const MAX_VALUE_AXIS_TICKS: usize = 200;

// Relative x ticks: positions every `ns * 1000` samples, labels every `ns * 10`.
pub const REL_TICK_POSITION_FACTOR: usize = 1000;
pub const REL_TICK_LABEL_FACTOR: usize = 10;
pub const REL_TICK_LABEL_SPAN_FACTOR: usize = 100;

// Histogram bars fill this fraction of each bin.
pub const HISTOGRAM_BAR_FILL: f64 = 0.8;
pub const MAX_HISTOGRAM_BINS: usize = 10_000;
pub const HISTOGRAM_Y_LABEL: &str = "Number of occurrences";

// Output file naming
pub const LINE_PLOT_PREFIX: &str = "plot_";
pub const HISTOGRAM_PREFIX: &str = "hist_";
pub const OUTPUT_EXTENSION: &str = "png";
pub const SAVE_PATH_SEPARATOR: char = '/';

// Option defaults
pub const DEFAULT_FRAMES_PER_NS: usize = 10_000;
pub const DEFAULT_BINS_FACTOR: f64 = 1.0;

// --- Theme colors ---
pub const COLOR_DEFAULT_BACKGROUND: RGBColor = RGBColor(255, 255, 255);
pub const COLOR_DEFAULT_AXES: RGBColor = RGBColor(0, 0, 0);
pub const COLOR_GGPLOT_PANEL: RGBColor = RGBColor(229, 229, 229);
pub const COLOR_GGPLOT_GRID: RGBColor = RGBColor(255, 255, 255);
pub const COLOR_GGPLOT_TEXT: RGBColor = RGBColor(85, 85, 85);

/// The ggplot colour cycle.
pub const GGPLOT_PALETTE: [RGBColor; 7] = [
    RGBColor(0xE2, 0x4A, 0x33),
    RGBColor(0x34, 0x8A, 0xBD),
    RGBColor(0x98, 0x8E, 0xD5),
    RGBColor(0x77, 0x77, 0x77),
    RGBColor(0xFB, 0xC1, 0x5E),
    RGBColor(0x8E, 0xBA, 0x42),
    RGBColor(0xFF, 0xB5, 0xB8),
];
