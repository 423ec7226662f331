// src/plot_framework.rs

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FIGURE_MARGIN, LEGEND_ANCHOR_Y, LEGEND_HANDLE_GAP_PX, LEGEND_HANDLE_LENGTH_PX,
    LEGEND_PADDING_PX, LEGEND_ROW_SPACING_PX, LINE_WIDTH_AXIS, LINE_WIDTH_GRID, LINE_WIDTH_LEGEND,
    LINE_WIDTH_PLOT, PLOT_HEIGHT, PLOT_WIDTH, TICK_LABEL_GAP_PX, TICK_LENGTH_PX, X_LABEL_AREA_SIZE,
    Y_LABEL_AREA_SIZE,
};
use crate::font_config::text_width_px;
use crate::layout::{AxisSpec, HistogramLayout, LineFigureLayout, Tick};
use crate::style::PresentationStyle;

/// Number of automatic ticks requested when an axis has no explicit ticks.
const AUTO_TICK_COUNT: usize = 10;

/// Where a figure is rasterised.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'p> {
    /// Encode a PNG at this path.
    File(&'p Path),
    /// Keep the RGB pixels in memory.
    Memory,
}

/// An in-memory RGB image of a figure.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Legend swatch shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegendHandle {
    Line,
    Patch,
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Width of the legend panel placed right of the axes; 0 without entries.
fn legend_width(entries: &[(String, RGBColor)], style: &PresentationStyle) -> u32 {
    if entries.is_empty() {
        return 0;
    }
    let font_px = style.fonts().legend.size as f32;
    let text_width = entries
        .iter()
        .map(|(label, _)| text_width_px(label, font_px))
        .max()
        .unwrap_or(0);
    (2 * LEGEND_PADDING_PX + LEGEND_HANDLE_LENGTH_PX + LEGEND_HANDLE_GAP_PX + text_width).max(0)
        as u32
}

/// Allocates the canvas for `dest`, runs `draw` on it and presents it.
fn with_canvas<F>(
    dest: Destination<'_>,
    size: (u32, u32),
    draw: F,
) -> Result<Option<Raster>, Box<dyn Error>>
where
    F: FnOnce(&Area<'_>) -> Result<(), Box<dyn Error>>,
{
    match dest {
        Destination::File(path) => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(&root)?;
            root.present()?;
            Ok(None)
        }
        Destination::Memory => {
            let mut pixels = vec![0u8; size.0 as usize * size.1 as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
                draw(&root)?;
                root.present()?;
            }
            Ok(Some(Raster {
                width: size.0,
                height: size.1,
                pixels,
            }))
        }
    }
}

/// Key points for an axis: explicit ticks inside the range, or the
/// backend's own choice.
fn key_points(axis: &AxisSpec) -> Vec<f64> {
    match &axis.ticks {
        Some(ticks) => {
            let span = (axis.range.end - axis.range.start).abs();
            let tolerance = span * 1e-9;
            ticks
                .iter()
                .map(|t| t.value)
                .filter(|v| *v >= axis.range.start - tolerance && *v <= axis.range.end + tolerance)
                .collect()
        }
        None => RangedCoordf64::from(axis.range.clone()).key_points(AUTO_TICK_COUNT),
    }
}

/// Label for a key point: the matching explicit tick label, or a plain number.
fn tick_label(ticks: Option<&[Tick]>, value: f64) -> String {
    if let Some(ticks) = ticks {
        let tolerance = 1e-9 * value.abs().max(1.0);
        if let Some(t) = ticks.iter().find(|t| (t.value - value).abs() <= tolerance) {
            return t.label.clone();
        }
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Builds the axes, fills the panel and draws grid, ticks and titles.
///
/// Tick positions come from the layout, so the backend's own labels are
/// switched off and every mark is drawn explicitly.
fn build_axes<'a, 'b>(
    area: &'a Area<'b>,
    x: &AxisSpec,
    y: &AxisSpec,
    style: &PresentationStyle,
) -> Result<Chart<'a, 'b>, Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .margin(FIGURE_MARGIN)
        .x_label_area_size(X_LABEL_AREA_SIZE)
        .y_label_area_size(Y_LABEL_AREA_SIZE)
        .build_cartesian_2d(x.range.clone(), y.range.clone())?;

    chart.plotting_area().fill(&style.panel_background())?;

    let x_points = key_points(x);
    let y_points = key_points(y);

    if let Some(grid) = style.grid_color() {
        for &xv in &x_points {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(xv, y.range.start), (xv, y.range.end)],
                grid.stroke_width(LINE_WIDTH_GRID),
            )))?;
        }
        for &yv in &y_points {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x.range.start, yv), (x.range.end, yv)],
                grid.stroke_width(LINE_WIDTH_GRID),
            )))?;
        }
    }

    let fonts = style.fonts();
    let text_color = style.text_color();
    let x_title = x.title.as_deref().map(|t| style.text(t)).unwrap_or_default();
    let y_title = y.title.as_deref().map(|t| style.text(t)).unwrap_or_default();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(0)
        .x_desc(x_title)
        .y_desc(y_title)
        .axis_style(style.axis_color().stroke_width(LINE_WIDTH_AXIS))
        .axis_desc_style(fonts.axis_label.tuple().into_font().color(&text_color))
        .draw()?;

    let offset = area.get_base_pixel();
    let axis_color = style.axis_color();
    let label_font = fonts.tick_label.tuple().into_font().color(&text_color);

    for &xv in &x_points {
        let (px, py) = chart.backend_coord(&(xv, y.range.start));
        let (px, py) = (px - offset.0, py - offset.1);
        area.draw(&PathElement::new(
            vec![(px, py), (px, py + TICK_LENGTH_PX)],
            axis_color.stroke_width(LINE_WIDTH_AXIS),
        ))?;
        area.draw(&Text::new(
            tick_label(x.ticks.as_deref(), xv),
            (px, py + TICK_LENGTH_PX + TICK_LABEL_GAP_PX),
            label_font.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    for &yv in &y_points {
        let (px, py) = chart.backend_coord(&(x.range.start, yv));
        let (px, py) = (px - offset.0, py - offset.1);
        area.draw(&PathElement::new(
            vec![(px - TICK_LENGTH_PX, py), (px, py)],
            axis_color.stroke_width(LINE_WIDTH_AXIS),
        ))?;
        area.draw(&Text::new(
            tick_label(y.ticks.as_deref(), yv),
            (px - TICK_LENGTH_PX - TICK_LABEL_GAP_PX, py),
            label_font.pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    Ok(chart)
}

/// Draws the legend box with its upper-left corner at `anchor` (pixels).
fn draw_legend(
    root: &Area<'_>,
    anchor: (i32, i32),
    entries: &[(String, RGBColor)],
    handle: LegendHandle,
    style: &PresentationStyle,
) -> Result<(), Box<dyn Error>> {
    if entries.is_empty() {
        return Ok(());
    }
    let font = style.fonts().legend;
    let row_height = font.size + LEGEND_ROW_SPACING_PX;
    let width = legend_width(entries, style) as i32;
    let height = 2 * LEGEND_PADDING_PX + entries.len() as i32 * row_height - LEGEND_ROW_SPACING_PX;
    let (x0, y0) = anchor;

    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + width, y0 + height)],
        WHITE.mix(0.8).filled(),
    ))?;
    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + width, y0 + height)],
        RGBColor(204, 204, 204).stroke_width(2),
    ))?;

    for (row, (label, color)) in entries.iter().enumerate() {
        let top = y0 + LEGEND_PADDING_PX + row as i32 * row_height;
        let mid = top + font.size / 2;
        let hx0 = x0 + LEGEND_PADDING_PX;
        let hx1 = hx0 + LEGEND_HANDLE_LENGTH_PX;
        match handle {
            LegendHandle::Line => {
                root.draw(&PathElement::new(
                    vec![(hx0, mid), (hx1, mid)],
                    color.stroke_width(LINE_WIDTH_LEGEND),
                ))?;
            }
            LegendHandle::Patch => {
                root.draw(&Rectangle::new(
                    [(hx0, top + font.size / 4), (hx1, top + 3 * font.size / 4)],
                    color.filled(),
                ))?;
            }
        }
        root.draw(&Text::new(
            label.clone(),
            (hx1 + LEGEND_HANDLE_GAP_PX, top),
            font.tuple().into_font().color(&style.text_color()),
        ))?;
    }
    Ok(())
}

/// Legend anchor at (1, 1.01) in axes coordinates of `plot_pixels`.
fn legend_anchor(plot_pixels: (Range<i32>, Range<i32>)) -> (i32, i32) {
    let (x_px, y_px) = plot_pixels;
    let axes_height = (y_px.end - y_px.start) as f64;
    let y = y_px.start as f64 - (LEGEND_ANCHOR_Y - 1.0) * axes_height;
    (x_px.end, y.round() as i32)
}

/// Rasterises the line plot.
pub fn draw_line_figure(
    layout: &LineFigureLayout,
    style: &PresentationStyle,
    dest: Destination<'_>,
) -> Result<Option<Raster>, Box<dyn Error>> {
    let entries: Vec<(String, RGBColor)> = if layout.legend {
        layout
            .traces
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.label.as_ref().map(|l| (style.text(l), style.series_color(i))))
            .collect()
    } else {
        Vec::new()
    };
    let size = (PLOT_WIDTH + legend_width(&entries, style), PLOT_HEIGHT);

    with_canvas(dest, size, |root| {
        root.fill(&style.figure_background())?;
        let (axes_area, _) = root.split_horizontally(PLOT_WIDTH);
        let mut chart = build_axes(&axes_area, &layout.x, &layout.y, style)?;

        for (i, trace) in layout.traces.iter().enumerate() {
            let color = style.series_color(i);
            chart.draw_series(LineSeries::new(
                trace.points.iter().copied(),
                color.stroke_width(LINE_WIDTH_PLOT),
            ))?;
        }

        let anchor = legend_anchor(chart.plotting_area().get_pixel_range());
        draw_legend(root, anchor, &entries, LegendHandle::Line, style)
    })
}

/// Rasterises the histogram.
pub fn draw_histogram_figure(
    layout: &HistogramLayout,
    style: &PresentationStyle,
    dest: Destination<'_>,
) -> Result<Option<Raster>, Box<dyn Error>> {
    let entries: Vec<(String, RGBColor)> = if layout.legend {
        layout
            .datasets
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.label.as_ref().map(|l| (style.text(l), style.series_color(i))))
            .collect()
    } else {
        Vec::new()
    };
    let size = (PLOT_WIDTH + legend_width(&entries, style), PLOT_HEIGHT);

    with_canvas(dest, size, |root| {
        root.fill(&style.figure_background())?;
        let (axes_area, _) = root.split_horizontally(PLOT_WIDTH);
        let mut chart = build_axes(&axes_area, &layout.x, &layout.y, style)?;

        for index in 0..layout.datasets.len() {
            let color = style.series_color(index);
            let bars = layout
                .bars(index)
                .into_iter()
                .filter(|(_, _, height)| *height > 0.0)
                .map(|(x0, x1, height)| Rectangle::new([(x0, 0.0), (x1, height)], color.filled()));
            chart.draw_series(bars)?;
        }

        let anchor = legend_anchor(chart.plotting_area().get_pixel_range());
        draw_legend(root, anchor, &entries, LegendHandle::Patch, style)
    })
}
