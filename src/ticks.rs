// src/ticks.rs

//! Axis range and tick-spacing heuristics for value, time and count axes.
//!
//! All rounding is round-half-to-even.

use crate::constants::{
    MAX_VALUE_AXIS_TICKS, REL_TICK_LABEL_FACTOR, REL_TICK_LABEL_SPAN_FACTOR,
    REL_TICK_POSITION_FACTOR, Y_RANGE_PADDING,
};
use crate::error::{PlotError, Result};

/// Nearest-integer rounding with ties to even.
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Rounds to one decimal place, ties to even.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Value axis bounds: `[round(min - 0.55), round(max + 0.55)]`.
pub fn value_axis_bounds(min_val: f64, max_val: f64) -> (i64, i64) {
    (
        round_half_even(min_val - Y_RANGE_PADDING),
        round_half_even(max_val + Y_RANGE_PADDING),
    )
}

/// Tick step of one tenth of the order of magnitude of `upper`:
/// `10^(round(log10(upper)) - 1)`.
///
/// Magnitudes below 1 are treated as 1, so the smallest step is 0.1.
pub fn order_of_magnitude_step(upper: i64) -> f64 {
    let magnitude = (upper.unsigned_abs() as f64).max(1.0);
    let om = round_half_even(magnitude.log10());
    10f64.powi(om as i32 - 1)
}

/// Tick values `start, start + step, ...` strictly below `stop`.
pub fn tick_values(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count)
        .map(|k| start + k as f64 * step)
        .filter(|v| *v < stop - step * 1e-9)
        .collect()
}

/// Ticks for a value axis with bounds `(lower, upper)`.
///
/// Generated from `lower` up to `upper + 1` (exclusive) and clipped to the
/// visible range.
///
/// The step only depends on `upper`, so a wide range with a small upper bound
/// (e.g. large negative energies) asks for far too many ticks. `None` is
/// returned when the count would exceed `MAX_VALUE_AXIS_TICKS`.
pub fn value_axis_ticks(lower: i64, upper: i64) -> Option<Vec<f64>> {
    let step = order_of_magnitude_step(upper);
    let span = (upper as f64 + 1.0) - lower as f64;
    if span / step > MAX_VALUE_AXIS_TICKS as f64 {
        return None;
    }
    let ticks = tick_values(lower as f64, (upper + 1) as f64, step)
        .into_iter()
        .filter(|v| *v <= upper as f64 + step * 1e-9)
        .collect();
    Some(ticks)
}

/// Samples per window expressed in whole nanoseconds:
/// `round(windowed_length / frames_per_ns)`.
pub fn ns_per_window(windowed_length: usize, frames_per_ns: usize) -> Result<usize> {
    if frames_per_ns == 0 {
        return Err(PlotError::invalid_input("frames_per_ns must be positive"));
    }
    let ns = round_half_even(windowed_length as f64 / frames_per_ns as f64);
    if ns <= 0 {
        return Err(PlotError::invalid_input(format!(
            "window of {windowed_length} frames is shorter than half a nanosecond \
             at {frames_per_ns} frames/ns; relative ticks cannot be placed"
        )));
    }
    Ok(ns as usize)
}

/// Relative x ticks as `(sample position, label value)` pairs.
///
/// Positions run every `ns * 1000` samples from 0 to `windowed_length`
/// inclusive; labels run `0, ns*10, ..., ns*100`. The two lists are paired
/// in order and truncated to the shorter one.
pub fn relative_x_ticks(
    windowed_length: usize,
    frames_per_ns: usize,
) -> Result<Vec<(usize, usize)>> {
    let ns = ns_per_window(windowed_length, frames_per_ns)?;
    let positions = (0..=windowed_length).step_by(ns * REL_TICK_POSITION_FACTOR);
    let labels = (0..=ns * REL_TICK_LABEL_SPAN_FACTOR).step_by(ns * REL_TICK_LABEL_FACTOR);
    Ok(positions.zip(labels).collect())
}

/// Histogram bin count: `round((upper - lower) * bins_factor)`, at least one.
///
/// The factor scales the whole span, giving one bin per unit of the value
/// axis at the default factor of 1.
pub fn histogram_bin_count(lower: i64, upper: i64, bins_factor: f64) -> usize {
    let span = (upper - lower) as f64;
    round_half_even(span * bins_factor).max(1) as usize
}

/// Count-axis tick step for a histogram over `count` samples.
///
/// `om = round(log10(count))`, step = `int(round(count / 10^om, 1) * 10^(om-1))`,
/// i.e. the leading significant digit scaled to a tenth of the order of
/// magnitude. Never below 1.
pub fn histogram_count_step(count: usize) -> usize {
    if count == 0 {
        return 1;
    }
    let n = count as f64;
    let om = round_half_even(n.log10()) as i32;
    let leading = round_one_decimal(n / 10f64.powi(om));
    let step = (leading * 10f64.powi(om - 1)).trunc() as usize;
    step.max(1)
}

/// Count-axis ticks: `0, step, ...` up to and including `count`.
pub fn histogram_count_ticks(count: usize) -> Vec<f64> {
    let step = histogram_count_step(count);
    (0..=count).step_by(step).map(|v| v as f64).collect()
}
