use crate::error::{ChartError, ChartResult};

pub const AXIS_X_TARGET_SPACING_PX: f64 = 72.0;
pub const AXIS_Y_TARGET_SPACING_PX: f64 = 40.0;
pub const AXIS_MIN_TICKS: usize = 2;
pub const AXIS_MAX_TICKS: usize = 16;

/// Number of ticks that fits `axis_span_px` at roughly `target_spacing_px`.
#[must_use]
pub fn tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks.max(min_ticks))
}

/// Step from the 1/2/5 ladder closest above `span / (target_count - 1)`.
pub fn nice_step(span: f64, target_count: usize) -> ChartResult<f64> {
    if !span.is_finite() || span <= 0.0 {
        return Err(ChartError::InvalidData(
            "tick span must be finite and > 0".to_owned(),
        ));
    }

    let intervals = target_count.saturating_sub(1).max(1) as f64;
    let raw = span / intervals;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let multiplier = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|candidate| *candidate >= residual - 1e-9)
        .unwrap_or(10.0);
    Ok(multiplier * magnitude)
}

/// Step-aligned tick values covering `[min, max]`.
///
/// Values are multiples of the step, so panning an axis keeps the values of
/// ticks that stay visible bit-identical between passes.
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> ChartResult<Vec<f64>> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "tick range must be finite".to_owned(),
        ));
    }
    if target_count == 0 {
        return Ok(Vec::new());
    }

    let (low, high) = (min.min(max), min.max(max));
    if low == high {
        return Ok(vec![normalize_zero(low)]);
    }

    let step = nice_step(high - low, target_count)?;
    let first = (low / step - 1e-9).ceil() as i64;
    let last = (high / step + 1e-9).floor() as i64;
    Ok((first..=last)
        .map(|index| normalize_zero(index as f64 * step))
        .collect())
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
