//! Helpers for creating sampling grids
use crate::error::{AoiError, AoiResult};
use nalgebra::DVector;
use num::ToPrimitive;

/// Creates a linearly spaced Vector (Matrix with 1 column and `num` rows) from `start` to `end`.
///
/// Sample `i` is placed at `start + (end - start) * i / (num - 1)`. Both endpoints are
/// contained exactly.
///
/// # Errors
/// This function will return an [`AoiError::Spectrum`] if
///   - `start` or `end` is not finite
///   - `num` is smaller than two
///   - `start` is not smaller than `end`
pub fn linspace(start: f64, end: f64, num: usize) -> AoiResult<DVector<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(AoiError::Spectrum(
            "start and end values must be finite!".into(),
        ));
    }
    if num < 2 {
        return Err(AoiError::Spectrum(format!(
            "at least two sampling points are required, got {num}"
        )));
    }
    if start >= end {
        return Err(AoiError::Spectrum(format!(
            "range start ({start}) must be smaller than range end ({end})"
        )));
    }
    let last = num - 1;
    let steps = last
        .to_f64()
        .ok_or_else(|| AoiError::Spectrum("cannot cast number of points to f64".into()))?;
    let range = end - start;
    let mut grid = DVector::<f64>::from_element(num, start);
    for (i, val) in grid.iter_mut().enumerate().skip(1) {
        let step = i
            .to_f64()
            .ok_or_else(|| AoiError::Spectrum("cannot cast sample index to f64".into()))?;
        *val = start + range * step / steps;
    }
    grid[last] = end;
    Ok(grid)
}
