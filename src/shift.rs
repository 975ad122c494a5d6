#![warn(missing_docs)]
//! Angle dependent center wavelength of a thin-film bandpass filter.
//!
//! Tilting an interference filter shifts its passband towards shorter wavelengths. Within the
//! effective-index approximation the shifted center wavelength is
//!
//! `λ(θ) = λ0 · sqrt(n² − sin²θ) / n`
//!
//! with `λ0` the center wavelength at normal incidence and `n` the effective index of the
//! thin-film stack.
use crate::{
    error::{AoiError, AoiResult},
    filter::FilterParameters,
};
use log::{debug, warn};
use std::f64::consts::FRAC_PI_2;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length},
};

/// Calculate the center wavelength of the filter passband for the given angle of incidence.
///
/// The formula is evaluated as `λ0 · sqrt(1 − (sinθ / n)²)` which is algebraically identical
/// to the form given in the module documentation but returns exactly `λ0` at normal incidence.
/// Angles are not clamped. Angles with `|θ| >= 90°` are accepted but reported as warning.
///
/// # Errors
///
/// This function will return an [`AoiError::Domain`] if
///   - the angle of incidence is not finite
///   - `|sinθ|` exceeds the effective index, which leaves the square root undefined. This cannot
///     happen for validated [`FilterParameters`] (index > 1) but is never turned into NaN.
pub fn shifted_center_wavelength(filter: &FilterParameters, aoi: Angle) -> AoiResult<Length> {
    if !aoi.is_finite() {
        return Err(AoiError::Domain(
            "angle of incidence must be finite".into(),
        ));
    }
    if aoi.get::<radian>().abs() >= FRAC_PI_2 {
        warn!(
            "angle of incidence {:.1}° is at or beyond grazing incidence",
            aoi.get::<degree>()
        );
    }
    let sin_ratio = aoi.get::<radian>().sin() / filter.effective_index();
    let radicand = sin_ratio.mul_add(-sin_ratio, 1.0);
    if radicand < 0.0 {
        return Err(AoiError::Domain(format!(
            "angle of incidence {:.3}° lies beyond the critical angle of the effective index {}",
            aoi.get::<degree>(),
            filter.effective_index()
        )));
    }
    let shifted = filter.center_wavelength() * radicand.sqrt();
    debug!(
        "AOI {:.3}° -> shift factor {:.6}",
        aoi.get::<degree>(),
        radicand.sqrt()
    );
    Ok(shifted)
}
