#![warn(missing_docs)]
//! Constants describing the thin-film bandpass filter.
use crate::{
    error::{AoiError, AoiResult},
    nanometer,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uom::si::{f64::Length, length::nanometer};

/// The constants of a thin-film bandpass filter.
///
/// These values are set once at startup and stay fixed for the lifetime of a session. There are
/// intentionally no setters; a changed filter is a new [`FilterParameters`] value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterParameters")]
pub struct FilterParameters {
    center_wavelength: Length,
    effective_index: f64,
    fwhm: Length,
}

#[derive(Deserialize)]
struct RawFilterParameters {
    center_wavelength: Length,
    effective_index: f64,
    fwhm: Length,
}

impl TryFrom<RawFilterParameters> for FilterParameters {
    type Error = AoiError;

    fn try_from(raw: RawFilterParameters) -> AoiResult<Self> {
        Self::new(raw.center_wavelength, raw.effective_index, raw.fwhm)
    }
}

impl FilterParameters {
    /// Create a new set of filter constants.
    ///
    /// # Attributes
    ///
    /// - `center_wavelength`: center wavelength of the passband at normal incidence
    /// - `effective_index`: effective refractive index of the thin-film stack
    /// - `fwhm`: full width at half maximum of the passband
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Parameters`] if
    ///   - the center wavelength is non-finite, zero or below zero
    ///   - the effective index is non-finite or not above 1.0
    ///   - the fwhm is non-finite, zero or below zero
    pub fn new(center_wavelength: Length, effective_index: f64, fwhm: Length) -> AoiResult<Self> {
        if !center_wavelength.is_normal() || center_wavelength.is_sign_negative() {
            return Err(AoiError::Parameters(
                "center wavelength must be positive and finite".into(),
            ));
        }
        if !effective_index.is_finite() || effective_index <= 1.0 {
            return Err(AoiError::Parameters(
                "effective index must be > 1.0 and finite".into(),
            ));
        }
        if !fwhm.is_normal() || fwhm.is_sign_negative() {
            return Err(AoiError::Parameters(
                "fwhm must be positive and finite".into(),
            ));
        }
        Ok(Self {
            center_wavelength,
            effective_index,
            fwhm,
        })
    }
    /// Returns the center wavelength at normal incidence.
    #[must_use]
    pub const fn center_wavelength(&self) -> Length {
        self.center_wavelength
    }
    /// Returns the effective refractive index.
    #[must_use]
    pub const fn effective_index(&self) -> f64 {
        self.effective_index
    }
    /// Returns the full width at half maximum of the passband.
    #[must_use]
    pub const fn fwhm(&self) -> Length {
        self.fwhm
    }
}

impl Default for FilterParameters {
    /// A 650 nm bandpass with an effective index of 2.2 and a width of 10 nm.
    fn default() -> Self {
        Self {
            center_wavelength: nanometer!(650.0),
            effective_index: 2.2,
            fwhm: nanometer!(10.0),
        }
    }
}

impl Display for FilterParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CWL: {:.1} nm, n_eff: {}, FWHM: {:.1} nm",
            self.center_wavelength.get::<nanometer>(),
            self.effective_index,
            self.fwhm.get::<nanometer>()
        )
    }
}
