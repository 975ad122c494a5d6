//! distribution functions used for synthesizing spectral curves

/// Conversion factor between the full width at half maximum and the standard deviation of a
/// Gaussian: `fwhm = 2 * sqrt(2 * ln 2) * sigma`
#[must_use]
pub fn fwhm_to_sigma(fwhm: f64) -> f64 {
    fwhm / (2.0 * f64::sqrt(2.0 * std::f64::consts::LN_2))
}

/// Evaluate a Gaussian of height `amplitude` centered at `mu` with the full width at half
/// maximum `fwhm` at every position in `x`.
///
/// # Remarks
/// This function does not check the usefulness of the input arguments,
/// meaning that passing values of NaN, Infinity, zero or negative widths may result in an unexpected outcome.
/// Validated use goes through [`synthesize_transmission`](crate::spectrum::synthesize_transmission).
#[must_use]
pub fn gaussian(x: &[f64], mu: f64, fwhm: f64, amplitude: f64) -> Vec<f64> {
    let sigma = fwhm_to_sigma(fwhm);
    x.iter()
        .map(|x| amplitude * f64::exp(-0.5 * ((x - mu) / sigma).powi(2)))
        .collect()
}
