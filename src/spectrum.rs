//! Module for synthesizing transmission spectra of a bandpass filter
use crate::error::{AoiError, AoiResult};
use crate::utils::{griddata::linspace, math_distribution_functions::gaussian};
use nalgebra::DVector;
use std::fmt::{Debug, Display};
use std::io::Write;
use std::ops::Range;
use uom::fmt::DisplayStyle::Abbreviation;
use uom::si::{f64::Length, length::nanometer};

/// Number of samples per series used when nothing else is configured.
pub const DEFAULT_NUM_POINTS: usize = 300;

/// Peak transmission (in percent) of a synthesized passband.
const PEAK_TRANSMISSION: f64 = 100.0;

/// A sampled transmission curve.
///
/// The wavelengths are stored in nanometers and are strictly increasing. The transmission is
/// given in percent.
#[derive(Clone, PartialEq)]
pub struct SpectralSeries {
    wavelengths: DVector<f64>,
    transmission: DVector<f64>,
}

impl SpectralSeries {
    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }
    /// Returns `true` if the series contains no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
    /// Returns the sample wavelengths in nanometers.
    #[must_use]
    pub fn wavelengths_nm(&self) -> &[f64] {
        self.wavelengths.as_slice()
    }
    /// Returns the transmission values in percent.
    #[must_use]
    pub fn transmission(&self) -> &[f64] {
        self.transmission.as_slice()
    }
    /// Iterate over all `(wavelength, transmission)` samples.
    pub fn iter(&self) -> impl Iterator<Item = (Length, f64)> + '_ {
        self.wavelengths
            .iter()
            .zip(self.transmission.iter())
            .map(|(w, t)| (Length::new::<nanometer>(*w), *t))
    }
    /// Returns the sample with the highest transmission.
    #[must_use]
    pub fn peak(&self) -> Option<(Length, f64)> {
        self.iter().max_by(|a, b| a.1.total_cmp(&b.1))
    }
    /// Write the series as CSV (`wavelength_nm,transmission_percent`) into the given writer.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Other`] if the writer fails.
    pub fn to_csv<W: Write>(&self, writer: W) -> AoiResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["wavelength_nm", "transmission_percent"])
            .map_err(|e| AoiError::Other(format!("writing csv header failed: {e}")))?;
        for (w, t) in self.wavelengths.iter().zip(self.transmission.iter()) {
            wtr.write_record(&[w.to_string(), t.to_string()])
                .map_err(|e| AoiError::Other(format!("writing csv record failed: {e}")))?;
        }
        wtr.flush()
            .map_err(|e| AoiError::Other(format!("flushing csv writer failed: {e}")))
    }
}

/// Synthesize the Gaussian transmission curve of a bandpass filter.
///
/// The passband has a height of 100 % at `center` and the full width at half maximum `fwhm`.
/// It is sampled at `num_points` equidistant wavelengths including both ends of `range`.
///
/// # Errors
///
/// This function will return an [`AoiError::Spectrum`] if
///   - `num_points` is smaller than two
///   - the wavelength range is not in ascending order or not finite
///   - the center wavelength is not finite
///   - the fwhm is non-finite, zero or below zero
pub fn synthesize_transmission(
    center: Length,
    fwhm: Length,
    range: Range<Length>,
    num_points: usize,
) -> AoiResult<SpectralSeries> {
    if !center.is_finite() {
        return Err(AoiError::Spectrum("center wavelength must be finite".into()));
    }
    if !fwhm.is_normal() || fwhm.is_sign_negative() {
        return Err(AoiError::Spectrum(
            "fwhm must be greater than zero and finite".into(),
        ));
    }
    let wavelengths = linspace(
        range.start.get::<nanometer>(),
        range.end.get::<nanometer>(),
        num_points,
    )?;
    let transmission = DVector::from_vec(gaussian(
        wavelengths.as_slice(),
        center.get::<nanometer>(),
        fwhm.get::<nanometer>(),
        PEAK_TRANSMISSION,
    ));
    Ok(SpectralSeries {
        wavelengths,
        transmission,
    })
}

impl Display for SpectralSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_length = Length::format_args(nanometer, Abbreviation);
        for (w, t) in self.iter() {
            writeln!(f, "{:7.2} -> {t:6.2} %", fmt_length.with(w))?;
        }
        Ok(())
    }
}

impl Debug for SpectralSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpectralSeries with {} samples", self.len())?;
        if let (Some(first), Some(last)) =
            (self.wavelengths.iter().next(), self.wavelengths.iter().last())
        {
            write!(f, " ({first} nm .. {last} nm)")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::nanometer;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn baseline() -> SpectralSeries {
        synthesize_transmission(
            nanometer!(650.0),
            nanometer!(10.0),
            nanometer!(620.0)..nanometer!(680.0),
            DEFAULT_NUM_POINTS,
        )
        .unwrap()
    }
    #[test]
    fn number_of_samples() {
        let s = baseline();
        assert_eq!(s.len(), 300);
        assert!(!s.is_empty());
        assert_eq!(s.transmission().len(), 300);
    }
    #[test]
    fn endpoints() {
        let s = baseline();
        assert_abs_diff_eq!(s.wavelengths_nm()[0], 620.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.wavelengths_nm()[299], 680.0, epsilon = 1e-9);
        assert!(s.wavelengths_nm().windows(2).all(|w| w[1] > w[0]));
    }
    #[test]
    fn peak_at_sample_closest_to_center() {
        let s = synthesize_transmission(
            nanometer!(642.097),
            nanometer!(10.0),
            nanometer!(620.0)..nanometer!(680.0),
            DEFAULT_NUM_POINTS,
        )
        .unwrap();
        let closest = s
            .wavelengths_nm()
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - 642.097).abs().total_cmp(&(b.1 - 642.097).abs()))
            .unwrap()
            .0;
        let max = s
            .transmission()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap()
            .0;
        assert_eq!(closest, max);
        assert!(s.transmission()[max] > 99.0);
        assert!(s.transmission().iter().all(|t| (0.0..=100.0).contains(t)));
    }
    #[test]
    fn symmetric_about_center() {
        let s = baseline();
        let t = s.transmission();
        for i in 0..t.len() / 2 {
            assert_abs_diff_eq!(t[i], t[t.len() - 1 - i], epsilon = 1e-9);
        }
    }
    #[test]
    fn half_maximum() {
        let s = synthesize_transmission(
            nanometer!(650.0),
            nanometer!(10.0),
            nanometer!(640.0)..nanometer!(660.0),
            5,
        )
        .unwrap();
        assert_abs_diff_eq!(s.transmission()[1], 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.transmission()[2], 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.transmission()[3], 50.0, epsilon = 1e-9);
    }
    #[test]
    fn two_points() {
        let s = synthesize_transmission(
            nanometer!(650.0),
            nanometer!(10.0),
            nanometer!(640.0)..nanometer!(660.0),
            2,
        )
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_abs_diff_eq!(s.wavelengths_nm()[0], 640.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.wavelengths_nm()[1], 660.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.transmission()[0], 6.25, epsilon = 1e-9);
        assert_abs_diff_eq!(s.transmission()[1], 6.25, epsilon = 1e-9);
    }
    #[test]
    fn preconditions() {
        let range = nanometer!(640.0)..nanometer!(660.0);
        assert_matches!(
            synthesize_transmission(nanometer!(650.0), nanometer!(10.0), range.clone(), 1),
            Err(AoiError::Spectrum(_))
        );
        assert_matches!(
            synthesize_transmission(nanometer!(650.0), nanometer!(10.0), range.clone(), 0),
            Err(AoiError::Spectrum(_))
        );
        assert_matches!(
            synthesize_transmission(
                nanometer!(650.0),
                nanometer!(10.0),
                nanometer!(660.0)..nanometer!(640.0),
                10
            ),
            Err(AoiError::Spectrum(_))
        );
        assert_matches!(
            synthesize_transmission(
                nanometer!(650.0),
                nanometer!(10.0),
                nanometer!(650.0)..nanometer!(650.0),
                10
            ),
            Err(AoiError::Spectrum(_))
        );
        for fwhm in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_matches!(
                synthesize_transmission(nanometer!(650.0), nanometer!(fwhm), range.clone(), 10),
                Err(AoiError::Spectrum(_))
            );
        }
        assert_matches!(
            synthesize_transmission(nanometer!(f64::NAN), nanometer!(10.0), range, 10),
            Err(AoiError::Spectrum(_))
        );
    }
    #[test]
    fn peak() {
        let (wvl, t) = baseline().peak().unwrap();
        assert_abs_diff_eq!(wvl.get::<nanometer>(), 650.0, epsilon = 0.2);
        assert!(t > 99.0);
    }
    #[test]
    fn to_csv() {
        let s = synthesize_transmission(
            nanometer!(650.0),
            nanometer!(10.0),
            nanometer!(640.0)..nanometer!(660.0),
            3,
        )
        .unwrap();
        let mut buf = Vec::new();
        s.to_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "wavelength_nm,transmission_percent");
        let mid: Vec<f64> = lines[2]
            .split(',')
            .map(|v| v.parse::<f64>().unwrap())
            .collect();
        assert_abs_diff_eq!(mid[0], 650.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid[1], 100.0, epsilon = 1e-9);
    }
    #[test]
    fn debug() {
        let s = synthesize_transmission(
            nanometer!(650.0),
            nanometer!(10.0),
            nanometer!(640.0)..nanometer!(660.0),
            2,
        )
        .unwrap();
        assert!(format!("{s:?}").starts_with("SpectralSeries with 2 samples"));
    }
}
