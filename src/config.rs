#![warn(missing_docs)]
//! Session configuration.
//!
//! A [`SessionConfig`] is read once at startup (usually from a YAML file) and handed to the
//! [`RenderCoordinator`](crate::render::RenderCoordinator). All fields have defaults, so an empty
//! file is a valid configuration.
use crate::{
    error::{AoiError, AoiResult},
    filter::FilterParameters,
    nanometer,
    scene::SceneLayout,
    spectrum::DEFAULT_NUM_POINTS,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use uom::si::f64::Length;

/// All constants of one visualization session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// the filter constants
    pub filter: FilterParameters,
    /// number of samples of each spectral series
    pub num_points: usize,
    /// the plotted wavelength range is `center ± half_span`
    pub half_span: Length,
    /// upper limit of the transmission axis in percent
    pub transmission_max: f64,
    /// layout of the filter schematic
    pub scene: SceneLayout,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            filter: FilterParameters::default(),
            num_points: DEFAULT_NUM_POINTS,
            half_span: nanometer!(30.0),
            transmission_max: 105.0,
            scene: SceneLayout::default(),
        }
    }
}

impl SessionConfig {
    /// Read a [`SessionConfig`] from a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Config`] if
    ///   - the given path is not found or readable.
    ///   - the parsing of the file failed.
    ///   - the values are inconsistent (see [`SessionConfig::validate`]).
    pub fn from_file(path: &Path) -> AoiResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AoiError::Config(format!("cannot read file {} : {}", path.display(), e))
        })?;
        info!("Read session config from {}", path.display());
        Self::from_string(&contents)
    }
    /// Parse a [`SessionConfig`] from a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Config`] if the parsing failed or the values are
    /// inconsistent.
    pub fn from_string(config: &str) -> AoiResult<Self> {
        // serde_yaml refuses an empty document
        if config.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(config)
            .map_err(|e| AoiError::Config(format!("parsing of config failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }
    /// Check the values that cannot be checked while deserializing.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Config`] if
    ///   - `num_points` is below 2
    ///   - `half_span` is not positive and finite or the resulting range would reach zero
    ///   - `transmission_max` is not positive and finite
    pub fn validate(&self) -> AoiResult<()> {
        if self.num_points < 2 {
            return Err(AoiError::Config("num_points must be at least 2".into()));
        }
        if !self.half_span.is_normal() || self.half_span.is_sign_negative() {
            return Err(AoiError::Config(
                "half_span must be positive and finite".into(),
            ));
        }
        if self.half_span >= self.filter.center_wavelength() {
            return Err(AoiError::Config(
                "half_span must be smaller than the center wavelength".into(),
            ));
        }
        if !self.transmission_max.is_finite() || self.transmission_max <= 0.0 {
            return Err(AoiError::Config(
                "transmission_max must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}
