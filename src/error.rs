#![warn(missing_docs)]
//! Error structures of the AOI shift pipeline
use std::{error::Error, fmt::Display};

/// Application specific Result type
pub type AoiResult<T> = std::result::Result<T, AoiError>;

/// Errors that can be returned by the computation and rendering functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AoiError {
    /// the angle of incidence lies outside the domain of the shift formula (or is not finite)
    Domain(String),
    /// precondition violations while synthesizing a spectral series
    Spectrum(String),
    /// invalid filter constants
    Parameters(String),
    /// errors reported by the plotting backend
    Plot(String),
    /// errors reported by the drawing surface
    Drawing(String),
    /// errors while reading or parsing a configuration file
    Config(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for AoiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(m) => write!(f, "Domain:{m}"),
            Self::Spectrum(m) => write!(f, "Spectrum:{m}"),
            Self::Parameters(m) => write!(f, "Parameters:{m}"),
            Self::Plot(m) => write!(f, "Plot:{m}"),
            Self::Drawing(m) => write!(f, "Drawing:{m}"),
            Self::Config(m) => write!(f, "Config:{m}"),
            Self::Console(m) => write!(f, "Console:{m}"),
            Self::Other(m) => write!(f, "AoiShift Error:Other:{m}"),
        }
    }
}
impl Error for AoiError {}

impl std::convert::From<String> for AoiError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
