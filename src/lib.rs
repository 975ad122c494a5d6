//! This is the documentation for the **aoi_shift** package.
//!
//! Tilting a thin-film bandpass filter shifts its passband towards shorter wavelengths. This
//! crate computes the shifted center wavelength for a given angle of incidence (AOI), synthesizes
//! the transmission spectrum of the tilted and the untilted filter and draws a side-view
//! schematic of the beam hitting the filter.
//!
//! The computational core ([`shift`], [`spectrum`], [`scene`]) is pure. The
//! [`render::RenderCoordinator`] sequences one refresh cycle and hands the results to
//! collaborators for plotting, drawing and display.
pub mod config;
pub mod console;
pub mod drawing;
pub mod error;
pub mod filter;
pub mod plottable;
pub mod render;
pub mod scene;
pub mod session;
pub mod shift;
pub mod spectrum;
pub mod utils;
