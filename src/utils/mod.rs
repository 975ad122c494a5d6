//! Module for additional computational capabilities
pub mod griddata;
pub mod math_distribution_functions;
pub mod uom_macros;
