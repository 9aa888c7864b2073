//! Data models for `WeatherDash`
//!
//! This module contains the core domain models organized by concern:
//! - Units: Measurement system selection and display units
//! - Condition: Primary weather condition codes
//! - Sample: Observation and forecast points
//! - Location: Geographic coordinates and metadata

pub mod condition;
pub mod location;
pub mod sample;
pub mod units;

// Re-export all public types for convenient access
pub use condition::Condition;
pub use location::Location;
pub use sample::WeatherSample;
pub use units::Units;
