//! Nutrition Calculator Core Library
//!
//! Body mass index, BMI diagnosis, daily caloric need and ideal weight for a
//! single person, computed with classical closed-form formulas.
//!
//! Raw input (text identifiers, JSON attribute maps) is validated and parsed
//! once at the boundary; everything past that point works on typed values.

pub mod assessment;
pub mod calculator;
pub mod calories;
pub mod errors;
pub mod health_metrics;
pub mod ideal_weight;
pub mod person;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use assessment::NutritionalAssessment;
pub use calculator::{Calculator, CalorieCalculator, IdealWeightCalculator, IdealWeightSource};
pub use calories::*;
pub use errors::*;
pub use health_metrics::*;
pub use ideal_weight::*;
pub use person::*;
pub use units::*;
