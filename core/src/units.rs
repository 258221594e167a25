//! Height units and normalization
//!
//! Every formula works in either centimeters or meters. A [`Height`] carries
//! its unit explicitly so conversion is never guessed; raw numbers go through
//! the compatibility heuristic in [`HeightUnit::infer`] exactly once, at the
//! boundary.
//!
//! # Heuristic
//!
//! A bare value below [`METERS_THRESHOLD`] is taken as meters, anything else
//! as centimeters. A 9 cm height would be misread as 9 m; no human height is
//! affected.

use crate::errors::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bare heights below this value are read as meters
pub const METERS_THRESHOLD: f64 = 10.0;

/// Height unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    #[serde(rename = "m")]
    Meters,
}

impl HeightUnit {
    /// Guess the unit of a bare height value
    pub fn infer(value: f64) -> Self {
        if value < METERS_THRESHOLD {
            HeightUnit::Meters
        } else {
            HeightUnit::Cm
        }
    }

    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Meters => value * 100.0,
        }
    }

    /// Convert from this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value / 100.0,
            HeightUnit::Meters => value,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Meters => "m",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" | "centimetro" | "centimetros" => {
                Ok(HeightUnit::Cm)
            }
            "m" | "meter" | "meters" | "metro" | "metros" => Ok(HeightUnit::Meters),
            _ => Err(CalcError::invalid(
                "height_unit",
                format!("unknown height unit: {}", s),
            )),
        }
    }
}

/// A height with an explicit unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub value: f64,
    #[serde(default)]
    pub unit: HeightUnit,
}

impl Height {
    pub fn new(value: f64, unit: HeightUnit) -> Self {
        Self { value, unit }
    }

    pub fn cm(value: f64) -> Self {
        Self::new(value, HeightUnit::Cm)
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, HeightUnit::Meters)
    }

    /// Build a height from a bare value using the meters/centimeters heuristic
    pub fn infer(value: f64) -> Self {
        Self::new(value, HeightUnit::infer(value))
    }

    pub fn as_cm(&self) -> f64 {
        self.unit.to_cm(self.value)
    }

    pub fn as_meters(&self) -> f64 {
        self.unit.to_meters(self.value)
    }

    /// Height in meters, squared (the BMI denominator)
    pub fn squared_meters(&self) -> f64 {
        let meters = self.as_meters();
        meters * meters
    }
}

impl From<f64> for Height {
    fn from(value: f64) -> Self {
        Height::infer(value)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Normalize a bare height to centimeters
pub fn height_to_centimeters(height: f64) -> f64 {
    Height::infer(height).as_cm()
}

/// Normalize a bare height to meters
pub fn height_to_meters(height: f64) -> f64 {
    Height::infer(height).as_meters()
}
