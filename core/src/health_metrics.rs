//! Health metrics calculations module
//!
//! BMI, healthy weight range and the BMI diagnosis bands. All calculations
//! are pure and take heights in any unit (see [`Height`]).

use crate::errors::CalcResult;
use crate::units::Height;
use crate::validation::validate_positive;
use serde::{Deserialize, Serialize};

/// Lower bound of the healthy BMI band
pub const HEALTHY_BMI_MIN: f64 = 18.5;
/// Upper bound of the healthy BMI band used for weight ranges
pub const HEALTHY_BMI_MAX: f64 = 24.99;

/// Round to two decimals, half away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shortest round-trip text for a value, always with a decimal part
pub(crate) fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)², rounded to two decimals
pub fn body_mass_index(weight_kg: f64, height: impl Into<Height>) -> CalcResult<f64> {
    let height = height.into();
    validate_positive("weight", weight_kg)?;
    validate_positive("height", height.value)?;

    Ok(round2(weight_kg / height.squared_meters()))
}

/// Healthy weight range in kg for a given height
///
/// Based on BMI 18.5-24.99
pub fn healthy_weight_range_kg(height: impl Into<Height>) -> (f64, f64) {
    let height_m_sq = height.into().squared_meters();
    (
        round2(height_m_sq * HEALTHY_BMI_MIN),
        round2(height_m_sq * HEALTHY_BMI_MAX),
    )
}

/// Healthy weight range as a display message
pub fn healthy_weight_range(height: impl Into<Height>) -> String {
    let (min, max) = healthy_weight_range_kg(height);
    format!(
        "peso minimo={}kg - maximo={}kg",
        format_decimal(min),
        format_decimal(max)
    )
}

/// Outcome of the BMI diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiDiagnosis {
    Underweight,
    NormalWeight,
    Overweight,
    Obesity,
    /// No band matched; not an error
    Unclassified,
}

impl BmiDiagnosis {
    /// Short category label
    pub fn label(&self) -> &'static str {
        match self {
            BmiDiagnosis::Underweight => "underweight",
            BmiDiagnosis::NormalWeight => "normal weight",
            BmiDiagnosis::Overweight => "overweight",
            BmiDiagnosis::Obesity => "obesity",
            BmiDiagnosis::Unclassified => "does not match any category, verify inputs",
        }
    }

    /// Message shown to the person
    pub fn message(&self) -> &'static str {
        match self {
            BmiDiagnosis::Underweight => "Te encuentras en un bajo peso",
            BmiDiagnosis::NormalWeight => "Te encuentras en un peso saludable",
            BmiDiagnosis::Overweight => "Te encuentras en sobrepeso",
            BmiDiagnosis::Obesity => {
                "Tienes un exceso de peso, lo recomendable es acudir con un profesional de la salud"
            }
            BmiDiagnosis::Unclassified => {
                "No coincide con ninguna categoría, verifica los datos ingresados"
            }
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, BmiDiagnosis::Unclassified)
    }
}

/// Classify a BMI value
///
/// Bands are checked in order and the first match wins. Values of 35 and
/// above fall through to [`BmiDiagnosis::Unclassified`].
pub fn classify_bmi(bmi: f64) -> BmiDiagnosis {
    if bmi < 18.5 {
        BmiDiagnosis::Underweight
    } else if (18.5..25.0).contains(&bmi) {
        BmiDiagnosis::NormalWeight
    } else if bmi > 24.99 && bmi < 30.0 {
        BmiDiagnosis::Overweight
    } else if bmi > 29.99 && bmi < 35.0 {
        BmiDiagnosis::Obesity
    } else {
        BmiDiagnosis::Unclassified
    }
}

/// Compute the BMI and classify it
pub fn diagnose_bmi(weight_kg: f64, height: impl Into<Height>) -> CalcResult<BmiDiagnosis> {
    body_mass_index(weight_kg, height).map(classify_bmi)
}
