//! Input validation functions
//!
//! Typed callers go through [`validate_name`] and [`validate_positive`]. The
//! dynamic boundary (JSON attribute maps, raw formula options) goes through
//! the `serde_json::Value` validators, which also reject booleans wherever a
//! number is expected. Validation is always eager: nothing is computed from a
//! value that has not passed here.

use crate::calories::CalorieFormula;
use crate::errors::{CalcError, CalcResult};
use crate::person::BiologicalSex;
use serde_json::Value;
use std::str::FromStr;

/// Minimum length of a person's name, in characters
pub const MIN_NAME_CHARS: usize = 5;

/// Valid biological sex values
pub const VALID_BIOLOGICAL_SEX: &[&str] = &["hombre", "mujer"];

const POSITIVE_NUMBER: &str = "must be a positive number";

/// Validate a person's name
pub fn validate_name(name: &str) -> CalcResult<()> {
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(CalcError::invalid(
            "name",
            format!("must be text of at least {} characters", MIN_NAME_CHARS),
        ));
    }
    Ok(())
}

/// Validate a strictly positive, finite measurement
pub fn validate_positive(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_nan() || value.is_infinite() {
        return Err(CalcError::invalid(field, "must be a valid number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, POSITIVE_NUMBER));
    }
    Ok(value)
}

/// Validate biological sex given as text (case-insensitive)
pub fn validate_biological_sex(sex: &str) -> CalcResult<BiologicalSex> {
    sex.parse()
}

/// Validate biological sex from a dynamic value
pub fn validate_sex(value: &Value) -> CalcResult<BiologicalSex> {
    match value {
        Value::String(text) => validate_biological_sex(text),
        _ => Err(CalcError::invalid(
            "sex",
            format!(
                "must be text, one of: {}",
                VALID_BIOLOGICAL_SEX.join(", ")
            ),
        )),
    }
}

/// Validate a positive number from a dynamic value
///
/// Booleans are rejected even though they would coerce to 0/1.
pub fn validate_positive_number(field: &str, value: &Value) -> CalcResult<f64> {
    match value {
        Value::Bool(_) => Err(CalcError::invalid(
            field,
            "must be a number, not a boolean",
        )),
        Value::Number(number) => {
            let number = number
                .as_f64()
                .ok_or_else(|| CalcError::invalid(field, "must be a valid number"))?;
            validate_positive(field, number)
        }
        _ => Err(CalcError::invalid(field, POSITIVE_NUMBER)),
    }
}

/// Validate an age already held in whole years
pub fn validate_age_years(age_years: u32) -> CalcResult<u32> {
    if age_years == 0 {
        return Err(CalcError::invalid("age", POSITIVE_NUMBER));
    }
    Ok(age_years)
}

/// Validate an age in whole years from a dynamic value
pub fn validate_age(value: &Value) -> CalcResult<u32> {
    let age = validate_positive_number("age", value)?;
    if age.fract() != 0.0 || age > u32::MAX as f64 {
        return Err(CalcError::invalid("age", "must be a whole number of years"));
    }
    Ok(age as u32)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Validate any subset of a person's attributes
///
/// An absent (or `null`) attribute is skipped.
pub fn validate_person_data(
    sex: Option<&Value>,
    weight: Option<&Value>,
    height: Option<&Value>,
    age: Option<&Value>,
) -> CalcResult<()> {
    if let Some(sex) = present(sex) {
        validate_sex(sex)?;
    }

    for (field, value) in [("weight", weight), ("height", height), ("age", age)] {
        if let Some(value) = present(value) {
            validate_positive_number(field, value)?;
        }
    }

    Ok(())
}

/// Parse a formula identifier of any family from a dynamic value
pub fn parse_formula<F>(value: &Value) -> CalcResult<F>
where
    F: FromStr<Err = CalcError>,
{
    match value {
        Value::String(text) => text.parse(),
        _ => Err(CalcError::invalid(
            "formula",
            "must be a text formula identifier",
        )),
    }
}

/// Validate the thermic-effect flag from a dynamic value
pub fn validate_thermic_effect_flag(value: &Value) -> CalcResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| CalcError::invalid("thermic_effect", "must be true or false"))
}

/// Validate the options of a calorie calculation
///
/// The flag is checked before the formula identifier.
pub fn validate_formula(
    formula: &Value,
    thermic_effect: &Value,
) -> CalcResult<(CalorieFormula, bool)> {
    let use_thermic_effect = validate_thermic_effect_flag(thermic_effect)?;
    let formula = parse_formula(formula)?;
    Ok((formula, use_thermic_effect))
}
