//! Daily caloric need formulas
//!
//! Centimeter-based formulas (Harris-Benedict, Mifflin-St Jeor, FAO/OMS)
//! come in two layers: a `*_base` function returning the raw kcal estimate,
//! and a message function that applies the thermic effect of food and
//! formats the result for the person. Krumdieck works in meters and returns
//! a bare number.

use crate::errors::CalcError;
use crate::health_metrics::{format_decimal, round2};
use crate::person::{BiologicalSex, Person};
use crate::units::Height;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calorie formula identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalorieFormula {
    #[serde(rename = "harris")]
    HarrisBenedict,
    #[default]
    #[serde(rename = "mifflin")]
    MifflinStJeor,
    #[serde(rename = "fao/oms")]
    FaoOms,
    #[serde(rename = "krumdieck")]
    Krumdieck,
}

impl CalorieFormula {
    pub const ALL: [CalorieFormula; 4] = [
        CalorieFormula::HarrisBenedict,
        CalorieFormula::MifflinStJeor,
        CalorieFormula::FaoOms,
        CalorieFormula::Krumdieck,
    ];

    /// Identifier text, as accepted by [`str::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieFormula::HarrisBenedict => "harris",
            CalorieFormula::MifflinStJeor => "mifflin",
            CalorieFormula::FaoOms => "fao/oms",
            CalorieFormula::Krumdieck => "krumdieck",
        }
    }

    /// Get a human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CalorieFormula::HarrisBenedict => "Harris-Benedict",
            CalorieFormula::MifflinStJeor => "Mifflin-St Jeor",
            CalorieFormula::FaoOms => "FAO/OMS",
            CalorieFormula::Krumdieck => "Krumdieck",
        }
    }
}

impl fmt::Display for CalorieFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CalorieFormula {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        CalorieFormula::ALL
            .into_iter()
            .find(|formula| formula.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = CalorieFormula::ALL.iter().map(|f| f.as_str()).collect();
                CalcError::invalid(
                    "formula",
                    format!("must be one of: {}", valid.join(", ")),
                )
            })
    }
}

// ============================================================================
// Thermic Effect of Food
// ============================================================================

/// Thermic effect of food: a fixed 10% of the base estimate
pub fn thermic_effect_of_food(base_kcal: f64) -> f64 {
    base_kcal / 10.0
}

/// Total kcal, optionally adding the thermic effect, rounded to two decimals
pub fn calories_with_thermic_effect(base_kcal: f64, use_thermic_effect: bool) -> f64 {
    if !use_thermic_effect {
        return round2(base_kcal);
    }
    round2(base_kcal + thermic_effect_of_food(base_kcal))
}

// ============================================================================
// Base Formulas
// ============================================================================

/// Harris-Benedict equation (original)
///
/// Men: 66.5 + 13.75 × weight(kg) + 5.003 × height(cm) - 6.775 × age(y)
/// Women: 655.1 + 9.563 × weight(kg) + 1.85 × height(cm) - 4.676 × age(y)
pub fn harris_benedict_base(
    sex: BiologicalSex,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
) -> f64 {
    let age = age_years as f64;
    match sex {
        BiologicalSex::Male => 66.5 + 13.75 * weight_kg + 5.003 * height_cm - 6.775 * age,
        BiologicalSex::Female => 655.1 + 9.563 * weight_kg + 1.85 * height_cm - 4.676 * age,
    }
}

/// Mifflin-St Jeor equation
///
/// Men: 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn mifflin_st_jeor_base(
    sex: BiologicalSex,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// FAO/OMS equation
///
/// Men: 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn fao_oms_base(sex: BiologicalSex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let age = age_years as f64;
    match sex {
        BiologicalSex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        BiologicalSex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Krumdieck formula: 30 × weight(kg) + 40 × height(m)
///
/// Not rounded, no thermic effect.
pub fn krumdieck_calories(weight_kg: f64, height: impl Into<Height>) -> f64 {
    30.0 * weight_kg + 40.0 * height.into().as_meters()
}

// ============================================================================
// Message Formulas
// ============================================================================

fn calorie_message(formula: CalorieFormula, name: &str, kcal: f64) -> String {
    format!(
        "De acuerdo a la fórmula de {} estimado {}, las kcal que necesitas son: {}",
        formula.as_str(),
        name,
        format_decimal(kcal)
    )
}

/// Harris-Benedict kcal estimate as a message for the person
pub fn harris_benedict(
    name: &str,
    sex: BiologicalSex,
    height: impl Into<Height>,
    weight_kg: f64,
    age_years: u32,
    use_thermic_effect: bool,
) -> String {
    let base = harris_benedict_base(sex, weight_kg, height.into().as_cm(), age_years);
    let kcal = calories_with_thermic_effect(base, use_thermic_effect);
    calorie_message(CalorieFormula::HarrisBenedict, name, kcal)
}

/// Mifflin-St Jeor kcal estimate as a message for the person
pub fn mifflin_st_jeor(
    name: &str,
    sex: BiologicalSex,
    height: impl Into<Height>,
    weight_kg: f64,
    age_years: u32,
    use_thermic_effect: bool,
) -> String {
    let base = mifflin_st_jeor_base(sex, weight_kg, height.into().as_cm(), age_years);
    let kcal = calories_with_thermic_effect(base, use_thermic_effect);
    calorie_message(CalorieFormula::MifflinStJeor, name, kcal)
}

/// FAO/OMS kcal estimate as a message for the person
pub fn fao_oms(
    name: &str,
    sex: BiologicalSex,
    height: impl Into<Height>,
    weight_kg: f64,
    age_years: u32,
    use_thermic_effect: bool,
) -> String {
    let base = fao_oms_base(sex, weight_kg, height.into().as_cm(), age_years);
    let kcal = calories_with_thermic_effect(base, use_thermic_effect);
    calorie_message(CalorieFormula::FaoOms, name, kcal)
}

// ============================================================================
// Dispatch
// ============================================================================

/// A calorie formula applied to a full person record
pub type CalorieFn = fn(&Person, bool) -> String;

fn harris_for(person: &Person, use_thermic_effect: bool) -> String {
    harris_benedict(
        person.name(),
        person.sex(),
        person.height(),
        person.weight_kg(),
        person.age_years(),
        use_thermic_effect,
    )
}

fn mifflin_for(person: &Person, use_thermic_effect: bool) -> String {
    mifflin_st_jeor(
        person.name(),
        person.sex(),
        person.height(),
        person.weight_kg(),
        person.age_years(),
        use_thermic_effect,
    )
}

fn fao_oms_for(person: &Person, use_thermic_effect: bool) -> String {
    fao_oms(
        person.name(),
        person.sex(),
        person.height(),
        person.weight_kg(),
        person.age_years(),
        use_thermic_effect,
    )
}

/// Krumdieck dispatched like the others: rounded, with the thermic effect when asked
fn krumdieck_for(person: &Person, use_thermic_effect: bool) -> String {
    let base = krumdieck_calories(person.weight_kg(), person.height());
    let kcal = calories_with_thermic_effect(base, use_thermic_effect);
    calorie_message(CalorieFormula::Krumdieck, person.name(), kcal)
}

/// Resolve a calorie formula identifier to its implementation
pub fn resolve_calorie_formula(formula: CalorieFormula) -> CalorieFn {
    match formula {
        CalorieFormula::HarrisBenedict => harris_for,
        CalorieFormula::MifflinStJeor => mifflin_for,
        CalorieFormula::FaoOms => fao_oms_for,
        CalorieFormula::Krumdieck => krumdieck_for,
    }
}
