//! Ideal weight formulas
//!
//! Each formula needs a different subset of a person's attributes. An
//! [`IdealWeightProfile`] holds everything any of them may need;
//! [`data_for_ideal_weight`] projects out exactly what the chosen formula
//! reads, and [`resolve_ideal_weight_formula`] maps the identifier to the
//! function that consumes that projection.

use crate::errors::{CalcError, CalcResult};
use crate::health_metrics::round2;
use crate::person::{BiologicalSex, Person};
use crate::units::Height;
use crate::validation::{
    validate_age, validate_age_years, validate_person_data, validate_positive,
    validate_positive_number, validate_sex,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Ideal weight formula identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdealWeightFormula {
    #[default]
    Lorentz,
    Perrault,
    Brocca,
}

impl IdealWeightFormula {
    pub const ALL: [IdealWeightFormula; 3] = [
        IdealWeightFormula::Lorentz,
        IdealWeightFormula::Perrault,
        IdealWeightFormula::Brocca,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdealWeightFormula::Lorentz => "lorentz",
            IdealWeightFormula::Perrault => "perrault",
            IdealWeightFormula::Brocca => "brocca",
        }
    }

    /// Attributes the formula reads
    pub fn required_attributes(&self) -> &'static [&'static str] {
        match self {
            IdealWeightFormula::Lorentz => &["sex", "height", "age"],
            IdealWeightFormula::Perrault => &["height", "age"],
            IdealWeightFormula::Brocca => &["height"],
        }
    }
}

impl fmt::Display for IdealWeightFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IdealWeightFormula {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lorentz" => Ok(IdealWeightFormula::Lorentz),
            "perrault" => Ok(IdealWeightFormula::Perrault),
            // also accepted under its common variant spellings
            "brocca" | "broca" | "broccoli" => Ok(IdealWeightFormula::Brocca),
            _ => Err(CalcError::invalid(
                "formula",
                "must be one of: lorentz, perrault, brocca",
            )),
        }
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Lorentz formula, rounded to two decimals
///
/// Men: H - 100 - (H - 150) / 4 + (age - 20) / 4
/// Women: H - 100 - (H - 150) / 4 + (age - 20) / 32
pub fn lorentz(sex: BiologicalSex, height: impl Into<Height>, age_years: u32) -> f64 {
    let height_cm = height.into().as_cm();
    let age_divisor = match sex {
        BiologicalSex::Male => 4.0,
        BiologicalSex::Female => 32.0,
    };
    round2(
        height_cm - 100.0 - ((height_cm - 150.0) / 4.0)
            + ((age_years as f64 - 20.0) / age_divisor),
    )
}

/// Perrault formula: H - 100 + (age / 10) × 0.9, not rounded
pub fn perrault(height: impl Into<Height>, age_years: u32) -> f64 {
    height.into().as_cm() - 100.0 + (age_years as f64 / 10.0) * 0.9
}

/// Brocca formula: H - 100, not rounded
pub fn brocca(height: impl Into<Height>) -> f64 {
    height.into().as_cm() - 100.0
}

// ============================================================================
// Input Data
// ============================================================================

/// Attribute keys an ideal weight attribute map must hold, no more, no less
pub const IDEAL_WEIGHT_ATTRIBUTES: &[&str] = &["sex", "height", "age"];

/// Everything an ideal weight formula may need
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealWeightProfile {
    sex: BiologicalSex,
    height: Height,
    age_years: u32,
}

impl IdealWeightProfile {
    /// Create a profile; height and age must be strictly positive
    pub fn new(
        sex: BiologicalSex,
        height: impl Into<Height>,
        age_years: u32,
    ) -> CalcResult<Self> {
        let height = height.into();
        validate_positive("height", height.value)?;
        validate_age_years(age_years)?;

        Ok(Self {
            sex,
            height,
            age_years,
        })
    }

    /// Build a profile from a raw attribute map
    ///
    /// The key set must be exactly [`IDEAL_WEIGHT_ATTRIBUTES`]; values are
    /// validated before anything is built.
    pub fn from_attributes(attributes: &Map<String, Value>) -> CalcResult<Self> {
        let expected: BTreeSet<&str> = IDEAL_WEIGHT_ATTRIBUTES.iter().copied().collect();
        let received: BTreeSet<&str> = attributes.keys().map(String::as_str).collect();

        if received != expected {
            return Err(CalcError::invalid(
                "attributes",
                format!(
                    "expected keys {:?}, received keys {:?}",
                    expected, received
                ),
            ));
        }

        let sex = &attributes["sex"];
        let height = &attributes["height"];
        let age = &attributes["age"];
        validate_person_data(Some(sex), None, Some(height), Some(age))?;

        Self::new(
            validate_sex(sex)?,
            Height::infer(validate_positive_number("height", height)?),
            validate_age(age)?,
        )
    }

    pub fn sex(&self) -> BiologicalSex {
        self.sex
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }
}

// A person is validated on construction, so its profile needs no re-check
impl From<&Person> for IdealWeightProfile {
    fn from(person: &Person) -> Self {
        Self {
            sex: person.sex(),
            height: person.height(),
            age_years: person.age_years(),
        }
    }
}

/// The attributes projected for one formula
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IdealWeightData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<BiologicalSex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Height>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
}

impl IdealWeightData {
    fn sex(&self) -> CalcResult<BiologicalSex> {
        self.sex
            .ok_or_else(|| CalcError::NotFound("attribute 'sex'".to_string()))
    }

    fn height(&self) -> CalcResult<Height> {
        self.height
            .ok_or_else(|| CalcError::NotFound("attribute 'height'".to_string()))
    }

    fn age_years(&self) -> CalcResult<u32> {
        self.age_years
            .ok_or_else(|| CalcError::NotFound("attribute 'age'".to_string()))
    }

    /// Names of the attributes present
    pub fn attributes(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(3);
        if self.sex.is_some() {
            names.push("sex");
        }
        if self.height.is_some() {
            names.push("height");
        }
        if self.age_years.is_some() {
            names.push("age");
        }
        names
    }
}

/// Project the attributes the chosen formula needs
pub fn data_for_ideal_weight(
    profile: &IdealWeightProfile,
    formula: IdealWeightFormula,
) -> IdealWeightData {
    match formula {
        IdealWeightFormula::Lorentz => IdealWeightData {
            sex: Some(profile.sex),
            height: Some(profile.height),
            age_years: Some(profile.age_years),
        },
        IdealWeightFormula::Perrault => IdealWeightData {
            height: Some(profile.height),
            age_years: Some(profile.age_years),
            ..Default::default()
        },
        IdealWeightFormula::Brocca => IdealWeightData {
            height: Some(profile.height),
            ..Default::default()
        },
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// An ideal weight formula applied to its projected attributes
pub type IdealWeightFn = fn(&IdealWeightData) -> CalcResult<f64>;

fn lorentz_for(data: &IdealWeightData) -> CalcResult<f64> {
    Ok(lorentz(data.sex()?, data.height()?, data.age_years()?))
}

fn perrault_for(data: &IdealWeightData) -> CalcResult<f64> {
    Ok(perrault(data.height()?, data.age_years()?))
}

fn brocca_for(data: &IdealWeightData) -> CalcResult<f64> {
    Ok(brocca(data.height()?))
}

/// Resolve an ideal weight formula identifier to its implementation
pub fn resolve_ideal_weight_formula(formula: IdealWeightFormula) -> IdealWeightFn {
    match formula {
        IdealWeightFormula::Lorentz => lorentz_for,
        IdealWeightFormula::Perrault => perrault_for,
        IdealWeightFormula::Brocca => brocca_for,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_lorentz() {
        assert_eq!(lorentz(BiologicalSex::Male, 170.0, 22), 65.5);
        assert_eq!(lorentz(BiologicalSex::Male, 1.70, 22), 65.5);
        assert_eq!(lorentz(BiologicalSex::Female, 170.0, 22), 65.06);
    }

    #[test]
    fn test_perrault() {
        assert!((perrault(170.0, 22) - 71.98).abs() < 1e-9);
        assert!((perrault(1.70, 22) - 71.98).abs() < 1e-9);
    }

    #[test]
    fn test_brocca() {
        assert_eq!(brocca(170.0), 70.0);
        assert_eq!(brocca(1.70), 70.0);
        assert_eq!(brocca(Height::cm(180.0)), 80.0);
    }

    #[rstest]
    #[case("lorentz", IdealWeightFormula::Lorentz)]
    #[case("PERRAULT", IdealWeightFormula::Perrault)]
    #[case("brocca", IdealWeightFormula::Brocca)]
    #[case("Broccoli", IdealWeightFormula::Brocca)]
    fn test_formula_parsing(#[case] text: &str, #[case] expected: IdealWeightFormula) {
        assert_eq!(text.parse::<IdealWeightFormula>(), Ok(expected));
    }

    #[test]
    fn test_unknown_formula() {
        assert!("devine".parse::<IdealWeightFormula>().is_err());
        assert_eq!(IdealWeightFormula::default(), IdealWeightFormula::Lorentz);
    }

    #[test]
    fn test_projection_matches_required_attributes() {
        let profile =
            IdealWeightProfile::new(BiologicalSex::Female, Height::cm(165.0), 30).unwrap();

        for formula in IdealWeightFormula::ALL {
            let data = data_for_ideal_weight(&profile, formula);
            assert_eq!(data.attributes(), formula.required_attributes());
        }
    }

    #[test]
    fn test_dispatch() {
        let profile = IdealWeightProfile::new(BiologicalSex::Male, 170.0, 22).unwrap();

        let compute = |formula| {
            resolve_ideal_weight_formula(formula)(&data_for_ideal_weight(&profile, formula))
        };
        assert_eq!(compute(IdealWeightFormula::Lorentz), Ok(65.5));
        assert_eq!(compute(IdealWeightFormula::Brocca), Ok(70.0));
        assert!((compute(IdealWeightFormula::Perrault).unwrap() - 71.98).abs() < 1e-9);
    }

    #[test]
    fn test_dispatch_reports_missing_attribute() {
        let data = IdealWeightData {
            height: Some(Height::cm(170.0)),
            ..Default::default()
        };
        let err = resolve_ideal_weight_formula(IdealWeightFormula::Lorentz)(&data).unwrap_err();
        assert_eq!(err, CalcError::NotFound("attribute 'sex'".to_string()));
    }

    #[test]
    fn test_profile_from_attributes() {
        let profile = IdealWeightProfile::from_attributes(&attributes(
            json!({"sex": "Hombre", "height": 1.70, "age": 22}),
        ))
        .unwrap();
        assert_eq!(profile.sex(), BiologicalSex::Male);
        assert_eq!(profile.height(), Height::meters(1.70));
        assert_eq!(profile.age_years(), 22);
    }

    #[rstest]
    #[case(Height::cm(-50.0), 22, "height")]
    #[case(Height::cm(f64::NAN), 22, "height")]
    #[case(Height::meters(0.0), 22, "height")]
    #[case(Height::cm(170.0), 0, "age")]
    fn test_profile_rejects_invalid_measurements(
        #[case] height: Height,
        #[case] age_years: u32,
        #[case] field: &str,
    ) {
        let err = IdealWeightProfile::new(BiologicalSex::Male, height, age_years).unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    #[rstest]
    #[case(json!({"sex": "hombre", "height": 1.70, "age": 22, "extra": 1}))]
    #[case(json!({"sex": "hombre", "height": 1.70}))]
    #[case(json!({"genero": "hombre", "height": 1.70, "age": 22}))]
    #[case(json!({}))]
    fn test_profile_rejects_key_mismatch(#[case] value: Value) {
        let err = IdealWeightProfile::from_attributes(&attributes(value)).unwrap_err();
        assert_eq!(err.field(), Some("attributes"));
    }

    #[rstest]
    #[case(json!({"sex": "otro", "height": 1.70, "age": 22}), "sex")]
    #[case(json!({"sex": "mujer", "height": true, "age": 22}), "height")]
    #[case(json!({"sex": "mujer", "height": 1.70, "age": -3}), "age")]
    #[case(json!({"sex": "mujer", "height": 1.70, "age": 22.5}), "age")]
    fn test_profile_rejects_bad_values(#[case] value: Value, #[case] field: &str) {
        let err = IdealWeightProfile::from_attributes(&attributes(value)).unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Brocca gives the same result in meters and centimeters
        #[test]
        fn prop_brocca_unit_invariant(cm in 100u32..250) {
            let cm = cm as f64;
            let difference = brocca(Height::meters(cm / 100.0)) - brocca(Height::cm(cm));
            prop_assert!(difference.abs() < 1e-9);
        }

        /// Property: Perrault grows with age at a fixed height
        #[test]
        fn prop_perrault_increases_with_age(height in 150.0f64..200.0, age in 18u32..80) {
            prop_assert!(perrault(height, age + 1) > perrault(height, age));
        }
    }
}
