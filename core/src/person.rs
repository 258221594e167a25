//! The person whose metrics are calculated

use crate::errors::{CalcError, CalcResult};
use crate::units::Height;
use crate::validation::{
    validate_age, validate_age_years, validate_name, validate_positive, validate_positive_number,
    validate_sex, VALID_BIOLOGICAL_SEX,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiologicalSex {
    #[serde(rename = "hombre")]
    Male,
    #[serde(rename = "mujer")]
    Female,
}

impl BiologicalSex {
    /// Canonical lower-case text
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "hombre",
            BiologicalSex::Female => "mujer",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hombre" => Ok(BiologicalSex::Male),
            "mujer" => Ok(BiologicalSex::Female),
            _ => Err(CalcError::invalid(
                "sex",
                format!("must be one of: {}", VALID_BIOLOGICAL_SEX.join(", ")),
            )),
        }
    }
}

/// Attribute keys accepted by [`Person::from_attributes`]
pub const PERSON_ATTRIBUTES: &[&str] = &["name", "sex", "weight", "height", "age"];

/// A validated person record
///
/// Fields are private: a `Person` can only be obtained through validation
/// and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    name: String,
    sex: BiologicalSex,
    weight_kg: f64,
    height: Height,
    age_years: u32,
}

impl Person {
    /// Create a person, validating every attribute
    pub fn new(
        name: impl Into<String>,
        sex: BiologicalSex,
        weight_kg: f64,
        height: impl Into<Height>,
        age_years: u32,
    ) -> CalcResult<Self> {
        let name = name.into();
        let height = height.into();

        validate_name(&name)?;
        validate_positive("weight", weight_kg)?;
        validate_positive("height", height.value)?;
        validate_age_years(age_years)?;

        Ok(Self {
            name,
            sex,
            weight_kg,
            height,
            age_years,
        })
    }

    /// Create a person from a dynamic attribute map
    ///
    /// The map must hold exactly the keys in [`PERSON_ATTRIBUTES`]. Heights
    /// are bare numbers and go through the meters/centimeters heuristic.
    pub fn from_attributes(attributes: &Map<String, Value>) -> CalcResult<Self> {
        if let Some(unknown) = attributes
            .keys()
            .find(|key| !PERSON_ATTRIBUTES.contains(&key.as_str()))
        {
            return Err(CalcError::invalid(
                "attributes",
                format!(
                    "unexpected key '{}', expected: {}",
                    unknown,
                    PERSON_ATTRIBUTES.join(", ")
                ),
            ));
        }

        let get = |key: &str| {
            attributes.get(key).ok_or_else(|| {
                CalcError::invalid("attributes", format!("missing key '{}'", key))
            })
        };

        let name = match get("name")? {
            Value::String(name) => name.clone(),
            _ => return Err(CalcError::invalid("name", "must be text")),
        };
        let sex = validate_sex(get("sex")?)?;
        let weight_kg = validate_positive_number("weight", get("weight")?)?;
        let height = validate_positive_number("height", get("height")?)?;
        let age_years = validate_age(get("age")?)?;

        Self::new(name, sex, weight_kg, Height::infer(height), age_years)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> BiologicalSex {
        self.sex
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }
}

impl TryFrom<&Value> for Person {
    type Error = CalcError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(attributes) => Person::from_attributes(attributes),
            _ => Err(CalcError::invalid("attributes", "must be an object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn kevin() -> Value {
        json!({
            "name": "kevin asael",
            "sex": "hombre",
            "weight": 75,
            "height": 170,
            "age": 22
        })
    }

    #[test]
    fn test_new_valid_person() {
        let person = Person::new("kevin asael", BiologicalSex::Male, 75.0, 170.0, 22).unwrap();
        assert_eq!(person.name(), "kevin asael");
        assert_eq!(person.sex(), BiologicalSex::Male);
        assert_eq!(person.weight_kg(), 75.0);
        assert_eq!(person.height(), Height::cm(170.0));
        assert_eq!(person.age_years(), 22);
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        let err = Person::new("kevi", BiologicalSex::Male, 75.0, 170.0, 22).unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let err = Person::new("kevin", BiologicalSex::Male, -5.0, 170.0, 22).unwrap_err();
        assert_eq!(err.field(), Some("weight"));

        let err = Person::new("kevin", BiologicalSex::Male, 75.0, 0.0, 22).unwrap_err();
        assert_eq!(err.field(), Some("height"));

        let err = Person::new("kevin", BiologicalSex::Male, 75.0, 170.0, 0).unwrap_err();
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_sex_is_case_insensitive_and_canonical() {
        assert_eq!("MUJER".parse::<BiologicalSex>(), Ok(BiologicalSex::Female));
        assert_eq!(BiologicalSex::Female.to_string(), "mujer");
        assert_eq!(serde_json::to_value(BiologicalSex::Male).unwrap(), json!("hombre"));
    }

    #[test]
    fn test_from_attributes() {
        let person = Person::try_from(&kevin()).unwrap();
        assert_eq!(person.height(), Height::cm(170.0));

        let mut attributes = kevin();
        attributes["sex"] = json!("Hombre");
        attributes["height"] = json!(1.70);
        let person = Person::try_from(&attributes).unwrap();
        assert_eq!(person.sex(), BiologicalSex::Male);
        assert_eq!(person.height(), Height::meters(1.70));
    }

    #[test]
    fn test_from_attributes_rejects_booleans() {
        let mut attributes = kevin();
        attributes["weight"] = json!(true);
        let err = Person::try_from(&attributes).unwrap_err();
        assert_eq!(err.field(), Some("weight"));
    }

    #[test]
    fn test_from_attributes_rejects_key_mismatch() {
        let mut attributes = kevin();
        attributes["extra"] = json!(1);
        let err = Person::try_from(&attributes).unwrap_err();
        assert_eq!(err.field(), Some("attributes"));

        let mut attributes = kevin();
        attributes.as_object_mut().unwrap().remove("age");
        let err = Person::try_from(&attributes).unwrap_err();
        assert_eq!(err.field(), Some("attributes"));

        assert!(Person::try_from(&json!("kevin")).is_err());
    }

    #[test]
    fn test_from_attributes_rejects_non_text_name() {
        let mut attributes = kevin();
        attributes["name"] = json!(12345);
        let err = Person::try_from(&attributes).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: any strictly positive measurement set builds a person
        #[test]
        fn prop_valid_measurements_accepted(
            weight in 1.0f64..300.0,
            height in 50.0f64..250.0,
            age in 1u32..120
        ) {
            prop_assert!(Person::new("kevin", BiologicalSex::Female, weight, height, age).is_ok());
        }
    }
}
