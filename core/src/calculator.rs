//! Calculators
//!
//! A calculator owns its input and its formula choice, both validated at
//! construction. [`Calculator::compute`] then runs the same three steps for
//! every variant: extract the data the formula family needs, resolve the
//! formula, apply it.

use crate::calories::{resolve_calorie_formula, CalorieFn, CalorieFormula};
use crate::errors::{CalcError, CalcResult};
use crate::ideal_weight::{
    data_for_ideal_weight, resolve_ideal_weight_formula, IdealWeightData, IdealWeightFn,
    IdealWeightFormula, IdealWeightProfile,
};
use crate::person::Person;
use crate::validation::{parse_formula, validate_formula};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Capability shared by every calculator
pub trait Calculator {
    /// Person attributes handed to the formula
    type Data;
    /// Resolved formula implementation
    type Formula;
    /// Calculation result
    type Output;

    fn extract_data(&self) -> Self::Data;

    fn resolve_formula(&self) -> Self::Formula;

    fn compute(&self) -> CalcResult<Self::Output>;
}

// ============================================================================
// Calorie Calculator
// ============================================================================

/// Daily caloric need of a person under one formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieCalculator {
    person: Person,
    formula: CalorieFormula,
    use_thermic_effect: bool,
}

impl CalorieCalculator {
    pub fn new(person: Person, formula: CalorieFormula, use_thermic_effect: bool) -> Self {
        Self {
            person,
            formula,
            use_thermic_effect,
        }
    }

    /// Build from raw options, validating the flag and the formula identifier
    pub fn from_raw(
        person: Person,
        formula: &Value,
        use_thermic_effect: &Value,
    ) -> CalcResult<Self> {
        let (formula, use_thermic_effect) = validate_formula(formula, use_thermic_effect)?;
        Ok(Self::new(person, formula, use_thermic_effect))
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn formula(&self) -> CalorieFormula {
        self.formula
    }

    pub fn uses_thermic_effect(&self) -> bool {
        self.use_thermic_effect
    }
}

impl From<Person> for CalorieCalculator {
    /// Mifflin-St Jeor with the thermic effect of food
    fn from(person: Person) -> Self {
        Self::new(person, CalorieFormula::default(), true)
    }
}

impl Calculator for CalorieCalculator {
    type Data = Person;
    type Formula = CalorieFn;
    type Output = String;

    fn extract_data(&self) -> Person {
        self.person.clone()
    }

    fn resolve_formula(&self) -> CalorieFn {
        resolve_calorie_formula(self.formula)
    }

    fn compute(&self) -> CalcResult<String> {
        let person = self.extract_data();
        let formula = self.resolve_formula();
        debug!(
            formula = %self.formula,
            thermic_effect = self.use_thermic_effect,
            "Computing daily calories"
        );
        Ok(formula(&person, self.use_thermic_effect))
    }
}

// ============================================================================
// Ideal Weight Calculator
// ============================================================================

/// Where an ideal weight calculation takes its attributes from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdealWeightSource {
    Person(Person),
    Attributes(IdealWeightProfile),
}

impl IdealWeightSource {
    /// Build from a raw value: an attribute map with exactly `sex`, `height`
    /// and `age`
    pub fn from_raw(value: &Value) -> CalcResult<Self> {
        match value {
            Value::Object(attributes) => {
                IdealWeightProfile::from_attributes(attributes).map(IdealWeightSource::Attributes)
            }
            _ => Err(CalcError::invalid("attributes", "must be an object")),
        }
    }

    pub fn profile(&self) -> IdealWeightProfile {
        match self {
            IdealWeightSource::Person(person) => IdealWeightProfile::from(person),
            IdealWeightSource::Attributes(profile) => *profile,
        }
    }
}

impl From<Person> for IdealWeightSource {
    fn from(person: Person) -> Self {
        IdealWeightSource::Person(person)
    }
}

impl From<IdealWeightProfile> for IdealWeightSource {
    fn from(profile: IdealWeightProfile) -> Self {
        IdealWeightSource::Attributes(profile)
    }
}

/// Ideal weight of a person under one formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealWeightCalculator {
    source: IdealWeightSource,
    formula: IdealWeightFormula,
}

impl IdealWeightCalculator {
    pub fn new(source: impl Into<IdealWeightSource>, formula: IdealWeightFormula) -> Self {
        Self {
            source: source.into(),
            formula,
        }
    }

    /// Build from a raw attribute map and a raw formula identifier
    pub fn from_raw(attributes: &Value, formula: &Value) -> CalcResult<Self> {
        let source = IdealWeightSource::from_raw(attributes)?;
        let formula = parse_formula(formula)?;
        Ok(Self::new(source, formula))
    }

    pub fn source(&self) -> &IdealWeightSource {
        &self.source
    }

    pub fn formula(&self) -> IdealWeightFormula {
        self.formula
    }
}

impl Calculator for IdealWeightCalculator {
    type Data = IdealWeightData;
    type Formula = IdealWeightFn;
    type Output = f64;

    fn extract_data(&self) -> IdealWeightData {
        data_for_ideal_weight(&self.source.profile(), self.formula)
    }

    fn resolve_formula(&self) -> IdealWeightFn {
        resolve_ideal_weight_formula(self.formula)
    }

    fn compute(&self) -> CalcResult<f64> {
        let data = self.extract_data();
        let formula = self.resolve_formula();
        debug!(
            formula = %self.formula,
            attributes = ?data.attributes(),
            "Computing ideal weight"
        );
        formula(&data)
    }
}
