//! Nutritional assessment session
//!
//! A named entry point over the library for one person: BMI with its
//! diagnosis, and daily energy expenditure by formula.

use crate::calculator::{Calculator, CalorieCalculator};
use crate::calories::CalorieFormula;
use crate::errors::CalcResult;
use crate::health_metrics::{body_mass_index, classify_bmi, BmiDiagnosis};
use crate::person::{BiologicalSex, Person};
use crate::units::Height;
use crate::validation::validate_name;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionalAssessment {
    name: String,
}

impl NutritionalAssessment {
    pub fn new(name: impl Into<String>) -> CalcResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// BMI for the given measurements, logged for the session
    pub fn body_mass_index(&self, weight_kg: f64, height: impl Into<Height>) -> CalcResult<f64> {
        let bmi = body_mass_index(weight_kg, height)?;
        info!(name = %self.name, bmi, "Body mass index calculated");
        Ok(bmi)
    }

    pub fn diagnose(&self, weight_kg: f64, height: impl Into<Height>) -> CalcResult<BmiDiagnosis> {
        let diagnosis = classify_bmi(self.body_mass_index(weight_kg, height)?);
        info!(name = %self.name, diagnosis = diagnosis.label(), "BMI diagnosed");
        Ok(diagnosis)
    }

    /// Daily calories for the session's person under the chosen formula
    pub fn energy_expenditure(
        &self,
        sex: BiologicalSex,
        weight_kg: f64,
        height: impl Into<Height>,
        age_years: u32,
        formula: CalorieFormula,
    ) -> CalcResult<String> {
        let person = Person::new(self.name.clone(), sex, weight_kg, height, age_years)?;
        CalorieCalculator::new(person, formula, true).compute()
    }
}
