//! Nutrition report for the configured profile

use crate::config::AppConfig;
use anyhow::{Context, Result};
use nutrition_calc_core::{
    healthy_weight_range, healthy_weight_range_kg, krumdieck_calories, BmiDiagnosis, Calculator,
    CalorieCalculator, CalorieFormula, IdealWeightCalculator, IdealWeightFormula,
    NutritionalAssessment,
};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct BmiSection {
    pub value: f64,
    pub diagnosis: BmiDiagnosis,
    pub label: String,
    pub message: String,
    pub healthy_weight_range_kg: (f64, f64),
    pub healthy_weight_range: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieEntry {
    pub formula: CalorieFormula,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdealWeightEntry {
    pub formula: IdealWeightFormula,
    pub weight_kg: f64,
}

/// Every metric the library computes for one profile
#[derive(Debug, Clone, Serialize)]
pub struct NutritionReport {
    pub name: String,
    pub bmi: BmiSection,
    pub selected_calories: CalorieEntry,
    pub calories: Vec<CalorieEntry>,
    pub krumdieck_kcal: f64,
    pub selected_ideal_weight: IdealWeightEntry,
    pub ideal_weights: Vec<IdealWeightEntry>,
}

impl NutritionReport {
    pub fn build(config: &AppConfig) -> Result<Self> {
        let person = config.profile.person()?;
        let calorie_formula = config.calculation.calorie_formula()?;
        let ideal_weight_formula = config.calculation.ideal_weight_formula()?;
        let thermic_effect = config.calculation.thermic_effect;

        let session = NutritionalAssessment::new(person.name())
            .context("Invalid profile.name")?;
        let bmi = session.body_mass_index(person.weight_kg(), person.height())?;
        let diagnosis = session.diagnose(person.weight_kg(), person.height())?;

        let calorie_entry = |formula: CalorieFormula| -> Result<CalorieEntry> {
            let message =
                CalorieCalculator::new(person.clone(), formula, thermic_effect).compute()?;
            Ok(CalorieEntry { formula, message })
        };
        let ideal_weight_entry = |formula: IdealWeightFormula| -> Result<IdealWeightEntry> {
            let weight_kg = IdealWeightCalculator::new(person.clone(), formula).compute()?;
            Ok(IdealWeightEntry { formula, weight_kg })
        };

        let calories = CalorieFormula::ALL
            .into_iter()
            .map(&calorie_entry)
            .collect::<Result<Vec<_>>>()?;
        let ideal_weights = IdealWeightFormula::ALL
            .into_iter()
            .map(&ideal_weight_entry)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            calorie_formula = %calorie_formula,
            ideal_weight_formula = %ideal_weight_formula,
            "Report built"
        );

        Ok(Self {
            name: person.name().to_string(),
            bmi: BmiSection {
                value: bmi,
                diagnosis,
                label: diagnosis.label().to_string(),
                message: diagnosis.message().to_string(),
                healthy_weight_range_kg: healthy_weight_range_kg(person.height()),
                healthy_weight_range: healthy_weight_range(person.height()),
            },
            selected_calories: calorie_entry(calorie_formula)?,
            calories,
            krumdieck_kcal: krumdieck_calories(person.weight_kg(), person.height()),
            selected_ideal_weight: ideal_weight_entry(ideal_weight_formula)?,
            ideal_weights,
        })
    }

    /// Human-readable rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = writeln!(out, "Hola {} este es tu imc: {}", self.name, self.bmi.value);
        let _ = writeln!(out, "{} ({})", self.bmi.message, self.bmi.label);
        let _ = writeln!(out, "{}", self.bmi.healthy_weight_range);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.selected_calories.message);
        for entry in &self.calories {
            let _ = writeln!(out, "  [{}] {}", entry.formula.display_name(), entry.message);
        }
        let _ = writeln!(out, "  [Krumdieck, raw] {}", self.krumdieck_kcal);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Peso ideal ({}): {}kg",
            self.selected_ideal_weight.formula, self.selected_ideal_weight.weight_kg
        );
        for entry in &self.ideal_weights {
            let _ = writeln!(out, "  [{}] {}kg", entry.formula, entry.weight_kg);
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}
