//! Configuration management for the nutrition calculator
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NC__)

use anyhow::{Context, Result};
use nutrition_calc_core::{
    BiologicalSex, CalorieFormula, Height, HeightUnit, IdealWeightFormula, Person,
};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub profile: ProfileConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The person to assess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub sex: String,
    pub weight_kg: f64,
    pub height: f64,
    /// Unit of `height`; inferred from its magnitude when absent
    #[serde(default)]
    pub height_unit: Option<String>,
    pub age_years: u32,
}

/// Formula selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    pub calorie_formula: String,
    pub ideal_weight_formula: String,
    pub thermic_effect: bool,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            calorie_formula: CalorieFormula::default().to_string(),
            ideal_weight_formula: IdealWeightFormula::default().to_string(),
            thermic_effect: true,
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: ProfileConfig {
                name: "kevin asael".to_string(),
                sex: "hombre".to_string(),
                weight_kg: 75.0,
                height: 170.0,
                height_unit: None,
                age_years: 22,
            },
            calculation: CalculationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ProfileConfig {
    pub fn height(&self) -> Result<Height> {
        Ok(match &self.height_unit {
            Some(unit) => {
                let unit = unit.parse::<HeightUnit>().context("Invalid profile.height_unit")?;
                Height::new(self.height, unit)
            }
            None => Height::infer(self.height),
        })
    }

    /// Build the validated person this profile describes
    pub fn person(&self) -> Result<Person> {
        let sex = self.sex.parse::<BiologicalSex>().context("Invalid profile.sex")?;
        let person = Person::new(
            self.name.clone(),
            sex,
            self.weight_kg,
            self.height()?,
            self.age_years,
        )
        .context("Invalid profile")?;
        Ok(person)
    }
}

impl CalculationConfig {
    pub fn calorie_formula(&self) -> Result<CalorieFormula> {
        self.calorie_formula
            .parse::<CalorieFormula>()
            .context("Invalid calculation.calorie_formula")
    }

    pub fn ideal_weight_formula(&self) -> Result<IdealWeightFormula> {
        self.ideal_weight_formula
            .parse::<IdealWeightFormula>()
            .context("Invalid calculation.ideal_weight_formula")
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NC__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (NC__ prefix)
            // e.g., NC__PROFILE__WEIGHT_KG=80 sets profile.weight_kg
            .add_source(config::Environment::with_prefix("NC").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.profile.name, "kevin asael");
        assert_eq!(config.calculation.calorie_formula, "mifflin");
        assert_eq!(config.calculation.ideal_weight_formula, "lorentz");
        assert!(config.calculation.thermic_effect);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_default_profile_builds_person() {
        let person = AppConfig::default().profile.person().unwrap();
        assert_eq!(person.sex(), BiologicalSex::Male);
        assert_eq!(person.height(), Height::cm(170.0));
    }

    #[test]
    fn test_explicit_height_unit() {
        let mut profile = AppConfig::default().profile;
        profile.height = 1.70;
        profile.height_unit = Some("m".to_string());
        assert_eq!(profile.height().unwrap(), Height::meters(1.70));

        profile.height_unit = Some("furlongs".to_string());
        assert!(profile.height().is_err());
    }

    #[test]
    fn test_invalid_profile_is_reported() {
        let mut profile = AppConfig::default().profile;
        profile.sex = "otro".to_string();
        assert!(profile.person().is_err());

        let mut profile = AppConfig::default().profile;
        profile.weight_kg = -5.0;
        let err = profile.person().unwrap_err();
        assert!(err.to_string().contains("Invalid profile"));
    }

    #[test]
    fn test_formula_selection() {
        let mut calculation = CalculationConfig::default();
        assert_eq!(calculation.calorie_formula().unwrap(), CalorieFormula::MifflinStJeor);
        calculation.calorie_formula = "FAO/OMS".to_string();
        assert_eq!(calculation.calorie_formula().unwrap(), CalorieFormula::FaoOms);
        calculation.ideal_weight_formula = "hamwi".to_string();
        assert!(calculation.ideal_weight_formula().is_err());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
