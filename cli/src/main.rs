//! Nutrition Calculator
//!
//! Prints BMI, diagnosis, daily caloric need and ideal weight for the
//! profile found in configuration.

use anyhow::Result;
use nutrition_calc_cli::{
    config::{self, OutputFormat},
    report::NutritionReport,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Nutrition Calculator"
    );

    let report = match NutritionReport::build(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Could not build report: {:#}", e);
            return Err(e);
        }
    };

    match config.output.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "nutrition_calc_cli=info,nutrition_calc_core=info".into()
        } else {
            "nutrition_calc_cli=debug,nutrition_calc_core=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
