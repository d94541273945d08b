//! AQI dashboard - serve the prediction dashboard or evaluate readings from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use aqi_dashboard::models::AQI_CATEGORY_LABELS;
use aqi_dashboard::{
    AdvisoryEngine, AqiCategory, DashboardConfig, MeasurementInput, ModelArtifact, logging, web,
};

#[derive(Parser)]
#[command(
    name = "aqi-dashboard",
    version,
    about = "Air quality index prediction dashboard"
)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard web server
    Serve {
        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
        /// Model artifact, overriding the configuration
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Predict the AQI for one set of readings
    Predict {
        /// CO AQI value (300-1000)
        #[arg(long, default_value_t = 350.0)]
        co: f64,
        /// Ozone AQI value (0-500)
        #[arg(long, default_value_t = 50.0)]
        ozone: f64,
        /// Ozone AQI category label
        #[arg(long, default_value = "Good")]
        ozone_category: AqiCategory,
        /// NO2 AQI value (0-500)
        #[arg(long, default_value_t = 50.0)]
        no2: f64,
        /// PM2.5 AQI value (0-500)
        #[arg(long, default_value_t = 50.0)]
        pm25: f64,
        /// Model artifact, overriding the configuration
        #[arg(long)]
        model: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List ozone AQI categories and their model indices
    Categories,
}

fn load_engine(config: &DashboardConfig, model: Option<PathBuf>) -> Result<AdvisoryEngine> {
    let path = model.unwrap_or_else(|| config.model.path.clone());
    let artifact = ModelArtifact::load(&path)
        .with_context(|| format!("Failed to load model from {}", path.display()))?;
    Ok(AdvisoryEngine::new(Arc::new(artifact)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = DashboardConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port, model } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let engine = load_engine(&config, model)?;
            web::run(engine, &config.server).await
        }
        Command::Predict {
            co,
            ozone,
            ozone_category,
            no2,
            pm25,
            model,
            json,
        } => {
            let engine = load_engine(&config, model)?;
            let input = MeasurementInput {
                co_aqi: co,
                ozone_aqi: ozone,
                ozone_category,
                no2_aqi: no2,
                pm25_aqi: pm25,
            };
            let report = engine.evaluate(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.message);
                println!("Severity: {} ({})", report.label, report.color);
                println!("Scale: {:.1}%", report.progress_percentage);
                if let Some(warning) = report.suffocation_warning {
                    println!("{warning}");
                }
            }
            Ok(())
        }
        Command::Categories => {
            for (index, label) in AQI_CATEGORY_LABELS.iter().enumerate() {
                println!("{index}: {label}");
            }
            Ok(())
        }
    }
}
