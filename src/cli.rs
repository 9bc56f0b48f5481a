use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Settings;
use commands::{list_categories, predict, serve};

#[derive(Parser)]
#[command(name = "crimecast")]
#[command(about = "Hourly crime likelihood estimates from historical incident data")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    ///
    /// When omitted, `crimecast.toml` in the working directory is used if present.
    #[arg(short, long, global = true, env = "CRIMECAST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// CSV file with the historical incidents
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:5000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Directory of per-category location files for `/api/v1/locations`
        #[arg(short, long)]
        locations: Option<PathBuf>,
    },
    /// Print the hourly profile for one month, day and category
    Predict {
        /// Month of the year (1-12)
        #[arg(short, long, allow_negative_numbers = true)]
        month: i32,

        /// Day of the month (1-31)
        #[arg(long, allow_negative_numbers = true)]
        day: i32,

        /// Crime category, matched case-sensitively
        #[arg(short = 'k', long)]
        category: String,

        /// CSV file with the historical incidents
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Write the rendered SVG chart to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the categories present in the dataset
    Categories {
        /// CSV file with the historical incidents
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref())?;
        match self.command {
            Commands::Serve { dataset, bind_address, locations } => {
                let settings = settings
                    .with_overrides(dataset, bind_address)
                    .with_locations_dir(locations);
                serve(settings).await?;
            }
            Commands::Predict { month, day, category, dataset, output } => {
                let settings = settings.with_overrides(dataset, None);
                predict(&settings, month, day, category, output.as_deref())?;
            }
            Commands::Categories { dataset } => {
                list_categories(&settings.with_overrides(dataset, None))?;
            }
        }
        Ok(())
    }
}
