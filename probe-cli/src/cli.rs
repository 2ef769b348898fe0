use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use tracing::info;
use weather_probe_core::{
    Config, FeasibilityProbe, HistoricalWeatherProvider, ProbeError, ProbeTarget, ProviderId,
    Skeleton, provider::provider_from_config,
};

/// Top-level CLI struct. Without a subcommand a feasibility run is started.
#[derive(Debug, Parser)]
#[command(
    name = "weather-probe",
    version,
    about = "Checks whether historical weather data can be retrieved"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query the provider for every configured location and report summaries.
    Probe {
        /// Provider short name, overrides the configured default.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Create the project skeleton.
    Scaffold {
        /// Project root; defaults to the current directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Verify that the project skeleton exists.
    Verify {
        /// Project root; defaults to the current directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "meteostat" or "synthetic".
        provider: String,
    },
}

impl Cli {
    /// Returns `Ok(false)` when the command ran but its check failed.
    pub async fn run(self) -> anyhow::Result<bool> {
        match self.command.unwrap_or(Command::Probe { provider: None }) {
            Command::Probe { provider } => probe(provider).await,
            Command::Scaffold { root } => scaffold(&root),
            Command::Verify { root } => Ok(verify(&root)),
            Command::Configure { provider } => configure(&provider),
        }
    }
}

async fn probe(provider: Option<String>) -> anyhow::Result<bool> {
    let config = Config::load()?.with_env_overrides();
    let id = match provider {
        Some(name) => ProviderId::try_from(name.as_str())?,
        None => config.default_provider_id()?,
    };

    let provider =
        provider_from_config(id, &config).map_err(|err| ProbeError::provider_unavailable(&err))?;
    info!("Using provider: {id}");

    Ok(run_probe(provider, &config.targets()).await)
}

/// Feasibility run over `targets`; `true` only if every location succeeded.
async fn run_probe(provider: Box<dyn HistoricalWeatherProvider>, targets: &[ProbeTarget]) -> bool {
    FeasibilityProbe::new(provider).run(targets).await.all_succeeded()
}

fn scaffold(root: &std::path::Path) -> anyhow::Result<bool> {
    let report = Skeleton::makarasham().create(root)?;
    info!(
        "Scaffold finished in {}: {} created, {} already present",
        root.display(),
        report.created.len(),
        report.existing.len()
    );
    Ok(true)
}

fn verify(root: &std::path::Path) -> bool {
    info!("Verifying repository structure in {}", root.display());
    let report = Skeleton::makarasham().verify(root);

    if report.is_complete() {
        info!("Repository structure is correct.");
    } else {
        info!(
            "Repository structure is incomplete: {} directories and {} files missing.",
            report.missing_directories.len(),
            report.missing_files.len()
        );
    }
    report.is_complete()
}

fn configure(provider: &str) -> anyhow::Result<bool> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if id.needs_api_key() {
        let api_key = Password::new(&format!("API key for {id}:"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        config.upsert_provider_api_key(id, api_key.trim().to_string());
    }

    let make_default = Confirm::new(&format!("Use {id} as the default provider?"))
        .with_default(true)
        .prompt()
        .context("Failed to read answer")?;
    if make_default {
        config.set_default_provider(id);
    }

    config.save()?;
    info!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(true)
}
