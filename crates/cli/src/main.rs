//! Command line front end for the XAR ownership index.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xarindex_core::DocumentReference;
use xarindex_core::config::AppConfig;
use xarindex_repository::{CachedExtension, XarInstalledRepository};
use xarindex_store::Snapshot;

/// Ownership index of wiki pages installed by XAR extensions
#[derive(Parser, Debug)]
#[command(name = "xarindex")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "XARINDEX_CONFIG",
        default_value = "config/xarindex.toml"
    )]
    config: String,

    /// Installed-extension snapshot (overrides the configured path)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the extensions owning each document (`wiki:Space.Page[;locale]`)
    Owners {
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// List cached XAR extensions
    Extensions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = load_config(&cli.config)?;
    if let Some(snapshot) = cli.snapshot {
        config.snapshot.path = snapshot;
    }
    config.validate().context("invalid configuration")?;

    let repository = open_repository(&config).await?;

    match cli.command {
        Commands::Owners { references } => {
            for reference in references {
                let parsed: DocumentReference = reference
                    .parse()
                    .with_context(|| format!("invalid document reference {reference}"))?;
                print_owners(&parsed, &repository.lookup_owners(&parsed));
            }
        }
        Commands::Extensions => {
            let mut extensions = repository.cached_extensions();
            extensions.sort_by(|a, b| a.id().cmp(b.id()));
            for extension in extensions {
                print_extension(&extension);
            }
        }
    }

    Ok(())
}

/// Load configuration (file is optional, env vars can provide/override everything).
fn load_config(path: &str) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if Path::new(path).exists() {
        tracing::debug!(config_path = %path, "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!("No config file found at {}", path);
    }

    figment
        .merge(Env::prefixed("XARINDEX_").split("__"))
        .extract()
        .context("failed to load configuration")
}

async fn open_repository(config: &AppConfig) -> Result<XarInstalledRepository> {
    let path = &config.snapshot.path;
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_toml_str(&source)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    let (store, reader) = snapshot.build().await.context("invalid snapshot")?;

    let repository =
        XarInstalledRepository::new(Arc::new(store), Arc::new(reader), config.repository.clone());
    let report = repository
        .initialize()
        .await
        .context("failed to initialize repository")?;
    for failed in &report.failed {
        tracing::warn!(extension = %failed, "Extension skipped");
    }
    Ok(repository)
}

fn print_owners(reference: &DocumentReference, owners: &[Arc<CachedExtension>]) {
    println!("{reference}");
    if owners.is_empty() {
        println!("  (no owner)");
    }
    for owner in owners {
        println!("  {}", owner.id());
    }
}

fn print_extension(extension: &CachedExtension) {
    let namespaces = match extension.namespaces() {
        None => "<root>".to_string(),
        Some(namespaces) => namespaces
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    };
    println!(
        "{}\t{}\t{} pages",
        extension.id(),
        namespaces,
        extension.entries().len()
    );
}
