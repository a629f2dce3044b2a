//! `sbomer-dash` -- terminal front end for the SBOMer dashboard.
//!
//! Resolves a dashboard location (for example `/events?query=status%3DNEW`),
//! loads what the page needs from the SBOMer API and prints the rendered
//! page, or its view-model as JSON.
//!
//! # Environment variables
//!
//! | Variable         | Description                                    |
//! |------------------|------------------------------------------------|
//! | `SBOMER_API_URL` | Base URL of the SBOMer service (or `API_URL`)  |
//! | `RUST_LOG`       | Log filter, overrides `-v`                     |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};

use sbomer_ui::pages::manifests::download_file_name;
use sbomer_ui::resource;
use sbomer_ui::routes::{flatten_routes, navigation};
use sbomer_ui::telemetry::{self, TelemetryOptions};
use sbomer_ui::{
    app_routes, load_dashboard_config, render_page, DashboardConfig, Location, PageController,
    SbomerClient, Theme, ThemeStore,
};

#[derive(Parser)]
#[command(name = "sbomer-dash", version)]
#[command(about = "Browse SBOMer generations, enhancements, manifests and events")]
struct Cli {
    /// Base URL of the SBOMer service.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print view-models as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Emit log records as JSON.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a dashboard location.
    Open {
        #[arg(default_value = "/")]
        location: String,
    },
    /// Save a manifest's SBOM as JSON.
    Download {
        manifest_id: String,
        /// Target file; defaults to `<manifest-id>.json`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the stored color theme.
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },
    /// List dashboard routes and navigation.
    Routes,
}

#[derive(Subcommand)]
enum ThemeCommand {
    Get,
    Set { theme: String },
    List,
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

async fn open(config: &DashboardConfig, location: &str, json: bool) -> anyhow::Result<()> {
    let client = SbomerClient::from_config(config).context("Failed to create API client")?;
    let controller = PageController::new(client, config);

    let page = controller.open(&Location::parse(location)).await;
    if json {
        print_json(&page)
    } else {
        print!("{}", render_page(&page, Utc::now()));
        Ok(())
    }
}

async fn download(
    config: &DashboardConfig,
    manifest_id: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = SbomerClient::from_config(config).context("Failed to create API client")?;
    let state = resource::manifest_json(client)
        .load(manifest_id.to_string())
        .await;
    if let Some(e) = state.error {
        return Err(e).with_context(|| format!("Failed to download manifest {}", manifest_id));
    }
    let Some(bom) = state.value else {
        bail!("Manifest {} returned no content", manifest_id);
    };

    let path = output.unwrap_or_else(|| PathBuf::from(download_file_name(manifest_id)));
    let content = serde_json::to_string_pretty(&bom).context("Failed to serialize manifest")?;
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Saved manifest {} to {}", manifest_id, path.display());
    println!("{}", path.display());
    Ok(())
}

fn theme(config: &DashboardConfig, command: Option<ThemeCommand>, json: bool) -> anyhow::Result<()> {
    let store = ThemeStore::from_config(config)?;

    match command.unwrap_or(ThemeCommand::Get) {
        ThemeCommand::Get => {
            let current = store.current()?;
            if json {
                print_json(&current)?;
            } else {
                println!("{} ({})", current, current.label());
            }
        }
        ThemeCommand::Set { theme } => {
            let theme: Theme = theme.parse()?;
            store.set(theme)?;
            println!("{} ({})", theme, theme.label());
        }
        ThemeCommand::List => {
            let current = store.current()?;
            for theme in Theme::ALL {
                let marker = if theme == current { "*" } else { " " };
                println!("{} {:<5} {}", marker, theme.as_str(), theme.label());
            }
        }
    }
    Ok(())
}

fn routes(json: bool) -> anyhow::Result<()> {
    let entries = app_routes();
    if json {
        return print_json(&navigation(&entries, "/"));
    }

    for route in flatten_routes(&entries) {
        println!(
            "{:<20} {:<14} {}",
            route.path,
            format!("{:?}", route.page),
            route.label.unwrap_or("")
        );
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_dashboard_config(cli.config.as_deref())
        .context("Failed to load dashboard configuration")?;
    if let Some(api_url) = cli.api_url {
        if api_url.trim().is_empty() {
            bail!("--api-url must not be empty");
        }
        config.api_url = api_url.trim().to_string();
    }
    tracing::debug!("Using SBOMer API at {}", config.api_url);

    match cli.command {
        Commands::Open { location } => open(&config, &location, cli.json).await,
        Commands::Download {
            manifest_id,
            output,
        } => download(&config, &manifest_id, output).await,
        Commands::Theme { command } => theme(&config, command, cli.json),
        Commands::Routes => routes(cli.json),
    }
}

/// The single line printed for a failed command, including its context chain.
fn failure_message(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(TelemetryOptions {
        json: cli.log_json,
        verbosity: cli.verbose,
    }) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
