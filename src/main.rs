use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use event_explorer::app::screens;
use event_explorer::infrastructure::display_path;
use event_explorer::observability::init_tracing;
use event_explorer::ui::{render_detail, render_list, render_notice, ToggleNotice};
use event_explorer::{initialize, Config};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "event-explorer")]
#[command(about = "Browse, search and favorite events", version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override a configuration value, e.g. --set match_mode=fuzzy
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered by a search query
    List {
        /// Matched against title, category and location
        query: Option<String>,
    },
    /// Show one event's details
    Show { id: String },
    /// Add an event to favorites, or remove it if already there
    Favorite { id: String },
    /// List favorite events
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config);
    tracing::debug!(data_dir = %display_path(&config.data_dir()), "configuration loaded");

    let explorer = initialize(&config)
        .await
        .context("failed to start event explorer")?;
    let ansi = std::io::stdout().is_terminal();

    match cli.command {
        Commands::List { query } => {
            let view = screens::event_list(&explorer, query.as_deref().unwrap_or("")).await;
            print!("{}", render_list(&view, ansi));
        }
        Commands::Show { id } => {
            let detail = screens::event_details(&explorer, &id).await?;
            print!("{}", render_detail(&detail));
        }
        Commands::Favorite { id } => {
            let title = explorer.event(&id)?.title.clone();
            match explorer.toggle_favorite(&id).await {
                Ok(is_favorite) => print!("{}", render_notice(&ToggleNotice::applied(&title, is_favorite))),
                Err(e) => {
                    eprint!("{}", render_notice(&ToggleNotice::failed()));
                    return Err(e).context(format!("could not toggle favorite {id}"));
                }
            }
        }
        Commands::Favorites => {
            let view = screens::favorites(&explorer).await;
            print!("{}", render_list(&view, ansi));
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let overrides: BTreeMap<String, String> = cli.overrides.iter().cloned().collect();
    Ok(base.with_overrides(&overrides))
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    Ok((key.trim().to_string(), value.to_string()))
}
