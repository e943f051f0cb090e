use std::{
    io::{self, Write},
    path::PathBuf,
};

use album_core::{
    config::{self, Settings},
    AlbumSearch, ConfigError, Endpoints, FsVault,
};
use anyhow::{Context, Result};
use clap::clap_derive::*;
use clap::Parser;
use terminal::TerminalNotifier;
use tracing_subscriber::EnvFilter;

mod terminal;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct TopLevel {
    #[clap(long, env = "ALBUM_NOTES_CONFIG", value_parser, global = true)]
    /// Settings file to use instead of the platform default
    config: Option<PathBuf>,

    #[clap(long, env = "ALBUM_NOTES_VAULT", value_parser, default_value = ".", global = true)]
    /// Root directory of the notes vault
    vault: PathBuf,

    #[clap(long, env = "EDITOR", value_parser, global = true)]
    /// Command used to open notes; the path is printed when unset
    editor: Option<String>,

    #[clap(long, env = "ALBUM_NOTES_TOKEN_URL", value_parser, hide = true)]
    token_url: Option<String>,

    #[clap(long, env = "ALBUM_NOTES_API_BASE", value_parser, hide = true)]
    api_base: Option<String>,

    #[clap(subcommand)]
    command: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Search Spotify for an album and create a note for it
    Search {
        #[clap(value_parser)]
        /// Album search query
        query: String,

        #[clap(short, long, value_parser)]
        /// 1-based result to use without prompting
        pick: Option<usize>,
    },

    /// Show or change settings
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current settings as JSON
    Show,
    /// Print the settings file location
    Path,
    /// Change a single setting
    Set {
        #[clap(value_parser)]
        /// One of folder, fileNameFormat, templateFile, spotifyClientId, spotifyClientSecret
        key: String,
        #[clap(value_parser)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = TopLevel::parse();
    let settings_path = match args.config.clone() {
        Some(path) => path,
        None => config::default_path()?,
    };

    match &args.command {
        Subcommands::Search { query, pick } => {
            let settings = Settings::load(&settings_path)?;
            search(&args, settings, query, *pick).await
        }
        Subcommands::Config { action } => match action {
            ConfigAction::Show => {
                let settings = Settings::load(&settings_path)?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", settings_path.display());
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                let mut settings = Settings::load(&settings_path)?;
                settings.set(key, value.clone())?;
                settings
                    .save(&settings_path)
                    .with_context(|| format!("saving {}", settings_path.display()))?;
                Ok(())
            }
        },
    }
}

async fn search(args: &TopLevel, settings: Settings, query: &str, pick: Option<usize>) -> Result<()> {
    let mut endpoints = Endpoints::default();
    if let Some(token_url) = &args.token_url {
        endpoints.token_url = token_url.clone();
    }
    if let Some(api_base) = &args.api_base {
        endpoints.api_base = api_base.clone();
    }

    let vault = FsVault::new(&args.vault).with_editor(args.editor.clone());
    let mut command = match AlbumSearch::open(settings, &endpoints, vault, TerminalNotifier) {
        Ok(command) => command,
        // already shown to the user
        Err(ConfigError::MissingCredentials) => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    let albums = command.suggestions(query).await;
    if albums.is_empty() {
        eprintln!("no albums found");
        return Ok(());
    }

    let choice = match pick {
        Some(n) if (1..=albums.len()).contains(&n) => Some(n - 1),
        Some(n) => anyhow::bail!("--pick {} is out of range, {} results", n, albums.len()),
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            terminal::print_suggestions(&albums, &mut out)?;
            out.flush()?;
            terminal::read_choice(albums.len(), &mut io::stdin().lock(), &mut out)?
        }
    };

    if let Some(index) = choice {
        // failures are already reported as notices
        match command.choose(&albums[index]) {
            Ok(outcome) => tracing::debug!(path = outcome.path(), ?outcome, "note ready"),
            Err(err) => tracing::debug!(error = %err, "note not written"),
        }
    }

    Ok(())
}
