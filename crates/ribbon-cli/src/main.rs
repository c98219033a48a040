//! Ribbon CLI
//!
//! Command-line interface for Ribbon - a local bookmark manager.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ribbon_core::{BookmarkStore, Config, FileStorage, LoadOutcome};

mod commands;
mod logging;
mod notice;
mod output;
mod prompt;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "ribbon")]
#[command(about = "Ribbon - Save, search and open your bookmarks")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use an alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a bookmark
    #[command(alias = "create")]
    Add {
        /// Bookmark title
        title: String,
        /// URL (https:// is assumed when no scheme is given)
        url: String,
    },
    /// List all bookmarks, newest first
    #[command(alias = "ls")]
    List {
        /// Print the list as HTML cards
        #[arg(long)]
        html: bool,
    },
    /// Search bookmarks by title or URL
    Search {
        /// Search query (case-insensitive substring)
        query: String,
        /// Print the results as HTML cards
        #[arg(long)]
        html: bool,
    },
    /// Delete a bookmark
    #[command(alias = "rm")]
    Delete {
        /// Index shown by `list` or `search`
        index: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a bookmark in the default browser
    Open {
        /// Index shown by `list` or `search`
        index: usize,
    },
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and counts
    Status,
}

#[derive(Subcommand, Clone)]
enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// light or dark
        theme: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even when the data directory is unusable
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        Some(Commands::Tui) | None => {
            logging::init_tui_logging(&config);
            return tui::run(&config);
        }
        Some(command) => command,
    };

    logging::init_cli_logging();

    if let Commands::Theme { command } = command {
        let mut storage = config.storage();
        return handle_theme_command(command, &mut storage, &output);
    }

    let (mut store, outcome) = BookmarkStore::open(config.storage());
    if let LoadOutcome::Recovered(e) = &outcome {
        output.warn(&format!("Saved bookmarks could not be read ({}); starting empty", e));
    }

    match command {
        Commands::Add { title, url } => commands::bookmark::add(&mut store, &title, &url, &output),
        Commands::List { html } => commands::bookmark::list(&store, html, &output),
        Commands::Search { query, html } => {
            commands::bookmark::search(&store, &query, html, &output)
        }
        Commands::Delete { index, yes } => {
            commands::bookmark::delete(&mut store, index, yes, &output)
        }
        Commands::Open { index } => commands::bookmark::open(&store, index, &output),
        Commands::Status => commands::status::show(&store, &config, &outcome, &output),
        Commands::Tui => unreachable!(),           // Handled above
        Commands::Theme { .. } => unreachable!(),  // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_theme_command(
    command: Option<ThemeCommands>,
    storage: &mut FileStorage,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ThemeCommands::Show) | None => commands::theme::show(storage, output),
        Some(ThemeCommands::Toggle) => commands::theme::toggle(storage, output),
        Some(ThemeCommands::Set { theme }) => commands::theme::set(storage, &theme, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
