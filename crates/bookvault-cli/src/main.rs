//! Book Vault CLI
//!
//! Command-line interface for Book Vault - personal library bookkeeping.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;
mod prompt;
mod scrape;
mod storage;

use commands::book::{CreateArgs, EditArgs};
use config::Config;
use output::{Output, OutputFormat};
use storage::VaultStorage;

#[derive(Parser)]
#[command(name = "bookvault")]
#[command(about = "Book Vault - personal library bookkeeping")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// List all tags with usage counts
    Tags,
    /// Show aggregate reading statistics
    Stats,
    /// Show or change display and goal settings
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show or set application configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Export or import the library
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
    /// Extract books from an HTML file and save them
    Scrape {
        /// HTML file to scan for <h3>/<p class="author"> pairs
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a new book
    #[command(alias = "add")]
    Create {
        /// Book title
        #[arg(short, long)]
        title: String,
        /// Author name
        #[arg(short, long)]
        author: String,
        /// Page count
        #[arg(short, long)]
        pages: String,
        /// Organizational tag
        #[arg(short = 'g', long)]
        tag: String,
        /// Date added (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Cover image as a data URI
        #[arg(long)]
        cover_image: Option<String>,
    },
    /// List books, filtered and sorted
    #[command(alias = "ls")]
    List {
        /// Filter query (text or regular expression)
        #[arg(short = 'Q', long)]
        query: Option<String>,
        /// Match case-sensitively
        #[arg(short, long)]
        case_sensitive: bool,
        /// Sort field (title, author, pages, tag, dateAdded)
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort direction (asc, desc)
        #[arg(short, long)]
        direction: Option<String>,
    },
    /// Show book details
    Show {
        /// Book id (full or prefix)
        id: String,
    },
    /// Edit a book's fields
    Edit {
        /// Book id (full or prefix)
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        author: Option<String>,
        #[arg(short, long)]
        pages: Option<String>,
        #[arg(short = 'g', long)]
        tag: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        cover_image: Option<String>,
    },
    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        /// Book id (full or prefix)
        id: String,
    },
    /// Search books (regex, with substring fallback)
    Search {
        /// Search query
        query: String,
        /// Match case-sensitively
        #[arg(short, long)]
        case_sensitive: bool,
    },
}

#[derive(Subcommand, Clone)]
enum SettingsCommands {
    /// Show current settings
    Show,
    /// Set a settings value
    Set {
        /// Settings key (sort_field, sort_direction, pages_per_unit, unit, target)
        key: String,
        /// Settings value
        value: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand)]
enum DataCommands {
    /// Write the library to a JSON file
    Export {
        /// Output path (defaults to book-vault-export.json)
        path: Option<PathBuf>,
    },
    /// Replace the library from a JSON file
    Import {
        /// JSON file containing an array of book records
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands run before any data directory is touched
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    let storage = VaultStorage::new(config);

    match cli.command {
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Book { command } => handle_book_command(command, &storage, &output),
        Commands::Tags => commands::tag::list(&storage, &output),
        Commands::Stats => commands::stats::show(&storage, &output),
        Commands::Settings { command } => handle_settings_command(command, &storage, &output),
        Commands::Data { command } => handle_data_command(command, &storage, &output),
        Commands::Scrape { file } => commands::scrape::run(&storage, file, &output),
    }
}

fn handle_book_command(
    command: BookCommands,
    storage: &VaultStorage,
    output: &Output,
) -> Result<()> {
    match command {
        BookCommands::Create {
            title,
            author,
            pages,
            tag,
            date,
            cover_image,
        } => commands::book::create(
            storage,
            CreateArgs {
                title,
                author,
                pages,
                tag,
                date,
                cover_image,
            },
            output,
        ),
        BookCommands::List {
            query,
            case_sensitive,
            sort,
            direction,
        } => commands::book::list(storage, query, case_sensitive, sort, direction, output),
        BookCommands::Show { id } => commands::book::show(storage, id, output),
        BookCommands::Edit {
            id,
            title,
            author,
            pages,
            tag,
            date,
            cover_image,
        } => commands::book::edit(
            storage,
            id,
            EditArgs {
                title,
                author,
                pages,
                tag,
                date,
                cover_image,
            },
            output,
        ),
        BookCommands::Delete { id } => commands::book::delete(storage, id, output),
        BookCommands::Search {
            query,
            case_sensitive,
        } => commands::book::search(storage, query, case_sensitive, output),
    }
}

fn handle_settings_command(
    command: Option<SettingsCommands>,
    storage: &VaultStorage,
    output: &Output,
) -> Result<()> {
    match command {
        Some(SettingsCommands::Show) | None => commands::settings::show(storage, output),
        Some(SettingsCommands::Set { key, value }) => {
            commands::settings::set(storage, key, value, output)
        }
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

fn handle_data_command(
    command: DataCommands,
    storage: &VaultStorage,
    output: &Output,
) -> Result<()> {
    match command {
        DataCommands::Export { path } => commands::data::export(storage, path, output),
        DataCommands::Import { path } => commands::data::import(storage, path, output),
    }
}
