//! # PEP Index CLI (`pep`)
//!
//! Look up Python Enhancement Proposals from the command line.
//!
//! ## Usage
//!
//! ```bash
//! pep [--config ./pep.toml] [-v] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pep show <number>` | Print a PEP's metadata |
//! | `pep source <number>` | Print a PEP's full source text |
//! | `pep list` | List PEPs, optionally filtered |
//!
//! ## Examples
//!
//! ```bash
//! # Metadata for PEP 8, as JSON
//! pep show 8 --json
//!
//! # Where does PEP 1's source live?
//! pep source 1 --url-only
//!
//! # All final typing PEPs
//! pep list --status Final --topic typing
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pep_index::config::{self, Config};
use pep_index::models::{PepType, Status, Topic};
use pep_index::query::PepFilter;
use pep_index::{show, PepClient};

const DEFAULT_CONFIG: &str = "./pep.toml";

/// PEP Index CLI: typed access to the Python Enhancement Proposals index.
///
/// The index is fetched from peps.python.org on every invocation. Source
/// text is fetched from the PEPs repository only for `pep source`.
#[derive(Parser)]
#[command(name = "pep", version, about = "Look up Python Enhancement Proposals")]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./pep.toml`; built-in endpoints are used when the
    /// default file does not exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metadata of one PEP.
    Show {
        /// PEP number.
        number: u32,

        /// Emit JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch and print the full source text of one PEP.
    ///
    /// Tries `pep-NNNN.rst` first, then `pep-NNNN.txt`.
    Source {
        /// PEP number.
        number: u32,

        /// Print only the URL the source was fetched from.
        #[arg(long)]
        url_only: bool,
    },

    /// List PEPs in the index.
    List {
        /// Only PEPs with this status (e.g. `Final`, `Draft`).
        #[arg(long, value_parser = parse_raw::<Status>)]
        status: Option<Status>,

        /// Only PEPs of this type (`Informational`, `Process`, `Standards Track`).
        #[arg(long = "type", value_parser = parse_raw::<PepType>)]
        pep_type: Option<PepType>,

        /// Only PEPs tagged with this topic (e.g. `typing`).
        #[arg(long, value_parser = parse_raw::<Topic>)]
        topic: Option<Topic>,

        /// Only PEPs whose title contains this text (case-insensitive).
        #[arg(long)]
        title: Option<String>,
    },
}

fn parse_raw<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = pep_index::models::ParseEnumError>,
{
    s.parse::<T>().map_err(|e| e.to_string())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => config::load_config(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if default.exists() {
                config::load_config(&default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_ref())?;
    let client = PepClient::connect(cfg)?;

    match cli.command {
        Commands::Show { number, json } => {
            show::run_show(&client, number, json)?;
        }
        Commands::Source { number, url_only } => {
            show::run_source(&client, number, url_only)?;
        }
        Commands::List {
            status,
            pep_type,
            topic,
            title,
        } => {
            let filter = PepFilter {
                status,
                pep_type,
                topic,
                title_contains: title,
            };
            show::run_list(&client, &filter)?;
        }
    }

    Ok(())
}
