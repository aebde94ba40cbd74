//! # PEP Index
//!
//! A typed client for the Python Enhancement Proposals index.
//!
//! The upstream index (`peps.json`) is fetched once into an [`IndexStore`].
//! Each entry can then be turned into a [`Pep`]: a read-only record whose
//! status, type, topics, and creation date are validated enumerations and
//! dates rather than loose strings. The full reStructuredText (or legacy
//! plain text) source of a PEP is fetched from the content host only when
//! first asked for, and cached on the record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  load   ┌─────────────┐  Pep::new  ┌──────────┐
//! │ peps.json   │───────▶│ IndexStore  │──────────▶│   Pep    │
//! └─────────────┘         └─────────────┘            └────┬─────┘
//!                                                          │ source()
//!                                                          ▼
//!                                              ┌──────────────────────┐
//!                                              │ pep-NNNN.rst / .txt  │
//!                                              └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use pep_index::{Config, PepClient};
//!
//! let client = PepClient::connect(Config::default())?;
//! let pep = client.pep(8)?;
//! println!("{} {} ({})", pep, pep.title(), pep.status());
//! println!("{}", pep.source()?);
//! # Ok::<(), pep_index::Error>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Library error type |
//! | [`transport`] | Blocking HTTP abstraction |
//! | [`models`] | Raw index schema and typed enumerations |
//! | [`index`] | The index store |
//! | [`pep`] | Typed records and lazy source fetch |
//! | [`client`] | Config + transport + store facade |
//! | [`query`] | Filtering over the index |
//! | [`show`] | CLI output |

pub mod client;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod pep;
pub mod query;
pub mod show;
pub mod transport;

pub use client::PepClient;
pub use config::Config;
pub use error::{Error, Result};
pub use index::IndexStore;
pub use models::{IndexEntry, PepType, Status, Topic};
pub use pep::{ContentFetcher, Pep, Source};
