//! The index store: every PEP's raw entry, keyed by number.
//!
//! The store is populated by one explicit fetch ([`IndexStore::load`]) and is
//! immutable afterwards. Hosts that want a process-wide instance install one
//! through [`init_global`]; nothing is fetched implicitly.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::IndexEntry;
use crate::transport::Transport;

/// In-memory table of raw index entries.
#[derive(Debug, Clone, Default)]
pub struct IndexStore {
    entries: HashMap<u32, IndexEntry>,
}

impl IndexStore {
    /// Fetch and parse the upstream index.
    pub fn load(transport: &dyn Transport, config: &Config) -> Result<Self> {
        let url = &config.endpoints.index_url;
        tracing::debug!(url = %url, "fetching PEP index");

        let response = transport.get(url)?;
        if !response.is_success() {
            return Err(Error::Status {
                url: url.clone(),
                status: response.status,
            });
        }

        let store = Self::from_json(&response.body)?;
        tracing::debug!(entries = store.len(), "loaded PEP index");
        Ok(store)
    }

    /// Parse an index document: a JSON object of `"<number>": entry`.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, IndexEntry> = serde_json::from_str(text)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (key, entry) in raw {
            let number: u32 = key
                .trim()
                .parse()
                .map_err(|_| Error::InvalidIndexKey(key.clone()))?;
            entries.insert(number, entry);
        }
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, IndexEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up the raw entry for `number`.
    pub fn get(&self, number: u32) -> Result<&IndexEntry> {
        self.entries.get(&number).ok_or(Error::NotFound(number))
    }

    pub fn contains(&self, number: u32) -> bool {
        self.entries.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All PEP numbers, ascending.
    pub fn numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.entries.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Entries in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &IndexEntry)> + '_ {
        self.numbers()
            .into_iter()
            .filter_map(move |n| self.entries.get(&n).map(|e| (n, e)))
    }
}

static GLOBAL: OnceLock<IndexStore> = OnceLock::new();

/// Install the process-wide store. The first call wins; later calls are
/// ignored and return the store already installed.
pub fn init_global(store: IndexStore) -> &'static IndexStore {
    if GLOBAL.set(store).is_err() {
        tracing::warn!("global PEP index already initialized; keeping the existing store");
    }
    // set() either succeeded or found a value, so the cell is populated.
    GLOBAL.get_or_init(IndexStore::default)
}

/// The process-wide store, if [`init_global`] has been called.
pub fn global() -> Option<&'static IndexStore> {
    GLOBAL.get()
}
