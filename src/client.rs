//! One-stop client: config, transport, and a loaded index.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::index::IndexStore;
use crate::pep::{ContentFetcher, Pep};
use crate::transport::{HttpTransport, Transport};

/// Holds a loaded [`IndexStore`] and builds [`Pep`] records from it.
pub struct PepClient {
    config: Config,
    transport: Arc<dyn Transport>,
    store: IndexStore,
}

impl PepClient {
    /// Build an HTTP transport from `config` and load the index.
    pub fn connect(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config)?);
        Self::with_transport(config, transport)
    }

    /// Load the index through a caller-supplied transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let store = IndexStore::load(transport.as_ref(), &config)?;
        Ok(Self {
            config,
            transport,
            store,
        })
    }

    /// Use an already loaded store. No request is made.
    pub fn from_store(config: Config, transport: Arc<dyn Transport>, store: IndexStore) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> ContentFetcher {
        ContentFetcher::new(
            self.transport.clone(),
            self.config.endpoints.content_url_template.clone(),
        )
    }

    pub fn pep(&self, number: u32) -> Result<Pep> {
        Pep::new(&self.store, number, self.fetcher())
    }
}
