//! Typed PEP records and the lazy source fetch.
//!
//! A [`Pep`] is built from one [`IndexEntry`] in a single conversion step.
//! Every field is validated up front, so a constructed record never holds
//! an out-of-range status, type, topic, or date.
//!
//! The document body is not part of the index. It is fetched from the
//! content host the first time [`Pep::source`] or [`Pep::source_url`] is
//! called, then cached for the lifetime of the record:
//!
//! ```text
//!  source() ──┐
//!             ├──▶ cache empty? ──yes──▶ GET pep-NNNN.rst ──404──▶ GET pep-NNNN.txt
//! source_url()┘        │                     │ 200                    │ 200      │ 404
//!                      no                    ▼                        ▼          ▼
//!                      └──────────────▶ cached Source ◀───────────────┘   ContentNotFound
//!                                                                         (not cached)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::index::IndexStore;
use crate::models::{IndexEntry, PepType, Status, Topic};
use crate::transport::Transport;

/// Candidate file extensions, in probe order.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["rst", "txt"];

/// Format of the `created` field, e.g. `05-Jul-2000`.
const CREATED_FORMAT: &str = "%d-%b-%Y";

/// A fetched document body and the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub body: String,
    pub url: String,
}

/// Resolves and downloads PEP source files.
#[derive(Clone)]
pub struct ContentFetcher {
    transport: Arc<dyn Transport>,
    template: String,
}

impl ContentFetcher {
    /// `template` is expanded with `{number}` (zero-padded to four digits)
    /// and `{ext}`.
    pub fn new(transport: Arc<dyn Transport>, template: impl Into<String>) -> Self {
        Self {
            transport,
            template: template.into(),
        }
    }

    pub fn url_for(&self, number: u32, ext: &str) -> String {
        self.template
            .replace("{number}", &format!("{:04}", number))
            .replace("{ext}", ext)
    }

    /// Probe each extension in order and return the first `200 OK`. Any
    /// other status moves on to the next extension.
    pub fn fetch(&self, number: u32) -> Result<Source> {
        for ext in SOURCE_EXTENSIONS {
            let url = self.url_for(number, ext);
            let response = self.transport.get(&url)?;
            tracing::debug!(number, url = %url, status = response.status, "source probe");
            if response.is_ok() {
                return Ok(Source {
                    body: response.body,
                    url,
                });
            }
        }
        Err(Error::ContentNotFound { number })
    }
}

impl fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// A typed, read-only view of one PEP.
///
/// Records deliberately have no `PartialEq`/`Hash`; key collections by
/// [`Pep::number`].
pub struct Pep {
    number: u32,
    title: String,
    authors: BTreeSet<String>,
    discussions_to: Option<String>,
    status: Status,
    pep_type: PepType,
    topics: Vec<Topic>,
    created: NaiveDate,
    python_version: Option<String>,
    post_history: Option<String>,
    resolution: Option<String>,
    requires: Option<String>,
    replaces: Option<String>,
    superseded_by: Option<String>,
    url: String,
    fetcher: ContentFetcher,
    source: OnceLock<Source>,
}

impl Pep {
    /// Look up `number` in `store` and build the typed record.
    pub fn new(store: &IndexStore, number: u32, fetcher: ContentFetcher) -> Result<Self> {
        let entry = store.get(number)?;
        Self::from_entry(number, entry, fetcher)
    }

    /// Convert one raw entry. Fails on the first field that does not
    /// validate.
    pub fn from_entry(number: u32, entry: &IndexEntry, fetcher: ContentFetcher) -> Result<Self> {
        let invalid = |field: &'static str, value: &str| Error::InvalidField {
            number,
            field,
            value: value.to_string(),
        };

        let status = entry
            .status
            .parse::<Status>()
            .map_err(|e| invalid("status", &e.value))?;
        let pep_type = entry
            .pep_type
            .parse::<PepType>()
            .map_err(|e| invalid("type", &e.value))?;

        let topics = if entry.topic.is_empty() {
            Vec::new()
        } else {
            entry
                .topic
                .split(", ")
                .map(|t| t.parse::<Topic>().map_err(|e| invalid("topic", &e.value)))
                .collect::<Result<Vec<_>>>()?
        };

        let created = NaiveDate::parse_from_str(&entry.created, CREATED_FORMAT).map_err(
            |source| Error::InvalidDate {
                number,
                value: entry.created.clone(),
                source,
            },
        )?;

        Ok(Self {
            number,
            title: entry.title.clone(),
            authors: entry.authors.split(", ").map(str::to_string).collect(),
            discussions_to: entry.discussions_to.clone(),
            status,
            pep_type,
            topics,
            created,
            python_version: entry.python_version.clone(),
            post_history: entry.post_history.clone(),
            resolution: entry.resolution.clone(),
            requires: entry.requires.clone(),
            replaces: entry.replaces.clone(),
            superseded_by: entry.superseded_by.clone(),
            url: entry.url.clone(),
            fetcher,
            source: OnceLock::new(),
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &BTreeSet<String> {
        &self.authors
    }

    pub fn discussions_to(&self) -> Option<&str> {
        self.discussions_to.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pep_type(&self) -> PepType {
        self.pep_type
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn created(&self) -> NaiveDate {
        self.created
    }

    pub fn python_version(&self) -> Option<&str> {
        self.python_version.as_deref()
    }

    pub fn post_history(&self) -> Option<&str> {
        self.post_history.as_deref()
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    pub fn requires(&self) -> Option<&str> {
        self.requires.as_deref()
    }

    pub fn replaces(&self) -> Option<&str> {
        self.replaces.as_deref()
    }

    pub fn superseded_by(&self) -> Option<&str> {
        self.superseded_by.as_deref()
    }

    /// Canonical page on peps.python.org.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Full document text, fetched on first access.
    pub fn source(&self) -> Result<&str> {
        Ok(&self.fetched()?.body)
    }

    /// URL the document text was fetched from, fetched on first access.
    pub fn source_url(&self) -> Result<&str> {
        Ok(&self.fetched()?.url)
    }

    /// The cached source, without triggering a fetch.
    pub fn source_if_fetched(&self) -> Option<&Source> {
        self.source.get()
    }

    fn fetched(&self) -> Result<&Source> {
        if let Some(source) = self.source.get() {
            return Ok(source);
        }
        // Failures return before the cell is touched, so the next call retries.
        let source = self.fetcher.fetch(self.number)?;
        // A concurrent caller may have filled the cell first; both values are identical.
        Ok(self.source.get_or_init(|| source))
    }
}

impl From<&Pep> for u32 {
    fn from(pep: &Pep) -> u32 {
        pep.number
    }
}

impl fmt::Display for Pep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PEP({})", self.number)
    }
}

impl fmt::Debug for Pep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
