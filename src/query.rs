//! Filtering over the whole index.
//!
//! Used by `pep list`. Entries whose raw fields do not validate are
//! reported separately instead of aborting the listing.

use crate::error::Error;
use crate::index::IndexStore;
use crate::models::{PepType, Status, Topic};
use crate::pep::{ContentFetcher, Pep};

/// Criteria for [`select`]. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PepFilter {
    pub status: Option<Status>,
    pub pep_type: Option<PepType>,
    pub topic: Option<Topic>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
}

impl PepFilter {
    pub fn matches(&self, pep: &Pep) -> bool {
        if self.status.is_some_and(|s| s != pep.status()) {
            return false;
        }
        if self.pep_type.is_some_and(|t| t != pep.pep_type()) {
            return false;
        }
        if let Some(topic) = self.topic {
            if !pep.topics().contains(&topic) {
                return false;
            }
        }
        if let Some(ref needle) = self.title_contains {
            let needle = needle.to_ascii_lowercase();
            if !pep.title().to_ascii_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Result of [`select`]: matching records plus entries that failed to convert.
#[derive(Debug, Default)]
pub struct Selection {
    pub peps: Vec<Pep>,
    pub skipped: Vec<(u32, Error)>,
}

/// Convert every entry in `store` and keep those matching `filter`,
/// ascending by number.
pub fn select(store: &IndexStore, fetcher: &ContentFetcher, filter: &PepFilter) -> Selection {
    let mut selection = Selection::default();
    for (number, entry) in store.iter() {
        match Pep::from_entry(number, entry, fetcher.clone()) {
            Ok(pep) => {
                if filter.matches(&pep) {
                    selection.peps.push(pep);
                }
            }
            Err(e) => {
                tracing::warn!(number, error = %e, "skipping invalid index entry");
                selection.skipped.push((number, e));
            }
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::transport::{HttpResponse, Transport};
    use std::sync::Arc;

    struct NoNetwork;

    impl Transport for NoNetwork {
        fn get(&self, url: &str) -> Result<HttpResponse> {
            panic!("unexpected request to {}", url);
        }
    }

    fn store() -> IndexStore {
        IndexStore::from_json(
            r#"{
                "8": {"title": "Style Guide for Python Code", "authors": "Guido van Rossum",
                      "status": "Active", "type": "Process", "topic": "", "created": "05-Jul-2001"},
                "484": {"title": "Type Hints", "authors": "Guido van Rossum, Jukka Lehtosalo",
                        "status": "Final", "type": "Standards Track", "topic": "typing", "created": "29-Sep-2014"},
                "517": {"title": "A build-system independent format for source trees",
                        "authors": "Nathaniel J. Smith, Thomas Kluyver",
                        "status": "Final", "type": "Standards Track", "topic": "packaging", "created": "30-Sep-2015"},
                "9999": {"title": "Broken", "status": "Bogus", "type": "Process", "created": "01-Jan-2000"}
            }"#,
        )
        .unwrap()
    }

    fn fetcher() -> ContentFetcher {
        ContentFetcher::new(Arc::new(NoNetwork), "http://x/{number}.{ext}")
    }

    fn numbers(selection: &Selection) -> Vec<u32> {
        selection.peps.iter().map(Pep::number).collect()
    }

    #[test]
    fn test_empty_filter_matches_all_valid() {
        let selection = select(&store(), &fetcher(), &PepFilter::default());
        assert_eq!(numbers(&selection), vec![8, 484, 517]);
        assert_eq!(selection.skipped.len(), 1);
        assert_eq!(selection.skipped[0].0, 9999);
    }

    #[test]
    fn test_filter_by_status_and_type() {
        let filter = PepFilter {
            status: Some(Status::Final),
            pep_type: Some(PepType::StandardsTrack),
            ..Default::default()
        };
        let selection = select(&store(), &fetcher(), &filter);
        assert_eq!(numbers(&selection), vec![484, 517]);
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = PepFilter {
            topic: Some(Topic::Typing),
            ..Default::default()
        };
        assert_eq!(numbers(&select(&store(), &fetcher(), &filter)), vec![484]);
    }

    #[test]
    fn test_filter_by_title_ignores_case() {
        let filter = PepFilter {
            title_contains: Some("STYLE".to_string()),
            ..Default::default()
        };
        assert_eq!(numbers(&select(&store(), &fetcher(), &filter)), vec![8]);
    }
}
