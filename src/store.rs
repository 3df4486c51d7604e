//! In-memory content store: the seven fixed collections the assembler reads.
//!
//! Content comes from two places, merged at startup:
//!   - an optional operator-provided bank file (JSON, document-store export)
//!   - built-in seed content, so the service works with no configuration
//!
//! Bank records win on id collisions; seeds only fill in. Reads hand out
//! clones so assembly never holds the lock.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::content::RawContentItem;
use crate::seeds::seed_content;

/// The seven logical collections, fetched by fixed name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    HistoryQuestions,
    PoliticsQuestions,
    CultureQuestions,
    GeographyQuestions,
    ReadingLessons,
    ListeningLessons,
    SpeakingLessons,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::HistoryQuestions,
        Collection::PoliticsQuestions,
        Collection::CultureQuestions,
        Collection::GeographyQuestions,
        Collection::ReadingLessons,
        Collection::ListeningLessons,
        Collection::SpeakingLessons,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::HistoryQuestions => "history_questions",
            Collection::PoliticsQuestions => "politics_questions",
            Collection::CultureQuestions => "culture_questions",
            Collection::GeographyQuestions => "geography_questions",
            Collection::ReadingLessons => "reading_lessons",
            Collection::ListeningLessons => "listening_lessons",
            Collection::SpeakingLessons => "speaking_lessons",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("collection {0} is not available")]
    MissingCollection(Collection),
    #[error("failed to read content bank {path}: {source}")]
    BankRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content bank {path}: {source}")]
    BankParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct ContentStore {
    collections: RwLock<HashMap<Collection, Vec<RawContentItem>>>,
}

impl ContentStore {
    /// A store with all seven collections present and empty.
    pub fn empty() -> Self {
        let mut map = HashMap::new();
        for collection in Collection::ALL {
            map.insert(collection, Vec::new());
        }
        Self {
            collections: RwLock::new(map),
        }
    }

    /// Build the startup store: bank file (if configured) merged over seeds.
    #[instrument(level = "info", skip_all)]
    pub fn load(config: &AppConfig) -> Result<Self, ContentError> {
        let mut map: HashMap<Collection, Vec<RawContentItem>> = HashMap::new();
        for collection in Collection::ALL {
            map.insert(collection, Vec::new());
        }

        let mut bank_counts: HashMap<Collection, usize> = HashMap::new();
        if let Some(path) = &config.content_bank {
            let bank = read_bank_file(path)?;
            for (collection, items) in bank {
                bank_counts.insert(collection, items.len());
                map.entry(collection).or_default().extend(items);
            }
        }

        // Seeds never overwrite bank content with the same id.
        for (collection, items) in seed_content() {
            let pool = map.entry(collection).or_default();
            for item in items {
                if !pool.iter().any(|existing| existing.id == item.id) {
                    pool.push(item);
                }
            }
        }

        for collection in Collection::ALL {
            let total = map.get(&collection).map(Vec::len).unwrap_or(0);
            let bank = bank_counts.get(&collection).copied().unwrap_or(0);
            info!(
                target: "content",
                collection = %collection,
                bank,
                seed = total.saturating_sub(bank),
                "Startup content inventory"
            );
        }

        Ok(Self {
            collections: RwLock::new(map),
        })
    }

    /// Clone out one collection's records.
    pub async fn fetch(&self, collection: Collection) -> Result<Vec<RawContentItem>, ContentError> {
        let collections = self.collections.read().await;
        collections
            .get(&collection)
            .cloned()
            .ok_or(ContentError::MissingCollection(collection))
    }

    /// Append records to a collection.
    pub async fn insert(&self, collection: Collection, items: Vec<RawContentItem>) {
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().extend(items);
    }
}

fn read_bank_file(path: &str) -> Result<HashMap<Collection, Vec<RawContentItem>>, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::BankRead {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::BankParse {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn empty_store_serves_all_collections() {
        let store = ContentStore::empty();
        for collection in Collection::ALL {
            let items = store.fetch(collection).await.expect("collection present");
            assert!(items.is_empty());
        }
    }

    #[tokio::test]
    async fn insert_then_fetch_round_trips() {
        let store = ContentStore::empty();
        let item: RawContentItem =
            serde_json::from_value(json!({ "id": "h1", "question": "…" })).expect("raw item");
        store.insert(Collection::HistoryQuestions, vec![item]).await;

        let items = store.fetch(Collection::HistoryQuestions).await.expect("fetch");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "h1");
    }

    #[test]
    fn bank_keys_use_collection_names() {
        let parsed: Collection = serde_json::from_value(json!("reading_lessons")).expect("key");
        assert_eq!(parsed, Collection::ReadingLessons);
        assert_eq!(Collection::GeographyQuestions.name(), "geography_questions");
    }
}
