//! Content repository access.
//!
//! Loads a locale's item collection from its per-category partitions, falling
//! back to a single combined file, and validates collections for common
//! content mistakes.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ContentError;
use crate::model::{CategoryKey, Item, Locale, LocaleLabels};

// ---------------------------------------------------------------------------
// Content sources
// ---------------------------------------------------------------------------

/// A place raw JSON content documents are fetched from.
///
/// `fetch` returns `None` for absent or unreadable documents; sources never
/// fail a load outright.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name, used in log lines.
    fn name(&self) -> &str;

    /// Fetch and parse the JSON document at a content-relative path.
    async fn fetch(&self, path: &str) -> Option<Value>;
}

/// Reads content documents from a directory tree.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn fetch(&self, path: &str) -> Option<Value> {
        let full = self.root.join(path);
        let content = match tokio::fs::read_to_string(&full).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("content not found: {}", full.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("failed to read {}: {}", full.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("skipping {}: invalid JSON: {}", full.display(), e);
                None
            }
        }
    }
}

/// In-memory content source for tests and embedding callers.
pub struct MemorySource {
    documents: HashMap<String, Value>,
    fetch_count: AtomicU32,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Add a document at a content-relative path.
    pub fn with_document(mut self, path: &str, value: Value) -> Self {
        self.documents.insert(path.to_string(), value);
        self
    }

    /// Add the three category partitions for a locale.
    pub fn with_partitions(self, locale: Locale, gov: &[Item], history: &[Item], civics: &[Item]) -> Self {
        self.with_document(&partition_path(locale, CategoryKey::Gov), items_value(gov))
            .with_document(&partition_path(locale, CategoryKey::History), items_value(history))
            .with_document(&partition_path(locale, CategoryKey::Civics), items_value(civics))
    }

    /// Number of fetches served, including misses.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn items_value(items: &[Item]) -> Value {
    serde_json::to_value(items).unwrap_or(Value::Array(Vec::new()))
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, path: &str) -> Option<Value> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.documents.get(path).cloned()
    }
}

// ---------------------------------------------------------------------------
// Content paths
// ---------------------------------------------------------------------------

/// Path of one category partition, e.g. `questions/en/gov.json`.
pub fn partition_path(locale: Locale, key: CategoryKey) -> String {
    format!("questions/{locale}/{key}.json")
}

/// Path of the combined fallback file for a locale.
pub fn combined_path(locale: Locale) -> String {
    format!("questions/{locale}/data.json")
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// One way of assembling a locale's collection. Strategies are tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStrategy {
    /// `gov.json` + `history.json` + `civics.json`, all three required.
    Partitioned,
    /// `data.json`, either a flat array or `{ "questions": [...] }`.
    Combined,
}

/// Produces item collections for a locale from a content source.
#[derive(Clone)]
pub struct ContentRepository {
    source: Arc<dyn ContentSource>,
    strategies: Vec<CollectionStrategy>,
}

impl ContentRepository {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            strategies: vec![CollectionStrategy::Partitioned, CollectionStrategy::Combined],
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<CollectionStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Load the full collection for a locale given as a string.
    ///
    /// Unsupported locales are rejected; a supported locale with no content
    /// yields an empty collection.
    pub async fn load_collection(&self, locale: &str) -> Result<Vec<Item>, ContentError> {
        let locale: Locale = locale.parse()?;
        Ok(self.load_locale(locale).await)
    }

    /// Load the full collection for a locale, trying each strategy in order.
    pub async fn load_locale(&self, locale: Locale) -> Vec<Item> {
        for strategy in &self.strategies {
            if let Some(items) = self.try_strategy(*strategy, locale).await {
                tracing::info!(
                    "loaded {} items for {} via {:?} from {}",
                    items.len(),
                    locale,
                    strategy,
                    self.source.name()
                );
                return items;
            }
        }
        tracing::warn!("no question content found for {locale}");
        Vec::new()
    }

    async fn try_strategy(&self, strategy: CollectionStrategy, locale: Locale) -> Option<Vec<Item>> {
        match strategy {
            CollectionStrategy::Partitioned => self.load_partitioned(locale).await,
            CollectionStrategy::Combined => self.load_combined(locale).await,
        }
    }

    async fn load_partitioned(&self, locale: Locale) -> Option<Vec<Item>> {
        let [gov_path, history_path, civics_path] =
            CategoryKey::NAMED.map(|key| partition_path(locale, key));

        let (gov, history, civics) = futures::join!(
            self.source.fetch(&gov_path),
            self.source.fetch(&history_path),
            self.source.fetch(&civics_path),
        );

        let mut items = parse_item_array(gov?, &gov_path)?;
        items.extend(parse_item_array(history?, &history_path)?);
        items.extend(parse_item_array(civics?, &civics_path)?);
        Some(items)
    }

    async fn load_combined(&self, locale: Locale) -> Option<Vec<Item>> {
        let path = combined_path(locale);
        let value = self.source.fetch(&path).await?;
        match value {
            Value::Array(_) => parse_item_array(value, &path),
            Value::Object(mut map) => match map.remove("questions") {
                Some(questions @ Value::Array(_)) => parse_item_array(questions, &path),
                _ => {
                    tracing::warn!("{path} has no questions array");
                    None
                }
            },
            _ => {
                tracing::warn!("{path} is neither an array nor an object");
                None
            }
        }
    }
}

/// Parse a JSON array into items, dropping elements that are not valid items.
///
/// Returns `None` when the value is not an array.
fn parse_item_array(value: Value, path: &str) -> Option<Vec<Item>> {
    let Value::Array(elements) = value else {
        tracing::warn!("{path} is not an array, treating as absent");
        return None;
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<Item>(element) {
            Ok(item) => match item.check() {
                Ok(()) => items.push(item),
                Err(e) => tracing::warn!("{path}[{index}]: dropping item: {e}"),
            },
            Err(e) => tracing::warn!("{path}[{index}]: dropping malformed item: {e}"),
        }
    }
    Some(items)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from collection validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a collection for common content issues.
pub fn validate_collection(items: &[Item], labels: &LocaleLabels) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("duplicate item ID: {}", item.id),
            });
        }
    }

    for item in items {
        if let Err(message) = item.check() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message,
            });
        }
        if item.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "prompt is empty".into(),
            });
        }
        if labels.key_for(&item.category).is_none() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("category label '{}' matches no known category", item.category),
            });
        }
    }

    for key in CategoryKey::NAMED {
        let label = labels.label(key).unwrap_or_default();
        if !items.is_empty() && !items.iter().any(|i| i.category == label) {
            warnings.push(ValidationWarning {
                item_id: None,
                message: format!("no items in category {key} ({label})"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryLabels;
    use crate::test_support::make_items;
    use serde_json::json;

    fn repo(source: MemorySource) -> ContentRepository {
        ContentRepository::new(Arc::new(source))
    }

    #[tokio::test]
    async fn partitions_concatenate_in_category_order() {
        let gov = make_items("American Government", "gov", 3);
        let history = make_items("American History", "history", 2);
        let civics = make_items("Integrated Civics", "civics", 4);
        let source = MemorySource::new().with_partitions(Locale::En, &gov, &history, &civics);

        let items = repo(source).load_collection("en").await.unwrap();
        assert_eq!(items.len(), 9);
        assert_eq!(items[0].id, "gov-1");
        assert_eq!(items[3].id, "history-1");
        assert_eq!(items[5].id, "civics-1");
    }

    #[tokio::test]
    async fn missing_partition_falls_back_to_combined() {
        let gov = make_items("American Government", "gov", 3);
        let combined = make_items("American History", "data", 5);
        let source = MemorySource::new()
            .with_document("questions/en/gov.json", json!(gov))
            .with_document("questions/en/history.json", json!(gov))
            .with_document("questions/en/data.json", json!(combined));

        let items = repo(source).load_collection("en").await.unwrap();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.id.starts_with("data-")));
    }

    #[tokio::test]
    async fn combined_object_with_questions_field() {
        let combined = make_items("Historia Americana", "q", 4);
        let source = MemorySource::new()
            .with_document("questions/es/data.json", json!({ "questions": combined }));

        let items = repo(source).load_collection("es").await.unwrap();
        assert_eq!(items.len(), 4);
    }

    #[tokio::test]
    async fn malformed_combined_yields_empty() {
        let source = MemorySource::new()
            .with_document("questions/zh/data.json", json!({ "items": [] }));
        assert!(repo(source).load_collection("zh").await.unwrap().is_empty());

        let source = MemorySource::new().with_document("questions/zh/data.json", json!("nope"));
        assert!(repo(source).load_collection("zh").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn partition_that_is_not_an_array_counts_as_absent() {
        let items = make_items("American Government", "gov", 2);
        let source = MemorySource::new()
            .with_document("questions/en/gov.json", json!(items))
            .with_document("questions/en/history.json", json!({ "questions": items }))
            .with_document("questions/en/civics.json", json!(items));

        assert!(repo(source).load_collection("en").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_locale_content_is_empty_not_error() {
        let items = repo(MemorySource::new()).load_collection("es").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn unsupported_locale_is_rejected() {
        let err = repo(MemorySource::new())
            .load_collection("invalid")
            .await
            .unwrap_err();
        assert_eq!(err, ContentError::UnsupportedLocale("invalid".into()));
    }

    #[tokio::test]
    async fn invalid_items_are_dropped() {
        let source = MemorySource::new().with_document(
            "questions/en/data.json",
            json!([
                {"id": "ok", "category": "American History", "text": "Q", "options": ["a", "b"], "answer": 0},
                {"id": "bad-index", "category": "American History", "text": "Q", "options": ["a", "b"], "answer": 5},
                {"id": "one-option", "category": "American History", "text": "Q", "options": ["a"], "answer": 0},
                {"id": "no-options", "category": "American History"}
            ]),
        );
        let items = repo(source).load_collection("en").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ok");
    }

    #[tokio::test]
    async fn combined_only_strategy_skips_partitions() {
        let gov = make_items("American Government", "gov", 2);
        let source = Arc::new(
            MemorySource::new()
                .with_partitions(Locale::En, &gov, &gov, &gov)
                .with_document("questions/en/data.json", json!(make_items("American History", "d", 1))),
        );
        let repo = ContentRepository::new(source.clone())
            .with_strategies(vec![CollectionStrategy::Combined]);

        let items = repo.load_locale(Locale::En).await;
        assert_eq!(items.len(), 1);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn directory_source_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let locale_dir = dir.path().join("questions").join("en");
        std::fs::create_dir_all(&locale_dir).unwrap();
        let items = make_items("American History", "h", 3);
        std::fs::write(
            locale_dir.join("data.json"),
            serde_json::to_string(&items).unwrap(),
        )
        .unwrap();
        std::fs::write(locale_dir.join("gov.json"), "not json").unwrap();

        let repo = ContentRepository::new(Arc::new(DirectorySource::new(dir.path())));
        let loaded = repo.load_collection("en").await.unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn validate_reports_duplicates_and_unknown_labels() {
        let labels = CategoryLabels::default();
        let mut items = make_items("American Government", "gov", 2);
        items.extend(make_items("American History", "h", 1));
        items.extend(make_items("Integrated Civics", "c", 1));
        items.push(items[0].clone());
        items.push(Item {
            id: "odd".into(),
            category: "Economics".into(),
            text: " ".into(),
            options: vec!["a".into(), "b".into()],
            answer_index: 0,
        });

        let warnings = validate_collection(&items, labels.for_locale(Locale::En));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate item ID: gov-1")));
        assert!(warnings.iter().any(|w| w.message.contains("'Economics'")));
        assert!(warnings.iter().any(|w| w.message == "prompt is empty"));
        assert!(!warnings.iter().any(|w| w.message.starts_with("no items in category")));
    }

    #[test]
    fn validate_reports_empty_category() {
        let labels = CategoryLabels::default();
        let items = make_items("American Government", "gov", 2);
        let warnings = validate_collection(&items, labels.for_locale(Locale::En));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no items in category history")));
    }
}
