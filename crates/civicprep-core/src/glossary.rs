//! Civics glossary terms with translations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::loader::ContentSource;
use crate::model::Localized;

/// Content-relative path of the glossary document.
pub const GLOSSARY_PATH: &str = "glossary/glossary.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub id: String,
    pub term: Localized,
    pub definitions: Localized,
}

/// Entries whose term matches `query` case-insensitively in any locale.
/// A blank query matches everything.
pub fn search<'a>(items: &'a [GlossaryItem], query: &str) -> Vec<&'a GlossaryItem> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty() || item.term.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Clone)]
pub struct GlossaryService {
    source: Arc<dyn ContentSource>,
}

impl GlossaryService {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Load every glossary entry. Absent or unparseable content yields an
    /// empty list.
    pub async fn load(&self) -> Vec<GlossaryItem> {
        let Some(value) = self.source.fetch(GLOSSARY_PATH).await else {
            return Vec::new();
        };
        match serde_json::from_value(value) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("skipping {}: {}", GLOSSARY_PATH, e);
                Vec::new()
            }
        }
    }
}
