//! Subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use civicprep_core::config::{load_config_from, CivicprepConfig};
use civicprep_core::loader::{ContentRepository, ContentSource, DirectorySource};
use civicprep_core::model::Locale;
use civicprep_core::selection::QuestionService;

pub mod glossary;
pub mod grammar;
pub mod init;
pub mod page;
pub mod quiz;
pub mod score;
pub mod validate;

/// Flags accepted by every subcommand.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
}

/// Resolved configuration plus the content source it points at.
pub struct Context {
    pub config: CivicprepConfig,
    pub source: Arc<dyn ContentSource>,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let mut config = load_config_from(global.config.as_deref())?;
        if let Some(dir) = &global.content_dir {
            config.content_dir = dir.clone();
        }
        tracing::debug!("content directory: {}", config.content_dir.display());
        let source: Arc<dyn ContentSource> = Arc::new(DirectorySource::new(&config.content_dir));
        Ok(Self { config, source })
    }

    pub fn question_service(&self) -> QuestionService {
        QuestionService::new(ContentRepository::new(self.source.clone()))
            .with_labels(self.config.labels.clone())
            .with_config(self.config.selection_config())
    }

    /// The requested locale, or the configured default.
    pub fn locale(&self, requested: Option<String>) -> Result<Locale> {
        match requested {
            Some(s) => Ok(s.parse()?),
            None => Ok(self.config.default_locale),
        }
    }
}

/// Shorten long text for table cells.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
