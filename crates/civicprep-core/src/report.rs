//! Score reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Locale, QuestionMode};
use crate::scoring::Score;

/// A scored attempt, suitable for saving alongside a study history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub locale: Locale,
    pub mode: QuestionMode,
    pub score: Score,
    /// Items with any answer recorded.
    #[serde(default)]
    pub answered: u32,
    /// Items answered wrong or left unanswered, in item order.
    pub incorrect_ids: Vec<String>,
}

impl ScoreReport {
    pub fn new(locale: Locale, mode: QuestionMode, score: Score, incorrect_ids: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            locale,
            mode,
            score,
            answered: 0,
            incorrect_ids,
        }
    }

    pub fn with_answered(mut self, answered: u32) -> Self {
        self.answered = answered;
        self
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render a short Markdown summary.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Civics Score Report\n\n");
        md.push_str(&format!(
            "**Date**: {}  \n**Locale**: {}  \n**Mode**: {}\n\n",
            self.created_at.format("%Y-%m-%d %H:%M UTC"),
            self.locale,
            self.mode
        ));
        md.push_str(&format!(
            "**Score**: {}/{} ({}%) {}\n",
            self.score.correct,
            self.score.total,
            self.score.percentage,
            if self.score.passed { "PASS" } else { "FAIL" }
        ));
        md.push_str(&format!("**Answered**: {}/{}\n", self.answered, self.score.total));
        if !self.incorrect_ids.is_empty() {
            md.push_str("\n## To review\n\n");
            for id in &self.incorrect_ids {
                md.push_str(&format!("- {id}\n"));
            }
        }
        md
    }
}
