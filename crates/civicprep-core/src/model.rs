//! Core data model types for civicprep.
//!
//! Items, locales, category keys and the locale label table that the
//! selection and scoring engines operate on.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Mapping from item id to the submitted answer (the chosen option index as text).
pub type AnswerMap = HashMap<String, String>;

/// A single quiz question or flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique within a locale.
    pub id: String,
    /// Locale-specific category label (e.g. "American History").
    pub category: String,
    /// The prompt.
    pub text: String,
    /// Answer choices, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    #[serde(rename = "answer")]
    pub answer_index: usize,
}

impl Item {
    /// The text of the correct option, if the answer index is in range.
    pub fn answer_text(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }

    /// Check the structural invariants of an item.
    pub fn check(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!("item {} has fewer than two options", self.id));
        }
        if self.answer_index >= self.options.len() {
            return Err(format!(
                "item {} answer index {} is out of range for {} options",
                self.id,
                self.answer_index,
                self.options.len()
            ));
        }
        Ok(())
    }
}

/// Supported content locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Zh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            "zh" => Ok(Locale::Zh),
            other => Err(ContentError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Abstract category selector, independent of locale display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Gov,
    History,
    Civics,
    All,
}

impl CategoryKey {
    /// The three named categories in canonical order.
    pub const NAMED: [CategoryKey; 3] = [CategoryKey::Gov, CategoryKey::History, CategoryKey::Civics];
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Gov => write!(f, "gov"),
            CategoryKey::History => write!(f, "history"),
            CategoryKey::Civics => write!(f, "civics"),
            CategoryKey::All => write!(f, "all"),
        }
    }
}

impl FromStr for CategoryKey {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gov" | "government" => Ok(CategoryKey::Gov),
            "history" => Ok(CategoryKey::History),
            "civics" => Ok(CategoryKey::Civics),
            "all" => Ok(CategoryKey::All),
            other => Err(ContentError::UnsupportedCategory(other.to_string())),
        }
    }
}

/// How many items a selection returns and how they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    /// Bounded random sample for practice.
    Trial,
    /// The entire filtered set in original order.
    All,
    /// Balanced random sample across the three named categories.
    Test,
}

impl fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionMode::Trial => write!(f, "trial"),
            QuestionMode::All => write!(f, "all"),
            QuestionMode::Test => write!(f, "test"),
        }
    }
}

impl FromStr for QuestionMode {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(QuestionMode::Trial),
            "all" => Ok(QuestionMode::All),
            "test" => Ok(QuestionMode::Test),
            other => Err(ContentError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Category display labels for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleLabels {
    pub gov: String,
    pub history: String,
    pub civics: String,
}

impl LocaleLabels {
    fn new(gov: &str, history: &str, civics: &str) -> Self {
        Self {
            gov: gov.to_string(),
            history: history.to_string(),
            civics: civics.to_string(),
        }
    }

    /// The label stored on items for a named category. `All` has no label.
    pub fn label(&self, key: CategoryKey) -> Option<&str> {
        match key {
            CategoryKey::Gov => Some(&self.gov),
            CategoryKey::History => Some(&self.history),
            CategoryKey::Civics => Some(&self.civics),
            CategoryKey::All => None,
        }
    }

    /// Reverse lookup from an item's label to its category key.
    pub fn key_for(&self, label: &str) -> Option<CategoryKey> {
        CategoryKey::NAMED
            .into_iter()
            .find(|key| self.label(*key) == Some(label))
    }
}

/// Lookup table `locale x category key -> label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLabels {
    pub en: LocaleLabels,
    pub es: LocaleLabels,
    pub zh: LocaleLabels,
}

impl CategoryLabels {
    pub fn for_locale(&self, locale: Locale) -> &LocaleLabels {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
            Locale::Zh => &self.zh,
        }
    }

    pub fn label(&self, locale: Locale, key: CategoryKey) -> Option<&str> {
        self.for_locale(locale).label(key)
    }
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            en: LocaleLabels::new("American Government", "American History", "Integrated Civics"),
            es: LocaleLabels::new(
                "Gobierno Americano",
                "Historia Americana",
                "Educación Cívica Integrada",
            ),
            zh: LocaleLabels::new("美国政府", "美国历史", "综合公民"),
        }
    }
}

/// A string available in every supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub es: String,
    pub zh: String,
}

impl Localized {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
            Locale::Zh => &self.zh,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.en.as_str(), self.es.as_str(), self.zh.as_str()].into_iter()
    }
}
