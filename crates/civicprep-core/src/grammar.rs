//! Grammar topics, rules and practice exercises.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::loader::ContentSource;
use crate::model::{Locale, Localized};

/// Kind of grammar exercise, kebab-case in content files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    FillBlank,
    MultipleChoice,
    SentenceReorder,
    Correction,
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExerciseType::FillBlank => "fill-blank",
            ExerciseType::MultipleChoice => "multiple-choice",
            ExerciseType::SentenceReorder => "sentence-reorder",
            ExerciseType::Correction => "correction",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fill-blank" => Ok(ExerciseType::FillBlank),
            "multiple-choice" => Ok(ExerciseType::MultipleChoice),
            "sentence-reorder" => Ok(ExerciseType::SentenceReorder),
            "correction" => Ok(ExerciseType::Correction),
            other => Err(format!("unknown exercise type: {other}")),
        }
    }
}

/// Expected answer: an option index or literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseAnswer {
    Index(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarExercise {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: ExerciseAnswer,
    #[serde(default)]
    pub explanation: String,
}

impl GrammarExercise {
    /// Text of the expected answer. Index answers resolve through `options`.
    pub fn expected_text(&self) -> Option<&str> {
        match &self.answer {
            ExerciseAnswer::Text(text) => Some(text),
            ExerciseAnswer::Index(i) => self.options.as_ref()?.get(*i).map(String::as_str),
        }
    }

    /// Case-insensitive comparison of trimmed text against the expected answer.
    pub fn is_correct(&self, response: &str) -> bool {
        self.expected_text()
            .is_some_and(|expected| normalize(expected) == normalize(response))
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarExample {
    pub sentence: String,
    pub translation: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub id: String,
    pub title: Localized,
    pub explanation: Localized,
    #[serde(default)]
    pub examples: Vec<GrammarExample>,
    #[serde(default)]
    pub exercises: Vec<GrammarExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarTopic {
    pub id: String,
    pub name: Localized,
    #[serde(default)]
    pub rules: Vec<GrammarRule>,
}

/// All grammar content for one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarData {
    #[serde(default)]
    pub topics: Vec<GrammarTopic>,
}

impl GrammarData {
    pub fn topic(&self, id: &str) -> Result<&GrammarTopic, ContentError> {
        self.topics
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ContentError::TopicNotFound(id.to_string()))
    }

    pub fn find_rule(&self, id: &str) -> Option<&GrammarRule> {
        self.topics
            .iter()
            .flat_map(|t| t.rules.iter())
            .find(|r| r.id == id)
    }

    /// Rules in content order, optionally restricted to one topic.
    pub fn rules(&self, topic: Option<&str>) -> Vec<&GrammarRule> {
        self.topics
            .iter()
            .filter(|t| topic.map_or(true, |id| t.id == id))
            .flat_map(|t| t.rules.iter())
            .collect()
    }

    /// Exercises in content order, optionally filtered by topic and type.
    pub fn exercises(&self, topic: Option<&str>, kind: Option<ExerciseType>) -> Vec<&GrammarExercise> {
        self.rules(topic)
            .into_iter()
            .flat_map(|r| r.exercises.iter())
            .filter(|e| kind.map_or(true, |k| e.kind == k))
            .collect()
    }
}

/// Count correct responses. Returns `(correct, total)` over `exercises`;
/// exercises without a response count as wrong.
pub fn score_exercises<'a>(
    exercises: impl IntoIterator<Item = &'a GrammarExercise>,
    responses: &std::collections::HashMap<String, String>,
) -> (usize, usize) {
    exercises.into_iter().fold((0, 0), |(correct, total), e| {
        let ok = responses.get(&e.id).is_some_and(|r| e.is_correct(r));
        (correct + usize::from(ok), total + 1)
    })
}

/// Path of a locale's grammar document.
pub fn grammar_path(locale: Locale) -> String {
    format!("grammar/{locale}/grammar.json")
}

/// Loads grammar documents from a content source.
#[derive(Clone)]
pub struct GrammarService {
    source: Arc<dyn ContentSource>,
}

impl GrammarService {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Load the grammar document for a locale. Unlike question collections,
    /// a missing or malformed grammar document is an error.
    pub async fn load(&self, locale: Locale) -> Result<GrammarData, ContentError> {
        let path = grammar_path(locale);
        let value = self
            .source
            .fetch(&path)
            .await
            .ok_or_else(|| ContentError::Missing(path.clone()))?;
        let data: GrammarData = serde_json::from_value(value).map_err(|e| ContentError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("loaded {} grammar topics from {}", data.topics.len(), path);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::loader::MemorySource;

    fn sample() -> serde_json::Value {
        let text = json!({"en": "x", "es": "x", "zh": "x"});
        json!({
            "topics": [
                {
                    "id": "verbs",
                    "name": text,
                    "rules": [{
                        "id": "past-tense",
                        "title": text,
                        "explanation": text,
                        "examples": [{"sentence": "I walked.", "translation": text, "highlight": "walked"}],
                        "exercises": [
                            {"id": "v1", "type": "fill-blank", "question": "I ___ (walk) yesterday.", "answer": "walked", "explanation": ""},
                            {"id": "v2", "type": "multiple-choice", "question": "Pick one", "options": ["go", "went", "gone"], "answer": 1, "explanation": ""}
                        ]
                    }]
                },
                {
                    "id": "nouns",
                    "name": text,
                    "rules": [{
                        "id": "plurals",
                        "title": text,
                        "explanation": text,
                        "examples": [],
                        "exercises": [
                            {"id": "n1", "type": "correction", "question": "Two childs", "answer": "Two children", "explanation": ""}
                        ]
                    }]
                }
            ]
        })
    }

    fn data() -> GrammarData {
        serde_json::from_value(sample()).unwrap()
    }

    #[test]
    fn parses_exercise_answers() {
        let d = data();
        let ex = d.exercises(None, None);
        assert_eq!(ex.len(), 3);
        assert_eq!(ex[0].answer, ExerciseAnswer::Text("walked".into()));
        assert_eq!(ex[1].answer, ExerciseAnswer::Index(1));
        assert_eq!(ex[1].expected_text(), Some("went"));
    }

    #[test]
    fn answer_checking_ignores_case_and_whitespace() {
        let d = data();
        let ex = d.exercises(None, None);
        assert!(ex[0].is_correct("  Walked "));
        assert!(!ex[0].is_correct("walk"));
        assert!(ex[1].is_correct("WENT"));
        assert!(!ex[1].is_correct("1"));
    }

    #[test]
    fn index_answer_without_options_never_matches() {
        let ex = GrammarExercise {
            id: "x".into(),
            kind: ExerciseType::MultipleChoice,
            question: "?".into(),
            options: None,
            answer: ExerciseAnswer::Index(0),
            explanation: String::new(),
        };
        assert!(!ex.is_correct(""));
    }

    #[test]
    fn filters_by_topic_and_type() {
        let d = data();
        assert_eq!(d.exercises(Some("verbs"), None).len(), 2);
        assert_eq!(d.exercises(None, Some(ExerciseType::Correction))[0].id, "n1");
        assert!(d.exercises(Some("nouns"), Some(ExerciseType::FillBlank)).is_empty());
        assert_eq!(d.rules(Some("nouns")).len(), 1);
        assert_eq!(d.rules(None).len(), 2);
    }

    #[test]
    fn topic_and_rule_lookup() {
        let d = data();
        assert_eq!(d.topic("verbs").unwrap().rules.len(), 1);
        assert_eq!(
            d.topic("adverbs"),
            Err(ContentError::TopicNotFound("adverbs".into()))
        );
        assert_eq!(d.find_rule("plurals").unwrap().examples.len(), 0);
        assert!(d.find_rule("missing").is_none());
    }

    #[test]
    fn exercise_type_parse() {
        assert_eq!("Fill-Blank".parse::<ExerciseType>(), Ok(ExerciseType::FillBlank));
        assert_eq!(ExerciseType::SentenceReorder.to_string(), "sentence-reorder");
        assert!("essay".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn scores_responses() {
        let d = data();
        let responses: HashMap<String, String> = [("v1", "walked"), ("v2", "gone")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(score_exercises(d.exercises(None, None), &responses), (1, 3));
    }

    #[tokio::test]
    async fn service_loads_and_reports_missing() {
        let source = MemorySource::new()
            .with_document("grammar/en/grammar.json", sample())
            .with_document("grammar/es/grammar.json", json!({"topics": "nope"}));
        let service = GrammarService::new(Arc::new(source));

        assert_eq!(service.load(Locale::En).await.unwrap().topics.len(), 2);
        assert!(matches!(
            service.load(Locale::Es).await,
            Err(ContentError::Malformed { .. })
        ));
        assert_eq!(
            service.load(Locale::Zh).await,
            Err(ContentError::Missing("grammar/zh/grammar.json".into()))
        );
    }
}
