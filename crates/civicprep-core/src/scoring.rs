//! Quiz scoring.
//!
//! Computes correct count, percentage, and pass/fail for an item set and a
//! caller-owned answer map. Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Item};

/// Correct answers needed to pass the simulated 20-question test.
pub const PASS_THRESHOLD: u32 = 12;

/// Outcome of scoring one answer map against one item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Items answered with the correct option.
    pub correct: u32,
    /// Items in the set.
    pub total: u32,
    /// `round(correct / total * 100)`, or 0 for an empty set.
    pub percentage: u32,
    /// Whether the pass rule was met.
    pub passed: bool,
}

/// How `Score::passed` is decided.
///
/// The default is an absolute count sized for the 20-question test. Smaller
/// practice sets rarely reach it, so callers scoring practice runs should pick
/// a policy explicitly or ignore `passed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PassPolicy {
    /// Pass when at least this many answers are correct.
    Absolute(u32),
    /// Pass when at least this share of the items (0.0–1.0) is correct.
    Fraction(f64),
}

impl Default for PassPolicy {
    fn default() -> Self {
        PassPolicy::Absolute(PASS_THRESHOLD)
    }
}

impl PassPolicy {
    /// The number of correct answers needed for a set of `total` items.
    ///
    /// A non-finite fraction requires every item.
    pub fn required(&self, total: u32) -> u32 {
        match *self {
            PassPolicy::Absolute(n) => n,
            PassPolicy::Fraction(f) if !f.is_finite() => total,
            PassPolicy::Fraction(f) => (f.clamp(0.0, 1.0) * total as f64).ceil() as u32,
        }
    }

    /// Whether the policy is usable: fractions must lie in `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        match *self {
            PassPolicy::Absolute(_) => true,
            PassPolicy::Fraction(f) => (0.0..=1.0).contains(&f),
        }
    }
}

/// Whether the recorded answer selects the item's correct option.
///
/// Blank answers never match, not even option 0.
pub fn is_correct(item: &Item, answer: Option<&String>) -> bool {
    answer
        .and_then(|a| a.trim().parse::<usize>().ok())
        .is_some_and(|choice| choice == item.answer_index)
}

/// Score an answer map against an absolute pass threshold.
pub fn score(items: &[Item], answers: &AnswerMap, pass_threshold: u32) -> Score {
    score_with_policy(items, answers, &PassPolicy::Absolute(pass_threshold))
}

/// Score an answer map with an explicit pass policy.
pub fn score_with_policy(items: &[Item], answers: &AnswerMap, policy: &PassPolicy) -> Score {
    let correct = items
        .iter()
        .filter(|item| is_correct(item, answers.get(&item.id)))
        .count() as u32;
    let total = items.len() as u32;
    let percentage = if total > 0 {
        (correct as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    Score {
        correct,
        total,
        percentage,
        passed: correct >= policy.required(total),
    }
}

/// Items with any answer recorded, correct or not.
pub fn answered_count(items: &[Item], answers: &AnswerMap) -> u32 {
    items
        .iter()
        .filter(|item| answers.contains_key(&item.id))
        .count() as u32
}

/// Ids of items not answered correctly, in item order. Unanswered items count.
pub fn incorrect_ids(items: &[Item], answers: &AnswerMap) -> Vec<String> {
    items
        .iter()
        .filter(|item| !is_correct(item, answers.get(&item.id)))
        .map(|item| item.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, answer_index: usize) -> Item {
        Item {
            id: id.into(),
            category: "American History".into(),
            text: format!("Question {id}"),
            options: vec!["A".into(), "B".into(), "C".into()],
            answer_index,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn scores_half_correct() {
        let items = vec![item("a", 0), item("b", 1)];
        let s = score(&items, &answers(&[("a", "0"), ("b", "0")]), 1);
        assert_eq!(s.correct, 1);
        assert_eq!(s.total, 2);
        assert_eq!(s.percentage, 50);
        assert!(s.passed);
        assert_eq!(answered_count(&items, &answers(&[("a", "0"), ("b", "0")])), 2);
    }

    #[test]
    fn missing_answers_never_count() {
        let items = vec![item("a", 0), item("b", 1)];
        let s = score(&items, &AnswerMap::new(), PASS_THRESHOLD);
        assert_eq!(s.correct, 0);
        assert_eq!(s.percentage, 0);
        assert_eq!(answered_count(&items, &AnswerMap::new()), 0);
        assert!(!s.passed);
    }

    #[test]
    fn empty_item_set() {
        let s = score(&[], &answers(&[("a", "0")]), PASS_THRESHOLD);
        assert_eq!(s.total, 0);
        assert_eq!(s.percentage, 0);
        assert!(!s.passed);

        let s = score(&[], &AnswerMap::new(), 0);
        assert!(s.passed);
    }

    #[test]
    fn scoring_is_idempotent() {
        let items = vec![item("a", 0), item("b", 1), item("c", 2)];
        let map = answers(&[("a", "0"), ("c", "1")]);
        assert_eq!(score(&items, &map, 2), score(&items, &map, 2));
    }

    #[test]
    fn answers_are_parsed_as_integers() {
        let items = vec![item("a", 2), item("b", 1), item("c", 0)];
        let map = answers(&[("a", " 2 "), ("b", "one"), ("c", "")]);
        assert_eq!(score(&items, &map, PASS_THRESHOLD).correct, 1);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let items = vec![item("a", 0), item("b", 0), item("c", 0)];
        let map = answers(&[("a", "0"), ("b", "0")]);
        assert_eq!(score(&items, &map, PASS_THRESHOLD).percentage, 67);
        let map = answers(&[("a", "0")]);
        assert_eq!(score(&items, &map, PASS_THRESHOLD).percentage, 33);
    }

    #[test]
    fn absolute_threshold_on_twenty_items() {
        let items: Vec<Item> = (0..20).map(|i| item(&format!("q{i}"), 0)).collect();
        let eleven: AnswerMap = (0..11).map(|i| (format!("q{i}"), "0".to_string())).collect();
        let twelve: AnswerMap = (0..12).map(|i| (format!("q{i}"), "0".to_string())).collect();
        assert!(!score(&items, &eleven, PASS_THRESHOLD).passed);
        assert!(score(&items, &twelve, PASS_THRESHOLD).passed);
        assert_eq!(score(&items, &twelve, PASS_THRESHOLD).percentage, 60);
    }

    #[test]
    fn fraction_policy_scales_with_total() {
        let items: Vec<Item> = (0..10).map(|i| item(&format!("q{i}"), 1)).collect();
        let six: AnswerMap = (0..6).map(|i| (format!("q{i}"), "1".to_string())).collect();
        let policy = PassPolicy::Fraction(0.6);
        assert_eq!(policy.required(10), 6);
        assert!(score_with_policy(&items, &six, &policy).passed);
        assert!(!score_with_policy(&items, &six, &PassPolicy::default()).passed);
        assert_eq!(PassPolicy::Fraction(0.6).required(3), 2);
    }

    #[test]
    fn non_finite_fraction_requires_every_item() {
        let items: Vec<Item> = (0..20).map(|i| item(&format!("q{i}"), 0)).collect();
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let policy = PassPolicy::Fraction(f);
            assert_eq!(policy.required(20), 20);
            assert!(!policy.is_valid());
            assert!(!score_with_policy(&items, &AnswerMap::new(), &policy).passed);
        }
        assert!(!PassPolicy::Fraction(1.5).is_valid());
        assert!(PassPolicy::Fraction(0.6).is_valid());
        assert!(PassPolicy::default().is_valid());
    }

    #[test]
    fn score_serializes_four_fields() {
        let s = score(&[item("a", 0)], &answers(&[("a", "0")]), 1);
        let value = serde_json::to_value(s).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["correct", "total", "percentage", "passed"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn incorrect_ids_include_unanswered() {
        let items = vec![item("a", 0), item("b", 1), item("c", 2)];
        let map = answers(&[("a", "0"), ("b", "2")]);
        assert_eq!(incorrect_ids(&items, &map), vec!["b", "c"]);
    }
}
