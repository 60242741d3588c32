//! A single quiz attempt.
//!
//! `QuizAttempt` is owned by the caller for the lifetime of one attempt. It
//! holds the answer map and navigation index and delegates all scoring to
//! [`crate::scoring`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Item};
use crate::scoring::{self, PassPolicy, Score};

/// Practice attempts lock each answer; test attempts allow changes until submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Practice,
    Test,
}

/// Which questions to show when reviewing a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    #[default]
    All,
    Wrong,
    Starred,
}

/// Result of recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// First answer for this item.
    Recorded,
    /// A test attempt replaced an earlier answer.
    Changed,
    /// A practice attempt already has an answer for this item.
    Locked,
    /// The id is not part of this attempt.
    UnknownItem,
    /// The attempt was already submitted.
    AlreadySubmitted,
}

#[derive(Debug, Clone)]
pub struct QuizAttempt {
    items: Vec<Item>,
    kind: QuizKind,
    answers: AnswerMap,
    index: usize,
    submitted: bool,
}

impl QuizAttempt {
    pub fn new(items: Vec<Item>, kind: QuizKind) -> Self {
        Self {
            items,
            kind,
            answers: AnswerMap::new(),
            index: 0,
            submitted: false,
        }
    }

    /// Resume an attempt from a previously saved answer map.
    ///
    /// Answers for ids outside the item set are discarded.
    pub fn with_answers(mut self, answers: AnswerMap) -> Self {
        let ids: HashSet<&str> = self.items.iter().map(|i| i.id.as_str()).collect();
        self.answers = answers
            .into_iter()
            .filter(|(id, _)| ids.contains(id.as_str()))
            .collect();
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.index)
    }

    /// Record the chosen option index for an item.
    pub fn answer(&mut self, item_id: &str, choice: usize) -> AnswerOutcome {
        if self.submitted {
            return AnswerOutcome::AlreadySubmitted;
        }
        if !self.items.iter().any(|i| i.id == item_id) {
            return AnswerOutcome::UnknownItem;
        }
        let previous = self.answers.get(item_id).cloned();
        match (self.kind, previous) {
            (QuizKind::Practice, Some(_)) => AnswerOutcome::Locked,
            (_, None) => {
                self.answers.insert(item_id.to_string(), choice.to_string());
                AnswerOutcome::Recorded
            }
            (QuizKind::Test, Some(_)) => {
                self.answers.insert(item_id.to_string(), choice.to_string());
                AnswerOutcome::Changed
            }
        }
    }

    /// Advance to the next item, or submit when already on the last one.
    pub fn next(&mut self) {
        if self.index + 1 < self.items.len() {
            self.index += 1;
        } else {
            self.submitted = true;
        }
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump to an item by position; out-of-range positions are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.items.len() {
            self.index = index;
        }
    }

    pub fn submit(&mut self) {
        self.submitted = true;
    }

    /// Clear answers, position and submission state.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.index = 0;
        self.submitted = false;
    }

    /// Position through the attempt as a percentage.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            (self.index + 1) as f64 / self.items.len() as f64 * 100.0
        }
    }

    pub fn score(&self, policy: &PassPolicy) -> Score {
        scoring::score_with_policy(&self.items, &self.answers, policy)
    }

    pub fn incorrect_ids(&self) -> Vec<String> {
        scoring::incorrect_ids(&self.items, &self.answers)
    }

    /// Items visible in review under `filter`, in attempt order.
    pub fn review(&self, filter: ReviewFilter, starred: &HashSet<String>) -> Vec<&Item> {
        match filter {
            ReviewFilter::All => self.items.iter().collect(),
            ReviewFilter::Wrong => self
                .items
                .iter()
                .filter(|i| !scoring::is_correct(i, self.answers.get(&i.id)))
                .collect(),
            ReviewFilter::Starred => self.items.iter().filter(|i| starred.contains(&i.id)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_items;

    fn attempt(kind: QuizKind) -> QuizAttempt {
        // answer indexes: q-1 -> 0, q-2 -> 1, q-3 -> 2
        QuizAttempt::new(make_items("American History", "q", 3), kind)
    }

    #[test]
    fn practice_locks_first_answer() {
        let mut a = attempt(QuizKind::Practice);
        assert_eq!(a.answer("q-1", 3), AnswerOutcome::Recorded);
        assert_eq!(a.answer("q-1", 0), AnswerOutcome::Locked);
        assert_eq!(a.answers()["q-1"], "3");
    }

    #[test]
    fn test_allows_changes_until_submit() {
        let mut a = attempt(QuizKind::Test);
        assert_eq!(a.answer("q-1", 3), AnswerOutcome::Recorded);
        assert_eq!(a.answer("q-1", 0), AnswerOutcome::Changed);
        assert_eq!(a.answers()["q-1"], "0");
        a.submit();
        assert_eq!(a.answer("q-1", 1), AnswerOutcome::AlreadySubmitted);
    }

    #[test]
    fn unknown_items_are_rejected() {
        let mut a = attempt(QuizKind::Test);
        assert_eq!(a.answer("missing", 0), AnswerOutcome::UnknownItem);
        assert!(a.answers().is_empty());
    }

    #[test]
    fn next_on_last_item_submits() {
        let mut a = attempt(QuizKind::Practice);
        a.next();
        a.next();
        assert_eq!(a.index(), 2);
        assert!(!a.is_submitted());
        a.next();
        assert!(a.is_submitted());
        a.previous();
        a.previous();
        a.previous();
        assert_eq!(a.index(), 0);
    }

    #[test]
    fn score_and_review() {
        let mut a = attempt(QuizKind::Test);
        a.answer("q-1", 0);
        a.answer("q-2", 0);
        let score = a.score(&PassPolicy::Absolute(1));
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
        assert!(score.passed);
        assert_eq!(a.incorrect_ids(), vec!["q-2", "q-3"]);

        let starred: HashSet<String> = ["q-3".to_string()].into_iter().collect();
        assert_eq!(a.review(ReviewFilter::All, &starred).len(), 3);
        let wrong: Vec<&str> = a
            .review(ReviewFilter::Wrong, &starred)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(wrong, vec!["q-2", "q-3"]);
        assert_eq!(a.review(ReviewFilter::Starred, &starred)[0].id, "q-3");
    }

    #[test]
    fn reset_clears_state() {
        let mut a = attempt(QuizKind::Practice);
        a.answer("q-2", 1);
        a.go_to(2);
        a.submit();
        a.reset();
        assert!(a.answers().is_empty());
        assert_eq!(a.index(), 0);
        assert!(!a.is_submitted());
        assert_eq!(a.answer("q-2", 0), AnswerOutcome::Recorded);
    }

    #[test]
    fn resume_discards_foreign_answers() {
        let saved: AnswerMap = [("q-1", "0"), ("other", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let a = attempt(QuizKind::Practice).with_answers(saved);
        assert_eq!(a.answers().len(), 1);
        assert_eq!(a.score(&PassPolicy::default()).correct, 1);
    }
}
