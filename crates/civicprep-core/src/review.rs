//! Flashcard decks and review filters.
//!
//! Starred and missed id sets belong to the caller; these helpers only read
//! them to decide which cards or questions are visible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::Item;

/// Which flashcards to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashcardFilter {
    #[default]
    All,
    Starred,
    Missed,
}

/// Cards visible under a filter, in original order.
pub fn visible_cards(
    cards: &[Item],
    filter: FlashcardFilter,
    starred: &HashSet<String>,
    missed: &HashSet<String>,
) -> Vec<Item> {
    match filter {
        FlashcardFilter::All => cards.to_vec(),
        FlashcardFilter::Starred => cards
            .iter()
            .filter(|c| starred.contains(&c.id))
            .cloned()
            .collect(),
        FlashcardFilter::Missed => cards
            .iter()
            .filter(|c| missed.contains(&c.id))
            .cloned()
            .collect(),
    }
}

/// Flip `id` in a starred set. Returns whether it is starred afterwards.
pub fn toggle_star(starred: &mut HashSet<String>, id: &str) -> bool {
    if starred.remove(id) {
        false
    } else {
        starred.insert(id.to_string());
        true
    }
}

/// Navigation state over a filtered flashcard deck.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Item>,
    filter: FlashcardFilter,
    index: usize,
    show_answer: bool,
}

impl FlashcardDeck {
    pub fn new(
        cards: &[Item],
        filter: FlashcardFilter,
        starred: &HashSet<String>,
        missed: &HashSet<String>,
    ) -> Self {
        Self {
            cards: visible_cards(cards, filter, starred, missed),
            filter,
            index: 0,
            show_answer: false,
        }
    }

    pub fn filter(&self) -> FlashcardFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Item> {
        self.cards.get(self.index)
    }

    /// Correct answer text of the current card, or empty when there is none.
    pub fn answer_text(&self) -> &str {
        self.current().and_then(Item::answer_text).unwrap_or_default()
    }

    pub fn is_showing_answer(&self) -> bool {
        self.show_answer
    }

    pub fn flip(&mut self) {
        self.show_answer = !self.show_answer;
    }

    /// Move forward one card; stays on the last card. Hides the answer on move.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.show_answer = false;
            true
        } else {
            false
        }
    }

    /// Move back one card; stays on the first card. Hides the answer on move.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.show_answer = false;
            true
        } else {
            false
        }
    }

    /// Position through the deck as a percentage, 0 for an empty deck.
    pub fn progress(&self) -> f64 {
        if self.cards.is_empty() {
            0.0
        } else {
            (self.index + 1) as f64 / self.cards.len() as f64 * 100.0
        }
    }
}
