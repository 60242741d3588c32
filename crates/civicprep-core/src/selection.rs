//! Question selection engine.
//!
//! Picks the subset of a collection that a (category, mode) request asks
//! for: the whole filtered set, a bounded random sample, or a balanced random
//! test across the three named categories. Also serves paged reads.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::loader::ContentRepository;
use crate::model::{CategoryKey, CategoryLabels, Item, Locale, LocaleLabels, QuestionMode};

/// Sample size for `trial` mode.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Size of a simulated official test.
pub const TEST_QUESTION_COUNT: usize = 20;

/// Sample sizes used by the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Items returned by `trial` mode.
    pub trial_count: usize,
    /// Target size of a `test` mode selection.
    pub test_count: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_QUESTION_COUNT,
            test_count: TEST_QUESTION_COUNT,
        }
    }
}

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Items on this page, in collection order.
    pub items: Vec<Item>,
    /// Size of the whole filtered collection.
    pub total: usize,
}

/// Shuffle a copy of `items` (Fisher-Yates) and return it.
fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

/// Uniform sample of `min(count, items.len())` items without replacement.
fn sample_random<R: Rng + ?Sized>(items: &[Item], count: usize, rng: &mut R) -> Vec<Item> {
    let mut picked = shuffled(items, rng);
    picked.truncate(count.min(items.len()));
    picked
}

/// Items whose category label matches `key`. `All` matches everything.
pub fn filter_by_category(collection: &[Item], labels: &LocaleLabels, key: CategoryKey) -> Vec<Item> {
    match labels.label(key) {
        Some(label) => collection
            .iter()
            .filter(|item| item.category == label)
            .cloned()
            .collect(),
        None => collection.to_vec(),
    }
}

/// Select items for a (category, mode) request using the thread-local RNG.
pub fn select_items(
    collection: &[Item],
    labels: &LocaleLabels,
    category: CategoryKey,
    mode: QuestionMode,
    config: &SelectionConfig,
) -> Vec<Item> {
    select_items_with_rng(collection, labels, category, mode, config, &mut rand::rng())
}

/// Select items for a (category, mode) request with an explicit RNG.
///
/// `test` mode only balances when `category` is `All`; combined with a named
/// category it behaves like `trial`.
pub fn select_items_with_rng<R: Rng + ?Sized>(
    collection: &[Item],
    labels: &LocaleLabels,
    category: CategoryKey,
    mode: QuestionMode,
    config: &SelectionConfig,
    rng: &mut R,
) -> Vec<Item> {
    match (category, mode) {
        (CategoryKey::All, QuestionMode::All) => collection.to_vec(),
        (CategoryKey::All, QuestionMode::Test) => {
            balanced_sample(collection, labels, config.test_count, rng)
        }
        (CategoryKey::All, QuestionMode::Trial) => {
            sample_random(collection, config.trial_count, rng)
        }
        (_, QuestionMode::All) => filter_by_category(collection, labels, category),
        (_, QuestionMode::Trial | QuestionMode::Test) => {
            let filtered = filter_by_category(collection, labels, category);
            sample_random(&filtered, config.trial_count, rng)
        }
    }
}

/// Draw a test-sized sample spread evenly across the three named categories.
///
/// Each category contributes `target / 3` items; the remainder is handed out
/// one at a time in gov, history, civics order, skipping exhausted
/// categories. The result is shuffled so it is not grouped by category.
pub fn balanced_sample<R: Rng + ?Sized>(
    collection: &[Item],
    labels: &LocaleLabels,
    target: usize,
    rng: &mut R,
) -> Vec<Item> {
    let partitions: Vec<Vec<Item>> = CategoryKey::NAMED
        .iter()
        .map(|key| filter_by_category(collection, labels, *key))
        .collect();

    let base = target / partitions.len();
    let mut remainder = target - base * partitions.len();

    let mut picked: Vec<Item> = Vec::with_capacity(target);
    for partition in &partitions {
        picked.extend(sample_random(partition, base, rng));
    }

    let mut picked_ids: HashSet<String> = picked.iter().map(|item| item.id.clone()).collect();
    let mut idx = 0usize;
    let mut consecutive_exhausted = 0usize;
    while remainder > 0 && consecutive_exhausted < partitions.len() {
        let partition = &partitions[idx % partitions.len()];
        idx += 1;

        let pool: Vec<Item> = partition
            .iter()
            .filter(|item| !picked_ids.contains(&item.id))
            .cloned()
            .collect();
        let Some(extra) = sample_random(&pool, 1, rng).pop() else {
            consecutive_exhausted += 1;
            continue;
        };
        consecutive_exhausted = 0;
        picked_ids.insert(extra.id.clone());
        picked.push(extra);
        remainder -= 1;
    }

    tracing::debug!("balanced sample picked {} of {} target items", picked.len(), target);
    shuffled(&picked, rng)
}

/// Return one page of the category-filtered collection.
///
/// A negative offset, an offset at or past the end, or a non-positive limit
/// all yield an empty page; `total` is always the filtered size.
pub fn select_items_paged(
    collection: &[Item],
    labels: &LocaleLabels,
    category: CategoryKey,
    offset: i64,
    limit: i64,
) -> Page {
    let filtered = filter_by_category(collection, labels, category);
    let total = filtered.len();

    let items = match (usize::try_from(offset), usize::try_from(limit)) {
        (Ok(offset), Ok(limit)) if offset < total => filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect(),
        _ => Vec::new(),
    };

    Page { items, total }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Boundary service: loads a locale's collection and applies selection.
#[derive(Clone)]
pub struct QuestionService {
    repository: ContentRepository,
    labels: CategoryLabels,
    config: SelectionConfig,
}

impl QuestionService {
    pub fn new(repository: ContentRepository) -> Self {
        Self {
            repository,
            labels: CategoryLabels::default(),
            config: SelectionConfig::default(),
        }
    }

    pub fn with_labels(mut self, labels: CategoryLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_config(mut self, config: SelectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.labels
    }

    pub fn repository(&self) -> &ContentRepository {
        &self.repository
    }

    /// Load every item for a locale.
    pub async fn load_collection(&self, locale: &str) -> Result<Vec<Item>, ContentError> {
        self.repository.load_collection(locale).await
    }

    /// Load a locale's collection and select items for a (category, mode) request.
    pub async fn select_items(
        &self,
        locale: &str,
        category: CategoryKey,
        mode: QuestionMode,
    ) -> Result<Vec<Item>, ContentError> {
        let locale: Locale = locale.parse()?;
        let collection = self.repository.load_locale(locale).await;
        Ok(select_items(
            &collection,
            self.labels.for_locale(locale),
            category,
            mode,
            &self.config,
        ))
    }

    /// Load a locale's collection and return one page of it.
    pub async fn select_items_paged(
        &self,
        locale: &str,
        category: CategoryKey,
        offset: i64,
        limit: i64,
    ) -> Result<Page, ContentError> {
        let locale: Locale = locale.parse()?;
        let collection = self.repository.load_locale(locale).await;
        Ok(select_items_paged(
            &collection,
            self.labels.for_locale(locale),
            category,
            offset,
            limit,
        ))
    }
}
