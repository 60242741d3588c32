//! Fixture builders shared by unit tests.

use crate::model::Item;

/// Build `count` four-option items in one category, ids `{prefix}-1..`.
pub(crate) fn make_items(category: &str, prefix: &str, count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item {
            id: format!("{prefix}-{}", i + 1),
            category: category.to_string(),
            text: format!("Question {} for {category}", i + 1),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            answer_index: i % 4,
        })
        .collect()
}

/// 30 government, 30 history and 30 civics items with English labels.
pub(crate) fn english_collection() -> Vec<Item> {
    let mut items = make_items("American Government", "gov", 30);
    items.extend(make_items("American History", "history", 30));
    items.extend(make_items("Integrated Civics", "civics", 30));
    items
}
