//! The `civicprep quiz` command.

use anyhow::{Context as _, Result};
use comfy_table::{Cell, Table};

use civicprep_core::model::{CategoryKey, Item, QuestionMode};

use super::{truncate, Context, GlobalArgs};

pub async fn execute(
    global: &GlobalArgs,
    locale: Option<String>,
    category: String,
    mode: String,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(locale)?;
    let category: CategoryKey = category.parse()?;
    let mode: QuestionMode = mode.parse()?;

    let items = ctx
        .question_service()
        .select_items(locale.as_str(), category, mode)
        .await
        .with_context(|| format!("failed to select {mode} questions for {locale}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_items(&items, 0);
        println!("{} question(s) [{locale} / {category} / {mode}]", items.len());
    }

    Ok(())
}

/// Print items as a numbered table starting after `offset`.
pub fn print_items(items: &[Item], offset: usize) {
    if items.is_empty() {
        println!("No questions found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Category", "Question", "Options"]);
    for (i, item) in items.iter().enumerate() {
        let options = item
            .options
            .iter()
            .enumerate()
            .map(|(n, o)| format!("{n}) {}", truncate(o, 40)))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(offset + i + 1),
            Cell::new(&item.id),
            Cell::new(&item.category),
            Cell::new(truncate(&item.text, 60)),
            Cell::new(options),
        ]);
    }
    println!("{table}");
}
