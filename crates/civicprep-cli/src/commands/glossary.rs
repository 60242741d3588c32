//! The `civicprep glossary` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use civicprep_core::glossary::{search, GlossaryService};

use super::{truncate, Context, GlobalArgs};

pub async fn execute(
    global: &GlobalArgs,
    query: Option<String>,
    locale: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(locale)?;

    let items = GlossaryService::new(ctx.source.clone()).load().await;
    let matches = search(&items, query.as_deref().unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No glossary entries found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Term", "Definition"]);
    for item in &matches {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(item.term.get(locale)),
            Cell::new(truncate(item.definitions.get(locale), 70)),
        ]);
    }
    println!("{table}");
    println!("{} entr{}", matches.len(), if matches.len() == 1 { "y" } else { "ies" });

    Ok(())
}
