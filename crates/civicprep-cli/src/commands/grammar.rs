//! The `civicprep grammar` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use civicprep_core::grammar::{ExerciseType, GrammarService};

use super::{truncate, Context, GlobalArgs};

pub async fn execute(
    global: &GlobalArgs,
    locale: Option<String>,
    topic: Option<String>,
    kind: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(locale)?;
    let kind = kind
        .map(|k| k.parse::<ExerciseType>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let data = GrammarService::new(ctx.source.clone()).load(locale).await?;
    if let Some(id) = &topic {
        data.topic(id)?;
    }
    let exercises = data.exercises(topic.as_deref(), kind);

    if json {
        println!("{}", serde_json::to_string_pretty(&exercises)?);
        return Ok(());
    }

    if exercises.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Question", "Answer"]);
    for ex in &exercises {
        table.add_row(vec![
            Cell::new(&ex.id),
            Cell::new(ex.kind),
            Cell::new(truncate(&ex.question, 60)),
            Cell::new(ex.expected_text().unwrap_or("?")),
        ]);
    }
    println!("{table}");
    println!("{} exercise(s)", exercises.len());

    Ok(())
}
