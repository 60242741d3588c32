//! The `civicprep validate` command.

use anyhow::Result;

use civicprep_core::loader::validate_collection;

use super::{Context, GlobalArgs};

pub async fn execute(global: &GlobalArgs, locale: Option<String>) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(locale)?;
    let service = ctx.question_service();

    let items = service.repository().load_locale(locale).await;
    println!(
        "Locale {locale}: {} question(s) from {}",
        items.len(),
        ctx.config.content_dir.display()
    );

    let warnings = validate_collection(&items, service.labels().for_locale(locale));
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if items.is_empty() {
        println!("No questions found.");
    } else if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
