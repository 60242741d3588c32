//! The `civicprep page` command.

use anyhow::Result;

use civicprep_core::model::CategoryKey;

use super::quiz::print_items;
use super::{Context, GlobalArgs};

pub async fn execute(
    global: &GlobalArgs,
    locale: Option<String>,
    category: String,
    offset: i64,
    limit: i64,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(locale)?;
    let category: CategoryKey = category.parse()?;

    let page = ctx
        .question_service()
        .select_items_paged(locale.as_str(), category, offset, limit)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_items(&page.items, usize::try_from(offset).unwrap_or(0));
        println!(
            "Showing {} of {} question(s) from offset {offset}",
            page.items.len(),
            page.total
        );
    }

    Ok(())
}
