//! The `civicprep init` command.

use std::path::Path;

use anyhow::Result;

use civicprep_core::config::STARTER_CONFIG;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("civicprep.toml"), STARTER_CONFIG)?;

    let sample_dir = Path::new("content/questions/en");
    std::fs::create_dir_all(sample_dir)?;
    write_if_absent(&sample_dir.join("data.json"), SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Add gov.json, history.json and civics.json under content/questions/<locale>/");
    println!("  2. Run: civicprep validate --locale en");
    println!("  3. Run: civicprep quiz --locale en --mode test");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "id": "gov-1",
    "category": "American Government",
    "text": "What is the supreme law of the land?",
    "options": ["the Constitution", "the Declaration of Independence", "the Bill of Rights", "the Articles of Confederation"],
    "answer": 0
  },
  {
    "id": "history-1",
    "category": "American History",
    "text": "Who was the first President?",
    "options": ["John Adams", "Thomas Jefferson", "George Washington", "Abraham Lincoln"],
    "answer": 2
  },
  {
    "id": "civics-1",
    "category": "Integrated Civics",
    "text": "What is the capital of the United States?",
    "options": ["New York, NY", "Washington, D.C.", "Philadelphia, PA", "Boston, MA"],
    "answer": 1
  }
]
"#;
