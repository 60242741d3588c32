//! The `civicprep score` command.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;

use civicprep_core::model::{AnswerMap, Item, QuestionMode};
use civicprep_core::report::ScoreReport;
use civicprep_core::scoring::{self, PassPolicy};

use super::{Context, GlobalArgs};

pub struct ScoreArgs {
    pub items: PathBuf,
    pub answers: PathBuf,
    pub threshold: Option<u32>,
    pub pass_fraction: Option<f64>,
    pub locale: Option<String>,
    pub mode: String,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn execute(global: &GlobalArgs, args: ScoreArgs) -> Result<()> {
    let ctx = Context::load(global)?;
    let locale = ctx.locale(args.locale)?;
    let mode: QuestionMode = args.mode.parse()?;

    if let Some(fraction) = args.pass_fraction {
        anyhow::ensure!(
            (0.0..=1.0).contains(&fraction),
            "pass fraction must be between 0.0 and 1.0"
        );
    }
    let policy = match (args.threshold, args.pass_fraction) {
        (Some(n), _) => PassPolicy::Absolute(n),
        (None, Some(f)) => PassPolicy::Fraction(f),
        (None, None) => ctx.config.pass_policy(),
    };

    let items: Vec<Item> = read_json(&args.items)?;
    let answers: AnswerMap = read_json(&args.answers)?;

    let score = scoring::score_with_policy(&items, &answers, &policy);
    let report = ScoreReport::new(locale, mode, score, scoring::incorrect_ids(&items, &answers))
        .with_answered(scoring::answered_count(&items, &answers));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Score: {}/{} ({}%) {}",
            score.correct,
            score.total,
            score.percentage,
            if score.passed { "PASS" } else { "FAIL" }
        );
        println!("Answered: {}/{}", report.answered, score.total);
        if !report.incorrect_ids.is_empty() {
            println!("To review: {}", report.incorrect_ids.join(", "));
        }
    }

    if let Some(path) = &args.output {
        report.save_json(path)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
