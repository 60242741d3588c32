//! civicprep CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::{Directive, LevelFilter};

mod commands;

#[derive(Parser)]
#[command(name = "civicprep", version, about = "U.S. civics test study engine")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory (overrides config and CIVICPREP_CONTENT_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select questions for a quiz
    Quiz {
        /// Content locale: en, es, zh (default from config)
        #[arg(long)]
        locale: Option<String>,

        /// Category: gov, history, civics, all
        #[arg(long, default_value = "all")]
        category: String,

        /// Mode: trial, all, test
        #[arg(long, default_value = "trial")]
        mode: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print one page of a locale's questions
    Page {
        /// Content locale: en, es, zh (default from config)
        #[arg(long)]
        locale: Option<String>,

        /// Category: gov, history, civics, all
        #[arg(long, default_value = "all")]
        category: String,

        /// Items to skip
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,

        /// Page size
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score an answer map against a set of questions
    Score {
        /// JSON array of questions
        #[arg(long)]
        items: PathBuf,

        /// JSON object mapping question id to chosen option index
        #[arg(long)]
        answers: PathBuf,

        /// Correct answers needed to pass
        #[arg(long, conflicts_with = "pass_fraction")]
        threshold: Option<u32>,

        /// Share of questions (0.0-1.0) needed to pass
        #[arg(long)]
        pass_fraction: Option<f64>,

        /// Locale recorded in the report (default from config)
        #[arg(long)]
        locale: Option<String>,

        /// Mode recorded in the report
        #[arg(long, default_value = "test")]
        mode: String,

        /// Write a JSON score report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a locale's questions for content problems
    Validate {
        /// Content locale: en, es, zh (default from config)
        #[arg(long)]
        locale: Option<String>,
    },

    /// List grammar exercises
    Grammar {
        /// Content locale: en, es, zh (default from config)
        #[arg(long)]
        locale: Option<String>,

        /// Restrict to one topic id
        #[arg(long)]
        topic: Option<String>,

        /// Exercise type: fill-blank, multiple-choice, sentence-reorder, correction
        #[arg(long = "type")]
        kind: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List or search glossary terms
    Glossary {
        /// Case-insensitive term search in any language
        #[arg(long)]
        search: Option<String>,

        /// Locale for the definition column (default from config)
        #[arg(long)]
        locale: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a starter config and sample content
    Init,
}

#[tokio::main]
async fn main() {
    let directive: Directive = "civicprep=info"
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        content_dir: cli.content_dir,
    };

    let result = match cli.command {
        Commands::Quiz {
            locale,
            category,
            mode,
            json,
        } => commands::quiz::execute(&global, locale, category, mode, json).await,
        Commands::Page {
            locale,
            category,
            offset,
            limit,
            json,
        } => commands::page::execute(&global, locale, category, offset, limit, json).await,
        Commands::Score {
            items,
            answers,
            threshold,
            pass_fraction,
            locale,
            mode,
            output,
            json,
        } => commands::score::execute(
            &global,
            commands::score::ScoreArgs {
                items,
                answers,
                threshold,
                pass_fraction,
                locale,
                mode,
                output,
                json,
            },
        ),
        Commands::Validate { locale } => commands::validate::execute(&global, locale).await,
        Commands::Grammar {
            locale,
            topic,
            kind,
            json,
        } => commands::grammar::execute(&global, locale, topic, kind, json).await,
        Commands::Glossary {
            search,
            locale,
            json,
        } => commands::glossary::execute(&global, search, locale, json).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
