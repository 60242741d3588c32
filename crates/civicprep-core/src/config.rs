//! Study engine configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{CategoryLabels, Locale};
use crate::scoring::{PassPolicy, PASS_THRESHOLD};
use crate::selection::{SelectionConfig, DEFAULT_QUESTION_COUNT, TEST_QUESTION_COUNT};

/// Environment variable that overrides `content_dir`.
pub const CONTENT_DIR_ENV: &str = "CIVICPREP_CONTENT_DIR";

/// Top-level civicprep configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivicprepConfig {
    /// Root of the content tree (`questions/`, `grammar/`, `glossary/`).
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Locale used when a command does not name one.
    #[serde(default = "default_locale")]
    pub default_locale: Locale,
    /// Correct answers needed to pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
    /// When set, pass on this share of the items instead of `pass_threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_fraction: Option<f64>,
    /// Items in a trial selection.
    #[serde(default = "default_trial_count")]
    pub trial_count: usize,
    /// Items in a simulated test.
    #[serde(default = "default_test_count")]
    pub test_count: usize,
    /// Category display labels per locale.
    #[serde(default)]
    pub labels: CategoryLabels,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content")
}
fn default_locale() -> Locale {
    Locale::En
}
fn default_pass_threshold() -> u32 {
    PASS_THRESHOLD
}
fn default_trial_count() -> usize {
    DEFAULT_QUESTION_COUNT
}
fn default_test_count() -> usize {
    TEST_QUESTION_COUNT
}

impl Default for CivicprepConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            default_locale: default_locale(),
            pass_threshold: default_pass_threshold(),
            pass_fraction: None,
            trial_count: default_trial_count(),
            test_count: default_test_count(),
            labels: CategoryLabels::default(),
        }
    }
}

impl CivicprepConfig {
    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            trial_count: self.trial_count,
            test_count: self.test_count,
        }
    }

    pub fn pass_policy(&self) -> PassPolicy {
        match self.pass_fraction {
            Some(fraction) => PassPolicy::Fraction(fraction),
            None => PassPolicy::Absolute(self.pass_threshold),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `civicprep.toml` in the current directory
/// 2. `~/.config/civicprep/config.toml`
///
/// `CIVICPREP_CONTENT_DIR` overrides `content_dir`.
pub fn load_config() -> Result<CivicprepConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CivicprepConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => default_config_path(),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CivicprepConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            if let Some(fraction) = config.pass_fraction {
                anyhow::ensure!(
                    config.pass_policy().is_valid(),
                    "invalid config {}: pass_fraction must be between 0.0 and 1.0, got {fraction}",
                    path.display()
                );
            }
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => CivicprepConfig::default(),
    };

    if let Ok(dir) = std::env::var(CONTENT_DIR_ENV) {
        config.content_dir = PathBuf::from(dir);
    }
    let resolved = resolve_env_vars(&config.content_dir.to_string_lossy());
    config.content_dir = PathBuf::from(resolved);

    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("civicprep.toml");
    if local.exists() {
        return Some(local);
    }
    let global = dirs_path()?.join("config.toml");
    global.exists().then_some(global)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("civicprep"))
}

/// Starter configuration written by `civicprep init`.
pub const STARTER_CONFIG: &str = r#"# civicprep configuration

# Root of the content tree: questions/<locale>/{gov,history,civics}.json,
# grammar/<locale>/grammar.json and glossary/glossary.json.
content_dir = "./content"

# en, es or zh
default_locale = "en"

# Correct answers needed to pass a simulated test.
pass_threshold = 12
# pass_fraction = 0.6

trial_count = 10
test_count = 20

# Category labels must match the `category` field of the content items.
# [labels.en]
# gov = "American Government"
# history = "American History"
# civics = "Integrated Civics"
"#;
