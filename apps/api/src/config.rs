use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::analysis::AnalysisConfig;
use crate::layout::TemplateSpec;

/// Application configuration loaded from environment variables.
/// Every key is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on one prose-source call.
    pub prose_timeout_ms: u64,
    /// Template used when a render request names none.
    pub default_template: TemplateSpec,
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            prose_timeout_ms: 15_000,
            default_template: TemplateSpec::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let mut analysis = defaults.analysis;

        let weights = &mut analysis.scoring.weights;
        weights.verb = parse_or(&lookup, "SCORE_WEIGHT_VERB", weights.verb)?;
        weights.keyword = parse_or(&lookup, "SCORE_WEIGHT_KEYWORD", weights.keyword)?;
        weights.length = parse_or(&lookup, "SCORE_WEIGHT_LENGTH", weights.length)?;
        weights.validate().map_err(|e| anyhow!(e))?;

        analysis.quick_win_limit = parse_or(&lookup, "QUICK_WIN_LIMIT", analysis.quick_win_limit)?;
        analysis.max_jd_keywords = parse_or(&lookup, "MAX_JD_KEYWORDS", analysis.max_jd_keywords)?;

        let default_template = match lookup("DEFAULT_TEMPLATE") {
            Some(raw) => raw
                .parse::<TemplateSpec>()
                .map_err(|e| anyhow!(e))
                .context("DEFAULT_TEMPLATE must name a template")?,
            None => defaults.default_template,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            prose_timeout_ms: parse_or(&lookup, "PROSE_TIMEOUT_MS", defaults.prose_timeout_ms)?,
            default_template,
            analysis,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
