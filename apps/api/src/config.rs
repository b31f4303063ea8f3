use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Reference skills used when `SKILL_TAXONOMY` is not set.
pub const DEFAULT_TAXONOMY: [&str; 6] = [
    "Python",
    "Data Analysis",
    "SQL",
    "Machine Learning",
    "AI",
    "Algorithms",
];

/// Which `Scorer` implementation backs the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorerBackend {
    Static,
    Remote { service_url: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub job_catalog_path: PathBuf,
    pub skill_taxonomy: Vec<String>,
    pub scorer_backend: ScorerBackend,
    pub scoring_timeout: Duration,
    pub resource_base_url: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let scorer_backend = match optional_env("SCORER_BACKEND")
            .unwrap_or_else(|| "static".to_string())
            .to_lowercase()
            .as_str()
        {
            "static" => ScorerBackend::Static,
            "remote" => ScorerBackend::Remote {
                service_url: require_env("SCORING_SERVICE_URL")?,
            },
            other => bail!("SCORER_BACKEND must be 'static' or 'remote', got '{other}'"),
        };

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            job_catalog_path: optional_env("JOB_CATALOG_PATH")
                .unwrap_or_else(|| "mock_job_db.json".to_string())
                .into(),
            skill_taxonomy: optional_env("SKILL_TAXONOMY")
                .map(|raw| parse_taxonomy(&raw))
                .unwrap_or_else(default_taxonomy),
            scorer_backend,
            scoring_timeout: Duration::from_secs(
                parse_env("SCORING_TIMEOUT_SECS", 10)
                    .context("SCORING_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            resource_base_url: optional_env("RESOURCE_BASE_URL")
                .unwrap_or_else(|| "https://example.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

pub fn default_taxonomy() -> Vec<String> {
    DEFAULT_TAXONOMY.iter().map(|s| s.to_string()).collect()
}

/// Splits a comma-separated list, dropping blanks and repeated names.
pub fn parse_taxonomy(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
