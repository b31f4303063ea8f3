/// Scoring Client — the single point of entry for calls to the external
/// skill-scoring service.
///
/// No other module talks to the scoring service directly; `RemoteScorer`
/// wraps this client and owns the timeout/fallback policy.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANALYZE_PATH: &str = "/analyze";
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ScoringClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Scoring service still failing after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub user_skills: &'a [String],
    pub job_description: &'a str,
    pub taxonomy: &'a [String],
}

/// Raw service answer. Not trusted: `RemoteScorer` sanitises it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub match_score: i64,
    #[serde(default)]
    pub skill_gaps: Vec<String>,
}

#[derive(Clone)]
pub struct ScoringClient {
    client: Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ScoringClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POSTs one analysis request. Retries on 429 and 5xx with exponential
    /// backoff; any other non-success status fails immediately.
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest<'_>,
    ) -> Result<AnalyzeResponse, ScoringClientError> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let mut last_error: Option<ScoringClientError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(BASE_BACKOFF_MS * (1 << (attempt - 1)));
                warn!(
                    "Scoring call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(request).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ScoringClientError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Scoring service returned {}: {}", status, body);
                last_error = Some(ScoringClientError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ScoringClientError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: AnalyzeResponse = response.json().await?;
            debug!(
                "Scoring call succeeded: score={}, gaps={}",
                parsed.match_score,
                parsed.skill_gaps.len()
            );
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(ScoringClientError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}
