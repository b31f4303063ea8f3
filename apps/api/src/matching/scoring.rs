//! Skill Analyzer — pluggable, trait-based scorer that measures a skill set
//! against the reference taxonomy.
//!
//! Default: `TaxonomyScorer` (pure-Rust, deterministic, fully testable).
//! Alternative: `RemoteScorer` (external scoring service with a bounded timeout).
//!
//! `CareerAgent` holds an `Arc<dyn Scorer>`, chosen at startup via config.
//!
//! Every job is scored against the same taxonomy; the job description is
//! passed through so a service-backed scorer can use it.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::JobPosting;
use crate::errors::AppError;
use crate::scoring_client::{AnalyzeRequest, AnalyzeResponse, ScoringClient};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Ordered reference list of required skills. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTaxonomy {
    skills: Vec<String>,
}

impl SkillTaxonomy {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for skill in skills.into_iter().map(Into::<String>::into) {
            if !unique.contains(&skill) {
                unique.push(skill);
            }
        }
        Self { skills: unique }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Score and gaps for one (skill set, job) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: u8, // 0 – 100
    pub skill_gaps: Vec<String>,
    /// Set only when the result is degraded (scoring service unavailable).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the orchestrator.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, user_skills: &[String], job: &JobPosting)
        -> Result<MatchResult, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// TaxonomyScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct TaxonomyScorer {
    taxonomy: SkillTaxonomy,
}

impl TaxonomyScorer {
    pub fn new(taxonomy: SkillTaxonomy) -> Self {
        Self { taxonomy }
    }
}

#[async_trait]
impl Scorer for TaxonomyScorer {
    async fn score(
        &self,
        user_skills: &[String],
        _job: &JobPosting,
    ) -> Result<MatchResult, AppError> {
        Ok(analyze(user_skills, &self.taxonomy))
    }

    fn backend(&self) -> &'static str {
        "taxonomy"
    }
}

/// Core taxonomy match.
///
/// 1. match_count = taxonomy skills present in `user_skills` (exact, case-sensitive)
/// 2. match_score = floor(match_count / |taxonomy| × 100), or 0 for an empty taxonomy
/// 3. skill_gaps = taxonomy skills the user lacks, in taxonomy order
pub fn analyze<S: AsRef<str>>(user_skills: &[S], taxonomy: &SkillTaxonomy) -> MatchResult {
    let owned: HashSet<&str> = user_skills.iter().map(|s| s.as_ref()).collect();

    let (matched, gaps): (Vec<&String>, Vec<&String>) = taxonomy
        .skills()
        .iter()
        .partition(|skill| owned.contains(skill.as_str()));

    let match_score = if taxonomy.is_empty() {
        0
    } else {
        (matched.len() * 100 / taxonomy.len()) as u8
    };

    MatchResult {
        match_score,
        skill_gaps: gaps.into_iter().cloned().collect(),
        note: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteScorer — external scoring service
// ────────────────────────────────────────────────────────────────────────────

const DEGRADED_NOTE: &str =
    "Skill analysis service unavailable; score not computed and all unconfirmed taxonomy skills are listed as gaps.";

/// Scores through the external service. Never hangs past `timeout` and never
/// fails: an unreachable or misbehaving service yields a degraded result.
pub struct RemoteScorer {
    client: ScoringClient,
    taxonomy: SkillTaxonomy,
    timeout: Duration,
}

impl RemoteScorer {
    pub fn new(client: ScoringClient, taxonomy: SkillTaxonomy, timeout: Duration) -> Self {
        Self {
            client,
            taxonomy,
            timeout,
        }
    }
}

#[async_trait]
impl Scorer for RemoteScorer {
    async fn score(
        &self,
        user_skills: &[String],
        job: &JobPosting,
    ) -> Result<MatchResult, AppError> {
        let request = AnalyzeRequest {
            user_skills,
            job_description: &job.description,
            taxonomy: self.taxonomy.skills(),
        };

        match tokio::time::timeout(self.timeout, self.client.analyze(&request)).await {
            Ok(Ok(response)) => Ok(sanitize(response, user_skills)),
            Ok(Err(e)) => {
                warn!("Scoring service failed for '{}': {e}", job.title);
                Ok(degraded(user_skills, &self.taxonomy))
            }
            Err(_) => {
                warn!(
                    "Scoring service timed out after {}ms for '{}'",
                    self.timeout.as_millis(),
                    job.title
                );
                Ok(degraded(user_skills, &self.taxonomy))
            }
        }
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

/// Clamps the score and drops duplicate gaps or gaps the user already has.
fn sanitize(response: AnalyzeResponse, user_skills: &[String]) -> MatchResult {
    let mut skill_gaps: Vec<String> = Vec::new();
    for gap in response.skill_gaps {
        if !user_skills.contains(&gap) && !skill_gaps.contains(&gap) {
            skill_gaps.push(gap);
        }
    }

    MatchResult {
        match_score: response.match_score.clamp(0, 100) as u8,
        skill_gaps,
        note: None,
    }
}

fn degraded(user_skills: &[String], taxonomy: &SkillTaxonomy) -> MatchResult {
    MatchResult {
        match_score: 0,
        skill_gaps: analyze(user_skills, taxonomy).skill_gaps,
        note: Some(DEGRADED_NOTE.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::posting;
    use crate::config::default_taxonomy;

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::new(default_taxonomy())
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_data_scientist_scenario() {
        let result = analyze(&["Python", "SQL", "Machine Learning"], &taxonomy());
        assert_eq!(result.match_score, 50);
        assert_eq!(result.skill_gaps, vec!["Data Analysis", "AI", "Algorithms"]);
        assert!(result.note.is_none());
    }

    #[test]
    fn test_score_floors() {
        // 1/6 = 16.66…
        assert_eq!(analyze(&["AI"], &taxonomy()).match_score, 16);
        // 5/6 = 83.33…
        let five = ["Python", "Data Analysis", "SQL", "Machine Learning", "AI"];
        assert_eq!(analyze(&five, &taxonomy()).match_score, 83);
    }

    #[test]
    fn test_full_match_scores_100_with_no_gaps() {
        let result = analyze(&default_taxonomy(), &taxonomy());
        assert_eq!(result.match_score, 100);
        assert!(result.skill_gaps.is_empty());
    }

    #[test]
    fn test_empty_taxonomy_scores_zero() {
        let result = analyze(&["Python"], &SkillTaxonomy::default());
        assert_eq!(result.match_score, 0);
        assert!(result.skill_gaps.is_empty());
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let result = analyze(&["python", "sql"], &taxonomy());
        assert_eq!(result.match_score, 0);
        assert_eq!(result.skill_gaps.len(), 6);
    }

    #[test]
    fn test_duplicate_user_skills_count_once() {
        let result = analyze(&["Python", "Python", "Python"], &taxonomy());
        assert_eq!(result.match_score, 16);
    }

    #[test]
    fn test_score_monotonic_as_taxonomy_skills_added() {
        let mut owned: Vec<String> = vec!["Communication".to_string()];
        let mut last = analyze(&owned, &taxonomy()).match_score;
        for skill in default_taxonomy() {
            owned.push(skill);
            let next = analyze(&owned, &taxonomy()).match_score;
            assert!(next >= last, "score dropped from {last} to {next}");
            assert!(next <= 100);
            last = next;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_gaps_partition_taxonomy() {
        let owned = ["Algorithms", "Communication", "SQL"];
        let result = analyze(&owned, &taxonomy());

        for gap in &result.skill_gaps {
            assert!(!owned.contains(&gap.as_str()));
        }

        let mut union: Vec<String> = result.skill_gaps.clone();
        union.extend(
            owned
                .iter()
                .filter(|s| taxonomy().skills().iter().any(|t| t.as_str() == **s))
                .map(|s| s.to_string()),
        );
        union.sort();
        let mut expected = default_taxonomy();
        expected.sort();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_taxonomy_dedups_preserving_order() {
        let t = SkillTaxonomy::new(["SQL", "Python", "SQL"]);
        assert_eq!(t.skills(), &["SQL".to_string(), "Python".to_string()]);
    }

    #[test]
    fn test_sanitize_clamps_and_filters() {
        let response = AnalyzeResponse {
            match_score: 250,
            skill_gaps: skills(&["Python", "Go", "Go", "Kafka"]),
        };
        let result = sanitize(response, &skills(&["Python"]));
        assert_eq!(result.match_score, 100);
        assert_eq!(result.skill_gaps, vec!["Go", "Kafka"]);

        let negative = AnalyzeResponse {
            match_score: -5,
            skill_gaps: vec![],
        };
        assert_eq!(sanitize(negative, &[]).match_score, 0);
    }

    #[test]
    fn test_degraded_result_shape() {
        let result = degraded(&skills(&["Python"]), &taxonomy());
        assert_eq!(result.match_score, 0);
        assert_eq!(result.skill_gaps.len(), 5);
        assert!(!result.skill_gaps.contains(&"Python".to_string()));
        assert!(result.note.is_some());
    }

    #[tokio::test]
    async fn test_taxonomy_scorer_ignores_description() {
        let scorer = TaxonomyScorer::new(taxonomy());
        let a = scorer
            .score(&skills(&["Python"]), &posting("A", "X", "Python"))
            .await
            .unwrap();
        let b = scorer
            .score(&skills(&["Python"]), &posting("B", "Y", "Nothing relevant"))
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(scorer.backend(), "taxonomy");
    }

    // ── RemoteScorer against a local stub service ──────────────────────────

    async fn spawn_stub(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn remote(base_url: &str, timeout: Duration) -> RemoteScorer {
        RemoteScorer::new(
            ScoringClient::new(base_url, timeout).unwrap(),
            taxonomy(),
            timeout,
        )
    }

    #[tokio::test]
    async fn test_remote_scorer_uses_service_answer() {
        use axum::{routing::post, Json};
        use serde_json::{json, Value};

        let router = axum::Router::new().route(
            "/analyze",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["job_description"], "Rust and Kafka");
                Json(json!({"match_score": 70, "skill_gaps": ["Kafka"]}))
            }),
        );
        let base = spawn_stub(router).await;

        let result = remote(&base, Duration::from_secs(5))
            .score(&skills(&["Rust"]), &posting("Backend", "X", "Rust and Kafka"))
            .await
            .unwrap();
        assert_eq!(result.match_score, 70);
        assert_eq!(result.skill_gaps, vec!["Kafka"]);
        assert!(result.note.is_none());
    }

    #[tokio::test]
    async fn test_remote_scorer_degrades_on_timeout() {
        use axum::{routing::post, Json};
        use serde_json::json;

        let router = axum::Router::new().route(
            "/analyze",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"match_score": 100, "skill_gaps": []}))
            }),
        );
        let base = spawn_stub(router).await;

        let result = remote(&base, Duration::from_millis(100))
            .score(&skills(&["Python"]), &posting("Slow", "X", "Python"))
            .await
            .unwrap();
        assert_eq!(result.match_score, 0);
        assert!(result.note.is_some());
        assert!(!result.skill_gaps.contains(&"Python".to_string()));
    }

    #[tokio::test]
    async fn test_remote_scorer_degrades_on_client_error() {
        use axum::{http::StatusCode, routing::post};

        let router =
            axum::Router::new().route("/analyze", post(|| async { StatusCode::BAD_REQUEST }));
        let base = spawn_stub(router).await;

        let result = remote(&base, Duration::from_secs(5))
            .score(&skills(&[]), &posting("Bad", "X", "anything"))
            .await
            .unwrap();
        assert_eq!(result.match_score, 0);
        assert_eq!(result.skill_gaps, default_taxonomy());
    }
}
