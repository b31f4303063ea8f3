//! Career Agent — sequences finding, scoring, and recommending into one
//! workflow and assembles the user-facing report.
//!
//! Stages run strictly in order: Start → Finding → Analyzing (per job) →
//! Recommending (only for jobs with gaps) → Done. Any failure after Start is
//! caught here and turned into an `Error` report; callers never see a raw error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::catalog::finder::find_jobs;
use crate::catalog::JobSource;
use crate::errors::AppError;
use crate::matching::recommender::{Recommendation, ResourceRecommender};
use crate::matching::scoring::Scorer;

const EMPTY_SKILLS_MESSAGE: &str = "Please provide a list of skills.";
const NO_JOBS_MESSAGE: &str = "No suitable job listings were found with your current skills.";
const FAULT_MESSAGE: &str = "An error occurred while matching jobs to your skills.";

// ────────────────────────────────────────────────────────────────────────────
// Report model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportStatus {
    Success,
    NoJobsFound,
    Error,
}

/// Why an `Error` report was produced. Drives the HTTP status, not serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UserInput,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMatch {
    pub title: String,
    pub company: String,
    pub match_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_gaps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_plan: Option<Vec<Recommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub status: ReportStatus,
    pub matches: Vec<JobMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl Report {
    fn success(matches: Vec<JobMatch>) -> Self {
        Self {
            status: ReportStatus::Success,
            matches,
            report: None,
            failure: None,
        }
    }

    fn no_jobs() -> Self {
        Self {
            status: ReportStatus::NoJobsFound,
            matches: vec![],
            report: Some(NO_JOBS_MESSAGE.to_string()),
            failure: None,
        }
    }

    fn failed(kind: FailureKind, message: &str) -> Self {
        Self {
            status: ReportStatus::Error,
            matches: vec![],
            report: Some(message.to_string()),
            failure: Some(kind),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct CareerAgent {
    scorer: Arc<dyn Scorer>,
    recommender: Arc<dyn ResourceRecommender>,
}

impl CareerAgent {
    pub fn new(scorer: Arc<dyn Scorer>, recommender: Arc<dyn ResourceRecommender>) -> Self {
        Self {
            scorer,
            recommender,
        }
    }

    pub async fn run_workflow(&self, profile: &UserProfile, jobs: &dyn JobSource) -> Report {
        let skills = normalize_skills(&profile.skills);
        if skills.is_empty() {
            debug!("Workflow rejected: no skills supplied");
            return Report::failed(FailureKind::UserInput, EMPTY_SKILLS_MESSAGE);
        }

        info!(
            "Workflow started: {} skills, goal={}, scorer={}",
            skills.len(),
            profile.goal.as_deref().unwrap_or("none"),
            self.scorer.backend()
        );

        match self.match_jobs(&skills, jobs).await {
            Ok(report) => {
                info!(
                    "Workflow complete: {:?} with {} matches",
                    report.status,
                    report.matches.len()
                );
                report
            }
            Err(e) => {
                error!("Workflow failed: {e}");
                Report::failed(FailureKind::Unexpected, FAULT_MESSAGE)
            }
        }
    }

    async fn match_jobs(&self, skills: &[String], jobs: &dyn JobSource) -> Result<Report, AppError> {
        let catalog = jobs.snapshot()?;
        let found = find_jobs(skills, &catalog);
        debug!("Found {} of {} postings", found.len(), catalog.len());

        if found.is_empty() {
            return Ok(Report::no_jobs());
        }

        let mut matches = Vec::with_capacity(found.len());
        for job in &found {
            let analysis = self.scorer.score(skills, job).await?;

            let mut job_match = JobMatch {
                title: job.title.clone(),
                company: job.company.clone(),
                match_score: analysis.match_score,
                skill_gaps: None,
                learning_plan: None,
                analysis_note: analysis.note,
            };

            if !analysis.skill_gaps.is_empty() {
                let plan = self.recommender.recommend(&analysis.skill_gaps).await?;
                job_match.skill_gaps = Some(analysis.skill_gaps);
                job_match.learning_plan = Some(plan);
            }

            matches.push(job_match);
        }

        Ok(Report::success(matches))
    }
}

/// Trims names, drops blanks, and removes repeats while keeping first-seen order.
fn normalize_skills(raw: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}
