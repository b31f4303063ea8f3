//! Learning Recommender — maps skill gaps to learning resources.
//!
//! `StaticRecommender` answers from a curated table and falls back to generic
//! suggestions; a search- or service-backed recommender can replace it behind
//! the `ResourceRecommender` trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One learning-plan entry: a gap skill and the resource suggested for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    pub resource: String,
}

/// A linkable resource, as returned by `POST /api/learning_resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
}

struct CuratedResource {
    skill: &'static str,
    title: &'static str,
}

const CURATED_RESOURCES: &[CuratedResource] = &[
    CuratedResource {
        skill: "Python",
        title: "Coursera: Python for Everybody",
    },
    CuratedResource {
        skill: "Data Analysis",
        title: "DataCamp: Data Analyst with Python",
    },
    CuratedResource {
        skill: "SQL",
        title: "Udemy: The Complete SQL Bootcamp",
    },
    CuratedResource {
        skill: "Machine Learning",
        title: "Coursera: Machine Learning by Andrew Ng",
    },
    CuratedResource {
        skill: "AI",
        title: "IBM SkillsBuild: Getting Started with AI",
    },
];

fn curated(skill: &str) -> Option<&'static CuratedResource> {
    CURATED_RESOURCES.iter().find(|r| r.skill == skill)
}

/// Skills the curated table knows about, in table order.
pub fn curated_skills() -> impl Iterator<Item = &'static str> {
    CURATED_RESOURCES.iter().map(|r| r.skill)
}

#[async_trait]
pub trait ResourceRecommender: Send + Sync {
    /// One recommendation per gap, in gap order.
    async fn recommend(&self, skill_gaps: &[String]) -> Result<Vec<Recommendation>, AppError>;

    /// Generic linkable resources for a single named skill.
    async fn resources_for(&self, skill: &str) -> Result<Vec<LearningResource>, AppError>;
}

pub struct StaticRecommender {
    base_url: String,
}

impl StaticRecommender {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ResourceRecommender for StaticRecommender {
    async fn recommend(&self, skill_gaps: &[String]) -> Result<Vec<Recommendation>, AppError> {
        Ok(recommend(skill_gaps))
    }

    async fn resources_for(&self, skill: &str) -> Result<Vec<LearningResource>, AppError> {
        Ok(generic_resources(skill, &self.base_url))
    }
}

/// Table lookup per gap, falling back to "Online resources for {skill}".
pub fn recommend<S: AsRef<str>>(skill_gaps: &[S]) -> Vec<Recommendation> {
    skill_gaps
        .iter()
        .map(|gap| {
            let skill = gap.as_ref();
            let resource = curated(skill)
                .map(|r| r.title.to_string())
                .unwrap_or_else(|| format!("Online resources for {skill}"));
            Recommendation {
                skill: skill.to_string(),
                resource,
            }
        })
        .collect()
}

/// The three templated entries offered for any skill, curated or not.
/// The skill name goes into the URL as given.
pub fn generic_resources(skill: &str, base_url: &str) -> Vec<LearningResource> {
    let skill = skill.trim();
    vec![
        LearningResource {
            title: format!("Intro to {skill}"),
            url: format!("{base_url}/{skill}-intro"),
        },
        LearningResource {
            title: format!("Advanced {skill} Course"),
            url: format!("{base_url}/{skill}-advanced"),
        },
        LearningResource {
            title: format!("Certification in {skill}"),
            url: format!("{base_url}/{skill}-cert"),
        },
    ]
}
