use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::matching::agent::CareerAgent;
use crate::matching::recommender::ResourceRecommender;
use crate::matching::resume::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Current job catalog snapshot; swapped atomically on reload.
    pub catalog: Arc<CatalogStore>,
    pub agent: Arc<CareerAgent>,
    /// Same recommender the agent uses; also backs `learning_resources`.
    pub recommender: Arc<dyn ResourceRecommender>,
    pub vocabulary: Arc<SkillVocabulary>,
    pub config: Config,
}
