// Skill matching pipeline: taxonomy scoring, learning recommendations, the
// orchestrating agent, and the HTTP handlers in front of it.
// External scoring goes through scoring_client only.

pub mod agent;
pub mod handlers;
pub mod recommender;
pub mod resume;
pub mod scoring;
