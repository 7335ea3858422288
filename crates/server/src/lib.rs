//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the orchestrator that turns a selected title into a
//! renderable page: backdrop, ranked neighbours and their posters.

pub mod orchestrator;

pub use orchestrator::{
    movie_page_url, MovieRecommendation, RecommendationOrchestrator, RecommendationPage,
};
