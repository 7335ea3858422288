//! Errors raised while resolving a recommendation query.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// No catalog entry carries exactly this title
    #[error("Title not found in catalog: {title}")]
    NotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RankError>;
