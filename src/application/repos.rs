//! Source traits describing where post records come from.
//!
//! The content pipeline that authors and parses posts lives outside this
//! crate; a [`ContentRepo`] hands over its already-materialized output.

use thiserror::Error;

use crate::domain::categories::CategoryCount;
use crate::domain::posts::Post;
use crate::domain::site::SiteProfile;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("source error: {0}")]
    Source(String),
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl RepoError {
    pub fn from_source(err: impl std::fmt::Display) -> Self {
        Self::Source(err.to_string())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub trait ContentRepo: Send + Sync {
    /// The full post sequence, date-descending. Order is part of the
    /// contract: consumers never re-sort it.
    fn posts(&self) -> Result<&[Post], RepoError>;

    /// Per-category totals, one entry per distinct category, ordered by
    /// first appearance in the post sequence.
    fn category_counts(&self) -> Result<&[CategoryCount], RepoError>;

    fn profile(&self) -> Result<&SiteProfile, RepoError>;
}
