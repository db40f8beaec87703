use common::helper::error_chain_fmt;

use crate::domain::entities::{
    sentiment::{Sentiment, SentimentError},
    submitted_text::SubmittedText,
};

/// Computes the sentiment of a text
///
/// Implementations must be deterministic: the same text always gets the same sentiment.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &SubmittedText) -> Result<Sentiment, SentimentScorerError>;
}

#[derive(thiserror::Error)]
pub enum SentimentScorerError {
    #[error("Computed sentiment is invalid: {0}")]
    InvalidSentiment(#[from] SentimentError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for SentimentScorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
