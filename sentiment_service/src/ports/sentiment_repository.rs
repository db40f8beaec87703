use async_trait::async_trait;
use common::helper::error_chain_fmt;
use uuid::Uuid;

use crate::domain::entities::{
    image_record::ImageRecord,
    sentiment::{Sentiment, SentimentError},
    submitted_text::SubmittedText,
    text_record::TextRecord,
};

/// Document store holding text records and the charts rendered from them
///
/// Ids are generated by the store on insert.
#[async_trait]
pub trait SentimentRepository: Send + Sync {
    async fn insert_text(
        &self,
        text: &SubmittedText,
        sentiment: Sentiment,
    ) -> Result<TextRecord, SentimentRepositoryError>;

    /// Fails with `TextNotFound` if no text record has the given id
    async fn get_text_record(&self, id: Uuid) -> Result<TextRecord, SentimentRepositoryError>;

    /// Sentiments of every stored text, oldest first
    async fn list_sentiments(&self) -> Result<Vec<Sentiment>, SentimentRepositoryError>;

    async fn insert_image(
        &self,
        text_id: Uuid,
        image_bytes: Vec<u8>,
    ) -> Result<ImageRecord, SentimentRepositoryError>;
}

#[derive(thiserror::Error)]
pub enum SentimentRepositoryError {
    #[error("No text record with id {0}")]
    TextNotFound(Uuid),
    #[error(transparent)]
    DBError(#[from] sqlx::Error),
    #[error("Stored sentiment is invalid: {0}")]
    InvalidStoredSentiment(#[from] SentimentError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for SentimentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
