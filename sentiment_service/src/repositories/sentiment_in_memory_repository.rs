use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::entities::{
        image_record::ImageRecord, sentiment::Sentiment, submitted_text::SubmittedText,
        text_record::TextRecord,
    },
    ports::sentiment_repository::{SentimentRepository, SentimentRepositoryError},
};

/// Sentiment repository keeping records in process memory
///
/// Records are lost when the process stops. Used for local runs and tests.
#[derive(Debug, Default)]
pub struct SentimentInMemoryRepository {
    texts: RwLock<Vec<TextRecord>>,
    images: RwLock<Vec<ImageRecord>>,
}

impl SentimentInMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the stored text records, oldest first
    pub async fn text_records(&self) -> Vec<TextRecord> {
        self.texts.read().await.clone()
    }

    /// Copy of the stored chart records, oldest first
    pub async fn image_records(&self) -> Vec<ImageRecord> {
        self.images.read().await.clone()
    }
}

#[async_trait]
impl SentimentRepository for SentimentInMemoryRepository {
    #[tracing::instrument(name = "Saving new text in memory", skip(self, text))]
    async fn insert_text(
        &self,
        text: &SubmittedText,
        sentiment: Sentiment,
    ) -> Result<TextRecord, SentimentRepositoryError> {
        let record = TextRecord::builder()
            .text(text.to_string())
            .sentiment(sentiment)
            .build();

        self.texts.write().await.push(record.clone());
        Ok(record)
    }

    #[tracing::instrument(name = "Fetching text from memory", skip(self))]
    async fn get_text_record(&self, id: Uuid) -> Result<TextRecord, SentimentRepositoryError> {
        self.texts
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(SentimentRepositoryError::TextNotFound(id))
    }

    #[tracing::instrument(name = "Fetching all sentiments from memory", skip(self))]
    async fn list_sentiments(&self) -> Result<Vec<Sentiment>, SentimentRepositoryError> {
        Ok(self
            .texts
            .read()
            .await
            .iter()
            .map(|record| record.sentiment)
            .collect())
    }

    #[tracing::instrument(name = "Saving new chart in memory", skip(self, image_bytes))]
    async fn insert_image(
        &self,
        text_id: Uuid,
        image_bytes: Vec<u8>,
    ) -> Result<ImageRecord, SentimentRepositoryError> {
        let record = ImageRecord::builder()
            .text_id(text_id)
            .image_bytes(image_bytes)
            .build();

        self.images.write().await.push(record.clone());
        Ok(record)
    }
}
