use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::entities::{
        image_record::ImageRecord, sentiment::Sentiment, submitted_text::SubmittedText,
        text_record::TextRecord,
    },
    ports::sentiment_repository::{SentimentRepository, SentimentRepositoryError},
};

/// Sentiment repository implemented using Postgres
///
/// Texts are stored in the `texts` table, rendered charts in the `images` table.
pub struct SentimentPostgresRepository {
    pg_pool: PgPool,
}

impl SentimentPostgresRepository {
    pub fn new(pg_pool: PgPool) -> Self {
        Self { pg_pool }
    }
}

#[async_trait]
impl SentimentRepository for SentimentPostgresRepository {
    #[tracing::instrument(name = "Saving new text in database", skip(self, text))]
    async fn insert_text(
        &self,
        text: &SubmittedText,
        sentiment: Sentiment,
    ) -> Result<TextRecord, SentimentRepositoryError> {
        let record = TextRecord::builder()
            .text(text.to_string())
            .sentiment(sentiment)
            .build();

        sqlx::query(
            r#"
    INSERT INTO texts (id, text, polarity, subjectivity, created_at)
    VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.text)
        .bind(record.sentiment.polarity())
        .bind(record.sentiment.subjectivity())
        .bind(record.created_at)
        .execute(&self.pg_pool)
        .await?;

        info!(text_id = %record.id, "Saved text");
        Ok(record)
    }

    #[tracing::instrument(name = "Fetching text from database", skip(self))]
    async fn get_text_record(&self, id: Uuid) -> Result<TextRecord, SentimentRepositoryError> {
        let row: Option<(Uuid, String, f64, f64, DateTime<Utc>)> = sqlx::query_as(
            r#"
    SELECT id, text, polarity, subjectivity, created_at FROM texts
    WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pg_pool)
        .await?;

        let (id, text, polarity, subjectivity, created_at) =
            row.ok_or(SentimentRepositoryError::TextNotFound(id))?;

        Ok(TextRecord::builder()
            .id(id)
            .text(text)
            .sentiment(Sentiment::new(polarity, subjectivity)?)
            .created_at(created_at)
            .build())
    }

    #[tracing::instrument(name = "Fetching all sentiments from database", skip(self))]
    async fn list_sentiments(&self) -> Result<Vec<Sentiment>, SentimentRepositoryError> {
        let rows: Vec<(f64, f64)> = sqlx::query_as(
            r#"
    SELECT polarity, subjectivity FROM texts
    ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pg_pool)
        .await?;

        let sentiments = rows
            .into_iter()
            .map(|(polarity, subjectivity)| Sentiment::new(polarity, subjectivity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sentiments)
    }

    #[tracing::instrument(name = "Saving new chart in database", skip(self, image_bytes))]
    async fn insert_image(
        &self,
        text_id: Uuid,
        image_bytes: Vec<u8>,
    ) -> Result<ImageRecord, SentimentRepositoryError> {
        let record = ImageRecord::builder()
            .text_id(text_id)
            .image_bytes(image_bytes)
            .build();

        sqlx::query(
            r#"
    INSERT INTO images (id, text_id, image_bytes, created_at)
    VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(record.text_id)
        .bind(&record.image_bytes)
        .bind(record.created_at)
        .execute(&self.pg_pool)
        .await?;

        info!(image_id = %record.id, %text_id, "Saved chart");
        Ok(record)
    }
}
