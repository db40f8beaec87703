use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use common::helper::error_chain_fmt;
use tracing::{error, info, warn};

use super::error_response;
use crate::{
    domain::entities::{
        sentiment::Sentiment,
        submitted_text::{SubmittedText, SubmittedTextError},
    },
    ports::{sentiment_repository::SentimentRepository, sentiment_scorer::SentimentScorer},
};

/// Scores the sentiment of a text and stores both
///
/// Nothing is stored if the text is empty or if scoring fails.
#[tracing::instrument(name = "Analyze text handler", skip(repository, scorer, body))]
pub async fn analyze_text(
    repository: web::Data<dyn SentimentRepository>,
    scorer: web::Data<dyn SentimentScorer>,
    body: web::Json<AnalyzeTextBodyData>,
) -> Result<HttpResponse, AnalyzeTextError> {
    let AnalyzeTextBodyData { text } = body.into_inner();

    let text = SubmittedText::parse(text.as_deref().unwrap_or_default()).map_err(|error| {
        warn!("No text input provided");
        AnalyzeTextError::ValidationError(error)
    })?;

    let sentiment = scorer
        .score(&text)
        .context("Failed to score the text sentiment")?;

    let record = repository
        .insert_text(&text, sentiment)
        .await
        .context("Failed to store the text and its sentiment")?;

    info!(text_id = %record.id, "Sentiment analysis and data storage successful");
    Ok(HttpResponse::Ok().json(AnalyzeTextResponse {
        text: record.text,
        sentiment: record.sentiment,
        id: record.id.to_string(),
    }))
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct AnalyzeTextBodyData {
    pub text: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct AnalyzeTextResponse {
    pub text: String,
    pub sentiment: Sentiment,
    pub id: String,
}

#[derive(thiserror::Error)]
pub enum AnalyzeTextError {
    #[error("{0}")]
    ValidationError(#[from] SubmittedTextError),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AnalyzeTextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AnalyzeTextError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeTextError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AnalyzeTextError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            AnalyzeTextError::ValidationError(_) => {
                error_response(self.status_code(), &self.to_string())
            }
            AnalyzeTextError::InternalError(_) => {
                // The cause is only logged, callers get an opaque message
                error!(error = ?self, "Error in /analyze/");
                error_response(
                    self.status_code(),
                    "An error occurred while analyzing the text.",
                )
            }
        }
    }
}
