use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use common::helper::error_chain_fmt;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error_response;
use crate::ports::{
    chart_renderer::ChartRenderer,
    sentiment_repository::{SentimentRepository, SentimentRepositoryError},
};

/// Renders the chart of a stored text sentiment, stores it and returns it
///
/// A new chart record is stored on each call, even for the same text.
#[tracing::instrument(name = "Sentiment graph handler", skip(repository, renderer))]
pub async fn sentiment_graph(
    repository: web::Data<dyn SentimentRepository>,
    renderer: web::Data<dyn ChartRenderer>,
    query: web::Query<SentimentGraphQueryData>,
) -> Result<HttpResponse, SentimentGraphError> {
    let text_id = query.into_inner().text_id.unwrap_or_default();

    if text_id.trim().is_empty() {
        warn!("No text ID provided for graph generation");
        return Err(SentimentGraphError::MissingTextId);
    }

    // Ids are only ever issued as UUIDs
    let id = Uuid::parse_str(&text_id).map_err(|_| {
        warn!(text_id, "Graph requested for a malformed text ID");
        SentimentGraphError::TextNotFound(text_id.clone())
    })?;

    let record = repository
        .get_text_record(id)
        .await
        .map_err(|error| match error {
            SentimentRepositoryError::TextNotFound(_) => {
                warn!(text_id, "Graph requested for an unknown text ID");
                SentimentGraphError::TextNotFound(text_id.clone())
            }
            _ => SentimentGraphError::InternalError(
                anyhow::Error::from(error).context("Failed to fetch the text record"),
            ),
        })?;

    let chart = renderer
        .render_sentiment(&record.sentiment)
        .context("Failed to render the sentiment chart")?;

    repository
        .insert_image(id, chart.clone())
        .await
        .context("Failed to store the sentiment chart")?;

    info!(text_id = %id, "Sentiment graph generated and stored successfully");
    Ok(HttpResponse::Ok()
        .content_type(renderer.content_type())
        .body(chart))
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SentimentGraphQueryData {
    pub text_id: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SentimentGraphError {
    #[error("Text ID is required.")]
    MissingTextId,
    #[error("No text found for ID {0}.")]
    TextNotFound(String),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SentimentGraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SentimentGraphError {
    fn status_code(&self) -> StatusCode {
        match self {
            SentimentGraphError::MissingTextId => StatusCode::BAD_REQUEST,
            SentimentGraphError::TextNotFound(_) => StatusCode::NOT_FOUND,
            SentimentGraphError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            SentimentGraphError::MissingTextId | SentimentGraphError::TextNotFound(_) => {
                error_response(self.status_code(), &self.to_string())
            }
            SentimentGraphError::InternalError(_) => {
                error!(error = ?self, "Error in /graph/");
                error_response(
                    self.status_code(),
                    "An error occurred while generating the graph.",
                )
            }
        }
    }
}
