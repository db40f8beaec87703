use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use common::helper::error_chain_fmt;
use tracing::{error, info, warn};

use super::error_response;
use crate::ports::{chart_renderer::ChartRenderer, sentiment_repository::SentimentRepository};

/// Renders a chart summarizing every stored sentiment. Read-only.
#[tracing::instrument(name = "Dashboard handler", skip(repository, renderer))]
pub async fn dashboard(
    repository: web::Data<dyn SentimentRepository>,
    renderer: web::Data<dyn ChartRenderer>,
) -> Result<HttpResponse, DashboardError> {
    let sentiments = repository
        .list_sentiments()
        .await
        .context("Failed to fetch the stored sentiments")?;

    if sentiments.is_empty() {
        warn!("No sentiment data available for dashboard");
        return Err(DashboardError::NoData);
    }

    let chart = renderer
        .render_dashboard(&sentiments)
        .context("Failed to render the dashboard chart")?;

    info!(
        nb_sentiments = sentiments.len(),
        "Dashboard data retrieved and graph generated"
    );
    Ok(HttpResponse::Ok()
        .content_type(renderer.content_type())
        .body(chart))
}

#[derive(thiserror::Error)]
pub enum DashboardError {
    #[error("No sentiment data available.")]
    NoData,
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NoData => StatusCode::NOT_FOUND,
            DashboardError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            DashboardError::NoData => error_response(self.status_code(), &self.to_string()),
            DashboardError::InternalError(_) => {
                error!(error = ?self, "Error in /dashboard/");
                error_response(
                    self.status_code(),
                    "An error occurred while generating the dashboard.",
                )
            }
        }
    }
}
