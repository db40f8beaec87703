use actix_web::HttpResponse;
use serde_json::json;

pub const WELCOME_MESSAGE: &str = "Welcome to the Sentiment Analysis API. Use /analyze/ for sentiment scores, /graph/?text_id=ID to get a sentiment graph, and /dashboard/ to get a sentiment dashboard.";

#[tracing::instrument(name = "Welcome handler")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": WELCOME_MESSAGE }))
}
