use chrono::{DateTime, Utc};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::sentiment::Sentiment;

/// A submitted text along with the sentiment computed when it was submitted
///
/// Never updated once stored.
#[derive(Debug, Clone, TypedBuilder)]
pub struct TextRecord {
    #[builder(default=Uuid::new_v4())]
    pub id: Uuid,

    /// Text as received from the user
    pub text: String,

    pub sentiment: Sentiment,

    #[builder(default=Utc::now())]
    pub created_at: DateTime<Utc>,
}
