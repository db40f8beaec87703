use chrono::{DateTime, Utc};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// A chart rendered for a text record
#[derive(Debug, Clone, TypedBuilder)]
pub struct ImageRecord {
    #[builder(default=Uuid::new_v4())]
    pub id: Uuid,

    /// Id of the text record the chart was rendered from.
    /// Not checked against the stored texts.
    pub text_id: Uuid,

    /// PNG encoded chart
    pub image_bytes: Vec<u8>,

    #[builder(default=Utc::now())]
    pub created_at: DateTime<Utc>,
}
