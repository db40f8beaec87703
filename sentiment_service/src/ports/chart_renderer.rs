use common::helper::error_chain_fmt;

use crate::domain::entities::sentiment::Sentiment;

/// Renders sentiments as encoded raster images
///
/// Both methods are deterministic for a given input.
pub trait ChartRenderer: Send + Sync {
    /// Chart of a single text sentiment
    fn render_sentiment(&self, sentiment: &Sentiment) -> Result<Vec<u8>, ChartRendererError>;

    /// Chart summarizing a list of sentiments, in the given order
    fn render_dashboard(&self, sentiments: &[Sentiment]) -> Result<Vec<u8>, ChartRendererError>;

    /// MIME type of the rendered images
    fn content_type(&self) -> &'static str;
}

#[derive(thiserror::Error)]
pub enum ChartRendererError {
    #[error("No sentiment to render")]
    NoData,
    #[error("Invalid chart dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Failed to encode chart: {0}")]
    EncodingError(#[from] image::ImageError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for ChartRendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
