pub mod chart_renderer;
pub mod sentiment_repository;
pub mod sentiment_scorer;

pub use chart_renderer::*;
pub use sentiment_repository::*;
pub use sentiment_scorer::*;
