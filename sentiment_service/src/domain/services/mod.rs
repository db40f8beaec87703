pub mod lexicon_sentiment_scorer;
pub mod png_chart_renderer;
