use common::helper::error_chain_fmt;
use serde::Serialize;

pub const MIN_POLARITY: f64 = -1.0;
pub const MAX_POLARITY: f64 = 1.0;
pub const MIN_SUBJECTIVITY: f64 = 0.0;
pub const MAX_SUBJECTIVITY: f64 = 1.0;

/// Sentiment scores of a text
///
/// - `polarity`: from -1.0 (negative) to 1.0 (positive)
/// - `subjectivity`: from 0.0 (factual) to 1.0 (opinionated)
///
/// Fields are private so a `Sentiment` is always within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    polarity: f64,
    subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Result<Self, SentimentError> {
        if !polarity.is_finite() || !(MIN_POLARITY..=MAX_POLARITY).contains(&polarity) {
            return Err(SentimentError::PolarityOutOfBounds(polarity));
        }

        if !subjectivity.is_finite()
            || !(MIN_SUBJECTIVITY..=MAX_SUBJECTIVITY).contains(&subjectivity)
        {
            return Err(SentimentError::SubjectivityOutOfBounds(subjectivity));
        }

        Ok(Self {
            polarity,
            subjectivity,
        })
    }

    /// Sentiment of a text without any opinion
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }

    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    pub fn subjectivity(&self) -> f64 {
        self.subjectivity
    }
}

#[derive(thiserror::Error)]
pub enum SentimentError {
    #[error("Polarity {0} is not within [-1, 1]")]
    PolarityOutOfBounds(f64),
    #[error("Subjectivity {0} is not within [0, 1]")]
    SubjectivityOutOfBounds(f64),
}

impl std::fmt::Debug for SentimentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
