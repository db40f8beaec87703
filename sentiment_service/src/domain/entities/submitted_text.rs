use common::helper::error_chain_fmt;

/// A text accepted for sentiment analysis
///
/// Holds the text exactly as it was submitted, but refuses texts without any visible character.
#[derive(Debug, Clone)]
pub struct SubmittedText(String);

impl SubmittedText {
    pub fn parse(s: &str) -> Result<SubmittedText, SubmittedTextError> {
        if s.trim().is_empty() {
            return Err(SubmittedTextError::EmptyText);
        }

        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for SubmittedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmittedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(thiserror::Error)]
pub enum SubmittedTextError {
    #[error("Text input is required.")]
    EmptyText,
}

impl std::fmt::Debug for SubmittedTextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
