use lingo_types::{LanguagePair, TranslationResult};

/// Shown when the service fails without saying why
pub const GENERIC_FAILURE: &str = "Translation failed. Please try again.";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from `pair.source` to `pair.target`.
    ///
    /// One attempt only; retrying is left to the user.
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
    ) -> Result<TranslationResult, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    ApiError { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// Text for the user: the service's own detail when it sent one
    pub fn message(&self) -> String {
        match self {
            TranslateError::ApiError {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
