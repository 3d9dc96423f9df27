/// Input rejected before anything is sent to the service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text too long (max 5000 characters)")]
    TextTooLong { chars: usize },

    #[error("Source and target languages cannot be the same")]
    SameLanguages,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A translation is already in progress")]
    Busy,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Language list unavailable: {0}")]
    Unavailable(String),
}
