pub type OutfillResult<T> = Result<T, OutfillError>;

#[derive(thiserror::Error, Debug)]
pub enum OutfillError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutfillError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for OutfillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
