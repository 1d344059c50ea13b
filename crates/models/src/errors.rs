use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("type error: {0}")]
    Type(String),
    #[error("invalid timestamp {value:?} for `{field}`")]
    InvalidTimestamp { field: String, value: String },
    #[error("unknown class: {0}")]
    UnknownClass(String),
    #[error("record has no `__class__` discriminator")]
    MissingClass,
    #[error("{0} is already borrowed")]
    Borrowed(String),
}

impl ModelError {
    pub fn type_error(msg: impl Into<String>) -> Self { Self::Type(msg.into()) }
}
