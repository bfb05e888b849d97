use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum StyleError {
    /// The configuration could not be parsed.
    Json(serde_json::Error),
    /// The configuration parsed, but describes an unusable style.
    InvalidConfig(String),
}

impl Display for StyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::Json(err) => write!(f, "malformed configuration: {err}"),
            StyleError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for StyleError {}

impl From<serde_json::Error> for StyleError {
    fn from(value: serde_json::Error) -> Self {
        StyleError::Json(value)
    }
}
