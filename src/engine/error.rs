use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    DuplicateLayer(String),
    DuplicateSource(String),
    MissingLayer(String),
    MissingSource(String),
    /// The layer a placement refers to is not in the stack.
    MissingAnchor(String),
    MissingSlot(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::DuplicateLayer(id) => write!(f, "layer {id} already exists"),
            EngineError::DuplicateSource(id) => write!(f, "source {id} already exists"),
            EngineError::MissingLayer(id) => write!(f, "layer {id} does not exist"),
            EngineError::MissingSource(id) => write!(f, "source {id} does not exist"),
            EngineError::MissingAnchor(id) => write!(f, "anchor layer {id} does not exist"),
            EngineError::MissingSlot(name) => write!(f, "slot {name} does not exist"),
        }
    }
}

impl std::error::Error for EngineError {}
