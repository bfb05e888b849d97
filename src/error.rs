use std::fmt::{Display, Formatter};

use crate::engine::EngineError;
use crate::gradient::ColorError;
use crate::impl_err;
use crate::style::StyleError;

#[derive(Debug)]
pub enum Error {
    Engine(EngineError),
    Style(StyleError),
    Color(ColorError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Engine(err) => write!(f, "engine: {err}"),
            Error::Style(err) => write!(f, "style: {err}"),
            Error::Color(err) => write!(f, "color: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl_err! {
    EngineError => Engine,
    StyleError => Style,
    ColorError => Color,
}
