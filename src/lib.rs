#![doc = include_str!("../README.md")]

pub mod engine;
pub mod gradient;
pub mod order;
pub mod route;
pub mod style;
pub mod util;

#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use gradient::{GradientStopMap, Segment, compile_gradient, compile_restriction_gradient};
#[doc(inline)]
pub use order::{LayerOrder, Placement, PlacementMode};
#[doc(inline)]
pub use style::{StyleConfig, StyleManager};
