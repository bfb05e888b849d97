//! Compilation of colored route segments into `line-gradient` stops.
//!
//! A route line is drawn as a single polyline whose color varies along
//! its length. The engine expresses this with gradient stops keyed by
//! the fraction of the line travelled, `line-progress`. Segments are
//! derived from the route's geometry and per-segment annotations
//! ([`merge_runs`]), colored ([`CongestionColors`]), then compiled with
//! [`compile_gradient`].

#[doc(hidden)]
pub mod color;
#[doc(hidden)]
pub mod compile;
pub mod congestion;
#[doc(hidden)]
pub mod stops;


#[doc(inline)]
pub use color::{Color, ColorError};
#[doc(inline)]
pub use compile::{
    EPSILON, FADE_CAP, RestrictedSpan, Segment, compile_gradient, compile_restriction_gradient,
};
#[doc(inline)]
pub use congestion::{CongestionColors, CongestionLevel, CongestionRanges, Run, line_length, merge_runs};
#[doc(inline)]
pub use stops::{ColorSpan, GradientStop, GradientStopMap};
