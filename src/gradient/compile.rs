use log::trace;

use crate::gradient::{Color, GradientStopMap};

/// Upper bound, in metres, of the fade between two segments.
pub const FADE_CAP: f64 = 30.0;

/// Lower bound of the gap between a segment boundary and its stop.
pub const EPSILON: f64 = 2e-16;

/// A colored stretch of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Length in metres.
    pub length: f64,
    pub color: Color,
}

impl Segment {
    pub fn new(length: f64, color: Color) -> Self {
        Self {
            length: length.max(0.0),
            color,
        }
    }
}

/// A stretch of a line which is either restricted or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestrictedSpan {
    pub length: f64,
    pub restricted: bool,
}

/// Compiles colored segments, in line order, into gradient stops.
///
/// Every segment boundary gets a stop on either side, offset towards the
/// segment's interior: by a fraction of the segment (at most [`FADE_CAP`]
/// metres) when `is_soft`, or by the smallest representable step otherwise.
/// Boundaries between two segments of the same color produce no stops.
///
/// An empty input, or one of zero total length, yields `{0: base}`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = tracing::Level::DEBUG, skip(segments)))]
pub fn compile_gradient(segments: &[Segment], is_soft: bool, base: Color) -> GradientStopMap {
    let total = segments.iter().map(|segment| segment.length).sum::<f64>();
    if segments.is_empty() || total <= 0.0 {
        return GradientStopMap::solid(base);
    }

    let mut stops = GradientStopMap::new();
    let mut travelled = 0.0;
    // Fraction and color of the last recorded end stop.
    let mut last: Option<(f64, Color)> = None;

    let last_index = segments.len() - 1;
    for (index, segment) in segments.iter().enumerate() {
        let gap = (FADE_CAP.min(segment.length * 0.1) / total).max(EPSILON);
        let start = travelled / total;
        travelled += segment.length;
        let end = travelled / total;

        let end_stop = if is_soft { end - gap } else { end.next_down() };
        let start_stop = if is_soft { start + gap } else { start.next_up() };

        if index == 0 {
            stops.insert(0.0, segment.color);
            if index < last_index {
                stops.insert(end_stop, segment.color);
                last = Some((end_stop, segment.color));
            }
            continue;
        }

        match last {
            Some((fraction, color)) if color == segment.color => {
                stops.remove(fraction);
            }
            _ => {
                stops.insert(start_stop, segment.color);
            }
        }

        if index < last_index {
            stops.insert(end_stop, segment.color);
            last = Some((end_stop, segment.color));
        }
    }

    if stops.is_empty() {
        stops.insert(0.0, base);
    }

    trace!(
        "Compiled {} segments into {} stops (soft: {is_soft})",
        segments.len(),
        stops.len()
    );

    stops
}

/// Compiles restricted stretches into a hard gradient, painting restricted
/// stretches with `restricted` and leaving the rest transparent.
/// Restricted spans of zero total length yield `{0: restricted}`.
pub fn compile_restriction_gradient(spans: &[RestrictedSpan], restricted: Color) -> GradientStopMap {
    if !spans.iter().any(|span| span.restricted) {
        return GradientStopMap::solid(Color::TRANSPARENT);
    }

    let segments = spans
        .iter()
        .map(|span| {
            let color = if span.restricted {
                restricted
            } else {
                Color::TRANSPARENT
            };
            Segment::new(span.length, color)
        })
        .collect::<Vec<_>>();

    compile_gradient(&segments, false, restricted)
}
