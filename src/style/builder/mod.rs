//! Builders turning routes into [`MapFeature`](crate::style::MapFeature)s.
//!
//! Each builder is a pure function of the route, the configuration and,
//! where relevant, the user's progress. A builder returns `None` when it
//! has nothing to draw.

pub mod arrow;
pub mod markers;
pub mod route_line;

pub use arrow::maneuver_arrow;
pub use markers::{
    format_travel_time, intersection_annotations, route_alerts, route_annotations,
    voice_instructions, waypoints,
};
pub use route_line::{RouteLineKind, route_line};

use geo::Coord;
use serde_json::{Value, json};

use crate::engine::{LayerKind, LayerSpec};
use crate::gradient::Color;

/// A line width which widens with the zoom level.
fn line_width(width: f64) -> Value {
    json!([
        "interpolate",
        ["exponential", 1.5],
        ["zoom"],
        10.0,
        width * 0.5,
        16.0,
        width,
        22.0,
        width * 4.0
    ])
}

/// A round-capped line drawing `source` in `color`.
fn line_layer(id: &str, source: &str, color: Color, width: f64) -> LayerSpec {
    LayerSpec::new(id, LayerKind::Line)
        .with_source(source)
        .property("line-color", color)
        .property("line-width", line_width(width))
        .property("line-join", "round")
        .property("line-cap", "round")
}

fn point(coordinate: Coord<f64>) -> geo::Point<f64> {
    geo::Point::from(coordinate)
}
