use geo::{Bearing, Haversine, LineString};
use log::trace;
use serde_json::json;

use crate::engine::{LayerKind, LayerSpec, SourceFeature, SourceSpec};
use crate::gradient::Color;
use crate::route::{ManeuverKind, Route, RouteProgress, join_shapes, slice_around};
use crate::style::builder::{line_layer, point};
use crate::style::ids::ManeuverArrowIds;
use crate::style::{MapFeature, StyleConfig};

const SHAFT_WIDTH: f64 = 4.0;
const STROKE_WIDTH: f64 = 6.0;

/// Icon drawn at the head of the arrow.
pub const ARROW_ICON: &str = "triangle";

/// An arrow over the upcoming maneuver, pointing along the route.
///
/// The upcoming maneuver starts the step after the current one. There is
/// no arrow onto the destination.
pub fn maneuver_arrow(route: &Route, progress: &RouteProgress, config: &StyleConfig) -> Option<MapFeature> {
    let leg = route.legs.get(progress.leg_index)?;
    let step_index = progress.step_index + 1;
    let step = leg.steps.get(step_index)?;

    if step.maneuver == ManeuverKind::Arrive {
        return None;
    }

    let before = join_shapes(leg.steps[..step_index].iter().map(|step| &step.shape));
    let maneuver = step.maneuver_location()?;
    let index = match before.0.last() {
        Some(last) if *last == maneuver => before.0.len() - 1,
        _ => before.0.len(),
    };

    let shape = leg.shape();
    let shaft = slice_around(&shape.0, index, config.shaft_length, config.shaft_length);
    let [.., tail, head] = shaft.as_slice() else {
        return None;
    };

    let bearing = Haversine.bearing(point(*tail), point(*head));
    trace!("Maneuver arrow at {maneuver:?}, heading {bearing:.1}");

    let ids = ManeuverArrowIds::default();
    let symbol = SourceFeature::new(point(*head)).property("bearing", bearing);

    let symbol_layer = |id: &str, color: Color| {
        LayerSpec::new(id, LayerKind::Symbol)
            .with_source(&ids.symbol_source)
            .property("icon-image", ARROW_ICON)
            .property("icon-color", color)
            .property("icon-rotate", json!(["get", "bearing"]))
            .property("icon-rotation-alignment", "map")
            .property("icon-allow-overlap", true)
    };

    let feature = MapFeature::new(&ids.arrow)
        .with_source(SourceSpec::new(&ids.shaft_source).with_features(vec![SourceFeature::new(
            LineString::new(shaft),
        )]))
        .with_source(SourceSpec::new(&ids.symbol_source).with_features(vec![symbol]))
        .with_layer(line_layer(
            &ids.stroke,
            &ids.shaft_source,
            config.maneuver_arrow_stroke_color,
            STROKE_WIDTH,
        ))
        .with_layer(line_layer(
            &ids.arrow,
            &ids.shaft_source,
            config.maneuver_arrow_color,
            SHAFT_WIDTH,
        ))
        .with_layer(
            symbol_layer(&ids.symbol_casing, config.maneuver_arrow_stroke_color)
                .property("icon-size", 1.2),
        )
        .with_layer(symbol_layer(&ids.symbol, config.maneuver_arrow_color));

    Some(feature)
}
