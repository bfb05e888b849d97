use geo::LineString;
use serde_json::json;

use crate::engine::{LayerKind, LayerSpec, SourceFeature, SourceSpec};
use crate::gradient::line_length;
use crate::route::{
    NavigationRoutes, Route, RouteProgress, RouteStep, coordinate_along, join_shapes,
};
use crate::style::builder::point;
use crate::style::ids::{SymbolIds, VoiceInstructionIds, WaypointIds};
use crate::style::{MapFeature, StyleConfig};

/// Share of a route's unique stretch at which its annotation is placed.
pub const ANNOTATION_POSITION: f64 = 0.5;

pub const WAYPOINT_ICON: &str = "waypoint";

/// Markers for the stops between legs. Waypoints before the current
/// leg are flagged as visited.
pub fn waypoints(route: &Route, leg_index: Option<usize>, config: &StyleConfig) -> Option<MapFeature> {
    if !config.shows_intermediate_waypoints {
        return None;
    }

    let features = route
        .intermediate_waypoints()
        .enumerate()
        .map(|(index, waypoint)| {
            SourceFeature::new(point(waypoint.location))
                .property("name", waypoint.name.clone().unwrap_or_default())
                .property("visited", leg_index.is_some_and(|leg| index < leg))
        })
        .collect::<Vec<_>>();

    if features.is_empty() {
        return None;
    }

    let ids = WaypointIds::default();
    let feature = MapFeature::new(&ids.marker_icon)
        .with_source(SourceSpec::new(&ids.source).with_features(features))
        .with_layer(
            LayerSpec::new(&ids.inner_circle, LayerKind::Circle)
                .with_source(&ids.source)
                .property("circle-color", config.waypoint_color)
                .property("circle-radius", 6.0)
                .property("circle-stroke-color", config.waypoint_stroke_color)
                .property("circle-stroke-width", 2.0)
                .property("circle-pitch-alignment", "map"),
        )
        .with_layer(
            LayerSpec::new(&ids.marker_icon, LayerKind::Symbol)
                .with_source(&ids.source)
                .property("icon-image", WAYPOINT_ICON)
                .property("icon-allow-overlap", true)
                .property("icon-opacity", json!(["case", ["get", "visited"], 0.5, 1.0])),
        );

    Some(feature)
}

/// A marker wherever a spoken instruction is announced.
pub fn voice_instructions(route: &Route, config: &StyleConfig) -> Option<MapFeature> {
    if !config.shows_voice_instructions {
        return None;
    }

    let features = route
        .steps()
        .flat_map(|step| {
            // Instructions are measured back from the end of their step.
            let reversed = step.shape.0.iter().rev().copied().collect::<Vec<_>>();

            step.instructions
                .iter()
                .filter_map(move |instruction| {
                    let location = coordinate_along(&reversed, instruction.distance_along_step)?;
                    Some(
                        SourceFeature::new(point(location))
                            .property("instruction", instruction.text.clone()),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    if features.is_empty() {
        return None;
    }

    let ids = VoiceInstructionIds::default();
    let feature = MapFeature::new(&ids.layer)
        .with_source(SourceSpec::new(&ids.source).with_features(features))
        .with_layer(
            LayerSpec::new(&ids.layer, LayerKind::Symbol)
                .with_source(&ids.source)
                .property("text-field", json!(["get", "instruction"]))
                .property("text-size", 13.0)
                .property("text-offset", json!([0.0, -1.2])),
        )
        .with_layer(
            LayerSpec::new(&ids.circle, LayerKind::Circle)
                .with_source(&ids.source)
                .property("circle-radius", 5.0)
                .property("circle-color", config.route_casing_color),
        );

    Some(feature)
}

/// Icons for traffic controls on the rest of the current step and at the
/// upcoming maneuver.
pub fn intersection_annotations(
    route: &Route,
    progress: &RouteProgress,
    config: &StyleConfig,
) -> Option<MapFeature> {
    if !config.shows_intersection_annotations {
        return None;
    }

    let step = route.step(progress.leg_index, progress.step_index)?;
    let upcoming = route
        .step(progress.leg_index, progress.step_index + 1)
        .and_then(|step| step.intersections.first());

    let features = step
        .intersections
        .iter()
        .skip(progress.intersection_index)
        .chain(upcoming)
        .filter_map(|intersection| {
            let kind = intersection.primary_control()?;
            Some(SourceFeature::new(point(intersection.location)).property("image_name", kind.to_string()))
        })
        .collect::<Vec<_>>();

    if features.is_empty() {
        return None;
    }

    let ids = SymbolIds::intersections();
    Some(symbol_feature(&ids, features).with_layer(
        symbol_layer(&ids)
            .property("icon-image", json!(["get", "image_name"]))
            .property("icon-allow-overlap", true),
    ))
}

/// Icons for the alerts along the main route, skipping excluded kinds.
pub fn route_alerts(routes: &NavigationRoutes, config: &StyleConfig) -> Option<MapFeature> {
    let features = routes
        .main
        .legs
        .iter()
        .flat_map(|leg| &leg.alerts)
        .filter(|alert| config.is_alert_shown(alert.kind))
        .map(|alert| SourceFeature::new(point(alert.location)).property("kind", alert.kind.to_string()))
        .collect::<Vec<_>>();

    if features.is_empty() {
        return None;
    }

    let ids = SymbolIds::route_alerts();
    Some(symbol_feature(&ids, features).with_layer(
        symbol_layer(&ids)
            .property("icon-image", json!(["get", "kind"]))
            .property("icon-allow-overlap", true),
    ))
}

/// Travel time labels, one per route, placed on a stretch which no
/// earlier route shares.
///
/// Alternatives are labelled with their difference to the main route.
/// When any route has tolls, every label says whether its route does.
pub fn route_annotations(routes: &NavigationRoutes, config: &StyleConfig) -> Option<MapFeature> {
    if !config.shows_route_annotations {
        return None;
    }

    let any_tolls = routes.routes().any(Route::has_tolls);
    let alternatives = routes.alternatives.iter().filter(|_| config.shows_alternatives);

    let labels = std::iter::once((&routes.main, format_travel_time(routes.main.expected_travel_time, false)))
        .chain(alternatives.map(|alternative| {
            (&alternative.route, format_travel_time(alternative.travel_time_delta, true))
        }));

    let mut seen: Vec<&RouteStep> = vec![];
    let mut features = vec![];

    for (index, (route, mut text)) in labels.enumerate() {
        let unique = route
            .steps()
            .filter(|step| !seen.contains(step))
            .map(|step| &step.shape)
            .collect::<Vec<_>>();
        seen.extend(route.steps());

        let LineString(coordinates) = join_shapes(unique);
        let distance = line_length(&coordinates) * ANNOTATION_POSITION;
        let Some(location) = coordinate_along(&coordinates, distance) else {
            continue;
        };

        if route.has_tolls() {
            text.push_str("\nTolls");
        } else if any_tolls {
            text.push_str("\nNo Tolls");
        }

        features.push(
            SourceFeature::new(point(location))
                .property("text", text)
                .property("route_index", index)
                .property("selected", index == 0),
        );
    }

    if features.is_empty() {
        return None;
    }

    let ids = SymbolIds::route_annotations();
    Some(symbol_feature(&ids, features).with_layer(
        symbol_layer(&ids)
            .property("text-field", json!(["get", "text"]))
            .property("text-size", 14.0)
            .property("text-allow-overlap", true),
    ))
}

fn symbol_feature(ids: &SymbolIds, features: Vec<SourceFeature>) -> MapFeature {
    MapFeature::new(&ids.layer).with_source(SourceSpec::new(&ids.source).with_features(features))
}

fn symbol_layer(ids: &SymbolIds) -> LayerSpec {
    LayerSpec::new(&ids.layer, LayerKind::Symbol).with_source(&ids.source)
}

/// Formats seconds as `"12 min"` or `"1 h 5 min"`. Signed values carry
/// an explicit `+` or `-`.
pub fn format_travel_time(seconds: f64, signed: bool) -> String {
    let minutes = (seconds.abs() / 60.0).round() as u64;
    let sign = match (signed, seconds < 0.0 && minutes > 0) {
        (false, _) => "",
        (true, true) => "-",
        (true, false) => "+",
    };

    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{sign}{minutes} min"),
        (hours, 0) => format!("{sign}{hours} h"),
        (hours, minutes) => format!("{sign}{hours} h {minutes} min"),
    }
}
