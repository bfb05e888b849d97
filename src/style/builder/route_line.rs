use geo::LineString;
use log::trace;

use crate::engine::{SourceFeature, SourceSpec};
use crate::gradient::{
    Color, CongestionColors, GradientStopMap, Segment, compile_gradient,
    compile_restriction_gradient,
};
use crate::route::{Route, RouteProgress};
use crate::style::builder::line_layer;
use crate::style::ids::RouteLineIds;
use crate::style::{MapFeature, StyleConfig};

/// Simplification tolerance of route line sources.
pub const SOURCE_TOLERANCE: f64 = 0.375;

const LINE_WIDTH: f64 = 6.0;
const CASING_WIDTH: f64 = 9.0;
const RESTRICTED_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteLineKind {
    Main,
    /// Index of the alternative among those shown.
    Alternative(usize),
}

impl RouteLineKind {
    pub fn ids(&self) -> RouteLineIds {
        match self {
            RouteLineKind::Main => RouteLineIds::main(),
            RouteLineKind::Alternative(index) => RouteLineIds::alternative(*index),
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, RouteLineKind::Main)
    }
}

/// The line of a route, colored by congestion.
///
/// The main line follows `progress`: legs other than the current one are
/// drawn in the casing color, and when the line tracks traversal the part
/// already travelled is cut away.
pub fn route_line(
    route: &Route,
    kind: RouteLineKind,
    config: &StyleConfig,
    progress: Option<&RouteProgress>,
) -> Option<MapFeature> {
    let shape = route.shape();
    if shape.0.len() < 2 {
        return None;
    }

    let ids = kind.ids();
    let (colors, casing) = match kind {
        RouteLineKind::Main => (&config.congestion.main, config.route_casing_color),
        RouteLineKind::Alternative(_) => {
            (&config.congestion.alternative, config.alternative_casing_color)
        }
    };
    let base = colors.unknown;
    let progress = progress.filter(|_| kind.is_main());

    let segments = congestion_segments(route, colors, casing, config, progress);
    let mut gradient = compile_gradient(&segments, config.crossfades_congestion, base);
    let mut casing_gradient = None;

    let tracks_traversal = kind.is_main() && config.route_line_tracks_traversal;
    let fraction_traveled = progress
        .filter(|_| tracks_traversal)
        .map(|progress| progress.fraction_traveled)
        .filter(|fraction| *fraction > 0.0);

    if let Some(fraction) = fraction_traveled {
        let traversed = config.traversed_route_color.unwrap_or(Color::TRANSPARENT);
        gradient = gradient.vanish(fraction, traversed, base);
        casing_gradient = Some(GradientStopMap::solid(casing).vanish(fraction, traversed, casing));
    }

    trace!("Route line {} has {} gradient stops", ids.main, gradient.len());

    let source = line_source(&ids.source, shape.clone());

    let mut casing_layer = line_layer(&ids.casing, &ids.source, casing, CASING_WIDTH);
    if let Some(casing_gradient) = casing_gradient {
        casing_layer = casing_layer.property("line-gradient", casing_gradient.to_expression(casing, false));
    }

    let main_layer = line_layer(&ids.main, &ids.source, base, LINE_WIDTH).property(
        "line-gradient",
        gradient.to_expression(base, config.crossfades_congestion),
    );

    let mut feature = MapFeature::new(&ids.main)
        .with_source(source)
        .with_layer(main_layer)
        .with_layer(casing_layer);

    if let Some(traversed) = config.traversed_route_color.filter(|_| tracks_traversal) {
        feature = feature.with_layer(line_layer(&ids.traversed, &ids.source, traversed, CASING_WIDTH));
    }

    if config.restricted_areas && route.has_restrictions() {
        let spans = route
            .legs
            .iter()
            .flat_map(|leg| leg.restricted_spans())
            .collect::<Vec<_>>();
        let gradient = compile_restriction_gradient(&spans, config.restricted_area_color);

        let layer = line_layer(
            &ids.restricted,
            &ids.restricted_source,
            config.restricted_area_color,
            RESTRICTED_WIDTH,
        )
        .property("line-gradient", gradient.to_expression(Color::TRANSPARENT, false))
        .property("line-dasharray", serde_json::json!([0.5, 2.0]));

        feature = feature
            .with_source(line_source(&ids.restricted_source, shape))
            .with_layer(layer);
    }

    Some(feature)
}

fn line_source(id: &str, shape: LineString<f64>) -> SourceSpec {
    SourceSpec::new(id)
        .with_features(vec![SourceFeature::new(shape)])
        .with_line_metrics(true)
        .with_tolerance(SOURCE_TOLERANCE)
}

/// Colored segments of every leg, in line order.
fn congestion_segments(
    route: &Route,
    colors: &CongestionColors,
    inactive: Color,
    config: &StyleConfig,
    progress: Option<&RouteProgress>,
) -> Vec<Segment> {
    let ranges = &config.congestion.ranges;

    route
        .legs
        .iter()
        .enumerate()
        .flat_map(move |(index, leg)| {
            let is_active = progress.is_none_or(|progress| progress.leg_index == index);

            leg.congestion_runs(ranges).into_iter().map(move |run| {
                let color = match (is_active, config.shows_traffic) {
                    (false, _) => inactive,
                    (true, true) => colors.color(run.value),
                    (true, false) => colors.unknown,
                };
                Segment::new(run.length(), color)
            })
        })
        .collect()
}
