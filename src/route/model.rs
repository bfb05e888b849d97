use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::gradient::{CongestionLevel, CongestionRanges, RestrictedSpan, Run, merge_runs};
use crate::route::join_shapes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ManeuverKind {
    Depart,
    Turn,
    Continue,
    Merge,
    Fork,
    Roundabout,
    Arrive,
}

/// Traffic control at an intersection, also the name of its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IntersectionKind {
    TrafficSignal,
    StopSign,
    YieldSign,
    RailroadCrossing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub location: Coord<f64>,
    /// Traffic controls present at the intersection.
    pub controls: Vec<IntersectionKind>,
}

impl Intersection {
    pub fn new(location: Coord<f64>, controls: Vec<IntersectionKind>) -> Self {
        Self { location, controls }
    }

    /// The control shown for the intersection. A traffic signal outranks
    /// a railroad crossing, which outranks a stop sign, then a yield sign.
    pub fn primary_control(&self) -> Option<IntersectionKind> {
        [
            IntersectionKind::TrafficSignal,
            IntersectionKind::RailroadCrossing,
            IntersectionKind::StopSign,
            IntersectionKind::YieldSign,
        ]
        .into_iter()
        .find(|kind| self.controls.contains(kind))
    }
}

/// An instruction spoken while travelling along a step.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenInstruction {
    /// Distance, in metres, from the instruction to the end of the step.
    pub distance_along_step: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub shape: LineString<f64>,
    pub maneuver: ManeuverKind,
    pub distance: f64,
    pub intersections: Vec<Intersection>,
    pub instructions: Vec<SpokenInstruction>,
}

impl RouteStep {
    pub fn new(shape: LineString<f64>, maneuver: ManeuverKind) -> Self {
        Self {
            distance: crate::gradient::line_length(&shape.0),
            shape,
            maneuver,
            intersections: vec![],
            instructions: vec![],
        }
    }

    pub fn with_intersections(mut self, intersections: Vec<Intersection>) -> Self {
        self.intersections = intersections;
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<SpokenInstruction>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn maneuver_location(&self) -> Option<Coord<f64>> {
        self.shape.0.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub location: Coord<f64>,
    pub name: Option<String>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Incident,
    TollCollection,
    ServiceArea,
    BorderCrossing,
    Restriction,
    Tunnel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteAlert {
    pub kind: AlertKind,
    pub location: Coord<f64>,
}

/// Annotations are given per coordinate pair of the leg's joined shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteLeg {
    pub steps: Vec<RouteStep>,
    pub congestion: Vec<CongestionLevel>,
    /// Numeric congestion, `0..=100`, preferred over `congestion` when present.
    pub numeric_congestion: Option<Vec<u8>>,
    pub restricted: Vec<bool>,
    pub destination: Option<Waypoint>,
    pub alerts: Vec<RouteAlert>,
}

impl RouteLeg {
    pub fn shape(&self) -> LineString<f64> {
        join_shapes(self.steps.iter().map(|step| &step.shape))
    }

    pub fn congestion_levels(&self, ranges: &CongestionRanges) -> Vec<CongestionLevel> {
        match &self.numeric_congestion {
            Some(numeric) => numeric.iter().map(|value| ranges.level(*value)).collect(),
            None => self.congestion.clone(),
        }
    }

    /// The leg's shape, split where the congestion level changes.
    pub fn congestion_runs(&self, ranges: &CongestionRanges) -> Vec<Run<CongestionLevel>> {
        merge_runs(&self.shape(), &self.congestion_levels(ranges), CongestionLevel::Unknown)
    }

    pub fn restricted_spans(&self) -> Vec<RestrictedSpan> {
        merge_runs(&self.shape(), &self.restricted, false)
            .into_iter()
            .map(|run| RestrictedSpan {
                length: run.length(),
                restricted: run.value,
            })
            .collect()
    }

    pub fn has_restrictions(&self) -> bool {
        self.restricted.iter().any(|restricted| *restricted)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
    /// Seconds.
    pub expected_travel_time: f64,
}

impl Route {
    pub fn new(legs: Vec<RouteLeg>, expected_travel_time: f64) -> Self {
        Self {
            legs,
            expected_travel_time,
        }
    }

    pub fn shape(&self) -> LineString<f64> {
        let shapes = self.legs.iter().map(RouteLeg::shape).collect::<Vec<_>>();
        join_shapes(&shapes)
    }

    pub fn steps(&self) -> impl Iterator<Item = &RouteStep> {
        self.legs.iter().flat_map(|leg| &leg.steps)
    }

    pub fn step(&self, leg_index: usize, step_index: usize) -> Option<&RouteStep> {
        self.legs.get(leg_index)?.steps.get(step_index)
    }

    /// Destinations of every leg but the last.
    pub fn intermediate_waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        let count = self.legs.len().saturating_sub(1);
        self.legs[..count]
            .iter()
            .filter_map(|leg| leg.destination.as_ref())
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.legs.last()?.destination.as_ref()
    }

    pub fn has_tolls(&self) -> bool {
        self.legs
            .iter()
            .flat_map(|leg| &leg.alerts)
            .any(|alert| alert.kind == AlertKind::TollCollection)
    }

    pub fn has_restrictions(&self) -> bool {
        self.legs.iter().any(RouteLeg::has_restrictions)
    }
}

/// A route offered next to the main one.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeRoute {
    pub route: Route,
    /// Seconds gained, or lost when negative, against the main route.
    pub travel_time_delta: f64,
}

/// The main route and the alternatives offered with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationRoutes {
    pub main: Route,
    pub alternatives: Vec<AlternativeRoute>,
}

impl NavigationRoutes {
    pub fn new(main: Route) -> Self {
        Self {
            main,
            alternatives: vec![],
        }
    }

    pub fn with_alternatives(mut self, alternatives: Vec<AlternativeRoute>) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Every route, the main one first.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        std::iter::once(&self.main).chain(self.alternatives.iter().map(|alternative| &alternative.route))
    }
}
