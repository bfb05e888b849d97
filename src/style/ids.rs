//! Identifiers of every layer and source the overlay adds.
//!
//! Every id of a route line shares the line's `main` id as a prefix,
//! which is what [`PrefixOverride`](crate::order::PrefixOverride) keys on.

pub const PREFIX: &str = "routers.overlay";

/// Layer of the 2D location indicator, owned by the host application.
pub const PUCK_LAYER: &str = "puck";
/// Layer of the 3D location indicator, owned by the host application.
pub const PUCK_MODEL_LAYER: &str = "puck-model-layer";

fn id(name: &str) -> String {
    format!("{PREFIX}.{name}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLineIds {
    pub source: String,
    pub restricted_source: String,
    pub main: String,
    pub casing: String,
    pub traversed: String,
    pub restricted: String,
}

impl RouteLineIds {
    pub fn main() -> Self {
        Self::named(&id("route.main"))
    }

    pub fn alternative(index: usize) -> Self {
        Self::named(&id(&format!("route.alternative_{index}")))
    }

    fn named(base: &str) -> Self {
        Self {
            source: format!("{base}.source"),
            restricted_source: format!("{base}.restricted.source"),
            main: base.to_string(),
            casing: format!("{base}.casing"),
            traversed: format!("{base}.traversed"),
            restricted: format!("{base}.restricted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManeuverArrowIds {
    pub shaft_source: String,
    pub symbol_source: String,
    pub arrow: String,
    pub stroke: String,
    pub symbol: String,
    pub symbol_casing: String,
}

impl Default for ManeuverArrowIds {
    fn default() -> Self {
        Self {
            shaft_source: id("arrow.shaft.source"),
            symbol_source: id("arrow.symbol.source"),
            arrow: id("arrow"),
            stroke: id("arrow.stroke"),
            symbol: id("arrow.symbol"),
            symbol_casing: id("arrow.symbol.casing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointIds {
    pub source: String,
    pub inner_circle: String,
    pub marker_icon: String,
}

impl Default for WaypointIds {
    fn default() -> Self {
        Self {
            source: id("waypoint.source"),
            inner_circle: id("waypoint.inner_circle"),
            marker_icon: id("waypoint.marker_icon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInstructionIds {
    pub source: String,
    pub layer: String,
    pub circle: String,
}

impl Default for VoiceInstructionIds {
    fn default() -> Self {
        Self {
            source: id("voice_instruction.source"),
            layer: id("voice_instruction"),
            circle: id("voice_instruction.circle"),
        }
    }
}

/// Ids of a category drawn with a single symbol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolIds {
    pub source: String,
    pub layer: String,
}

impl SymbolIds {
    fn named(name: &str) -> Self {
        Self {
            source: id(&format!("{name}.source")),
            layer: id(name),
        }
    }

    pub fn intersections() -> Self {
        Self::named("intersection")
    }

    pub fn route_alerts() -> Self {
        Self::named("route_alert")
    }

    pub fn route_annotations() -> Self {
        Self::named("route_annotation")
    }
}
