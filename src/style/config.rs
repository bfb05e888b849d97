use serde::{Deserialize, Serialize};

use crate::gradient::{Color, CongestionColors, CongestionRanges};
use crate::order::Placement;
use crate::route::AlertKind;
use crate::style::StyleError;

/// Length, in metres, of the maneuver arrow shaft on either side of the maneuver.
pub const DEFAULT_SHAFT_LENGTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongestionConfiguration {
    pub ranges: CongestionRanges,
    pub main: CongestionColors,
    pub alternative: CongestionColors,
}

impl Default for CongestionConfiguration {
    fn default() -> Self {
        Self {
            ranges: CongestionRanges::default(),
            main: CongestionColors::MAIN,
            alternative: CongestionColors::ALTERNATIVE,
        }
    }
}

/// Appearance and behaviour of the navigation overlay.
///
/// Every field has a default, so a configuration only needs to name
/// what it changes:
/// ```rust
/// use routers_overlay::StyleConfig;
///
/// let config = StyleConfig::from_json(r#"{ "shows_alternatives": false }"#).unwrap();
/// assert!(!config.shows_alternatives);
/// assert!(config.shows_traffic);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub route_casing_color: Color,
    pub alternative_casing_color: Color,
    pub restricted_area_color: Color,
    /// Color of the travelled part of the main line. Without one, the
    /// travelled part vanishes.
    pub traversed_route_color: Option<Color>,
    pub maneuver_arrow_color: Color,
    pub maneuver_arrow_stroke_color: Color,
    pub waypoint_color: Color,
    pub waypoint_stroke_color: Color,

    pub route_line_tracks_traversal: bool,
    pub restricted_areas: bool,
    pub shows_traffic: bool,
    /// Fade between congestion colors rather than switching hard.
    pub crossfades_congestion: bool,
    pub shows_alternatives: bool,
    pub shows_intermediate_waypoints: bool,
    pub shows_voice_instructions: bool,
    pub shows_intersection_annotations: bool,
    pub shows_route_annotations: bool,

    pub congestion: CongestionConfiguration,
    pub excluded_alerts: Vec<AlertKind>,
    pub shaft_length: f64,

    /// Placement of the main route line for styles without slots.
    pub custom_route_line_position: Option<Placement>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            route_casing_color: Color::rgb(0x2f, 0x7a, 0xc6),
            alternative_casing_color: Color::rgb(0x6e, 0x7b, 0x8c),
            restricted_area_color: Color::rgb(0x00, 0x00, 0x00),
            traversed_route_color: None,
            maneuver_arrow_color: Color::WHITE,
            maneuver_arrow_stroke_color: Color::rgb(0x2d, 0x30, 0x33),
            waypoint_color: Color::rgb(0x2f, 0x7a, 0xc6),
            waypoint_stroke_color: Color::WHITE,

            route_line_tracks_traversal: false,
            restricted_areas: true,
            shows_traffic: true,
            crossfades_congestion: false,
            shows_alternatives: true,
            shows_intermediate_waypoints: true,
            shows_voice_instructions: false,
            shows_intersection_annotations: true,
            shows_route_annotations: true,

            congestion: CongestionConfiguration::default(),
            excluded_alerts: vec![],
            shaft_length: DEFAULT_SHAFT_LENGTH,

            custom_route_line_position: None,
        }
    }
}

impl StyleConfig {
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let config = serde_json::from_str::<StyleConfig>(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.shaft_length.is_finite() || self.shaft_length <= 0.0 {
            return Err(StyleError::InvalidConfig(format!(
                "shaft length must be positive, got {}",
                self.shaft_length
            )));
        }

        let ranges = &self.congestion.ranges;
        let ordered = ranges.low.end <= ranges.moderate.start
            && ranges.moderate.end <= ranges.heavy.start
            && ranges.heavy.end <= *ranges.severe.start();

        if !ordered {
            return Err(StyleError::InvalidConfig(format!(
                "congestion ranges overlap: {ranges:?}"
            )));
        }

        Ok(())
    }

    pub fn is_alert_shown(&self, kind: AlertKind) -> bool {
        !self.excluded_alerts.contains(&kind)
    }
}
