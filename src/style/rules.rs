use crate::engine::MapEngine;
use crate::order::{
    LegacyBands, LegacyPlacement, Placement, PlacementMode, PrefixOverride, Rule, RuleSet, Slot,
};
use crate::style::ids::{
    ManeuverArrowIds, PUCK_LAYER, PUCK_MODEL_LAYER, RouteLineIds, SymbolIds, VoiceInstructionIds,
    WaypointIds,
};

/// Prefix of the base style's point-of-interest labels.
pub const POI_PREFIX: &str = "poi";

/// Number of alternative route lines covered by the ordering rules.
pub const ALTERNATIVES: usize = 2;

/// The ordering of every layer the overlay adds, relative to each
/// other and to the point-of-interest labels of the base style.
pub fn default_rules() -> RuleSet {
    let main = RouteLineIds::main();
    let alternatives = (0..ALTERNATIVES)
        .map(RouteLineIds::alternative)
        .collect::<Vec<_>>();
    let arrow = ManeuverArrowIds::default();
    let voice = VoiceInstructionIds::default();
    let waypoint = WaypointIds::default();

    let restricted = alternatives
        .iter()
        .chain([&main])
        .map(|ids| ids.restricted.clone())
        .collect::<Vec<_>>();

    RuleSet::builder()
        .slotted(Some(Slot::middle()), |mut rules| {
            for ids in &alternatives {
                rules = rules.rule(Rule::ordered_ids([&ids.casing, &ids.main]));
            }

            rules
                .rule(Rule::ordered_ids([&main.traversed, &main.casing, &main.main]))
                .rule(Rule::ordered_ids([
                    &arrow.stroke,
                    &arrow.arrow,
                    &arrow.symbol_casing,
                    &arrow.symbol,
                ]))
                .rule(Rule::ordered_ids(restricted))
                .rule(Rule::prefix(POI_PREFIX))
                .rule(Rule::ordered_ids([&voice.layer, &voice.circle]))
        })
        .slotted(None, |rules| {
            rules.rule(Rule::ordered_ids([
                SymbolIds::intersections().layer,
                SymbolIds::route_alerts().layer,
                SymbolIds::route_annotations().layer,
                waypoint.inner_circle,
                waypoint.marker_icon,
                PUCK_LAYER.to_string(),
                PUCK_MODEL_LAYER.to_string(),
            ]))
        })
        .build()
}

/// Bands used by styles without slots.
pub fn legacy_bands() -> LegacyBands {
    let main = RouteLineIds::main();
    let arrow = ManeuverArrowIds::default();
    let voice = VoiceInstructionIds::default();
    let waypoint = WaypointIds::default();

    let mut lowermost = vec![];
    for ids in (0..ALTERNATIVES).map(RouteLineIds::alternative) {
        lowermost.extend([ids.casing, ids.main, ids.restricted]);
    }
    lowermost.extend([main.traversed, main.casing, main.main, main.restricted]);

    LegacyBands {
        lowermost,
        above_road: vec![
            arrow.stroke,
            arrow.arrow,
            arrow.symbol_casing,
            arrow.symbol,
            SymbolIds::intersections().layer,
            SymbolIds::route_alerts().layer,
        ],
        uppermost: vec![
            SymbolIds::route_annotations().layer,
            voice.layer,
            voice.circle,
            waypoint.inner_circle,
            waypoint.marker_icon,
            PUCK_LAYER.to_string(),
            PUCK_MODEL_LAYER.to_string(),
        ],
    }
}

/// Slotted when the loaded style exposes the `middle` slot.
pub fn placement_mode<E: MapEngine>(
    engine: &E,
    custom_route_line_position: Option<&Placement>,
) -> PlacementMode {
    if engine.supports_slot(&Slot::middle()) {
        return PlacementMode::Slotted;
    }

    let prefix_override = custom_route_line_position.map(|placement| PrefixOverride {
        prefix: RouteLineIds::main().main,
        placement: placement.clone(),
    });

    PlacementMode::Legacy(LegacyPlacement::new(legacy_bands()).with_override(prefix_override))
}
