use geo::{coord, line_string};
use serde_json::{Value, json};

use crate::engine::{LayerInfo, LayerKind, LayerSpec, MapEngine, MemoryEngine};
use crate::gradient::{Color, CongestionLevel};
use crate::order::{Placement, Slot};
use crate::route::{
    AlertKind, AlternativeRoute, Intersection, IntersectionKind, ManeuverKind, NavigationRoutes,
    Route, RouteAlert, RouteLeg, RouteProgress, RouteStep, SpokenInstruction,
};
use crate::style::builder::{self, format_travel_time};
use crate::style::ids::{ManeuverArrowIds, RouteLineIds, SymbolIds, VoiceInstructionIds};
use crate::style::{FeatureCategory, MapFeature, StyleConfig, StyleError, StyleManager};

fn slotted_style() -> Vec<LayerInfo> {
    vec![
        LayerInfo::new("land", LayerKind::Fill).with_source_layer("landuse"),
        LayerInfo::new("road", LayerKind::Line).with_source_layer("road"),
        LayerInfo::new("poi-label", LayerKind::Symbol).with_source_layer("poi"),
        LayerInfo::new("middle", LayerKind::Slot),
        LayerInfo::new("top", LayerKind::Slot),
    ]
}

fn legacy_style() -> Vec<LayerInfo> {
    vec![
        LayerInfo::new("land", LayerKind::Fill).with_source_layer("landuse"),
        LayerInfo::new("road", LayerKind::Line).with_source_layer("road"),
        LayerInfo::new("road-label", LayerKind::Symbol).with_source_layer("road"),
        LayerInfo::new("poi-label", LayerKind::Symbol).with_source_layer("poi"),
    ]
}

/// East for two blocks, north for two blocks, then arrive.
fn main_route() -> Route {
    let depart = RouteStep::new(
        line_string![(x: 13.400, y: 52.500), (x: 13.401, y: 52.500), (x: 13.402, y: 52.500)],
        ManeuverKind::Depart,
    )
    .with_intersections(vec![
        Intersection::new(coord! { x: 13.401, y: 52.500 }, vec![IntersectionKind::StopSign]),
        Intersection::new(coord! { x: 13.4015, y: 52.500 }, vec![]),
    ]);

    let turn = RouteStep::new(
        line_string![(x: 13.402, y: 52.500), (x: 13.402, y: 52.501), (x: 13.402, y: 52.502)],
        ManeuverKind::Turn,
    )
    .with_intersections(vec![Intersection::new(
        coord! { x: 13.402, y: 52.500 },
        vec![IntersectionKind::YieldSign, IntersectionKind::TrafficSignal],
    )])
    .with_instructions(vec![SpokenInstruction {
        distance_along_step: 50.0,
        text: "Arrive at your destination".to_string(),
    }]);

    let arrive = RouteStep::new(line_string![(x: 13.402, y: 52.502)], ManeuverKind::Arrive);

    let leg = RouteLeg {
        steps: vec![depart, turn, arrive],
        congestion: vec![
            CongestionLevel::Low,
            CongestionLevel::Low,
            CongestionLevel::Heavy,
            CongestionLevel::Heavy,
        ],
        ..RouteLeg::default()
    };

    Route::new(vec![leg], 300.0)
}

/// North first, then east, meeting the main route at its destination.
fn alternative_route() -> AlternativeRoute {
    let depart = RouteStep::new(
        line_string![(x: 13.400, y: 52.500), (x: 13.400, y: 52.502)],
        ManeuverKind::Depart,
    );
    let turn = RouteStep::new(
        line_string![(x: 13.400, y: 52.502), (x: 13.402, y: 52.502)],
        ManeuverKind::Turn,
    );
    let arrive = RouteStep::new(line_string![(x: 13.402, y: 52.502)], ManeuverKind::Arrive);

    let leg = RouteLeg {
        steps: vec![depart, turn, arrive],
        alerts: vec![RouteAlert {
            kind: AlertKind::TollCollection,
            location: coord! { x: 13.400, y: 52.501 },
        }],
        ..RouteLeg::default()
    };

    AlternativeRoute {
        route: Route::new(vec![leg], 420.0),
        travel_time_delta: 120.0,
    }
}

fn routes() -> NavigationRoutes {
    NavigationRoutes::new(main_route()).with_alternatives(vec![alternative_route()])
}

fn stack<E: MapEngine>(manager: &StyleManager<E>) -> Vec<String> {
    manager.engine().layer_ids()
}

/// Asserts that `ids` appear in the stack in the given order, bottom to top.
fn assert_stacked(stack: &[String], ids: &[&str]) {
    let positions = ids
        .iter()
        .map(|id| {
            stack
                .iter()
                .position(|layer| layer == id)
                .unwrap_or_else(|| panic!("{id} missing from {stack:?}"))
        })
        .collect::<Vec<_>>();

    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "expected {ids:?} in order, got {stack:?}"
    );
}

#[test_log::test]
fn slotted_layers_follow_rules() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());
    assert!(!manager.order().mode().is_legacy());

    let routes = routes();
    let progress = RouteProgress::new(0, 0);
    manager.show_routes(Some(&routes), Some(&progress));
    manager.update_route_line(&routes, &progress);

    let main = RouteLineIds::main();
    let alternative = RouteLineIds::alternative(0);
    let arrow = ManeuverArrowIds::default();
    let stack = stack(&manager);

    assert_stacked(
        &stack,
        &[
            "road",
            &alternative.casing,
            &alternative.main,
            &main.casing,
            &main.main,
            &arrow.stroke,
            &arrow.arrow,
            &arrow.symbol_casing,
            &arrow.symbol,
            "poi-label",
            "middle",
            &SymbolIds::intersections().layer,
            &SymbolIds::route_annotations().layer,
        ],
    );

    let layer = manager.engine().layer(&main.main).expect("main line");
    assert_eq!(layer.slot, Some(Slot::middle()));

    let annotation = manager
        .engine()
        .layer(&SymbolIds::route_annotations().layer)
        .expect("annotation");
    assert_eq!(annotation.slot, None);
}

#[test_log::test]
fn legacy_layers_follow_bands() {
    let engine = MemoryEngine::with_style(legacy_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());
    assert!(manager.order().mode().is_legacy());

    let routes = NavigationRoutes::new(main_route());
    let progress = RouteProgress::new(0, 0);
    manager.show_routes(Some(&routes), Some(&progress));
    manager.update_route_line(&routes, &progress);

    let main = RouteLineIds::main();
    let arrow = ManeuverArrowIds::default();

    assert_stacked(
        &stack(&manager),
        &[
            "land",
            "road",
            &main.casing,
            &main.main,
            "road-label",
            &arrow.stroke,
            &arrow.arrow,
            &arrow.symbol_casing,
            &arrow.symbol,
            &SymbolIds::intersections().layer,
            "poi-label",
            &SymbolIds::route_annotations().layer,
        ],
    );

    let layer = manager.engine().layer(&main.main).expect("main line");
    assert_eq!(layer.slot, None);
}

#[test_log::test]
fn legacy_custom_route_line_position() {
    let engine = MemoryEngine::with_style(legacy_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());
    manager.set_custom_route_line_position(Some(Placement::Above("land".to_string())));

    let routes = NavigationRoutes::new(main_route());
    manager.update_route_lines(&routes, None);

    let main = RouteLineIds::main();
    assert_eq!(
        stack(&manager),
        ["land", main.casing.as_str(), main.main.as_str(), "road", "road-label", "poi-label"]
    );
}

#[test_log::test]
fn reload_restores_identical_stack() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = routes();
    let progress = RouteProgress::new(0, 0);
    manager.show_routes(Some(&routes), Some(&progress));
    manager.update_route_line(&routes, &progress);
    let before = stack(&manager);

    manager.begin_style_reload();
    manager.engine_mut().load_style(slotted_style());
    assert!(!manager.engine().layer_exists(&RouteLineIds::main().main));

    manager.on_style_loaded();
    assert_eq!(stack(&manager), before);
    assert!(manager.engine().source_exists(&RouteLineIds::main().source));
    assert!(!manager.is_reloading());

    // Without a reload in between, restoring changes nothing.
    manager.on_style_loaded();
    assert_eq!(stack(&manager), before);
    assert!(manager.order().is_consistent());
}

#[test_log::test]
fn reload_switches_placement_mode() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = NavigationRoutes::new(main_route());
    manager.update_route_lines(&routes, None);

    manager.begin_style_reload();
    manager.engine_mut().load_style(legacy_style());
    manager.on_style_loaded();

    assert!(manager.order().mode().is_legacy());

    let main = RouteLineIds::main();
    assert_stacked(&stack(&manager), &["road", &main.casing, &main.main, "road-label"]);
}

#[test_log::test]
fn updates_during_reload_are_deferred() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = routes();
    manager.update_route_lines(&routes, None);

    manager.begin_style_reload();
    manager.engine_mut().load_style(slotted_style());

    // Only the latest update of a category is kept.
    manager.update_route_lines(&routes, None);
    manager.update_route_lines(&NavigationRoutes::new(main_route()), None);
    manager.update_route_alerts(&routes);

    assert_eq!(
        manager.pending_categories().collect::<Vec<_>>(),
        [FeatureCategory::RouteLines, FeatureCategory::RouteAlerts]
    );
    assert!(!manager.engine().layer_exists(&RouteLineIds::main().main));

    manager.on_style_loaded();

    assert_eq!(manager.pending_categories().count(), 0);
    assert!(manager.engine().layer_exists(&RouteLineIds::main().main));
    assert!(!manager.engine().layer_exists(&RouteLineIds::alternative(0).main));
    assert!(!manager.order().contains(&RouteLineIds::alternative(0).main));

    // The alternative carries the only alert, which is not on the main route.
    assert!(!manager.is_present(FeatureCategory::RouteAlerts));
}

#[test_log::test]
fn removal_during_reload_leaves_base_style() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = routes();
    manager.show_routes(Some(&routes), Some(&RouteProgress::new(0, 0)));

    manager.begin_style_reload();
    manager.engine_mut().load_style(slotted_style());
    manager.show_routes(None, None);
    manager.on_style_loaded();

    assert_eq!(stack(&manager), ["land", "road", "poi-label", "middle", "top"]);
    assert_eq!(manager.order().custom_ids().count(), 0);
    assert!(manager.engine().source_ids().next().is_none());
}

#[test_log::test]
fn empty_route_is_absent() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = NavigationRoutes::new(Route::default());
    manager.show_routes(Some(&routes), Some(&RouteProgress::new(0, 0)));

    assert!(!manager.is_present(FeatureCategory::RouteLines));
    assert!(!manager.is_present(FeatureCategory::Arrows));
    assert!(!manager.is_present(FeatureCategory::RouteAnnotations));
    assert_eq!(stack(&manager), ["land", "road", "poi-label", "middle", "top"]);
}

#[test_log::test]
fn failed_layers_revert_category() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let broken = MapFeature::new("broken")
        .with_layer(LayerSpec::new("broken", LayerKind::Circle).with_source("missing"));
    manager.update(FeatureCategory::Waypoints, Some(vec![broken]));

    assert!(!manager.is_present(FeatureCategory::Waypoints));
    assert!(!manager.engine().layer_exists("broken"));
    assert!(!manager.order().contains("broken"));
}

#[test_log::test]
fn replacing_a_category_drops_previous_layers() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    manager.update_route_lines(&routes(), None);
    assert!(manager.engine().layer_exists(&RouteLineIds::alternative(0).casing));

    manager.update_route_lines(&NavigationRoutes::new(main_route()), None);
    assert!(!manager.engine().layer_exists(&RouteLineIds::alternative(0).casing));
    assert!(!manager.engine().source_exists(&RouteLineIds::alternative(0).source));
    assert_eq!(manager.features(FeatureCategory::RouteLines).len(), 1);
}

#[test_log::test]
fn route_line_vanishes_behind_user() {
    let traversed = Color::rgb(0x80, 0x80, 0x80);
    let config = StyleConfig {
        route_line_tracks_traversal: true,
        traversed_route_color: Some(traversed),
        ..StyleConfig::default()
    };

    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, config);

    let routes = NavigationRoutes::new(main_route());
    manager.show_routes(Some(&routes), None);

    let progress = RouteProgress::new(0, 0).with_fraction_traveled(0.25);
    manager.update_route_line(&routes, &progress);

    let main = RouteLineIds::main();
    assert_stacked(&stack(&manager), &[&main.traversed, &main.casing, &main.main]);

    let layer = manager.engine().layer(&main.main).expect("main line");
    let Some(Value::Array(gradient)) = layer.properties.get("line-gradient") else {
        panic!("main line without gradient");
    };

    assert_eq!(gradient[0], json!("step"));
    assert_eq!(gradient[3], json!(0.0));
    assert_eq!(gradient[4], Value::from(traversed));

    let done = progress.with_fraction_traveled(1.0);
    manager.update_route_line(&routes, &done);

    assert!(!manager.is_present(FeatureCategory::RouteLines));
    assert!(!manager.is_present(FeatureCategory::Arrows));
}

#[test_log::test]
fn no_arrow_onto_destination() {
    let engine = MemoryEngine::with_style(slotted_style());
    let mut manager = StyleManager::new(engine, StyleConfig::default());

    let routes = NavigationRoutes::new(main_route());
    manager.update_arrows(&routes, Some(&RouteProgress::new(0, 0)));
    assert!(manager.is_present(FeatureCategory::Arrows));

    manager.update_arrows(&routes, Some(&RouteProgress::new(0, 1)));
    assert!(!manager.is_present(FeatureCategory::Arrows));
    assert!(!manager.engine().layer_exists(&ManeuverArrowIds::default().arrow));
}

#[test]
fn intersections_use_primary_control() {
    let config = StyleConfig::default();
    let route = main_route();

    let feature = builder::intersection_annotations(&route, &RouteProgress::new(0, 0), &config)
        .expect("intersections");
    let source = &feature.sources[&SymbolIds::intersections().source];

    let icons = source
        .features
        .iter()
        .map(|feature| feature.properties["image_name"].clone())
        .collect::<Vec<_>>();
    assert_eq!(icons, [json!("stop_sign"), json!("traffic_signal")]);

    // Intersections already passed are skipped.
    let progress = RouteProgress::new(0, 0).with_intersection_index(1);
    let feature = builder::intersection_annotations(&route, &progress, &config).expect("intersections");
    assert_eq!(feature.sources[&SymbolIds::intersections().source].features.len(), 1);
}

#[test]
fn voice_instructions_measured_from_step_end() {
    let config = StyleConfig {
        shows_voice_instructions: true,
        ..StyleConfig::default()
    };

    let feature = builder::voice_instructions(&main_route(), &config).expect("voice instructions");
    let source = &feature.sources[&VoiceInstructionIds::default().source];
    assert_eq!(source.features.len(), 1);

    let geo::Geometry::Point(point) = &source.features[0].geometry else {
        panic!("instruction is not a point");
    };

    // 50 m back from the end of a northbound step.
    approx::assert_relative_eq!(point.x(), 13.402, epsilon = 1e-9);
    approx::assert_relative_eq!(point.y(), 52.502 - 50.0 / 111_195.0, epsilon = 1e-5);
}

#[test]
fn annotations_label_tolls_and_deltas() {
    let config = StyleConfig::default();

    let feature = builder::route_annotations(&routes(), &config).expect("annotations");
    let source = &feature.sources[&SymbolIds::route_annotations().source];

    let labels = source
        .features
        .iter()
        .map(|feature| feature.properties["text"].clone())
        .collect::<Vec<_>>();
    assert_eq!(labels, [json!("5 min\nNo Tolls"), json!("+2 min\nTolls")]);
}

#[test]
fn travel_time_formatting() {
    assert_eq!(format_travel_time(0.0, false), "0 min");
    assert_eq!(format_travel_time(89.0, false), "1 min");
    assert_eq!(format_travel_time(3600.0, false), "1 h");
    assert_eq!(format_travel_time(3900.0, false), "1 h 5 min");
    assert_eq!(format_travel_time(180.0, true), "+3 min");
    assert_eq!(format_travel_time(-180.0, true), "-3 min");
}

#[test]
fn config_from_partial_json() {
    let config = StyleConfig::from_json(
        r##"{
            "shows_alternatives": false,
            "traversed_route_color": "#808080",
            "excluded_alerts": ["toll_collection"],
            "custom_route_line_position": { "below": "road-label" }
        }"##,
    )
    .expect("valid config");

    assert!(!config.shows_alternatives);
    assert_eq!(config.traversed_route_color, Some(Color::rgb(0x80, 0x80, 0x80)));
    assert!(!config.is_alert_shown(AlertKind::TollCollection));
    assert!(config.is_alert_shown(AlertKind::Incident));
    assert_eq!(
        config.custom_route_line_position,
        Some(Placement::Below("road-label".to_string()))
    );
    assert_eq!(config.congestion, StyleConfig::default().congestion);
}

#[test]
fn config_rejects_invalid_values() {
    assert!(matches!(
        StyleConfig::from_json(r#"{ "shaft_length": -1.0 }"#),
        Err(StyleError::InvalidConfig(_))
    ));

    assert!(matches!(
        StyleConfig::from_json(r#"{ "route_casing_color": "blue-ish" }"#),
        Err(StyleError::Json(_))
    ));

    let overlapping = r#"{ "congestion": { "ranges": { "low": { "start": 0, "end": 50 } } } }"#;
    assert!(matches!(
        StyleConfig::from_json(overlapping),
        Err(StyleError::InvalidConfig(_))
    ));
}

#[test]
fn errors_convert_into_crate_error() -> Result<(), crate::Error> {
    let parsed = "#2f7ac6".parse::<Color>()?;
    assert_eq!(parsed, Color::rgb(0x2f, 0x7a, 0xc6));

    let style: crate::Error = StyleConfig::from_json("{").unwrap_err().into();
    assert!(matches!(style, crate::Error::Style(StyleError::Json(_))));

    let color: crate::Error = "#zz".parse::<Color>().unwrap_err().into();
    assert!(matches!(color, crate::Error::Color(_)));
    assert!(color.to_string().starts_with("color: "));

    Ok(())
}
