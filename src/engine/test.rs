use crate::engine::{EngineError, LayerInfo, LayerKind, LayerSpec, MapEngine, MemoryEngine, SourceSpec};
use crate::order::{Placement, Slot};

fn style() -> MemoryEngine {
    MemoryEngine::with_style([
        LayerInfo::new("land", LayerKind::Background),
        LayerInfo::new("bottom", LayerKind::Slot),
        LayerInfo::new("road", LayerKind::Line).with_source_layer("road"),
        LayerInfo::new("middle", LayerKind::Slot),
        LayerInfo::new("road-label", LayerKind::Symbol).with_source_layer("road"),
        LayerInfo::new("top", LayerKind::Slot),
    ])
}

#[test_log::test]
fn lists_slots_in_stack_order() {
    let engine = style();

    assert_eq!(engine.slots(), ["bottom", "middle", "top"]);
    assert!(engine.supports_slot(&Slot::middle()));
    assert!(!engine.supports_slot(&Slot::new("overlay")));
}

#[test_log::test]
fn honours_anchored_placements() {
    let mut engine = style();

    engine
        .add_layer(LayerSpec::new("a", LayerKind::Line), Some(Placement::Above("road".into())))
        .unwrap();
    engine
        .add_layer(LayerSpec::new("b", LayerKind::Line), Some(Placement::Below("a".into())))
        .unwrap();

    assert_eq!(
        engine.layer_ids(),
        ["land", "bottom", "road", "b", "a", "middle", "road-label", "top"]
    );
}

#[test_log::test]
fn slot_placement_goes_below_marker() {
    let mut engine = style();

    engine
        .add_layer(LayerSpec::new("a", LayerKind::Line), Some(Placement::Slot(Slot::middle())))
        .unwrap();
    engine
        .add_layer(LayerSpec::new("b", LayerKind::Line), Some(Placement::Slot(Slot::middle())))
        .unwrap();
    engine
        .add_layer(
            LayerSpec::new("c", LayerKind::Line).with_slot(Some(Slot::bottom())),
            None,
        )
        .unwrap();
    engine.add_layer(LayerSpec::new("d", LayerKind::Symbol), None).unwrap();

    assert_eq!(
        engine.layer_ids(),
        ["land", "c", "bottom", "road", "a", "b", "middle", "road-label", "top", "d"]
    );
}

#[test_log::test]
fn rejects_invalid_operations() {
    let mut engine = style();

    assert_eq!(
        engine.add_layer(LayerSpec::new("road", LayerKind::Line), None),
        Err(EngineError::DuplicateLayer("road".into()))
    );
    assert_eq!(
        engine.add_layer(LayerSpec::new("a", LayerKind::Line), Some(Placement::Above("missing".into()))),
        Err(EngineError::MissingAnchor("missing".into()))
    );
    assert_eq!(
        engine.add_layer(
            LayerSpec::new("a", LayerKind::Line),
            Some(Placement::Slot(Slot::new("overlay")))
        ),
        Err(EngineError::MissingSlot("overlay".into()))
    );
    assert_eq!(
        engine.add_layer(LayerSpec::new("a", LayerKind::Line).with_source("route"), None),
        Err(EngineError::MissingSource("route".into()))
    );
    assert_eq!(
        engine.remove_layer("missing"),
        Err(EngineError::MissingLayer("missing".into()))
    );
    assert!(!engine.layer_exists("a"));
}

#[test_log::test]
fn sources_round_trip() {
    let mut engine = style();

    engine.add_source(SourceSpec::new("route")).unwrap();
    assert_eq!(
        engine.add_source(SourceSpec::new("route")),
        Err(EngineError::DuplicateSource("route".into()))
    );

    engine
        .update_source(SourceSpec::new("route").with_line_metrics(true))
        .unwrap();
    assert!(engine.source("route").is_some_and(|source| source.line_metrics));

    engine.remove_source("route").unwrap();
    assert!(!engine.source_exists("route"));
    assert_eq!(
        engine.update_source(SourceSpec::new("route")),
        Err(EngineError::MissingSource("route".into()))
    );
}

#[test_log::test]
fn reloading_style_drops_overlay() {
    let mut engine = style();

    engine.add_source(SourceSpec::new("route")).unwrap();
    engine
        .add_layer(LayerSpec::new("line", LayerKind::Line).with_source("route"), None)
        .unwrap();

    engine.load_style([LayerInfo::new("land", LayerKind::Background)]);

    assert_eq!(engine.layer_ids(), ["land"]);
    assert!(engine.layer("line").is_none());
    assert!(!engine.source_exists("route"));
}
