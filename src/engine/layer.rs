use geo::Geometry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::order::Slot;

/// Rendering type of a layer.
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
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Background,
    Fill,
    Line,
    Symbol,
    Circle,
    Heatmap,
    FillExtrusion,
    Raster,
    Hillshade,
    Sky,
    Model,
    /// Marker layer of a named slot. It draws nothing.
    Slot,
}

/// A layer as reported by the engine's live stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub id: String,
    pub kind: LayerKind,
    pub source_layer: Option<String>,
    /// Persistent layers survive style reloads.
    pub persistent: bool,
    pub circle_pitch_alignment: Option<String>,
}

impl LayerInfo {
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            source_layer: None,
            persistent: false,
            circle_pitch_alignment: None,
        }
    }

    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    pub fn with_persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn with_circle_pitch_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.circle_pitch_alignment = Some(alignment.into());
        self
    }

    pub fn has_source_layer(&self) -> bool {
        self.source_layer
            .as_deref()
            .is_some_and(|source_layer| !source_layer.is_empty())
    }
}

/// A layer the overlay asks the engine to add.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: Option<String>,
    pub slot: Option<Slot>,
    /// Paint and layout properties, keyed by their style name.
    pub properties: IndexMap<String, Value>,
}

impl LayerSpec {
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            source: None,
            slot: None,
            properties: IndexMap::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_slot(mut self, slot: Option<Slot>) -> Self {
        self.slot = slot;
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Reported form of the layer once it is part of the live stack.
    pub fn info(&self) -> LayerInfo {
        LayerInfo::new(self.id.clone(), self.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFeature {
    pub geometry: Geometry<f64>,
    pub properties: IndexMap<String, Value>,
}

impl SourceFeature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: geometry.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// A GeoJSON-like source backing one or more layers.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub id: String,
    pub features: Vec<SourceFeature>,
    /// Required by layers using a line gradient.
    pub line_metrics: bool,
    pub tolerance: Option<f64>,
}

impl SourceSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            features: vec![],
            line_metrics: false,
            tolerance: None,
        }
    }

    pub fn with_features(mut self, features: Vec<SourceFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_line_metrics(mut self, line_metrics: bool) -> Self {
        self.line_metrics = line_metrics;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}
