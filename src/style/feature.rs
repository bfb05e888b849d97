use indexmap::IndexMap;
use log::{debug, error, warn};

use crate::engine::{LayerSpec, MapEngine, SourceSpec};
use crate::order::{LayerOrder, Placement};

/// A group of sources and the layers drawing them, added and
/// removed as one.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: String,
    pub sources: IndexMap<String, SourceSpec>,
    /// Layers in the order they are added.
    pub layers: IndexMap<String, LayerSpec>,
}

impl MapFeature {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sources: IndexMap::new(),
            layers: IndexMap::new(),
        }
    }

    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.sources.insert(source.id.clone(), source);
        self
    }

    pub fn with_layer(mut self, layer: LayerSpec) -> Self {
        self.layers.insert(layer.id.clone(), layer);
        self
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Adds the sources and layers of the feature, placing every layer
    /// according to `order`. Returns the number of layers added.
    pub fn add<E: MapEngine>(&self, engine: &mut E, order: &mut LayerOrder) -> usize {
        for source in self.sources.values() {
            let result = if engine.source_exists(&source.id) {
                engine.update_source(source.clone())
            } else {
                engine.add_source(source.clone())
            };

            if let Err(err) = result {
                error!("Failed to add source {} of {}: {err}", source.id, self.id);
            }
        }

        let mut added = 0;
        for layer in self.layers.values() {
            if engine.layer_exists(&layer.id) {
                if let Err(err) = engine.remove_layer(&layer.id) {
                    warn!("Failed to remove stale layer {}: {err}", layer.id);
                }
            }

            order.insert(&layer.id);

            let slot = order
                .slot(&layer.id)
                .filter(|slot| engine.supports_slot(slot))
                .cloned();
            let placement = order
                .position(&layer.id, &engine.layers())
                .filter(|placement| match placement {
                    Placement::Slot(slot) => engine.supports_slot(slot),
                    _ => true,
                });

            debug!(
                "Adding layer {} at {}",
                layer.id,
                placement.as_ref().map_or("top".to_string(), ToString::to_string)
            );

            let spec = layer.clone().with_slot(slot);
            match engine.add_layer(spec, placement) {
                Ok(()) => added += 1,
                Err(err) => error!("Failed to add layer {} of {}: {err}", layer.id, self.id),
            }
        }

        added
    }

    /// Removes the layers of the feature from the engine and from
    /// `order`, then its sources.
    pub fn remove<E: MapEngine>(&self, engine: &mut E, order: &mut LayerOrder) {
        for id in self.layer_ids() {
            if engine.layer_exists(id) {
                if let Err(err) = engine.remove_layer(id) {
                    error!("Failed to remove layer {id} of {}: {err}", self.id);
                }
            }
            order.remove(id);
        }

        for id in self.sources.keys() {
            if engine.source_exists(id) {
                if let Err(err) = engine.remove_source(id) {
                    error!("Failed to remove source {id} of {}: {err}", self.id);
                }
            }
        }
    }
}
