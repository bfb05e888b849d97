use indexmap::IndexMap;
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::engine::{EngineError, LayerInfo, LayerKind, LayerSpec, MapEngine, SourceSpec};
use crate::order::{Placement, Slot};

/// A `Vec`-backed engine.
///
/// Slots are modelled as [`LayerKind::Slot`] marker layers named after the
/// slot. A layer placed into a slot is inserted directly below its marker,
/// that is, on top of everything already in the slot.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    stack: Vec<LayerInfo>,
    specs: FxHashMap<String, LayerSpec>,
    sources: IndexMap<String, SourceSpec>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(layers: impl IntoIterator<Item = LayerInfo>) -> Self {
        let mut engine = Self::new();
        engine.load_style(layers);
        engine
    }

    /// Replaces the whole stack with the layers of a new style.
    /// Every source and every added layer is dropped.
    pub fn load_style(&mut self, layers: impl IntoIterator<Item = LayerInfo>) {
        self.stack = layers.into_iter().collect();
        self.specs.clear();
        self.sources.clear();

        debug!("Loaded style with {} layers", self.stack.len());
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.specs.get(id)
    }

    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id)
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.stack.iter().position(|layer| layer.id == id)
    }

    fn slot_index(&self, slot: &Slot) -> Result<usize, EngineError> {
        self.stack
            .iter()
            .position(|layer| layer.kind == LayerKind::Slot && layer.id == slot.as_str())
            .ok_or_else(|| EngineError::MissingSlot(slot.to_string()))
    }

    fn anchor_index(&self, id: &str) -> Result<usize, EngineError> {
        self.index_of(id)
            .ok_or_else(|| EngineError::MissingAnchor(id.to_string()))
    }
}

impl MapEngine for MemoryEngine {
    fn layers(&self) -> Vec<LayerInfo> {
        self.stack.clone()
    }

    fn slots(&self) -> Vec<String> {
        self.stack
            .iter()
            .filter(|layer| layer.kind == LayerKind::Slot)
            .map(|layer| layer.id.clone())
            .collect()
    }

    fn layer_exists(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    fn add_layer(&mut self, spec: LayerSpec, placement: Option<Placement>) -> Result<(), EngineError> {
        if self.layer_exists(&spec.id) {
            return Err(EngineError::DuplicateLayer(spec.id));
        }

        if let Some(source) = &spec.source {
            if !self.source_exists(source) {
                return Err(EngineError::MissingSource(source.clone()));
            }
        }

        let index = match &placement {
            Some(Placement::Above(anchor)) => self.anchor_index(anchor)? + 1,
            Some(Placement::Below(anchor)) => self.anchor_index(anchor)?,
            Some(Placement::Slot(slot)) => self.slot_index(slot)?,
            None => match &spec.slot {
                Some(slot) => self.slot_index(slot)?,
                None => self.stack.len(),
            },
        };

        trace!("Adding layer {} at {index}", spec.id);

        self.stack.insert(index, spec.info());
        self.specs.insert(spec.id.clone(), spec);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), EngineError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| EngineError::MissingLayer(id.to_string()))?;

        self.stack.remove(index);
        self.specs.remove(id);
        Ok(())
    }

    fn source_exists(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, spec: SourceSpec) -> Result<(), EngineError> {
        if self.source_exists(&spec.id) {
            return Err(EngineError::DuplicateSource(spec.id));
        }

        self.sources.insert(spec.id.clone(), spec);
        Ok(())
    }

    fn update_source(&mut self, spec: SourceSpec) -> Result<(), EngineError> {
        match self.sources.get_mut(&spec.id) {
            Some(source) => {
                *source = spec;
                Ok(())
            }
            None => Err(EngineError::MissingSource(spec.id)),
        }
    }

    fn remove_source(&mut self, id: &str) -> Result<(), EngineError> {
        self.sources
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::MissingSource(id.to_string()))
    }
}
