//! Boundary to the map rendering engine.
//!
//! The overlay never owns the layer stack. It drives the engine through
//! [`MapEngine`], reading the live stack back whenever a placement has to
//! be computed. [`MemoryEngine`] is a headless implementation which honours
//! placements exactly.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod layer;
#[doc(hidden)]
pub mod memory;

#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::EngineError;
#[doc(inline)]
pub use layer::{LayerInfo, LayerKind, LayerSpec, SourceFeature, SourceSpec};
#[doc(inline)]
pub use memory::MemoryEngine;

use crate::order::{Placement, Slot};

pub trait MapEngine {
    /// The live layer stack, bottom to top.
    fn layers(&self) -> Vec<LayerInfo>;

    /// Names of the slots exposed by the loaded style.
    fn slots(&self) -> Vec<String>;

    fn layer_exists(&self, id: &str) -> bool;

    /// Adds a layer. Without a placement, the layer goes to the top of
    /// the slot the layer names, or to the top of the stack.
    fn add_layer(&mut self, spec: LayerSpec, placement: Option<Placement>) -> Result<(), EngineError>;

    fn remove_layer(&mut self, id: &str) -> Result<(), EngineError>;

    fn source_exists(&self, id: &str) -> bool;

    fn add_source(&mut self, spec: SourceSpec) -> Result<(), EngineError>;

    /// Replaces the data of an existing source.
    fn update_source(&mut self, spec: SourceSpec) -> Result<(), EngineError>;

    fn remove_source(&mut self, id: &str) -> Result<(), EngineError>;

    fn layer_ids(&self) -> Vec<String> {
        self.layers().into_iter().map(|layer| layer.id).collect()
    }

    fn supports_slot(&self, slot: &Slot) -> bool {
        self.slots().iter().any(|name| name == slot.as_str())
    }
}
