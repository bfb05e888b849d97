use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::order::legacy::LegacyPlacement;

/// A named coarse rendering bucket of a style.
///
/// Layers assigned to a slot are drawn together with the base-map
/// layers of that slot, independent of their fine-grained order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(String);

impl Slot {
    pub const BOTTOM: &'static str = "bottom";
    pub const MIDDLE: &'static str = "middle";
    pub const TOP: &'static str = "top";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn bottom() -> Self {
        Self::new(Self::BOTTOM)
    }

    pub fn middle() -> Self {
        Self::new(Self::MIDDLE)
    }

    pub fn top() -> Self {
        Self::new(Self::TOP)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a layer is inserted into the engine's layer stack.
///
/// The absence of a placement (`None` wherever an `Option<Placement>`
/// is used) means the layer is appended to the top of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Directly above the given layer.
    Above(String),
    /// Directly below the given layer.
    Below(String),
    /// At the top of the given slot.
    Slot(Slot),
}

impl Placement {
    /// The layer this placement is anchored to, if any.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Placement::Above(id) | Placement::Below(id) => Some(id),
            Placement::Slot(_) => None,
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Above(id) => write!(f, "above({id})"),
            Placement::Below(id) => write!(f, "below({id})"),
            Placement::Slot(slot) => write!(f, "slot({slot})"),
        }
    }
}

/// Capability of the loaded style, selected once per style load.
#[derive(Debug, Clone)]
pub enum PlacementMode {
    /// The style exposes named slots.
    Slotted,
    /// The style predates slots; positions are derived from the
    /// live layer stack.
    Legacy(LegacyPlacement),
}

impl PlacementMode {
    pub fn is_legacy(&self) -> bool {
        matches!(self, PlacementMode::Legacy(_))
    }
}
