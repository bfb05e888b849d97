//! Placement for styles without slot support.
//!
//! Managed ids are split into three [`LegacyBand`]s, each an explicit
//! ordered list:
//!
//! - [`LegacyBand::Lowermost`]: route lines. They belong above the topmost
//!   non-symbol base layer backed by a source layer.
//! - [`LegacyBand::AboveRoad`]: maneuver arrows and road-side icons. They
//!   belong above the topmost road label.
//! - [`LegacyBand::Uppermost`]: voice instruction markers, waypoints and the
//!   location puck. They belong above every base layer backed by a source layer.
//!
//! The live stack is scanned once from the top. Managed ids which precede the
//! queried id in the concatenated band lists give an `above` anchor (the
//! topmost one wins); ids following it give a `below` anchor (the bottommost
//! one wins). Layers outside of the bands feed the search for the band's
//! fallback target. A neighbour anchor which would put the id on the wrong
//! side of its band boundary is replaced by `above(target)`.

use log::trace;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use strum::{Display, EnumIter};

use crate::engine::{LayerInfo, LayerKind};
use crate::order::Placement;

/// Substring identifying the road label layers of a base style.
pub const ROAD_LABEL_MARKER: &str = "road-label";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LegacyBand {
    Lowermost,
    AboveRoad,
    Uppermost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyBands {
    pub lowermost: Vec<String>,
    pub above_road: Vec<String>,
    pub uppermost: Vec<String>,
}

impl LegacyBands {
    pub fn band_of(&self, id: &str) -> Option<LegacyBand> {
        if self.lowermost.iter().any(|other| other == id) {
            Some(LegacyBand::Lowermost)
        } else if self.above_road.iter().any(|other| other == id) {
            Some(LegacyBand::AboveRoad)
        } else if self.uppermost.iter().any(|other| other == id) {
            Some(LegacyBand::Uppermost)
        } else {
            None
        }
    }

    /// Every managed id, lowermost first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.lowermost
            .iter()
            .chain(&self.above_road)
            .chain(&self.uppermost)
            .map(String::as_str)
    }

    fn contains(&self, band: LegacyBand, id: &str) -> bool {
        let ids = match band {
            LegacyBand::Lowermost => &self.lowermost,
            LegacyBand::AboveRoad => &self.above_road,
            LegacyBand::Uppermost => &self.uppermost,
        };

        ids.iter().any(|other| other == id)
    }
}

/// A placement which applies to every id sharing a prefix, as long
/// as none of those ids are present in the live stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixOverride {
    pub prefix: String,
    pub placement: Placement,
}

#[derive(Debug, Clone, Default)]
pub struct LegacyPlacement {
    bands: LegacyBands,
    prefix_override: Option<PrefixOverride>,
}

impl LegacyPlacement {
    pub fn new(bands: LegacyBands) -> Self {
        Self {
            bands,
            prefix_override: None,
        }
    }

    pub fn with_override(mut self, prefix_override: Option<PrefixOverride>) -> Self {
        self.prefix_override = prefix_override;
        self
    }

    pub fn bands(&self) -> &LegacyBands {
        &self.bands
    }

    /// Position of `id` against the live stack, ordered bottom to top.
    pub fn position(&self, id: &str, live: &[LayerInfo]) -> Option<Placement> {
        if let Some(PrefixOverride { prefix, placement }) = &self.prefix_override {
            if id.starts_with(prefix.as_str())
                && !live.iter().any(|layer| layer.id.starts_with(prefix.as_str()))
            {
                return Some(placement.clone());
            }
        }

        let band = self.bands.band_of(id);
        let all = self.bands.all().collect::<SmallVec<[&str; 24]>>();

        let (lower, upper) = match all.iter().position(|other| *other == id) {
            Some(index) => (
                all[..index].iter().copied().collect::<FxHashSet<_>>(),
                all[index + 1..].iter().copied().collect::<FxHashSet<_>>(),
            ),
            None => (FxHashSet::default(), FxHashSet::default()),
        };

        let mut anchor: Option<Placement> = None;
        let mut found_lower = false;
        let mut target: Option<&str> = None;

        for layer in live.iter().rev() {
            let layer_id = layer.id.as_str();

            if lower.contains(layer_id) {
                if !found_lower {
                    anchor = Some(Placement::Above(layer.id.clone()));
                    found_lower = true;
                }
            } else if upper.contains(layer_id) {
                anchor = Some(Placement::Below(layer.id.clone()));
            } else if target.is_none() && Self::is_target(band, layer) {
                target = Some(layer_id);
            }
        }

        trace!("Legacy anchor for {id}: {anchor:?}, target: {target:?}");

        let Some(target) = target else {
            return anchor;
        };
        let Some(anchor) = anchor else {
            return Some(Placement::Above(target.to_string()));
        };

        let crosses_boundary = match (band, &anchor) {
            // Anything above a lowermost id, but outside of the band, is a symbol layer.
            (Some(LegacyBand::Lowermost), Placement::Below(other)) => {
                !self.bands.contains(LegacyBand::Lowermost, other)
            }
            (Some(LegacyBand::AboveRoad), Placement::Below(other)) => {
                self.bands.contains(LegacyBand::Uppermost, other)
            }
            (Some(LegacyBand::AboveRoad), Placement::Above(other)) => {
                self.bands.contains(LegacyBand::Lowermost, other)
            }
            // An uppermost id never sits directly above a lower band's layer.
            (Some(LegacyBand::Uppermost), Placement::Above(other)) => {
                !self.bands.contains(LegacyBand::Uppermost, other)
            }
            _ => false,
        };

        if crosses_boundary {
            Some(Placement::Above(target.to_string()))
        } else {
            Some(anchor)
        }
    }

    /// Whether a base layer can serve as the fallback target of `band`.
    fn is_target(band: Option<LegacyBand>, layer: &LayerInfo) -> bool {
        match band {
            Some(LegacyBand::Lowermost) => {
                if layer.kind == LayerKind::Symbol || !layer.has_source_layer() {
                    return false;
                }

                // Circles only count when they are drawn flat onto the map.
                layer.kind != LayerKind::Circle
                    || (!layer.persistent
                        && layer.circle_pitch_alignment.as_deref() == Some("map"))
            }
            Some(LegacyBand::AboveRoad) => layer.id.contains(ROAD_LABEL_MARKER),
            Some(LegacyBand::Uppermost) | None => layer.has_source_layer(),
        }
    }
}
