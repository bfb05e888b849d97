use log::{debug, warn};
use strum::{AsRefStr, Display, EnumIter};

use crate::engine::MapEngine;
use crate::order::LayerOrder;
use crate::style::MapFeature;

/// Kinds of features drawn by the overlay, in the order they are
/// restored after a style reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureCategory {
    RouteLines,
    Waypoints,
    Arrows,
    VoiceInstructions,
    IntersectionAnnotations,
    RouteAnnotations,
    RouteAlerts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeatureState {
    #[default]
    Absent,
    Present(Vec<MapFeature>),
}

/// The features of one category currently on the map.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    category: FeatureCategory,
    state: FeatureState,
}

impl FeatureStore {
    pub fn new(category: FeatureCategory) -> Self {
        Self {
            category,
            state: FeatureState::Absent,
        }
    }

    pub fn category(&self) -> FeatureCategory {
        self.category
    }

    pub fn state(&self) -> &FeatureState {
        &self.state
    }

    pub fn is_present(&self) -> bool {
        matches!(self.state, FeatureState::Present(_))
    }

    pub fn features(&self) -> &[MapFeature] {
        match &self.state {
            FeatureState::Present(features) => features,
            FeatureState::Absent => &[],
        }
    }

    /// Replaces whatever is on the map with `features`. `None`, or no
    /// features at all, removes the category.
    pub fn update<E: MapEngine>(
        &mut self,
        features: Option<Vec<MapFeature>>,
        engine: &mut E,
        order: &mut LayerOrder,
    ) {
        if let FeatureState::Present(previous) = std::mem::take(&mut self.state) {
            for feature in &previous {
                feature.remove(engine, order);
            }
        }

        let features = features.unwrap_or_default();
        if features.is_empty() {
            debug!("{} removed", self.category);
            return;
        }

        self.state = self.add(features, engine, order);
    }

    /// Re-adds every present feature to a freshly loaded style.
    pub fn style_loaded<E: MapEngine>(&mut self, engine: &mut E, order: &mut LayerOrder) {
        if let FeatureState::Present(features) = std::mem::take(&mut self.state) {
            debug!("Restoring {} ({} features)", self.category, features.len());
            self.state = self.add(features, engine, order);
        }
    }

    /// Adds `features`, keeping those with at least one layer on the map.
    fn add<E: MapEngine>(
        &self,
        features: Vec<MapFeature>,
        engine: &mut E,
        order: &mut LayerOrder,
    ) -> FeatureState {
        let mut kept = Vec::with_capacity(features.len());

        for feature in features {
            if feature.add(engine, order) > 0 {
                kept.push(feature);
            } else {
                warn!("No layer of {} could be added, dropping it", feature.id);
                feature.remove(engine, order);
            }
        }

        if kept.is_empty() {
            warn!("{} reverted to absent", self.category);
            FeatureState::Absent
        } else {
            FeatureState::Present(kept)
        }
    }
}
