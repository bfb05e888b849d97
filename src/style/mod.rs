//! Reconciliation of the overlay's features with the map style.
//!
//! The overlay draws a handful of [`FeatureCategory`]s: route lines,
//! waypoints, maneuver arrows and various markers. Each is kept in a
//! [`FeatureStore`] which is either absent from the map or present with
//! a set of [`MapFeature`]s. The [`StyleManager`] owns the stores, the
//! engine and the [`LayerOrder`](crate::order::LayerOrder), and places
//! every layer it adds according to [`default_rules`].
//!
//! Loading a new style wipes every added layer and source. The manager
//! rebuilds the ordering from the new style and restores every present
//! category, in category order:
//!
//! ```rust
//! use routers_overlay::engine::{LayerInfo, LayerKind, MemoryEngine};
//! use routers_overlay::style::{FeatureCategory, StyleConfig, StyleManager};
//!
//! let style = || [LayerInfo::new("land", LayerKind::Fill), LayerInfo::new("middle", LayerKind::Slot)];
//! let mut manager = StyleManager::new(MemoryEngine::with_style(style()), StyleConfig::default());
//!
//! manager.begin_style_reload();
//! manager.engine_mut().load_style(style());
//! manager.on_style_loaded();
//!
//! assert!(!manager.is_present(FeatureCategory::RouteLines));
//! ```

pub mod builder;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod feature;
pub mod ids;
#[doc(hidden)]
pub mod manager;
#[doc(hidden)]
pub mod rules;
#[doc(hidden)]
pub mod store;

#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use config::{CongestionConfiguration, DEFAULT_SHAFT_LENGTH, StyleConfig};
#[doc(inline)]
pub use error::StyleError;
#[doc(inline)]
pub use feature::MapFeature;
#[doc(inline)]
pub use manager::StyleManager;
#[doc(inline)]
pub use rules::{default_rules, legacy_bands, placement_mode};
#[doc(inline)]
pub use store::{FeatureCategory, FeatureState, FeatureStore};
