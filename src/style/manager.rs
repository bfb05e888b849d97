use indexmap::IndexMap;
use log::{debug, info};
use strum::IntoEnumIterator;

use crate::engine::MapEngine;
use crate::order::{LayerOrder, Placement};
use crate::route::{NavigationRoutes, RouteProgress};
use crate::style::builder::{self, RouteLineKind};
use crate::style::rules::{ALTERNATIVES, default_rules, placement_mode};
use crate::style::{FeatureCategory, FeatureStore, MapFeature, StyleConfig};

/// Keeps the overlay's features on the map, in order, across style reloads.
///
/// Every update replaces a whole [`FeatureCategory`]. Updates arriving
/// between [`StyleManager::begin_style_reload`] and
/// [`StyleManager::on_style_loaded`] are held back, keeping only the
/// latest one per category, and applied once the new style is in place.
pub struct StyleManager<E: MapEngine> {
    engine: E,
    config: StyleConfig,
    order: LayerOrder,
    stores: IndexMap<FeatureCategory, FeatureStore>,

    reloading: bool,
    pending: IndexMap<FeatureCategory, Option<Vec<MapFeature>>>,
}

impl<E: MapEngine> StyleManager<E> {
    pub fn new(engine: E, config: StyleConfig) -> Self {
        let mode = placement_mode(&engine, config.custom_route_line_position.as_ref());
        let mut order = LayerOrder::new(default_rules(), mode);
        order.set_base_ids(engine.layer_ids());

        debug!(
            "Style manager created in {} mode",
            if order.mode().is_legacy() { "legacy" } else { "slotted" }
        );

        Self {
            engine,
            config,
            order,
            stores: FeatureCategory::iter()
                .map(|category| (category, FeatureStore::new(category)))
                .collect(),
            reloading: false,
            pending: IndexMap::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct access to the engine. Loading a new style through it must be
    /// bracketed by [`StyleManager::begin_style_reload`] and
    /// [`StyleManager::on_style_loaded`].
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn order(&self) -> &LayerOrder {
        &self.order
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Replaces the configuration. Features already on the map keep
    /// their look until they are next updated.
    pub fn set_config(&mut self, config: StyleConfig) {
        let position_changed = config.custom_route_line_position != self.config.custom_route_line_position;
        self.config = config;

        if position_changed {
            self.refresh_mode();
        }
    }

    pub fn set_custom_route_line_position(&mut self, position: Option<Placement>) {
        self.config.custom_route_line_position = position;
        self.refresh_mode();
    }

    fn refresh_mode(&mut self) {
        let mode = placement_mode(&self.engine, self.config.custom_route_line_position.as_ref());
        self.order.set_mode(mode);
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn is_present(&self, category: FeatureCategory) -> bool {
        self.stores
            .get(&category)
            .is_some_and(FeatureStore::is_present)
    }

    pub fn features(&self, category: FeatureCategory) -> &[MapFeature] {
        self.stores
            .get(&category)
            .map(FeatureStore::features)
            .unwrap_or_default()
    }

    /// Categories with an update held back by a reload in progress.
    pub fn pending_categories(&self) -> impl Iterator<Item = FeatureCategory> + '_ {
        self.pending.keys().copied()
    }

    /// Marks the start of a style reload. Updates are queued until
    /// [`StyleManager::on_style_loaded`].
    pub fn begin_style_reload(&mut self) {
        debug!("Style reload started");
        self.reloading = true;
    }

    /// Rebuilds the ordering against the freshly loaded style and restores
    /// every present category, then applies the updates queued meanwhile.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = tracing::Level::INFO, skip_all))]
    pub fn on_style_loaded(&mut self) {
        let mode = placement_mode(&self.engine, self.config.custom_route_line_position.as_ref());
        let custom = self.order.custom_ids().map(str::to_string).collect::<Vec<_>>();
        let base_ids = self
            .engine
            .layer_ids()
            .into_iter()
            .filter(|id| !custom.contains(id))
            .collect::<Vec<_>>();

        self.order = self.order.rebuild(mode);
        self.order.set_base_ids(base_ids);

        info!(
            "Style loaded with {} layers, restoring overlay",
            self.order.style_ids().len()
        );

        for store in self.stores.values_mut() {
            store.style_loaded(&mut self.engine, &mut self.order);
        }

        self.reloading = false;

        for (category, features) in std::mem::take(&mut self.pending) {
            debug!("Applying {category} update queued during reload");
            self.update(category, features);
        }
    }

    /// Replaces the features of `category`, or queues the replacement
    /// while a reload is in progress.
    pub fn update(&mut self, category: FeatureCategory, features: Option<Vec<MapFeature>>) {
        if self.reloading {
            debug!("Queueing {category} update until the style has loaded");
            self.pending.insert(category, features);
            return;
        }

        if let Some(store) = self.stores.get_mut(&category) {
            store.update(features, &mut self.engine, &mut self.order);
        }
    }

    /// Draws `routes` from scratch, dropping everything drawn before.
    pub fn show_routes(&mut self, routes: Option<&NavigationRoutes>, progress: Option<&RouteProgress>) {
        self.remove_all_features();

        let Some(routes) = routes else {
            return;
        };

        self.update_route_lines(routes, progress);
        self.update_waypoints(routes, progress.map(|progress| progress.leg_index));
        self.update_voice_instructions(routes);
        self.update_route_annotations(routes);
        self.update_route_alerts(routes);

        if let Some(progress) = progress {
            self.update_intersection_annotations(routes, progress);
        }
    }

    /// Follows the user along the main route. Once the route is complete
    /// and the line tracks traversal, the line and arrow are removed.
    pub fn update_route_line(&mut self, routes: &NavigationRoutes, progress: &RouteProgress) {
        self.update_intersection_annotations(routes, progress);
        self.update_route_alerts(routes);

        if progress.is_complete() && self.config.route_line_tracks_traversal {
            self.update(FeatureCategory::RouteLines, None);
            self.update(FeatureCategory::Arrows, None);
            return;
        }

        self.update_arrows(routes, Some(progress));
        if self.config.route_line_tracks_traversal {
            self.update_route_lines(routes, Some(progress));
        }
    }

    pub fn update_route_lines(&mut self, routes: &NavigationRoutes, progress: Option<&RouteProgress>) {
        let main = builder::route_line(&routes.main, RouteLineKind::Main, &self.config, progress);

        let alternatives = routes
            .alternatives
            .iter()
            .filter(|_| self.config.shows_alternatives)
            .take(ALTERNATIVES)
            .enumerate()
            .filter_map(|(index, alternative)| {
                builder::route_line(
                    &alternative.route,
                    RouteLineKind::Alternative(index),
                    &self.config,
                    None,
                )
            });

        let features = main.into_iter().chain(alternatives).collect::<Vec<_>>();
        self.update(FeatureCategory::RouteLines, Some(features));
    }

    pub fn update_waypoints(&mut self, routes: &NavigationRoutes, leg_index: Option<usize>) {
        let feature = builder::waypoints(&routes.main, leg_index, &self.config);
        self.update(FeatureCategory::Waypoints, feature.map(|feature| vec![feature]));
    }

    pub fn update_arrows(&mut self, routes: &NavigationRoutes, progress: Option<&RouteProgress>) {
        let feature = progress
            .and_then(|progress| builder::maneuver_arrow(&routes.main, progress, &self.config));
        self.update(FeatureCategory::Arrows, feature.map(|feature| vec![feature]));
    }

    pub fn update_voice_instructions(&mut self, routes: &NavigationRoutes) {
        let feature = builder::voice_instructions(&routes.main, &self.config);
        self.update(FeatureCategory::VoiceInstructions, feature.map(|feature| vec![feature]));
    }

    pub fn update_intersection_annotations(&mut self, routes: &NavigationRoutes, progress: &RouteProgress) {
        let feature = builder::intersection_annotations(&routes.main, progress, &self.config);
        self.update(
            FeatureCategory::IntersectionAnnotations,
            feature.map(|feature| vec![feature]),
        );
    }

    pub fn update_route_annotations(&mut self, routes: &NavigationRoutes) {
        let feature = builder::route_annotations(routes, &self.config);
        self.update(FeatureCategory::RouteAnnotations, feature.map(|feature| vec![feature]));
    }

    pub fn update_route_alerts(&mut self, routes: &NavigationRoutes) {
        let feature = builder::route_alerts(routes, &self.config);
        self.update(FeatureCategory::RouteAlerts, feature.map(|feature| vec![feature]));
    }

    pub fn remove_all_features(&mut self) {
        for category in FeatureCategory::iter() {
            self.update(category, None);
        }
    }
}
