use indexmap::IndexSet;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::engine::LayerInfo;
use crate::order::{Placement, PlacementMode, Rule, RuleSet, Slot};

/// Maintains the relative order of every known layer id.
///
/// Ids come from two places: the base style, supplied through
/// [`LayerOrder::set_base_ids`], and the overlay, supplied one at a
/// time through [`LayerOrder::insert`]. Only ids matched by a rule,
/// and custom ids, take part in the ordering.
///
/// Invariant: `indices[id]` is the position of `id` in `ordered`
/// for every tracked id.
#[derive(Debug, Clone)]
pub struct LayerOrder {
    rules: RuleSet,
    mode: PlacementMode,

    /// Ids owned by the map style.
    style_ids: Vec<String>,
    /// Ids owned by the overlay, in the order they were first inserted.
    custom_ids: IndexSet<String>,

    ordered: Vec<String>,
    indices: FxHashMap<String, usize>,
    slots: FxHashMap<String, Slot>,
}

impl LayerOrder {
    pub fn new(rules: RuleSet, mode: PlacementMode) -> Self {
        Self {
            rules,
            mode,
            style_ids: vec![],
            custom_ids: IndexSet::new(),
            ordered: vec![],
            indices: FxHashMap::default(),
            slots: FxHashMap::default(),
        }
    }

    /// Creates a fresh order for a newly loaded style, sharing the
    /// rules and remembering the custom ids tracked by `self`.
    ///
    /// The custom ids are only ordered once [`LayerOrder::set_base_ids`]
    /// is called on the returned value.
    pub fn rebuild(&self, mode: PlacementMode) -> Self {
        Self {
            custom_ids: self.custom_ids.clone(),
            ..Self::new(self.rules.clone(), mode)
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn mode(&self) -> &PlacementMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.mode = mode;
    }

    /// Sets the ids managed by the map style, then re-inserts every
    /// tracked custom id.
    pub fn set_base_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_ids = ids.into_iter().map(Into::into).collect();
        self.ordered = self
            .style_ids
            .iter()
            .filter(|id| self.rules.matches(id))
            .cloned()
            .collect();

        let mut seen = FxHashSet::default();
        self.ordered.retain(|id| seen.insert(id.clone()));

        self.indices = self
            .ordered
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect();
        self.slots.clear();

        let custom_ids = self.custom_ids.iter().cloned().collect::<Vec<_>>();
        debug!(
            "Ordering {} style ids, re-inserting {} custom ids",
            self.ordered.len(),
            custom_ids.len()
        );

        for id in custom_ids {
            self.insert(&id);
        }
    }

    /// Inserts an id, making it available to [`LayerOrder::position`].
    /// Inserting an already ordered id marks it as custom and records
    /// its slot, leaving the order untouched.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = tracing::Level::TRACE, skip(self)))]
    pub fn insert(&mut self, id: &str) {
        self.custom_ids.insert(id.to_string());

        if let Some(slot) = self.rule_slot(id).cloned() {
            self.slots.insert(id.to_string(), slot);
        }

        if self.indices.contains_key(id) {
            return;
        }

        let Some(rule_index) = self.rules.rule_index(id) else {
            trace!("No rule matches {id}, appending");
            self.ordered.push(id.to_string());
            self.indices.insert(id.to_string(), self.ordered.len() - 1);
            return;
        };

        let insertion_index = self.insertion_index(id, rule_index);
        self.ordered.insert(insertion_index, id.to_string());
        self.reindex_from(insertion_index);

        trace!("Inserted {id} at {insertion_index}");
    }

    /// Binary search for the index at which `id`, matched by the
    /// rule at `rule_index`, belongs.
    fn insertion_index(&self, id: &str, rule_index: usize) -> usize {
        let mut left = 0;
        let mut right = self.ordered.len();

        while left < right {
            let mid = left + (right - left) / 2;
            let current = self.ordered[mid].as_str();

            match self.rules.rule_index(current) {
                Some(current_index) if current_index > rule_index => right = mid,
                Some(current_index) if current_index == rule_index => {
                    if self.rules.get(rule_index).is_some_and(|rule| rule.is_ordered_ascending(current, id)) {
                        left = mid + 1;
                    } else {
                        right = mid;
                    }
                }
                Some(_) => left = mid + 1,
                None => right = mid,
            }
        }

        left
    }

    /// Removes an id from the order. Untracked ids are ignored.
    pub fn remove(&mut self, id: &str) {
        let Some(index) = self.indices.remove(id) else {
            return;
        };

        self.ordered.remove(index);
        self.reindex_from(index);
        self.slots.remove(id);
        self.custom_ids.shift_remove(id);
    }

    fn reindex_from(&mut self, start: usize) {
        for (index, id) in self.ordered.iter().enumerate().skip(start) {
            self.indices.insert(id.clone(), index);
        }
    }

    /// Where `id` must be placed, given the engine's live layer stack
    /// (bottom to top). Returns `None` for unknown ids in slotted mode,
    /// meaning the layer is appended with default ordering.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = tracing::Level::TRACE, skip(self, live), ret))]
    pub fn position(&self, id: &str, live: &[LayerInfo]) -> Option<Placement> {
        match &self.mode {
            PlacementMode::Slotted => self.slotted_position(id, live),
            PlacementMode::Legacy(legacy) => legacy.position(id, live),
        }
    }

    /// Anchors `id` to its nearest ordered neighbour which is present
    /// in the live stack and shares its slot, preferring the one below.
    /// Without such a neighbour, the id is placed at the top of its slot.
    fn slotted_position(&self, id: &str, live: &[LayerInfo]) -> Option<Placement> {
        let index = *self.indices.get(id)?;
        let slot = self.rule_slot(id);

        let present = live
            .iter()
            .map(|layer| layer.id.as_str())
            .collect::<FxHashSet<_>>();
        let is_neighbour = |other: &&String| {
            present.contains(other.as_str()) && self.rule_slot(other) == slot
        };

        if let Some(below) = self.ordered[..index].iter().rev().find(is_neighbour) {
            return Some(Placement::Above(below.clone()));
        }

        if let Some(above) = self.ordered[index + 1..].iter().find(is_neighbour) {
            return Some(Placement::Below(above.clone()));
        }

        slot.cloned().map(Placement::Slot)
    }

    fn rule_slot(&self, id: &str) -> Option<&Slot> {
        self.rules.rule(id).and_then(Rule::slot)
    }

    /// The slot resolved for a custom id.
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub fn ordered_ids(&self) -> &[String] {
        &self.ordered
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.indices.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    pub fn style_ids(&self) -> &[String] {
        &self.style_ids
    }

    pub fn custom_ids(&self) -> impl Iterator<Item = &str> {
        self.custom_ids.iter().map(String::as_str)
    }

    /// Checks that the index mirrors the ordering exactly.
    pub fn is_consistent(&self) -> bool {
        self.indices.len() == self.ordered.len()
            && self
                .ordered
                .iter()
                .enumerate()
                .all(|(index, id)| self.indices.get(id) == Some(&index))
    }
}
