//! Ordering of overlay layers within a shared layer stack.
//!
//! The map engine keeps a single ordered stack of layers, mixing
//! layers owned by the base style with layers owned by the overlay.
//! [`LayerOrder`] keeps every known layer id in a sequence sorted
//! by a declared [`RuleSet`], and answers where a given id must be
//! placed in the live stack.
//!
//! ## Rules
//! Rules are consulted in declaration order. A layer id belongs to
//! the first rule whose predicate matches it; a lower rule index
//! places the id lower in the stack. Ids matched by the same rule
//! are ordered by that rule's [`TieBreak`].
//!
//! ```rust
//! use routers_overlay::order::{LayerOrder, PlacementMode, Rule, RuleSet, Slot};
//!
//! let rules = RuleSet::builder()
//!     .slotted(Some(Slot::middle()), |rules| {
//!         rules
//!             .rule(Rule::ordered_ids(["casing", "line"]))
//!             .rule(Rule::prefix("poi"))
//!     })
//!     .build();
//!
//! let mut order = LayerOrder::new(rules, PlacementMode::Slotted);
//! order.set_base_ids(["water", "poi-label"]);
//! order.insert("line");
//! order.insert("casing");
//!
//! assert_eq!(order.ordered_ids(), ["casing", "line", "poi-label"]);
//! ```
//!
//! ## Placement
//! Styles which support slots are served by [`PlacementMode::Slotted`],
//! anchoring each id to its nearest present neighbour within the same
//! slot. Older styles use [`PlacementMode::Legacy`], which derives
//! an anchor from three fixed bands and the live engine stack. See
//! [`legacy`] for the details.

#[doc(hidden)]
pub mod index;
pub mod legacy;
#[doc(hidden)]
pub mod placement;
#[doc(hidden)]
pub mod rule;


#[doc(inline)]
pub use index::LayerOrder;
#[doc(inline)]
pub use legacy::{LegacyBand, LegacyBands, LegacyPlacement, PrefixOverride};
#[doc(inline)]
pub use placement::{Placement, PlacementMode, Slot};
#[doc(inline)]
pub use rule::{MatchPredicate, Rule, RuleSet, RuleSetBuilder, TieBreak};
