//! Route data consumed by the overlay.
//!
//! Routes are calculated elsewhere; the types here carry only what the
//! feature builders need: geometry per step, per-segment annotations,
//! waypoints and points of interest along the way.

#[doc(hidden)]
pub mod geometry;
#[doc(hidden)]
pub mod model;
#[doc(hidden)]
pub mod progress;


#[doc(inline)]
pub use geometry::{coordinate_along, join_shapes, slice_around};
#[doc(inline)]
pub use model::{
    AlertKind, AlternativeRoute, Intersection, IntersectionKind, ManeuverKind, NavigationRoutes, Route,
    RouteAlert, RouteLeg, RouteStep, SpokenInstruction, Waypoint,
};
#[doc(inline)]
pub use progress::RouteProgress;
