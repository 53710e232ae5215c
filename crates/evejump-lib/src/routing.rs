//! Multi-waypoint jump-route planning.
//!
//! The planner runs one single-pair search per destination, advancing the
//! current position to each destination it reaches. Legs that cannot be
//! routed are logged and skipped; the remaining itinerary is still attempted
//! from the last successfully reached system.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::path::{find_jump_path, PathResult, SearchConstraints, SearchLimits};
use crate::range::{max_jump_range, AttributeProvider, TypeId};
use crate::starmap::{Starmap, SystemId};

/// A multi-waypoint route planning request.
#[derive(Debug, Clone)]
pub struct JumpRouteRequest {
    /// System the itinerary begins in.
    pub start: SystemId,
    /// Destinations in visiting order.
    pub destinations: Vec<SystemId>,
    /// Hull whose jump-range attribute bounds each hop.
    pub ship_type_id: TypeId,
    /// Jump calibration skill level, usually 0-5.
    pub skill_level: u8,
    /// Systems the caller never wants in a route.
    pub avoid_systems: HashSet<SystemId>,
    /// Also avoid systems currently under incursion.
    pub avoid_incursions: bool,
    /// Systems flagged by the incursion feed. Only consulted when
    /// `avoid_incursions` is set.
    pub incursion_systems: Vec<SystemId>,
    pub limits: SearchLimits,
}

impl JumpRouteRequest {
    /// Request with no avoidance and default limits.
    pub fn new(
        start: SystemId,
        destinations: Vec<SystemId>,
        ship_type_id: TypeId,
        skill_level: u8,
    ) -> Self {
        Self {
            start,
            destinations,
            ship_type_id,
            skill_level,
            avoid_systems: HashSet::new(),
            avoid_incursions: false,
            incursion_systems: Vec::new(),
            limits: SearchLimits::default(),
        }
    }

    /// Effective avoidance set for the whole itinerary.
    ///
    /// Incursion systems are unioned in only when requested, and a system the
    /// user explicitly chose as the start or a destination is never
    /// auto-excluded, even while under incursion.
    fn effective_avoidance(&self) -> HashSet<SystemId> {
        let mut avoided = self.avoid_systems.clone();
        if self.avoid_incursions {
            for &system in &self.incursion_systems {
                if system == self.start || self.destinations.contains(&system) {
                    continue;
                }
                avoided.insert(system);
            }
        }
        avoided
    }
}

/// Plan a route through every destination of `request`, in order.
///
/// Returns one [`PathResult`] per destination that could be reached; the
/// output may be shorter than the destination list. Unroutable legs are
/// logged, never raised. An empty destination list yields an empty vector.
pub fn plan_jump_route<P>(
    starmap: &Starmap,
    attributes: &P,
    request: &JumpRouteRequest,
) -> Vec<PathResult>
where
    P: AttributeProvider + ?Sized,
{
    let range = max_jump_range(attributes, request.ship_type_id, request.skill_level);
    debug!(
        ship_type_id = request.ship_type_id,
        skill_level = request.skill_level,
        range,
        "planning jump route"
    );

    let constraints = SearchConstraints {
        max_jump_range: range,
        avoided_systems: request.effective_avoidance(),
        origin: request.start,
        limits: request.limits,
    };

    let mut results = Vec::new();
    let mut position = request.start;

    for &destination in &request.destinations {
        if !starmap.is_known_system(destination) {
            warn!(system = destination, "skipping unknown destination");
            continue;
        }

        match find_jump_path(starmap, position, destination, &constraints) {
            Some(result) => {
                debug!(
                    from = position,
                    to = destination,
                    jumps = result.jump_count(),
                    distance = result.total_distance,
                    "leg planned"
                );
                position = destination;
                results.push(result);
            }
            None => {
                warn!(
                    from = position,
                    to = destination,
                    "no feasible jump route for leg"
                );
            }
        }
    }

    results
}
