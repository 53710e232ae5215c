//! Single-pair jump-route search.
//!
//! The search is A* over the jump graph with a two-part cost: jump count
//! first, cumulative light-year distance as the tie-breaker. Fewer jumps
//! always beat a shorter total distance; pilots spool a jump drive per hop,
//! so hop count is the expensive part of a route.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::starmap::{JumpConnection, Starmap, SystemId};

/// Systems at or above this security status are not routable. The itinerary
/// origin is exempt so a route can still leave high-security space.
pub const MAX_ROUTABLE_SECURITY: f64 = 0.5;

/// Optional bounds applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of open-set pops before the search gives up.
    /// `None` leaves the search unbounded.
    pub max_iterations: Option<usize>,
}

/// Constraints applied while relaxing edges.
#[derive(Debug, Clone)]
pub struct SearchConstraints {
    /// Maximum distance the ship can cover in one jump.
    pub max_jump_range: f64,
    /// Systems that must not appear in the resulting path.
    pub avoided_systems: HashSet<SystemId>,
    /// Origin of the whole itinerary. Exempt from the security rule so
    /// routes may start from (and pass back through) high-security space.
    pub origin: SystemId,
    pub limits: SearchLimits,
}

impl SearchConstraints {
    fn allows(&self, starmap: &Starmap, edge: &JumpConnection) -> bool {
        if self.avoided_systems.contains(&edge.target) {
            return false;
        }
        if edge.light_years > self.max_jump_range {
            return false;
        }
        edge.target == self.origin || security_eligible(starmap, edge.target)
    }
}

/// Whether a system is eligible for routing under the security rule.
///
/// Missing security data counts as ineligible, not as a wildcard.
pub(crate) fn security_eligible(starmap: &Starmap, system: SystemId) -> bool {
    matches!(
        starmap.security_status(system),
        Some(status) if status < MAX_ROUTABLE_SECURITY
    )
}

/// One traversed edge in a finished route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub from: SystemId,
    pub to: SystemId,
    pub light_years: f64,
}

/// Outcome of routing to a single destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Visited systems, start first.
    pub path: Vec<SystemId>,
    /// Traversed edges; always one fewer than `path` entries.
    pub segments: Vec<PathSegment>,
    /// Sum of the segment distances in light-years.
    pub total_distance: f64,
}

impl PathResult {
    /// Number of jumps taken.
    pub fn jump_count(&self) -> usize {
        self.segments.len()
    }

    fn single(system: SystemId) -> Self {
        Self {
            path: vec![system],
            segments: Vec::new(),
            total_distance: 0.0,
        }
    }
}

/// Search cost ordered by jump count first, distance second.
#[derive(Debug, Clone, Copy)]
pub struct JumpCost {
    pub jumps: u32,
    pub light_years: f64,
}

impl JumpCost {
    const ZERO: Self = Self {
        jumps: 0,
        light_years: 0.0,
    };

    fn step(self, light_years: f64) -> Self {
        Self {
            jumps: self.jumps + 1,
            light_years: self.light_years + light_years,
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            jumps: self.jumps + other.jumps,
            light_years: self.light_years + other.light_years,
        }
    }
}

impl PartialEq for JumpCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JumpCost {}

impl PartialOrd for JumpCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JumpCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.jumps
            .cmp(&other.jumps)
            .then_with(|| self.light_years.total_cmp(&other.light_years))
    }
}

/// Find a route from `start` to `goal` subject to the given constraints.
///
/// Returns `None` when either endpoint is unknown, the goal fails the
/// security rule, or the open set is exhausted without reaching the goal.
/// "No route" is an ordinary outcome here, never an error.
pub fn find_jump_path(
    starmap: &Starmap,
    start: SystemId,
    goal: SystemId,
    constraints: &SearchConstraints,
) -> Option<PathResult> {
    if start == goal {
        return Some(PathResult::single(start));
    }

    if !starmap.is_known_system(start) || !starmap.is_known_system(goal) {
        return None;
    }
    if goal != constraints.origin && !security_eligible(starmap, goal) {
        return None;
    }

    // Predecessor map stores the parent together with the distance of the
    // edge taken, so reconstruction does not re-query the adjacency table.
    let mut parents: HashMap<SystemId, (SystemId, f64)> = HashMap::new();
    let mut best: HashMap<SystemId, JumpCost> = HashMap::new();
    let mut closed: HashSet<SystemId> = HashSet::new();
    let mut open = BinaryHeap::new();

    best.insert(start, JumpCost::ZERO);
    open.push(OpenEntry::new(
        start,
        JumpCost::ZERO,
        estimate_remaining(starmap, start, goal),
    ));

    let mut iterations = 0usize;
    while let Some(entry) = open.pop() {
        iterations += 1;
        if let Some(cap) = constraints.limits.max_iterations {
            if iterations > cap {
                debug!(cap, start, goal, "search iteration cap exceeded");
                return None;
            }
        }

        if closed.contains(&entry.node) {
            continue;
        }
        // Lazy deletion: a better cost was recorded after this entry was pushed.
        if best.get(&entry.node).is_some_and(|cost| *cost < entry.cost) {
            continue;
        }

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        closed.insert(entry.node);

        for edge in starmap.connections_of(entry.node) {
            if closed.contains(&edge.target) {
                continue;
            }
            if !constraints.allows(starmap, edge) {
                continue;
            }

            let tentative = entry.cost.step(edge.light_years);
            let improved = best
                .get(&edge.target)
                .is_none_or(|known| tentative < *known);
            if improved {
                best.insert(edge.target, tentative);
                parents.insert(edge.target, (entry.node, edge.light_years));
                open.push(OpenEntry::new(
                    edge.target,
                    tentative,
                    estimate_remaining(starmap, edge.target, goal),
                ));
            }
        }
    }

    None
}

/// Admissible estimate of the cost remaining from `from` to `goal`.
///
/// One jump of the known distance when a direct edge exists, otherwise a
/// flat two jumps and 1.0 ly. The flat constants deliberately underestimate
/// against this graph's edge costs; changing them risks inadmissibility.
fn estimate_remaining(starmap: &Starmap, from: SystemId, goal: SystemId) -> JumpCost {
    match starmap
        .connections_of(from)
        .iter()
        .find(|edge| edge.target == goal)
    {
        Some(edge) => JumpCost {
            jumps: 1,
            light_years: edge.light_years,
        },
        None => JumpCost {
            jumps: 2,
            light_years: 1.0,
        },
    }
}

fn reconstruct_path(
    parents: &HashMap<SystemId, (SystemId, f64)>,
    start: SystemId,
    goal: SystemId,
) -> PathResult {
    let mut path = vec![goal];
    let mut segments = Vec::new();
    let mut current = goal;

    while current != start {
        let Some(&(parent, light_years)) = parents.get(&current) else {
            break;
        };
        segments.push(PathSegment {
            from: parent,
            to: current,
            light_years,
        });
        path.push(parent);
        current = parent;
    }

    path.reverse();
    segments.reverse();
    let total_distance = segments.iter().map(|segment| segment.light_years).sum();

    PathResult {
        path,
        segments,
        total_distance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    node: SystemId,
    cost: JumpCost,
    estimate: JumpCost,
}

impl OpenEntry {
    fn new(node: SystemId, cost: JumpCost, remaining: JumpCost) -> Self {
        Self {
            node,
            cost,
            estimate: cost.plus(remaining),
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
