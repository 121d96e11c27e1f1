/*
 * Selection Module
 *
 * Resolves a discrete click to at most one swarm. A swarm qualifies when the
 * click lands strictly inside its visual radius. When several swarms overlap
 * the click, the policy decides which one wins.
 */

use nannou::prelude::*;

use crate::swarm::Swarm;

/// How overlapping hits are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    // First qualifying swarm in iteration order
    #[default]
    FirstFound,
    // Qualifying swarm with the closest center
    Nearest,
}

/// Index of the swarm hit by a click at `point`, if any.
pub fn resolve(swarms: &[Swarm], point: Point2, policy: SelectionPolicy) -> Option<usize> {
    let mut hits = swarms
        .iter()
        .enumerate()
        .filter(|(_, swarm)| swarm.contains(point));

    match policy {
        SelectionPolicy::FirstFound => hits.next().map(|(index, _)| index),
        SelectionPolicy::Nearest => hits
            .min_by(|(_, a), (_, b)| a.distance_to(point).total_cmp(&b.distance_to(point)))
            .map(|(index, _)| index),
    }
}
