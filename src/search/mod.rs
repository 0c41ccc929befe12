// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod best_first;
mod frontier;

pub use best_first::{find_fast_path, find_path, find_route, find_short_path};

/// What a route search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Minimize the great-circle length of the route, in miles.
    /// Always finds the shortest route.
    Distance,

    /// Minimize the great-circle length of the route, in miles,
    /// preferring paths whose last node is close to the destination.
    ///
    /// The next path to extend is the one with the lowest sum of its length and
    /// the straight-line distance from its last node to the destination. This greedy
    /// lookahead usually reaches the destination after expanding far fewer nodes than
    /// [Mode::Distance], but the search doesn't keep any A*-style bookkeeping of the
    /// best known costs, so the returned route should only be considered plausibly
    /// short, not guaranteed to be the shortest.
    GuidedDistance,

    /// Minimize the travel time of the route, in hours, assuming every connection
    /// is traveled at its speed limit. Always finds the fastest route.
    Time,
}

/// Result of a route search.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ids of all nodes along the route, including the start and end nodes.
    pub nodes: Vec<i64>,

    /// Total cost of the route, in units depending on the [Mode].
    pub cost: f64,

    /// Number of nodes expanded by the search before the destination was reached.
    pub expanded: usize,
}
