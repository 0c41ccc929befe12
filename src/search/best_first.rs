// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use super::frontier::Frontier;
use super::{Mode, Route};
use crate::{earth_distance, Edge, Graph, Location, Node};

/// Uses a [best-first search](https://en.wikipedia.org/wiki/Best-first_search)
/// to find a route between two nodes in the provided graph.
///
/// Returns `None` if either node doesn't exist in the graph, or if there is no route
/// between them. If both ids are the same, the route consists of that single node
/// and has a cost of zero.
///
/// With [Mode::Distance] and [Mode::Time] this is a
/// [uniform-cost search](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm#Practical_optimizations_and_infinite_graphs),
/// and the returned route is optimal. See [Mode::GuidedDistance] for the caveats of
/// the guided mode.
pub fn find_route(g: &Graph, from_id: i64, to_id: i64, mode: Mode) -> Option<Route> {
    let to_node = g.get_node(to_id)?;
    let from_node = g.get_node(from_id)?;
    let destination = to_node.location();

    let score_bias = |n: &Node| -> f64 {
        match mode {
            Mode::GuidedDistance => earth_distance(n.location(), destination),
            Mode::Distance | Mode::Time => 0.0,
        }
    };

    let mut frontier = Frontier::new(from_id, score_bias(&from_node));
    let mut expanded: HashSet<i64> = HashSet::default();

    while let Some(entry) = frontier.pop() {
        // The frontier may contain multiple entries for the same node,
        // only the first one to be removed matters.
        if expanded.contains(&entry.at) {
            continue;
        }

        if entry.at == to_id {
            log::debug!(
                "route from {} to {} found after expanding {} nodes ({} entries left)",
                from_id,
                to_id,
                expanded.len(),
                frontier.len(),
            );
            return Some(Route {
                nodes: frontier.path(entry.link),
                cost: entry.cost,
                expanded: expanded.len(),
            });
        }

        expanded.insert(entry.at);
        let terminal = match g.get_node(entry.at) {
            Some(n) => n,
            None => continue,
        };

        for &Edge {
            to: neighbor_id,
            speed,
        } in g.get_edges(entry.at)
        {
            if expanded.contains(&neighbor_id) {
                continue;
            }

            // Check if the referred node exists
            if let Some(neighbor) = g.get_node(neighbor_id) {
                let distance = earth_distance(terminal.location(), neighbor.location());
                let step = match mode {
                    Mode::Distance | Mode::GuidedDistance => distance,
                    Mode::Time => distance / speed,
                };

                let cost = entry.cost + step;
                frontier.push(&entry, neighbor_id, cost, cost + score_bias(&neighbor));
            }
        }
    }

    log::debug!(
        "no route from {} to {} after expanding {} nodes",
        from_id,
        to_id,
        expanded.len(),
    );
    None
}

/// Finds a route between the nodes closest to two arbitrary positions,
/// and returns the positions of all nodes along that route (start and end inclusive).
///
/// Snapping to the closest nodes requires computing the distance to every
/// node in the graph, see [Graph::find_nearest_node].
///
/// Returns `None` if the graph is empty, or if there is no route between
/// the two closest nodes.
pub fn find_path(g: &Graph, from: Location, to: Location, mode: Mode) -> Option<Vec<Location>> {
    let start = g.find_nearest_node(from)?;
    let end = g.find_nearest_node(to)?;
    let route = find_route(g, start.id, end.id, mode)?;

    Some(
        route
            .nodes
            .iter()
            .filter_map(|&id| g.get_node(id))
            .map(|n| n.location())
            .collect(),
    )
}

/// Returns a short route (in terms of distance) between two positions,
/// using [Mode::GuidedDistance]. See [find_path] for details.
pub fn find_short_path(g: &Graph, from: Location, to: Location) -> Option<Vec<Location>> {
    find_path(g, from, to, Mode::GuidedDistance)
}

/// Returns the fastest route (in terms of travel time at the speed limits)
/// between two positions, using [Mode::Time]. See [find_path] for details.
pub fn find_fast_path(g: &Graph, from: Location, to: Location) -> Option<Vec<Location>> {
    find_path(g, from, to, Mode::Time)
}
