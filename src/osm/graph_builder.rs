// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{Edge, Graph, Node};

use super::{NodeRecord, Profile, Way};

/// Converts raw OSM ways and nodes into a [Graph], as per the provided [Profile].
///
/// Ways are processed first, in order. Ways with a classification not listed
/// in the [Profile] are ignored altogether. Every routable way creates edges between
/// consecutive nodes, weighted by the way's speed limit; one-way ways only in the
/// order of their nodes. When multiple ways connect the same two nodes in the same
/// direction, the lower speed limit is kept.
///
/// Afterwards, nodes are used to provide positions for all nodes referenced by
/// routable ways. Other nodes are discarded.
pub fn build_graph<W, N>(profile: &Profile<'_>, ways: W, nodes: N) -> Graph
where
    W: IntoIterator<Item = Way>,
    N: IntoIterator<Item = NodeRecord>,
{
    let mut b = GraphBuilder::new(profile);
    for w in ways {
        b.add_way(&w);
    }
    b.finish(nodes)
}

/// Helper object used for storing state related to converting OSM ways and nodes
/// into a [Graph].
struct GraphBuilder<'a> {
    profile: &'a Profile<'a>,

    /// Ids of all registered nodes, in order of registration.
    order: Vec<i64>,

    /// Outgoing edges of every registered node.
    edges: HashMap<i64, Vec<Edge>>,
}

impl<'a> GraphBuilder<'a> {
    fn new(profile: &'a Profile<'a>) -> Self {
        Self {
            profile,
            order: Vec::default(),
            edges: HashMap::default(),
        }
    }

    fn add_way(&mut self, w: &Way) {
        let speed = match self.profile.way_speed(&w.tags) {
            Some(speed) => speed,
            None => {
                log::trace!("way {} is not routable", w.id);
                return;
            }
        };
        debug_assert!(speed.is_finite() && speed > 0.0);

        let oneway = self.profile.is_oneway(&w.tags);

        for pair in w.nodes.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            self.merge_edge(left, right, speed);
            if !oneway {
                self.merge_edge(right, left, speed);
            }
        }

        // The last node of a one-way way might not have any outgoing edges,
        // but it still needs to be present for snapping and route completion.
        if oneway {
            if let Some(&last) = w.nodes.last() {
                self.register(last);
            }
        }
    }

    /// Ensures a node with the given id is present in the graph.
    fn register(&mut self, id: i64) -> &mut Vec<Edge> {
        match self.edges.entry(id) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(id);
                e.insert(Vec::default())
            }
        }
    }

    /// Creates an edge from one node to another, or lowers the speed
    /// of an existing one.
    fn merge_edge(&mut self, from: i64, to: i64, speed: f64) {
        let edges = self.register(from);
        match edges.iter_mut().find(|e| e.to == to) {
            Some(existing) => existing.speed = existing.speed.min(speed),
            None => edges.push(Edge { to, speed }),
        }
    }

    fn finish<N: IntoIterator<Item = NodeRecord>>(mut self, nodes: N) -> Graph {
        let mut positions: HashMap<i64, (f64, f64)> = HashMap::with_capacity(self.order.len());
        for n in nodes {
            if self.edges.contains_key(&n.id) {
                positions.insert(n.id, (n.lat, n.lon));
            }
        }

        let mut vertices = Vec::with_capacity(self.order.len());
        for id in self.order {
            let edges = self.edges.remove(&id).unwrap_or_default();
            match positions.get(&id) {
                Some(&(lat, lon)) => vertices.push((Node { id, lat, lon }, edges)),
                None => log::warn!("node {} is used by a way, but has no position - dropping", id),
            }
        }

        let g = Graph::from_vertices(vertices);
        log::debug!(
            "built graph with {} nodes and {} edges using the {} profile",
            g.len(),
            g.edge_count(),
            self.profile.name,
        );
        g
    }
}

#[cfg(test)]
mod tests {
    use super::super::DEFAULT_PROFILE;
    use super::*;

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    fn way(id: i64, nodes: &[i64], tags: HashMap<String, String>) -> Way {
        Way {
            id,
            nodes: nodes.to_vec(),
            tags,
        }
    }

    fn node(id: i64, lat: f64, lon: f64) -> NodeRecord {
        NodeRecord {
            id,
            lat,
            lon,
            tags: HashMap::default(),
        }
    }

    fn nodes(ids: std::ops::RangeInclusive<i64>) -> Vec<NodeRecord> {
        ids.map(|id| node(id, 0.0, id as f64 * 0.01)).collect()
    }

    #[test]
    fn two_way_edges() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![way(100, &[1, 2, 3], tags! {"highway": "residential"})],
            nodes(1..=3),
        );

        assert_eq!(g.len(), 3);
        assert_eq!(g.get_edge(1, 2), Some(25.0));
        assert_eq!(g.get_edge(2, 1), Some(25.0));
        assert_eq!(g.get_edge(2, 3), Some(25.0));
        assert_eq!(g.get_edge(3, 2), Some(25.0));
        assert_eq!(g.get_edge(1, 3), None);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn oneway_edges() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![way(
                100,
                &[1, 2, 3],
                tags! {"highway": "primary", "oneway": "yes"},
            )],
            nodes(1..=3),
        );

        assert_eq!(g.get_edge(1, 2), Some(35.0));
        assert_eq!(g.get_edge(2, 3), Some(35.0));
        assert_eq!(g.get_edge(2, 1), None);
        assert_eq!(g.get_edge(3, 2), None);

        // Dead end still must be a part of the graph
        assert!(g.contains(3));
        assert!(g.get_edges(3).is_empty());
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn oneway_requires_exact_yes() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![
                way(100, &[1, 2], tags! {"highway": "primary", "oneway": "no"}),
                way(101, &[2, 3], tags! {"highway": "primary", "oneway": "-1"}),
            ],
            nodes(1..=3),
        );

        assert_eq!(g.get_edge(2, 1), Some(35.0));
        assert_eq!(g.get_edge(3, 2), Some(35.0));
        assert_eq!(g.get_edge(2, 3), Some(35.0));
    }

    #[test]
    fn explicit_speed() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![way(
                100,
                &[1, 2],
                tags! {"highway": "motorway", "maxspeed_mph": "55"},
            )],
            nodes(1..=2),
        );

        assert_eq!(g.get_edge(1, 2), Some(55.0));
        assert_eq!(g.get_edge(2, 1), Some(55.0));
    }

    #[test]
    fn parallel_ways_keep_minimum_speed() {
        for ways in [
            vec![
                way(100, &[1, 2], tags! {"highway": "residential"}),
                way(101, &[1, 2], tags! {"highway": "motorway"}),
            ],
            vec![
                way(101, &[1, 2], tags! {"highway": "motorway"}),
                way(100, &[1, 2], tags! {"highway": "residential"}),
            ],
        ] {
            let g = build_graph(&DEFAULT_PROFILE, ways, nodes(1..=2));
            assert_eq!(g.get_edge(1, 2), Some(25.0));
            assert_eq!(g.get_edge(2, 1), Some(25.0));
            assert_eq!(g.get_edges(1).len(), 1);
        }
    }

    #[test]
    fn directions_merge_independently() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![
                way(100, &[1, 2], tags! {"highway": "trunk"}),
                way(
                    101,
                    &[2, 1],
                    tags! {"highway": "living_street", "oneway": "yes"},
                ),
            ],
            nodes(1..=2),
        );

        assert_eq!(g.get_edge(1, 2), Some(45.0));
        assert_eq!(g.get_edge(2, 1), Some(10.0));
    }

    #[test]
    fn ineligible_ways_are_ignored() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![
                way(100, &[1, 2], tags! {"highway": "secondary"}),
                way(101, &[2, 3, 4], tags! {"highway": "footway"}),
                way(102, &[4, 5], tags! {"railway": "rail"}),
                way(103, &[3, 1], tags! {"highway": "cycleway", "maxspeed_mph": "15"}),
            ],
            nodes(1..=5),
        );

        assert_eq!(g.len(), 2);
        assert!(!g.contains(3));
        assert!(!g.contains(4));
        assert!(!g.contains(5));
        assert_eq!(g.get_edge(2, 3), None);
        assert_eq!(g.get_edge(1, 3), None);
        assert!(g.iter().all(|n| g.get_edges(n.id).iter().all(|e| e.to <= 2)));
    }

    #[test]
    fn positions_and_registration_order() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![
                way(100, &[30, 10], tags! {"highway": "tertiary"}),
                way(101, &[10, 20], tags! {"highway": "tertiary"}),
            ],
            vec![
                node(10, 1.0, 2.0),
                node(20, 3.0, 4.0),
                node(30, 5.0, 6.0),
                node(40, 7.0, 8.0),
            ],
        );

        let ids: Vec<i64> = g.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(
            g.get_node(20),
            Some(Node {
                id: 20,
                lat: 3.0,
                lon: 4.0
            })
        );
        assert!(!g.contains(40));
    }

    #[test]
    fn nodes_without_position_are_dropped() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![way(100, &[1, 2, 3], tags! {"highway": "residential"})],
            vec![node(1, 0.0, 0.0), node(2, 0.0, 0.01)],
        );

        assert_eq!(g.len(), 2);
        assert!(!g.contains(3));
        assert!(g.iter().all(|n| n.lat.is_finite() && n.lon.is_finite()));
    }

    #[test]
    fn degenerate_ways() {
        let g = build_graph(
            &DEFAULT_PROFILE,
            vec![
                way(100, &[], tags! {"highway": "residential", "oneway": "yes"}),
                way(101, &[1], tags! {"highway": "residential"}),
                way(102, &[2], tags! {"highway": "residential", "oneway": "yes"}),
            ],
            nodes(1..=2),
        );

        // A single-node one-way way still registers its last node
        assert_eq!(g.len(), 1);
        assert!(g.contains(2));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn empty_input() {
        let g = build_graph(&DEFAULT_PROFILE, Vec::<Way>::new(), Vec::<NodeRecord>::new());
        assert!(g.is_empty());
    }
}
