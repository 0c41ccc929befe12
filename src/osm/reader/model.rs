// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Represents an [OSM node](https://wiki.openstreetmap.org/wiki/Node), as read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
}

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

/// Union over [OSM features/elements](https://wiki.openstreetmap.org/wiki/Elements)
/// relevant for routing.
#[derive(Debug, Clone)]
pub enum Feature {
    Node(NodeRecord),
    Way(Way),
}

/// All nodes and ways read from a single source, in the order of appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    pub nodes: Vec<NodeRecord>,
    pub ways: Vec<Way>,
}

impl Features {
    pub(super) fn push(&mut self, f: Feature) {
        match f {
            Feature::Node(n) => self.nodes.push(n),
            Feature::Way(w) => self.ways.push(w),
        }
    }
}
