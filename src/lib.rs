// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest and fastest routes over [OpenStreetMap](https://www.openstreetmap.org/) road data.
//!
//! Raw OSM ways and nodes are converted into a directed graph, where every edge
//! carries the speed limit (in miles per hour) of the road it was created from.
//! Which roads are used, and what speed they default to, is described by a
//! [Profile](crate::osm::Profile). Routes are found with a best-first search,
//! either minimizing the traveled distance ([find_short_path]) or the travel
//! time ([find_fast_path]).
//!
//! # Example
//!
//! ```no_run
//! let options = roadroute::osm::Options {
//!     profile: &roadroute::osm::DEFAULT_PROFILE,
//!     file_format: roadroute::osm::FileFormat::Xml,
//! };
//! let g = roadroute::osm::graph_from_file(&options, "path/to/cambridge.osm")
//!     .expect("failed to load cambridge.osm");
//!
//! let start = roadroute::Location { lat: 42.3575, lon: -71.0952 };
//! let end = roadroute::Location { lat: 42.3600, lon: -71.0907 };
//! match roadroute::find_fast_path(&g, start, end) {
//!     Some(route) => println!("Route: {:?}", route),
//!     None => println!("No route"),
//! }
//! ```

mod distance;
mod graph;
pub mod osm;
mod search;

pub use distance::earth_distance;
pub use graph::Graph;
pub use search::{find_fast_path, find_path, find_route, find_short_path, Mode, Route};

/// A position on Earth, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Represents a vertex of the [Graph] - an OSM node used by at least one routable way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    /// Returns the position of this node.
    pub fn location(&self) -> Location {
        Location {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// `speed` is the speed limit on the connection in miles per hour; it is always
/// finite and greater than zero. The length of the connection is not stored,
/// it is computed from the positions of both nodes when needed.
///
/// Due to implementation details, `to` might not exist in the [Graph].
/// Users must silently ignore such edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: i64,
    pub speed: f64,
}
