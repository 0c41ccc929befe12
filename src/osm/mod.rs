// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Conversion of [OpenStreetMap](https://www.openstreetmap.org/) data into a routing [Graph].

use std::path::Path;

use crate::Graph;

mod graph_builder;
mod profile;
mod reader;

pub use graph_builder::build_graph;
pub use profile::{Profile, RoadClass, DEFAULT_PROFILE};
pub use reader::{
    read_features_from_buffer, read_features_from_file, read_features_from_io, Error, Feature,
    Features, FileFormat, NodeRecord, Way,
};

/// Additional controls for loading OSM data as a routing [Graph].
#[derive(Debug)]
pub struct Options<'a> {
    /// How OSM features should be interpreted and converted into a [Graph].
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,
}

/// Reads OSM data from a file at the provided path and converts it into a [Graph]
/// as per the provided [Options].
pub fn graph_from_file<P: AsRef<Path>>(options: &Options<'_>, path: P) -> Result<Graph, Error> {
    let f = read_features_from_file(options.file_format, path)?;
    Ok(build_graph(options.profile, f.ways, f.nodes))
}

/// Reads OSM data from an in-memory buffer and converts it into a [Graph]
/// as per the provided [Options].
pub fn graph_from_buffer(options: &Options<'_>, data: &[u8]) -> Result<Graph, Error> {
    let f = read_features_from_buffer(options.file_format, data)?;
    Ok(build_graph(options.profile, f.ways, f.nodes))
}
