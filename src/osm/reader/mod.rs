// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::Path;

pub use model::{Feature, Features, NodeRecord, Way};

mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format from the extension of a file name,
    /// defaulting to [FileFormat::Xml].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") => Self::XmlGz,
            Some("bz2") => Self::XmlBz2,
            _ => Self::Xml,
        }
    }
}

/// Error which can occur when reading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

fn collect<I>(features: I) -> Result<Features, Error>
where
    I: Iterator<Item = Result<Feature, quick_xml::Error>>,
{
    let mut all = Features::default();
    for f in features {
        all.push(f?);
    }
    log::debug!(
        "read {} nodes and {} ways",
        all.nodes.len(),
        all.ways.len()
    );
    Ok(all)
}

/// Reads all OSM nodes and ways from a stream in the provided [FileFormat].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_features_from_io<R: io::Read>(format: FileFormat, reader: R) -> Result<Features, Error> {
    match format {
        FileFormat::Xml => {
            let b = io::BufReader::new(reader);
            collect(xml::Reader::from_io(b))
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            let b = io::BufReader::new(d);
            collect(xml::Reader::from_io(b))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            let b = io::BufReader::new(d);
            collect(xml::Reader::from_io(b))
        }
    }
}

/// Reads all OSM nodes and ways from a file at the provided path.
pub fn read_features_from_file<P: AsRef<Path>>(
    format: FileFormat,
    path: P,
) -> Result<Features, Error> {
    let f = File::open(path)?;
    read_features_from_io(format, f)
}

/// Reads all OSM nodes and ways from an in-memory buffer.
pub fn read_features_from_buffer(format: FileFormat, data: &[u8]) -> Result<Features, Error> {
    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        collect(xml::Reader::from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        read_features_from_io(format, io::Cursor::new(data))
    }
}
