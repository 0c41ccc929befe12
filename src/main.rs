use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use roadroute::osm::FileFormat;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] roadroute::osm::Error);

#[derive(Debug, thiserror::Error)]
#[error("no route found")]
struct NoRouteError;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Xml => FileFormat::Xml,
            Format::XmlGz => FileFormat::XmlGz,
            Format::XmlBz2 => FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// Latitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,

    /// Longitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,

    /// Format of the OSM file; guessed from the file extension if not provided
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Find the fastest route, instead of the shortest one
    #[arg(long)]
    fast: bool,

    /// Log progress information to stderr
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let format = cli
        .format
        .map(FileFormat::from)
        .unwrap_or_else(|| FileFormat::from_path(&cli.osm_file));
    let g = load_graph(&cli.osm_file, format)?;

    let start = roadroute::Location {
        lat: cli.start_lat,
        lon: cli.start_lon,
    };
    let end = roadroute::Location {
        lat: cli.end_lat,
        lon: cli.end_lon,
    };

    let route = if cli.fast {
        roadroute::find_fast_path(&g, start, end)
    } else {
        roadroute::find_short_path(&g, start, end)
    }
    .ok_or(NoRouteError)?;

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut points = route.iter().peekable();
    while let Some(point) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", point.lon, point.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_graph<P: AsRef<Path>>(path: P, format: FileFormat) -> Result<roadroute::Graph, GraphLoadError> {
    let options = roadroute::osm::Options {
        profile: &roadroute::osm::DEFAULT_PROFILE,
        file_format: format,
    };
    roadroute::osm::graph_from_file(&options, path.as_ref())
        .map_err(|e| GraphLoadError(PathBuf::from(path.as_ref()), e))
}
