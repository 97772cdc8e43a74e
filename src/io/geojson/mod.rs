//! Read from and write to [GeoJSON](https://geojson.org/) files.

pub use reader::{read_geojson, read_geojson_str};
pub use writer::{write_geojson, write_geojson_string};

mod reader;
mod writer;
