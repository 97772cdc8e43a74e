use std::io::Write;

use geojson::FeatureCollection;
use log::debug;

use crate::error::Result;

/// Write a [`FeatureCollection`] as compact GeoJSON.
pub fn write_geojson<W: Write>(collection: &FeatureCollection, writer: W) -> Result<()> {
    serde_json::to_writer(writer, collection)?;
    debug!("wrote {} features", collection.features.len());
    Ok(())
}

/// Like [`write_geojson`], to a string.
pub fn write_geojson_string(collection: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string(collection)?)
}
