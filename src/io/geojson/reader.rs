use std::io::Read;

use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use log::debug;

use crate::error::Result;

fn into_feature_collection(geojson: GeoJson) -> FeatureCollection {
    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        },
    };
    debug!("read {} features", collection.features.len());
    collection
}

/// Read a GeoJSON document into a [`FeatureCollection`].
///
/// A lone `Feature` or geometry is wrapped in a collection of one feature. Members the GeoJSON
/// format does not define, such as `crs`, are kept in `foreign_members`.
pub fn read_geojson<R: Read>(reader: R) -> Result<FeatureCollection> {
    let value: JsonValue = serde_json::from_reader(reader)?;
    Ok(into_feature_collection(GeoJson::from_json_value(value)?))
}

/// Like [`read_geojson`], from a string.
pub fn read_geojson_str(input: &str) -> Result<FeatureCollection> {
    Ok(into_feature_collection(input.parse::<GeoJson>()?))
}
