use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::test::{linestring, point, polygon, properties};

pub(crate) fn gc0() -> Geometry {
    Geometry::new(Value::GeometryCollection(vec![
        point::p0(),
        linestring::ls1(),
    ]))
}

pub(crate) fn feature(geometry: Option<Geometry>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Three features (a line, a polygon and one without geometry) plus a `crs` member.
pub(crate) fn fc0() -> FeatureCollection {
    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "crs".to_string(),
        serde_json::json!({ "type": "name", "properties": { "name": "EPSG:4326" } }),
    );
    FeatureCollection {
        bbox: None,
        features: vec![
            feature(Some(linestring::ls1()), properties::named("Poplar Ave")),
            feature(Some(polygon::p0()), properties::named("Overton Park")),
            feature(None, JsonObject::new()),
        ],
        foreign_members: Some(foreign_members),
    }
}

pub(crate) fn crs(fc: &FeatureCollection) -> Option<&JsonValue> {
    fc.foreign_members.as_ref().and_then(|members| members.get("crs"))
}
