//! Reading and writing GeoJSON documents, and plain-text rendering of reports.

pub mod display;
pub mod geojson;
