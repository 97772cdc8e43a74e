//! Geometry kind tags used for reporting.

use std::fmt;

use geojson::{Geometry, Value};

/// The kind of a GeoJSON geometry, plus [`GeometryKind::Unknown`] for a feature without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Unknown,
}

impl GeometryKind {
    /// The GeoJSON `type` member for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this kind is a `LineString` or `MultiLineString`.
    pub fn is_lineal(&self) -> bool {
        matches!(self, Self::LineString | Self::MultiLineString)
    }

    /// Whether this kind is a `Polygon` or `MultiPolygon`.
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Self::Polygon | Self::MultiPolygon)
    }

    /// Whether Douglas-Peucker simplification has any effect on this kind.
    pub fn is_simplifiable(&self) -> bool {
        self.is_lineal() || self.is_polygonal()
    }
}

impl From<&Value> for GeometryKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Point(_) => Self::Point,
            Value::LineString(_) => Self::LineString,
            Value::Polygon(_) => Self::Polygon,
            Value::MultiPoint(_) => Self::MultiPoint,
            Value::MultiLineString(_) => Self::MultiLineString,
            Value::MultiPolygon(_) => Self::MultiPolygon,
            Value::GeometryCollection(_) => Self::GeometryCollection,
        }
    }
}

impl From<&Geometry> for GeometryKind {
    fn from(geometry: &Geometry) -> Self {
        (&geometry.value).into()
    }
}

impl From<Option<&Geometry>> for GeometryKind {
    fn from(geometry: Option<&Geometry>) -> Self {
        geometry.map_or(Self::Unknown, Into::into)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
