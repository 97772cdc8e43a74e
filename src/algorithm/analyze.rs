//! Read-only statistics over a set of geometries, used to decide whether and how hard to
//! optimize.

use std::ops::RangeInclusive;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Position, Value};
use indexmap::IndexMap;

use crate::algorithm::CoordinateCount;
use crate::datatypes::GeometryKind;

/// Average coordinate count above which line and polygon data is over-detailed.
pub const OVER_DETAILED_AVERAGE: f64 = 500.0;

/// Average coordinate count above which line and polygon data is moderately detailed.
pub const MODERATELY_DETAILED_AVERAGE: f64 = 200.0;

/// Decimal places above which coordinate precision is excessive.
pub const EXCESSIVE_DECIMALS: f64 = 8.0;

/// Decimal places above which coordinate precision is high. Six decimals of a degree resolve
/// about 10 cm.
pub const HIGH_DECIMALS: f64 = 6.0;

/// Coordinate count above which a feature is called out as the most complex one.
pub const COMPLEX_FEATURE_COORDS: usize = 1000;

/// String property length, in characters, above which a field is reported as large.
pub const LARGE_FIELD_CHARS: usize = 1000;

/// Property names tried, in order, to name a feature.
pub const NAME_FIELDS: [&str; 14] = [
    "NAME", "Name", "name", "TITLE", "Title", "title", "LABEL", "Label", "label", "ID", "Id",
    "id", "FID", "OBJECTID",
];

/// How detailed the dominant geometry kind is, judged by its average coordinate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    OverDetailed,
    ModeratelyDetailed,
    Reasonable,
    /// The dominant kind is not a line or polygon, so simplification would do nothing.
    NotApplicable,
}

impl DetailLevel {
    fn classify(dominant_type: Option<GeometryKind>, average_coords: f64) -> Self {
        match dominant_type {
            Some(kind) if kind.is_simplifiable() => {
                if average_coords > OVER_DETAILED_AVERAGE {
                    Self::OverDetailed
                } else if average_coords > MODERATELY_DETAILED_AVERAGE {
                    Self::ModeratelyDetailed
                } else {
                    Self::Reasonable
                }
            }
            _ => Self::NotApplicable,
        }
    }
}

/// Vertex counts typical of hand-digitized data, as `(normal, complex)` ranges.
pub fn typical_vertex_ranges(
    kind: GeometryKind,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    if kind.is_lineal() {
        Some((20..=100, 100..=500))
    } else if kind.is_polygonal() {
        Some((50..=200, 200..=500))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionLevel {
    /// Trimming to six decimals would shrink coordinate text by about this percentage.
    Excessive { projected_reduction_pct: f64 },
    High,
    Appropriate,
}

/// Precision guessed from the text of a single sample coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionEstimate {
    pub sample: Position,
    /// Mean decimal places of the sample's longitude and latitude.
    pub decimals: f64,
    pub level: PrecisionLevel,
}

impl PrecisionEstimate {
    /// Estimate from a coordinate. Returns `None` when it has fewer than two components.
    pub fn from_position(sample: &[f64]) -> Option<Self> {
        let [lon, lat, ..] = sample else {
            return None;
        };
        let decimals = (decimal_places(*lon) + decimal_places(*lat)) as f64 / 2.0;
        let level = if decimals > EXCESSIVE_DECIMALS {
            PrecisionLevel::Excessive {
                projected_reduction_pct: (decimals - HIGH_DECIMALS) / decimals * 100.0,
            }
        } else if decimals > HIGH_DECIMALS {
            PrecisionLevel::High
        } else {
            PrecisionLevel::Appropriate
        };
        Some(Self {
            sample: sample.to_vec(),
            decimals,
            level,
        })
    }
}

/// Number of digits after the decimal point in the shortest text form of `value`.
///
/// The text form never uses exponent notation: `1e-7` has 7 decimal places and `1e21` has none.
pub fn decimal_places(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.chars().count())
}

/// The first position of a geometry, or `None` when it has none or is a `GeometryCollection`.
pub fn first_coordinate(value: &Value) -> Option<&Position> {
    match value {
        Value::Point(position) => Some(position),
        Value::LineString(positions) | Value::MultiPoint(positions) => positions.first(),
        Value::Polygon(rings) | Value::MultiLineString(rings) => rings.first()?.first(),
        Value::MultiPolygon(polygons) => polygons.first()?.first()?.first(),
        Value::GeometryCollection(_) => None,
    }
}

/// Aggregate statistics over a sequence of geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Occurrences per geometry kind, in order of first appearance.
    pub geometry_types: IndexMap<GeometryKind, usize>,
    pub geometry_count: usize,
    pub total_coords: usize,
    pub average_coords: f64,
    /// Smallest non-zero coordinate count, if any geometry had coordinates.
    pub min_coords: Option<usize>,
    pub max_coords: usize,
    /// Index of the first geometry with `max_coords` coordinates.
    pub max_coords_idx: usize,
    /// The most frequent kind. Ties go to the kind seen first.
    pub dominant_type: Option<GeometryKind>,
    pub detail: DetailLevel,
    /// Estimated from the first geometry's first coordinate.
    pub precision: Option<PrecisionEstimate>,
}

/// Compute an [`AnalysisReport`]. `None` entries stand for features without a geometry.
pub fn analyze_geometries<'a, I>(geometries: I) -> AnalysisReport
where
    I: IntoIterator<Item = Option<&'a Geometry>>,
{
    let mut geometry_types = IndexMap::new();
    let mut geometry_count = 0;
    let mut total_coords = 0;
    let mut min_coords: Option<usize> = None;
    let mut max_coords = 0;
    let mut max_coords_idx = 0;
    let mut precision = None;

    for (idx, geometry) in geometries.into_iter().enumerate() {
        if idx == 0 {
            precision = geometry
                .and_then(|g| first_coordinate(&g.value))
                .and_then(|position| PrecisionEstimate::from_position(position));
        }

        *geometry_types.entry(GeometryKind::from(geometry)).or_insert(0) += 1;
        geometry_count += 1;

        let coords = geometry.coordinate_count();
        total_coords += coords;
        if coords > max_coords {
            max_coords = coords;
            max_coords_idx = idx;
        }
        if coords > 0 && min_coords.map_or(true, |min| coords < min) {
            min_coords = Some(coords);
        }
    }

    let average_coords = if geometry_count > 0 {
        total_coords as f64 / geometry_count as f64
    } else {
        0.0
    };

    let mut dominant: Option<(GeometryKind, usize)> = None;
    for (kind, count) in &geometry_types {
        if dominant.map_or(true, |(_, best)| *count > best) {
            dominant = Some((*kind, *count));
        }
    }
    let dominant_type = dominant.map(|(kind, _)| kind);

    AnalysisReport {
        geometry_types,
        geometry_count,
        total_coords,
        average_coords,
        min_coords,
        max_coords,
        max_coords_idx,
        dominant_type,
        detail: DetailLevel::classify(dominant_type, average_coords),
        precision,
    }
}

/// The feature with the most coordinates, when it is complex enough to call out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexFeature {
    pub index: usize,
    pub name: String,
    pub coords: usize,
}

/// A string property longer than [`LARGE_FIELD_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeField {
    pub name: String,
    pub chars: usize,
}

/// An [`AnalysisReport`] over a feature collection plus attribute checks.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAnalysis {
    pub feature_count: usize,
    pub geometry: AnalysisReport,
    pub most_complex: Option<ComplexFeature>,
    /// Number of properties on the first feature.
    pub field_count: usize,
    /// String properties of the first feature longer than [`LARGE_FIELD_CHARS`].
    pub large_fields: Vec<LargeField>,
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(members) => !members.is_empty(),
    }
}

/// A display name for a feature taken from the first non-empty of [`NAME_FIELDS`].
pub fn feature_name(properties: &JsonObject) -> Option<String> {
    NAME_FIELDS
        .iter()
        .filter_map(|field| properties.get(*field))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn large_fields(properties: &JsonObject) -> Vec<LargeField> {
    properties
        .iter()
        .filter_map(|(name, value)| {
            let chars = value.as_str()?.chars().count();
            (chars > LARGE_FIELD_CHARS).then(|| LargeField {
                name: name.clone(),
                chars,
            })
        })
        .collect()
}

/// Analyze the geometries and attributes of a feature collection.
pub fn analyze_feature_collection(collection: &FeatureCollection) -> FeatureAnalysis {
    let features = &collection.features;
    let geometry = analyze_geometries(features.iter().map(|f| f.geometry.as_ref()));

    let most_complex = (geometry.max_coords > COMPLEX_FEATURE_COORDS).then(|| {
        let index = geometry.max_coords_idx;
        let name = features[index]
            .properties
            .as_ref()
            .and_then(feature_name)
            .unwrap_or_else(|| format!("Feature #{index}"));
        ComplexFeature {
            index,
            name,
            coords: geometry.max_coords,
        }
    });

    let first_properties = features.first().and_then(|f: &Feature| f.properties.as_ref());

    FeatureAnalysis {
        feature_count: features.len(),
        geometry,
        most_complex,
        field_count: first_properties.map_or(0, JsonObject::len),
        large_fields: first_properties.map(large_fields).unwrap_or_default(),
    }
}
