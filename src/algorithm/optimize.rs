#[cfg(feature = "rayon")]
use rayon::prelude::*;

use geojson::{Feature, FeatureCollection, Geometry};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithm::{CoordinateCount, RoundCoordinates, Simplify, SimplifyDiagnostics};
use crate::error::{GeoSlimError, Result};

/// Default simplification tolerance, in coordinate units (about 11 m of latitude in degrees).
pub const DEFAULT_TOLERANCE: f64 = 0.0001;

/// Default number of decimal places kept per coordinate.
pub const DEFAULT_PRECISION: u32 = 6;

/// Features between progress log lines.
const PROGRESS_INTERVAL: usize = 50;

/// Options for [`optimize_geometry`] and [`optimize_feature_collection`].
///
/// Deserializing fills any missing field from [`OptimizeOptions::default`] and fails on options
/// that [`OptimizeOptions::validate`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptimizeOptionsConfig")]
pub struct OptimizeOptions {
    /// Maximum deviation a simplified line may introduce, in the units of the input coordinates.
    pub tolerance: f64,

    /// Number of decimal places kept per coordinate component.
    pub precision: u32,
}

impl OptimizeOptions {
    /// Validated options. `tolerance` must be finite and non-negative.
    pub fn try_new(tolerance: f64, precision: u32) -> Result<Self> {
        Self::default()
            .with_tolerance(tolerance)
            .with_precision(precision)
            .validate()
    }

    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    pub fn with_precision(self, precision: u32) -> Self {
        Self { precision, ..self }
    }

    /// Check the options, returning them unchanged when they are usable.
    pub fn validate(self) -> Result<Self> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(GeoSlimError::InvalidOptions(format!(
                "tolerance must be a finite, non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(self)
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Unvalidated mirror of [`OptimizeOptions`], as read from a configuration file.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct OptimizeOptionsConfig {
    tolerance: f64,
    precision: u32,
}

impl Default for OptimizeOptionsConfig {
    fn default() -> Self {
        let OptimizeOptions {
            tolerance,
            precision,
        } = OptimizeOptions::default();
        Self {
            tolerance,
            precision,
        }
    }
}

impl TryFrom<OptimizeOptionsConfig> for OptimizeOptions {
    type Error = GeoSlimError;

    fn try_from(config: OptimizeOptionsConfig) -> Result<Self> {
        Self::try_new(config.tolerance, config.precision)
    }
}

/// The result of optimizing one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedGeometry {
    pub geometry: Geometry,
    pub coords_before: usize,
    pub coords_after: usize,
    pub diagnostics: SimplifyDiagnostics,
}

/// Simplify `geometry` and then round its coordinates.
///
/// The input is left untouched; counts are taken on the input and on the output. A `bbox` on the
/// geometry is copied as is, not recomputed from the optimized coordinates.
pub fn optimize_geometry(geometry: &Geometry, options: &OptimizeOptions) -> OptimizedGeometry {
    let coords_before = geometry.coordinate_count();
    let (simplified, diagnostics) = geometry.simplify_with_diagnostics(&options.tolerance);
    let rounded = simplified.round_coordinates(options.precision);
    let coords_after = rounded.coordinate_count();
    OptimizedGeometry {
        geometry: rounded,
        coords_before,
        coords_after,
        diagnostics,
    }
}

/// The result of optimizing one feature. A feature without geometry is carried through as is.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedFeature {
    pub feature: Feature,
    pub coords_before: usize,
    pub coords_after: usize,
    pub diagnostics: SimplifyDiagnostics,
}

pub fn optimize_feature(feature: &Feature, options: &OptimizeOptions) -> OptimizedFeature {
    let Some(geometry) = feature.geometry.as_ref() else {
        return OptimizedFeature {
            feature: feature.clone(),
            coords_before: 0,
            coords_after: 0,
            diagnostics: SimplifyDiagnostics::default(),
        };
    };

    let optimized = optimize_geometry(geometry, options);
    OptimizedFeature {
        feature: Feature {
            bbox: feature.bbox.clone(),
            geometry: Some(optimized.geometry),
            id: feature.id.clone(),
            properties: feature.properties.clone(),
            foreign_members: feature.foreign_members.clone(),
        },
        coords_before: optimized.coords_before,
        coords_after: optimized.coords_after,
        diagnostics: optimized.diagnostics,
    }
}

/// Optimize every feature independently, preserving input order.
///
/// With the `rayon` feature enabled the features are processed in parallel.
pub fn optimize_features(features: &[Feature], options: &OptimizeOptions) -> Vec<OptimizedFeature> {
    let total = features.len();
    let map_op = |(idx, feature): (usize, &Feature)| {
        if (idx + 1) % PROGRESS_INTERVAL == 0 || idx + 1 == total {
            debug!("processing feature {}/{}", idx + 1, total);
        }
        optimize_feature(feature, options)
    };

    #[cfg(feature = "rayon")]
    {
        let mut output_vec = Vec::with_capacity(total);
        features
            .par_iter()
            .enumerate()
            .map(map_op)
            .collect_into_vec(&mut output_vec);
        output_vec
    }

    #[cfg(not(feature = "rayon"))]
    {
        features.iter().enumerate().map(map_op).collect()
    }
}

/// Totals over one optimization pass of a feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeReport {
    pub options: OptimizeOptions,
    pub feature_count: usize,
    pub coords_before: usize,
    pub coords_after: usize,
    pub diagnostics: SimplifyDiagnostics,
    /// Indices of features where simplification fell back to the original or dropped parts.
    pub fallback_indices: Vec<usize>,
}

impl OptimizeReport {
    /// Percentage of coordinates removed, or 0 when there were none to start with.
    pub fn coord_reduction_pct(&self) -> f64 {
        reduction_pct(self.coords_before as f64, self.coords_after as f64)
    }
}

/// Optimize all features of `collection`.
///
/// The output keeps the collection's foreign members (such as `crs`) and bounding box, and every
/// feature's id and properties.
pub fn optimize_feature_collection(
    collection: &FeatureCollection,
    options: &OptimizeOptions,
) -> (FeatureCollection, OptimizeReport) {
    info!(
        "optimizing {} features (tolerance {}, precision {})",
        collection.features.len(),
        options.tolerance,
        options.precision
    );

    let optimized = optimize_features(&collection.features, options);

    let mut report = OptimizeReport {
        options: *options,
        feature_count: optimized.len(),
        coords_before: 0,
        coords_after: 0,
        diagnostics: SimplifyDiagnostics::default(),
        fallback_indices: vec![],
    };
    let mut features = Vec::with_capacity(optimized.len());
    for (idx, item) in optimized.into_iter().enumerate() {
        report.coords_before += item.coords_before;
        report.coords_after += item.coords_after;
        if !item.diagnostics.is_empty() {
            report.fallback_indices.push(idx);
        }
        report.diagnostics += item.diagnostics;
        features.push(item.feature);
    }

    info!(
        "coordinates: {} -> {} ({:.1}% reduction)",
        report.coords_before,
        report.coords_after,
        report.coord_reduction_pct()
    );

    let output = FeatureCollection {
        bbox: collection.bbox.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    };
    (output, report)
}

fn reduction_pct(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        (before - after) / before * 100.0
    } else {
        0.0
    }
}

const MIB: f64 = 1024.0 * 1024.0;

/// How suitable an output document is for serving to a web map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeVerdict {
    /// Under 1 MiB.
    Excellent,
    Good,
    /// Over 10 MiB; a more aggressive tolerance is worth trying.
    StillLarge,
}

/// Byte sizes before and after an optimization pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl SizeReport {
    pub fn new(input_bytes: u64, output_bytes: u64) -> Self {
        Self {
            input_bytes,
            output_bytes,
        }
    }

    pub fn input_mib(&self) -> f64 {
        self.input_bytes as f64 / MIB
    }

    pub fn output_mib(&self) -> f64 {
        self.output_bytes as f64 / MIB
    }

    /// Percentage of bytes saved, or 0 for an empty input. Negative when the output grew.
    pub fn reduction_pct(&self) -> f64 {
        reduction_pct(self.input_bytes as f64, self.output_bytes as f64)
    }

    pub fn verdict(&self) -> SizeVerdict {
        let output_mib = self.output_mib();
        if output_mib > 10.0 {
            SizeVerdict::StillLarge
        } else if output_mib < 1.0 {
            SizeVerdict::Excellent
        } else {
            SizeVerdict::Good
        }
    }

    /// More aggressive tolerances to try when the output is still large.
    pub fn suggested_tolerances(&self) -> &'static [f64] {
        match self.verdict() {
            SizeVerdict::StillLarge => &[0.0002, 0.0005],
            SizeVerdict::Good | SizeVerdict::Excellent => &[],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{collection, linestring, multipolygon, point, polygon};
    use approx::assert_relative_eq;
    use geojson::Value;

    #[test]
    fn default_options() {
        let options = OptimizeOptions::default();
        assert_eq!(options.tolerance, 0.0001);
        assert_eq!(options.precision, 6);
    }

    #[test]
    fn options_from_partial_json() {
        let options: OptimizeOptions = serde_json::from_str(r#"{"precision": 4}"#).unwrap();
        assert_eq!(options, OptimizeOptions::default().with_precision(4));
    }

    #[test]
    fn options_from_json_reject_negative_tolerance() {
        let err = serde_json::from_str::<OptimizeOptions>(r#"{"tolerance": -5.0}"#).unwrap_err();
        assert!(err.to_string().contains("tolerance"));
        assert!(serde_json::from_str::<OptimizeOptions>(r#"{"tolerance": 0.0}"#).is_ok());
    }

    #[test]
    fn invalid_tolerance() {
        assert!(matches!(
            OptimizeOptions::try_new(-1.0, 6),
            Err(GeoSlimError::InvalidOptions(_))
        ));
        assert!(OptimizeOptions::try_new(f64::INFINITY, 6).is_err());
        assert!(OptimizeOptions::try_new(0.0, 0).is_ok());
    }

    #[test]
    fn simplify_then_round() {
        let options = OptimizeOptions::try_new(0.001, 0).unwrap();
        let input = linestring::ls1();
        let optimized = optimize_geometry(&input, &options);

        assert_eq!(optimized.coords_before, 5);
        assert_eq!(optimized.coords_after, 4);
        assert_eq!(
            optimized.geometry.value,
            Value::LineString(vec![
                vec![0., 0.],
                vec![2., 0.],
                vec![3., 10.],
                vec![4., 0.],
            ])
        );
        assert_eq!(input, linestring::ls1());
    }

    #[test]
    fn point_is_only_rounded() {
        let options = OptimizeOptions::default().with_precision(4);
        let optimized = optimize_geometry(&point::p0(), &options);
        assert_eq!(optimized.geometry.value, Value::Point(vec![12.3457, -45.6789]));
        assert_eq!(optimized.coords_before, optimized.coords_after);
    }

    #[test]
    fn collapsed_multi_polygon_is_still_returned() {
        let options = OptimizeOptions::default().with_tolerance(0.01);
        let optimized = optimize_geometry(&multipolygon::tiny(), &options);
        assert_eq!(optimized.geometry.value, Value::MultiPolygon(vec![]));
        assert_eq!(optimized.coords_after, 0);
        assert_eq!(optimized.diagnostics.polygons_dropped, 2);
    }

    #[test]
    fn geometry_bbox_is_carried_through() {
        let mut input = multipolygon::mixed();
        input.bbox = Some(vec![0., 0., 20.001, 20.001]);
        let options = OptimizeOptions::default().with_tolerance(0.01);
        let optimized = optimize_geometry(&input, &options);
        assert_eq!(optimized.geometry.bbox, input.bbox);
        assert!(optimized.coords_after < optimized.coords_before);
    }

    #[test]
    fn collection_pass() {
        let input = collection::fc0();
        let options = OptimizeOptions::default().with_tolerance(2.0);
        let (output, report) = optimize_feature_collection(&input, &options);

        assert_eq!(output.features.len(), 3);
        assert_eq!(collection::crs(&output), collection::crs(&input));
        assert_eq!(output.features[0].properties, input.features[0].properties);
        assert!(output.features[2].geometry.is_none());

        assert_eq!(report.feature_count, 3);
        assert_eq!(report.coords_before, 11);
        // The line keeps only its spike, the polygon loses its bump.
        assert_eq!(report.coords_after, 3 + 5);
        assert!(report.fallback_indices.is_empty());
        assert_relative_eq!(report.coord_reduction_pct(), 3.0 / 11.0 * 100.0);
    }

    #[test]
    fn fallback_indices_are_reported() {
        let mut input = collection::fc0();
        input.features.push(collection::feature(
            Some(polygon::p0()),
            Default::default(),
        ));
        let options = OptimizeOptions::default().with_tolerance(1000.0);
        let (_, report) = optimize_feature_collection(&input, &options);
        assert_eq!(report.fallback_indices, vec![1, 3]);
        assert_eq!(report.diagnostics.rings_kept, 2);
    }

    #[test]
    fn output_order_matches_input() {
        let features: Vec<Feature> = (0..120)
            .map(|i| {
                let geometry = Geometry::new(Value::Point(vec![i as f64 + 0.123456789, 0.]));
                collection::feature(Some(geometry), Default::default())
            })
            .collect();
        let optimized = optimize_features(&features, &OptimizeOptions::default());
        for (i, item) in optimized.iter().enumerate() {
            let geometry = item.feature.geometry.as_ref().unwrap();
            assert_eq!(
                geometry.value,
                Value::Point(vec![round_to_6(i as f64 + 0.123456789), 0.])
            );
        }
    }

    fn round_to_6(value: f64) -> f64 {
        crate::algorithm::round_value(value, 6)
    }

    #[test]
    fn empty_reports() {
        let empty = FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        };
        let (_, report) = optimize_feature_collection(&empty, &Default::default());
        assert_eq!(report.coord_reduction_pct(), 0.0);
        assert_eq!(SizeReport::new(0, 0).reduction_pct(), 0.0);
    }

    #[test]
    fn size_verdicts() {
        let mib = 1024 * 1024;
        let report = SizeReport::new(40 * mib, 12 * mib);
        assert_eq!(report.verdict(), SizeVerdict::StillLarge);
        assert_relative_eq!(report.reduction_pct(), 70.0);
        assert_eq!(report.suggested_tolerances(), &[0.0002, 0.0005]);
        assert_eq!(SizeReport::new(4 * mib, 2 * mib).verdict(), SizeVerdict::Good);
        assert_eq!(SizeReport::new(mib, mib / 2).verdict(), SizeVerdict::Excellent);
    }
}
