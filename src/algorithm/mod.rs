//! Algorithms implemented on and returning GeoJSON geometries.
//!
//! Every algorithm here is a pure function of its input: geometries are never modified in place
//! and malformed or missing geometries degrade to a no-op rather than an error.

pub mod analyze;
mod coord_count;
pub mod optimize;
mod round;
mod simplify;

pub use analyze::{analyze_feature_collection, analyze_geometries, AnalysisReport, FeatureAnalysis};
pub use coord_count::CoordinateCount;
pub use optimize::{
    optimize_feature, optimize_feature_collection, optimize_features, optimize_geometry,
    OptimizeOptions, OptimizeReport, OptimizedFeature, OptimizedGeometry, SizeReport,
    SizeVerdict, DEFAULT_PRECISION, DEFAULT_TOLERANCE,
};
pub use round::{round_value, RoundCoordinates};
pub use simplify::{
    douglas_peucker, perpendicular_distance, Simplify, SimplifyDiagnostics, MIN_LINE_POSITIONS,
    MIN_RING_POSITIONS,
};
