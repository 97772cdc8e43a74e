//! Shrink [GeoJSON](https://geojson.org/) geometries by simplifying lines and polygons with
//! the Ramer–Douglas–Peucker algorithm and rounding coordinates to a fixed number of decimal
//! places, plus an analysis pass that reports whether a dataset is worth optimizing.
//!
//! Geometries are the [`geojson`] crate's types. The [`algorithm`] module holds the geometry
//! engine, [`io`] reads and writes documents and renders reports as text.
//!
//! ```
//! use geoslim::algorithm::{optimize_geometry, OptimizeOptions};
//! use geojson::{Geometry, Value};
//!
//! let line = Geometry::new(Value::LineString(vec![
//!     vec![-90.04898012, 35.14953431],
//!     vec![-90.04897999, 35.14953440],
//!     vec![-90.04810001, 35.14881230],
//! ]));
//!
//! let optimized = optimize_geometry(&line, &OptimizeOptions::default());
//! assert_eq!(optimized.coords_before, 3);
//! assert_eq!(optimized.coords_after, 2);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod algorithm;
pub mod datatypes;
pub mod error;
pub mod io;
#[cfg(test)]
pub(crate) mod test;
