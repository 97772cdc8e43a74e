use geojson::{Feature, Geometry, Value};

/// Round a single value to `precision` decimal digits.
///
/// Uses [`f64::round`], so halfway cases round away from zero. A value whose scaled form is not
/// finite (very large magnitudes or precisions) is returned unchanged.
pub fn round_value(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || !factor.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Round every coordinate component of a geometry to a fixed number of decimal digits.
///
/// The nesting of the coordinates is preserved exactly; only leaf values change. Rounding
/// recurses structurally through the coordinate arrays, so the same implementation serves a
/// position, a ring, a polygon and a list of polygons. `bbox` members are copied without
/// rounding.
pub trait RoundCoordinates {
    /// Returns a copy of `self` with coordinates rounded to `precision` decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoslim::algorithm::RoundCoordinates;
    /// use geojson::{Geometry, Value};
    ///
    /// let point = Geometry::new(Value::Point(vec![12.3456789, -45.6789012]));
    /// let rounded = point.round_coordinates(4);
    ///
    /// assert_eq!(rounded.value, Value::Point(vec![12.3457, -45.6789]));
    /// ```
    fn round_coordinates(&self, precision: u32) -> Self;
}

impl RoundCoordinates for f64 {
    fn round_coordinates(&self, precision: u32) -> Self {
        round_value(*self, precision)
    }
}

impl<T: RoundCoordinates> RoundCoordinates for Vec<T> {
    fn round_coordinates(&self, precision: u32) -> Self {
        self.iter()
            .map(|item| item.round_coordinates(precision))
            .collect()
    }
}

impl<T: RoundCoordinates> RoundCoordinates for Option<T> {
    fn round_coordinates(&self, precision: u32) -> Self {
        self.as_ref().map(|item| item.round_coordinates(precision))
    }
}

impl RoundCoordinates for Value {
    fn round_coordinates(&self, precision: u32) -> Self {
        match self {
            Value::Point(position) => Value::Point(position.round_coordinates(precision)),
            Value::MultiPoint(positions) => {
                Value::MultiPoint(positions.round_coordinates(precision))
            }
            Value::LineString(positions) => {
                Value::LineString(positions.round_coordinates(precision))
            }
            Value::MultiLineString(lines) => {
                Value::MultiLineString(lines.round_coordinates(precision))
            }
            Value::Polygon(rings) => Value::Polygon(rings.round_coordinates(precision)),
            Value::MultiPolygon(polygons) => {
                Value::MultiPolygon(polygons.round_coordinates(precision))
            }
            Value::GeometryCollection(geometries) => {
                Value::GeometryCollection(geometries.round_coordinates(precision))
            }
        }
    }
}

impl RoundCoordinates for Geometry {
    fn round_coordinates(&self, precision: u32) -> Self {
        Geometry {
            bbox: self.bbox.clone(),
            value: self.value.round_coordinates(precision),
            foreign_members: self.foreign_members.clone(),
        }
    }
}

impl RoundCoordinates for Feature {
    fn round_coordinates(&self, precision: u32) -> Self {
        Feature {
            geometry: self.geometry.round_coordinates(precision),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::CoordinateCount;
    use crate::test::{collection, multipoint, point, polygon};

    #[test]
    fn bbox_is_not_rounded() {
        let mut input = point::p0();
        input.bbox = Some(vec![0.123456789, 0.123456789, 1.987654321, 1.987654321]);
        assert_eq!(input.round_coordinates(2).bbox, input.bbox);
    }

    #[test]
    fn rounds_point() {
        let rounded = point::p0().round_coordinates(4);
        assert_eq!(rounded.value, Value::Point(vec![12.3457, -45.6789]));
    }

    #[test]
    fn rounds_altitude_too() {
        let rounded = point::p1().round_coordinates(2);
        assert_eq!(rounded.value, Value::Point(vec![-90.05, 35.15, 102.25]));
    }

    #[test]
    fn half_rounds_away_from_zero() {
        assert_eq!(round_value(2.5, 0), 3.0);
        assert_eq!(round_value(-2.5, 0), -3.0);
        assert_eq!(round_value(0.125, 2), 0.13);
    }

    #[test]
    fn huge_precision_passes_through() {
        assert_eq!(round_value(1.5e300, 20), 1.5e300);
        assert_eq!(round_value(0.1, u32::MAX), 0.1);
    }

    #[test]
    fn keeps_shape() {
        let input = polygon::p1();
        let rounded = input.round_coordinates(0);
        assert_eq!(rounded.coordinate_count(), input.coordinate_count());
        match rounded.value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[1][2], vec![-108., 42.]);
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn recurses_into_collections() {
        let rounded = collection::gc0().round_coordinates(1);
        match rounded.value {
            Value::GeometryCollection(geometries) => {
                assert_eq!(geometries[0].value, Value::Point(vec![12.3, -45.7]));
                assert_eq!(geometries.len(), 2);
            }
            other => panic!("expected a collection, got {other:?}"),
        }
    }

    #[test]
    fn idempotent() {
        let once = multipoint::mp1().round_coordinates(3);
        let twice = once.round_coordinates(3);
        assert_eq!(once, twice);
    }

    #[test]
    fn feature_without_geometry_is_untouched() {
        let fc = collection::fc0();
        let rounded = fc.features[2].round_coordinates(3);
        assert_eq!(rounded, fc.features[2]);
    }
}
