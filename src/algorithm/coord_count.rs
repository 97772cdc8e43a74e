use geojson::{Feature, FeatureCollection, Geometry, Value};

/// Count the coordinate positions held by a geometry.
///
/// `GeometryCollection` members are counted recursively. A missing geometry counts as zero.
pub trait CoordinateCount {
    /// The total number of positions in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoslim::algorithm::CoordinateCount;
    /// use geojson::{Geometry, Value};
    ///
    /// let polygon = Geometry::new(Value::Polygon(vec![vec![
    ///     vec![0., 0.],
    ///     vec![1., 0.],
    ///     vec![1., 1.],
    ///     vec![0., 0.],
    /// ]]));
    ///
    /// assert_eq!(polygon.coordinate_count(), 4);
    /// ```
    fn coordinate_count(&self) -> usize;
}

fn rings_len<T>(rings: &[Vec<T>]) -> usize {
    rings.iter().map(Vec::len).sum()
}

impl CoordinateCount for Value {
    fn coordinate_count(&self) -> usize {
        match self {
            Value::Point(_) => 1,
            Value::LineString(coords) | Value::MultiPoint(coords) => coords.len(),
            Value::Polygon(rings) | Value::MultiLineString(rings) => rings_len(rings),
            Value::MultiPolygon(polygons) => polygons.iter().map(|rings| rings_len(rings)).sum(),
            Value::GeometryCollection(geometries) => geometries.coordinate_count(),
        }
    }
}

impl CoordinateCount for Geometry {
    fn coordinate_count(&self) -> usize {
        self.value.coordinate_count()
    }
}

impl<G: CoordinateCount + ?Sized> CoordinateCount for &G {
    fn coordinate_count(&self) -> usize {
        (**self).coordinate_count()
    }
}

impl<G: CoordinateCount> CoordinateCount for Option<G> {
    fn coordinate_count(&self) -> usize {
        self.as_ref().map_or(0, CoordinateCount::coordinate_count)
    }
}

impl<G: CoordinateCount> CoordinateCount for [G] {
    fn coordinate_count(&self) -> usize {
        self.iter().map(CoordinateCount::coordinate_count).sum()
    }
}

impl<G: CoordinateCount> CoordinateCount for Vec<G> {
    fn coordinate_count(&self) -> usize {
        self.as_slice().coordinate_count()
    }
}

impl CoordinateCount for Feature {
    fn coordinate_count(&self) -> usize {
        self.geometry.coordinate_count()
    }
}

impl CoordinateCount for FeatureCollection {
    fn coordinate_count(&self) -> usize {
        self.features.coordinate_count()
    }
}
