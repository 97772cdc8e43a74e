use std::ops::AddAssign;

use geojson::{Feature, Geometry, LineStringType, PolygonType, Position, Value};
use log::trace;

/// Minimum positions for a simplified line to replace the original.
pub const MIN_LINE_POSITIONS: usize = 2;

/// Minimum positions for a simplified ring to replace the original: three distinct vertices
/// plus the closing repeat.
pub const MIN_RING_POSITIONS: usize = 4;

fn xy(position: &[f64]) -> (f64, f64) {
    (
        position.first().copied().unwrap_or(0.0),
        position.get(1).copied().unwrap_or(0.0),
    )
}

/// Perpendicular distance from `point` to the infinite line through `start` and `end`.
///
/// When `start` and `end` coincide this is the plain distance from `point` to `start`. Only the
/// first two components of each position are used.
pub fn perpendicular_distance(point: &[f64], start: &[f64], end: &[f64]) -> f64 {
    let (x, y) = xy(point);
    let (x1, y1) = xy(start);
    let (x2, y2) = xy(end);

    let dx = x2 - x1;
    let dy = y2 - y1;
    let denominator = dy.hypot(dx);
    if denominator == 0.0 {
        return (x - x1).hypot(y - y1);
    }
    (dy * x - dx * y + x2 * y1 - y2 * x1).abs() / denominator
}

/// Simplify a sequence of positions with the [Ramer–Douglas–Peucker
/// algorithm](https://en.wikipedia.org/wiki/Ramer–Douglas–Peucker_algorithm).
///
/// The output is an order-preserving subsequence of `positions` that always keeps the first and
/// last position. Sequences of two or fewer positions are returned unchanged, as is the input when
/// `tolerance` is negative or NaN. Ties for the farthest point are won by the earliest.
///
/// Work is driven by an explicit stack, so call depth stays constant however long the line is.
///
/// # Examples
///
/// ```
/// use geoslim::algorithm::douglas_peucker;
///
/// let line = vec![
///     vec![0.0, 0.0],
///     vec![5.0, 4.0],
///     vec![11.0, 5.5],
///     vec![17.3, 3.2],
///     vec![27.8, 0.1],
/// ];
///
/// let expected = vec![
///     vec![0.0, 0.0],
///     vec![5.0, 4.0],
///     vec![11.0, 5.5],
///     vec![27.8, 0.1],
/// ];
///
/// assert_eq!(douglas_peucker(&line, 1.0), expected);
/// ```
pub fn douglas_peucker(positions: &[Position], tolerance: f64) -> Vec<Position> {
    let len = positions.len();
    if len <= 2 || tolerance.is_nan() || tolerance < 0.0 {
        return positions.to_vec();
    }

    let mut keep = vec![false; len];
    keep[0] = true;
    keep[len - 1] = true;

    let mut stack = vec![(0, len - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_distance = 0.0;
        let mut index = first;
        for i in first + 1..last {
            let distance =
                perpendicular_distance(&positions[i], &positions[first], &positions[last]);
            if distance > max_distance {
                max_distance = distance;
                index = i;
            }
        }

        if index != first && max_distance > tolerance {
            keep[index] = true;
            stack.push((index, last));
            stack.push((first, index));
        }
    }

    positions
        .iter()
        .zip(keep)
        .filter_map(|(position, kept)| kept.then(|| position.clone()))
        .collect()
}

/// Counts of the fallback paths taken while simplifying.
///
/// Simplification never fails; these counters are the only record of the places where a result
/// is rejected for falling under its structural minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyDiagnostics {
    /// Lines kept as is because their simplified form has fewer than [`MIN_LINE_POSITIONS`].
    /// Only lines that simplification would shorten are counted.
    pub lines_kept: usize,
    /// Rings kept as is because their simplified form has fewer than [`MIN_RING_POSITIONS`].
    /// Only rings that simplification would shorten are counted, and rings of a dropped
    /// MultiPolygon member are counted in `rings_dropped` instead.
    pub rings_kept: usize,
    /// Rings removed along with a dropped MultiPolygon member.
    pub rings_dropped: usize,
    /// MultiPolygon members removed because every one of their rings is degenerate.
    pub polygons_dropped: usize,
}

impl SimplifyDiagnostics {
    /// Whether any fallback was taken.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for SimplifyDiagnostics {
    fn add_assign(&mut self, other: Self) {
        self.lines_kept += other.lines_kept;
        self.rings_kept += other.rings_kept;
        self.rings_dropped += other.rings_dropped;
        self.polygons_dropped += other.polygons_dropped;
    }
}

fn simplify_line(
    line: &LineStringType,
    tolerance: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> LineStringType {
    let simplified = douglas_peucker(line, tolerance);
    if simplified.len() >= MIN_LINE_POSITIONS {
        return simplified;
    }
    if simplified.len() < line.len() {
        trace!("line of {} positions kept unsimplified", line.len());
        diagnostics.lines_kept += 1;
    }
    line.clone()
}

/// Simplify one ring, keeping the original when the result falls under [`MIN_RING_POSITIONS`].
///
/// The flag is `true` when the ring is degenerate, i.e. the original had to be kept.
fn simplify_ring(
    ring: &LineStringType,
    tolerance: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> (LineStringType, bool) {
    let simplified = douglas_peucker(ring, tolerance);
    if simplified.len() >= MIN_RING_POSITIONS {
        return (simplified, false);
    }
    if simplified.len() < ring.len() {
        trace!("ring of {} positions kept unsimplified", ring.len());
        diagnostics.rings_kept += 1;
    }
    (ring.clone(), true)
}

fn simplify_polygon(
    rings: &PolygonType,
    tolerance: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> PolygonType {
    rings
        .iter()
        .map(|ring| simplify_ring(ring, tolerance, diagnostics).0)
        .collect()
}

/// Simplify one member of a MultiPolygon with the Polygon rule. Returns `None` when the member
/// has no rings or every one of its rings is degenerate.
fn simplify_multi_polygon_member(
    rings: &PolygonType,
    tolerance: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> Option<PolygonType> {
    let mut member_diagnostics = SimplifyDiagnostics::default();
    let mut all_degenerate = true;
    let mut output = Vec::with_capacity(rings.len());
    for ring in rings {
        let (ring, degenerate) = simplify_ring(ring, tolerance, &mut member_diagnostics);
        all_degenerate &= degenerate;
        output.push(ring);
    }

    if all_degenerate {
        trace!("polygon of {} degenerate rings dropped", rings.len());
        diagnostics.rings_dropped += rings.len();
        diagnostics.polygons_dropped += 1;
        return None;
    }
    *diagnostics += member_diagnostics;
    Some(output)
}

fn simplify_value(value: &Value, tolerance: f64, diagnostics: &mut SimplifyDiagnostics) -> Value {
    match value {
        Value::Point(_) | Value::MultiPoint(_) => value.clone(),
        Value::LineString(line) => Value::LineString(simplify_line(line, tolerance, diagnostics)),
        Value::MultiLineString(lines) => Value::MultiLineString(
            lines
                .iter()
                .map(|line| simplify_line(line, tolerance, diagnostics))
                .collect(),
        ),
        Value::Polygon(rings) => Value::Polygon(simplify_polygon(rings, tolerance, diagnostics)),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .filter_map(|rings| simplify_multi_polygon_member(rings, tolerance, diagnostics))
                .collect(),
        ),
        Value::GeometryCollection(geometries) => Value::GeometryCollection(
            geometries
                .iter()
                .map(|geometry| simplify_geometry(geometry, tolerance, diagnostics))
                .collect(),
        ),
    }
}

fn simplify_geometry(
    geometry: &Geometry,
    tolerance: f64,
    diagnostics: &mut SimplifyDiagnostics,
) -> Geometry {
    Geometry {
        bbox: geometry.bbox.clone(),
        value: simplify_value(&geometry.value, tolerance, diagnostics),
        foreign_members: geometry.foreign_members.clone(),
    }
}

/// Simplifies a geometry.
///
/// The [Ramer–Douglas–Peucker
/// algorithm](https://en.wikipedia.org/wiki/Ramer–Douglas–Peucker_algorithm) simplifies a
/// linestring. Polygons are simplified by running the RDP algorithm on all their constituent
/// rings. This may result in invalid Polygons, and has no guarantee of preserving topology.
///
/// - `Point` and `MultiPoint` are returned unchanged.
/// - A line keeps its original positions when simplification would leave fewer than two.
/// - A `Polygon` ring keeps its original positions when simplification would leave fewer than
///   four.
/// - A `MultiPolygon` applies the `Polygon` rule to each member. A member is removed only when
///   it has no rings or none of its rings can be simplified to four positions or more. The
///   geometry itself is always returned, even with no members left.
/// - `GeometryCollection` members are simplified recursively with the same rules.
///
/// The input is never modified. `bbox` members are copied unchanged, so after simplification a
/// bounding box may be larger than the geometry it describes.
pub trait Simplify: Sized {
    /// Returns the simplified representation of a geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoslim::algorithm::Simplify;
    /// use geojson::{Geometry, Value};
    ///
    /// let line = Geometry::new(Value::LineString(vec![
    ///     vec![0., 0.],
    ///     vec![1., 0.00001],
    ///     vec![2., 0.],
    ///     vec![3., 10.],
    ///     vec![4., 0.],
    /// ]));
    ///
    /// let simplified = line.simplify(&0.001);
    ///
    /// let expected = Value::LineString(vec![
    ///     vec![0., 0.],
    ///     vec![2., 0.],
    ///     vec![3., 10.],
    ///     vec![4., 0.],
    /// ]);
    /// assert_eq!(simplified.value, expected);
    /// ```
    fn simplify(&self, tolerance: &f64) -> Self {
        self.simplify_with_diagnostics(tolerance).0
    }

    /// Like [`Simplify::simplify`], also reporting which fallbacks were taken.
    fn simplify_with_diagnostics(&self, tolerance: &f64) -> (Self, SimplifyDiagnostics);
}

impl Simplify for Value {
    fn simplify_with_diagnostics(&self, tolerance: &f64) -> (Self, SimplifyDiagnostics) {
        let mut diagnostics = SimplifyDiagnostics::default();
        let value = simplify_value(self, *tolerance, &mut diagnostics);
        (value, diagnostics)
    }
}

impl Simplify for Geometry {
    fn simplify_with_diagnostics(&self, tolerance: &f64) -> (Self, SimplifyDiagnostics) {
        let mut diagnostics = SimplifyDiagnostics::default();
        let geometry = simplify_geometry(self, *tolerance, &mut diagnostics);
        (geometry, diagnostics)
    }
}

impl<G: Simplify> Simplify for Option<G> {
    fn simplify_with_diagnostics(&self, tolerance: &f64) -> (Self, SimplifyDiagnostics) {
        match self {
            Some(geometry) => {
                let (simplified, diagnostics) = geometry.simplify_with_diagnostics(tolerance);
                (Some(simplified), diagnostics)
            }
            None => (None, SimplifyDiagnostics::default()),
        }
    }
}

impl Simplify for Feature {
    fn simplify_with_diagnostics(&self, tolerance: &f64) -> (Self, SimplifyDiagnostics) {
        let (geometry, diagnostics) = self.geometry.simplify_with_diagnostics(tolerance);
        let feature = Feature {
            bbox: self.bbox.clone(),
            geometry,
            id: self.id.clone(),
            properties: self.properties.clone(),
            foreign_members: self.foreign_members.clone(),
        };
        (feature, diagnostics)
    }
}
