use geojson::{Geometry, Value};

/// Two tiny squares, each about one thousandth of a unit across.
pub(crate) fn tiny() -> Geometry {
    Geometry::new(Value::MultiPolygon(vec![
        vec![vec![
            vec![0., 0.],
            vec![0.001, 0.],
            vec![0.001, 0.001],
            vec![0., 0.001],
            vec![0., 0.],
        ]],
        vec![vec![
            vec![5., 5.],
            vec![5.001, 5.],
            vec![5.001, 5.001],
            vec![5., 5.001],
            vec![5., 5.],
        ]],
    ]))
}

/// One large square beside one tiny square.
pub(crate) fn mixed() -> Geometry {
    Geometry::new(Value::MultiPolygon(vec![
        vec![vec![
            vec![0., 0.],
            vec![0., 10.],
            vec![5., 10.00001],
            vec![10., 10.],
            vec![10., 0.],
            vec![0., 0.],
        ]],
        vec![vec![
            vec![20., 20.],
            vec![20.001, 20.],
            vec![20.001, 20.001],
            vec![20., 20.001],
            vec![20., 20.],
        ]],
    ]))
}
