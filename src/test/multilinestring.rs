use geojson::{Geometry, Value};

pub(crate) fn ml0() -> Geometry {
    Geometry::new(Value::MultiLineString(vec![vec![
        vec![-111., 45.],
        vec![-111., 41.],
        vec![-104., 41.],
        vec![-104., 45.],
    ]]))
}

pub(crate) fn ml1() -> Geometry {
    Geometry::new(Value::MultiLineString(vec![
        vec![
            vec![-111., 45.],
            vec![-111., 43.00001],
            vec![-111., 41.],
            vec![-104., 41.],
        ],
        vec![vec![-110., 44.], vec![-110., 42.]],
    ]))
}
