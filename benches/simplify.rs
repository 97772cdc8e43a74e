use criterion::{criterion_group, criterion_main, Criterion};
use geojson::{Feature, FeatureCollection, Geometry, Position, Value};
use geoslim::algorithm::{douglas_peucker, optimize_feature_collection, OptimizeOptions};

/// A wobbly circle of `n` vertices, closed.
fn create_ring(n: usize) -> Vec<Position> {
    let mut ring: Vec<Position> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let radius = 1.0 + 0.0005 * (i as f64 * 7.3).sin();
            vec![
                -90.05 + radius * angle.cos() * 0.01,
                35.14 + radius * angle.sin() * 0.01,
            ]
        })
        .collect();
    ring.push(ring[0].clone());
    ring
}

fn create_data() -> FeatureCollection {
    let features = (0..500)
        .map(|_| Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![create_ring(2_000)]))),
            id: None,
            properties: None,
            foreign_members: None,
        })
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let ring = create_ring(100_000);
    c.bench_function("douglas_peucker 100k vertices", |b| {
        b.iter(|| {
            let _ = douglas_peucker(&ring, 0.0001);
        })
    });

    let data = create_data();
    let options = OptimizeOptions::default();
    c.bench_function("optimize 500 polygons", |b| {
        b.iter(|| {
            let _ = optimize_feature_collection(&data, &options);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
