//! Projector hot-path benchmarks.
//!
//! Run with: cargo bench

use barrel_reco::fit::{circle_circle_intersection, circle_fit_by_taubin};
use barrel_reco::{ClusterRadialProjector, DetectorRegion, LayerRadiusTable, TrackHit};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

fn synthetic_track(table: &LayerRadiusTable) -> Vec<TrackHit> {
    (0..48u32)
        .filter_map(|layer| {
            let radius = table.get(layer as usize)? + 0.25;
            let sol = circle_circle_intersection(radius, 120.0, 0.0, 118.0)?;
            Some(TrackHit {
                key: u64::from(layer),
                layer: layer + 7,
                region: DetectorRegion::RadialSegmented,
                position: Vector3::new(sol.xplus, sol.yplus, 0.35 * radius + 1.5),
            })
        })
        .collect()
}

fn bench_circle_fit(c: &mut Criterion) {
    let table = LayerRadiusTable::default();
    let positions: Vec<Vector3<f64>> = synthetic_track(&table)
        .iter()
        .map(|h| h.position)
        .collect();

    c.bench_function("circle_fit_by_taubin_48", |b| {
        b.iter(|| circle_fit_by_taubin(black_box(&positions)))
    });
}

fn bench_project_track(c: &mut Criterion) {
    let table = LayerRadiusTable::default();
    let hits = synthetic_track(&table);
    let projector = ClusterRadialProjector::new(table);

    c.bench_function("project_track_48_clusters", |b| {
        b.iter(|| projector.project(black_box(&hits)))
    });
}

fn bench_project_batch(c: &mut Criterion) {
    let table = LayerRadiusTable::default();
    let tracks: Vec<Vec<TrackHit>> = (0..64).map(|_| synthetic_track(&table)).collect();
    let projector = ClusterRadialProjector::new(table);

    c.bench_function("project_tracks_64x48", |b| {
        b.iter(|| projector.project_tracks(black_box(&tracks)))
    });
}

criterion_group!(
    benches,
    bench_circle_fit,
    bench_project_track,
    bench_project_batch
);
criterion_main!(benches);
