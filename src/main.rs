use barrel_reco::fit::circle_circle_intersection;
use barrel_reco::prelude::*;
use nalgebra::Vector3;

fn main() {
    // Demo stub: builds a synthetic curved track through all 48 segmented
    // layers, displaces every cluster off its readout surface, and
    // projects the track back.
    let table = LayerRadiusTable::default();
    let projector = ClusterRadialProjector::new(table.clone());

    // trajectory: circle of radius 120 cm centered at (0, 118), z linear in r
    let mut hits = Vec::new();
    for layer in 0..48u32 {
        let radius = table.get(layer as usize).unwrap() + 0.15; // off-surface
        let Some(sol) = circle_circle_intersection(radius, 120.0, 0.0, 118.0) else {
            continue;
        };
        hits.push(TrackHit {
            key: u64::from(layer),
            layer: layer + 7,
            region: DetectorRegion::RadialSegmented,
            position: Vector3::new(sol.xplus, sol.yplus, 0.3 * radius + 2.0),
        });
    }

    let (moved, diag) = projector.project_with_diagnostics(&hits);
    println!(
        "projected {} of {} clusters ({} dropped, {} in output) in {:.3} ms",
        diag.moved,
        diag.hits_total,
        diag.dropped,
        moved.len(),
        diag.elapsed_ms
    );
}
