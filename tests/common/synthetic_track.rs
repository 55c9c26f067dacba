use barrel_reco::fit::circle_circle_intersection;
use barrel_reco::{DetectorRegion, LayerRadiusTable, TrackHit};
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Circular trajectory in the transverse plane with a linear z profile.
#[derive(Clone, Copy, Debug)]
pub struct Trajectory {
    pub circle_r: f64,
    pub x0: f64,
    pub y0: f64,
    /// z = slope * r + intercept
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Trajectory {
    fn default() -> Self {
        // stiff track curving gently away from the origin
        Self {
            circle_r: 120.0,
            x0: 0.0,
            y0: 118.0,
            slope: 0.35,
            intercept: 1.5,
        }
    }
}

impl Trajectory {
    /// Point of the trajectory at the given transverse radius, on the
    /// branch with positive x.
    pub fn at_radius(&self, radius: f64) -> Option<Vector3<f64>> {
        let sol = circle_circle_intersection(radius, self.circle_r, self.x0, self.y0)?;
        let (x, y) = if sol.xplus >= sol.xminus {
            (sol.xplus, sol.yplus)
        } else {
            (sol.xminus, sol.yminus)
        };
        Some(Vector3::new(x, y, self.slope * radius + self.intercept))
    }
}

/// Generates one segmented-detector hit per layer in `layers`, each lying
/// exactly on `trajectory` at its layer's nominal radius plus
/// `radial_offset` (a nonzero offset mimics a distortion-corrected cluster
/// off its readout surface).
pub fn segmented_track(
    table: &LayerRadiusTable,
    trajectory: &Trajectory,
    layers: std::ops::Range<u32>,
    radial_offset: f64,
) -> Vec<TrackHit> {
    layers
        .filter_map(|layer| {
            let radius = table.get(layer as usize)? + radial_offset;
            let position = trajectory.at_radius(radius)?;
            Some(TrackHit {
                key: u64::from(layer) + 1000,
                layer: layer + 7,
                region: DetectorRegion::RadialSegmented,
                position,
            })
        })
        .collect()
}

/// A handful of silicon-like hits that must pass through any projection
/// untouched.
pub fn silicon_hits() -> Vec<TrackHit> {
    [
        (1u64, 0u32, 2.46, 0.31, 0.8),
        (2, 1, 3.16, 0.40, 1.0),
        (3, 2, 3.91, 0.50, 1.3),
    ]
    .iter()
    .map(|&(key, layer, x, y, z)| TrackHit {
        key,
        layer,
        region: DetectorRegion::Other,
        position: Vector3::new(x, y, z),
    })
    .collect()
}

/// Deterministically smears hit positions by a uniform offset within
/// `amplitude` on every axis.
pub fn smear(hits: &mut [TrackHit], amplitude: f64, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for hit in hits {
        for i in 0..3 {
            hit.position[i] += rng.gen_range(-amplitude..amplitude);
        }
    }
}
