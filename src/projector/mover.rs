use std::time::Instant;

use log::{debug, trace};
use nalgebra::Vector3;
use rayon::prelude::*;

use super::radii::LayerRadiusTable;
use crate::diagnostics::ProjectionDiagnostics;
use crate::fit::{circle_circle_intersection, circle_fit_by_taubin, line_fit, CircleFit};
use crate::types::{DetectorRegion, TrackHit};

/// Offset subtracted from the global layer id to index the radius table.
/// The segmented detector's first layer sits behind the silicon layers in
/// the global numbering scheme.
pub const SEGMENTED_LAYER_OFFSET: u32 = 7;

/// Proximity window (cm, per axis) used to pick between the two
/// circle-circle intersection candidates. Large and arbitrary; kept as-is
/// because downstream calibrations were derived with it.
const INTERSECTION_MATCH_TOL_CM: f64 = 5.0;

/// Moves distortion-corrected clusters of the radially segmented detector
/// back onto the nominal readout radius of their layer.
///
/// The transverse trajectory is modeled by a Taubin circle fit over the
/// segmented clusters of one track, the longitudinal one by a straight
/// line in (radius, z). Each segmented cluster is displaced along the
/// fitted trajectory from its own radius to the layer's readout radius;
/// all other clusters pass through unchanged.
///
/// The projector is immutable after construction and may be shared freely
/// across threads.
#[derive(Clone, Debug)]
pub struct ClusterRadialProjector {
    radii: LayerRadiusTable,
    verbosity: u8,
}

impl ClusterRadialProjector {
    pub fn new(radii: LayerRadiusTable) -> Self {
        Self {
            radii,
            verbosity: 0,
        }
    }

    /// Diagnostic verbosity. Gates optional log output only; computed
    /// results never depend on it.
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.verbosity = verbosity;
    }

    pub fn radii(&self) -> &LayerRadiusTable {
        &self.radii
    }

    /// Projects the segmented clusters of one track onto their readout
    /// radii.
    ///
    /// Tracks with fewer than three segmented clusters are returned
    /// unchanged, including all non-segmented hits: a circle fit needs at
    /// least three points, and a partial projection would bias the track.
    /// Clusters whose projection is geometrically impossible (the fitted
    /// circle misses the target cylinder) are dropped from the output.
    pub fn project(&self, hits: &[TrackHit]) -> Vec<TrackHit> {
        self.project_with_diagnostics(hits).0
    }

    /// Same as [`project`](Self::project), additionally reporting counters
    /// for the moved, dropped and passed-through hits.
    pub fn project_with_diagnostics(
        &self,
        hits: &[TrackHit],
    ) -> (Vec<TrackHit>, ProjectionDiagnostics) {
        let t0 = Instant::now();

        let mut moved: Vec<TrackHit> = Vec::with_capacity(hits.len());
        let mut segmented: Vec<&TrackHit> = Vec::with_capacity(hits.len());
        for hit in hits {
            match hit.region {
                DetectorRegion::RadialSegmented => segmented.push(hit),
                // silicon and other clusters stay where they are
                DetectorRegion::Other => moved.push(hit.clone()),
            }
        }

        let passthrough = moved.len();
        let mut diag = ProjectionDiagnostics {
            hits_total: hits.len(),
            segmented: segmented.len(),
            moved: 0,
            dropped: 0,
            passthrough,
            elapsed_ms: 0.0,
        };

        // need at least 3 clusters to fit a circle
        if segmented.len() < 3 {
            if self.verbosity > 0 {
                debug!(
                    "skip this track, not enough segmented clusters: {}",
                    segmented.len()
                );
            }
            diag.elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
            return (hits.to_vec(), diag);
        }

        let positions: Vec<Vector3<f64>> = segmented.iter().map(|h| h.position).collect();
        let circle = circle_fit_by_taubin(&positions);
        let line = line_fit(&positions);

        for hit in segmented {
            let Some(target_radius) = hit
                .layer
                .checked_sub(SEGMENTED_LAYER_OFFSET)
                .and_then(|i| self.radii.get(i as usize))
            else {
                diag.dropped += 1;
                debug!(
                    "cluster {:#x}: layer {} has no readout radius, dropped",
                    hit.key, hit.layer
                );
                continue;
            };

            // circle position at the target surface radius
            let Some((x_proj, y_proj)) = self.select_intersection(
                target_radius,
                &circle,
                hit.position.x,
                hit.position.y,
            ) else {
                diag.dropped += 1;
                continue;
            };
            // z projection is unique
            let z_proj = line.intercept + line.slope * target_radius;

            // circle position at the cluster's own radius
            let cluster_radius = hit.transverse_radius();
            let Some((x_start, y_start)) = self.select_intersection(
                cluster_radius,
                &circle,
                hit.position.x,
                hit.position.y,
            ) else {
                diag.dropped += 1;
                continue;
            };
            let z_start = line.intercept + line.slope * cluster_radius;

            // displace along the fitted trajectory from the cluster radius
            // to the surface radius, leaving fit residuals in place
            let new_position = Vector3::new(
                hit.position.x - (x_start - x_proj),
                hit.position.y - (y_start - y_proj),
                hit.position.z - (z_start - z_proj),
            );

            if self.verbosity > 2 {
                trace!(
                    "cluster {:#x}: start ({x_start:.4}, {y_start:.4}, {z_start:.4}) proj ({x_proj:.4}, {y_proj:.4}, {z_proj:.4})",
                    hit.key
                );
                trace!(
                    "  layer {} target radius {target_radius:.4} cluster radius {cluster_radius:.4} -> new position {new_position:?}",
                    hit.layer
                );
            }

            moved.push(TrackHit {
                key: hit.key,
                layer: hit.layer,
                region: hit.region,
                position: new_position,
            });
            diag.moved += 1;
        }

        diag.elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
        (moved, diag)
    }

    /// Projects independent tracks in parallel. The projector holds no
    /// mutable state, so tracks can fan out freely.
    pub fn project_tracks(&self, tracks: &[Vec<TrackHit>]) -> Vec<Vec<TrackHit>> {
        tracks
            .par_iter()
            .map(|track| self.project(track))
            .collect()
    }

    /// Intersects the fitted circle with the cylinder of `target_radius`
    /// and picks the solution near the original cluster position.
    ///
    /// Of the two candidates the one within [`INTERSECTION_MATCH_TOL_CM`]
    /// of the cluster in both x and y wins; when neither qualifies the
    /// minus solution is used. `None` when the circles do not intersect,
    /// in which case the cluster is skipped.
    fn select_intersection(
        &self,
        target_radius: f64,
        circle: &CircleFit,
        xclus: f64,
        yclus: f64,
    ) -> Option<(f64, f64)> {
        let Some(sol) = circle_circle_intersection(target_radius, circle.r, circle.x0, circle.y0)
        else {
            if self.verbosity > 1 {
                debug!(
                    "circle/circle intersection failed, skip this cluster: \
                     target_radius {target_radius} fitted R {} X0 {} Y0 {}",
                    circle.r, circle.x0, circle.y0
                );
            }
            return None;
        };

        if (xclus - sol.xplus).abs() < INTERSECTION_MATCH_TOL_CM
            && (yclus - sol.yplus).abs() < INTERSECTION_MATCH_TOL_CM
        {
            Some((sol.xplus, sol.yplus))
        } else {
            Some((sol.xminus, sol.yminus))
        }
    }
}

impl Default for ClusterRadialProjector {
    fn default() -> Self {
        Self::new(LayerRadiusTable::default())
    }
}
