use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Opaque cluster identity. Carried through the projector untouched and
/// never interpreted numerically; only used to correlate input and output.
pub type ClusterKey = u64;

/// Coarse detector region a hit belongs to.
///
/// Only hits from the radially segmented gas detector are re-projected;
/// everything else passes through the projector unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorRegion {
    RadialSegmented,
    Other,
}

/// One detector measurement attributed to a reconstructed track.
///
/// Positions are in the global detector frame, in centimeters, already
/// corrected for known systematic distortions by the upstream stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackHit {
    pub key: ClusterKey,
    /// Globally numbered detector layer index.
    pub layer: u32,
    pub region: DetectorRegion,
    pub position: Vector3<f64>,
}

impl TrackHit {
    /// Transverse radius of the hit position.
    #[inline]
    pub fn transverse_radius(&self) -> f64 {
        (self.position.x * self.position.x + self.position.y * self.position.y).sqrt()
    }
}
