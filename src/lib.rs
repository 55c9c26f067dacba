#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod projector;
pub mod sensor;
pub mod trigger;
pub mod types;

// Numerics shared by the components; public for tools and tests, but
// considered an unstable internal surface.
pub mod fit;

// --- High-level re-exports -------------------------------------------------

pub use crate::projector::{ClusterRadialProjector, LayerRadiusTable};
pub use crate::sensor::{ChipSegmentation, Pixel, SensorGeometry, SensorPixelMapper};
pub use crate::trigger::{JetTrigger, JetTriggerConfig, ParticleTrigger};
pub use crate::types::{ClusterKey, DetectorRegion, TrackHit};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use barrel_reco::prelude::*;
/// use nalgebra::Vector3;
///
/// let projector = ClusterRadialProjector::new(LayerRadiusTable::default());
/// let hits = vec![TrackHit {
///     key: 0,
///     layer: 7,
///     region: DetectorRegion::RadialSegmented,
///     position: Vector3::new(30.3, 0.0, 4.0),
/// }];
/// // a single segmented hit cannot constrain a circle: pass-through
/// assert_eq!(projector.project(&hits), hits);
/// ```
pub mod prelude {
    pub use crate::projector::{ClusterRadialProjector, LayerRadiusTable};
    pub use crate::sensor::{Pixel, SensorGeometry, SensorPixelMapper};
    pub use crate::types::{ClusterKey, DetectorRegion, TrackHit};
}
