use serde::Deserialize;

use crate::projector::LayerRadiusTable;
use crate::sensor::{ChipSegmentation, SensorGeometry};

/// Source of the segmented-detector layer radii.
///
/// The two initialization paths are mutually exclusive: when `layer_radii`
/// is present it overwrites the boundary-derived defaults wholesale, which
/// matches how the as-built cell geometry takes precedence over the
/// construction model.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RadiusTableConfig {
    /// Region boundary radii (inner min, mid min, outer min, outer max).
    pub boundaries: Option<[f64; 4]>,
    /// Externally measured per-layer radii, one per layer in layer order.
    pub layer_radii: Option<Vec<f64>>,
}

impl RadiusTableConfig {
    pub fn build(&self) -> LayerRadiusTable {
        let mut table = match self.boundaries {
            Some([inner_min, mid_min, outer_min, outer_max]) => {
                LayerRadiusTable::from_boundaries(inner_min, mid_min, outer_min, outer_max)
            }
            None => LayerRadiusTable::default(),
        };
        if let Some(radii) = &self.layer_radii {
            table.set_layer_radii(radii.iter().copied());
        }
        table
    }
}

/// Construction constants of one pixel-barrel layer.
#[derive(Clone, Debug, Deserialize)]
pub struct SensorLayerConfig {
    pub layer: u32,
    pub n_staves: u32,
    pub nominal_radius: f64,
    pub stave_phi_step: f64,
    pub stave_phi_tilt: f64,
    pub stave_phi_0: f64,
    /// Pixel-grid override; the current sensor generation when absent.
    #[serde(default)]
    pub segmentation: Option<ChipSegmentation>,
}

impl SensorLayerConfig {
    pub fn build(&self) -> SensorGeometry {
        let mut geometry = SensorGeometry::inner_barrel(
            self.layer,
            self.n_staves,
            self.nominal_radius,
            self.stave_phi_step,
            self.stave_phi_tilt,
            self.stave_phi_0,
        );
        if let Some(segmentation) = &self.segmentation {
            geometry.segmentation = segmentation.clone();
        }
        geometry
    }
}
