use log::debug;
use serde::{Deserialize, Serialize};

/// Number of readout layers of the radially segmented detector.
pub const N_SEGMENTED_LAYERS: usize = 48;

/// Layers per radial region (inner, mid, outer).
const LAYERS_PER_REGION: usize = 16;

/// Nominal readout radius of every segmented layer, in centimeters.
///
/// The table holds 48 entries split into three contiguous regions of 16
/// layers each. By default every entry is the midpoint of its region bin,
/// derived from the four region boundary radii; alternatively the table can
/// be overwritten wholesale from an externally supplied per-layer radius
/// list (e.g. the as-built cell geometry), which always takes precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerRadiusTable {
    radius: Vec<f64>,
}

impl Default for LayerRadiusTable {
    fn default() -> Self {
        Self::from_boundaries(30.0, 40.0, 60.0, 76.4)
    }
}

impl LayerRadiusTable {
    /// Builds the table from the region boundary radii: each layer radius
    /// is the midpoint of its evenly spaced region bin.
    pub fn from_boundaries(
        inner_min_radius: f64,
        mid_min_radius: f64,
        outer_min_radius: f64,
        outer_max_radius: f64,
    ) -> Self {
        let inner_spacing = (mid_min_radius - inner_min_radius) / LAYERS_PER_REGION as f64;
        let mid_spacing = (outer_min_radius - mid_min_radius) / LAYERS_PER_REGION as f64;
        let outer_spacing = (outer_max_radius - outer_min_radius) / LAYERS_PER_REGION as f64;

        let mut radius = vec![0.0; N_SEGMENTED_LAYERS];
        for i in 0..LAYERS_PER_REGION {
            radius[i] = inner_min_radius + (i as f64 + 0.5) * inner_spacing;
            radius[i + 16] = mid_min_radius + (i as f64 + 0.5) * mid_spacing;
            radius[i + 32] = outer_min_radius + (i as f64 + 0.5) * outer_spacing;
        }
        Self { radius }
    }

    /// Overwrites the table with per-layer radii from an external geometry
    /// source, one radius per layer in layer order.
    ///
    /// Entries beyond [`N_SEGMENTED_LAYERS`] are ignored; a short list
    /// leaves the remaining default entries in place.
    pub fn set_layer_radii(&mut self, radii: impl IntoIterator<Item = f64>) {
        let mut layer = 0;
        for r in radii.into_iter().take(N_SEGMENTED_LAYERS) {
            self.radius[layer] = r;
            layer += 1;
        }
        debug!("LayerRadiusTable: {layer} layer radii loaded from geometry source");
    }

    /// Nominal readout radius of the layer at `index`, or `None` when the
    /// index is outside the table.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.radius.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_bin_midpoints() {
        let table = LayerRadiusTable::default();
        let inner_spacing = (40.0 - 30.0) / 16.0;
        assert_eq!(table.get(0), Some(30.0 + 0.5 * inner_spacing));
        assert_eq!(table.get(15), Some(30.0 + 15.5 * inner_spacing));
        let outer_spacing = (76.4 - 60.0) / 16.0;
        assert_eq!(table.get(47), Some(60.0 + 15.5 * outer_spacing));
    }

    #[test]
    fn default_table_monotonic() {
        let table = LayerRadiusTable::default();
        assert_eq!(table.len(), N_SEGMENTED_LAYERS);
        for i in 1..table.len() {
            assert!(table.get(i).unwrap() >= table.get(i - 1).unwrap());
        }
    }

    #[test]
    fn external_radii_take_precedence() {
        let mut table = LayerRadiusTable::default();
        let external: Vec<f64> = (0..N_SEGMENTED_LAYERS).map(|i| 30.0 + i as f64).collect();
        table.set_layer_radii(external.iter().copied());
        assert_eq!(table.get(0), Some(30.0));
        assert_eq!(table.get(47), Some(77.0));
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let table = LayerRadiusTable::default();
        assert_eq!(table.get(48), None);
    }
}
