use std::f64::consts::PI;

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::segmentation::{ChipSegmentation, Pixel};

/// Tolerance (cm) of the edge snap applied before pixel lookup. Upstream
/// geometric transforms can place legitimate edge hits a few nanometers
/// outside the nominal active area; points within this distance of the
/// boundary are pulled back inside instead of being rejected.
const EDGE_SNAP_EPS: f64 = 5e-6;

/// Number of chip slots along one module.
pub const CHIPS_PER_MODULE: usize = 9;

/// As-built construction constants for one barrel layer of sensor staves.
/// Immutable after construction; a stave is centered at the origin with
/// the sensor normal pointing in +y, and all lengths are centimeters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorGeometry {
    pub layer: u32,
    pub n_staves: u32,
    pub nominal_radius: f64,
    /// Angular step between neighboring staves.
    pub stave_phi_step: f64,
    /// Tilt of each stave about its own axis.
    pub stave_phi_tilt: f64,
    /// Azimuthal position of stave 0.
    pub stave_phi_0: f64,
    /// Fixed translation from the sensor-local to the chip-local frame,
    /// constant across all sensors of this detector generation.
    pub sensor_to_chip_offset: Vector3<f64>,
    /// Chip slot centers along one module; only z varies meaningfully.
    /// Chip 0 is the one closest to the connectors (-z).
    pub chip_positions_in_module: [Vector3<f64>; CHIPS_PER_MODULE],
    pub segmentation: ChipSegmentation,
}

impl SensorGeometry {
    /// Inner-barrel stave construction with the offsets taken from the
    /// detector construction model.
    pub fn inner_barrel(
        layer: u32,
        n_staves: u32,
        nominal_radius: f64,
        stave_phi_step: f64,
        stave_phi_tilt: f64,
        stave_phi_0: f64,
    ) -> Self {
        let chip_z = [
            -12.060, -9.0450, -6.0300, -3.0150, 0.0, 3.0150, 6.0300, 9.0450, 12.060,
        ];
        Self {
            layer,
            n_staves,
            nominal_radius,
            stave_phi_step,
            stave_phi_tilt,
            stave_phi_0,
            sensor_to_chip_offset: Vector3::new(0.058128, -0.0005, 0.0),
            chip_positions_in_module: chip_z.map(|z| Vector3::new(0.0275, -0.02075, z)),
            segmentation: ChipSegmentation::default(),
        }
    }

    /// Chip pitch along z, derived from the first and last chip slots.
    #[inline]
    pub fn chip_pitch_z(&self) -> f64 {
        (self.chip_positions_in_module[CHIPS_PER_MODULE - 1].z
            - self.chip_positions_in_module[0].z)
            / (CHIPS_PER_MODULE - 1) as f64
    }
}

/// Bidirectional mapping between world/sensor-local coordinates and the
/// discrete sensor addressing of one barrel layer: (stave, chip) identity
/// and pixel (row, column) indices.
///
/// The mapper holds only immutable geometry and can be shared across
/// threads. Out-of-range conversions follow a best-effort policy: they
/// report invalidity (an `Option` or a log message) but never panic, since
/// per-hit volume makes failure paths hot.
#[derive(Clone, Debug)]
pub struct SensorPixelMapper {
    geometry: SensorGeometry,
    verbosity: u8,
}

impl SensorPixelMapper {
    pub fn new(geometry: SensorGeometry) -> Self {
        Self {
            geometry,
            verbosity: 0,
        }
    }

    /// Diagnostic verbosity. Gates optional log output only.
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.verbosity = verbosity;
    }

    pub fn geometry(&self) -> &SensorGeometry {
        &self.geometry
    }

    /// Stave and chip indices of the sensor containing a world-space
    /// point: the stave from the azimuth, the chip from z.
    ///
    /// Neither index is clamped to the physical range (0..n_staves,
    /// 0..=8); a point outside the barrel acceptance yields out-of-range
    /// indices and range validation is the caller's responsibility.
    pub fn locate_sensor(&self, world: &Vector3<f64>) -> (i32, i32) {
        let mut phi = world.y.atan2(world.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let stave = ((phi - self.geometry.stave_phi_0) / self.geometry.stave_phi_step).round();

        // chip 4 of 9 sits at z = 0
        let chip = (world.z / self.geometry.chip_pitch_z()).round() + 4.0;

        (stave as i32, chip as i32)
    }

    /// Maps sensor-local coordinates to a pixel address, or `None` when
    /// the point lies outside the active matrix after edge snapping.
    pub fn local_to_pixel(&self, sensor_local: &Vector3<f64>) -> Option<Pixel> {
        let seg = &self.geometry.segmentation;
        let x = snap_to_edge(sensor_local.x, 0.5 * seg.active_size_rows());
        let z = snap_to_edge(sensor_local.z, 0.5 * seg.active_size_cols());

        // go from the sensor frame to the chip frame
        let in_chip =
            Vector3::new(x, sensor_local.y, z) + self.geometry.sensor_to_chip_offset;

        seg.local_to_detector(in_chip.x, in_chip.z)
    }

    /// Sensor-local coordinates of the center of pixel (`row`, `col`).
    ///
    /// Out-of-range indices are reported through the log and the
    /// extrapolated position is returned anyway; callers must bound-check
    /// the indices before trusting the result.
    pub fn pixel_to_local(&self, row: i64, col: i64) -> Vector3<f64> {
        let seg = &self.geometry.segmentation;
        if seg.detector_to_local(row, col).is_none() && self.verbosity > 0 {
            debug!(
                "pixel coordinate ({row}, {col}) out of range on layer {}",
                self.geometry.layer
            );
        }
        let (x, z) = seg.detector_to_local_unchecked(row, col);

        // chip frame back to sensor frame
        Vector3::new(x, 0.0, z) - self.geometry.sensor_to_chip_offset
    }

    /// Sensor-local coordinates of the pixel with the given flattened
    /// index.
    pub fn index_to_local(&self, index: u64) -> Vector3<f64> {
        let pixel = self.geometry.segmentation.index_to_pixel(index);
        self.pixel_to_local(i64::from(pixel.row), i64::from(pixel.col))
    }

    /// Flattened pixel index; row varies fastest.
    pub fn linear_index(&self, pixel: Pixel) -> u64 {
        self.geometry.segmentation.linear_index(pixel)
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    pub fn index_to_pixel(&self, index: u64) -> Pixel {
        self.geometry.segmentation.index_to_pixel(index)
    }
}

/// Pulls a coordinate that sits within [`EDGE_SNAP_EPS`] of the active
/// matrix boundary back to just inside it, preserving the sign.
fn snap_to_edge(value: f64, half_size: f64) -> f64 {
    if (value.abs() - half_size).abs() < EDGE_SNAP_EPS {
        value.signum() * (half_size - EDGE_SNAP_EPS)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner_layer() -> SensorGeometry {
        // layer 0 construction values
        SensorGeometry::inner_barrel(0, 12, 2.46, 2.0 * PI / 12.0, 0.304, 0.0)
    }

    #[test]
    fn chip_pitch_from_slot_positions() {
        let geom = inner_layer();
        assert!((geom.chip_pitch_z() - 3.015).abs() < 1e-12);
    }

    #[test]
    fn locate_sensor_center_of_stave_zero() {
        let mapper = SensorPixelMapper::new(inner_layer());
        let (stave, chip) = mapper.locate_sensor(&Vector3::new(2.46, 0.0, 0.0));
        assert_eq!((stave, chip), (0, 4));
    }

    #[test]
    fn locate_sensor_wraps_phi() {
        let mapper = SensorPixelMapper::new(inner_layer());
        // slightly below the x axis: phi wraps to just under 2 pi, which
        // rounds to the full stave count, not to -1
        let (stave, _) = mapper.locate_sensor(&Vector3::new(2.46, -1e-6, 0.0));
        assert_eq!(stave, 12);
    }

    #[test]
    fn locate_sensor_chip_index_is_unclamped() {
        let mapper = SensorPixelMapper::new(inner_layer());
        let (_, chip) = mapper.locate_sensor(&Vector3::new(2.46, 0.0, 100.0));
        assert!(chip > 8, "chip index must not be clamped, got {chip}");
    }

    #[test]
    fn edge_snap_is_sign_preserving() {
        let half = 0.7;
        let snapped = snap_to_edge(-(half + 1e-6), half);
        assert!(snapped > -half && snapped < 0.0);
        let snapped = snap_to_edge(half + 1e-6, half);
        assert!(snapped < half && snapped > 0.0);
        // far from the edge nothing happens
        assert_eq!(snap_to_edge(0.3, half), 0.3);
    }
}
