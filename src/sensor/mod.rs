//! Pixel-sensor barrel geometry: sensor identity and pixel addressing.
//!
//! Overview
//! - [`ChipSegmentation`] describes the pixel grid of one chip: counts,
//!   pitches, passive edges, and the checked/unchecked conversions between
//!   chip-local coordinates and (row, column) indices.
//! - [`SensorGeometry`] carries the as-built stave construction constants
//!   of one barrel layer, including the fixed sensor-to-chip frame offset
//!   and the nine chip slots along a module.
//! - [`SensorPixelMapper`] combines the two into the operations consumed
//!   by clustering and hit reconstruction: world point to (stave, chip),
//!   sensor-local point to pixel and back, and the flattened pixel index
//!   used by persisted hit data.
//!
//! The error policy is best effort throughout: conversions signal
//! invalidity through `Option` or a logged diagnostic but always return a
//! usable-if-checked value, because these paths run once per hit.

mod geometry;
mod segmentation;

pub use geometry::{SensorGeometry, SensorPixelMapper, CHIPS_PER_MODULE};
pub use segmentation::{ChipSegmentation, Pixel};
