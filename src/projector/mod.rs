//! Radial re-projection of distortion-corrected clusters.
//!
//! Overview
//! - The radially segmented gas detector reads out on 48 concentric layer
//!   surfaces. Distortion corrections move clusters off those surfaces;
//!   the track fitter downstream expects them back on the nominal radii.
//! - [`ClusterRadialProjector`] fits one circle (transverse) and one line
//!   (z versus radius) per track and slides each segmented cluster along
//!   the fitted trajectory onto its layer's readout radius.
//! - [`LayerRadiusTable`] carries the nominal radii: bin midpoints derived
//!   from the region boundary radii by default, or the as-built per-layer
//!   radii supplied by an external geometry source.
//!
//! Failure handling is local and data driven: tracks with fewer than three
//! segmented clusters pass through untouched, and clusters without a real
//! circle-circle intersection are dropped individually. Nothing in this
//! module panics or aborts an event.

mod mover;
mod radii;

pub use mover::{ClusterRadialProjector, SEGMENTED_LAYER_OFFSET};
pub use radii::{LayerRadiusTable, N_SEGMENTED_LAYERS};
