//! Generator-level event triggers.
//!
//! Overview
//! - [`kinematics`] carries the flattened generator record consumed here:
//!   [`FourMomentum`] and [`GenParticle`].
//! - [`jets`] clusters final-state momenta into anti-kt jets.
//! - [`ParticleTrigger`] accepts events containing at least one particle
//!   that matches the configured identity and kinematic requirements.
//! - [`JetTrigger`] accepts events with at least one clustered jet above a
//!   transverse-momentum threshold inside the central acceptance, with an
//!   optional accepted-event quota.
//!
//! Both triggers are yes/no filters: a rejected event is simply skipped by
//! the host, never an error.

pub mod jets;
pub mod kinematics;

mod jet_trigger;
mod particle;

pub use jet_trigger::{JetTrigger, JetTriggerConfig};
pub use jets::{cluster, Jet, JetDefinition};
pub use kinematics::{FourMomentum, GenParticle};
pub use particle::{ParticleTrigger, RangeCut};
