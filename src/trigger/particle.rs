use log::debug;
use serde::{Deserialize, Serialize};

use super::kinematics::GenParticle;

/// Inclusive bound pair for one kinematic variable. An unset bound never
/// rejects; a value fails only strictly below `low` or strictly above
/// `high`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeCut {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl RangeCut {
    pub fn at_least(low: f64) -> Self {
        Self {
            low: Some(low),
            high: None,
        }
    }

    pub fn at_most(high: f64) -> Self {
        Self {
            low: None,
            high: Some(high),
        }
    }

    pub fn between(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    pub fn is_active(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }

    #[inline]
    pub fn passes(&self, value: f64) -> bool {
        if let Some(low) = self.low {
            if value < low {
                return false;
            }
        }
        if let Some(high) = self.high {
            if value > high {
                return false;
            }
        }
        true
    }
}

/// Single-particle event filter with configurable identity and kinematic
/// requirements.
///
/// An event is accepted when at least one particle matches the PDG id
/// list (if any), descends from one of the listed parents (if any), and
/// passes every active range cut. With no requirements configured every
/// event passes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTrigger {
    /// Accepted particle PDG ids; empty accepts any id.
    pub particle_ids: Vec<i32>,
    /// Required parent PDG ids; empty skips the parent requirement.
    pub parent_ids: Vec<i32>,
    pub pt: RangeCut,
    pub p: RangeCut,
    pub eta: RangeCut,
    pub abs_eta: RangeCut,
    pub pz: RangeCut,
}

impl ParticleTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_particle(&mut self, pdg_id: i32) {
        self.particle_ids.push(pdg_id);
    }

    pub fn add_parent(&mut self, pdg_id: i32) {
        self.parent_ids.push(pdg_id);
    }

    /// Whether any particle in the event record satisfies the trigger.
    pub fn accepts(&self, event: &[GenParticle]) -> bool {
        let accepted = event.iter().any(|p| self.matches(p));
        if !accepted {
            debug!("particle trigger rejected event with {} particles", event.len());
        }
        accepted
    }

    fn matches(&self, particle: &GenParticle) -> bool {
        if !self.particle_ids.is_empty() && !self.particle_ids.contains(&particle.pdg_id) {
            return false;
        }
        if !self.parent_ids.is_empty() {
            match particle.parent_pdg {
                Some(parent) if self.parent_ids.contains(&parent) => {}
                _ => return false,
            }
        }

        let momentum = &particle.momentum;
        self.pt.passes(momentum.pt())
            && self.p.passes(momentum.p())
            && self.eta.passes(momentum.eta())
            && self.abs_eta.passes(momentum.eta().abs())
            && self.pz.passes(momentum.pz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::kinematics::FourMomentum;

    fn particle(pdg_id: i32, px: f64, pz: f64, parent_pdg: Option<i32>) -> GenParticle {
        let e = (px * px + pz * pz).sqrt();
        GenParticle {
            momentum: FourMomentum::new(px, 0.0, pz, e),
            pdg_id,
            status: 1,
            barcode: 0,
            parent_pdg,
        }
    }

    #[test]
    fn empty_trigger_accepts_everything() {
        let trigger = ParticleTrigger::new();
        assert!(trigger.accepts(&[particle(211, 0.3, 1.0, None)]));
    }

    #[test]
    fn id_list_restricts_species() {
        let mut trigger = ParticleTrigger::new();
        trigger.add_particle(11);
        trigger.add_particle(-11);
        assert!(trigger.accepts(&[particle(-11, 2.0, 0.0, None)]));
        assert!(!trigger.accepts(&[particle(211, 2.0, 0.0, None)]));
    }

    #[test]
    fn parent_requirement() {
        let mut trigger = ParticleTrigger::new();
        trigger.add_particle(11);
        trigger.add_parent(443); // electron from charmonium
        assert!(trigger.accepts(&[particle(11, 2.0, 0.0, Some(443))]));
        assert!(!trigger.accepts(&[particle(11, 2.0, 0.0, Some(23))]));
        assert!(!trigger.accepts(&[particle(11, 2.0, 0.0, None)]));
    }

    #[test]
    fn range_cut_bounds_are_inclusive() {
        let cut = RangeCut::between(1.0, 2.0);
        assert!(cut.passes(1.0));
        assert!(cut.passes(2.0));
        assert!(!cut.passes(1.0 - 1e-12));
        assert!(!cut.passes(2.0 + 1e-12));
        assert!(!RangeCut::default().is_active());
        assert!(RangeCut::default().passes(f64::NEG_INFINITY));
    }

    #[test]
    fn pt_window_rejects_soft_particles() {
        let mut trigger = ParticleTrigger::new();
        trigger.pt = RangeCut::at_least(1.5);
        let soft = particle(211, 1.0, 0.0, None);
        let hard = particle(211, 2.0, 0.0, None);
        assert!(!trigger.accepts(&[soft.clone()]));
        assert!(trigger.accepts(&[soft, hard]));
    }
}
