use log::debug;
use serde::{Deserialize, Serialize};

use super::jets::{cluster, JetDefinition};
use super::kinematics::GenParticle;
use crate::diagnostics::TriggerDiagnostics;

/// Configuration of the jet-based event filter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetTriggerConfig {
    /// Minimum jet transverse momentum (GeV). Zero or negative accepts
    /// every event.
    pub threshold: f64,
    pub jet_definition: JetDefinition,
    /// Jets are only counted within this pseudorapidity acceptance.
    pub max_abs_eta: f64,
    /// When set, at most this many events are accepted; all later events
    /// are rejected so parallel generator streams stay aligned on the
    /// same event count.
    pub event_quota: Option<u64>,
}

impl Default for JetTriggerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            jet_definition: JetDefinition::default(),
            max_abs_eta: 1.1,
            event_quota: None,
        }
    }
}

/// Event filter accepting events that contain at least one jet above the
/// configured transverse-momentum threshold within the central acceptance.
///
/// Unlike the geometry components this filter is stateful: it counts seen
/// and accepted events to implement the optional quota.
#[derive(Clone, Debug)]
pub struct JetTrigger {
    config: JetTriggerConfig,
    n_seen: u64,
    n_accepted: u64,
}

impl JetTrigger {
    pub fn new(config: JetTriggerConfig) -> Self {
        Self {
            config,
            n_seen: 0,
            n_accepted: 0,
        }
    }

    pub fn config(&self) -> &JetTriggerConfig {
        &self.config
    }

    /// Evaluates one event; returns whether it passes the filter.
    pub fn process_event(&mut self, event: &[GenParticle]) -> bool {
        self.n_seen += 1;

        if let Some(quota) = self.config.event_quota {
            if self.n_accepted >= quota {
                return false;
            }
        }

        let good = self.is_good_event(event);
        if good {
            self.n_accepted += 1;
        }
        good
    }

    fn is_good_event(&self, event: &[GenParticle]) -> bool {
        if self.config.threshold <= 0.0 {
            return true;
        }

        let input: Vec<_> = event
            .iter()
            .filter(|p| is_clusterable(p))
            .map(|p| p.momentum)
            .collect();
        if input.is_empty() {
            return false;
        }

        let jets = cluster(&input, &self.config.jet_definition);
        let above = jets
            .iter()
            .filter(|jet| {
                jet.momentum.eta().abs() <= self.config.max_abs_eta
                    && jet.momentum.pt() > self.config.threshold
            })
            .count();
        debug!(
            "jet trigger: {} jets, {} above {} GeV",
            jets.len(),
            above,
            self.config.threshold
        );
        above > 0
    }

    pub fn events_seen(&self) -> u64 {
        self.n_seen
    }

    pub fn events_accepted(&self) -> u64 {
        self.n_accepted
    }

    pub fn diagnostics(&self) -> TriggerDiagnostics {
        TriggerDiagnostics {
            events_seen: self.n_seen,
            events_accepted: self.n_accepted,
        }
    }
}

/// Final-state particles enter the clustering; neutrinos and the rest of
/// the 12..=18 PDG block do not reach the calorimeters and are excluded.
fn is_clusterable(particle: &GenParticle) -> bool {
    if !particle.is_final_state() {
        return false;
    }
    let pdg = particle.pdg_id.abs();
    !(12..=18).contains(&pdg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::kinematics::FourMomentum;

    fn final_state(px: f64, py: f64, pz: f64) -> GenParticle {
        let e = (px * px + py * py + pz * pz).sqrt();
        GenParticle {
            momentum: FourMomentum::new(px, py, pz, e),
            pdg_id: 211,
            status: 1,
            barcode: 0,
            parent_pdg: None,
        }
    }

    #[test]
    fn zero_threshold_accepts_everything() {
        let mut trigger = JetTrigger::new(JetTriggerConfig::default());
        assert!(trigger.process_event(&[]));
        assert_eq!(trigger.events_accepted(), 1);
    }

    #[test]
    fn hard_central_jet_fires_the_trigger() {
        let mut trigger = JetTrigger::new(JetTriggerConfig {
            threshold: 10.0,
            ..Default::default()
        });
        assert!(trigger.process_event(&[final_state(20.0, 0.0, 0.0)]));
        assert!(!trigger.process_event(&[final_state(5.0, 0.0, 0.0)]));
    }

    #[test]
    fn forward_jet_is_outside_acceptance() {
        let mut trigger = JetTrigger::new(JetTriggerConfig {
            threshold: 10.0,
            ..Default::default()
        });
        // pt above threshold but |eta| well beyond 1.1
        assert!(!trigger.process_event(&[final_state(20.0, 0.0, 100.0)]));
    }

    #[test]
    fn neutrinos_do_not_cluster() {
        let mut trigger = JetTrigger::new(JetTriggerConfig {
            threshold: 10.0,
            ..Default::default()
        });
        let mut nu = final_state(20.0, 0.0, 0.0);
        nu.pdg_id = 12;
        assert!(!trigger.process_event(&[nu]));
    }

    #[test]
    fn quota_caps_accepted_events() {
        let mut trigger = JetTrigger::new(JetTriggerConfig {
            event_quota: Some(2),
            ..Default::default()
        });
        assert!(trigger.process_event(&[]));
        assert!(trigger.process_event(&[]));
        assert!(!trigger.process_event(&[]));
        assert_eq!(trigger.events_seen(), 3);
        assert_eq!(trigger.events_accepted(), 2);
    }
}
