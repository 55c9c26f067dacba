//! Sequential-recombination jet clustering (anti-kt).
//!
//! Minimal in-crate implementation of the anti-kt algorithm with E-scheme
//! recombination: the pairwise metric is
//! `d_ij = min(1/kt_i^2, 1/kt_j^2) * dR_ij^2 / R^2` with
//! `dR^2 = dy^2 + dphi^2`, and the beam distance is `d_iB = 1/kt_i^2`.
//! The naive O(n^3) scan is plenty for generator-level triggering, where
//! events carry at most a few hundred clusterable particles.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::kinematics::FourMomentum;

/// Jet algorithm configuration. Only the radius is tunable; the metric is
/// anti-kt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JetDefinition {
    pub radius: f64,
}

impl Default for JetDefinition {
    fn default() -> Self {
        Self { radius: 0.4 }
    }
}

/// One clustered jet with the indices of its input constituents.
#[derive(Clone, Debug, PartialEq)]
pub struct Jet {
    pub momentum: FourMomentum,
    /// Indices into the input slice passed to [`cluster`].
    pub constituents: Vec<usize>,
}

#[derive(Clone, Debug)]
struct PseudoJet {
    momentum: FourMomentum,
    constituents: Vec<usize>,
}

/// Clusters the input momenta into inclusive jets.
pub fn cluster(particles: &[FourMomentum], def: &JetDefinition) -> Vec<Jet> {
    let r2 = def.radius * def.radius;
    let mut active: Vec<PseudoJet> = particles
        .iter()
        .enumerate()
        .map(|(i, &momentum)| PseudoJet {
            momentum,
            constituents: vec![i],
        })
        .collect();
    let mut jets = Vec::new();

    while !active.is_empty() {
        let beam_dist: Vec<f64> = active.iter().map(|p| inv_kt2(&p.momentum)).collect();

        // smallest beam distance as the starting candidate
        let mut best_beam = 0;
        for (i, d) in beam_dist.iter().enumerate() {
            if *d < beam_dist[best_beam] {
                best_beam = i;
            }
        }
        let mut min_dist = beam_dist[best_beam];
        let mut best_pair: Option<(usize, usize)> = None;

        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let dij = beam_dist[i].min(beam_dist[j])
                    * delta_r2(&active[i].momentum, &active[j].momentum)
                    / r2;
                if dij < min_dist {
                    min_dist = dij;
                    best_pair = Some((i, j));
                }
            }
        }

        match best_pair {
            Some((i, j)) => {
                // E-scheme recombination; remove j first to keep i valid
                let merged = active.swap_remove(j);
                active[i].momentum += merged.momentum;
                active[i].constituents.extend(merged.constituents);
            }
            None => {
                let done = active.swap_remove(best_beam);
                jets.push(Jet {
                    momentum: done.momentum,
                    constituents: done.constituents,
                });
            }
        }
    }

    jets
}

#[inline]
fn inv_kt2(p: &FourMomentum) -> f64 {
    let kt2 = p.px * p.px + p.py * p.py;
    1.0 / kt2
}

fn delta_r2(a: &FourMomentum, b: &FourMomentum) -> f64 {
    let dy = a.rapidity() - b.rapidity();
    let mut dphi = (a.phi() - b.phi()).abs();
    if dphi > PI {
        dphi = 2.0 * PI - dphi;
    }
    dy * dy + dphi * dphi
}
