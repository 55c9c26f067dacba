use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Four-momentum in GeV, (px, py, pz, E).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl FourMomentum {
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Transverse momentum.
    #[inline]
    pub fn pt(&self) -> f64 {
        (self.px * self.px + self.py * self.py).sqrt()
    }

    /// Magnitude of the three-momentum.
    #[inline]
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Azimuth in (-pi, pi].
    #[inline]
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Pseudorapidity. Diverges for momenta along the beam axis.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        if p == self.pz {
            return f64::INFINITY;
        }
        if p == -self.pz {
            return f64::NEG_INFINITY;
        }
        0.5 * ((p + self.pz) / (p - self.pz)).ln()
    }

    /// Rapidity, used as the longitudinal coordinate in jet clustering.
    pub fn rapidity(&self) -> f64 {
        if self.e == self.pz {
            return f64::INFINITY;
        }
        if self.e == -self.pz {
            return f64::NEG_INFINITY;
        }
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }

    /// Invariant mass squared; can be slightly negative from rounding.
    #[inline]
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: FourMomentum) {
        *self = *self + rhs;
    }
}

/// Flattened generator-record entry consumed by the event triggers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenParticle {
    pub momentum: FourMomentum,
    pub pdg_id: i32,
    /// Generator status code; 1 marks a final-state particle.
    pub status: i32,
    /// Generator record position, carried as an opaque tag.
    pub barcode: i32,
    /// PDG id of the immediate parent, when the generator provides one.
    pub parent_pdg: Option<i32>,
}

impl GenParticle {
    pub fn is_final_state(&self) -> bool {
        self.status == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transverse_momentum_and_phi() {
        let p = FourMomentum::new(3.0, 4.0, 0.0, 5.0);
        assert!((p.pt() - 5.0).abs() < 1e-12);
        assert!((p.phi() - (4.0f64).atan2(3.0)).abs() < 1e-12);
    }

    #[test]
    fn eta_is_zero_at_midrapidity() {
        let p = FourMomentum::new(1.0, 2.0, 0.0, 5.0);
        assert_eq!(p.eta(), 0.0);
    }

    #[test]
    fn eta_sign_follows_pz() {
        let fwd = FourMomentum::new(1.0, 0.0, 2.0, 5.0);
        let bwd = FourMomentum::new(1.0, 0.0, -2.0, 5.0);
        assert!(fwd.eta() > 0.0);
        assert!((fwd.eta() + bwd.eta()).abs() < 1e-12);
    }

    #[test]
    fn eta_diverges_along_beam() {
        let p = FourMomentum::new(0.0, 0.0, 10.0, 10.0);
        assert!(p.eta().is_infinite());
    }

    #[test]
    fn four_momentum_addition_is_componentwise() {
        let mut a = FourMomentum::new(1.0, 2.0, 3.0, 4.0);
        a += FourMomentum::new(0.5, -2.0, 1.0, 2.0);
        assert_eq!(a, FourMomentum::new(1.5, 0.0, 4.0, 6.0));
        assert!((a.mass2() - (36.0 - 2.25 - 16.0)).abs() < 1e-12);
    }
}
