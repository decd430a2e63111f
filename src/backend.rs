use rand::{SeedableRng, rngs::StdRng};

use crate::statevector::StateVector;

/** turns a prepared state into a measurement distribution over the computational basis */
pub trait Backend {
    /// name of the backend (for reports)
    fn name(&self) -> &str;

    /// measurement distribution of the state (2^n entries summing to 1)
    fn probabilities(&mut self, state:&StateVector) -> Vec<f64>;
}

impl<B:Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str { (**self).name() }

    fn probabilities(&mut self, state:&StateVector) -> Vec<f64> { (**self).probabilities(state) }
}

/** exact probabilities (noiseless, infinitely many shots) */
#[derive(Debug, Clone, Default)]
pub struct StatevectorBackend;

impl Backend for StatevectorBackend {
    fn name(&self) -> &str { "statevector" }

    fn probabilities(&mut self, state:&StateVector) -> Vec<f64> {
        state.probabilities()
    }
}

/** empirical frequencies over a finite number of measurements (seeded) */
#[derive(Debug, Clone)]
pub struct ShotsBackend {
    /// number of measurements per evaluation
    shots: usize,
    /// random number generator
    rng: StdRng,
}

impl ShotsBackend {
    /// creates a sampling backend. At least one shot is performed.
    pub fn new(shots:usize, seed:u64) -> Self {
        Self { shots: shots.max(1), rng: StdRng::seed_from_u64(seed) }
    }
}

impl Backend for ShotsBackend {
    fn name(&self) -> &str { "shots" }

    fn probabilities(&mut self, state:&StateVector) -> Vec<f64> {
        let counts = state.sample(self.shots, &mut self.rng);
        counts.into_iter().map(|c| c as f64 / self.shots as f64).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    fn superposition() -> StateVector {
        let mut s = StateVector::zero_state(2).unwrap();
        s.ry(0, PI / 2.);
        s.ry(1, PI / 3.);
        s
    }

    #[test]
    fn test_statevector_backend() {
        let s = superposition();
        let p = StatevectorBackend.probabilities(&s);
        assert_eq!(p, s.probabilities());
    }

    #[test]
    fn test_shots_backend_frequencies() {
        let s = superposition();
        let mut backend = ShotsBackend::new(1000, 11);
        let p = backend.probabilities(&s);
        assert_eq!(p.len(), 4);
        assert!((p.iter().sum::<f64>() - 1.).abs() < 1e-9);
        for (x,q) in s.probabilities().iter().enumerate() {
            assert!((p[x] - q).abs() < 0.1, "{}: {} vs {}", x, p[x], q);
        }
    }

    #[test]
    fn test_shots_backend_is_reproducible() {
        let s = superposition();
        let p1 = ShotsBackend::new(200, 5).probabilities(&s);
        let p2 = ShotsBackend::new(200, 5).probabilities(&s);
        assert_eq!(p1, p2);
    }
}
