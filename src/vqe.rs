use std::f64::consts::PI;

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ansatz::RyAnsatz;
use crate::backend::Backend;
use crate::eigensolver::{Eigenstate, MinimumEigensolver};
use crate::error::{CliqueError, Result};
use crate::ising::IsingOperator;
use crate::optimizer::Optimizer;

/**
Variational Quantum Eigensolver: minimizes the expectation of the operator over the states
prepared by the ansatz. The initial point is drawn uniformly in [-π,π] from `seed`.
The result is approximate: the optimizer may stop in a local minimum.
*/
#[derive(Debug)]
pub struct Vqe<O:Optimizer, B:Backend> {
    /// parametrized circuit
    ansatz: RyAnsatz,
    /// classical optimizer
    optimizer: O,
    /// measurement backend
    backend: B,
    /// seed of the initial point
    seed: u64,
}

impl<O:Optimizer, B:Backend> Vqe<O, B> {
    /// creates a VQE solver
    pub fn new(ansatz:RyAnsatz, optimizer:O, backend:B, seed:u64) -> Self {
        Self { ansatz, optimizer, backend, seed }
    }
}

impl<O:Optimizer, B:Backend> MinimumEigensolver for Vqe<O, B> {
    fn name(&self) -> String {
        format!("VQE ({}, {})", self.optimizer.name(), self.backend.name())
    }

    fn minimize(&mut self, operator:&IsingOperator) -> Result<Eigenstate> {
        minimize_variational(operator, &self.ansatz, &mut self.optimizer, &mut self.backend, self.seed)
    }
}

/**
runs the variational eigensolver.

# Errors
 - if the ansatz and the operator do not act on the same number of qubits, or if there are too many qubits
*/
pub fn minimize_variational(
    operator:&IsingOperator,
    ansatz:&RyAnsatz,
    optimizer:&mut dyn Optimizer,
    backend:&mut dyn Backend,
    seed:u64,
) -> Result<Eigenstate> {
    if ansatz.num_qubits() != operator.num_qubits() {
        return Err(CliqueError::DimensionMismatch {
            expected: operator.num_qubits(), got: ansatz.num_qubits()
        });
    }
    // fails early on oversized registers
    ansatz.prepare(&vec![0. ; ansatz.num_parameters()])?;
    let mut rng = StdRng::seed_from_u64(seed);
    let initial:Vec<f64> = (0..ansatz.num_parameters()).map(|_| rng.gen_range(-PI..=PI)).collect();
    info!(
        "VQE: {} qubits, {} terms, depth {}, {} parameters, optimizer {}, backend {}",
        ansatz.num_qubits(), operator.terms().len(), ansatz.depth(), ansatz.num_parameters(),
        optimizer.name(), backend.name()
    );
    let mut objective = |theta:&[f64]| -> f64 {
        ansatz.prepare(theta)
            .and_then(|state| operator.expectation(&backend.probabilities(&state)))
            .unwrap_or(f64::INFINITY)
    };
    let res = optimizer.minimize(&mut objective, &initial);
    debug!("VQE: {} evaluations, {} iterations, best {}", res.nb_evaluations, res.nb_iterations, res.value);
    let state = ansatz.prepare(&res.parameters)?;
    let probabilities = backend.probabilities(&state);
    Ok(Eigenstate {
        eigenvalue: res.value,
        probabilities,
        optimal_parameters: Some(res.parameters),
        nb_evaluations: res.nb_evaluations,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::ansatz::Entanglement;
    use crate::backend::{ShotsBackend, StatevectorBackend};
    use crate::clique::is_valid_clique;
    use crate::decode::decode;
    use crate::graph::WeightedGraph;
    use crate::ising::encode;
    use crate::optimizer::{Adam, Spsa};

    fn triangle() -> WeightedGraph {
        WeightedGraph::from_edges(3, &[(0,1,2.), (1,2,-3.), (0,2,1.)]).unwrap()
    }

    #[test]
    fn test_vqe_adam_finds_clique() {
        let g = triangle();
        let (op, offset) = encode(&g, 2);
        let mut vqe = Vqe::new(
            RyAnsatz::new(3, 0, Entanglement::Linear),
            Adam::new(300, 0.1),
            StatevectorBackend,
            17,
        );
        let state = vqe.minimize(&op).unwrap();
        assert!(state.eigenvalue + offset < 1.);
        let assignment = decode(&state);
        assert!(is_valid_clique(&assignment, &g, 2), "decoded {:?}", assignment);
    }

    #[test]
    fn test_vqe_spsa_runs() {
        let g = triangle();
        let (op, _) = encode(&g, 2);
        let mut vqe = Vqe::new(
            RyAnsatz::new(3, 1, Entanglement::Full),
            Spsa::new(100, 3),
            StatevectorBackend,
            5,
        );
        let state = vqe.minimize(&op).unwrap();
        assert_eq!(state.probabilities.len(), 8);
        assert_eq!(state.optimal_parameters.as_ref().map(|p| p.len()), Some(6));
        assert!((state.probabilities.iter().sum::<f64>() - 1.).abs() < 1e-9);
        // the reported eigenvalue is the expectation in the returned state
        assert!((op.expectation(&state.probabilities).unwrap() - state.eigenvalue).abs() < 1e-9);
        assert_eq!(vqe.name(), "VQE (SPSA, statevector)");
    }

    #[test]
    fn test_vqe_is_reproducible() {
        let g = triangle();
        let (op, _) = encode(&g, 2);
        let run = || {
            let mut vqe = Vqe::new(
                RyAnsatz::new(3, 1, Entanglement::Linear),
                Spsa::new(30, 1),
                ShotsBackend::new(64, 2),
                4,
            );
            vqe.minimize(&op).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_vqe_dimension_mismatch() {
        let g = triangle();
        let (op, _) = encode(&g, 2);
        let res = minimize_variational(
            &op,
            &RyAnsatz::new(4, 1, Entanglement::Linear),
            &mut Spsa::new(10, 0),
            &mut StatevectorBackend,
            0,
        );
        assert!(matches!(res, Err(CliqueError::DimensionMismatch { expected: 3, got: 4 })));
    }
}
