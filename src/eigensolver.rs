use log::debug;
use ordered_float::OrderedFloat;

use crate::error::{CliqueError, Result};
use crate::ising::IsingOperator;
use crate::statevector::MAX_QUBITS;

/** state returned by a minimum eigensolver */
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenstate {
    /// (estimated) minimum eigenvalue of the operator, offset not included
    pub eigenvalue: f64,
    /// measurement distribution of the state over the computational basis
    pub probabilities: Vec<f64>,
    /// parameters of the variational state, if any
    pub optimal_parameters: Option<Vec<f64>>,
    /// number of operator evaluations performed
    pub nb_evaluations: usize,
}

/** computes (an approximation of) the lowest eigenvalue of an operator and its eigenstate */
pub trait MinimumEigensolver {
    /// name of the solver (for reports)
    fn name(&self) -> String;

    /// returns the eigenstate associated with the minimum eigenvalue
    fn minimize(&mut self, operator:&IsingOperator) -> Result<Eigenstate>;
}

/**
exact solver. The operator is diagonal in the computational basis: its eigenvalues are the
basis energies and the minimum eigenstate is a basis state (lowest index on ties).
*/
#[derive(Debug, Clone, Default)]
pub struct ExactEigensolver;

impl MinimumEigensolver for ExactEigensolver {
    fn name(&self) -> String { "exact eigensolver".to_string() }

    fn minimize(&mut self, operator:&IsingOperator) -> Result<Eigenstate> {
        let n = operator.num_qubits();
        if n > MAX_QUBITS {
            return Err(CliqueError::TooManyQubits { n, max: MAX_QUBITS });
        }
        let diagonal = operator.diagonal();
        // min_by_key keeps the first minimum
        let (best, eigenvalue) = diagonal.iter().enumerate()
            .min_by_key(|(_,e)| OrderedFloat(**e))
            .map(|(x,e)| (x, *e))
            .unwrap_or((0, 0.));
        debug!("exact eigensolver: minimum {} at basis state {:0width$b}", eigenvalue, best, width=n);
        let mut probabilities = vec![0. ; diagonal.len()];
        probabilities[best] = 1.;
        Ok(Eigenstate { eigenvalue, probabilities, optimal_parameters: None, nb_evaluations: diagonal.len() })
    }
}

/** exact minimum eigenstate of the operator */
pub fn minimize(operator:&IsingOperator) -> Result<Eigenstate> {
    ExactEigensolver.minimize(operator)
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::WeightedGraph;
    use crate::ising::{PauliTerm, encode};

    #[test]
    fn test_exact_on_handmade_operator() {
        // -Z0 + 2 Z1: energies 1, 3, -3, -1; minimum -3 at qubit0=0, qubit1=1 (x = 0b10)
        let mut op = IsingOperator::new(2);
        op.add_term(PauliTerm::z(0, -1.)).unwrap();
        op.add_term(PauliTerm::z(1, 2.)).unwrap();
        let state = minimize(&op).unwrap();
        assert_eq!(state.eigenvalue, -3.);
        assert_eq!(state.probabilities, vec![0., 0., 1., 0.]);
        assert_eq!(state.nb_evaluations, 4);
    }

    #[test]
    fn test_exact_matches_diagonal_minimum() {
        let g = WeightedGraph::random(6, 0.5, 3., 9).unwrap();
        for k in 1..=4 {
            let (op, _) = encode(&g, k);
            let state = minimize(&op).unwrap();
            let min = op.diagonal().into_iter().fold(f64::INFINITY, f64::min);
            assert_eq!(state.eigenvalue, min);
        }
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let op = IsingOperator::new(2); // zero operator
        let state = minimize(&op).unwrap();
        assert_eq!(state.probabilities[0], 1.);
    }
}
