//! Ising (Pauli-Z) encoding of the clique decision problem.
//!
//! With `x_i = (1 - Z_i) / 2` (qubit `i` in state `|1>` iff vertex `i` is chosen), the
//! encoded energy is
//!
//! `H(x) = A (K - Σ x_i)² + K(K-1)/2 - Σ_{(i,j) ∈ E} x_i x_j`
//!
//! which is 0 on K-cliques and positive on any other assignment. The constant part is
//! returned separately as the offset.

use crate::error::{CliqueError, Result};
use crate::graph::WeightedGraph;

/// weight of the clique size constraint
pub const PENALTY: f64 = 1000.;

/** product of Pauli-Z operators on the given qubits, times a coefficient */
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    /// coefficient
    pub coeff: f64,
    /// qubits on which a Z operator acts
    pub qubits: Vec<usize>,
}

impl PauliTerm {
    /// coeff * Z_q
    pub fn z(q:usize, coeff:f64) -> Self { Self { coeff, qubits: vec![q] } }

    /// coeff * Z_a Z_b
    pub fn zz(a:usize, b:usize, coeff:f64) -> Self { Self { coeff, qubits: vec![a, b] } }

    /** value of the term on a computational basis state (bit q of `basis` is qubit q) */
    pub fn evaluate(&self, basis:usize) -> f64 {
        let parity = self.qubits.iter().filter(|q| (basis >> **q) & 1 == 1).count();
        if parity % 2 == 0 { self.coeff } else { -self.coeff }
    }
}

/** operator that is diagonal in the computational basis: a sum of Pauli-Z strings */
#[derive(Debug, Clone, PartialEq)]
pub struct IsingOperator {
    /// number of qubits
    num_qubits: usize,
    /// terms of the operator
    terms: Vec<PauliTerm>,
}

impl IsingOperator {
    /// empty operator on n qubits
    pub fn new(num_qubits:usize) -> Self { Self { num_qubits, terms: Vec::new() } }

    /** adds a term. Zero terms are dropped.

    # Errors
    - if the term acts on a qubit ≥ num_qubits
    */
    pub fn add_term(&mut self, term:PauliTerm) -> Result<()> {
        if let Some(q) = term.qubits.iter().find(|q| **q >= self.num_qubits) {
            return Err(CliqueError::DimensionMismatch { expected: self.num_qubits, got: q+1 });
        }
        self.push_term(term);
        Ok(())
    }

    /// adds a term already known to be in range
    fn push_term(&mut self, term:PauliTerm) {
        if term.coeff != 0. {
            self.terms.push(term);
        }
    }

    /// number of qubits
    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// terms of the operator
    pub fn terms(&self) -> &[PauliTerm] { &self.terms }

    /// energy of a computational basis state (eigenvalue associated with it)
    pub fn evaluate(&self, basis:usize) -> f64 {
        self.terms.iter().map(|t| t.evaluate(basis)).sum()
    }

    /// diagonal of the operator (2^n entries)
    pub fn diagonal(&self) -> Vec<f64> {
        (0..1usize << self.num_qubits).map(|x| self.evaluate(x)).collect()
    }

    /** expectation value given the measurement distribution over the computational basis

    # Errors
    - if the distribution does not have 2^n entries
    */
    pub fn expectation(&self, probabilities:&[f64]) -> Result<f64> {
        let dim = 1usize << self.num_qubits;
        if probabilities.len() != dim {
            return Err(CliqueError::DimensionMismatch { expected: dim, got: probabilities.len() });
        }
        Ok(probabilities.iter().enumerate()
            .filter(|(_,p)| **p != 0.)
            .map(|(x,p)| p * self.evaluate(x))
            .sum())
    }
}

/**
encodes "does the graph contain a clique of size k" as an Ising operator and an offset.
For every basis state x: `operator.evaluate(x) + offset` is 0 iff x is a k-clique, > 0 otherwise.
*/
pub fn encode(graph:&WeightedGraph, k:usize) -> (IsingOperator, f64) {
    let n = graph.nb_vertices();
    let k = k as f64;
    let y = k - 0.5 * n as f64; // K - Σ 1/2
    let mut operator = IsingOperator::new(n);
    // size constraint: A (Y + Σ Z_i / 2)²
    let mut offset = PENALTY * (y * y + 0.25 * n as f64);
    let mut linear = vec![PENALTY * y ; n];
    let mut quadratic = vec![vec![0.5 * PENALTY ; n] ; n];
    // edges: K(K-1)/2 - Σ (1 - Z_i - Z_j + Z_i Z_j) / 4
    offset += 0.5 * k * (k - 1.);
    for &(i,j) in graph.edges() {
        offset -= 0.25;
        linear[i] += 0.25;
        linear[j] += 0.25;
        quadratic[i][j] -= 0.25;
    }
    for (i,coeff) in linear.into_iter().enumerate() {
        operator.push_term(PauliTerm::z(i, coeff));
    }
    for i in 0..n {
        for j in (i+1)..n {
            operator.push_term(PauliTerm::zz(i, j, quadratic[i][j]));
        }
    }
    (operator, offset)
}
