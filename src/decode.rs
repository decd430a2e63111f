use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::clique::Assignment;
use crate::eigensolver::Eigenstate;

/** most likely basis state of the distribution (lowest index on ties) */
pub fn sample_most_likely(probabilities:&[f64]) -> usize {
    probabilities.iter().enumerate()
        .max_by_key(|(x,p)| (OrderedFloat(**p), Reverse(*x)))
        .map(|(x,_)| x)
        .unwrap_or(0)
}

/** converts a basis state into an assignment: vertex i is chosen iff qubit i is 1 */
pub fn basis_to_assignment(x:usize, num_qubits:usize) -> Assignment {
    (0..num_qubits).map(|q| ((x >> q) & 1) as u8).collect()
}

/** projects the solver output on its most likely assignment */
pub fn decode(eigenstate:&Eigenstate) -> Assignment {
    let dim = eigenstate.probabilities.len();
    let num_qubits = if dim <= 1 { 0 } else { dim.trailing_zeros() as usize };
    basis_to_assignment(sample_most_likely(&eigenstate.probabilities), num_qubits)
}
