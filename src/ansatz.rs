use serde::{Deserialize, Serialize};

use crate::error::{CliqueError, Result};
use crate::statevector::StateVector;

/** pairs of qubits entangled between two rotation layers */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entanglement {
    /// (q, q+1) for every q
    Linear,
    /// every pair of qubits
    Full,
}

impl std::str::FromStr for Entanglement {
    type Err = CliqueError;

    fn from_str(s:&str) -> Result<Self> {
        match s {
            "linear" => Ok(Entanglement::Linear),
            "full" => Ok(Entanglement::Full),
            _ => Err(CliqueError::InvalidConfiguration(
                format!("unknown entanglement {} (valid: 'linear', 'full')", s)
            )),
        }
    }
}

/**
Hardware-efficient Ry ansatz: a layer of Ry rotations, then `depth` repetitions of
(CZ entangling layer, Ry layer). Uses num_qubits * (depth+1) parameters.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct RyAnsatz {
    /// number of qubits
    num_qubits: usize,
    /// number of (entangling, rotation) repetitions
    depth: usize,
    /// entangling pattern
    entanglement: Entanglement,
}

impl RyAnsatz {
    /// builds an ansatz
    pub fn new(num_qubits:usize, depth:usize, entanglement:Entanglement) -> Self {
        Self { num_qubits, depth, entanglement }
    }

    /// number of qubits
    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// number of repetitions
    pub fn depth(&self) -> usize { self.depth }

    /// number of variational parameters
    pub fn num_parameters(&self) -> usize { self.num_qubits * (self.depth + 1) }

    /// pairs of qubits entangled by a CZ layer
    pub fn entangling_pairs(&self) -> Vec<(usize,usize)> {
        let n = self.num_qubits;
        match self.entanglement {
            Entanglement::Linear => (1..n).map(|q| (q-1, q)).collect(),
            Entanglement::Full => (0..n).flat_map(|a| ((a+1)..n).map(move |b| (a, b))).collect(),
        }
    }

    /** prepares the ansatz state from |0...0>

    # Errors
    - if the number of parameters is wrong or the register is too large
    */
    pub fn prepare(&self, parameters:&[f64]) -> Result<StateVector> {
        if parameters.len() != self.num_parameters() {
            return Err(CliqueError::DimensionMismatch {
                expected: self.num_parameters(), got: parameters.len()
            });
        }
        let mut state = StateVector::zero_state(self.num_qubits)?;
        let pairs = self.entangling_pairs();
        let mut layers = parameters.chunks(self.num_qubits.max(1));
        if let Some(first) = layers.next() {
            for (q,theta) in first.iter().enumerate() { state.ry(q, *theta); }
        }
        for layer in layers {
            for (a,b) in &pairs { state.cz(*a, *b); }
            for (q,theta) in layer.iter().enumerate() { state.ry(q, *theta); }
        }
        Ok(state)
    }
}
