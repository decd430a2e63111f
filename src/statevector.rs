use rand::Rng;

use crate::error::{CliqueError, Result};

/// largest number of qubits the simulator accepts
pub const MAX_QUBITS: usize = 24;

/** state of an n-qubit register with real amplitudes.
amplitudes[x]: amplitude of the computational basis state x (bit q of x is qubit q).
Ry and CZ gates keep amplitudes real, which is all the Ry ansatz needs.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// number of qubits
    num_qubits: usize,
    /// amplitudes (2^n entries)
    amplitudes: Vec<f64>,
}

impl StateVector {

    /** |0...0> state

    # Errors
    - if num_qubits > MAX_QUBITS
    */
    pub fn zero_state(num_qubits:usize) -> Result<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /** computational basis state |x>

    # Errors
    - if num_qubits > MAX_QUBITS or x ≥ 2^num_qubits
    */
    pub fn basis_state(num_qubits:usize, x:usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(CliqueError::TooManyQubits { n: num_qubits, max: MAX_QUBITS });
        }
        let dim = 1usize << num_qubits;
        if x >= dim {
            return Err(CliqueError::DimensionMismatch { expected: dim, got: x+1 });
        }
        let mut amplitudes = vec![0. ; dim];
        amplitudes[x] = 1.;
        Ok(Self { num_qubits, amplitudes })
    }

    /// number of qubits
    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// amplitudes
    pub fn amplitudes(&self) -> &[f64] { &self.amplitudes }

    /// applies a Ry(θ) rotation on qubit q
    pub fn ry(&mut self, q:usize, theta:f64) {
        debug_assert!(q < self.num_qubits);
        let (s, c) = (theta / 2.).sin_cos();
        let mask = 1usize << q;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a0, a1) = (self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = c * a0 - s * a1;
                self.amplitudes[j] = s * a0 + c * a1;
            }
        }
    }

    /// applies a controlled-Z between qubits a and b
    pub fn cz(&mut self, a:usize, b:usize) {
        debug_assert!(a < self.num_qubits && b < self.num_qubits && a != b);
        let mask = (1usize << a) | (1usize << b);
        for (i,amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask { *amp = -*amp; }
        }
    }

    /// measurement probabilities in the computational basis
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a * a).collect()
    }

    /** simulates `shots` measurements in the computational basis.
    Returns counts[x]: number of times x was observed.
    */
    pub fn sample<R:Rng>(&self, shots:usize, rng:&mut R) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut acc = 0.;
        for p in self.probabilities() {
            acc += p;
            cumulative.push(acc);
        }
        let mut counts = vec![0 ; self.amplitudes.len()];
        let last = counts.len() - 1;
        for _ in 0..shots {
            let r:f64 = rng.gen::<f64>() * acc;
            let x = cumulative.partition_point(|c| *c <= r).min(last);
            counts[x] += 1;
        }
        counts
    }
}
