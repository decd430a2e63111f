//! Maximum clique decision problem: brute force, exact eigensolver and variational eigensolver

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type of the crate
pub mod error;

/// weighted graphs and the random graph generator
pub mod graph;

/// read DIMACS graphs
pub mod dimacs;

/// clique checker and brute force search
pub mod clique;

/// Ising encoding of the clique problem
pub mod ising;

/// real-amplitude state vector simulator
pub mod statevector;

/// parametrized Ry circuits
pub mod ansatz;

/// measurement backends
pub mod backend;

/// classical optimizers (SPSA, Adam)
pub mod optimizer;

/// minimum eigensolvers
pub mod eigensolver;

/// variational quantum eigensolver
pub mod vqe;

/// eigenstate to assignment
pub mod decode;

/// encode, solve, decode and check
pub mod solver;

/// experiment configuration
pub mod config;

/// helper and utility methods for executables
pub mod util;
