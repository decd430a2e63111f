use std::time::Instant;

use log::info;
use serde::Serialize;

use crate::clique::{Assignment, check_clique, CheckerResult};
use crate::decode::decode;
use crate::eigensolver::MinimumEigensolver;
use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::ising::encode;

/** outcome of encode → minimize → decode → verify */
#[derive(Debug, Clone, Serialize)]
pub struct SolverReport {
    /// name of the eigensolver
    pub method: String,
    /// required clique size
    pub k: usize,
    /// decoded assignment, set only if it is a valid k-clique
    pub solution: Option<Assignment>,
    /// assignment decoded from the most likely state (valid or not)
    pub decoded: Assignment,
    /// eigenvalue returned by the solver (offset not included)
    pub eigenvalue: f64,
    /// eigenvalue + offset (0 for a k-clique)
    pub energy: f64,
    /// number of operator evaluations
    pub nb_evaluations: usize,
    /// wall-clock time (seconds)
    pub time_searched: f32,
}

/**
encodes the instance, runs the eigensolver, decodes its most likely state and checks it.
A decoded assignment that is not a k-clique is reported as "no solution".
*/
pub fn solve_with(solver:&mut dyn MinimumEigensolver, graph:&WeightedGraph, k:usize) -> Result<SolverReport> {
    let t_start = Instant::now();
    let (operator, offset) = encode(graph, k);
    let eigenstate = solver.minimize(&operator)?;
    let decoded = decode(&eigenstate);
    let solution = match check_clique(&decoded, graph, k) {
        CheckerResult::Ok(_) => Some(decoded.clone()),
        reason => {
            info!("{}: decoded assignment {:?} rejected ({:?})", solver.name(), decoded, reason);
            None
        }
    };
    Ok(SolverReport {
        method: solver.name(),
        k,
        solution,
        decoded,
        eigenvalue: eigenstate.eigenvalue,
        energy: eigenstate.eigenvalue + offset,
        nb_evaluations: eigenstate.nb_evaluations,
        time_searched: t_start.elapsed().as_secs_f32(),
    })
}
