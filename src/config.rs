use std::fs;

use serde::{Deserialize, Serialize};

use crate::ansatz::{Entanglement, RyAnsatz};
use crate::backend::{Backend, ShotsBackend, StatevectorBackend};
use crate::clique::MAX_BRUTE_FORCE_VERTICES;
use crate::dimacs::read_graph;
use crate::error::{CliqueError, Result};
use crate::graph::WeightedGraph;
use crate::optimizer::{Adam, Optimizer, Spsa};

/** classical optimizer used by the variational solver */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// stochastic two-point gradient estimates
    Spsa,
    /// Adam with parameter-shift gradients
    Adam,
}

impl std::str::FromStr for OptimizerKind {
    type Err = CliqueError;

    fn from_str(s:&str) -> Result<Self> {
        match s {
            "spsa" => Ok(OptimizerKind::Spsa),
            "adam" => Ok(OptimizerKind::Adam),
            _ => Err(CliqueError::InvalidConfiguration(
                format!("unknown optimizer {} (valid: 'spsa', 'adam')", s)
            )),
        }
    }
}

/** settings of the variational solver */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VqeConfig {
    /// number of (entangling, rotation) repetitions of the Ry ansatz
    pub depth: usize,
    /// entangling pattern
    pub entanglement: Entanglement,
    /// optimizer
    pub optimizer: OptimizerKind,
    /// number of optimizer iterations
    pub max_iter: usize,
    /// learning rate (Adam only)
    pub learning_rate: f64,
    /// measurements per evaluation (None: exact probabilities)
    pub shots: Option<usize>,
    /// seed of the initial point, the optimizer and the sampler
    pub seed: u64,
}

impl Default for VqeConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            entanglement: Entanglement::Linear,
            optimizer: OptimizerKind::Spsa,
            max_iter: 300,
            learning_rate: 0.1,
            shots: None,
            seed: 10598,
        }
    }
}

impl VqeConfig {
    /// ansatz on n qubits
    pub fn ansatz(&self, num_qubits:usize) -> RyAnsatz {
        RyAnsatz::new(num_qubits, self.depth, self.entanglement)
    }

    /// optimizer described by the configuration
    pub fn build_optimizer(&self) -> Box<dyn Optimizer> {
        match self.optimizer {
            OptimizerKind::Spsa => Box::new(Spsa::new(self.max_iter, self.seed)),
            OptimizerKind::Adam => Box::new(Adam::new(self.max_iter, self.learning_rate)),
        }
    }

    /// sampling backend if `shots` is set, exact probabilities otherwise
    pub fn build_backend(&self) -> Box<dyn Backend> {
        match self.shots {
            Some(shots) => Box::new(ShotsBackend::new(shots, self.seed)),
            None => Box::new(StatevectorBackend),
        }
    }
}

/** parameters of an experiment */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// DIMACS instance to read instead of generating a random graph
    pub instance: Option<String>,
    /// number of vertices of the random graph
    pub nb_vertices: usize,
    /// probability of each edge
    pub edge_probability: f64,
    /// edge weights are drawn from [-weight_bound, weight_bound]
    pub weight_bound: f64,
    /// seed of the graph generator
    pub seed: u64,
    /// required clique size
    pub clique_size: usize,
    /// variational solver settings
    pub vqe: VqeConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            instance: None,
            nb_vertices: 5,
            edge_probability: 0.8,
            weight_bound: 10.,
            seed: 100,
            clique_size: 3,
            vqe: VqeConfig::default(),
        }
    }
}

impl ExperimentConfig {

    /** reads a JSON configuration file. Missing fields take their default value.

    # Errors
    - if the file cannot be read or parsed, or if the configuration is invalid
    */
    pub fn from_file(filename:&str) -> Result<Self> {
        let content = fs::read_to_string(filename)?;
        Self::from_json(&content)
    }

    /** parses a JSON configuration. Missing fields take their default value. */
    pub fn from_json(content:&str) -> Result<Self> {
        let res:Self = serde_json::from_str(content)?;
        res.validate()?;
        Ok(res)
    }

    /** checks the ranges of the parameters

    # Errors
    - if a value is out of range
    */
    pub fn validate(&self) -> Result<()> {
        if self.instance.is_none() {
            if self.nb_vertices < 1 {
                return Err(CliqueError::InvalidConfiguration("nb_vertices must be ≥ 1".to_string()));
            }
            if self.nb_vertices > MAX_BRUTE_FORCE_VERTICES {
                return Err(CliqueError::TooManyVertices { n: self.nb_vertices, max: MAX_BRUTE_FORCE_VERTICES });
            }
            if !(0. ..=1.).contains(&self.edge_probability) {
                return Err(CliqueError::InvalidConfiguration(
                    format!("edge_probability must be in [0,1] (got {})", self.edge_probability)
                ));
            }
            if self.edge_probability > 0. && !(self.weight_bound.is_finite() && self.weight_bound > 0.) {
                return Err(CliqueError::InvalidConfiguration(
                    format!("weight_bound must be a positive number (got {})", self.weight_bound)
                ));
            }
        }
        if self.vqe.shots == Some(0) {
            return Err(CliqueError::InvalidConfiguration("vqe.shots must be ≥ 1".to_string()));
        }
        if !(self.vqe.learning_rate.is_finite() && self.vqe.learning_rate > 0.) {
            return Err(CliqueError::InvalidConfiguration(
                format!("vqe.learning_rate must be a positive number (got {})", self.vqe.learning_rate)
            ));
        }
        Ok(())
    }

    /** builds the graph: reads the DIMACS instance if any, generates a random graph otherwise */
    pub fn build_graph(&self) -> Result<WeightedGraph> {
        match &self.instance {
            Some(filename) => read_graph(filename),
            None => WeightedGraph::random(self.nb_vertices, self.edge_probability, self.weight_bound, self.seed),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ExperimentConfig::default();
        assert_eq!(c.nb_vertices, 5);
        assert_eq!(c.edge_probability, 0.8);
        assert_eq!(c.weight_bound, 10.);
        assert_eq!(c.seed, 100);
        assert_eq!(c.clique_size, 3);
        assert!(c.validate().is_ok());
        assert_eq!(c.build_graph().unwrap().nb_vertices(), 5);
    }

    #[test]
    fn test_partial_json() {
        let c = ExperimentConfig::from_json(
            r#"{"nb_vertices": 7, "clique_size": 4, "vqe": {"optimizer": "adam", "entanglement": "full"}}"#
        ).unwrap();
        assert_eq!(c.nb_vertices, 7);
        assert_eq!(c.clique_size, 4);
        assert_eq!(c.seed, 100);
        assert_eq!(c.vqe.optimizer, OptimizerKind::Adam);
        assert_eq!(c.vqe.entanglement, Entanglement::Full);
        assert_eq!(c.vqe.depth, 5);
        assert_eq!(c.vqe.build_optimizer().name(), "Adam");
        assert_eq!(c.vqe.ansatz(7).num_parameters(), 42);
        assert_eq!(c.vqe.build_backend().name(), "statevector");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(ExperimentConfig::from_json("{\"edge_probability\": 2.0}"), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(ExperimentConfig::from_json("{\"nb_vertices\": 0}"), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(ExperimentConfig::from_json("{\"vqe\": {\"shots\": 0}}"), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(ExperimentConfig::from_json("{\"nb_vertices\": \"five\"}"), Err(CliqueError::Json(_))));
        assert!(matches!(ExperimentConfig::from_json("{\"weight_bound\": -1.0}"), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(ExperimentConfig::from_json("{\"nb_vertices\": 200000}"), Err(CliqueError::TooManyVertices { .. })));
    }

    #[test]
    fn test_weight_bound_agrees_with_generator() {
        // without edges the weight bound is unused
        let c = ExperimentConfig::from_json(r#"{"edge_probability": 0.0, "weight_bound": 0.0}"#).unwrap();
        assert_eq!(c.build_graph().unwrap().nb_edges(), 0);
        let c = ExperimentConfig::from_json(r#"{"weight_bound": 1e308}"#).unwrap();
        assert_eq!(c.build_graph().unwrap().nb_vertices(), 5);
    }

    #[test]
    fn test_parse_optimizer() {
        assert_eq!("spsa".parse::<OptimizerKind>().unwrap(), OptimizerKind::Spsa);
        assert!("cobyla".parse::<OptimizerKind>().is_err());
    }
}
