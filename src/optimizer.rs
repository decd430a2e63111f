//! Classical optimizers driving the variational eigensolver.

use std::f64::consts::PI;

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

/** outcome of a minimization */
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// best parameters found
    pub parameters: Vec<f64>,
    /// objective value at `parameters`
    pub value: f64,
    /// number of objective evaluations
    pub nb_evaluations: usize,
    /// number of iterations performed
    pub nb_iterations: usize,
}

/** minimizes a real function of several parameters */
pub trait Optimizer {
    /// name of the optimizer (for reports)
    fn name(&self) -> &str;

    /// minimizes the objective starting from the initial parameters
    fn minimize(&mut self, objective:&mut dyn FnMut(&[f64]) -> f64, initial:&[f64]) -> OptimizationResult;
}

impl<O:Optimizer + ?Sized> Optimizer for Box<O> {
    fn name(&self) -> &str { (**self).name() }

    fn minimize(&mut self, objective:&mut dyn FnMut(&[f64]) -> f64, initial:&[f64]) -> OptimizationResult {
        (**self).minimize(objective, initial)
    }
}

/// wraps an objective and keeps the best point it was evaluated on
struct Tracked<'a> {
    objective: &'a mut dyn FnMut(&[f64]) -> f64,
    best_value: f64,
    best_parameters: Vec<f64>,
    nb_evaluations: usize,
}

impl<'a> Tracked<'a> {
    fn new(objective:&'a mut dyn FnMut(&[f64]) -> f64, initial:&[f64]) -> Self {
        Self { objective, best_value: f64::INFINITY, best_parameters: initial.to_vec(), nb_evaluations: 0 }
    }

    fn eval(&mut self, x:&[f64]) -> f64 {
        let v = (self.objective)(x);
        self.nb_evaluations += 1;
        if v < self.best_value {
            self.best_value = v;
            self.best_parameters = x.to_vec();
        }
        v
    }

    fn finish(self, nb_iterations:usize) -> OptimizationResult {
        OptimizationResult {
            parameters: self.best_parameters,
            value: self.best_value,
            nb_evaluations: self.nb_evaluations,
            nb_iterations,
        }
    }
}


/**
Simultaneous Perturbation Stochastic Approximation.
At iteration k, every parameter is perturbed by ±c_k (random signs); the gradient is estimated
from the two evaluations and a step of size a_k is taken, with
a_k = a / (k+1+stability)^alpha and c_k = c / (k+1)^gamma.
If `learning_rate` is None, `a` is calibrated so that the first steps have magnitude `target_update`.
*/
#[derive(Debug, Clone)]
pub struct Spsa {
    /// number of iterations
    pub max_iter: usize,
    /// a (calibrated if None)
    pub learning_rate: Option<f64>,
    /// c
    pub perturbation: f64,
    /// alpha
    pub alpha: f64,
    /// gamma
    pub gamma: f64,
    /// stability constant of the learning rate sequence
    pub stability: f64,
    /// expected magnitude of the first updates, used by the calibration
    pub target_update: f64,
    /// number of gradient estimations used by the calibration
    pub calibration_steps: usize,
    /// random number generator
    rng: StdRng,
}

impl Spsa {
    /// SPSA with the usual gain exponents and a seeded random number generator
    pub fn new(max_iter:usize, seed:u64) -> Self {
        Self {
            max_iter,
            learning_rate: None,
            perturbation: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            stability: 0.,
            target_update: 2. * PI / 10.,
            calibration_steps: 25,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// random ±1 vector
    fn perturbation_direction(&mut self, n:usize) -> Vec<f64> {
        (0..n).map(|_| if self.rng.gen_bool(0.5) { 1. } else { -1. }).collect()
    }

    /// two-point gradient magnitude estimate (f(x+cΔ) - f(x-cΔ)) / 2c
    fn estimate(&mut self, f:&mut Tracked, x:&[f64], c:f64) -> (Vec<f64>, f64) {
        let delta = self.perturbation_direction(x.len());
        let plus:Vec<f64> = x.iter().zip(&delta).map(|(xi,d)| xi + c * d).collect();
        let minus:Vec<f64> = x.iter().zip(&delta).map(|(xi,d)| xi - c * d).collect();
        let diff = (f.eval(&plus) - f.eval(&minus)) / (2. * c);
        (delta, diff)
    }

    /// chooses `a` from the average gradient magnitude around the initial point
    fn calibrate(&mut self, f:&mut Tracked, x:&[f64]) -> f64 {
        let steps = self.calibration_steps.max(1);
        let mut avg = 0.;
        for _ in 0..steps {
            let (_, diff) = self.estimate(f, x, self.perturbation);
            avg += diff.abs() / steps as f64;
        }
        let scale = (1. + self.stability).powf(self.alpha);
        let a = if avg > 1e-12 { self.target_update * scale / avg } else { self.target_update * scale };
        debug!("SPSA calibration: average gradient {:.4e}, learning rate {:.4e}", avg, a);
        a
    }
}

impl Optimizer for Spsa {
    fn name(&self) -> &str { "SPSA" }

    fn minimize(&mut self, objective:&mut dyn FnMut(&[f64]) -> f64, initial:&[f64]) -> OptimizationResult {
        let mut f = Tracked::new(objective, initial);
        let mut x = initial.to_vec();
        if x.is_empty() {
            f.eval(&x);
            return f.finish(0);
        }
        let a = match self.learning_rate {
            Some(a) => a,
            None => self.calibrate(&mut f, &x),
        };
        for k in 0..self.max_iter {
            let ak = a / (k as f64 + 1. + self.stability).powf(self.alpha);
            let ck = self.perturbation / (k as f64 + 1.).powf(self.gamma);
            let (delta, diff) = self.estimate(&mut f, &x, ck);
            for (xi,d) in x.iter_mut().zip(&delta) {
                *xi -= ak * diff * d; // 1/Δ_i = Δ_i for ±1 perturbations
            }
            if k % 50 == 0 {
                debug!("SPSA iter {}: best {:.6}", k, f.best_value);
            }
        }
        f.eval(&x);
        f.finish(self.max_iter)
    }
}


/**
Adam on exact gradients obtained with the parameter-shift rule:
∂f/∂θ_i = (f(θ + π/2 e_i) - f(θ - π/2 e_i)) / 2.
Exact for ansätze where every parameter is the angle of a single Pauli rotation.
*/
#[derive(Debug, Clone)]
pub struct Adam {
    /// number of iterations
    pub max_iter: usize,
    /// step size
    pub learning_rate: f64,
    /// first moment decay
    pub beta1: f64,
    /// second moment decay
    pub beta2: f64,
    /// numerical stabilizer
    pub epsilon: f64,
    /// stops when two consecutive values differ by less than this
    pub tolerance: f64,
}

impl Adam {
    /// Adam with the usual decay rates
    pub fn new(max_iter:usize, learning_rate:f64) -> Self {
        Self { max_iter, learning_rate, beta1: 0.9, beta2: 0.999, epsilon: 1e-8, tolerance: 1e-10 }
    }

    /// parameter-shift gradient
    fn gradient(f:&mut Tracked, x:&[f64]) -> Vec<f64> {
        let mut shifted = x.to_vec();
        let mut res = vec![0. ; x.len()];
        for i in 0..x.len() {
            shifted[i] = x[i] + PI / 2.;
            let plus = f.eval(&shifted);
            shifted[i] = x[i] - PI / 2.;
            let minus = f.eval(&shifted);
            shifted[i] = x[i];
            res[i] = (plus - minus) / 2.;
        }
        res
    }
}

impl Optimizer for Adam {
    fn name(&self) -> &str { "Adam" }

    fn minimize(&mut self, objective:&mut dyn FnMut(&[f64]) -> f64, initial:&[f64]) -> OptimizationResult {
        let mut f = Tracked::new(objective, initial);
        let mut x = initial.to_vec();
        let n = x.len();
        let mut m = vec![0. ; n];
        let mut v = vec![0. ; n];
        let mut previous = f.eval(&x);
        let mut nb_iterations = 0;
        for k in 0..self.max_iter {
            nb_iterations = k + 1;
            let g = Self::gradient(&mut f, &x);
            let t = (k + 1) as i32;
            for i in 0..n {
                m[i] = self.beta1 * m[i] + (1. - self.beta1) * g[i];
                v[i] = self.beta2 * v[i] + (1. - self.beta2) * g[i] * g[i];
                let m_hat = m[i] / (1. - self.beta1.powi(t));
                let v_hat = v[i] / (1. - self.beta2.powi(t));
                x[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
            }
            let value = f.eval(&x);
            if (previous - value).abs() < self.tolerance { break; }
            previous = value;
        }
        f.finish(nb_iterations)
    }
}
