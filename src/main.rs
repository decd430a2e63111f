//! Decides if a random weighted graph contains a clique of size K, with brute force,
//! an exact eigensolver and a variational eigensolver.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use serde_json::{json, Value};

use qclique::clique::try_find_clique;
use qclique::eigensolver::{ExactEigensolver, MinimumEigensolver};
use qclique::error::Result;
use qclique::graph::WeightedGraph;
use qclique::solver::{solve_with, SolverReport};
use qclique::util::{read_params, export_results, report_failure, solution_to_string};
use qclique::vqe::Vqe;


/// prints the outcome of an eigensolver
fn print_report(report:&SolverReport) {
    println!(
        "{}: {} (energy: {:.4}, {} evaluations, {:.3} seconds)",
        report.method, solution_to_string(&report.solution, report.k),
        report.energy, report.nb_evaluations, report.time_searched
    );
}

/// runs an eigensolver on the instance, prints its outcome and returns its statistics
fn run_eigensolver(solver:&mut dyn MinimumEigensolver, graph:&WeightedGraph, k:usize) -> Value {
    match solve_with(solver, graph, k) {
        Ok(report) => {
            print_report(&report);
            json!(report)
        }
        Err(e) => report_failure(&solver.name(), k, &e),
    }
}

/// builds the instance and runs the three methods
fn run(main_args:&ArgMatches) -> Result<()> {
    let (config, perf_file) = read_params(main_args)?;
    let graph = config.build_graph()?;
    let k = config.clique_size;
    println!("=========================================================");
    graph.display_statistics();
    print!("{}", graph.matrix_to_string());
    println!("clique size: {}", k);
    println!("=========================================================");
    // brute force
    let t_start = Instant::now();
    let brute_force = match try_find_clique(&graph, k) {
        Ok(solution) => {
            let brute_force_time = t_start.elapsed().as_secs_f32();
            println!("brute force: {} ({:.3} seconds)", solution_to_string(&solution, k), brute_force_time);
            json!({
                "found": solution.is_some(),
                "solution": solution,
                "time_searched": brute_force_time,
            })
        }
        Err(e) => report_failure("brute force", k, &e),
    };
    // exact eigensolver
    let exact = run_eigensolver(&mut ExactEigensolver, &graph, k);
    // variational eigensolver
    let mut vqe = Vqe::new(
        config.vqe.ansatz(graph.nb_vertices()),
        config.vqe.build_optimizer(),
        config.vqe.build_backend(),
        config.vqe.seed,
    );
    let variational = run_eigensolver(&mut vqe, &graph, k);
    let stats = json!({
        "config": config,
        "brute_force": brute_force,
        "exact": exact,
        "vqe": variational,
    });
    export_results(&stats, perf_file)
}

/**
reads the configuration, builds the graph and solves the clique decision problem.
Exits with status 1 on configuration or input errors. A method that cannot run
is reported as "no solution".
*/
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
