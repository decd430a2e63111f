use clap::ArgMatches;
use log::warn;
use serde_json::{json, Value};

use crate::clique::{Assignment, clique_vertices};
use crate::config::ExperimentConfig;
use crate::error::{CliqueError, Result};

/// parses an optional command line value
fn parse_arg<T:std::str::FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(e) => e.parse::<T>().map(Some).map_err(|_|
            CliqueError::InvalidConfiguration(format!("unable to parse --{} (got {})", name, e))
        ),
    }
}

/** reads command line input and returns the experiment configuration and the stats filename.
Values are taken from the command line, then from the configuration file (if any), then from the defaults.
*/
pub fn read_params(main_args:&ArgMatches) -> Result<(ExperimentConfig, Option<String>)> {
    let mut config = match main_args.value_of("config") {
        None => ExperimentConfig::default(),
        Some(filename) => {
            println!("reading configuration: {}", filename);
            ExperimentConfig::from_file(filename)?
        }
    };
    if let Some(e) = main_args.value_of("instance") { config.instance = Some(e.to_string()); }
    if let Some(v) = parse_arg(main_args, "nodes")? { config.nb_vertices = v; }
    if let Some(v) = parse_arg(main_args, "probability")? { config.edge_probability = v; }
    if let Some(v) = parse_arg(main_args, "weight")? { config.weight_bound = v; }
    if let Some(v) = parse_arg(main_args, "seed")? { config.seed = v; }
    if let Some(v) = parse_arg(main_args, "clique")? { config.clique_size = v; }
    if let Some(v) = parse_arg(main_args, "depth")? { config.vqe.depth = v; }
    if let Some(v) = parse_arg(main_args, "entanglement")? { config.vqe.entanglement = v; }
    if let Some(v) = parse_arg(main_args, "optimizer")? { config.vqe.optimizer = v; }
    if let Some(v) = parse_arg(main_args, "iterations")? { config.vqe.max_iter = v; }
    if let Some(v) = parse_arg(main_args, "shots")? { config.vqe.shots = Some(v); }
    if let Some(v) = parse_arg(main_args, "vqe_seed")? { config.vqe.seed = v; }
    config.validate()?;
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    Ok((config, perf_file))
}

/** human readable report of a search result */
pub fn solution_to_string(solution:&Option<Assignment>, k:usize) -> String {
    match solution {
        None => format!("no solution found for K={}", k),
        Some(a) => {
            let cells:Vec<String> = a.iter().map(|x| x.to_string()).collect();
            format!("solution: [{}]\tvertices: {:?}", cells.join(","), clique_vertices(a))
        }
    }
}

/** reports a method that could not run: prints "no solution" with the reason and
returns its statistics entry */
pub fn report_failure(method:&str, k:usize, error:&CliqueError) -> Value {
    warn!("{} failed: {}", method, error);
    println!("{}: {} ({})", method, solution_to_string(&None, k), error);
    json!({
        "found": false,
        "solution": Value::Null,
        "error": error.to_string(),
    })
}

/// exports search statistics to a file
pub fn export_results(stats:&Value, perf_file:Option<String>) -> Result<()> {
    if let Some(filename) = perf_file {
        std::fs::write(filename.as_str(), serde_json::to_string_pretty(stats)?)?;
    }
    Ok(())
}
