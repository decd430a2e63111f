use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;

use qclique::clique::try_find_clique;
use qclique::error::Result;
use qclique::util::{read_params, export_results, report_failure, solution_to_string};


/// enumerates all assignments of the instance
fn run(main_args:&clap::ArgMatches) -> Result<()> {
    let (config, perf_file) = read_params(main_args)?;
    let graph = config.build_graph()?;
    graph.display_statistics();
    let k = config.clique_size;
    let t_start = Instant::now();
    let mut stats = match try_find_clique(&graph, k) {
        Ok(solution) => {
            let duration = t_start.elapsed().as_secs_f32();
            println!("brute force took {:.3} seconds. {}", duration, solution_to_string(&solution, k));
            json!({
                "found": solution.is_some(),
                "solution": solution,
                "time_searched": duration,
            })
        }
        Err(e) => report_failure("brute force", k, &e),
    };
    stats["clique_size"] = json!(k);
    stats["inst_name"] = json!(config.instance);
    export_results(&stats, perf_file)
}

/** solves the CLIQUE decision problem by enumerating the 2^n assignments. */
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("brute_force_clique.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
