use clap::{App, load_yaml};
use serde_json::json;

use qclique::eigensolver::{ExactEigensolver, MinimumEigensolver};
use qclique::error::Result;
use qclique::solver::solve_with;
use qclique::util::{read_params, export_results, report_failure, solution_to_string};
use qclique::vqe::Vqe;


/// solves the instance with the exact or the variational eigensolver
fn run(main_args:&clap::ArgMatches) -> Result<()> {
    let (config, perf_file) = read_params(main_args)?;
    let graph = config.build_graph()?;
    graph.display_statistics();
    let k = config.clique_size;
    let mut solver:Box<dyn MinimumEigensolver> = if main_args.is_present("exact") {
        Box::new(ExactEigensolver)
    } else {
        Box::new(Vqe::new(
            config.vqe.ansatz(graph.nb_vertices()),
            config.vqe.build_optimizer(),
            config.vqe.build_backend(),
            config.vqe.seed,
        ))
    };
    let report = match solve_with(solver.as_mut(), &graph, k) {
        Ok(report) => {
            println!(
                "{} took {:.3} seconds. {}", report.method, report.time_searched,
                solution_to_string(&report.solution, k)
            );
            println!("\tdecoded: {:?}\tenergy: {:.4}", report.decoded, report.energy);
            json!(report)
        }
        Err(e) => report_failure(&solver.name(), k, &e),
    };
    let stats = json!({
        "report": report,
        "inst_name": config.instance,
    });
    export_results(&stats, perf_file)
}

/** solves the CLIQUE decision problem with a minimum eigensolver on its Ising encoding. */
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("vqe_clique.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
