//! Command line front-end of the map coloring library


// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

use std::process;

use clap::{App, ArgMatches, load_yaml};
use serde_json::json;

use map_coloring::coloring::MapColoring;
use map_coloring::color::CheckerResult;
use map_coloring::error::Result;
use map_coloring::json_kb::JsonSource;
use map_coloring::search::backtracking::SolveOutcome;
use map_coloring::search::stopping::OptionalTimeStoppingCriterion;
use map_coloring::util::{Params, StoredSolution, export_results, read_knowledge_source, read_params};


/// prints one identifier per line
fn print_list(list:&[String]) {
    for e in list {
        println!("{}", e);
    }
}

/// colors a map, prints and exports the result
fn solve(service:&MapColoring, params:&Params, sub_args:&ArgMatches) -> Result<()> {
    let map = sub_args.value_of("map").unwrap();
    let fixed = match (sub_args.value_of("area"), sub_args.value_of("color")) {
        (Some(area), Some(color)) => Some((area, color)),
        _ => None,
    };
    let stopping_criterion = OptionalTimeStoppingCriterion::new(params.time_limit);
    let (outcome, stats) = service.solve(map, fixed, stopping_criterion, params.node_limit)?;
    let outcome_name = match &outcome {
        SolveOutcome::Colored(_) => "colored",
        SolveOutcome::NoSolution => "no_solution",
        SolveOutcome::Timeout => "timeout",
    };
    println!(
        "{}: {} ({} nodes, {:.3} seconds)",
        map, outcome_name, stats.nb_expanded, stats.time_searched
    );
    let solution = outcome.colored().map(|coloring| StoredSolution { map: map.to_string(), coloring });
    if let Some(solution) = &solution {
        if sub_args.is_present("check") {
            match service.check(map, &solution.coloring)? {
                CheckerResult::Ok(n) => println!("checked: {} colors", n),
                res => println!("invalid solution (reason: {:?})", res),
            }
        }
        for pair in &solution.coloring {
            println!("{}\t{}", pair.area, pair.color);
        }
    }
    let stats = json!({
        "inst_name": params.inst_filename,
        "map": map,
        "outcome": outcome_name,
        "nb_expanded": stats.nb_expanded,
        "nb_dead_ends": stats.nb_dead_ends,
        "time_searched": stats.time_searched,
    });
    export_results(
        solution.as_ref(), &stats,
        params.perf_file.as_deref(), params.sol_file.as_deref()
    )
}

/// runs the requested subcommand
fn run(main_args:&ArgMatches) -> Result<()> {
    let params = read_params(main_args);
    let source = read_knowledge_source(&params.inst_filename, &params.instance_type)?;
    let mut service = MapColoring::new();
    service.load(source.as_ref())?;
    match main_args.subcommand() {
        ("maps", _) => print_list(&service.get_maps()?),
        ("colors", _) => print_list(&service.get_colors()?),
        ("areas", Some(sub_args)) => {
            print_list(&service.get_areas(sub_args.value_of("map").unwrap())?)
        },
        ("adjacent", Some(sub_args)) => {
            print_list(&service.get_adjacent(
                sub_args.value_of("map").unwrap(),
                sub_args.value_of("area").unwrap(),
            )?)
        },
        ("solve", Some(sub_args)) => solve(&service, &params, sub_args)?,
        ("export", Some(sub_args)) => {
            let output = sub_args.value_of("output").unwrap();
            JsonSource::from_knowledge_base(service.knowledge_base()?).write_file(output)?;
            println!("knowledge base written in {}", output);
        },
        _ => {},
    }
    Ok(())
}

/**
reads a knowledge base, then lists its content or colors one of its maps.

# Panics
 - if the time or the node limit cannot be parsed
*/
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
