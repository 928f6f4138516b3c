use std::process;

use clap::{App, load_yaml};

use map_coloring::{
    coloring::MapColoring,
    color::CheckerResult,
    error::Result,
    util::{StoredSolution, guess_type, read_knowledge_source},
};

/// loads the knowledge base and the solution, returns the checker verdict
fn check(inst_filename:&str, instance_type:&str, sol_filename:&str) -> Result<CheckerResult> {
    let source = read_knowledge_source(inst_filename, instance_type)?;
    let mut service = MapColoring::new();
    service.load(source.as_ref())?;
    let solution = StoredSolution::from_file(sol_filename)?;
    service.check(&solution.map, &solution.coloring)
}

/** checks a stored coloring */
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("coloring_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_filename = main_args.value_of("instance").unwrap();
    let sol_filename = main_args.value_of("solution").unwrap();
    let instance_type = main_args.value_of("type").unwrap_or_else(|| guess_type(inst_filename));
    // call checker
    let res_checker = match check(inst_filename, instance_type, sol_filename) {
        Ok(res) => res,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    match res_checker {
        CheckerResult::Ok(n) => {
            println!("{}", n);
        },
        CheckerResult::AreaColoredTwice(a) => {
            println!("ERROR: area {} colored twice", a);
        },
        CheckerResult::AreaNotColored(a) => {
            println!("ERROR: area {} not colored", a);
        },
        CheckerResult::UnknownArea(a) => {
            println!("ERROR: area {} is not part of the map", a);
        },
        CheckerResult::UnknownColor(c) => {
            println!("ERROR: color {} is not part of the palette", c);
        },
        CheckerResult::ConflictingEdge(a, b) => {
            println!("ERROR: areas {} and {} are adjacent and share their color", a, b);
        },
    };
}
