use std::fs;
use std::path::Path;

use clap::ArgMatches;
use log::info;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::{
    color::AreaColor,
    error::{MapColoringError, Result},
    facts::FactsSource,
    json_kb::JsonSource,
    source::KnowledgeSource,
};

/** command line parameters shared by the executables */
#[derive(Debug, Clone)]
pub struct Params {
    /// knowledge base file
    pub inst_filename: String,
    /// knowledge base format ("facts" or "json")
    pub instance_type: String,
    /// time limit of a solve (seconds)
    pub time_limit: Option<f32>,
    /// node limit of a solve
    pub node_limit: Option<usize>,
    /// where to write the solution
    pub sol_file: Option<String>,
    /// where to write the search statistics
    pub perf_file: Option<String>,
}

/** reads command line input and returns the knowledge base name, format, limits, solution and stats filenames */
pub fn read_params(main_args:&ArgMatches) -> Params {
    let inst_filename = main_args.value_of("instance").unwrap().to_string();
    let instance_type = match main_args.value_of("type") {
        Some(t) => t.to_string(),
        None => guess_type(&inst_filename).to_string(),
    };
    let time_limit:Option<f32> = main_args.value_of("time").map(|t| t.parse::<f32>()
        .expect("unable to parse the time given"));
    let node_limit:Option<usize> = main_args.value_of("nodes").map(|n| n.parse::<usize>()
        .expect("unable to parse the node limit given"));
    // read value of the solution filename
    let sol_file: Option<String> = main_args.value_of("solution").map(|e| {
        info!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file: Option<String> = main_args.value_of("perf").map(|e| {
        info!("printing perfs in: {}", e);
        e.to_string()
    });
    Params { inst_filename, instance_type, time_limit, node_limit, sol_file, perf_file }
}

/// knowledge base format deduced from the file extension
pub fn guess_type(filename:&str) -> &'static str {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some("json") => "json",
        _ => "facts",
    }
}

/** opens the knowledge source of the given format */
pub fn read_knowledge_source(filename:&str, instance_type:&str) -> Result<Box<dyn KnowledgeSource>> {
    let res:Box<dyn KnowledgeSource> = match instance_type {
        "json" => Box::new(JsonSource::from_file(filename)?),
        _ => Box::new(FactsSource::from_file(filename)?),
    };
    Ok(res)
}


/** coloring of a map as stored on disk */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSolution {
    /// map identifier
    pub map: String,
    /// (area, color) pairs in declaration order
    pub coloring: Vec<AreaColor>,
}

impl StoredSolution {
    /** reads a solution file */
    pub fn from_file(filename:&str) -> Result<Self> {
        let str = fs::read_to_string(filename)
            .map_err(|source| MapColoringError::Io { path: filename.to_string(), source })?;
        Ok(serde_json::from_str(&str)?)
    }
}

/// writes a string into a file
fn write_file(filename:&str, content:&str) -> Result<()> {
    fs::write(filename, content)
        .map_err(|source| MapColoringError::Io { path: filename.to_string(), source })
}

/// exports search results to files
pub fn export_results(
    solution:Option<&StoredSolution>,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        write_file(filename, &serde_json::to_string(stats)?)?;
    }
    // export solution
    if let (Some(filename), Some(solution)) = (sol_file, solution) {
        write_file(filename, &serde_json::to_string_pretty(solution)?)?;
    }
    Ok(())
}
