#![deny(clippy::all)]

use clap::{value_t, App, Arg};

use lazy_static::lazy_static;
use thiserror::Error;

use std::collections::HashMap;
use std::fs::File;
use std::io;

mod literal;
pub mod puzzles;
mod strategy;

pub use literal::LiteralError;
pub use strategy::{solve, RunOptions, Strategy};

type Error = anyhow::Error;
type Actor = Box<dyn (Fn(Box<dyn std::io::Read>, &RunOptions) -> Result<(), Error>) + Send + Sync + 'static>;

macro_rules! puzzle {
    ($name:ident) => {
        (stringify!($name), Box::new(puzzles::$name::main) as Actor)
    };
}

lazy_static! {
    static ref SOLVERS: HashMap<&'static str, Actor> = {
        let mut s: HashMap<&'static str, Actor> = HashMap::new();
        let puzzles: Vec<(&'static str, Actor)> = vec![
            puzzle!(rabbit_leap),
            puzzle!(missionaries),
            puzzle!(eight_puzzle),
            puzzle!(plagiarism),
            puzzle!(marble_solitaire),
        ];

        for (name, func) in puzzles.into_iter() {
            s.insert(name, func);
        }

        s
    };
}

/// Names of every registered puzzle, sorted.
pub fn puzzle_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SOLVERS.keys().cloned().collect();
    names.sort_unstable();
    names
}

fn verbosity(occurrences: u64) -> tracing::Level {
    match occurrences {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

pub fn solver() -> Result<(), Error> {
    let matches = App::new("statespace")
        .version("1.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Solve toy search problems with uninformed, greedy and A* search")
        .arg(
            Arg::with_name("puzzle")
                .value_name("PUZZLE")
                .required(true)
                .takes_value(true)
                .possible_values(&puzzle_names()),
        )
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .required(false)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .value_name("STRATEGY")
                .help("One of bfs, dfs, ucs, greedy, astar. Defaults depend on the puzzle.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("limit")
                .short("l")
                .long("limit")
                .value_name("EXPANSIONS")
                .help("Give up after this many expansions")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("progress")
                .long("progress")
                .value_name("EXPANSIONS")
                .help("Log progress every this many expansions (with -vv)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("scramble")
                .long("scramble")
                .value_name("MOVES")
                .help("Start from the goal scrambled by this many random moves")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("batch")
                .long("batch")
                .value_name("RUNS")
                .help("Average resource usage over this many scrambles per depth, up to --scramble")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .default_value("0")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase logging verbosity"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_max_level(verbosity(matches.occurrences_of("verbose")))
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .compact()
        .init();

    let mut options = RunOptions::default();
    if let Some(strategy) = matches.value_of("strategy") {
        options.strategy = Some(strategy.parse()?);
    }
    if matches.is_present("limit") {
        options.search.limit = Some(value_t!(matches, "limit", usize)?);
    }
    if matches.is_present("progress") {
        options.search.verbose = Some(value_t!(matches, "progress", usize)?);
    }
    if matches.is_present("scramble") {
        options.scramble = Some(value_t!(matches, "scramble", usize)?);
    }
    if matches.is_present("batch") {
        options.batch = Some(value_t!(matches, "batch", usize)?);
    }
    options.seed = value_t!(matches, "seed", u64)?;

    let puzzle = matches.value_of("puzzle").unwrap_or_default();
    println!("Puzzle {}", puzzle);

    let reader = get_input_reader(puzzle, matches.value_of("input"))?;

    match SOLVERS.get(puzzle) {
        None => Err(LabError::PuzzleNotFound(puzzle.to_string()).into()),
        Some(actor) => actor(reader, &options),
    }
}

type IOResult<T> = std::io::Result<T>;
type BoxedRead = Box<dyn ::std::io::Read + 'static>;

pub fn get_input_reader(puzzle: &str, filename: Option<&str>) -> Result<BoxedRead, Error> {
    let reader: Box<dyn ::std::io::Read + 'static> = match filename {
        Some("-") => Box::new(::std::io::stdin()),
        Some(path) => {
            let f: File = File::open(path).map_err(LabError::InputNotFound)?;
            Box::new(f)
        }
        None => get_default_input(puzzle)
            .map_err(|e| LabError::DefaultInputNotFound(puzzle.to_string(), e))?,
    };
    Ok(reader)
}

pub fn get_default_input(puzzle: &str) -> IOResult<BoxedRead> {
    let mut p = ::std::path::PathBuf::from("puzzles");
    p.push(puzzle);
    p.push("input.txt");

    let f = File::open(p)?;

    Ok(Box::new(f))
}

#[derive(Debug, Error)]
pub enum LabError {
    #[error("No module found for puzzle {0}")]
    PuzzleNotFound(String),

    #[error("Unknown search strategy {0:?}, expected one of bfs, dfs, ucs, greedy, astar")]
    UnknownStrategy(String),

    #[error("Input not found: puzzles/{0}/input.txt")]
    DefaultInputNotFound(String, #[source] io::Error),

    #[error("Input not found")]
    InputNotFound(#[from] io::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registry() {
        assert_eq!(
            puzzle_names(),
            vec![
                "eight_puzzle",
                "marble_solitaire",
                "missionaries",
                "plagiarism",
                "rabbit_leap"
            ]
        );
    }

    #[test]
    fn strategies() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::BreadthFirst);
        assert_eq!("DFS".parse::<Strategy>().unwrap(), Strategy::DepthFirst);
        assert_eq!("dijkstra".parse::<Strategy>().unwrap(), Strategy::UniformCost);
        assert_eq!("a*".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!("Greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert!(matches!(
            "beam".parse::<Strategy>(),
            Err(LabError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn default_strategies() {
        let mut options = RunOptions::default();
        let defaults = [Strategy::BreadthFirst, Strategy::DepthFirst];
        assert_eq!(options.strategies(&defaults), defaults.to_vec());

        options.strategy = Some(Strategy::AStar);
        assert_eq!(options.strategies(&defaults), vec![Strategy::AStar]);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity(0), tracing::Level::WARN);
        assert_eq!(verbosity(2), tracing::Level::DEBUG);
        assert_eq!(verbosity(7), tracing::Level::TRACE);
    }

    #[test]
    fn default_inputs() {
        // Tests run from the crate root, where the inputs live.
        for name in puzzle_names() {
            assert!(get_default_input(name).is_ok(), "missing input for {}", name);
        }
    }

    #[test]
    fn missing_inputs() {
        let err = get_input_reader("rabbit_leap", Some("puzzles/rabbit_leap/missing.txt")).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LabError>(),
            Some(LabError::InputNotFound(_))
        ));

        let err = get_input_reader("tower_of_hanoi", None).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LabError>(),
            Some(LabError::DefaultInputNotFound(_, _))
        ));

        assert!(get_input_reader("rabbit_leap", Some("puzzles/rabbit_leap/input.txt")).is_ok());
    }
}
