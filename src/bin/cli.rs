//! This is the command line tool that picks a coding contract and solves a
//! task for it. The task is given inline or loaded from a file, and the answer
//! is printed to stdout.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use contract_codecs::catalog::Contract;
use contract_codecs::{Context, Error, TieBreak};
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn print_catalog() {
    for contract in Contract::ALL {
        println!("{:<16} {}", contract.key(), contract.name());
        println!("{:<16} e.g. {}", "", contract.example());
    }
}

/// Build the encoder context from the command line flags.
fn make_context(matches: &ArgMatches) -> Context {
    let seed = matches.get_one::<u64>("seed").copied();
    let policy = matches
        .get_one::<String>("tie-break")
        .map(String::as_str)
        .unwrap_or("first");

    let tie_break = match policy {
        "last" => TieBreak::KeepLast,
        "random" => TieBreak::Random { seed },
        _ => TieBreak::KeepFirst,
    };
    Context::new(tie_break)
}

/// Load the task from the file argument or from the positional argument.
fn load_task(matches: &ArgMatches) -> Result<Option<String>, Error> {
    if let Some(path) = matches.get_one::<String>("file") {
        let task = fs::read_to_string(path)?;
        log::info!("Read {} bytes from {}.", task.len(), path);
        return Ok(Some(task));
    }
    Ok(matches.get_one::<String>("TASK").cloned())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let key = matches
        .get_one::<String>("contract")
        .map(String::as_str)
        .unwrap_or("lz-compress");
    let contract: Contract = key.parse()?;
    let ctx = make_context(matches);

    if matches.get_flag("generate") {
        let task = match matches.get_one::<u64>("seed") {
            Some(seed) => contract.generate(&mut StdRng::seed_from_u64(*seed)),
            None => contract.generate(&mut StdRng::from_entropy()),
        }?;
        println!("{}", task);
        return Ok(());
    }

    let task = match load_task(matches)? {
        Some(task) => task,
        None => {
            log::info!("No task was given, solving the example");
            contract.example().to_string()
        }
    };

    let timer = Timer::new();
    log::info!("Solving \"{}\"", contract.name());
    let answer = contract.solve(&task, ctx)?;
    log::info!(
        "Transformed {} characters into {} characters.",
        task.trim_end().chars().count(),
        answer.chars().count()
    );
    println!("{}", answer);

    if matches.get_flag("checked") {
        if contract.verify(&task, &answer, ctx)? {
            log::info!("Correct!");
        } else {
            log::info!("Incorrect!");
        }
    }

    drop(timer);
    Ok(())
}

fn main() -> ExitCode {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Verify the answer with the inverse codec")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the supported contracts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("generate")
                .long("generate")
                .help("Print a random task for the contract")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["file", "TASK"]),
        )
        .arg(
            Arg::new("contract")
                .short('c')
                .long("contract")
                .value_name("KEY")
                .help("The contract to solve")
                .value_parser(Contract::ALL.map(|c| c.key()))
                .num_args(1),
        )
        .arg(
            Arg::new("tie-break")
                .long("tie-break")
                .value_name("POLICY")
                .help("How the compressor picks between equal length encodings")
                .value_parser(["first", "last", "random"])
                .num_args(1),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for random tie-breaking and task generation")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read the task from a file")
                .num_args(1)
                .conflicts_with("TASK"),
        )
        .arg(
            Arg::new("TASK")
                .help("The task input")
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    if matches.get_flag("list") {
        print_catalog();
        return ExitCode::SUCCESS;
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
