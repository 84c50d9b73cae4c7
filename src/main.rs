//! commitment-gate: evaluate one request from the command line.
//!
//! Reads a JSON evaluation input from stdin, writes the decision with its
//! response text to stdout as a single JSON line.
//!
//! Usage:
//!   commitment-gate [--catalog PATH] [--no-log] < input.json
//!   commitment-gate --validate [--catalog PATH]
//!
//! Exit codes: 0 decided, 1 bad input or usage, 2 catalog error.

use std::io::Read;
use std::path::PathBuf;
use std::process::exit;

use commitment_gate::catalog::Catalog;
use commitment_gate::eval::{EvaluationInput, Evaluator};
use commitment_gate::logging;

#[derive(Debug, Default)]
struct Args {
    catalog: Option<PathBuf>,
    validate: bool,
    no_log: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => {
                let path = iter.next().ok_or("--catalog requires a path")?;
                args.catalog = Some(PathBuf::from(shellexpand::tilde(&path).into_owned()));
            }
            "--validate" => args.validate = true,
            "--no-log" => args.no_log = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn main() {
    logging::init_diagnostics();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("commitment-gate: {e}");
            exit(1);
        }
    };

    let loaded = match &args.catalog {
        Some(path) => Catalog::from_path(path),
        None => Catalog::load(),
    };
    let catalog = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("commitment-gate: {e}");
            exit(2);
        }
    };

    if args.validate {
        println!(
            "catalog ok: {} roles, {} load profiles, {} templates",
            catalog.role_intent_matrix.len(),
            catalog.profiles.len(),
            catalog.templates().len()
        );
        return;
    }

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("commitment-gate: failed to read stdin");
        exit(1);
    }

    let request: EvaluationInput = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("commitment-gate: JSON parse error: {e}");
            exit(1);
        }
    };

    let log_path = if args.no_log {
        None
    } else {
        catalog.settings.decision_log_path()
    };
    let evaluator = Evaluator::new(catalog);
    let decision = evaluator.evaluate(&request);

    if let Some(path) = log_path {
        logging::log_decision(&path, &request, &decision);
    }

    let response = evaluator.catalog().respond(decision);
    match serde_json::to_string(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("commitment-gate: failed to encode response: {e}");
            exit(1);
        }
    }
}
