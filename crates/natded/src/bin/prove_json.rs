//! Command-line proof synthesizer with JSON input and export

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};

use natded::{ProblemJson, ProofAttemptJson, ProofResult, Prover, ProverConfig, ProverError};
use tracing::Level;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <problem.json | -> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --timeout <seconds>     Set timeout (default: 10)");
        eprintln!("  --max-iterations <n>    Set max passes (default: 100, 0 = unlimited)");
        eprintln!("  --max-nodes <n>         Set max derived lines (default: 10000, 0 = unlimited)");
        eprintln!("  --json <file>           Export proof attempt to JSON file");
        eprintln!("  --verify                Check the proof with the independent verifier");
        eprintln!("  --verbose               Log search progress to stderr");
        std::process::exit(1);
    }

    let filename = &args[1];
    let mut overrides: Vec<(&str, &str)> = Vec::new();
    let mut verbose = false;
    let mut verify = false;
    let mut json_output: Option<String> = None;

    // Parse command line options
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--timeout" | "--max-iterations" | "--max-nodes") => {
                if i + 1 < args.len() {
                    overrides.push((flag, args[i + 1].as_str()));
                    i += 1;
                }
            }
            "--json" => {
                if i + 1 < args.len() {
                    json_output = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--verify" => verify = true,
            "--verbose" => verbose = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
            }
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let problem = match read_problem(filename) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Error reading problem: {}", e);
            std::process::exit(1);
        }
    };

    let mut config = problem.config.apply(ProverConfig::default());
    for (flag, value) in overrides {
        match flag {
            "--timeout" => match value.parse::<u64>() {
                Ok(secs) => config.timeout = std::time::Duration::from_secs(secs),
                Err(_) => eprintln!("Ignoring invalid timeout: {}", value),
            },
            "--max-iterations" => match value.parse::<usize>() {
                Ok(n) => config.max_iterations = n,
                Err(_) => eprintln!("Ignoring invalid iteration limit: {}", value),
            },
            _ => match value.parse::<usize>() {
                Ok(n) => config.max_nodes = n,
                Err(_) => eprintln!("Ignoring invalid node limit: {}", value),
            },
        }
    }

    let mut prover = match Prover::new(problem.into_wffs(), config) {
        Ok(prover) => prover,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("Premises:");
    for premise in prover.premises() {
        println!("  {}", premise);
    }
    println!("Conclusion:\n  {}\n", prover.conclusion());

    let result = prover.prove();
    let elapsed = prover.profile().total_time.as_secs_f64();

    // Report result
    let exit_code = match &result {
        ProofResult::Proof(proof) => {
            println!("✓ PROVED in {:.3}s", elapsed);
            println!("  Proof length: {} lines\n", proof.len());
            print!("{}", proof);
            if verify {
                match prover.verify_proof(proof) {
                    Ok(()) => println!("\nProof verified"),
                    Err(e) => {
                        println!("\nProof rejected: {}", e);
                        std::process::exit(3);
                    }
                }
            }
            0
        }
        ProofResult::Exhausted => {
            println!("✗ EXHAUSTED in {:.3}s", elapsed);
            println!("  No rule applies any more; no proof found");
            2
        }
        ProofResult::ResourceLimit(limit) => {
            println!("✗ RESOURCE LIMIT in {:.3}s", elapsed);
            println!("  {}", limit.reason());
            2
        }
        ProofResult::Timeout => {
            println!("✗ TIMEOUT in {:.3}s", elapsed);
            println!("  Exceeded time limit");
            2
        }
    };

    // Export to JSON if requested
    if let Some(json_file) = json_output {
        let attempt = ProofAttemptJson {
            problem_file: filename.to_string(),
            result: result.to_json(prover.profile()),
            statistics: prover.profile().clone(),
        };
        if let Err(e) = write_json(&json_file, &attempt) {
            eprintln!("Failed to export JSON: {}", e);
        } else {
            println!("\nProof attempt exported to: {}", json_file);
        }
    }

    std::process::exit(exit_code);
}

/// Read a problem from a file, or from stdin when the name is `-`.
fn read_problem(filename: &str) -> Result<ProblemJson, ProverError> {
    let mut text = String::new();
    if filename == "-" {
        io::stdin().read_to_string(&mut text)?;
    } else {
        File::open(filename)?.read_to_string(&mut text)?;
    }
    Ok(serde_json::from_str(&text)?)
}

fn write_json(path: &str, attempt: &ProofAttemptJson) -> Result<(), ProverError> {
    let json = serde_json::to_string_pretty(attempt)?;
    File::create(path)?.write_all(json.as_bytes())?;
    Ok(())
}
