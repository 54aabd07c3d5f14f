//! Rill CLI
//!
//! Runs programs with the reference host and tries rule blocks against
//! inputs from the command line.

use rill_eval::stdout_handler;
use rillc::commands::{load_source, read_file, run_program, ParseCommand, ParseOutcome};
use rillc::logging::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: rill run <file>");
                std::process::exit(1);
            }
            let source = read_or_exit(&args[2]);
            match run_program(&source, stdout_handler()) {
                Ok(0) => {}
                Ok(code) => std::process::exit(code),
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            }
        }
        "parse" => {
            let command = match ParseCommand::from_args(&args[2..]) {
                Ok(command) => command,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: rill parse <input> <rules> [--case] [--part] [--redbol] [--block] [--binary]");
                    std::process::exit(1);
                }
            };
            match command.execute(stdout_handler()) {
                Ok(ParseOutcome::Matched { position }) => println!("matched at {position}"),
                Ok(ParseOutcome::Collected(block)) => println!("{block}"),
                Ok(ParseOutcome::Accepted(value)) => println!("accepted {value}"),
                Ok(ParseOutcome::NoMatch(msg)) => {
                    println!("{msg}");
                    std::process::exit(1);
                }
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(2);
                }
            }
        }
        "load" => {
            if args.len() < 3 {
                eprintln!("Usage: rill load <file>");
                std::process::exit(1);
            }
            let source = read_or_exit(&args[2]);
            match load_source(&source) {
                Ok(molded) => println!("{molded}"),
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("rill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn read_or_exit(path: &str) -> String {
    match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Rill - grammar-driven sequence matching");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>               Run a program");
    println!("  parse <input> <rules>    Match an input against a rule block");
    println!("  load <file>              Show how a file loads, one value per line");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Parse options:");
    println!("  --case      Compare case-sensitively");
    println!("  --part      Allow the match to stop before the end of the input");
    println!("  --redbol    Legacy keyword semantics (`and`, zero-width `set`)");
    println!("  --block     Load the input as source (a block) instead of text");
    println!("  --binary    Match the input's UTF-8 bytes");
    println!();
    println!("Logging:");
    println!("  RILL_LOG=rill_parse=trace rill parse ...   (falls back to RUST_LOG)");
    println!();
    println!("Examples:");
    println!("  rill run grammar.rill");
    println!("  rill parse \"aabb\" \"some \\\"a\\\" some \\\"b\\\"\"");
    println!("  rill parse \"1 2 x\" \"some integer! word!\" --block");
}
