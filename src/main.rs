use cordmark::{ParseOptions, Parser, render};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let mut json = false;
    let mut debug = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--debug" => debug = true,
            other => {
                eprintln!("usage: cordmark [--json] [--debug] < input.md");
                eprintln!("unknown argument: {other}");
                return ExitCode::from(2);
            }
        }
    }

    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        error!(%err, "failed to read stdin");
        return ExitCode::FAILURE;
    }

    let parser = Parser::with_options(ParseOptions::new().with_debug(debug));
    let blocks = match parser.parse(&input) {
        Ok(blocks) => blocks,
        Err(err) => {
            error!(%err, "input rejected");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&blocks) {
            Ok(tree) => println!("{tree}"),
            Err(err) => {
                error!(%err, "failed to serialize tree");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render(&blocks));
    }
    ExitCode::SUCCESS
}
