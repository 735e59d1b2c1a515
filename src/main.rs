use std::{fs, process::ExitCode};

use clap::{ArgAction, Parser};
use hinglish::{
    error::Diagnostic,
    interpreter::{
        environment::Environment,
        lexer::{Token, lex_errors},
        sink::Sink,
    },
    run_with, tokenize,
};
use tracing_subscriber::EnvFilter;

/// hinglish runs scripts written with transliterated Hindi keywords.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats the contents as source code instead of a file path.
    #[arg(short, long)]
    eval: bool,

    /// Prints the token stream instead of running the script.
    #[arg(short, long)]
    tokens: bool,

    /// Raises log verbosity. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    contents: String,
}

/// Prints output to stdout and diagnostics to stderr as they happen.
struct Console;

impl Sink for Console {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        eprintln!("{diagnostic}");
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let script = if args.eval {
        args.contents
    } else {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    };

    if args.tokens {
        let tokens: Vec<Token> = tokenize(&script).collect();
        for token in &tokens {
            println!("{token}");
        }
        for error in lex_errors(&tokens) {
            eprintln!("{error}");
        }
        return ExitCode::SUCCESS;
    }

    match run_with(&script, &mut Environment::new(), &mut Console) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
