//! `prolog` -- a command-line driver and REPL for the resolution engine.
//!
//! Structure follows the reference `chalki` binary: a `docopt`-parsed
//! `Args` struct, an optional file consulted up front, and either batch
//! goal evaluation or an interactive loop depending on what was passed.

mod pp;
mod repl;

use docopt::Docopt;
use prolog_solve::Engine;
use std::process::exit;

const USAGE: &str = "
prolog

Usage:
  prolog [options] [<file>]
  prolog (-h | --help)
  prolog --version

Options:
  -h --help          Show this screen.
  --version          Show this tool's version and exit.
  --occurs-check     Enable the occurs-check during unification.
  --trace            Enable resolver trace logging.
  --max-depth N      Reserved: depth guard is not enforced by this engine [default: 0].
";

#[derive(Debug, serde::Deserialize)]
struct Args {
    arg_file: Option<String>,
    flag_occurs_check: bool,
    flag_trace: bool,
    flag_max_depth: usize,
    flag_version: bool,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_version {
        println!("prolog {}", env!("CARGO_PKG_VERSION"));
        exit(0);
    }

    let filter = if args.flag_trace { "prolog_solve=trace" } else { "prolog_solve=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(filter).unwrap())
        .without_time()
        .init();

    if args.flag_max_depth != 0 {
        tracing::warn!(requested = args.flag_max_depth, "--max-depth is accepted but not enforced by this engine");
    }

    let mut engine = Engine::new(args.flag_occurs_check);

    if let Some(path) = &args.arg_file {
        match prolog_parse::load_file(path, engine.var_gen()) {
            Ok(clauses) => engine.load_all(clauses),
            Err(e) => {
                eprintln!("error: {e}");
                exit(1);
            }
        }
    }

    if let Err(e) = repl::run(&mut engine) {
        eprintln!("error: {e}");
        exit(1);
    }
}
