//! The interactive read-eval-print loop, in the shape of the reference
//! `chalki` REPL: a `rustyline` editor feeding a `process` dispatcher that
//! recognises a handful of backslash-commands before falling through to
//! "this line is a query".

use crate::pp::PrettyPrinter;
use prolog_ir::{Term, VarId};
use prolog_solve::Engine;
use rustc_hash::FxHashMap;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Runs the interactive loop until EOF or `\quit`. `engine` already has
/// whatever program was consulted on the command line loaded into it.
pub fn run(engine: &mut Engine) -> Result<(), ReplError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("?- ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if process_command(engine, line)? {
                    break;
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Handles one line of input. Returns `Ok(true)` iff the REPL should exit.
fn process_command(engine: &mut Engine, line: &str) -> Result<bool, ReplError> {
    match line {
        "\\quit" => return Ok(true),
        "\\help" => {
            print_help();
            return Ok(false);
        }
        "\\listing" => {
            for entry in engine.kb().list_predicates() {
                println!("{entry}");
            }
            return Ok(false);
        }
        _ => {}
    }

    match run_query(engine, line) {
        Ok(()) => {}
        Err(message) => eprintln!("error: {message}"),
    }
    Ok(false)
}

fn print_help() {
    println!("Commands:");
    println!("  \\help          show this text");
    println!("  \\listing       list loaded predicates as functor/arity");
    println!("  \\quit          exit the REPL");
    println!("  <goal>.        solve a query; type ';' for the next solution");
}

/// Parses `text` as a query, solves it, and prints solutions one at a
/// time, stopping when the user types anything other than `;`.
fn run_query(engine: &Engine, text: &str) -> Result<(), String> {
    let text = if text.ends_with('.') { text.to_string() } else { format!("{text}.") };
    let (goals, var_names) = prolog_parse::Parser::new(&text, engine.var_gen())
        .and_then(|mut p| p.parse_query())
        .map_err(|e| e.to_string())?;

    let mut solutions = engine.query_goals(&goals, prolog_ir::Environment::new());
    let mut any = false;
    loop {
        match solutions.next() {
            Some(env) => {
                any = true;
                print_bindings(&env, &var_names);
                if !ask_for_more() {
                    break;
                }
            }
            None => {
                if !any {
                    println!("no.");
                }
                break;
            }
        }
    }
    Ok(())
}

fn print_bindings(env: &prolog_ir::Environment, var_names: &FxHashMap<String, VarId>) {
    if var_names.is_empty() {
        println!("yes.");
        return;
    }
    let mut names: Vec<&String> = var_names.keys().collect();
    names.sort();
    let pp = PrettyPrinter::new(env);
    for name in names {
        let id = var_names[name];
        println!("{} = {}", name, pp.format(&Term::Var(id)));
    }
}

fn ask_for_more() -> bool {
    use std::io::{self, Write};
    print!("; ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim() == ";"
}
