#![cfg(test)]

use itertools::Itertools;
use prolog_ir::{Environment, Term, VarId};
use prolog_solve::Engine;
use rustc_hash::FxHashMap;

/// One loaded knowledge base plus the engine configuration it was built
/// with -- the unit every scenario test drives a query against.
pub struct Session {
    pub engine: Engine,
}

impl Session {
    pub fn new(occurs_check: bool) -> Self {
        Session { engine: Engine::new(occurs_check) }
    }

    /// Parses and loads `program`'s clauses, in order.
    pub fn consult(&mut self, program: &str) -> &mut Self {
        let clauses = prolog_parse::load_str(program, self.engine.var_gen())
            .unwrap_or_else(|e| panic!("program failed to parse: {e}"));
        self.engine.load_all(clauses);
        self
    }

    /// Parses `query`, solves it, and returns one row per solution: the
    /// fully-applied term bound to each of `var_names`, in the order
    /// those names are given (not the order bound, so tests can assert
    /// readable tuples).
    pub fn solve(&self, query: &str, var_names: &[&str]) -> Vec<Vec<Term>> {
        let (goals, vars) = prolog_parse::Parser::new(query, self.engine.var_gen())
            .unwrap_or_else(|e| panic!("query failed to lex: {e}"))
            .parse_query()
            .unwrap_or_else(|e| panic!("query failed to parse: {e}"));

        self.engine
            .query_goals(&goals, Environment::new())
            .map(|env| {
                var_names
                    .iter()
                    .map(|name| env.apply(&Term::Var(lookup(&vars, name))))
                    .collect()
            })
            .collect()
    }

    /// Counts solutions without materialising bindings, for tests that
    /// only care how many times a goal succeeds.
    pub fn count_solutions(&self, query: &str) -> usize {
        let (goals, _) = prolog_parse::Parser::new(query, self.engine.var_gen())
            .unwrap_or_else(|e| panic!("query failed to lex: {e}"))
            .parse_query()
            .unwrap_or_else(|e| panic!("query failed to parse: {e}"));
        self.engine.query_goals(&goals, Environment::new()).count()
    }
}

fn lookup(vars: &FxHashMap<String, VarId>, name: &str) -> VarId {
    *vars
        .get(name)
        .unwrap_or_else(|| panic!("query has no variable named {name}"))
}

/// Compares two multi-line strings ignoring leading/trailing whitespace
/// per line, printing a minimal diff on mismatch instead of the usual
/// wall of text `assert_eq!` produces for long outputs.
pub fn assert_lines_eq(expected: &str, actual: &str) {
    let norm = |s: &str| -> String { s.lines().map(str::trim).intersperse("\n").collect() };
    let (expected, actual) = (norm(expected), norm(actual));
    if expected == actual {
        return;
    }
    for result in diff::lines(&expected, &actual) {
        match result {
            diff::Result::Both(l, _) => println!("  {l}"),
            diff::Result::Left(l) => println!("- {l}"),
            diff::Result::Right(l) => println!("+ {l}"),
        }
    }
    panic!("line mismatch, see diff above");
}

/// A list term as the comma-joined rendering of its (ground) elements,
/// for assertions that read better than a raw `Term` debug dump.
pub fn render_ground_list(term: &Term) -> String {
    let mut items = Vec::new();
    let mut current = term.clone();
    loop {
        match current {
            Term::Compound(ref c) if c.functor == prolog_ir::intern(".") && c.args.len() == 2 => {
                items.push(format!("{}", c.args[0]));
                current = c.args[1].clone();
            }
            _ => break,
        }
    }
    items.into_iter().intersperse(", ".to_string()).collect()
}
