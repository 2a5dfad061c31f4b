//! Reads a `.pl` source file into the clauses it defines.

use crate::lexer::SyntaxError;
use crate::parser::Parser;
use prolog_ir::{Clause, VarGen};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}: {source}")]
    Existence {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Syntax {
        path: String,
        #[source]
        source: SyntaxError,
    },
}

/// Loads and parses the file at `path`, using `var_gen` to allocate every
/// variable the file's clauses introduce.
pub fn load_file(path: impl AsRef<Path>, var_gen: &VarGen) -> Result<Vec<Clause>, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Existence {
        path: path.display().to_string(),
        source,
    })?;
    load_str(&text, var_gen).map_err(|source| LoadError::Syntax {
        path: path.display().to_string(),
        source,
    })
}

/// Parses `text` as a whole program (a sequence of `.`-terminated clauses).
pub fn load_str(text: &str, var_gen: &VarGen) -> Result<Vec<Clause>, SyntaxError> {
    Parser::new(text, var_gen)?.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_small_program_from_text() {
        let gen = VarGen::new();
        let clauses = load_str(
            "parent(tom, bob).\nparent(bob, ann).\ngrandparent(X, Z) :- parent(X, Y), parent(Y, Z).\n",
            &gen,
        )
        .unwrap();
        assert_eq!(clauses.len(), 3);
        assert!(clauses[2].body.len() == 2);
    }

    #[test]
    fn missing_file_reports_an_existence_error() {
        let gen = VarGen::new();
        let err = load_file("/no/such/file.pl", &gen).unwrap_err();
        assert!(matches!(err, LoadError::Existence { .. }));
    }
}
