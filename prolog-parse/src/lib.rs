//! Lexer, operator-precedence parser and file loader: the out-of-core
//! collaborator that turns Prolog source text into the `prolog_ir` terms
//! and clauses the resolution engine consumes.

pub mod lexer;
pub mod loader;
pub mod parser;

pub use lexer::{Lexer, SyntaxError, Token, TokenKind};
pub use loader::{load_file, load_str, LoadError};
pub use parser::Parser;
