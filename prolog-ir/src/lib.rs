//! Term representation, unification environment and binding trail.
//!
//! This crate is the leaf of the workspace, playing the role `chalk-ir`
//! plays for chalk: every other crate builds on the `Term`/`Clause`
//! algebra and the `Environment`/`Trail` pair defined here, and none of it
//! depends back on them.

pub mod env;
pub mod intern;
pub mod term;
pub mod trail;
pub mod var;

pub use env::Environment;
pub use intern::{intern, Atom};
pub use term::{Clause, Compound, Number, Term};
pub use trail::Trail;
pub use var::{VarGen, VarId};
