//! Global symbol interning for atom and functor names.
//!
//! chalk interns identifiers through `lalrpop_intern`, a helper tied to the
//! lalrpop parser generator; nothing in this pack pins its API precisely
//! enough to depend on safely. `lasso` is the general-purpose interner the
//! rest of the retrieval pack already reaches for to solve the identical
//! problem (symbol tables for a parsed language), so we use it here and
//! keep chalk's shape: a single process-wide table and a `Copy` key type
//! that stands in for the interned string everywhere else in the engine.
use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use std::fmt;

static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);

/// An interned atom or functor name. Cheap to copy and compare.
pub type Atom = Spur;

/// Interns `s`, returning the (possibly pre-existing) symbol for it.
pub fn intern(s: &str) -> Atom {
    INTERNER.get_or_intern(s)
}

/// Resolves an interned atom back to its textual form.
pub fn resolve(atom: Atom) -> String {
    INTERNER.resolve(&atom).to_string()
}

/// Runs `f` with a borrow of the interned text, without allocating.
pub fn with_str<R>(atom: Atom, f: impl FnOnce(&str) -> R) -> R {
    f(INTERNER.resolve(&atom))
}

pub struct DisplayAtom(pub Atom);

impl fmt::Display for DisplayAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", resolve(self.0))
    }
}
