//! First-argument indexing.
//!
//! chalk's `could_match` module (`chalk_ir::could_match::CouldMatch`) gives
//! every impl a cheap pre-filter before the expensive unification pass is
//! attempted; this module is the same idea specialised to Prolog's
//! coarser, three-bucket scheme (concrete atom, compound, or wildcard)
//! rather than full structural matching.
use prolog_ir::{Atom, Environment, Term};

/// The key a clause's (or goal's) first argument is bucketed under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Atom(Atom),
    /// Any compound, including the dotted list cell -- coarsely indexed,
    /// per the design: a single bucket for all compounds keeps the index
    /// simple at the cost of not discriminating on functor/arity.
    Compound,
    /// A variable or number in the indexed position; must be considered
    /// against clauses of every other key too.
    Wildcard,
}

impl IndexKey {
    /// Computes the bucket for an already-dereferenced term.
    pub fn of(term: &Term) -> IndexKey {
        match term {
            Term::Atom(a) => IndexKey::Atom(*a),
            Term::Compound(_) => IndexKey::Compound,
            Term::Number(_) | Term::Var(_) => IndexKey::Wildcard,
        }
    }

    /// The key for a goal's first argument, dereferenced through `env`.
    pub fn of_goal_arg(term: &Term, env: &Environment) -> IndexKey {
        IndexKey::of(&env.deref(term))
    }
}
