use crate::term::{Compound, Term};
use crate::var::VarId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// A mapping from variable id to the term it is bound to.
///
/// Resolution clones an environment at every clause attempt (see the
/// resolver), so the representation matters: `bindings` is wrapped in an
/// `Arc` and mutated through `Arc::make_mut`, giving clones that are O(1)
/// reference-count bumps until the branch actually binds a variable, at
/// which point exactly that branch pays for a copy-on-write split. This is
/// the "persistent map" strategy the design notes recommend, built from
/// `rustc_hash`'s `FxHashMap` (already the hash map chalk reaches for)
/// rather than pulling in a dedicated persistent-map crate nothing else in
/// the pack uses.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: Arc<FxHashMap<VarId, Term>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, var: VarId) -> Option<&Term> {
        self.bindings.get(&var)
    }

    pub(crate) fn bind(&mut self, var: VarId, term: Term) {
        Arc::make_mut(&mut self.bindings).insert(var, term);
    }

    pub(crate) fn unbind(&mut self, var: VarId) {
        Arc::make_mut(&mut self.bindings).remove(&var);
    }

    /// Follows a chain of variable bindings to its current representative:
    /// either a non-variable term, or an unbound variable. Terminates
    /// because bindings form a DAG in the acyclic case (occurs-check
    /// enabled, or no cycle has otherwise been created).
    pub fn deref(&self, term: &Term) -> Term {
        let mut current = term.clone();
        loop {
            match current {
                Term::Var(v) => match self.get(v) {
                    Some(bound) => current = bound.clone(),
                    None => return Term::Var(v),
                },
                other => return other,
            }
        }
    }

    /// Produces a fully-substituted copy of `term`, recursively
    /// dereferencing every subterm. Used to materialise solutions.
    ///
    /// Without occurs-check, unification can create a binding that
    /// (directly or indirectly) refers to itself; `apply` guards against
    /// that by tracking which variables are already being expanded on the
    /// current path and stopping rather than unfolding forever.
    pub fn apply(&self, term: &Term) -> Term {
        let mut seen = FxHashSet::default();
        self.apply_guarded(term, &mut seen)
    }

    fn apply_guarded(&self, term: &Term, seen: &mut FxHashSet<VarId>) -> Term {
        match term {
            Term::Var(v) => match self.get(*v) {
                Some(bound) => {
                    if !seen.insert(*v) {
                        return Term::Var(*v);
                    }
                    let bound = bound.clone();
                    let result = self.apply_guarded(&bound, seen);
                    seen.remove(v);
                    result
                }
                None => Term::Var(*v),
            },
            Term::Compound(c) => Term::Compound(Compound::new(
                c.functor,
                c.args.iter().map(|a| self.apply_guarded(a, seen)).collect(),
            )),
            other => other.clone(),
        }
    }
}
