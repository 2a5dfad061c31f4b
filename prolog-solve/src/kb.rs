use crate::index::IndexKey;
use prolog_ir::{Atom, Clause};
use rustc_hash::FxHashMap;

/// All clauses for one `(functor, arity)` predicate, plus the
/// first-argument index over them.
///
/// Clauses are appended in `push` order and never removed (no
/// assert/retract in scope); that insertion order is the order exposed
/// by `candidates` within each of the two merge groups described below.
#[derive(Debug, Default)]
pub struct PredicateClauses {
    clauses: Vec<Clause>,
    by_key: FxHashMap<IndexKey, Vec<usize>>,
    wildcards: Vec<usize>,
}

impl PredicateClauses {
    pub fn push(&mut self, clause: Clause) {
        let key = clause
            .head
            .args
            .first()
            .map(IndexKey::of)
            .unwrap_or(IndexKey::Wildcard);
        let position = self.clauses.len();
        match key {
            IndexKey::Wildcard => self.wildcards.push(position),
            concrete => self.by_key.entry(concrete).or_default().push(position),
        }
        self.clauses.push(clause);
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Candidate clauses for a goal whose first argument has indexing key
    /// `goal_key`.
    ///
    /// A wildcard goal key (variable or number in goal position, or no
    /// first argument at all) must consider every clause, in insertion
    /// order. A concrete goal key returns the clauses that share it,
    /// followed by the wildcard clauses -- both groups in their own
    /// insertion order, which is coarser than strict insertion order
    /// across the whole predicate (see the note on indexing loss of
    /// order).
    pub fn candidates(&self, goal_key: IndexKey) -> Vec<&Clause> {
        if goal_key == IndexKey::Wildcard {
            return self.clauses.iter().collect();
        }
        let matches = self.by_key.get(&goal_key).into_iter().flatten().copied();
        let wildcards = self.wildcards.iter().copied();
        matches
            .chain(wildcards)
            .map(|i| &self.clauses[i])
            .collect()
    }
}

/// The whole program: every predicate's clauses, keyed by signature.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    predicates: FxHashMap<(Atom, usize), PredicateClauses>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    pub fn add_clause(&mut self, clause: Clause) {
        let sig = clause.head.signature();
        self.predicates.entry(sig).or_default().push(clause);
    }

    pub fn predicate(&self, functor: Atom, arity: usize) -> Option<&PredicateClauses> {
        self.predicates.get(&(functor, arity))
    }

    pub fn has_predicate(&self, functor: Atom, arity: usize) -> bool {
        self.predicates.contains_key(&(functor, arity))
    }

    /// Entries formatted `functor/arity`, for `engine.kb.list_predicates()`.
    pub fn list_predicates(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .predicates
            .keys()
            .map(|(functor, arity)| format!("{}/{}", prolog_ir::intern::resolve(*functor), arity))
            .collect();
        names.sort();
        names
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }
}
