use crate::builtins::BuiltinRegistry;
use crate::kb::KnowledgeBase;
use crate::resolver;
use prolog_ir::{Clause, Compound, Environment, VarGen};

/// The whole interpreter core: a knowledge base, the builtin registry, a
/// variable-id source shared by every renaming this engine does, and the
/// occurs-check flag every unification attempt is run under.
///
/// One `Engine` is one Prolog "session" -- the unit `prolog-repl` creates
/// per invocation and `prolog-tests` creates per test.
pub struct Engine {
    kb: KnowledgeBase,
    builtins: BuiltinRegistry,
    var_gen: VarGen,
    occurs_check: bool,
}

impl Engine {
    pub fn new(occurs_check: bool) -> Self {
        Engine {
            kb: KnowledgeBase::new(),
            builtins: BuiltinRegistry::standard(),
            var_gen: VarGen::new(),
            occurs_check,
        }
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn var_gen(&self) -> &VarGen {
        &self.var_gen
    }

    pub fn occurs_check(&self) -> bool {
        self.occurs_check
    }

    /// Adds one clause to the knowledge base, appending to whatever
    /// clauses already exist for its `(functor, arity)`.
    pub fn load_clause(&mut self, clause: Clause) {
        self.kb.add_clause(clause);
    }

    /// Adds every clause from `clauses`, in order.
    pub fn load_all(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.load_clause(clause);
        }
    }

    /// Discards every loaded clause, keeping the builtin registry and
    /// occurs-check setting. Variable identities are not reset: a fresh
    /// `VarGen` would risk colliding with ids already captured by a
    /// caller that held on to a `Term::Var` from before the reset.
    pub fn reset(&mut self) {
        self.kb.clear();
    }

    /// Solves `goal` against the current knowledge base, returning a lazy
    /// stream of environments -- one per solution, in the order SLD
    /// resolution with left-to-right, depth-first goal selection finds
    /// them.
    pub fn query<'e>(&'e self, goal: &Compound) -> Box<dyn Iterator<Item = Environment> + 'e> {
        resolver::solve_goals(std::slice::from_ref(goal), self, Environment::new())
    }

    /// Solves a whole conjunction of goals (e.g. a REPL query with commas
    /// already split into individual goals) against a caller-supplied
    /// starting environment.
    pub fn query_goals<'e>(
        &'e self,
        goals: &[Compound],
        env: Environment,
    ) -> Box<dyn Iterator<Item = Environment> + 'e> {
        resolver::solve_goals(goals, self, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prolog_ir::Term;

    #[test]
    fn fresh_engine_has_no_predicates() {
        let engine = Engine::new(false);
        assert!(engine.kb().list_predicates().is_empty());
    }

    #[test]
    fn reset_clears_clauses_but_keeps_builtins() {
        let mut engine = Engine::new(false);
        engine.load_clause(Clause::fact(Compound::new(
            prolog_ir::intern("p"),
            vec![Term::atom("a")],
        )));
        assert_eq!(engine.kb().list_predicates(), vec!["p/1".to_string()]);
        engine.reset();
        assert!(engine.kb().list_predicates().is_empty());
        assert!(engine
            .builtins()
            .is_builtin(&Compound::new(prolog_ir::intern("true"), vec![])));
    }
}
