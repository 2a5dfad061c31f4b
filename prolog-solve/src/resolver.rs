//! SLD resolution with chronological backtracking.
//!
//! Solutions are produced as a lazy, pull-based stream: nothing past the
//! first candidate clause of the first goal is ever touched until the
//! caller asks for another `Environment` via `Iterator::next`. That rules
//! out building a generator by hand (not available on stable) or
//! collecting into a `Vec` up front (which would compute ahead); instead
//! every goal is solved by a `flat_map` chain over `Box<dyn Iterator>`,
//! the same shape chalk's own solvers use for backtracking search.

use crate::engine::Engine;
use crate::index::IndexKey;
use crate::rename::rename_clause;
use crate::unify::unify_compound;
use prolog_ir::{Clause, Compound, Environment, Trail};

/// Solves a conjunction of goals left to right, depth-first: `goals[0]` is
/// tried first, and for every environment it yields, `goals[1..]` is
/// solved again from scratch against that environment. An empty
/// conjunction succeeds trivially, once, with `env` unchanged -- this is
/// the base case that terminates a clause body's recursion.
pub fn solve_goals<'e>(
    goals: &[Compound],
    engine: &'e Engine,
    env: Environment,
) -> Box<dyn Iterator<Item = Environment> + 'e> {
    match goals.split_first() {
        None => Box::new(std::iter::once(env)),
        Some((first, rest)) => {
            let first = first.clone();
            let rest = rest.to_vec();
            Box::new(
                solve_goal(&first, engine, env)
                    .flat_map(move |next_env| solve_goals(&rest, engine, next_env)),
            )
        }
    }
}

/// Solves a single goal: dispatches to a builtin if one is registered for
/// its `(name, arity)`, otherwise resolves it against the knowledge base.
pub fn solve_goal<'e>(
    goal: &Compound,
    engine: &'e Engine,
    env: Environment,
) -> Box<dyn Iterator<Item = Environment> + 'e> {
    if engine.builtins().is_builtin(goal) {
        let mut trail = Trail::new();
        return engine.builtins().call(goal, engine, env, &mut trail);
    }

    let (functor, arity) = goal.signature();
    let Some(predicate) = engine.kb().predicate(functor, arity) else {
        // No clauses and no builtin: per the design notes, an unknown
        // predicate is a silent failure of the branch rather than an
        // existence_error, since there is no exception mechanism here.
        tracing::debug!(
            predicate = %format!("{}/{}", prolog_ir::intern::resolve(functor), arity),
            "unknown predicate, failing branch"
        );
        return Box::new(std::iter::empty());
    };

    let goal_key = goal
        .args
        .first()
        .map(|arg| IndexKey::of_goal_arg(arg, &env))
        .unwrap_or(IndexKey::Wildcard);
    let candidates: Vec<Clause> = predicate.candidates(goal_key).into_iter().cloned().collect();

    let occurs_check = engine.occurs_check();
    let goal = goal.clone();

    Box::new(candidates.into_iter().flat_map(move |clause| {
        let renamed = rename_clause(&clause, engine.var_gen());
        let mut branch_env = env.clone();
        let mut trail = Trail::new();
        if unify_compound(&goal, &renamed.head, &mut branch_env, &mut trail, occurs_check) {
            solve_goals(&renamed.body, engine, branch_env)
        } else {
            Box::new(std::iter::empty()) as Box<dyn Iterator<Item = Environment>>
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use itertools::assert_equal;
    use prolog_ir::Term;

    fn fact(functor: &str, args: Vec<Term>) -> Clause {
        Clause::fact(Compound::new(prolog_ir::intern(functor), args))
    }

    fn rule(functor: &str, args: Vec<Term>, body: Vec<Compound>) -> Clause {
        Clause {
            head: Compound::new(prolog_ir::intern(functor), args),
            body,
        }
    }

    fn goal(functor: &str, args: Vec<Term>) -> Compound {
        Compound::new(prolog_ir::intern(functor), args)
    }

    #[test]
    fn facts_are_tried_in_insertion_order() {
        let mut engine = Engine::new(false);
        engine.load_clause(fact("parent", vec![Term::atom("tom"), Term::atom("bob")]));
        engine.load_clause(fact("parent", vec![Term::atom("tom"), Term::atom("liz")]));

        let x = engine.var_gen().fresh();
        let q = goal("parent", vec![Term::atom("tom"), Term::Var(x)]);
        let solutions: Vec<Term> = engine
            .query(&q)
            .map(|env| env.apply(&Term::Var(x)))
            .collect();

        assert_equal(solutions, vec![Term::atom("bob"), Term::atom("liz")]);
    }

    #[test]
    fn unknown_predicate_fails_without_panicking() {
        let engine = Engine::new(false);
        let q = goal("nope", vec![Term::atom("a")]);
        assert_eq!(engine.query(&q).count(), 0);
    }

    #[test]
    fn conjunction_in_a_rule_body_is_solved_left_to_right() {
        let mut engine = Engine::new(false);
        let x = engine.var_gen().fresh();
        let z = engine.var_gen().fresh();
        let y = engine.var_gen().fresh();
        engine.load_clause(fact("parent", vec![Term::atom("tom"), Term::atom("bob")]));
        engine.load_clause(fact("parent", vec![Term::atom("bob"), Term::atom("ann")]));
        engine.load_clause(rule(
            "grandparent",
            vec![Term::Var(x), Term::Var(y)],
            vec![
                goal("parent", vec![Term::Var(x), Term::Var(z)]),
                goal("parent", vec![Term::Var(z), Term::Var(y)]),
            ],
        ));

        let q_x = engine.var_gen().fresh();
        let q_y = engine.var_gen().fresh();
        let q = goal("grandparent", vec![Term::Var(q_x), Term::Var(q_y)]);
        let solutions: Vec<(Term, Term)> = engine
            .query(&q)
            .map(|env| (env.apply(&Term::Var(q_x)), env.apply(&Term::Var(q_y))))
            .collect();

        assert_eq!(solutions, vec![(Term::atom("tom"), Term::atom("ann"))]);
    }
}
