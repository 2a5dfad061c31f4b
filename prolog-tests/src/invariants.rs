#![cfg(test)]

use crate::test_util::Session;
use prolog_ir::{Clause, Compound, Environment, Term, Trail, VarGen};
use prolog_solve::{evaluate, unify, IndexKey, KnowledgeBase};

#[test]
fn unification_soundness_applies_to_equal_terms() {
    let gen = VarGen::new();
    let x = gen.fresh();
    let t1 = Term::Var(x);
    let t2 = Term::compound("f", vec![Term::atom("a"), Term::int(1)]);

    let mut env = Environment::new();
    let mut trail = Trail::new();
    assert!(unify(&t1, &t2, &mut env, &mut trail, false));
    assert_eq!(env.apply(&t1), env.apply(&t2));
}

#[test]
fn unification_symmetry_holds_for_compound_terms() {
    let gen = VarGen::new();
    let x = gen.fresh();
    let y = gen.fresh();
    let a = Term::compound("pair", vec![Term::Var(x), Term::atom("ok")]);
    let b = Term::compound("pair", vec![Term::int(1), Term::Var(y)]);

    let mut env1 = Environment::new();
    let mut trail1 = Trail::new();
    let forward = unify(&a, &b, &mut env1, &mut trail1, false);

    let mut env2 = Environment::new();
    let mut trail2 = Trail::new();
    let backward = unify(&b, &a, &mut env2, &mut trail2, false);

    assert_eq!(forward, backward);
    assert!(forward);
    assert_eq!(env1.apply(&a), env2.apply(&a));
}

#[test]
fn trail_completeness_restores_byte_for_byte() {
    let gen = VarGen::new();
    let x = gen.fresh();
    let y = gen.fresh();
    let mut env = Environment::new();
    let mut trail = Trail::new();

    let before = env.apply(&Term::Var(x));
    unify(&Term::Var(x), &Term::atom("a"), &mut env, &mut trail, false);
    unify(&Term::Var(y), &Term::compound("f", vec![Term::int(1)]), &mut env, &mut trail, false);
    assert_eq!(env.len(), 2);

    trail.unwind(&mut env);
    assert!(env.is_empty());
    assert_eq!(env.apply(&Term::Var(x)), before);
}

#[test]
fn occurs_check_safety_forbids_self_referential_bindings() {
    let gen = VarGen::new();
    let x = gen.fresh();
    let cyclic = Term::compound("f", vec![Term::Var(x)]);
    let mut env = Environment::new();
    let mut trail = Trail::new();
    assert!(!unify(&Term::Var(x), &cyclic, &mut env, &mut trail, true));
    assert!(env.get(x).is_none());
}

#[test]
fn round_trip_for_ground_terms_leaves_environment_empty() {
    let t = Term::compound("f", vec![Term::atom("a"), Term::list(vec![Term::int(1), Term::int(2)], Term::nil())]);
    let mut env = Environment::new();
    let mut trail = Trail::new();
    assert!(unify(&t, &t, &mut env, &mut trail, false));
    assert!(env.is_empty());
}

#[test]
fn clause_ordering_follows_the_documented_index_merge() {
    let mut kb = KnowledgeBase::new();
    let fact = |first: Term| Clause::fact(Compound::new(prolog_ir::intern("p"), vec![first, Term::atom("_")]));
    let gen = VarGen::new();

    kb.add_clause(fact(Term::atom("a")));
    kb.add_clause(fact(Term::Var(gen.fresh())));
    kb.add_clause(fact(Term::atom("a")));
    kb.add_clause(fact(Term::atom("b")));

    let predicate = kb.predicate(prolog_ir::intern("p"), 2).unwrap();
    let for_a: Vec<_> = predicate.candidates(IndexKey::Atom(prolog_ir::intern("a"))).into_iter().collect();
    assert_eq!(for_a.len(), 3); // both "a" facts, then the variable-keyed one

    let for_variable_goal: Vec<_> = predicate.candidates(IndexKey::Wildcard).into_iter().collect();
    assert_eq!(for_variable_goal.len(), 4); // a goal variable must see every clause, in insertion order
}

#[test]
fn solution_ordering_is_deterministic_across_repeated_queries() {
    let mut session = Session::new(false);
    session.consult("likes(mary, wine).\nlikes(mary, cheese).\nlikes(john, wine).\n");
    let first = session.solve("likes(mary, X).", &["X"]);
    let second = session.solve("likes(mary, X).", &["X"]);
    assert_eq!(first, second);
    assert_eq!(first, vec![vec![Term::atom("wine")], vec![Term::atom("cheese")]]);
}

#[test]
fn arithmetic_agreement_between_is_and_self_comparison() {
    let exprs = [
        Term::compound("+", vec![Term::int(2), Term::int(3)]),
        Term::compound("*", vec![Term::float(1.5), Term::int(4)]),
        Term::compound("-", vec![Term::int(10), Term::int(3)]),
    ];
    let env = Environment::new();
    for expr in exprs {
        let value = evaluate(&expr, &env).unwrap();
        let other = evaluate(&expr, &env).unwrap();
        assert_eq!(value, other);
    }
}
