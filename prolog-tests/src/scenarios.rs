#![cfg(test)]

use crate::test_util::{assert_lines_eq, Session};
use prolog_ir::Term;

const FAMILY: &str = "
    parent(tom, bob).
    parent(bob, ann).
    parent(bob, pat).
";

const APPEND: &str = "
    append([], L, L).
    append([H|T], L, [H|R]) :- append(T, L, R).
";

#[test]
fn scenario_a_family_facts() {
    let mut session = Session::new(false);
    session.consult(FAMILY);
    let solutions = session.solve("parent(bob, X).", &["X"]);
    assert_eq!(solutions, vec![vec![Term::atom("ann")], vec![Term::atom("pat")]]);
}

#[test]
fn scenario_b_append_builds_one_list() {
    let mut session = Session::new(false);
    session.consult(APPEND);
    let solutions = session.solve("append([1,2], [3,4], Z).", &["Z"]);
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0][0],
        Term::list(vec![Term::int(1), Term::int(2), Term::int(3), Term::int(4)], Term::nil())
    );
}

#[test]
fn scenario_c_append_as_nondeterministic_split() {
    let mut session = Session::new(false);
    session.consult(APPEND);
    let solutions = session.solve("append(X, Y, [1,2,3]).", &["X", "Y"]);

    let expected = vec![
        vec![Term::nil(), Term::list(vec![Term::int(1), Term::int(2), Term::int(3)], Term::nil())],
        vec![
            Term::list(vec![Term::int(1)], Term::nil()),
            Term::list(vec![Term::int(2), Term::int(3)], Term::nil()),
        ],
        vec![
            Term::list(vec![Term::int(1), Term::int(2)], Term::nil()),
            Term::list(vec![Term::int(3)], Term::nil()),
        ],
        vec![Term::list(vec![Term::int(1), Term::int(2), Term::int(3)], Term::nil()), Term::nil()],
    ];
    assert_eq!(solutions, expected);
}

#[test]
fn scenario_d_arithmetic() {
    let session = Session::new(false);
    assert_eq!(session.solve("X is (2+3)*4.", &["X"]), vec![vec![Term::int(20)]]);
    assert_eq!(session.solve("Y is 2^3^2.", &["Y"]), vec![vec![Term::int(512)]]);
    assert_eq!(session.count_solutions("Z is 1/0."), 0);
}

#[test]
fn scenario_e_type_tests() {
    let session = Session::new(false);
    assert_eq!(
        session.solve("var(X), X=5, nonvar(X), number(X).", &["X"]),
        vec![vec![Term::int(5)]]
    );
    assert_eq!(session.count_solutions("atom(5)."), 0);
}

#[test]
fn scenario_f_occurs_check_difference() {
    let without_occurs_check = Session::new(false);
    assert_eq!(without_occurs_check.count_solutions("X = f(X)."), 1);

    let with_occurs_check = Session::new(true);
    assert_eq!(with_occurs_check.count_solutions("X = f(X)."), 0);
}

#[test]
fn listing_reports_loaded_predicates_sorted_by_signature() {
    let mut session = Session::new(false);
    session.consult(FAMILY).consult(APPEND);
    let listing = session.engine.kb().list_predicates().join("\n");
    assert_lines_eq("append/3\nparent/2", &listing);
}
