use prolog_ir::{Environment, Term, Trail, VarId};

/// Robinson unification with an optional occurs-check, following `t1` and
/// `t2` through `env`'s current bindings and extending `env`/`trail` with
/// whatever new bindings make them equal.
///
/// On success, every binding made is recorded on `trail` and `env` has
/// been extended. On failure, partial bindings made before the failing
/// step are *not* rolled back here -- callers in this engine always
/// attempt unification against a freshly cloned branch environment and
/// simply discard it on failure (see the resolver), so there is nothing
/// to undo in the common path. A caller that does need undo semantics
/// (`\=/2` is the one builtin that does) uses `trail.unwind` itself.
pub fn unify(t1: &Term, t2: &Term, env: &mut Environment, trail: &mut Trail, occurs_check: bool) -> bool {
    let a = env.deref(t1);
    let b = env.deref(t2);
    match (a, b) {
        (Term::Var(v1), Term::Var(v2)) if v1 == v2 => true,

        (Term::Var(v), other) | (other, Term::Var(v)) => {
            if occurs_check && occurs(v, &other, env) {
                return false;
            }
            env.bind(v, other);
            trail.push(v);
            true
        }

        (Term::Atom(a1), Term::Atom(a2)) => a1 == a2,

        (Term::Number(n1), Term::Number(n2)) => n1 == n2,

        (Term::Compound(c1), Term::Compound(c2)) => {
            if c1.functor != c2.functor || c1.args.len() != c2.args.len() {
                return false;
            }
            c1.args
                .iter()
                .zip(c2.args.iter())
                .all(|(x, y)| unify(x, y, env, trail, occurs_check))
        }

        _ => false,
    }
}

/// Whether `var` occurs, after dereferencing, anywhere inside `term`.
fn occurs(var: VarId, term: &Term, env: &Environment) -> bool {
    match env.deref(term) {
        Term::Var(v) => v == var,
        Term::Compound(c) => c.args.iter().any(|a| occurs(var, a, env)),
        _ => false,
    }
}

/// Unifies two compounds of the same functor/arity (e.g. a goal against a
/// clause head) argument-by-argument. Fails immediately on a functor or
/// arity mismatch without touching `env`.
pub fn unify_compound(
    a: &prolog_ir::Compound,
    b: &prolog_ir::Compound,
    env: &mut Environment,
    trail: &mut Trail,
    occurs_check: bool,
) -> bool {
    if a.functor != b.functor || a.args.len() != b.args.len() {
        return false;
    }
    a.args
        .iter()
        .zip(b.args.iter())
        .all(|(x, y)| unify(x, y, env, trail, occurs_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prolog_ir::VarGen;

    #[test]
    fn ground_terms_unify_with_empty_environment() {
        let t = Term::compound("f", vec![Term::atom("a"), Term::int(1)]);
        let mut env = Environment::new();
        let mut trail = Trail::new();
        assert!(unify(&t, &t, &mut env, &mut trail, false));
        assert!(env.is_empty());
    }

    #[test]
    fn unification_is_symmetric() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let t1 = Term::Var(x);
        let t2 = Term::compound("f", vec![Term::atom("a")]);

        let mut env1 = Environment::new();
        let mut trail1 = Trail::new();
        assert!(unify(&t1, &t2, &mut env1, &mut trail1, false));

        let mut env2 = Environment::new();
        let mut trail2 = Trail::new();
        assert!(unify(&t2, &t1, &mut env2, &mut trail2, false));

        assert_eq!(env1.apply(&t1), env2.apply(&t1));
    }

    #[test]
    fn occurs_check_rejects_self_reference() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let cyclic = Term::compound("f", vec![Term::Var(x)]);

        let mut env = Environment::new();
        let mut trail = Trail::new();
        assert!(!unify(&Term::Var(x), &cyclic, &mut env, &mut trail, true));

        let mut env2 = Environment::new();
        let mut trail2 = Trail::new();
        assert!(unify(&Term::Var(x), &cyclic, &mut env2, &mut trail2, false));
    }

    #[test]
    fn int_and_float_compare_by_value() {
        let mut env = Environment::new();
        let mut trail = Trail::new();
        assert!(unify(&Term::int(2), &Term::float(2.0), &mut env, &mut trail, false));
    }
}
