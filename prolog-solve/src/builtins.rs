//! The builtin predicate registry: a table keyed by `(name, arity)` that
//! the resolver consults before ever touching the knowledge base.

use crate::arith::evaluate;
use crate::engine::Engine;
use crate::unify::unify;
use prolog_ir::{intern, Atom, Compound, Environment, Term, Trail};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// The shape every builtin implements: given the goal's argument terms,
/// a handle to the engine, the current environment and trail, produce a
/// lazy stream of environments that satisfy it. Deterministic builtins
/// yield at most one.
pub type BuiltinFn =
    fn(&[Term], &Engine, Environment, &mut Trail) -> Box<dyn Iterator<Item = Environment>>;

/// Metadata recorded alongside a builtin's implementation -- `meta` in the
/// external-interface contract is folded into `description` here, since
/// nothing in the core ever inspects it beyond documentation/tracing.
pub struct BuiltinEntry {
    pub name: Atom,
    pub arity: usize,
    pub deterministic: bool,
    pub description: &'static str,
    pub implementation: BuiltinFn,
}

#[derive(Default)]
pub struct BuiltinRegistry {
    table: FxHashMap<(Atom, usize), BuiltinEntry>,
}

impl BuiltinRegistry {
    pub fn register(
        &mut self,
        name: &str,
        arity: usize,
        implementation: BuiltinFn,
        deterministic: bool,
        description: &'static str,
    ) {
        let atom = intern(name);
        self.table.insert(
            (atom, arity),
            BuiltinEntry {
                name: atom,
                arity,
                deterministic,
                description,
                implementation,
            },
        );
    }

    pub fn is_builtin(&self, goal: &Compound) -> bool {
        self.table.contains_key(&(goal.functor, goal.args.len()))
    }

    pub fn entry(&self, functor: Atom, arity: usize) -> Option<&BuiltinEntry> {
        self.table.get(&(functor, arity))
    }

    pub fn call(
        &self,
        goal: &Compound,
        engine: &Engine,
        env: Environment,
        trail: &mut Trail,
    ) -> Box<dyn Iterator<Item = Environment>> {
        let entry = &self.table[&(goal.functor, goal.args.len())];
        tracing::trace!(predicate = entry.description, "dispatching builtin");
        (entry.implementation)(&goal.args, engine, env, trail)
    }

    /// The mandatory builtins from the core, plus the `!/0`, `call/1` and
    /// `once/1` stubs: accepted as predicate names (so callers don't see
    /// an "unknown predicate" failure) but not functional -- see the
    /// design notes on cut and choice-point pruning.
    pub fn standard() -> Self {
        let mut reg = BuiltinRegistry::default();

        reg.register("true", 0, bi_true, true, "true/0");
        reg.register("fail", 0, bi_fail, true, "fail/0");

        reg.register("=", 2, bi_unify, true, "=/2");
        reg.register("\\=", 2, bi_not_unify, true, "\\=/2");

        reg.register("var", 1, bi_var, true, "var/1");
        reg.register("nonvar", 1, bi_nonvar, true, "nonvar/1");
        reg.register("atom", 1, bi_atom, true, "atom/1");
        reg.register("number", 1, bi_number, true, "number/1");
        reg.register("compound", 1, bi_compound, true, "compound/1");

        reg.register("is", 2, bi_is, true, "is/2");
        reg.register("=:=", 2, bi_arith_eq, true, "=:=/2");
        reg.register("=\\=", 2, bi_arith_neq, true, "=\\=/2");
        reg.register("<", 2, bi_lt, true, "</2");
        reg.register("=<", 2, bi_le, true, "=</2");
        reg.register(">", 2, bi_gt, true, ">/2");
        reg.register(">=", 2, bi_ge, true, ">=/2");

        reg.register("!", 0, bi_cut_stub, true, "!/0 (stub: always succeeds)");
        reg.register("call", 1, bi_noop_stub, true, "call/1 (stub: always fails)");
        reg.register("once", 1, bi_noop_stub, true, "once/1 (stub: always fails)");

        reg
    }
}

fn yield_one(env: Environment) -> Box<dyn Iterator<Item = Environment>> {
    Box::new(std::iter::once(env))
}

fn yield_none() -> Box<dyn Iterator<Item = Environment>> {
    Box::new(std::iter::empty())
}

fn bi_true(_args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    yield_one(env)
}

fn bi_fail(_args: &[Term], _engine: &Engine, _env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    yield_none()
}

fn bi_unify(args: &[Term], engine: &Engine, mut env: Environment, trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if unify(&args[0], &args[1], &mut env, trail, engine.occurs_check()) {
        yield_one(env)
    } else {
        yield_none()
    }
}

fn bi_not_unify(args: &[Term], engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    // Attempt the unification in a throwaway environment/trail, per the
    // contract: yield the *original* env iff that attempt fails.
    let mut scratch_env = env.clone();
    let mut scratch_trail = Trail::new();
    let would_unify = unify(&args[0], &args[1], &mut scratch_env, &mut scratch_trail, engine.occurs_check());
    scratch_trail.unwind(&mut scratch_env);
    if would_unify {
        yield_none()
    } else {
        yield_one(env)
    }
}

fn bi_var(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if matches!(env.deref(&args[0]), Term::Var(_)) {
        yield_one(env)
    } else {
        yield_none()
    }
}

fn bi_nonvar(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if matches!(env.deref(&args[0]), Term::Var(_)) {
        yield_none()
    } else {
        yield_one(env)
    }
}

fn bi_atom(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if matches!(env.deref(&args[0]), Term::Atom(_)) {
        yield_one(env)
    } else {
        yield_none()
    }
}

fn bi_number(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if matches!(env.deref(&args[0]), Term::Number(_)) {
        yield_one(env)
    } else {
        yield_none()
    }
}

fn bi_compound(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    if matches!(env.deref(&args[0]), Term::Compound(_)) {
        yield_one(env)
    } else {
        yield_none()
    }
}

fn bi_is(args: &[Term], _engine: &Engine, mut env: Environment, trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match evaluate(&args[1], &env) {
        Ok(value) => {
            if unify(&args[0], &Term::Number(value), &mut env, trail, false) {
                yield_one(env)
            } else {
                yield_none()
            }
        }
        Err(_) => yield_none(),
    }
}

fn arith_compare(args: &[Term], env: &Environment) -> Option<Ordering> {
    let a = evaluate(&args[0], env).ok()?;
    let b = evaluate(&args[1], env).ok()?;
    a.as_f64().partial_cmp(&b.as_f64())
}

fn bi_arith_eq(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Equal) => yield_one(env),
        _ => yield_none(),
    }
}

fn bi_arith_neq(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Equal) | None => yield_none(),
        Some(_) => yield_one(env),
    }
}

fn bi_lt(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Less) => yield_one(env),
        _ => yield_none(),
    }
}

fn bi_le(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Less) | Some(Ordering::Equal) => yield_one(env),
        _ => yield_none(),
    }
}

fn bi_gt(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Greater) => yield_one(env),
        _ => yield_none(),
    }
}

fn bi_ge(args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    match arith_compare(args, &env) {
        Some(Ordering::Greater) | Some(Ordering::Equal) => yield_one(env),
        _ => yield_none(),
    }
}

/// `!/0`: stubbed as "always succeeds" -- the reference design does not
/// give the resolver a choice-point stack to prune, so cut here is
/// indistinguishable from `true/0`. See the design notes.
fn bi_cut_stub(_args: &[Term], _engine: &Engine, env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    yield_one(env)
}

/// `call/1` and `once/1`: accepted names, not yet functional. A correct
/// `call/1` needs a re-entrant `solve` that resolves its argument goal
/// against the *current* environment (see the design notes); wiring
/// that up is future work, not part of this core. Matches the ground
/// truth's stub (a generator that returns before ever yielding): always
/// fails rather than always succeeds.
fn bi_noop_stub(_args: &[Term], _engine: &Engine, _env: Environment, _trail: &mut Trail) -> Box<dyn Iterator<Item = Environment>> {
    yield_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn true_yields_one_solution_fail_yields_none() {
        let engine = Engine::new(false);
        let env = Environment::new();
        let mut trail = Trail::new();
        assert_eq!(bi_true(&[], &engine, env.clone(), &mut trail).count(), 1);
        assert_eq!(bi_fail(&[], &engine, env, &mut trail).count(), 0);
    }

    #[test]
    fn not_unify_fails_when_terms_unify() {
        let engine = Engine::new(false);
        let mut trail = Trail::new();
        let args = [Term::atom("a"), Term::atom("a")];
        assert_eq!(bi_not_unify(&args, &engine, Environment::new(), &mut trail).count(), 0);

        let args = [Term::atom("a"), Term::atom("b")];
        assert_eq!(bi_not_unify(&args, &engine, Environment::new(), &mut trail).count(), 1);
    }

    #[test]
    fn type_tests_deref_before_inspecting() {
        let engine = Engine::new(false);
        let mut env = Environment::new();
        let mut trail = Trail::new();
        let x = engine.var_gen().fresh();
        unify(&Term::Var(x), &Term::int(5), &mut env, &mut trail, false);

        assert_eq!(bi_var(&[Term::Var(x)], &engine, env.clone(), &mut trail).count(), 0);
        assert_eq!(bi_nonvar(&[Term::Var(x)], &engine, env.clone(), &mut trail).count(), 1);
        assert_eq!(bi_number(&[Term::Var(x)], &engine, env, &mut trail).count(), 1);
    }
}
