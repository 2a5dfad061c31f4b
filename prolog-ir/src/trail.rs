use crate::env::Environment;
use crate::var::VarId;

/// A LIFO record of the variables bound on one resolution branch.
///
/// Branch environments are clones (see the resolver), so in the common
/// case a failed branch is simply dropped rather than unwound. The trail
/// is still exposed because some builtins -- `\=/2` in particular --
/// attempt a unification in a throwaway environment and need to discard
/// exactly the bindings that attempt made, which `unwind` does.
#[derive(Debug, Default)]
pub struct Trail {
    stack: Vec<VarId>,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    /// Records that `var` was just bound.
    pub fn push(&mut self, var: VarId) {
        self.stack.push(var);
    }

    /// A resumable point on the trail; pair with `unwind_to`.
    pub fn mark(&self) -> usize {
        self.stack.len()
    }

    /// Pops every id recorded since `mark` and removes its binding from
    /// `env`. Idempotent once the trail is back down to `mark`.
    pub fn unwind_to(&mut self, mark: usize, env: &mut Environment) {
        while self.stack.len() > mark {
            let var = self.stack.pop().expect("checked len > mark above");
            env.unbind(var);
        }
    }

    /// Unwinds the whole trail.
    pub fn unwind(&mut self, env: &mut Environment) {
        self.unwind_to(0, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;
    use crate::var::VarGen;

    #[test]
    fn unwind_restores_prior_state() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let y = gen.fresh();
        let mut env = Environment::new();
        let mut trail = Trail::new();

        let mark = trail.mark();
        env.bind(x, Term::atom("a"));
        trail.push(x);
        assert_eq!(env.len(), 1);

        env.bind(y, Term::atom("b"));
        trail.push(y);
        assert_eq!(env.len(), 2);

        trail.unwind_to(mark, &mut env);
        assert_eq!(env.len(), 0);
        assert!(env.get(x).is_none());
        assert!(env.get(y).is_none());
    }

    #[test]
    fn partial_unwind_keeps_earlier_bindings() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let y = gen.fresh();
        let mut env = Environment::new();
        let mut trail = Trail::new();

        env.bind(x, Term::atom("a"));
        trail.push(x);
        let mark = trail.mark();

        env.bind(y, Term::atom("b"));
        trail.push(y);

        trail.unwind_to(mark, &mut env);
        assert_eq!(env.get(x), Some(&Term::atom("a")));
        assert!(env.get(y).is_none());
    }
}
