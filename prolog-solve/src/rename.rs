use prolog_ir::{Clause, Compound, Term, VarGen, VarId};
use rustc_hash::FxHashMap;

/// A clause with every variable replaced by a fresh id, so it cannot
/// collide with any variable used earlier in the current proof.
pub struct RenamedClause {
    pub head: Compound,
    pub body: Vec<Compound>,
}

/// Renames all variables in `clause`, using a rename map that is fresh for
/// this selection: two uses of the same clause within one proof get
/// distinct fresh variables, because `rename_clause` is called again
/// (with a fresh, empty map) each time the clause is tried.
pub fn rename_clause(clause: &Clause, var_gen: &VarGen) -> RenamedClause {
    let mut map = FxHashMap::default();
    RenamedClause {
        head: rename_compound(&clause.head, var_gen, &mut map),
        body: clause
            .body
            .iter()
            .map(|goal| rename_compound(goal, var_gen, &mut map))
            .collect(),
    }
}

fn rename_compound(c: &Compound, var_gen: &VarGen, map: &mut FxHashMap<VarId, VarId>) -> Compound {
    Compound::new(
        c.functor,
        c.args.iter().map(|a| rename_term(a, var_gen, map)).collect(),
    )
}

fn rename_term(term: &Term, var_gen: &VarGen, map: &mut FxHashMap<VarId, VarId>) -> Term {
    match term {
        Term::Var(v) => {
            let fresh = *map.entry(*v).or_insert_with(|| var_gen.fresh());
            Term::Var(fresh)
        }
        Term::Compound(c) => Term::Compound(rename_compound(c, var_gen, map)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_source_variable_gets_same_fresh_id_within_one_rename() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let head = Compound::new(prolog_ir::intern("p"), vec![Term::Var(x), Term::Var(x)]);
        let clause = Clause { head, body: vec![] };
        let renamed = rename_clause(&clause, &gen);
        match &renamed.head.args[..] {
            [Term::Var(a), Term::Var(b)] => assert_eq!(a, b),
            _ => panic!("expected two variable args"),
        }
    }

    #[test]
    fn two_renamings_of_the_same_clause_get_distinct_ids() {
        let gen = VarGen::new();
        let x = gen.fresh();
        let head = Compound::new(prolog_ir::intern("p"), vec![Term::Var(x)]);
        let clause = Clause { head, body: vec![] };
        let r1 = rename_clause(&clause, &gen);
        let r2 = rename_clause(&clause, &gen);
        let (Term::Var(a), Term::Var(b)) = (&r1.head.args[0], &r2.head.args[0]) else {
            panic!("expected variable args");
        };
        assert_ne!(a, b);
    }
}
