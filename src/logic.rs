use itertools::Itertools;
use varisat::{Lit, Var};

/// Clauses stating that no three of `vars` are true.
pub(crate) fn no_three(vars: &[Var]) -> Vec<Vec<Lit>> {
    vars.iter()
        .combinations(3)
        .map(|selection| selection.iter().map(|var| var.negative()).collect_vec())
        .collect_vec()
}

/// Clauses stating that no one of `vars` is true on its own; i.e. if any is true, another is too.
pub(crate) fn never_alone(vars: &[Var]) -> Vec<Vec<Lit>> {
    // X => Y + Z + ...
    // = !X + Y + Z + ...
    vars.iter()
        .map(|x| vars.iter()
            .map(|other| other.lit(other != x))
            .collect_vec())
        .collect_vec()
}

/// Clauses stating that a vertex with incident edges `vars` has degree 0 or 2.
pub(crate) fn degree_zero_or_two(vars: &[Var]) -> Vec<Vec<Lit>> {
    let mut clauses = no_three(vars);
    clauses.extend(never_alone(vars));
    clauses
}

/// Clauses stating that exactly two of `vars` are true.
pub(crate) fn exactly_two(vars: &[Var]) -> Vec<Vec<Lit>> {
    let mut clauses = no_three(vars);
    // at least two: every choice of all-but-one contains a true var
    clauses.extend(vars.iter()
        .combinations(vars.len().saturating_sub(1))
        .map(|selection| selection.iter().map(|var| var.positive()).collect_vec()));
    clauses
}

/// `a <=> b`
pub(crate) fn equivalent(a: Var, b: Var) -> Vec<Vec<Lit>> {
    vec![
        vec![a.negative(), b.positive()],
        vec![a.positive(), b.negative()],
    ]
}

/// `a XOR b`
pub(crate) fn exactly_one_of(a: Var, b: Var) -> Vec<Vec<Lit>> {
    vec![
        vec![a.positive(), b.positive()],
        vec![a.negative(), b.negative()],
    ]
}
