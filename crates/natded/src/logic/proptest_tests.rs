//! Property-based tests for formula primitives using proptest.

use super::{Formula, Term};
use proptest::prelude::*;

/// Generate a random closed propositional formula of bounded depth.
fn arb_propositional(max_depth: u32) -> BoxedStrategy<Formula> {
    let leaf = prop_oneof![
        (0..4u8).prop_map(|i| Formula::atom(format!("P{}", i))),
        (0..4u8).prop_map(|i| Formula::predicate(format!("P{}", i), vec![])),
        Just(Formula::False),
    ];
    leaf.prop_recursive(max_depth, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::negation),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::implies(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Formula::iff(l, r)),
        ]
    })
    .boxed()
}

/// Generate a random first-order formula over one variable `x` and two
/// constants, possibly wrapped in quantifiers.
fn arb_first_order(max_depth: u32) -> BoxedStrategy<Formula> {
    let term = prop_oneof![
        Just(Term::variable("x")),
        Just(Term::constant("a")),
        Just(Term::constant("b")),
    ];
    let leaf = (0..2u8, proptest::collection::vec(term, 1..=2))
        .prop_map(|(p, args)| Formula::predicate(format!("P{}", p), args));
    leaf.prop_recursive(max_depth, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::negation),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::implies(l, r)),
            inner.clone().prop_map(|body| Formula::exists("x", body)),
            inner.prop_map(|body| Formula::forall("x", body)),
        ]
    })
    .boxed()
}

proptest! {
    #[test]
    fn prop_double_flip_strips_double_negation(f in arb_propositional(4)) {
        let twice = f.flip().flip();
        match &f {
            Formula::Not(inner) if inner.is_negation() => prop_assert_eq!(twice, inner.flip()),
            _ => prop_assert_eq!(twice, f),
        }
    }

    #[test]
    fn prop_flip_adds_or_removes_one_negation(f in arb_propositional(4)) {
        let flipped = f.flip();
        match &f {
            Formula::Not(inner) => prop_assert_eq!(&flipped, &**inner),
            _ => prop_assert_eq!(flipped, Formula::negation(f.clone())),
        }
    }

    #[test]
    fn prop_equality_matches_canonical_string(f in arb_propositional(3), g in arb_propositional(3)) {
        prop_assert_eq!(f == g, f.to_string() == g.to_string());
    }

    #[test]
    fn prop_substitution_closes_formula(f in arb_first_order(3)) {
        let closed = f.substitute("x", &Term::constant("c"));
        prop_assert!(closed.is_closed());
        prop_assert!(!closed.free_variables().contains("x"));
    }

    #[test]
    fn prop_substitution_is_an_instance(f in arb_first_order(3)) {
        let c = Term::constant("c");
        let instance = f.substitute("x", &c);
        let witness = f.instance_witness("x", &instance);
        prop_assert!(witness.is_some());
        if let Some(Some(term)) = witness {
            prop_assert_eq!(term, c);
        }
    }
}
