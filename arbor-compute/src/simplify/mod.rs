//! Heuristic simplification of expression trees.
//!
//! [`simplify`] runs three rewriting passes in rotation until none of them changes the tree:
//! constant folding, algebraic identities, and commutative reordering. The result is not a
//! canonical form; the passes aim for the expression a person would write, and they reach a fixed
//! point within a few rounds on typical input.
//!
//! [`distribute`] is a separate, opt-in pass that multiplies products out over sums, which is
//! occasionally wanted and usually not.

mod distribute;
mod fold;
mod identity;
mod reorder;

use crate::tree::{rewrite::rewrite, Tree};

/// An upper bound on rewriting rounds, in case a rule pair ever feeds each other. Convergence is
/// normally reached in two or three rounds.
const MAX_ROUNDS: usize = 8;

/// Simplifies the tree, returning a new tree. The input is not modified.
pub fn simplify(tree: &Tree) -> Tree {
    let mut tree = tree.clone();
    for _ in 0..MAX_ROUNDS {
        let mut changed = false;
        changed |= rewrite(&mut tree, &mut fold::Fold);
        changed |= rewrite(&mut tree, &mut identity::Identity);
        changed |= rewrite(&mut tree, &mut reorder::Reorder);
        if !changed {
            break;
        }
    }
    // drop the nodes the rewrites detached
    tree.clone()
}

/// Distributes products over sums, returning a new tree: `a * (b + c)` becomes
/// `a * b + a * c`, recursively. Subtraction keeps its operand order. The input is not modified.
pub fn distribute(tree: &Tree) -> Tree {
    let mut tree = tree.clone();
    for _ in 0..MAX_ROUNDS {
        if !rewrite(&mut tree, &mut distribute::Distribute) {
            break;
        }
    }
    tree.clone()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use crate::{ctxt::Ctxt, eval::evaluate, value::Value};
    use super::*;

    fn simplified(source: &str) -> String {
        simplify(&Tree::parse(source, &Ctxt::default()).unwrap()).to_string()
    }

    #[test]
    fn constant_folding() {
        assert_eq!(simplified("2 * 3 + 4"), "10");
        assert_eq!(simplified("2^3^2"), "512");
        assert_eq!(simplified("conj(5)"), "5");
        assert_eq!(simplified("[1 + 1, 2 * 2]"), "[2, 4]");
    }

    #[test]
    fn annihilators_and_identities() {
        assert_eq!(simplified("x * 0"), "0");
        assert_eq!(simplified("0 * x"), "0");
        assert_eq!(simplified("x^0"), "1");
        assert_eq!(simplified("x^1"), "x");
        assert_eq!(simplified("x + 0"), "x");
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x - 0"), "x");
        assert_eq!(simplified("1 * x"), "x");
        assert_eq!(simplified("x / 1"), "x");
        assert_eq!(simplified("0 / x"), "0");
        assert_eq!(simplified("1^x"), "1");
        assert_eq!(simplified("0^x"), "0");
    }

    #[test]
    fn division_by_zero_folds_to_nan() {
        assert_eq!(simplified("x / 0"), "NaN");
        assert_eq!(simplified("1 / 0"), "NaN");
    }

    #[test]
    fn double_inverses_cancel() {
        assert_eq!(simplified("-(-x)"), "x");
        assert_eq!(simplified("m''"), "m");
    }

    #[test]
    fn literal_indexing() {
        assert_eq!(simplified("[10, 20, 30][2]"), "30");
        assert_eq!(simplified("[1, 2; 3, 4][0, 1]"), "2");
        // out-of-bounds indexing is left for evaluation to report
        assert_eq!(simplified("[10, 20][9]"), "[10, 20][9]");
    }

    #[test]
    fn commutative_reordering() {
        assert_eq!(simplified("x * 2"), "2 * x");
        assert_eq!(simplified("x + pi"), "pi + x");
        assert_eq!(simplified("x * 2 + 1"), "2 * x + 1");
    }

    #[test]
    fn identities_cascade() {
        assert_eq!(simplified("(x + 0) * (1 * y)"), "x * y");
        assert_eq!(simplified("(x * 0) + y^1"), "y");
    }

    #[test]
    fn simplification_preserves_value() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::Real(1.7));
        ctxt.add_var("y", Value::Real(-0.4));

        for source in [
            "x * 1 + 0 * y",
            "(x + y)^2 - 2 * x * y",
            "sin(x)^2 + cos(x)^2 + x * 0",
            "x / 1 + y^1 + 3 * 4",
        ] {
            let tree = Tree::parse(source, &ctxt).unwrap();
            let before = evaluate(&tree, &ctxt).unwrap();
            let after = evaluate(&simplify(&tree), &ctxt).unwrap();
            let (Value::Real(a), Value::Real(b)) = (before, after) else {
                panic!("expected real results for {}", source);
            };
            assert_float_absolute_eq!(a, b, 1e-12);
        }
    }

    #[test]
    fn simplification_converges() {
        for source in [
            "x * 2 + 0 * y",
            "(x + 1) * (x - 1) + 1",
            "-(-x) + x^1 * 1",
        ] {
            let tree = Tree::parse(source, &Ctxt::default()).unwrap();
            let once = simplify(&tree);
            let twice = simplify(&once);
            assert_eq!(once.to_string(), twice.to_string(), "{}", source);
        }
    }

    #[test]
    fn distribution() {
        let ctxt = Ctxt::default();
        let tree = Tree::parse("2 * (x + y)", &ctxt).unwrap();
        assert_eq!(distribute(&tree).to_string(), "2 * x + 2 * y");

        let tree = Tree::parse("2 * (x - y)", &ctxt).unwrap();
        assert_eq!(distribute(&tree).to_string(), "2 * x - 2 * y");

        let tree = Tree::parse("(a + b) * c", &ctxt).unwrap();
        assert_eq!(distribute(&tree).to_string(), "a * c + b * c");
    }

    #[test]
    fn distribution_preserves_value() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::Real(2.5));
        ctxt.add_var("y", Value::Real(-3.0));
        ctxt.add_var("z", Value::Real(0.5));

        for source in ["(x + y) * (y + z)", "x * (y - z) * (x + 1)"] {
            let tree = Tree::parse(source, &ctxt).unwrap();
            let before = evaluate(&tree, &ctxt).unwrap();
            let after = evaluate(&distribute(&tree), &ctxt).unwrap();
            let (Value::Real(a), Value::Real(b)) = (before, after) else {
                panic!("expected real results for {}", source);
            };
            assert_float_absolute_eq!(a, b, 1e-12);
        }
    }

    #[test]
    fn derivatives_fold_after_simplifying() {
        let ctxt = Ctxt::default();
        let tree = Tree::parse("x^3", &ctxt).unwrap();
        let derivative = crate::derivative::derive(&tree, "x").unwrap();
        assert_eq!(simplify(&derivative).to_string(), "x^2 * 3");
    }
}
