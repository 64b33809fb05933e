//! Property-based tests for identity-based substitution.

use proptest::prelude::*;

use exprmap::expr::BinaryOp;
use exprmap::visit::contains_node;
use exprmap::{Expr, Type, Value, substitute};

/// Shape of a generated tree; parameters are drawn from a fixed pool by index.
#[derive(Debug, Clone)]
enum Shape {
    Param(usize),
    Const(i64),
    Add(Box<Shape>, Box<Shape>),
    Call(Vec<Shape>),
    Cond(Box<Shape>, Box<Shape>, Box<Shape>),
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0usize..3).prop_map(Shape::Param),
        (-100i64..100).prop_map(Shape::Const),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Add(Box::new(a), Box::new(b))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Call),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(a, b, c)| Shape::Cond(Box::new(a), Box::new(b), Box::new(c))),
        ]
    })
}

fn build(shape: &Shape, params: &[Expr]) -> Expr {
    match shape {
        Shape::Param(i) => params[*i].clone(),
        Shape::Const(n) => Expr::constant(Value::Int(*n), Type::Int),
        Shape::Add(a, b) => Expr::binary(BinaryOp::Add, build(a, params), build(b, params), Type::Int),
        Shape::Call(args) => Expr::call("f", args.iter().map(|a| build(a, params)).collect(), Type::Int),
        Shape::Cond(t, a, b) => Expr::conditional(build(t, params), build(a, params), build(b, params)),
    }
}

fn pool() -> Vec<Expr> {
    (0..3).map(|i| Expr::parameter(format!("p{i}"), Type::Int)).collect()
}

proptest! {
    /// Property: substituting a node that does not occur returns the very same tree.
    #[test]
    fn no_match_preserves_identity(shape in arb_shape()) {
        let params = pool();
        let tree = build(&shape, &params);
        let stranger = Expr::parameter("p0", Type::Int);
        let out = substitute(&tree, &stranger, &Expr::parameter("q", Type::Int));
        prop_assert!(out.same_node(&tree));
    }

    /// Property: after substitution the old node is gone, and a second pass is a no-op.
    #[test]
    fn substitution_removes_old_and_is_stable(shape in arb_shape(), which in 0usize..3) {
        let params = pool();
        let tree = build(&shape, &params);
        let new = Expr::parameter("q", Type::Int);

        let once = substitute(&tree, &params[which], &new);
        prop_assert!(!contains_node(&once, &params[which]));
        prop_assert_eq!(contains_node(&once, &new), contains_node(&tree, &params[which]));

        let twice = substitute(&once, &params[which], &new);
        prop_assert!(twice.same_node(&once));
    }

    /// Property: substitution matches structurally what building with the replacement gives.
    #[test]
    fn substitution_equals_rebuilding(shape in arb_shape(), which in 0usize..3) {
        let params = pool();
        let tree = build(&shape, &params);
        let new = Expr::parameter("q", Type::Int);

        let mut swapped = params.clone();
        swapped[which] = new.clone();
        prop_assert_eq!(substitute(&tree, &params[which], &new), build(&shape, &swapped));
    }
}
