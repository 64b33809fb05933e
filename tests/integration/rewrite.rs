//! Parameter substitution and lambda specialization.

mod common;
use common::*;

use exprmap::expr::{BinaryOp, ExprKind};
use exprmap::visit::contains_node;
use exprmap::{Expr, Type, build_access, specialize, substitute};

fn add_xy(p1: &Expr, p2: &Expr) -> Expr {
    Expr::binary(BinaryOp::Add, field(p1, "X"), field(p2, "Y"), Type::Int)
}

#[test]
fn specialize_two_parameters() {
    let p1 = param("p1", point());
    let p2 = param("p2", point());
    let lambda = Expr::lambda(vec![p1.clone(), p2.clone()], add_xy(&p1, &p2));

    let r1 = param("r1", point());
    let r2 = param("r2", point());
    let out = specialize(lambda.as_lambda().unwrap(), &[r1.clone(), r2.clone()]);

    assert_eq!(out, add_xy(&r1, &r2));
    assert_eq!(out.to_string(), "(r1.X + r2.Y)");
}

#[test]
fn specialize_with_no_replacements_returns_body() {
    let p = param("p", point());
    let body = field(&p, "X");
    let lambda = Expr::lambda(vec![p], body.clone());
    let out = specialize(lambda.as_lambda().unwrap(), &[]);
    assert!(out.same_node(&body));
}

#[test]
fn specialize_with_constant_replacement() {
    let p = param("p", point());
    let lambda = Expr::lambda(vec![p.clone()], Expr::call("Abs", vec![field(&p, "X")], Type::Int));
    let origin = Expr::constant(exprmap::Value::Null, point());
    let out = specialize(lambda.as_lambda().unwrap(), &[origin]);
    assert_eq!(out.to_string(), "Abs(null.X)");
}

#[test]
fn substitute_without_match_shares_whole_tree() {
    let p = param("p", point());
    let tree = Expr::conditional(
        Expr::binary(BinaryOp::Gt, field(&p, "X"), int(0), Type::Bool),
        field(&p, "Y"),
        int(0),
    );
    let stranger = param("p", point());
    let out = substitute(&tree, &stranger, &int(1));
    assert!(out.same_node(&tree));
    assert_eq!(out, tree);
}

#[test]
fn substitute_reapplied_is_identity() {
    let p = param("p", point());
    let q = param("q", point());
    let tree = add_xy(&p, &p);
    let once = substitute(&tree, &p, &q);
    let twice = substitute(&once, &p, &q);
    assert!(twice.same_node(&once));
}

#[test]
fn substitute_descends_into_nested_lambdas() {
    let outer = param("o", point());
    let inner = param("i", point());
    let nested = Expr::lambda(vec![inner.clone()], add_xy(&outer, &inner));
    let tree = Expr::call("Select", vec![outer.clone(), nested], Type::Object);

    let r = param("r", point());
    let out = substitute(&tree, &outer, &r);
    assert!(!contains_node(&out, &outer));
    assert!(contains_node(&out, &inner));

    let ExprKind::Call { args, .. } = out.kind() else { panic!("expected call") };
    let lambda = args[1].as_lambda().unwrap();
    assert!(lambda.params[0].same_node(&inner));
    assert_eq!(lambda.body.to_string(), "(r.X + i.Y)");
}

#[test]
fn substitute_whole_subtree_by_identity() {
    let reg = registry();
    let x = param("x", customer());
    let city = build_access(&reg, &x, "Address.City").unwrap();
    let name = build_access(&reg, &x, "Name").unwrap();
    let tree = Expr::call("Describe", vec![city.clone(), name.clone()], Type::String);

    let replacement = Expr::opaque("cached_city", Type::class("City"));
    let out = substitute(&tree, &city, &replacement);
    assert_eq!(out.to_string(), "Describe(<cached_city>, x.Name)");

    let ExprKind::Call { args, .. } = out.kind() else { panic!("expected call") };
    assert!(args[1].same_node(&name));
}

#[test]
fn input_tree_is_untouched() {
    let p = param("p", point());
    let tree = add_xy(&p, &p);
    let before = tree.to_string();
    let _ = substitute(&tree, &p, &param("q", point()));
    assert_eq!(tree.to_string(), before);
    assert!(contains_node(&tree, &p));
}
