//! Member-path walking against a schema-loaded registry.

mod common;
use common::*;

use exprmap::expr::BinaryOp;
use exprmap::path::chain_root;
use exprmap::{
    Expr, ExprError, Type, build_access, is_member_path, member_chain, member_path, resolve_path,
};

#[test]
fn selector_over_parameter_is_member_path() {
    let x = param("x", customer());
    let body = build_access(&registry(), &x, "Address.City").unwrap();
    let selector = Expr::lambda(vec![x], body);
    assert!(is_member_path(selector.as_lambda().unwrap()));
}

#[test]
fn function_call_over_path_is_not_member_path() {
    let x = param("x", customer());
    let city = build_access(&registry(), &x, "Address.City").unwrap();
    let body = Expr::call("SomeFunction", vec![city], Type::String);
    let selector = Expr::lambda(vec![x], body);
    assert!(!is_member_path(selector.as_lambda().unwrap()));
}

#[test]
fn path_rooted_at_second_parameter_is_not_member_path() {
    let x = param("x", customer());
    let y = param("y", customer());
    let body = build_access(&registry(), &y, "Name").unwrap();
    let selector = Expr::lambda(vec![x, y], body);
    assert!(!is_member_path(selector.as_lambda().unwrap()));
}

#[test]
fn arithmetic_on_path_is_not_member_path() {
    let x = param("x", customer());
    let age = build_access(&registry(), &x, "Age").unwrap();
    let body = Expr::binary(BinaryOp::Add, age, int(1), Type::Int);
    let selector = Expr::lambda(vec![x], body);
    assert!(!is_member_path(selector.as_lambda().unwrap()));
}

#[test]
fn build_then_walk_reproduces_path() {
    let reg = registry();
    let x = param("x", customer());
    for path in ["Name", "Address.Street", "Address.City.Zip", "Address.City.Name"] {
        let e = build_access(&reg, &x, path).unwrap();
        assert_eq!(member_path(&e).as_deref(), Some(path));
        assert_eq!(member_chain(&e).count(), path.split('.').count());
        assert!(chain_root(&e).unwrap().same_node(&x));
    }
}

#[test]
fn built_access_has_leaf_member_type() {
    let e = build_access(&registry(), &param("x", customer()), "Address.City.Zip").unwrap();
    assert_eq!(e.ty(), &Type::Int);
    assert_eq!(e.to_string(), "x.Address.City.Zip");
}

#[test]
fn unknown_segment_fails_fast() {
    let err = build_access(&registry(), &param("x", customer()), "Address.Country.Name").unwrap_err();
    match err {
        ExprError::MemberNotFound { ty, name } => {
            assert_eq!(ty, Type::class("Address"));
            assert_eq!(name, "Country");
        }
        other => panic!("expected MemberNotFound, got {other:?}"),
    }
}

#[test]
fn members_on_primitive_fail() {
    let err = build_access(&registry(), &param("x", customer()), "Name.Length").unwrap_err();
    assert!(matches!(err, ExprError::MemberNotFound { ty: Type::String, .. }));
}

#[test]
fn resolve_path_is_lazy() {
    let reg = registry();
    let mut members = resolve_path(&reg, &customer(), "Address.Bogus");
    let first = members.next().unwrap().unwrap();
    assert_eq!(first.name(), "Address");
    assert!(members.next().unwrap().is_err());
    assert!(members.next().is_none());
}

#[test]
fn constant_rooted_chain_walks_to_constant() {
    let holder = exprmap::build_constant(exprmap::Value::Int(1), Type::Int, true);
    let (object, _) = holder.as_member().unwrap();
    assert!(chain_root(&holder).unwrap().same_node(object));
    assert_eq!(member_path(&holder).as_deref(), Some("Value"));
}

#[test]
fn path_walks_through_nullable_reference() {
    let reg = exprmap::TypeRegistry::from_toml_str(
        r#"
        [classes.Customer]
        properties = { Address = "Address?" }

        [classes.Address]
        properties = { City = "City" }

        [classes.City]
        fields = { Name = "string" }
        "#,
    )
    .unwrap();
    let x = param("x", customer());

    let e = build_access(&reg, &x, "Address.City.Name").unwrap();
    assert_eq!(member_path(&e), Some("Address.City.Name".to_string()));
    assert_eq!(e.ty(), &Type::String);
    assert!(chain_root(&e).unwrap().same_node(&x));

    let city = build_access(&reg, &x, "Address.City").unwrap();
    assert_eq!(city.ty(), &Type::class("City"));

    let err = build_access(&reg, &x, "Address.Zip").unwrap_err();
    assert!(matches!(err, ExprError::MemberNotFound { ref name, .. } if name == "Zip"));
}
