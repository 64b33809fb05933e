//! Detecting "effectively constant" expressions and rebuilding them under a
//! different type.
//!
//! A value captured by a lambda usually reaches the tree as a member access
//! into a constant (a closure environment, or a [`BoxHolder`]), not as a bare
//! literal. Both shapes count as constant here, and a rebuilt constant keeps
//! the shape it was found in. Query backends that cache translated trees by
//! shape see `Holder<T>.Value` the same way whatever value the holder carries,
//! while an inlined literal makes every value look like a new tree.
//!
//! [`BoxHolder`]: crate::value::BoxHolder

use crate::expr::Expr;
use crate::member::Member;
use crate::types::Type;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantShape {
    /// A constant node.
    Literal,
    /// A member access whose object is a constant node.
    MemberOfConstant,
}

/// A classified constant: the constant node and the shape it was found in.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveConstant<'a> {
    pub constant: &'a Expr,
    pub value: &'a Value,
    pub shape: ConstantShape,
}

impl EffectiveConstant<'_> {
    /// Whether the constant was reached through a member access.
    pub fn is_member_reference(&self) -> bool {
        self.shape == ConstantShape::MemberOfConstant
    }

    pub fn declared_type(&self) -> &Type {
        self.constant.ty()
    }
}

/// Classify `expr` as a literal or a member of a literal. Only one level of
/// member indirection is recognized.
pub fn classify_constant(expr: &Expr) -> Option<EffectiveConstant<'_>> {
    if let Some(value) = expr.as_constant() {
        return Some(EffectiveConstant { constant: expr, value, shape: ConstantShape::Literal });
    }
    let (object, _) = expr.as_member()?;
    let value = object.as_constant()?;
    Some(EffectiveConstant {
        constant: object,
        value,
        shape: ConstantShape::MemberOfConstant,
    })
}

pub fn is_effectively_constant(expr: &Expr) -> bool {
    classify_constant(expr).is_some()
}

/// Host conversion used to change a constant's type.
pub trait ValueMapper {
    type Error;

    fn map_value(&self, value: Value, source: &Type, dest: &Type) -> Result<Value, Self::Error>;
}

impl<F, E> ValueMapper for F
where
    F: Fn(Value, &Type, &Type) -> Result<Value, E>,
{
    type Error = E;

    fn map_value(&self, value: Value, source: &Type, dest: &Type) -> Result<Value, E> {
        self(value, source, dest)
    }
}

/// Rebuild `expr` as a constant of type `target`.
///
/// - `Ok(None)`: `expr` is not effectively constant.
/// - `Ok(Some(expr))`, same node: the constant is already declared as `target`;
///   the mapper is not called.
/// - `Ok(Some(new))`: the unboxed value went through `mapper` (with `expr`'s
///   static type as the source type) and was rebuilt in the same shape.
/// - `Err(e)`: the mapper's error, unchanged.
pub fn try_map_constant<M>(expr: &Expr, mapper: &M, target: &Type) -> Result<Option<Expr>, M::Error>
where
    M: ValueMapper + ?Sized,
{
    let Some(constant) = classify_constant(expr) else {
        return Ok(None);
    };
    if constant.declared_type() == target {
        return Ok(Some(expr.clone()));
    }

    tracing::debug!(
        from = %expr.ty(),
        to = %target,
        member_reference = constant.is_member_reference(),
        "rebuilding constant"
    );
    let value = unbox(constant.value.clone());
    let mapped = mapper.map_value(value, expr.ty(), target)?;
    Ok(Some(build_constant(mapped, target.clone(), constant.is_member_reference())))
}

/// Strip one boxing holder, if present.
pub fn unbox(value: Value) -> Value {
    match value {
        Value::Boxed(holder) => holder.value().clone(),
        other => other,
    }
}

/// A constant of type `ty` holding `value`. With `as_member_reference`, the
/// value is placed in a fresh `Holder<ty>` and the result is the holder's
/// `Value` member access, typed `ty`.
pub fn build_constant(value: Value, ty: Type, as_member_reference: bool) -> Expr {
    if !as_member_reference {
        return Expr::constant(value, ty);
    }
    let holder = Expr::constant(Value::boxed(ty.clone(), value), Type::holder(ty.clone()));
    Expr::member(holder, Member::holder_value(ty))
}
