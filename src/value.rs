//! Runtime values and the strongly-typed box holder.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::Type;

/// A runtime value held by a constant node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// A class instance, e.g. a closure environment captured by the host.
    Record(Arc<Record>),
    Boxed(Arc<BoxHolder>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub class: String,
    pub fields: BTreeMap<String, Value>,
}

/// Strongly-typed holder that lets a value be referenced through a member
/// access (`Holder<T>.Value`) instead of being inlined as a literal.
#[derive(Debug, PartialEq)]
pub struct BoxHolder {
    ty: Type,
    value: Value,
}

impl BoxHolder {
    /// Name of the single property a holder exposes.
    pub const VALUE_MEMBER: &'static str = "Value";

    pub fn new(ty: Type, value: Value) -> Self {
        Self { ty, value }
    }

    /// Type of the carried value.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Type of the holder itself.
    pub fn holder_type(&self) -> Type {
        Type::holder(self.ty.clone())
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn record(class: impl Into<String>, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::Record(Arc::new(Record {
            class: class.into(),
            fields: fields.into_iter().collect(),
        }))
    }

    /// Wrap `value` in a fresh holder typed as `ty`.
    pub fn boxed(ty: Type, value: Value) -> Self {
        Value::Boxed(Arc::new(BoxHolder::new(ty, value)))
    }

    pub fn as_holder(&self) -> Option<&BoxHolder> {
        match self {
            Value::Boxed(holder) => Some(holder),
            _ => None,
        }
    }

    pub fn is_boxed(&self) -> bool {
        matches!(self, Value::Boxed(_))
    }
}
