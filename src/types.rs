//! Static types and the schema type notation.

use std::fmt;
use std::str::FromStr;

use crate::diagnostics::ExprError;

/// Static type carried by every expression node and member descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Void,
    Bool,
    Int,
    Float,
    String,
    /// Erased type; any value fits.
    Object,
    Class(std::string::String),
    Array(Box<Type>),
    Nullable(Box<Type>),
    Fn(Vec<Type>, Box<Type>),
    /// Boxing holder exposing a single `Value` property of the inner type.
    Holder(Box<Type>),
}

impl Type {
    pub fn class(name: impl Into<std::string::String>) -> Self {
        Type::Class(name.into())
    }

    pub fn array(elem: Type) -> Self {
        Type::Array(Box::new(elem))
    }

    pub fn nullable(inner: Type) -> Self {
        Type::Nullable(Box::new(inner))
    }

    pub fn holder(inner: Type) -> Self {
        Type::Holder(Box::new(inner))
    }

    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Type::Fn(params, Box::new(ret))
    }

    /// The carried type when `self` is a boxing holder.
    pub fn holder_inner(&self) -> Option<&Type> {
        match self {
            Type::Holder(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::String => f.write_str("string"),
            Type::Object => f.write_str("object"),
            Type::Class(name) => f.write_str(name),
            Type::Array(elem) => write!(f, "[{elem}]"),
            Type::Nullable(inner) => write!(f, "{inner}?"),
            Type::Fn(params, ret) => {
                f.write_str("fn(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") {ret}")
            }
            Type::Holder(inner) => write!(f, "Holder<{inner}>"),
        }
    }
}

/// Parses the type notation used in registry schemas: primitives by name,
/// `[T]` for arrays, a trailing `?` for nullable, anything else a class name.
impl FromStr for Type {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExprError::schema("empty type name"));
        }
        if let Some(inner) = s.strip_suffix('?') {
            return Ok(Type::nullable(inner.parse()?));
        }
        if let Some(rest) = s.strip_prefix('[') {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| ExprError::schema(format!("unterminated array type `{s}`")))?;
            return Ok(Type::array(inner.parse()?));
        }
        let ty = match s {
            "void" => Type::Void,
            "bool" => Type::Bool,
            "int" => Type::Int,
            "float" => Type::Float,
            "string" => Type::String,
            "object" => Type::Object,
            name if name.starts_with(|c: char| c.is_alphabetic() || c == '_')
                && name.chars().all(|c| c.is_alphanumeric() || c == '_') =>
            {
                Type::class(name)
            }
            other => return Err(ExprError::schema(format!("invalid type name `{other}`"))),
        };
        Ok(ty)
    }
}
