//! Members and the TOML-backed class registry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::diagnostics::ExprError;
use crate::types::Type;
use crate::value::BoxHolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Property,
}

/// A resolved field or property on a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Member {
    declaring_type: Type,
    name: String,
    ty: Type,
    kind: MemberKind,
}

impl Member {
    pub fn new(declaring_type: Type, name: impl Into<String>, ty: Type, kind: MemberKind) -> Self {
        Self { declaring_type, name: name.into(), ty, kind }
    }

    pub fn field(declaring_type: Type, name: impl Into<String>, ty: Type) -> Self {
        Self::new(declaring_type, name, ty, MemberKind::Field)
    }

    pub fn property(declaring_type: Type, name: impl Into<String>, ty: Type) -> Self {
        Self::new(declaring_type, name, ty, MemberKind::Property)
    }

    /// The `Value` property of `Holder<inner>`.
    pub fn holder_value(inner: Type) -> Self {
        Self::property(Type::holder(inner.clone()), BoxHolder::VALUE_MEMBER, inner)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &Type {
        &self.declaring_type
    }

    /// Declared type of the member.
    pub fn member_type(&self) -> &Type {
        &self.ty
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Looks up a named field or property on a type.
pub trait MemberResolver {
    fn field_or_property(&self, ty: &Type, name: &str) -> Result<Member, ExprError>;
}

impl<R: MemberResolver + ?Sized> MemberResolver for &R {
    fn field_or_property(&self, ty: &Type, name: &str) -> Result<Member, ExprError> {
        (**self).field_or_property(ty, name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub members: Vec<Member>,
}

/// In-memory class table. Holder types resolve their `Value` property
/// without being registered.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes: BTreeMap<String, ClassInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member on `class`, replacing any existing member of the same name.
    pub fn register(&mut self, class: &str, name: &str, ty: Type, kind: MemberKind) {
        let info = self.classes.entry(class.to_string()).or_default();
        let member = Member::new(Type::class(class), name, ty, kind);
        match info.members.iter_mut().find(|m| m.name == name) {
            Some(existing) => *existing = member,
            None => info.members.push(member),
        }
    }

    pub fn with_field(mut self, class: &str, name: &str, ty: Type) -> Self {
        self.register(class, name, ty, MemberKind::Field);
        self
    }

    pub fn with_property(mut self, class: &str, name: &str, ty: Type) -> Self {
        self.register(class, name, ty, MemberKind::Property);
        self
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ExprError> {
        let schema: TomlSchema =
            toml::from_str(source).map_err(|e| ExprError::schema(e.to_string()))?;

        let mut registry = Self::new();
        for (class, decl) in schema.classes {
            // A class with no members is still a known class.
            registry.classes.entry(class.clone()).or_default();
            for (name, ty) in &decl.fields {
                registry.register(&class, name, parse_member_type(&class, name, ty)?, MemberKind::Field);
            }
            for (name, ty) in &decl.properties {
                if decl.fields.contains_key(name) {
                    return Err(ExprError::schema(format!("duplicate member `{class}.{name}`")));
                }
                registry.register(&class, name, parse_member_type(&class, name, ty)?, MemberKind::Property);
            }
        }
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, ExprError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ExprError::schema(format!("could not read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }
}

impl MemberResolver for TypeRegistry {
    fn field_or_property(&self, ty: &Type, name: &str) -> Result<Member, ExprError> {
        match ty {
            Type::Holder(inner) if name == BoxHolder::VALUE_MEMBER => {
                Ok(Member::holder_value((**inner).clone()))
            }
            Type::Class(class) => self
                .classes
                .get(class)
                .and_then(|info| info.members.iter().find(|m| m.name == name))
                .cloned()
                .ok_or_else(|| ExprError::member_not_found(ty, name)),
            // A nullable reference exposes the members of the class it wraps.
            Type::Nullable(inner) if matches!(**inner, Type::Class(_)) => self
                .field_or_property(inner, name)
                .map_err(|_| ExprError::member_not_found(ty, name)),
            _ => Err(ExprError::member_not_found(ty, name)),
        }
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize)]
struct TomlSchema {
    #[serde(default)]
    classes: BTreeMap<String, TomlClass>,
}

#[derive(Deserialize)]
struct TomlClass {
    #[serde(default)]
    fields: BTreeMap<String, String>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
}

fn parse_member_type(class: &str, name: &str, ty: &str) -> Result<Type, ExprError> {
    ty.parse::<Type>().map_err(|e| match e {
        ExprError::Schema { msg } => ExprError::schema(format!("member `{class}.{name}`: {msg}")),
        other => other,
    })
}
