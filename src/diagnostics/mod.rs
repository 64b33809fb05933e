use crate::member::Member;
use crate::types::Type;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExprError {
    #[error("Member not found: no field or property `{name}` on type `{ty}`")]
    MemberNotFound { ty: Type, name: String },

    #[error("Member mismatch: `{member}` is not declared on type `{ty}`")]
    MemberMismatch { member: Member, ty: Type },

    #[error("Schema error: {msg}")]
    Schema { msg: String },

    #[error(transparent)]
    Mapping(#[from] MapError),
}

impl ExprError {
    pub fn member_not_found(ty: &Type, name: impl Into<String>) -> Self {
        Self::MemberNotFound { ty: ty.clone(), name: name.into() }
    }

    pub fn member_mismatch(member: &Member, ty: &Type) -> Self {
        Self::MemberMismatch { member: member.clone(), ty: ty.clone() }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema { msg: msg.into() }
    }
}

/// Failure reported by a value mapper that has no conversion from one type to another.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Mapping error: cannot map `{source_type}` to `{dest_type}`: {msg}")]
pub struct MapError {
    pub source_type: Type,
    pub dest_type: Type,
    pub msg: String,
}

impl MapError {
    pub fn new(source_type: &Type, dest_type: &Type, msg: impl Into<String>) -> Self {
        Self {
            source_type: source_type.clone(),
            dest_type: dest_type.clone(),
            msg: msg.into(),
        }
    }
}
