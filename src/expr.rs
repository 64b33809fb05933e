//! Expression tree nodes.
//!
//! An [`Expr`] is a cheap handle to an immutable, shared node. Every node
//! gets a fresh [`NodeId`] when it is constructed; cloning the handle keeps
//! the id, so two handles refer to "the same node" exactly when their ids
//! match. `PartialEq` compares structure and ignores ids.

use std::sync::Arc;

use uuid::Uuid;

use crate::diagnostics::ExprError;
use crate::member::Member;
use crate::types::Type;
use crate::value::Value;

/// Identity token assigned to a node at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    fn fresh() -> Self {
        NodeId(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Gt,
    And,
    Or,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Member {
        object: Expr,
        member: Member,
    },
    Constant(Value),
    Parameter {
        name: String,
    },
    Lambda {
        params: Vec<Expr>,
        body: Expr,
    },
    Unary {
        op: UnaryOp,
        operand: Expr,
    },
    Binary {
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
    },
    Call {
        function: String,
        args: Vec<Expr>,
    },
    Conditional {
        test: Expr,
        then_expr: Expr,
        else_expr: Expr,
    },
    /// Host-specific node with no children this crate knows about.
    Opaque {
        label: String,
    },
}

#[derive(Debug)]
pub struct ExprNode {
    id: NodeId,
    ty: Type,
    kind: ExprKind,
}

#[derive(Debug, Clone)]
pub struct Expr(Arc<ExprNode>);

/// Borrowed view of a lambda node.
#[derive(Debug, Clone, Copy)]
pub struct Lambda<'a> {
    pub params: &'a [Expr],
    pub body: &'a Expr,
}

impl Expr {
    fn new(ty: Type, kind: ExprKind) -> Self {
        Expr(Arc::new(ExprNode { id: NodeId::fresh(), ty, kind }))
    }

    pub fn constant(value: Value, ty: Type) -> Self {
        Self::new(ty, ExprKind::Constant(value))
    }

    pub fn parameter(name: impl Into<String>, ty: Type) -> Self {
        Self::new(ty, ExprKind::Parameter { name: name.into() })
    }

    /// Member access typed by the member's declared type. Does not check that
    /// `object` declares `member`; see [`Expr::make_member_access`].
    pub fn member(object: Expr, member: Member) -> Self {
        let ty = member.member_type().clone();
        Self::new(ty, ExprKind::Member { object, member })
    }

    /// Member access that fails when `member` is not declared on `object`'s type
    /// (or on the class a nullable `object` wraps).
    pub fn make_member_access(object: Expr, member: Member) -> Result<Self, ExprError> {
        let declared_on = match object.ty() {
            Type::Nullable(inner) => &**inner,
            ty => ty,
        };
        if member.declaring_type() != declared_on {
            return Err(ExprError::member_mismatch(&member, object.ty()));
        }
        Ok(Self::member(object, member))
    }

    pub fn lambda(params: Vec<Expr>, body: Expr) -> Self {
        debug_assert!(
            params.iter().all(Expr::is_parameter),
            "lambda parameters must be parameter nodes"
        );
        let ty = Type::func(
            params.iter().map(|p| p.ty().clone()).collect(),
            body.ty().clone(),
        );
        Self::new(ty, ExprKind::Lambda { params, body })
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Self::new(ty, ExprKind::Unary { op, operand })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, ty: Type) -> Self {
        Self::new(ty, ExprKind::Binary { op, lhs, rhs })
    }

    pub fn call(function: impl Into<String>, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(ty, ExprKind::Call { function: function.into(), args })
    }

    pub fn conditional(test: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        let ty = then_expr.ty().clone();
        Self::new(ty, ExprKind::Conditional { test, then_expr, else_expr })
    }

    pub fn opaque(label: impl Into<String>, ty: Type) -> Self {
        Self::new(ty, ExprKind::Opaque { label: label.into() })
    }

    /// A new node of the same type with `kind` swapped in. Lambda and member
    /// nodes recompute their type from the new children.
    pub(crate) fn rebuild(&self, kind: ExprKind) -> Self {
        match kind {
            ExprKind::Member { object, member } => Self::member(object, member),
            ExprKind::Lambda { params, body } => Self::lambda(params, body),
            kind => Self::new(self.ty().clone(), kind),
        }
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Identity comparison: true when both handles refer to the same node.
    pub fn same_node(&self, other: &Expr) -> bool {
        self.0.id == other.0.id
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind(), ExprKind::Parameter { .. })
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind(), ExprKind::Member { .. })
    }

    pub fn as_member(&self) -> Option<(&Expr, &Member)> {
        match self.kind() {
            ExprKind::Member { object, member } => Some((object, member)),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self.kind() {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_lambda(&self) -> Option<Lambda<'_>> {
        match self.kind() {
            ExprKind::Lambda { params, body } => Some(Lambda { params, body }),
            _ => None,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (self.0.ty == other.0.ty && self.0.kind == other.0.kind)
    }
}
