//! Expression-tree rewriting: member paths, parameter substitution, and
//! constant rebuilding over an immutable, identity-tracked tree.
//!
//! Typical host flow:
//! 1. `path::is_member_path` / `path::member_path` to validate and describe selectors.
//! 2. `rewrite::specialize` to plug concrete expressions into a lambda.
//! 3. `constant::try_map_constant` per leaf while mapping a tree to new types.

pub mod diagnostics;
pub mod types;
pub mod value;
pub mod member;
pub mod expr;
pub mod visit;
pub mod pretty;
pub mod path;
pub mod rewrite;
pub mod constant;

pub use constant::{ValueMapper, build_constant, classify_constant, try_map_constant, unbox};
pub use diagnostics::{ExprError, MapError};
pub use expr::{Expr, ExprKind, Lambda, NodeId};
pub use member::{Member, MemberKind, MemberResolver, TypeRegistry};
pub use path::{build_access, is_member_path, member_chain, member_path, resolve_path};
pub use rewrite::{specialize, substitute};
pub use types::Type;
pub use value::{BoxHolder, Value};
