//! Expression visitor infrastructure
//!
//! Two traits with default recursion for traversing [`Expr`] trees:
//!
//! - `Visitor` — read-only traversal (for analysis/collection passes)
//! - `Fold` — rebuilding traversal that returns a new tree (for rewriting passes)
//!
//! Trees are immutable, so `Fold` never mutates in place. `walk_fold_expr`
//! rebuilds a node only when at least one child came back as a different
//! node; otherwise the original handle is returned and the subtree is shared
//! with the input.
//!
//! ## Usage
//!
//! ```rust
//! use exprmap::expr::{Expr, ExprKind};
//! use exprmap::visit::{Visitor, walk_expr};
//!
//! struct ParamCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for ParamCounter {
//!     fn visit_expr(&mut self, expr: &Expr) {
//!         if let ExprKind::Parameter { .. } = expr.kind() {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr); // Continue recursion
//!     }
//! }
//! ```

use crate::expr::{Expr, ExprKind};

// ============================================================================
// Visitor Trait (Read-Only)
// ============================================================================

/// Read-only expression visitor. The default implementation recurses into
/// all children. Omit the `walk_expr` call in an override to prune traversal.
pub trait Visitor: Sized {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr) {
    match expr.kind() {
        // Leaves
        ExprKind::Constant(_) | ExprKind::Parameter { .. } | ExprKind::Opaque { .. } => {}

        ExprKind::Member { object, .. } => v.visit_expr(object),
        ExprKind::Lambda { params, body } => {
            for p in params {
                v.visit_expr(p);
            }
            v.visit_expr(body);
        }
        ExprKind::Unary { operand, .. } => v.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                v.visit_expr(arg);
            }
        }
        ExprKind::Conditional { test, then_expr, else_expr } => {
            v.visit_expr(test);
            v.visit_expr(then_expr);
            v.visit_expr(else_expr);
        }
    }
}

// ============================================================================
// Fold Trait (Rebuilding)
// ============================================================================

/// Rebuilding expression visitor. Returns the (possibly) rewritten node.
pub trait Fold: Sized {
    fn fold_expr(&mut self, expr: &Expr) -> Expr {
        walk_fold_expr(self, expr)
    }
}

/// Fold every child of `expr`, rebuilding it only if some child changed.
///
/// Lambda parameter lists are binding sites and are left as-is; only the
/// body is folded.
pub fn walk_fold_expr<F: Fold>(f: &mut F, expr: &Expr) -> Expr {
    match expr.kind() {
        ExprKind::Constant(_) | ExprKind::Parameter { .. } | ExprKind::Opaque { .. } => {
            expr.clone()
        }

        ExprKind::Member { object, member } => {
            let new_object = f.fold_expr(object);
            if new_object.same_node(object) {
                return expr.clone();
            }
            expr.rebuild(ExprKind::Member { object: new_object, member: member.clone() })
        }
        ExprKind::Lambda { params, body } => {
            let new_body = f.fold_expr(body);
            if new_body.same_node(body) {
                return expr.clone();
            }
            expr.rebuild(ExprKind::Lambda { params: params.clone(), body: new_body })
        }
        ExprKind::Unary { op, operand } => {
            let new_operand = f.fold_expr(operand);
            if new_operand.same_node(operand) {
                return expr.clone();
            }
            expr.rebuild(ExprKind::Unary { op: *op, operand: new_operand })
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let new_lhs = f.fold_expr(lhs);
            let new_rhs = f.fold_expr(rhs);
            if new_lhs.same_node(lhs) && new_rhs.same_node(rhs) {
                return expr.clone();
            }
            expr.rebuild(ExprKind::Binary { op: *op, lhs: new_lhs, rhs: new_rhs })
        }
        ExprKind::Call { function, args } => match fold_list(f, args) {
            Some(new_args) => expr.rebuild(ExprKind::Call { function: function.clone(), args: new_args }),
            None => expr.clone(),
        },
        ExprKind::Conditional { test, then_expr, else_expr } => {
            let new_test = f.fold_expr(test);
            let new_then = f.fold_expr(then_expr);
            let new_else = f.fold_expr(else_expr);
            if new_test.same_node(test) && new_then.same_node(then_expr) && new_else.same_node(else_expr) {
                return expr.clone();
            }
            expr.rebuild(ExprKind::Conditional {
                test: new_test,
                then_expr: new_then,
                else_expr: new_else,
            })
        }
    }
}

/// Fold a child list. `None` when every element came back unchanged.
fn fold_list<F: Fold>(f: &mut F, exprs: &[Expr]) -> Option<Vec<Expr>> {
    let folded: Vec<Expr> = exprs.iter().map(|e| f.fold_expr(e)).collect();
    let changed = folded.iter().zip(exprs).any(|(new, old)| !new.same_node(old));
    changed.then_some(folded)
}

// ============================================================================
// Queries
// ============================================================================

struct NodeFinder<'a> {
    target: &'a Expr,
    found: bool,
}

impl Visitor for NodeFinder<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if self.found {
            return;
        }
        if expr.same_node(self.target) {
            self.found = true;
            return;
        }
        walk_expr(self, expr);
    }
}

/// Whether `target` occurs in `tree` by identity.
pub fn contains_node(tree: &Expr, target: &Expr) -> bool {
    let mut finder = NodeFinder { target, found: false };
    finder.visit_expr(tree);
    finder.found
}
