//! Identity-based substitution of sub-expressions.

use crate::expr::{Expr, Lambda};
use crate::visit::{Fold, walk_fold_expr};

/// Replaces every occurrence of one node (by identity) with another.
struct ReplaceExpr<'a> {
    old: &'a Expr,
    new: &'a Expr,
    hits: usize,
}

impl Fold for ReplaceExpr<'_> {
    fn fold_expr(&mut self, expr: &Expr) -> Expr {
        if expr.same_node(self.old) {
            self.hits += 1;
            return self.new.clone();
        }
        walk_fold_expr(self, expr)
    }
}

/// Return `tree` with every node that is `old` (same identity, not merely
/// equal structure) replaced by `new`. Branches without a match are shared
/// with the input.
pub fn substitute(tree: &Expr, old: &Expr, new: &Expr) -> Expr {
    let mut replacer = ReplaceExpr { old, new, hits: 0 };
    let result = replacer.fold_expr(tree);
    tracing::trace!(hits = replacer.hits, "substituted expression");
    result
}

/// The lambda body with its parameters replaced pairwise by `replacements`.
///
/// Only the first `min(params, replacements)` parameters are substituted; the
/// rest stay free in the result. Each pair is applied once, in parameter
/// order, to the output of the previous pair, so a replacement that mentions
/// an earlier parameter is not substituted again.
pub fn specialize(lambda: Lambda<'_>, replacements: &[Expr]) -> Expr {
    let mut body = lambda.body.clone();
    for (param, replacement) in lambda.params.iter().zip(replacements) {
        body = substitute(&body, param, replacement);
    }
    if replacements.len() < lambda.params.len() {
        tracing::trace!(
            free = lambda.params.len() - replacements.len(),
            "partially specialized lambda"
        );
    }
    body
}
