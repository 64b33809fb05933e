//! Member-path walking: dotted paths <-> chains of member-access nodes.

use std::str::Split;

use crate::diagnostics::ExprError;
use crate::expr::{Expr, ExprKind, Lambda};
use crate::member::{Member, MemberResolver};
use crate::types::Type;

/// Member-access nodes from an outer node inward, stopping at the first
/// object that is not itself a member access.
#[derive(Debug, Clone)]
pub struct MemberChain<'a> {
    next: Option<&'a Expr>,
}

impl<'a> Iterator for MemberChain<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let ExprKind::Member { object, .. } = current.kind() {
            self.next = object.is_member().then_some(object);
        }
        Some(current)
    }
}

/// Walk the member chain starting at `expr`. Empty when `expr` is not a member access.
pub fn member_chain(expr: &Expr) -> MemberChain<'_> {
    MemberChain { next: expr.is_member().then_some(expr) }
}

/// The expression a member chain is rooted at (commonly a parameter or constant).
pub fn chain_root(expr: &Expr) -> Option<&Expr> {
    member_chain(expr).last().and_then(|innermost| innermost.as_member()).map(|(object, _)| object)
}

/// Dotted member path of a chain, innermost member first: `x.Address.City` -> `"Address.City"`.
pub fn member_path(expr: &Expr) -> Option<String> {
    let mut names: Vec<&str> = member_chain(expr)
        .filter_map(|e| e.as_member().map(|(_, member)| member.name()))
        .collect();
    if names.is_empty() {
        return None;
    }
    names.reverse();
    Some(names.join("."))
}

/// True when the lambda body is a plain member chain rooted at its first parameter.
pub fn is_member_path(lambda: Lambda<'_>) -> bool {
    let Some(first) = lambda.params.first() else {
        return false;
    };
    chain_root(lambda.body).is_some_and(|root| root.same_node(first))
}

/// Lazily resolved members of a dotted path. Each segment is looked up on the
/// type of the previous member. Yields nothing further after the first error.
pub struct MemberPath<'a, R: ?Sized> {
    resolver: &'a R,
    segments: Split<'a, char>,
    current: Type,
    failed: bool,
}

impl<R: MemberResolver + ?Sized> Iterator for MemberPath<'_, R> {
    type Item = Result<Member, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let segment = self.segments.next()?;
        match self.resolver.field_or_property(&self.current, segment) {
            Ok(member) => {
                self.current = member.member_type().clone();
                Some(Ok(member))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

pub fn resolve_path<'a, R: MemberResolver + ?Sized>(
    resolver: &'a R,
    root_type: &Type,
    dotted: &'a str,
) -> MemberPath<'a, R> {
    MemberPath {
        resolver,
        segments: dotted.split('.'),
        current: root_type.clone(),
        failed: false,
    }
}

/// Wrap `root` in one member access per member, leftmost member innermost.
pub fn member_accesses<I>(members: I, root: Expr) -> Result<Expr, ExprError>
where
    I: IntoIterator<Item = Member>,
{
    members
        .into_iter()
        .try_fold(root, |expr, member| Expr::make_member_access(expr, member))
}

/// Resolve `dotted` against `root`'s type and build the member-access chain.
#[tracing::instrument(level = "trace", skip(resolver, root), fields(root_type = %root.ty()))]
pub fn build_access<R: MemberResolver + ?Sized>(
    resolver: &R,
    root: &Expr,
    dotted: &str,
) -> Result<Expr, ExprError> {
    resolve_path(resolver, root.ty(), dotted)
        .try_fold(root.clone(), |expr, member| Expr::make_member_access(expr, member?))
}
