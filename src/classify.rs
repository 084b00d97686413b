//! Constant-falsity classification
//!
//! Decides whether an expression is a trivially-false compile-time constant.
//! This is deliberately a closed set of syntactic forms an author would
//! plausibly write by hand in an assertion; general constant folding belongs
//! to the host's semantic engine and is not reimplemented here.

use crate::tree::{Expr, ExprKind, UnaryOp};

/// A recognized always-false expression, plus the single C-style cast that
/// may wrap it.
#[derive(Clone, Copy)]
pub struct AlwaysFalse<'a> {
    /// The falsehood itself (`false`, `0`, a null constant, or `!"text"`)
    pub expr: &'a dyn Expr,
    /// Enclosing C-style cast, when present
    pub cast: Option<&'a dyn Expr>,
    /// Whether that cast's target type is a pointer type. Pointer casts of
    /// null-like forms are legitimate null-constant spellings and are
    /// treated specially by the macro-origin checks.
    pub cast_is_pointer: bool,
}

/// Skip implicit value-preserving conversions.
pub(crate) fn peel_implicit(expr: &dyn Expr) -> &dyn Expr {
    let mut current = expr;
    while current.kind() == ExprKind::ImplicitCast {
        match current.operands().first() {
            Some(inner) => current = *inner,
            None => break,
        }
    }
    current
}

/// Skip parentheses and implicit value-preserving conversions.
pub(crate) fn peel_paren_implicit(expr: &dyn Expr) -> &dyn Expr {
    let mut current = expr;
    loop {
        match current.kind() {
            ExprKind::Paren | ExprKind::ImplicitCast => match current.operands().first() {
                Some(inner) => current = *inner,
                None => return current,
            },
            _ => return current,
        }
    }
}

/// Whether `expr` is, without any wrapping, one of the recognized falsehood
/// forms: `false`, integer `0`, a null-pointer constant, or a logical NOT
/// applied directly to a string literal (a string literal decays to a
/// non-null address, so `!"text"` is always false).
fn is_bare_always_false(expr: &dyn Expr) -> bool {
    match expr.kind() {
        ExprKind::BoolLiteral => expr.bool_value() == Some(false),
        ExprKind::IntLiteral => expr.int_value() == Some(0),
        ExprKind::NullLiteral => true,
        ExprKind::Unary if expr.unary_op() == Some(UnaryOp::Not) => expr
            .operands()
            .first()
            .map(|operand| peel_implicit(*operand).kind() == ExprKind::StringLiteral)
            .unwrap_or(false),
        _ => false,
    }
}

/// Classify `expr` as a trivially-false compile-time constant.
///
/// Parentheses and implicit conversions are transparent, and at most one
/// explicit C-style cast may wrap the falsehood. Pure predicate; nothing is
/// evaluated.
pub fn classify_always_false(expr: &dyn Expr) -> Option<AlwaysFalse<'_>> {
    let peeled = peel_paren_implicit(expr);

    if is_bare_always_false(peeled) {
        return Some(AlwaysFalse {
            expr: peeled,
            cast: None,
            cast_is_pointer: false,
        });
    }

    if peeled.kind() == ExprKind::Cast {
        let inner = peel_paren_implicit(*peeled.operands().first()?);
        if is_bare_always_false(inner) {
            return Some(AlwaysFalse {
                expr: inner,
                cast: Some(peeled),
                cast_is_pointer: peeled.cast_is_pointer(),
            });
        }
    }

    None
}
