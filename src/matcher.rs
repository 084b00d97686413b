//! Condition pattern matching
//!
//! Decomposes the boolean condition of a candidate statement into one of the
//! accepted always-false shapes. Each pattern is a named pure function over
//! borrowed tree nodes; nothing here mutates or owns the tree.

use crate::classify::{classify_always_false, peel_implicit, peel_paren_implicit};
use crate::tree::{BinaryOp, Expr, ExprKind, UnaryOp};

/// Branch-prediction hint whose first argument wraps the real condition
const EXPECT_HINT: &str = "__builtin_expect";

/// Transient record for one matched condition.
///
/// Invariant: `message` present implies `combiner` present - the binary
/// operator that combined the falsehood with the message literal is what the
/// edit builder strips.
#[derive(Clone, Copy)]
pub struct MatchResult<'a> {
    /// Root of the matched condition (after hint unwrapping)
    pub condition: &'a dyn Expr,
    /// The always-false sub-expression, when one was bound
    pub always_false: Option<&'a dyn Expr>,
    /// Enclosing C-style cast around the falsehood, when present
    pub cast: Option<&'a dyn Expr>,
    /// Whether that cast targets a pointer type
    pub cast_is_pointer: bool,
    /// The assertion-message string literal, when one was matched
    pub message: Option<&'a dyn Expr>,
    /// The `&&` / `==` node that combined falsehood and message
    pub combiner: Option<&'a dyn Expr>,
}

/// Skip parentheses and casts of either kind.
fn peel_paren_casts(expr: &dyn Expr) -> &dyn Expr {
    let mut current = expr;
    loop {
        match current.kind() {
            ExprKind::Paren | ExprKind::ImplicitCast | ExprKind::Cast => {
                match current.operands().first() {
                    Some(inner) => current = *inner,
                    None => return current,
                }
            }
            _ => return current,
        }
    }
}

/// Unwrap a `__builtin_expect(cond, expected)` hint around the condition.
fn unwrap_expect_hint(expr: &dyn Expr) -> &dyn Expr {
    let peeled = peel_paren_implicit(expr);
    if peeled.kind() == ExprKind::Call && peeled.callee_name() == Some(EXPECT_HINT) {
        if let Some(first) = peeled.operands().first() {
            return *first;
        }
    }
    expr
}

/// Whether any node in the subtree is a call to a function that is not
/// guaranteed evaluable at compile time. Such a call disqualifies the match
/// outright: the author may have intended its side effect to run, and the
/// rewrite would silently remove it.
fn contains_runtime_call(expr: &dyn Expr) -> bool {
    if expr.kind() == ExprKind::Call && !expr.callee_is_const_evaluable() {
        return true;
    }
    expr.operands()
        .iter()
        .any(|operand| contains_runtime_call(*operand))
}

/// Checks that void the match regardless of shape.
fn is_disqualified(condition: &dyn Expr) -> bool {
    condition.is_value_dependent()
        || condition.is_type_dependent()
        || condition.is_instantiation_dependent()
        || !condition.is_compile_time_evaluable()
        || contains_runtime_call(condition)
}

struct RootMatch<'a> {
    always_false: Option<&'a dyn Expr>,
    cast: Option<&'a dyn Expr>,
    cast_is_pointer: bool,
    message: Option<&'a dyn Expr>,
    combiner: Option<&'a dyn Expr>,
}

/// Match the condition root: a bare falsehood, or a `&&` / `==` combination
/// with a message string literal.
fn match_root(expr: &dyn Expr) -> Option<RootMatch<'_>> {
    // Shape 1: bare always-false, cast/paren transparent
    if let Some(found) = classify_always_false(expr) {
        return Some(RootMatch {
            always_false: Some(found.expr),
            cast: found.cast,
            cast_is_pointer: found.cast_is_pointer,
            message: None,
            combiner: None,
        });
    }

    // Shape 2: falsehood combined with a message literal
    if expr.kind() == ExprKind::Binary
        && matches!(
            expr.binary_op(),
            Some(BinaryOp::LogicalAnd) | Some(BinaryOp::Equal)
        )
    {
        let operands = expr.operands();
        let message = operands
            .iter()
            .map(|operand| peel_implicit(*operand))
            .find(|operand| operand.kind() == ExprKind::StringLiteral)?;

        // Message detection is best-effort: the falsehood binding may stay
        // empty when the chain buries it one level down.
        let falsehood = operands
            .iter()
            .find_map(|operand| classify_always_false(*operand));

        return Some(RootMatch {
            always_false: falsehood.map(|found| found.expr),
            cast: falsehood.and_then(|found| found.cast),
            cast_is_pointer: falsehood.map(|found| found.cast_is_pointer).unwrap_or(false),
            message: Some(message),
            combiner: Some(expr),
        });
    }

    None
}

/// Attempt to decompose `condition` into one of the accepted shapes.
///
/// Returns `None` when the condition is dependent, not compile-time
/// evaluable, contains a runtime call anywhere in its subtree, or simply is
/// not a recognized always-false shape.
pub fn match_condition(condition: &dyn Expr) -> Option<MatchResult<'_>> {
    let condition = unwrap_expect_hint(condition);

    if is_disqualified(condition) {
        return None;
    }

    let root = peel_paren_casts(condition);
    let matched = match_root(root).or_else(|| {
        // Shape 3: a single logical NOT wrapping shape 1 or 2
        if root.kind() == ExprKind::Unary && root.unary_op() == Some(UnaryOp::Not) {
            let inner = peel_paren_casts(*root.operands().first()?);
            match_root(inner)
        } else {
            None
        }
    })?;

    Some(MatchResult {
        condition,
        always_false: matched.always_false,
        cast: matched.cast,
        cast_is_pointer: matched.cast_is_pointer,
        message: matched.message,
        combiner: matched.combiner,
    })
}
