//! Read-only query interface over the externally-owned syntax tree
//!
//! The parser that produced the tree lives in the host; this crate only
//! borrows nodes for the duration of one rule invocation. The traits here
//! expose exactly the queries the rule needs: node kind, operator kind,
//! literal values, operands, and the dependence/evaluability predicates the
//! host's semantic engine can answer.

use crate::source::{SourcePos, SourceRange};

/// Kind of an expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// `true` / `false`
    BoolLiteral,
    /// Integer literal of any width
    IntLiteral,
    /// Null-pointer constant in any spelling (`nullptr`, GNU `__null`)
    NullLiteral,
    /// String literal
    StringLiteral,
    /// Unary operator application
    Unary,
    /// Binary operator application
    Binary,
    /// Explicit C-style cast
    Cast,
    /// Value-preserving conversion inserted by the compiler
    ImplicitCast,
    /// Parenthesized sub-expression
    Paren,
    /// Function call
    Call,
    /// Anything the rule has no interest in
    Other,
}

/// Unary operator kinds the rule distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical NOT (`!`)
    Not,
    /// Any other unary operator
    Other,
}

/// Binary operator kinds the rule distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Logical AND (`&&`)
    LogicalAnd,
    /// Equality comparison (`==`)
    Equal,
    /// Any other binary operator
    Other,
}

/// Kind of a candidate statement offered by the host framework.
///
/// Only the condition of a binary `if` and the condition of a ternary
/// conditional are candidate roots for this rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    /// `if (cond) ...`
    If,
    /// `cond ? a : b`
    Conditional,
}

/// One expression node, borrowed from the host's tree.
///
/// Accessors that only make sense for a particular kind (`bool_value` for
/// bool literals, `callee_name` for calls, ...) default to `None`/`false`
/// elsewhere, so hosts implement only what their nodes carry.
pub trait Expr: Sync {
    fn kind(&self) -> ExprKind;

    /// Direct operands: one for unary/paren/cast nodes, two for binary
    /// nodes, the argument list for calls.
    fn operands(&self) -> Vec<&dyn Expr>;

    fn bool_value(&self) -> Option<bool> {
        None
    }

    fn int_value(&self) -> Option<i128> {
        None
    }

    /// Content of a string literal, without quotes or escapes
    fn string_value(&self) -> Option<&str> {
        None
    }

    fn unary_op(&self) -> Option<UnaryOp> {
        None
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        None
    }

    /// For `Cast` nodes: whether the target type is a pointer type
    fn cast_is_pointer(&self) -> bool {
        false
    }

    /// For `Call` nodes: the callee name, when statically known
    fn callee_name(&self) -> Option<&str> {
        None
    }

    /// For `Call` nodes: whether the callee is guaranteed evaluable at
    /// compile time
    fn callee_is_const_evaluable(&self) -> bool {
        false
    }

    /// Whether the expression's value depends on an unresolved generic
    /// parameter
    fn is_value_dependent(&self) -> bool {
        false
    }

    /// Whether the expression's type depends on an unresolved generic
    /// parameter
    fn is_type_dependent(&self) -> bool {
        false
    }

    /// Whether any part of the expression mentions an unresolved generic
    /// parameter
    fn is_instantiation_dependent(&self) -> bool {
        false
    }

    /// Whether the host's semantic engine can fix the expression's value
    /// without running the program
    fn is_compile_time_evaluable(&self) -> bool;

    /// Expansion position of the expression's first token
    fn position(&self) -> SourcePos;

    /// Spelling range of the expression, in the buffer where its tokens
    /// were literally written. Edits constructed by the rule target these
    /// ranges directly.
    fn range(&self) -> SourceRange;

    /// For `Binary` nodes: the spelling range of the operator token itself
    fn operator_range(&self) -> Option<SourceRange> {
        None
    }
}

/// One candidate statement, borrowed from the host's tree
pub trait Stmt: Sync {
    fn kind(&self) -> StmtKind;

    /// The full boolean condition of the `if` or ternary
    fn condition(&self) -> &dyn Expr;

    /// Expansion position of the statement's first token
    fn begin(&self) -> SourcePos;

    /// Whether the statement sits inside an instantiated template body
    fn in_template_instantiation(&self) -> bool {
        false
    }
}
