//! Caster - assert() to static_assert() rewriting
//!
//! One rule of a static-analysis toolchain: it inspects already-parsed
//! source for `assert()` invocations whose condition is provably always
//! false at compile time and proposes converting them into `static_assert()`
//! with an optional diagnostic message, expressed as precise textual edits
//! to the original source.
//!
//! # Architecture
//!
//! ```text
//! Host framework -> StaticAssertRule::check -> matcher/classify
//!                                           -> origin (macro expansion)
//!                                           -> scanner (raw re-lexing)
//!                                           -> edits -> Outcome
//! ```
//!
//! The parser, the rule-registration framework, and the edit-application
//! pipeline are host collaborators: the tree arrives through the [`Expr`] /
//! [`Stmt`] traits, macro-expansion metadata through [`SourceMap`], and
//! results leave as an [`Outcome`] carrying a [`Finding`] with its ordered
//! [`FixEdit`] list. Everything in between is a pure query; the rule holds
//! no state beyond its [`RuleConfig`].
//!
//! # Example
//!
//! `assert(false && "unreachable");` becomes
//! `static_assert(false, "unreachable");` - the macro token is renamed, the
//! redundant `&&` and message literal are stripped, and the message is
//! reinserted as the second argument before the closing parenthesis found
//! by raw re-lexing of the invocation text.

pub mod classify;
pub mod config;
pub mod diagnostic;
pub mod edits;
pub mod engine;
pub mod matcher;
pub mod origin;
pub mod scanner;
pub mod source;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export main types
pub use classify::AlwaysFalse;
pub use config::{LanguageOptions, RuleConfig};
pub use diagnostic::{Finding, Outcome, Severity};
pub use edits::{apply_edits, FixEdit};
pub use engine::{StaticAssertRule, RULE_ID};
pub use matcher::{match_condition, MatchResult};
pub use scanner::{Delim, Invocation, RawScanner, RawToken, RawTokenKind, ScanError};
pub use source::{BufferId, MacroOrigin, SourceMap, SourcePos, SourceRange};
pub use tree::{BinaryOp, Expr, ExprKind, Stmt, StmtKind, UnaryOp};
