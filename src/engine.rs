//! Rule engine
//!
//! Orchestrates one check: pattern match, constant-falsity proof, macro
//! origin validation, raw-token edit-location discovery, edit construction.
//! Data flows one way through those stages; the tree and buffers are only
//! ever read, and every disqualification resolves to an [`Outcome`] variant
//! rather than an error. A host may therefore run checks from any number of
//! parallel workers against one shared rule instance.

use crate::config::RuleConfig;
use crate::diagnostic::{Finding, Outcome, Severity};
use crate::edits::build_edits;
use crate::matcher::match_condition;
use crate::origin::{is_idiomatic_false_macro, resolve_macro_origin};
use crate::scanner::find_invocation;
use crate::source::SourceMap;
use crate::tree::Stmt;
use log::{debug, trace};

/// Identifier this rule reports findings under
pub const RULE_ID: &str = "replace-assert-with-static-assert";

/// The assert-to-static_assert rule.
///
/// Holds nothing but immutable configuration; every [`check`] call is an
/// independent pure function over the candidate statement and the host's
/// source map.
///
/// [`check`]: StaticAssertRule::check
#[derive(Debug, Clone, Default)]
pub struct StaticAssertRule {
    config: RuleConfig,
}

impl StaticAssertRule {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    fn finding_message(&self) -> String {
        format!(
            "found {}() that could be replaced by {}()",
            self.config.assert_macro, self.config.replacement
        )
    }

    /// Check one candidate statement offered by the host framework.
    pub fn check(&self, stmt: &dyn Stmt, source: &dyn SourceMap) -> Outcome {
        // Only languages with a compile-time assertion
        if !self.config.language.supports_static_assert() {
            return Outcome::NoMatch;
        }

        // The condition's truth value is not fixed inside instantiated
        // template bodies
        if stmt.in_template_instantiation() {
            return Outcome::NoMatch;
        }

        let matched = match match_condition(stmt.condition()) {
            Some(matched) => matched,
            None => return Outcome::NoMatch,
        };

        let origin = match resolve_macro_origin(stmt.begin(), &self.config.assert_macro, source) {
            Some(origin) => origin,
            None => {
                trace!("candidate does not originate from {}()", self.config.assert_macro);
                return Outcome::NoMatch;
            }
        };

        // An always-false literal spelled through an idiomatic false/null
        // macro is a deliberate macro use, unless a pointer-typed cast marks
        // it as a legitimate null-constant spelling.
        if let Some(always_false) = matched.always_false {
            let pointer_cast = matched.cast.is_some() && matched.cast_is_pointer;
            if !pointer_cast && is_idiomatic_false_macro(always_false.position(), source) {
                debug!("declining idiomatic false/null macro spelling");
                return Outcome::NoMatch;
            }
        }

        let finding = Finding::new(
            RULE_ID,
            Severity::Warning,
            &self.finding_message(),
            origin.call_site,
        );

        // Detection and rewrite-ability are independent: from here on,
        // failures downgrade to a finding without edits.
        if !origin.call_site_is_literal {
            debug!("call site is buried inside another macro expansion; omitting edits");
            return Outcome::MatchWithoutEdits(finding);
        }

        let text = match source.buffer_text(origin.call_site.buffer) {
            Some(text) => text,
            None => return Outcome::MatchWithoutEdits(finding),
        };

        let invocation =
            match find_invocation(text, origin.call_site, &self.config.assert_macro) {
                Ok(invocation) => invocation,
                Err(error) => {
                    debug!("raw scan failed at call site: {error}");
                    return Outcome::MatchWithoutEdits(finding);
                }
            };

        match build_edits(&matched, &invocation, &self.config.replacement) {
            Some(edits) => Outcome::MatchWithEdits(finding.with_edits(edits)),
            None => Outcome::MatchWithoutEdits(finding),
        }
    }
}
