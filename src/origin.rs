//! Macro origin resolution
//!
//! Confirms that a candidate statement is the immediate result of expanding
//! the configured assertion macro, and resolves the call-site position used
//! for edits. All queries go through the [`SourceMap`] service the host
//! passes in; there is no global state.

use crate::source::{MacroOrigin, SourceMap, SourcePos};

/// Resolve the macro origin of a statement beginning at `begin`.
///
/// Returns `None` unless `begin` is an expansion position whose immediate
/// macro is named exactly `macro_name` (case-sensitive) and the expansion
/// chain offers a caller position one level up. The returned record states
/// whether that call site is literal source text; edits are only offered in
/// the literal case, since editing inside a second macro's definition would
/// corrupt unrelated expansions.
pub fn resolve_macro_origin(
    begin: SourcePos,
    macro_name: &str,
    source: &dyn SourceMap,
) -> Option<MacroOrigin> {
    if !source.is_macro_position(begin) {
        return None;
    }

    let name = source.immediate_macro_name(begin)?;
    if name != macro_name {
        return None;
    }

    let call_site = source.immediate_caller(begin)?;
    Some(MacroOrigin {
        macro_name: name.to_string(),
        call_site,
        call_site_is_literal: !source.is_macro_position(call_site),
    })
}

/// Whether the expression spelled at `pos` is the immediate result of
/// expanding an idiomatic false-value macro: one spelled as a
/// case-insensitive variant of `false` or `null`.
///
/// Such spellings are deliberate macro uses, not literally-written
/// falsehoods, and rewriting them would misstate authorial intent.
pub fn is_idiomatic_false_macro(pos: SourcePos, source: &dyn SourceMap) -> bool {
    let spelling = match source.immediate_spelling(pos) {
        Some(spelling) => spelling,
        None => return false,
    };

    match source.immediate_macro_name(spelling) {
        Some(name) => name.eq_ignore_ascii_case("false") || name.eq_ignore_ascii_case("null"),
        None => false,
    }
}
