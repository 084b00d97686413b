//! Text edit construction
//!
//! Assembles the ordered edit sequence that rewrites a matched assertion:
//! rename the macro token, strip the now-redundant combining operator and
//! message literal, and insert the message argument before the closing
//! parenthesis. Applying edits to disk, batching, and cross-rule conflict
//! resolution belong to the host pipeline.

use crate::matcher::MatchResult;
use crate::scanner::Invocation;
use crate::source::{BufferId, SourcePos, SourceRange};
use serde::{Deserialize, Serialize};

/// One atomic textual operation over a source range.
///
/// Edits within one rewrite target non-overlapping ranges of a single
/// buffer and are applied left-to-right, all-or-nothing, by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum FixEdit {
    /// Replace the range with new text
    Replace { range: SourceRange, text: String },
    /// Delete the range
    Remove { range: SourceRange },
    /// Insert text immediately before the position
    Insert { at: SourcePos, text: String },
}

impl FixEdit {
    /// Buffer the edit targets
    pub fn buffer(&self) -> BufferId {
        match self {
            FixEdit::Replace { range, .. } | FixEdit::Remove { range } => range.buffer,
            FixEdit::Insert { at, .. } => at.buffer,
        }
    }

    /// The affected range; insertions occupy an empty range at their
    /// position.
    pub fn range(&self) -> SourceRange {
        match self {
            FixEdit::Replace { range, .. } | FixEdit::Remove { range } => *range,
            FixEdit::Insert { at, .. } => SourceRange::new(at.buffer, at.offset, at.offset),
        }
    }

    fn is_insert(&self) -> bool {
        matches!(self, FixEdit::Insert { .. })
    }
}

/// Whether no two edits touch overlapping ranges.
fn ranges_disjoint(edits: &[FixEdit]) -> bool {
    for (index, edit) in edits.iter().enumerate() {
        for other in &edits[index + 1..] {
            if edit.range().overlaps(&other.range()) {
                return false;
            }
        }
    }
    true
}

/// Build the rewrite for a matched assertion, in fixed order: rename the
/// macro token, strip the combining operator and message literal when a
/// message was matched, then insert `, "<message>"` (or `, ""`) before the
/// closing parenthesis.
///
/// Returns `None` when a syntactically valid single-buffer rewrite cannot
/// be guaranteed: a message whose operator or content the tree cannot
/// surface, any component range living outside the invocation's buffer, or
/// overlapping ranges. The caller then reports the finding without edits.
pub fn build_edits(
    matched: &MatchResult<'_>,
    invocation: &Invocation,
    replacement: &str,
) -> Option<Vec<FixEdit>> {
    let buffer = invocation.name.buffer;

    let mut edits = vec![FixEdit::Replace {
        range: invocation.name,
        text: replacement.to_string(),
    }];

    let mut message_text = "";
    if let Some(message) = matched.message {
        let operator_range = matched.combiner?.operator_range()?;
        edits.push(FixEdit::Remove {
            range: operator_range,
        });
        edits.push(FixEdit::Remove {
            range: message.range(),
        });
        message_text = message.string_value()?;
    }

    edits.push(FixEdit::Insert {
        at: invocation.closing_paren,
        text: format!(", \"{}\"", message_text),
    });

    if edits.iter().any(|edit| edit.buffer() != buffer) {
        return None;
    }
    if !ranges_disjoint(&edits) {
        return None;
    }

    Some(edits)
}

/// Apply a disjoint edit set to `text` in memory.
///
/// Convenience for hosts previewing a rewrite and for tests; the real
/// edit-application pipeline lives outside this crate. Buffer identities
/// are not consulted - the caller passes the text of the one buffer the
/// edits target.
pub fn apply_edits(text: &str, edits: &[FixEdit]) -> String {
    let mut ordered: Vec<&FixEdit> = edits.iter().collect();
    // Apply back-to-front so earlier offsets stay valid; at equal offsets
    // the range starting there is spliced before the insertion lands.
    ordered.sort_by(|a, b| {
        b.range()
            .start
            .cmp(&a.range().start)
            .then_with(|| a.is_insert().cmp(&b.is_insert()))
    });

    let mut result = text.to_string();
    for edit in ordered {
        let range = edit.range();
        let start = (range.start as usize).min(result.len());
        let end = (range.end as usize).min(result.len());
        match edit {
            FixEdit::Replace { text, .. } | FixEdit::Insert { text, .. } => {
                result.replace_range(start..end, text);
            }
            FixEdit::Remove { .. } => {
                result.replace_range(start..end, "");
            }
        }
    }
    result
}
