//! Source positions and the macro-expansion-aware location service

use serde::{Deserialize, Serialize};

/// Identifies one source buffer (file) known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BufferId(pub u32);

/// A position in a source buffer.
///
/// A position may denote a *spelling* position (literal text as written) or
/// an *expansion* position (the logical location a macro substitution
/// occupies). The distinction is answered by the [`SourceMap`] service, not
/// encoded in the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    /// Buffer this position belongs to
    pub buffer: BufferId,
    /// Byte offset into the buffer
    pub offset: u32,
}

impl SourcePos {
    pub fn new(buffer: BufferId, offset: u32) -> Self {
        Self { buffer, offset }
    }
}

/// Half-open byte range `[start, end)` within a single buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    /// Buffer this range belongs to
    pub buffer: BufferId,
    /// Byte offset of the first character
    pub start: u32,
    /// Byte offset one past the last character
    pub end: u32,
}

impl SourceRange {
    pub fn new(buffer: BufferId, start: u32, end: u32) -> Self {
        Self { buffer, start, end }
    }

    /// Range of `len` bytes beginning at `start`
    pub fn at(start: SourcePos, len: u32) -> Self {
        Self {
            buffer: start.buffer,
            start: start.offset,
            end: start.offset + len,
        }
    }

    /// Position of the first character
    pub fn start_pos(&self) -> SourcePos {
        SourcePos::new(self.buffer, self.start)
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two ranges share at least one byte.
    ///
    /// Empty ranges never overlap anything, so an insertion point touching a
    /// range boundary does not count as an overlap.
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        self.buffer == other.buffer && self.start < other.end && other.start < self.end
    }
}

/// Resolved macro origin of a statement: the immediate macro name and the
/// invocation position one level up the expansion chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroOrigin {
    /// Name of the macro whose expansion produced the statement
    pub macro_name: String,
    /// Position of the macro invocation (the "call site" used for edits)
    pub call_site: SourcePos,
    /// Whether the call site is literal source text, i.e. not itself buried
    /// inside a further macro expansion
    pub call_site_is_literal: bool,
}

/// Position-resolution service owned by the host parser.
///
/// Components receive this as an explicit, immutable collaborator; there is
/// no global source-manager state. Every method is a pure query over the
/// host's expansion records.
pub trait SourceMap: Sync {
    /// Whether `pos` is an expansion position produced by a macro.
    fn is_macro_position(&self, pos: SourcePos) -> bool;

    /// Name of the macro whose expansion immediately produced `pos`, if any.
    fn immediate_macro_name(&self, pos: SourcePos) -> Option<&str>;

    /// The invocation position one level up the expansion chain.
    fn immediate_caller(&self, pos: SourcePos) -> Option<SourcePos>;

    /// Where the token at `pos` was literally spelled. For a position that
    /// is already literal text this is the position itself.
    fn immediate_spelling(&self, pos: SourcePos) -> Option<SourcePos>;

    /// Raw text of a buffer, for re-lexing.
    fn buffer_text(&self, buffer: BufferId) -> Option<&str>;
}
