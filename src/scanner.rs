//! Raw token scanning
//!
//! Re-lexes raw source text to locate the closing parenthesis of a macro's
//! argument list. The structured tree's own spans are deliberately not
//! reused: the argument-list span may not align with the literal macro
//! invocation text when a message argument spans several physical tokens or
//! when whitespace and comments intervene. Scanning the raw characters
//! guarantees the edit point matches what a plain-text patch tool expects.
//!
//! A scanner is created fresh per call site and discarded after use; it
//! shares no state between invocations.

use crate::source::{SourcePos, SourceRange};
use thiserror::Error;

/// Failure modes of a raw scan. The engine downgrades every one of these to
/// a finding without edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scan start is past the end of the buffer")]
    OutOfBounds,

    #[error("expected the macro name `{0}` at the scan start")]
    NotAtMacroName(String),

    #[error("macro name is not followed by an argument list")]
    MissingArgumentList,

    #[error("argument list does not terminate before end of buffer")]
    Unterminated,
}

/// Delimiter pairs the scanner balances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Bracket,
    Brace,
}

/// Kind of a raw token. No semantic or type information is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTokenKind {
    /// Identifier or keyword
    Ident,
    /// Opening delimiter
    Open(Delim),
    /// Closing delimiter
    Close(Delim),
    /// Numeric, string, or character literal
    Literal,
    /// Any other single character
    Punct,
}

/// One lexical unit produced by raw re-scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub kind: RawTokenKind,
    pub range: SourceRange,
}

/// Stateless single-use tokenizer over one buffer
pub struct RawScanner<'a> {
    text: &'a str,
    start: SourcePos,
    cursor: usize,
}

impl<'a> RawScanner<'a> {
    /// Scan `text` beginning at the byte offset of `start`.
    pub fn new(text: &'a str, start: SourcePos) -> Self {
        Self {
            text,
            start,
            cursor: start.offset as usize,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn skip_trivia(&mut self) {
        let bytes = self.bytes();
        while self.cursor < bytes.len() {
            match bytes[self.cursor] {
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0b' | b'\x0c' => self.cursor += 1,
                b'/' if bytes.get(self.cursor + 1) == Some(&b'/') => {
                    while self.cursor < bytes.len() && bytes[self.cursor] != b'\n' {
                        self.cursor += 1;
                    }
                }
                b'/' if bytes.get(self.cursor + 1) == Some(&b'*') => {
                    self.cursor += 2;
                    while self.cursor < bytes.len() {
                        if bytes[self.cursor] == b'*' && bytes.get(self.cursor + 1) == Some(&b'/') {
                            self.cursor += 2;
                            break;
                        }
                        self.cursor += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn consume_quoted(&mut self, quote: u8) {
        // Opening quote already consumed; an unterminated literal simply
        // runs to the end of the buffer.
        let bytes = self.bytes();
        while self.cursor < bytes.len() {
            match bytes[self.cursor] {
                b'\\' => self.cursor = (self.cursor + 2).min(bytes.len()),
                c if c == quote => {
                    self.cursor += 1;
                    return;
                }
                _ => self.cursor += 1,
            }
        }
    }

    fn consume_number(&mut self) {
        let bytes = self.bytes();
        while self.cursor < bytes.len() {
            let c = bytes[self.cursor];
            if c.is_ascii_alphanumeric() || c == b'.' || c == b'_' {
                self.cursor += 1;
            } else if (c == b'+' || c == b'-')
                && matches!(
                    bytes.get(self.cursor.wrapping_sub(1)).copied(),
                    Some(b'e' | b'E' | b'p' | b'P')
                )
            {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Next raw token, or `None` at end of buffer.
    pub fn next_token(&mut self) -> Option<RawToken> {
        self.skip_trivia();
        let bytes = self.bytes();
        if self.cursor >= bytes.len() {
            return None;
        }

        let token_start = self.cursor;
        let kind = match bytes[self.cursor] {
            b'(' => {
                self.cursor += 1;
                RawTokenKind::Open(Delim::Paren)
            }
            b')' => {
                self.cursor += 1;
                RawTokenKind::Close(Delim::Paren)
            }
            b'[' => {
                self.cursor += 1;
                RawTokenKind::Open(Delim::Bracket)
            }
            b']' => {
                self.cursor += 1;
                RawTokenKind::Close(Delim::Bracket)
            }
            b'{' => {
                self.cursor += 1;
                RawTokenKind::Open(Delim::Brace)
            }
            b'}' => {
                self.cursor += 1;
                RawTokenKind::Close(Delim::Brace)
            }
            b'"' | b'\'' => {
                let quote = bytes[self.cursor];
                self.cursor += 1;
                self.consume_quoted(quote);
                RawTokenKind::Literal
            }
            c if c.is_ascii_digit() => {
                self.consume_number();
                RawTokenKind::Literal
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while self.cursor < bytes.len()
                    && (bytes[self.cursor].is_ascii_alphanumeric() || bytes[self.cursor] == b'_')
                {
                    self.cursor += 1;
                }
                RawTokenKind::Ident
            }
            _ => {
                self.cursor += 1;
                RawTokenKind::Punct
            }
        };

        Some(RawToken {
            kind,
            range: SourceRange::new(self.start.buffer, token_start as u32, self.cursor as u32),
        })
    }
}

/// A located macro invocation: the name token to rename and the closing
/// parenthesis of its argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// Range of the macro-name identifier
    pub name: SourceRange,
    /// Position of the closing parenthesis
    pub closing_paren: SourcePos,
}

/// Locate the macro invocation spelled at `at`.
///
/// The first token must be the `macro_name` identifier, the second an
/// opening parenthesis. Scanning then balances all delimiter kinds until
/// nesting returns to zero; the token that closes the argument list is the
/// edit point for inserting the message argument.
pub fn find_invocation(
    text: &str,
    at: SourcePos,
    macro_name: &str,
) -> Result<Invocation, ScanError> {
    if at.offset as usize > text.len() {
        return Err(ScanError::OutOfBounds);
    }

    let mut scanner = RawScanner::new(text, at);

    let name = scanner
        .next_token()
        .filter(|token| token.kind == RawTokenKind::Ident)
        .map(|token| token.range)
        .filter(|range| &text[range.start as usize..range.end as usize] == macro_name)
        .ok_or_else(|| ScanError::NotAtMacroName(macro_name.to_string()))?;

    match scanner.next_token() {
        Some(token) if token.kind == RawTokenKind::Open(Delim::Paren) => {}
        _ => return Err(ScanError::MissingArgumentList),
    }

    let mut depth = 1u32;
    while let Some(token) = scanner.next_token() {
        match token.kind {
            RawTokenKind::Open(_) => depth += 1,
            RawTokenKind::Close(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Invocation {
                        name,
                        closing_paren: token.range.start_pos(),
                    });
                }
            }
            _ => {}
        }
    }

    Err(ScanError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BufferId;

    fn pos(offset: u32) -> SourcePos {
        SourcePos::new(BufferId(0), offset)
    }

    fn scan(text: &str) -> Result<Invocation, ScanError> {
        find_invocation(text, pos(0), "assert")
    }

    #[test]
    fn test_simple_invocation() {
        let inv = scan("assert(0);").unwrap();
        assert_eq!(inv.name, SourceRange::new(BufferId(0), 0, 6));
        assert_eq!(inv.closing_paren, pos(8));
    }

    #[test]
    fn test_scan_from_midbuffer_offset() {
        let text = "  if (x) assert(0);";
        let inv = find_invocation(text, pos(9), "assert").unwrap();
        assert_eq!(inv.name, SourceRange::new(BufferId(0), 9, 15));
        assert_eq!(inv.closing_paren, pos(17));
    }

    #[test]
    fn test_nested_parens() {
        let text = r#"assert((void *)(0));"#;
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren, pos(18));
    }

    #[test]
    fn test_mixed_delimiters_count_toward_depth() {
        let text = "assert(table[idx(0)] == 0);";
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }

    #[test]
    fn test_paren_inside_string_ignored() {
        let text = r#"assert(false && "sad :(");"#;
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let text = r#"assert(false && "say \")\"");"#;
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }

    #[test]
    fn test_comments_between_tokens() {
        let text = "assert /* why */ ( // trailing\n  0\n);";
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }

    #[test]
    fn test_multiline_arguments() {
        let text = "assert(false &&\n       \"split over lines\");";
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }

    #[test]
    fn test_wrong_identifier() {
        assert_eq!(
            find_invocation("verify(0);", pos(0), "assert"),
            Err(ScanError::NotAtMacroName("assert".to_string()))
        );
    }

    #[test]
    fn test_missing_argument_list() {
        assert_eq!(scan("assert;"), Err(ScanError::MissingArgumentList));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(scan("assert(0"), Err(ScanError::Unterminated));
        assert_eq!(scan("assert((0)"), Err(ScanError::Unterminated));
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            find_invocation("assert(0);", pos(99), "assert"),
            Err(ScanError::OutOfBounds)
        );
    }

    #[test]
    fn test_number_with_exponent() {
        // The exponent sign must not be taken as punctuation
        let text = "assert(1e+10 == 0);";
        let inv = scan(text).unwrap();
        assert_eq!(inv.closing_paren.offset, text.len() as u32 - 2);
    }
}
