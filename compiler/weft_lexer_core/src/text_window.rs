//! Sliding window over immutable source text.
//!
//! The window owns a growable buffer holding a slice of the source and
//! tracks two coordinate systems:
//!
//! ```text
//! source:  [..........basis.................................text_end]
//! buffer:             [0 .. lexeme_start .. offset .. window_count .. len]
//!                           ^ in-flight lexeme  ^ cursor   ^ loaded
//! ```
//!
//! Absolute position is `basis + offset`. The invariant
//! `lexeme_start <= offset <= window_count <= buffer.len()` holds after every
//! operation except `advance_char` past the end of input, which is allowed
//! and reported through [`is_really_at_end`](TextWindow::is_really_at_end).
//!
//! # Growth
//!
//! When the cursor reaches `window_count` and source remains, the window
//! first slides the in-flight lexeme to the front of the buffer (if finished
//! lexemes occupy more than a quarter of it), then doubles the buffer if it
//! is still full, then fills the free tail from the source.
//!
//! # End of Input
//!
//! Lookahead returns `Option<CodeUnit>`: `None` means no character is
//! available. Every code unit value, including `0xFFFF`, is a genuine
//! source character.

use std::sync::{Arc, LazyLock};

use weft_cache::{CodeUnit, StringInternTable};
use weft_diagnostic::{ErrorCode, LexDiagnostic};

use crate::{SourceText, Utf16Source, WindowPools};

const CR: CodeUnit = 0x0D;
const LF: CodeUnit = 0x0A;
const SPACE: CodeUnit = 0x20;
const SLASH: CodeUnit = 0x2F;

static SPACE_TEXT: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from(" "));
static LF_TEXT: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from("\n"));
static CRLF_TEXT: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from("\r\n"));
static COMMENT_TEXT: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from("//"));
static COMMENT_SPACE_TEXT: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from("// "));

/// Shared constants for the spans that dominate trivia scanning.
///
/// Returned without consulting the intern table.
#[inline]
fn well_known_text(span: &[CodeUnit]) -> Option<&'static Arc<str>> {
    match span {
        [SPACE] => Some(&*SPACE_TEXT),
        [LF] => Some(&*LF_TEXT),
        [CR, LF] => Some(&*CRLF_TEXT),
        [SLASH, SLASH] => Some(&*COMMENT_TEXT),
        [SLASH, SLASH, SPACE] => Some(&*COMMENT_SPACE_TEXT),
        _ => None,
    }
}

/// Returns `true` for the code units that start a line break.
#[inline]
pub fn is_new_line(unit: CodeUnit) -> bool {
    matches!(unit, CR | LF | 0x85 | 0x2028 | 0x2029)
}

/// Counters for buffer maintenance, for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// In-flight lexeme slid to the front of the buffer.
    pub shifts: usize,
    /// Buffer capacity doubled.
    pub grows: usize,
    /// Window reloaded by a reset outside the loaded range.
    pub refills: usize,
}

/// Windowed reader over a [`SourceText`].
///
/// Created per lexing session and released with
/// [`release`](Self::release), which returns the buffer and intern table to
/// their pools.
pub struct TextWindow<'a, S: SourceText + ?Sized = Utf16Source> {
    text: &'a S,
    pools: &'a WindowPools,
    /// Loaded slice of the source; `buffer.len()` is the window capacity.
    buffer: Vec<CodeUnit>,
    /// Absolute position of `buffer[0]`.
    basis: usize,
    /// Cursor, relative to `basis`.
    offset: usize,
    /// Start of the in-flight lexeme, relative to `basis`.
    lexeme_start: usize,
    /// Number of valid code units in `buffer`.
    window_count: usize,
    text_end: usize,
    strings: StringInternTable,
    /// Diagnostics for the in-flight lexeme; cleared by `start`.
    errors: Vec<LexDiagnostic>,
    stats: WindowStats,
}

impl<'a, S: SourceText + ?Sized> TextWindow<'a, S> {
    /// Open a window over `text` at position 0.
    pub fn new(text: &'a S, pools: &'a WindowPools) -> Self {
        TextWindow {
            text,
            pools,
            buffer: pools.buffers.allocate(),
            basis: 0,
            offset: 0,
            lexeme_start: 0,
            window_count: 0,
            text_end: text.len(),
            strings: pools.interns.allocate(),
            errors: Vec::new(),
            stats: WindowStats::default(),
        }
    }

    /// Return the buffer and intern table to their pools.
    pub fn release(self) {
        let TextWindow {
            pools,
            buffer,
            strings,
            ..
        } = self;
        pools.buffers.free(buffer);
        pools.interns.free(strings);
    }

    /// The source text this window reads.
    pub fn text(&self) -> &'a S {
        self.text
    }

    /// Absolute cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.basis + self.offset
    }

    /// Cursor position relative to the window buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute position of the in-flight lexeme's first code unit.
    #[inline]
    pub fn lexeme_start_position(&self) -> usize {
        self.basis + self.lexeme_start
    }

    /// In-flight lexeme start relative to the window buffer.
    #[inline]
    pub fn lexeme_relative_start(&self) -> usize {
        self.lexeme_start
    }

    /// Length of the in-flight lexeme.
    #[inline]
    pub fn width(&self) -> usize {
        self.offset - self.lexeme_start
    }

    /// The loaded code units (`buffer[..window_count]`).
    pub fn window_units(&self) -> &[CodeUnit] {
        &self.buffer[..self.window_count]
    }

    /// Buffer maintenance counters.
    pub fn stats(&self) -> WindowStats {
        self.stats
    }

    /// Begin a new lexeme at the cursor and clear lexeme diagnostics.
    #[inline]
    pub fn start(&mut self) {
        self.lexeme_start = self.offset;
        self.errors.clear();
    }

    /// Move the cursor forward by one code unit.
    #[inline]
    pub fn advance_char(&mut self) {
        self.offset += 1;
    }

    /// Move the cursor forward by `n` code units. The caller is
    /// responsible for only advancing over code units that exist.
    #[inline]
    pub fn advance_chars(&mut self, n: usize) {
        self.offset += n;
    }

    /// Returns `true` if the cursor is at or past the end of the source.
    #[inline]
    pub fn is_really_at_end(&self) -> bool {
        self.offset >= self.window_count && self.position() >= self.text_end
    }

    /// Load more source into the window. Returns `true` if new code units
    /// became available.
    fn more_chars(&mut self) -> bool {
        debug_assert!(self.offset >= self.window_count);
        if self.position() >= self.text_end || self.basis + self.window_count >= self.text_end {
            return false;
        }

        // Reclaim space held by finished lexemes.
        if self.lexeme_start > self.window_count / 4 {
            let shift = self.lexeme_start;
            self.buffer.copy_within(shift..self.window_count, 0);
            self.window_count -= shift;
            self.offset -= shift;
            self.basis += shift;
            self.lexeme_start = 0;
            self.stats.shifts += 1;
            tracing::trace!(shift, basis = self.basis, "window shifted");
        }

        if self.window_count >= self.buffer.len() {
            let new_len = (self.buffer.len() * 2).max(1);
            self.buffer.resize(new_len, 0);
            self.stats.grows += 1;
            tracing::trace!(new_len, basis = self.basis, "window grown");
        }

        let fill_start = self.basis + self.window_count;
        let amount = (self.text_end - fill_start).min(self.buffer.len() - self.window_count);
        self.text.copy_to(
            fill_start,
            &mut self.buffer[self.window_count..self.window_count + amount],
        );
        self.window_count += amount;
        tracing::trace!(fill_start, amount, "window filled");
        amount > 0
    }

    /// The code unit at the cursor, without consuming it.
    #[inline]
    pub fn peek_char(&mut self) -> Option<CodeUnit> {
        while self.offset >= self.window_count {
            if !self.more_chars() {
                return None;
            }
        }
        Some(self.buffer[self.offset])
    }

    /// The code unit `delta` positions past the cursor, without consuming
    /// anything. The cursor and lexeme start are unchanged afterwards even if
    /// the lookahead grew or slid the window.
    pub fn peek_char_at(&mut self, delta: usize) -> Option<CodeUnit> {
        let position = self.position();
        match position.checked_add(delta) {
            Some(target) if target < self.text_end => {}
            _ => return None,
        }
        self.advance_chars(delta);
        let unit = self.peek_char();
        self.reset(position);
        unit
    }

    /// Consume and return the code unit at the cursor. At end of input the
    /// cursor does not move.
    #[inline]
    pub fn next_char(&mut self) -> Option<CodeUnit> {
        let unit = self.peek_char();
        if unit.is_some() {
            self.offset += 1;
        }
        unit
    }

    /// Advance past `expected` if it is the next code unit.
    pub fn advance_if_matches(&mut self, expected: CodeUnit) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance_char();
            true
        } else {
            false
        }
    }

    /// Advance past `desired` only if every one of its code units is next.
    pub fn advance_if_matches_str(&mut self, desired: &str) -> bool {
        let mut length = 0;
        for (i, unit) in desired.encode_utf16().enumerate() {
            if self.peek_char_at(i) != Some(unit) {
                return false;
            }
            length = i + 1;
        }
        self.advance_chars(length);
        true
    }

    /// Jump to an absolute position for backtracking.
    ///
    /// Positions inside the loaded range only move the cursor. Anything
    /// else reloads the window starting at `position`.
    pub fn reset(&mut self, position: usize) {
        if let Some(relative) = position.checked_sub(self.basis) {
            if relative <= self.window_count {
                self.offset = relative;
                self.lexeme_start = self.lexeme_start.min(relative);
                return;
            }
        }

        let amount = self
            .text_end
            .min(position.saturating_add(self.buffer.len()))
            .saturating_sub(position);
        if amount > 0 {
            self.text.copy_to(position, &mut self.buffer[..amount]);
        }
        self.basis = position;
        self.offset = 0;
        self.lexeme_start = 0;
        self.window_count = amount;
        self.stats.refills += 1;
        tracing::trace!(position, amount, "window refilled");
    }

    /// Width of the line break at the cursor: 2 for CRLF, 1 for any other
    /// newline code unit, 0 if the cursor is not at a newline.
    pub fn new_line_width(&mut self) -> usize {
        match self.peek_char() {
            Some(CR) if self.peek_char_at(1) == Some(LF) => 2,
            Some(unit) if is_new_line(unit) => 1,
            _ => 0,
        }
    }

    /// Advance past the line break at the cursor. Returns its width.
    pub fn advance_past_new_line(&mut self) -> usize {
        let width = self.new_line_width();
        self.advance_chars(width);
        width
    }

    /// The surrogate pair at the cursor, if the next two code units form one.
    pub fn peek_surrogate_pair(&mut self) -> Option<(CodeUnit, CodeUnit)> {
        let high = self.peek_char()?;
        if !(0xD800..=0xDBFF).contains(&high) {
            return None;
        }
        let low = self.peek_char_at(1)?;
        (0xDC00..=0xDFFF).contains(&low).then_some((high, low))
    }

    /// The raw code units of the in-flight lexeme: the key for token and
    /// trivia caches.
    #[inline]
    pub fn lexeme_units(&self) -> &[CodeUnit] {
        debug_assert!(
            self.offset <= self.window_count,
            "lexeme end {} past loaded window {}",
            self.offset,
            self.window_count
        );
        &self.buffer[self.lexeme_start..self.offset.min(self.window_count)]
    }

    /// Text of the in-flight lexeme.
    ///
    /// With `intern`, equal content always yields the same `Arc`; without,
    /// a fresh allocation is returned (except for the shared whitespace and
    /// comment-prefix constants, which are returned in both modes).
    pub fn get_text(&mut self, intern: bool) -> Arc<str> {
        self.get_text_at(self.lexeme_start_position(), self.width(), intern)
    }

    /// Interned text of the in-flight lexeme.
    pub fn get_interned_text(&mut self) -> Arc<str> {
        self.get_text(true)
    }

    /// Text of an arbitrary span inside the loaded window.
    pub fn get_text_at(&mut self, position: usize, length: usize, intern: bool) -> Arc<str> {
        debug_assert!(
            position >= self.basis && position - self.basis + length <= self.window_count,
            "span {position}+{length} outside loaded window {}+{}",
            self.basis,
            self.window_count
        );
        let start = position.saturating_sub(self.basis).min(self.window_count);
        let end = (start + length).min(self.window_count);
        let span = &self.buffer[start..end];

        if let Some(text) = well_known_text(span) {
            return Arc::clone(text);
        }
        if intern {
            self.strings.intern(span)
        } else {
            Arc::from(String::from_utf16_lossy(span))
        }
    }

    /// Intern a scratch span (e.g. an identifier with escapes decoded).
    pub fn intern(&mut self, units: &[CodeUnit]) -> Arc<str> {
        self.strings.intern(units)
    }

    /// Intern accumulated text (e.g. a decoded literal value).
    pub fn intern_str(&mut self, text: &str) -> Arc<str> {
        self.strings.intern_str(text)
    }

    /// Build a diagnostic at an absolute `position`, expressed relative to
    /// the in-flight lexeme.
    pub fn make_error(&self, position: usize, width: usize, code: ErrorCode) -> LexDiagnostic {
        let lexeme_start = self.lexeme_start_position();
        let offset = if position >= lexeme_start {
            position - lexeme_start
        } else {
            position
        };
        LexDiagnostic::new(code, offset, width)
    }

    /// Record a diagnostic for the in-flight lexeme.
    pub fn add_error(&mut self, diagnostic: LexDiagnostic) {
        self.errors.push(diagnostic);
    }

    /// Diagnostics recorded since the last `start`.
    pub fn errors(&self) -> &[LexDiagnostic] {
        &self.errors
    }

    /// Returns `true` if the in-flight lexeme has diagnostics.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
