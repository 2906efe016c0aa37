//! Unicode escape decoding.
//!
//! Three forms are recognized:
//!
//! | Form          | Digits          | Short input                         |
//! |---------------|-----------------|-------------------------------------|
//! | `\xH..`       | 1-4 hex         | accepted, uses the digits seen      |
//! | `\uHHHH`      | 4 hex           | uses the digits seen, reports E0001 |
//! | `\UHHHHHHHH`  | 8 hex           | uses the digits seen, reports E0001 |
//!
//! Decoding is a pure function over a lookahead callback, so the same logic
//! serves both peeking and scanning. The caller decides whether to commit
//! the advance and whether to surface the diagnostic.

use weft_cache::CodeUnit;
use weft_diagnostic::ErrorCode;

use crate::{SourceText, TextWindow};

const BACKSLASH: CodeUnit = 0x5C;
const REPLACEMENT: CodeUnit = 0xFFFD;
const MAX_SCALAR: u32 = 0x10_FFFF;

/// A decoded character as UTF-16: one code unit, or a high surrogate plus
/// its low surrogate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedChar {
    pub unit: CodeUnit,
    pub low_surrogate: Option<CodeUnit>,
}

impl DecodedChar {
    pub const REPLACEMENT: DecodedChar = DecodedChar::single(REPLACEMENT);

    #[inline]
    pub const fn single(unit: CodeUnit) -> Self {
        DecodedChar {
            unit,
            low_surrogate: None,
        }
    }

    /// Encode a scalar value. Returns `None` above U+10FFFF.
    pub fn from_scalar(scalar: u32) -> Option<Self> {
        if let Ok(unit) = CodeUnit::try_from(scalar) {
            return Some(Self::single(unit));
        }
        if scalar > MAX_SCALAR {
            return None;
        }
        let bits = scalar - 0x1_0000;
        let high = CodeUnit::try_from(0xD800 + (bits >> 10)).ok()?;
        let low = CodeUnit::try_from(0xDC00 + (bits & 0x3FF)).ok()?;
        Some(DecodedChar {
            unit: high,
            low_surrogate: Some(low),
        })
    }

    /// Number of code units (1 or 2).
    pub fn len_utf16(self) -> usize {
        1 + usize::from(self.low_surrogate.is_some())
    }

    /// Append the code units to `out`.
    pub fn push_to(self, out: &mut Vec<CodeUnit>) {
        out.push(self.unit);
        out.extend(self.low_surrogate);
    }
}

/// Result of decoding one escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeScan {
    pub value: DecodedChar,
    /// Code units covered, including the backslash and form letter.
    pub consumed: usize,
    pub error: Option<ErrorCode>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EscapeForm {
    /// `\x`: 1-4 digits, lenient.
    Short,
    /// `\u`: 4 digits.
    Fixed,
    /// `\U`: 8 digits.
    Long,
}

impl EscapeForm {
    fn from_letter(unit: CodeUnit) -> Option<Self> {
        match unit {
            0x78 => Some(EscapeForm::Short),
            0x75 => Some(EscapeForm::Fixed),
            0x55 => Some(EscapeForm::Long),
            _ => None,
        }
    }

    fn max_digits(self) -> usize {
        match self {
            EscapeForm::Short | EscapeForm::Fixed => 4,
            EscapeForm::Long => 8,
        }
    }
}

/// Value of a hexadecimal digit.
#[inline]
pub fn hex_value(unit: CodeUnit) -> Option<u32> {
    char::from_u32(u32::from(unit)).and_then(|c| c.to_digit(16))
}

/// Value of a decimal digit.
#[inline]
pub fn dec_value(unit: CodeUnit) -> Option<u32> {
    char::from_u32(u32::from(unit)).and_then(|c| c.to_digit(10))
}

/// Decode the escape starting at lookahead offset 0.
///
/// `peek(i)` returns the code unit `i` positions ahead. Returns `None` if
/// the input does not start with `\x`, `\u`, or `\U`.
pub fn decode_unicode_escape(
    mut peek: impl FnMut(usize) -> Option<CodeUnit>,
) -> Option<EscapeScan> {
    if peek(0) != Some(BACKSLASH) {
        return None;
    }
    let form = peek(1).and_then(EscapeForm::from_letter)?;

    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < form.max_digits() {
        let Some(digit) = peek(2 + digits).and_then(hex_value) else {
            break;
        };
        value = (value << 4) | digit;
        digits += 1;
    }
    let consumed = 2 + digits;

    let illegal = EscapeScan {
        value: DecodedChar::REPLACEMENT,
        consumed,
        error: Some(ErrorCode::E0001),
    };
    let scan = match form {
        _ if digits == 0 => illegal,
        EscapeForm::Long => match DecodedChar::from_scalar(value) {
            Some(value) => EscapeScan {
                value,
                consumed,
                error: (digits < 8).then_some(ErrorCode::E0001),
            },
            None => illegal,
        },
        EscapeForm::Short | EscapeForm::Fixed => {
            let short = form == EscapeForm::Fixed && digits < 4;
            EscapeScan {
                value: DecodedChar::from_scalar(value).unwrap_or(DecodedChar::REPLACEMENT),
                consumed,
                error: short.then_some(ErrorCode::E0001),
            }
        }
    };
    Some(scan)
}

impl<S: SourceText + ?Sized> TextWindow<'_, S> {
    /// Returns `true` if the cursor is at `\x`, `\u`, or `\U`.
    pub fn is_unicode_escape(&mut self) -> bool {
        self.peek_char() == Some(BACKSLASH)
            && self
                .peek_char_at(1)
                .and_then(EscapeForm::from_letter)
                .is_some()
    }

    /// Decode the escape at the cursor without moving it or reporting
    /// diagnostics.
    pub fn peek_unicode_escape(&mut self) -> Option<DecodedChar> {
        decode_unicode_escape(|delta| self.peek_char_at(delta)).map(|scan| scan.value)
    }

    /// Decode and consume the escape at the cursor. Malformed escapes still
    /// consume what was examined, yield a best-effort value, and record a
    /// diagnostic on the current lexeme.
    pub fn scan_unicode_escape(&mut self) -> Option<DecodedChar> {
        let start = self.position();
        let scan = decode_unicode_escape(|delta| self.peek_char_at(delta))?;
        self.advance_chars(scan.consumed);
        if let Some(code) = scan.error {
            let error = self.make_error(start, scan.consumed, code);
            self.add_error(error);
        }
        Some(scan.value)
    }
}
