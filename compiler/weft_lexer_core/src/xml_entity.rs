//! XML entity references in documentation comments.
//!
//! Recognizes the predefined entities (`&lt;`, `&gt;`, `&amp;`, `&apos;`,
//! `&quot;`) and numeric references (`&#65;`, `&#x41;`).
//!
//! A failed match still consumes what it examined: a `None` result does not
//! mean the cursor is back where it started.

use weft_cache::CodeUnit;
use weft_diagnostic::ErrorCode;

use crate::escape::{dec_value, hex_value};
use crate::{DecodedChar, SourceText, TextWindow};

const AMPERSAND: CodeUnit = 0x26;
const SEMICOLON: CodeUnit = 0x3B;
const LOWER_X: CodeUnit = 0x78;

/// Accumulation stops with a failure once the value exceeds this, so the
/// next digit cannot overflow a `u32`.
const MAX_ACCUMULATED: u32 = 0x7FF_FFFF;

impl<S: SourceText + ?Sized> TextWindow<'_, S> {
    /// Scan an entity reference at the cursor.
    pub fn try_scan_xml_entity(&mut self) -> Option<DecodedChar> {
        if !self.advance_if_matches(AMPERSAND) {
            return None;
        }

        let next = self.peek_char().and_then(|unit| char::from_u32(u32::from(unit)))?;
        let (text, value) = match next {
            'l' => ("lt;", '<'),
            'g' => ("gt;", '>'),
            'q' => ("quot;", '"'),
            'a' if self.advance_if_matches_str("amp;") => return Some(ascii('&')),
            'a' => ("apos;", '\''),
            '#' => {
                self.advance_char();
                return self.scan_numeric_reference();
            }
            _ => return None,
        };
        self.advance_if_matches_str(text).then(|| ascii(value))
    }

    /// Like [`try_scan_xml_entity`](Self::try_scan_xml_entity), but a
    /// malformed entity records E0002 on the current lexeme and yields a
    /// literal `&`.
    pub fn scan_xml_entity(&mut self) -> DecodedChar {
        let start = self.position();
        if let Some(value) = self.try_scan_xml_entity() {
            return value;
        }
        let width = (self.position() - start).max(1);
        let error = self.make_error(start, width, ErrorCode::E0002);
        self.add_error(error);
        ascii('&')
    }

    /// The digits and terminating `;` of `&#...;`, after the `#`.
    fn scan_numeric_reference(&mut self) -> Option<DecodedChar> {
        let (radix, digit_value): (u32, fn(CodeUnit) -> Option<u32>) =
            if self.advance_if_matches(LOWER_X) {
                (16, hex_value)
            } else {
                (10, dec_value)
            };

        let mut value: u32 = 0;
        while let Some(digit) = self.peek_char().and_then(digit_value) {
            self.advance_char();
            if value > MAX_ACCUMULATED {
                return None;
            }
            value = value * radix + digit;
        }

        if !self.advance_if_matches(SEMICOLON) {
            return None;
        }
        DecodedChar::from_scalar(value)
    }
}

#[inline]
fn ascii(c: char) -> DecodedChar {
    DecodedChar::single(c as CodeUnit)
}

#[cfg(test)]
mod tests;
