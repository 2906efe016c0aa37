use super::*;
use crate::{Utf16Source, WindowPools};
use pretty_assertions::assert_eq;

/// Run `try_scan_xml_entity` on `text`, returning the result and the
/// cursor position afterwards.
fn try_scan(text: &str) -> (Option<DecodedChar>, usize) {
    let pools = WindowPools::default();
    let source = Utf16Source::new(text);
    let mut window = TextWindow::new(&source, &pools);
    let value = window.try_scan_xml_entity();
    (value, window.position())
}

// === Predefined Entities ===

#[test]
fn predefined_entities() {
    for (text, expected) in [
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&amp;", '&'),
        ("&apos;", '\''),
        ("&quot;", '"'),
    ] {
        assert_eq!(try_scan(text), (Some(ascii(expected)), text.len()), "{text}");
    }
}

#[test]
fn entity_leaves_following_text() {
    assert_eq!(try_scan("&lt;tag"), (Some(ascii('<')), 4));
}

// === Numeric References ===

#[test]
fn decimal_reference() {
    assert_eq!(try_scan("&#65;"), (Some(ascii('A')), 5));
}

#[test]
fn hex_reference() {
    assert_eq!(try_scan("&#x41;"), (Some(ascii('A')), 6));
}

#[test]
fn supplementary_reference_is_a_surrogate_pair() {
    let (value, position) = try_scan("&#x1F600;");
    assert_eq!(
        value,
        Some(DecodedChar {
            unit: 0xD83D,
            low_surrogate: Some(0xDE00),
        })
    );
    assert_eq!(position, 9);
}

#[test]
fn empty_reference_is_nul() {
    assert_eq!(try_scan("&#;"), (Some(DecodedChar::single(0)), 3));
}

#[test]
fn out_of_range_reference_fails() {
    let (value, _) = try_scan("&#x110000;");
    assert_eq!(value, None);
}

#[test]
fn overflowing_reference_fails() {
    let (value, position) = try_scan("&#99999999999999;");
    assert_eq!(value, None);
    assert!(position > 2);
}

#[test]
fn missing_semicolon_fails() {
    assert_eq!(try_scan("&#65 "), (None, 4));
}

// === Failure Side Effects ===

#[test]
fn unknown_entity_still_advances() {
    let (value, position) = try_scan("&bogus;");
    assert_eq!(value, None);
    assert!(position >= 1);
}

#[test]
fn partial_name_advances_past_ampersand() {
    assert_eq!(try_scan("&ltx"), (None, 1));
}

#[test]
fn not_at_ampersand_does_not_move() {
    assert_eq!(try_scan("lt;"), (None, 0));
}

#[test]
fn scan_reports_malformed_entity() {
    let pools = WindowPools::default();
    let source = Utf16Source::new("x&bogus;");
    let mut window = TextWindow::new(&source, &pools);
    window.start();
    window.advance_char();

    assert_eq!(window.scan_xml_entity(), ascii('&'));
    assert_eq!(window.errors().len(), 1);
    let error = &window.errors()[0];
    assert_eq!(error.code, ErrorCode::E0002);
    assert_eq!(error.offset, 1);
}

#[test]
fn scan_well_formed_entity_is_silent() {
    let pools = WindowPools::default();
    let source = Utf16Source::new("&amp;");
    let mut window = TextWindow::new(&source, &pools);
    window.start();
    assert_eq!(window.scan_xml_entity(), ascii('&'));
    assert!(!window.has_errors());
    assert!(window.is_really_at_end());
}
