use super::*;
use pretty_assertions::assert_eq;

#[test]
fn new_encodes_utf16() {
    let source = Utf16Source::new("a\u{1F600}");
    assert_eq!(source.len(), 3);
    assert_eq!(source.as_units(), &[0x61, 0xD83D, 0xDE00]);
}

#[test]
fn empty_source() {
    let source = Utf16Source::new("");
    assert!(source.is_empty());
}

#[test]
fn copy_to_copies_requested_range() {
    let source = Utf16Source::new("abcdef");
    let mut dest = [0u16; 3];
    source.copy_to(2, &mut dest);
    assert_eq!(dest, [0x63, 0x64, 0x65]);
}

#[test]
fn copy_to_zero_length_at_end() {
    let source = Utf16Source::new("ab");
    let mut dest: [u16; 0] = [];
    source.copy_to(2, &mut dest);
}

#[test]
fn slice_is_source_text() {
    let units: Vec<u16> = "xyz".encode_utf16().collect();
    let text: &[u16] = &units;
    let mut dest = [0u16; 2];
    SourceText::copy_to(text, 1, &mut dest);
    assert_eq!(SourceText::len(text), 3);
    assert_eq!(dest, [0x79, 0x7A]);
}

#[test]
fn from_units_keeps_ill_formed_content() {
    let source = Utf16Source::from_units(vec![0xD800, 0x41]);
    assert_eq!(source.as_units(), &[0xD800, 0x41]);
}
