use super::*;
use pretty_assertions::assert_eq;

#[test]
fn new_has_no_args() {
    let diag = LexDiagnostic::new(ErrorCode::E0001, 3, 6);
    assert_eq!(diag.offset, 3);
    assert_eq!(diag.width, 6);
    assert!(diag.args.is_empty());
}

#[test]
fn rebased_shifts_offset_only() {
    let diag = LexDiagnostic::new(ErrorCode::E0002, 0, 4).rebased(7);
    assert_eq!(diag, LexDiagnostic::new(ErrorCode::E0002, 7, 4));
}

#[test]
fn display_includes_code_and_args() {
    let diag = LexDiagnostic::new(ErrorCode::E0002, 1, 5).with_arg("&bogus;");
    assert_eq!(
        diag.to_string(),
        "E0002: malformed XML entity (+1, width 5) `&bogus;`"
    );
}
