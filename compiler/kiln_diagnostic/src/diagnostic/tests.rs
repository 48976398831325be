use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2003)
        .with_message("scalar initialized from multiple arguments")
        .with_label(Span::new(4, 12), "here")
        .with_secondary_label(Span::new(0, 3), "declared with scalar type")
        .with_note("only class types take several constructor arguments")
        .with_suggestion("remove the extra arguments");

    assert_eq!(diag.code, ErrorCode::E2003);
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_span(), Some(Span::new(4, 12)));
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_warning_severity() {
    let diag = Diagnostic::warning(ErrorCode::W2001).with_message("not covered");
    assert!(diag.is_warning());
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E2010)
        .with_message("undeclared name `x`")
        .with_label(Span::new(1, 2), "not found in this scope")
        .with_note("names must be declared before use");

    assert_eq!(
        diag.to_string(),
        "error [E2010]: undeclared name `x`\n  --> 1..2: not found in this scope\n  = note: names must be declared before use"
    );
}
