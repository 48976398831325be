use pretty_assertions::assert_eq;

use super::*;

fn error_at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2008)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn counts_by_severity() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(0, "first")));
    assert!(queue.add(Diagnostic::warning(ErrorCode::W2001).with_message("careful")));

    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.warning_count(), 1);
    assert_eq!(queue.len(), 2);
    assert!(queue.has_errors().is_some());
}

#[test]
fn error_limit_drops_errors_but_keeps_warnings() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        deduplicate: true,
    });
    assert!(queue.add(error_at(0, "a")));
    assert!(!queue.add(error_at(5, "b")));
    assert!(queue.add(Diagnostic::warning(ErrorCode::W2001)));
    assert!(queue.limit_reached());
    assert_eq!(queue.len(), 2);
}

#[test]
fn identical_consecutive_diagnostics_are_deduplicated() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(3, "same")));
    assert!(!queue.add(error_at(3, "same")));
    assert!(queue.add(error_at(4, "same")));

    let mut unlimited = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(unlimited.add(error_at(3, "same")));
    assert!(unlimited.add(error_at(3, "same")));
}

#[test]
fn truncate_restores_counts() {
    let mut queue = DiagnosticQueue::new();
    queue.add(error_at(0, "kept"));
    let mark = queue.len();
    queue.add(error_at(1, "retracted"));
    queue.add(Diagnostic::warning(ErrorCode::W2001));

    queue.truncate(mark);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.warning_count(), 0);

    // Truncating past the end is a no-op.
    queue.truncate(10);
    assert_eq!(queue.len(), 1);
}

#[test]
fn flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::new();
    queue.add(Diagnostic::warning(ErrorCode::W2001).with_message("unlocated"));
    queue.add(error_at(20, "late"));
    queue.add(error_at(2, "early"));

    let messages: Vec<String> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["early", "late", "unlocated"]);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn emit_error_returns_proof() {
    let mut queue = DiagnosticQueue::new();
    let proof = queue.emit_error(error_at(0, "boom"));
    assert_eq!(queue.has_errors(), Some(proof));
}

#[test]
fn too_many_errors_is_internal() {
    let diag = too_many_errors(10, Span::new(0, 1));
    assert!(diag.code.is_internal_error());
    assert!(diag.message.contains("10"));
}
