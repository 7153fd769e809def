use super::*;
use pretty_assertions::assert_eq;
use sfe_ir::FileId;

fn pos(line: u32, column: u32) -> Position {
    Position::new(FileId::new(0), line, column)
}

#[test]
fn test_labels_keep_order() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("class `Emitter` is declared twice")
        .with_secondary_label(pos(2, 1), "first declared here")
        .with_label(pos(7, 1), "duplicate class");

    assert_eq!(diag.labels.len(), 2);
    assert!(!diag.labels[0].is_primary);
    assert_eq!(diag.primary_pos(), Some(pos(7, 1)));
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::error(ErrorCode::E0005)
        .with_message("invalid escape sequence `\\q`")
        .with_label(pos(3, 12), "unknown escape")
        .with_secondary_label(pos(3, 5), "string starts here")
        .with_note("valid escapes are \\n \\t \\v \\r \\b \\\\ \\\"");

    assert_eq!(
        diag.to_string(),
        "error [E0005]: invalid escape sequence `\\q`\n  --> 3:12: unknown escape\n      3:5: string starts here\n  = note: valid escapes are \\n \\t \\v \\r \\b \\\\ \\\""
    );
}

#[test]
fn test_no_primary_label() {
    let diag = Diagnostic::error(ErrorCode::E1001);
    assert_eq!(diag.primary_pos(), None);
    assert_eq!(diag.to_string(), "error [E1001]: ");
}
