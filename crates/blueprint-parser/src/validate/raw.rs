//! Structure checks over raw diagram text.
//!
//! These checks look at the text line by line, independently of the parsed
//! model, so they still report problems the tolerant parser silently skips.

use log::trace;

use crate::{
    error::{Issue, IssueCode, IssueCollector},
    parser::{Brace, LineKind, classify_header, is_note_end, is_title, opens_multiline_note},
    scanner::scan,
};

/// What an open brace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Header(LineKind),
    Other,
}

/// Run every raw structure check over `source`.
pub(super) fn check(source: &str, issues: &mut IssueCollector) {
    let lines = scan(source);

    if !lines.iter().any(|line| line.text.starts_with("@startuml")) {
        issues.emit(
            Issue::new(IssueCode::STR001, "missing `@startuml` marker")
                .with_suggested_fix("add `@startuml` as the first line"),
        );
    }
    if !lines.iter().any(|line| line.text.starts_with("@enduml")) {
        issues.emit(
            Issue::new(IssueCode::STR002, "missing `@enduml` marker")
                .with_suggested_fix("add `@enduml` as the last line"),
        );
    }

    let mut stack: Vec<(Block, usize)> = Vec::new();
    let mut note_openings = 0usize;
    let mut note_endings = 0usize;
    let mut in_note = false;

    for line in &lines {
        let text = line.text;

        if is_note_end(text) {
            note_endings += 1;
            in_note = false;
            continue;
        }
        if in_note {
            continue;
        }
        if opens_multiline_note(text) {
            note_openings += 1;
            in_note = true;
            continue;
        }

        if let Some((kind, brace)) = classify_header(text) {
            if kind == LineKind::Component && brace != Brace::None {
                issues.emit(
                    Issue::new(
                        IssueCode::STR006,
                        format!("component on line {} has a brace-delimited body", line.number),
                    )
                    .with_details(text)
                    .with_suggested_fix(
                        "declare the component on one line and describe it in a note",
                    ),
                );
            }
            if brace == Brace::Open {
                stack.push((Block::Header(kind), line.number));
            }
            continue;
        }

        if text.starts_with('}') {
            if stack.pop().is_none() {
                issues.emit(
                    Issue::new(
                        IssueCode::STR004,
                        format!("closing brace on line {} has no open block", line.number),
                    )
                    .with_suggested_fix("remove the brace or open the block it closes"),
                );
            }
        } else if text.ends_with('{') {
            trace!(line = line.number; "Tracking brace of unrecognized block");
            stack.push((Block::Other, line.number));
        }
    }

    for (kind, keyword) in [
        (LineKind::Class, "class"),
        (LineKind::Enum, "enum"),
        (LineKind::Package, "package"),
    ] {
        let unclosed: Vec<String> = stack
            .iter()
            .filter(|(block, _)| *block == Block::Header(kind))
            .map(|(_, number)| number.to_string())
            .collect();
        if unclosed.is_empty() {
            continue;
        }
        issues.emit(
            Issue::new(
                IssueCode::STR003,
                format!("{} unclosed `{keyword}` block(s)", unclosed.len()),
            )
            .with_details(format!("opened on line(s) {}", unclosed.join(", ")))
            .with_suggested_fix("add the missing `}`"),
        );
    }

    if note_openings != note_endings {
        issues.emit(
            Issue::new(
                IssueCode::STR005,
                format!(
                    "{note_openings} multi-line note(s) but {note_endings} `end note` line(s)"
                ),
            )
            .with_suggested_fix("close every multi-line note with `end note`"),
        );
    }

    if !lines.iter().any(|line| is_title(line.text)) {
        issues.emit(
            Issue::new(IssueCode::STR007, "document has no title")
                .with_suggested_fix("add a `title` line"),
        );
    }
}
