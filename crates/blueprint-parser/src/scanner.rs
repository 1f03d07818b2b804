//! Line scanner for PlantUML text.
//!
//! Splits source text into trimmed logical [`Line`]s, dropping blank lines,
//! `'` line comments and `/' ... '/` block comments. Line numbers are
//! 1-based and refer to the original text.

/// A trimmed, non-empty source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'src> {
    pub number: usize,
    pub text: &'src str,
}

/// Scan `source` into logical lines.
pub(crate) fn scan(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut in_block_comment = false;

    for (index, raw) in source.lines().enumerate() {
        let mut text = raw.trim();

        if in_block_comment {
            match text.find("'/") {
                Some(end) => {
                    in_block_comment = false;
                    text = text[end + 2..].trim();
                }
                None => continue,
            }
        }

        if let Some(rest) = text.strip_prefix("/'") {
            match rest.find("'/") {
                Some(end) => text = rest[end + 2..].trim(),
                None => {
                    in_block_comment = true;
                    continue;
                }
            }
        }

        if text.is_empty() || text.starts_with('\'') {
            continue;
        }

        lines.push(Line {
            number: index + 1,
            text,
        });
    }

    lines
}
