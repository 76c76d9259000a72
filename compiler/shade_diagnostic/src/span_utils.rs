//! Line/column mapping and plain-text rendering of diagnostics.
//!
//! For repeated lookups on the same source, use [`LineOffsetTable`] which
//! pre-computes line offsets for O(log L) lookup instead of O(n) scanning.

use std::fmt::Write;

use shade_ir::Span;

use crate::Diagnostic;

/// Pre-computed line offset table for efficient line/column lookup.
///
/// ```
/// use shade_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 12), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column). Columns count characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col_text = source.get(line_start..end).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based (line, column) for the start of `span`.
///
/// Note: For repeated lookups, use [`LineOffsetTable`] instead.
pub fn span_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

/// Render diagnostics in `file:line:col severity[code]: message` form.
///
/// Each secondary label becomes a `note` line at its own location, which is
/// how cycle edges and prior declarations are reported.
pub fn render(diagnostics: &[Diagnostic], file: &str, source: &str) -> String {
    let table = LineOffsetTable::build(source);
    let mut out = String::new();
    for diag in diagnostics {
        let location = |span: Span| {
            let (line, col) = table.offset_to_line_col(source, span.start);
            format!("{file}:{line}:{col}")
        };
        match diag.primary_span() {
            Some(span) => {
                let _ = write!(out, "{} ", location(span));
            }
            None => {
                let _ = write!(out, "{file}: ");
            }
        }
        let _ = writeln!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);
        for label in diag.secondary_labels() {
            let _ = writeln!(out, "{} note: {}", location(label.span), label.message);
        }
        for note in &diag.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
    }
    out
}
