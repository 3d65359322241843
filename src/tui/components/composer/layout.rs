//! Visual line layout for the composer.
//!
//! The composer hard-wraps by display width instead of letting `Paragraph`
//! word-wrap, so the cursor position computed here always matches what is
//! drawn. Lines are byte ranges into the buffer; newline bytes are never
//! part of a line.

use unicode_width::UnicodeWidthChar;

/// Left + right border.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom border.
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the composer scrolls internally.
pub(super) const MAX_VISIBLE_LINES: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VisualLine {
    pub start: usize,
    pub end: usize,
}

pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Split `text` into visual lines no wider than `width` columns.
/// Always returns at least one line.
pub(super) fn layout_lines(text: &str, width: u16) -> Vec<VisualLine> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            lines.push(VisualLine { start, end: i });
            start = i + 1;
            used = 0;
            continue;
        }
        let w = char_width(c);
        if used + w > width && used > 0 {
            lines.push(VisualLine { start, end: i });
            start = i;
            used = 0;
        }
        used += w;
    }
    lines.push(VisualLine {
        start,
        end: text.len(),
    });
    lines
}

/// Display width of `text[line.start..pos]`.
fn column_of(text: &str, line: VisualLine, pos: usize) -> usize {
    text[line.start..pos.min(line.end)].chars().map(char_width).sum()
}

/// (row, column) of the byte offset `pos`.
pub(super) fn cursor_location(text: &str, lines: &[VisualLine], pos: usize) -> (usize, usize) {
    let row = lines
        .iter()
        .rposition(|line| line.start <= pos)
        .unwrap_or(0);
    (row, column_of(text, lines[row], pos))
}

/// Byte offset on `line` closest to `column` without passing it.
pub(super) fn offset_at_column(text: &str, line: VisualLine, column: usize) -> usize {
    let mut used = 0;
    for (i, c) in text[line.start..line.end].char_indices() {
        let w = char_width(c);
        if used + w > column {
            return line.start + i;
        }
        used += w;
    }
    line.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
