//! Column arithmetic for leading spaces and tabs.
//!
//! Tabs advance to the next multiple of four columns. `current_pos` is the
//! column the line slice starts at, so a tab's width depends on where the
//! caller's view of the line begins.

/// Columns a tab occupies when it starts at column `current_pos`.
pub fn tab_width(current_pos: usize) -> usize {
    4 - current_pos % 4
}

/// Measure the leading indentation of `line`.
///
/// Returns the width in columns and the number of bytes it spans.
///
/// ```
/// use markscan_scan::indent::indent_width;
///
/// assert_eq!(indent_width(b"  \tx", 0), (4, 3));
/// assert_eq!(indent_width(b"\tx", 1), (3, 1));
/// ```
pub fn indent_width(line: &[u8], current_pos: usize) -> (usize, usize) {
    let mut width = 0;
    let mut pos = 0;
    for &c in line {
        match c {
            b' ' => width += 1,
            b'\t' => width += tab_width(current_pos + width),
            _ => break,
        }
        pos += 1;
    }
    (width, pos)
}

/// Find the byte offset where `width` columns of indentation are covered.
///
/// Returns the offset just past the space or tab that reached `width`, and
/// how many columns that byte overshot by (non-zero only for tabs). `None`
/// when the leading whitespace is narrower than `width`.
pub fn indent_position(line: &[u8], current_pos: usize, width: usize) -> Option<(usize, usize)> {
    if width == 0 {
        return Some((0, 0));
    }
    let mut w = 0;
    for (i, &c) in line.iter().enumerate() {
        match c {
            b' ' => w += 1,
            b'\t' => w += tab_width(current_pos + w),
            _ => break,
        }
        if w >= width {
            return Some((i + 1, w - width));
        }
    }
    None
}

/// Strip up to `width` columns of indentation, counting a tab as four.
///
/// Returns the byte offset after the stripped whitespace and the columns
/// left over from a tab that crossed `width`.
pub fn dedent_position(line: &[u8], width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let mut w = 0;
    let mut i = 0;
    while i < line.len() && w < width {
        match line[i] {
            b' ' => w += 1,
            b'\t' => w += 4,
            _ => break,
        }
        i += 1;
    }
    (i, w.saturating_sub(width))
}
