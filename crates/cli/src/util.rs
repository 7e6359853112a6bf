use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut a string to at most `width` display columns, on a char boundary.
/// No ellipsis: grid cells clip their text.
pub(crate) fn truncate_display(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width {
            return &s[..i];
        }
        used += cw;
    }
    s
}

/// Pad or truncate a string to exactly `width` display columns, text on the left.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let fill = width - display_width(cut);
    format!("{}{}", cut, " ".repeat(fill))
}

/// Pad or truncate a string to exactly `width` display columns, text on the right.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let fill = width - display_width(cut);
    format!("{}{}", " ".repeat(fill), cut)
}

/// Centre a string in `width` columns; odd slack goes to the right.
pub(crate) fn center(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let slack = width - display_width(cut);
    let left = slack / 2;
    format!("{}{}{}", " ".repeat(left), cut, " ".repeat(slack - left))
}
