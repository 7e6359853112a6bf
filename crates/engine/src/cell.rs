use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque three-character display format tag, carried but not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatTag(String);

impl FormatTag {
    pub const WIDTH: usize = 3;

    /// Build a tag from arbitrary text, padding with spaces or cutting to width.
    pub fn new(text: &str) -> Self {
        let mut tag: String = text.chars().take(Self::WIDTH).collect();
        while tag.chars().count() < Self::WIDTH {
            tag.push(' ');
        }
        Self(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FormatTag {
    fn default() -> Self {
        Self("   ".to_string())
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry kinds a non-empty cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Value,
    Label,
    Repeating,
}

impl CellKind {
    /// Status line type indicator.
    pub fn indicator(self) -> char {
        match self {
            CellKind::Value => 'V',
            CellKind::Label => 'L',
            CellKind::Repeating => '/',
        }
    }

    /// Name shown on the mode line while entering this kind.
    pub fn label(self) -> &'static str {
        match self {
            CellKind::Value => "Value",
            CellKind::Label => "Label",
            CellKind::Repeating => "Repeating",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Value { source: String, number: f64 },
    Label(String),
    Repeating(char),
}

impl CellValue {
    /// A numeric entry; the number is the literal parse of `source`.
    pub fn value(source: &str) -> Self {
        CellValue::Value {
            source: source.to_string(),
            number: parse_number(source),
        }
    }

    pub fn label(text: &str) -> Self {
        CellValue::Label(text.to_string())
    }

    /// A fill cell built from the first character of `text`; empty text gives `Empty`.
    pub fn repeating(text: &str) -> Self {
        match text.chars().next() {
            Some(ch) => CellValue::Repeating(ch),
            None => CellValue::Empty,
        }
    }

    /// Build a cell of a known kind from its raw text.
    pub fn from_kind(kind: CellKind, raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        match kind {
            CellKind::Value => Self::value(raw),
            CellKind::Label => Self::label(raw),
            CellKind::Repeating => Self::repeating(raw),
        }
    }

    /// Classify untyped raw content.
    ///
    /// Formulas (leading `=`, or a leading `+` that is not a number) are kept
    /// as inert labels. Numeric literals become values, anything else a label.
    /// The literal check runs before the `+` formula check, so `+5` is the
    /// value 5 and `+A1` is a label.
    pub fn from_input(input: &str) -> Self {
        if input.is_empty() {
            return CellValue::Empty;
        }
        if input.starts_with('=') {
            return Self::label(input);
        }
        if is_numeric_literal(input) {
            return Self::value(input);
        }
        Self::label(input)
    }

    pub fn kind(&self) -> Option<CellKind> {
        match self {
            CellValue::Empty => None,
            CellValue::Value { .. } => Some(CellKind::Value),
            CellValue::Label(_) => Some(CellKind::Label),
            CellValue::Repeating(_) => Some(CellKind::Repeating),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The text the user typed (the fill character for repeating cells).
    pub fn raw_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Value { source, .. } => source.clone(),
            CellValue::Label(text) => text.clone(),
            CellValue::Repeating(ch) => ch.to_string(),
        }
    }

    /// Computed number; labels and fills count as zero.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Value { number, .. } => *number,
            _ => 0.0,
        }
    }

    /// Text shown inside the grid, before width fitting.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Value { number, .. } => format_number(*number),
            CellValue::Label(text) => text.strip_prefix('\'').unwrap_or(text).to_string(),
            CellValue::Repeating(ch) => ch.to_string(),
        }
    }
}

/// Number formatting used by the grid: integers without a fraction,
/// everything else in shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// True for an optional sign followed by digits with at most one `.`.
pub fn is_numeric_literal(text: &str) -> bool {
    let body = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    let mut has_digit = false;
    let mut has_dot = false;
    for ch in body.chars() {
        match ch {
            '0'..='9' => has_digit = true,
            '.' if !has_dot => has_dot = true,
            _ => return false,
        }
    }
    has_digit
}

/// Literal numeric parse; anything that is not a plain number is `0.0`.
pub fn parse_number(text: &str) -> f64 {
    if !is_numeric_literal(text) {
        return 0.0;
    }
    text.parse::<f64>().unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub format: FormatTag,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            format: FormatTag::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: FormatTag) -> Self {
        self.format = format;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn kind(&self) -> Option<CellKind> {
        self.value.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_literals() {
        assert_eq!(parse_number("5"), 5.0);
        assert_eq!(parse_number("-12.5"), -12.5);
        assert_eq!(parse_number("+3"), 3.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("7."), 7.0);
    }

    #[test]
    fn test_parse_number_rejects_expressions() {
        assert_eq!(parse_number("(1+2)"), 0.0);
        assert_eq!(parse_number("1.2.3"), 0.0);
        assert_eq!(parse_number("@SUM"), 0.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("1e5"), 0.0);
        assert_eq!(parse_number(""), 0.0);
    }

    #[test]
    fn test_value_keeps_source() {
        let v = CellValue::value("(1+2)");
        assert_eq!(v.raw_text(), "(1+2)");
        assert_eq!(v.as_number(), 0.0);
        assert_eq!(v.kind(), Some(CellKind::Value));
    }

    #[test]
    fn test_from_input_classification() {
        assert_eq!(CellValue::from_input(""), CellValue::Empty);
        assert_eq!(CellValue::from_input("42").kind(), Some(CellKind::Value));
        assert_eq!(CellValue::from_input("-4.5").as_number(), -4.5);
        assert_eq!(CellValue::from_input("=A1+B1"), CellValue::label("=A1+B1"));
        assert_eq!(CellValue::from_input("+A1"), CellValue::label("+A1"));
        assert_eq!(CellValue::from_input("hello"), CellValue::label("hello"));
    }

    #[test]
    fn test_signed_literal_wins_over_plus_formula() {
        assert_eq!(CellValue::from_input("+5"), CellValue::value("+5"));
        assert_eq!(CellValue::from_input("+5").as_number(), 5.0);
        assert_eq!(CellValue::from_input("+.5").as_number(), 0.5);
        assert_eq!(CellValue::from_input("+5*2"), CellValue::label("+5*2"));
        assert_eq!(CellValue::from_input("+"), CellValue::label("+"));
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(CellValue::from_kind(CellKind::Repeating, "-="), CellValue::Repeating('-'));
        assert_eq!(CellValue::from_kind(CellKind::Label, "12"), CellValue::label("12"));
        assert_eq!(CellValue::from_kind(CellKind::Value, ""), CellValue::Empty);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::value("5").display_text(), "5");
        assert_eq!(CellValue::value("2.50").display_text(), "2.5");
        assert_eq!(CellValue::label("'hi").display_text(), "hi");
        assert_eq!(CellValue::label("plain").display_text(), "plain");
        assert_eq!(CellValue::Repeating('=').display_text(), "=");
    }

    #[test]
    fn test_format_tag_width() {
        assert_eq!(FormatTag::default().as_str(), "   ");
        assert_eq!(FormatTag::new("$").as_str(), "$  ");
        assert_eq!(FormatTag::new("ABCD").as_str(), "ABC");
    }

    #[test]
    fn test_kind_indicators() {
        assert_eq!(CellKind::Value.indicator(), 'V');
        assert_eq!(CellKind::Label.indicator(), 'L');
        assert_eq!(CellKind::Repeating.indicator(), '/');
        assert_eq!(CellKind::Repeating.label(), "Repeating");
    }
}
