//! Cell addresses.
//!
//! Columns use bijective base-26 letters (`A`..`Z`, `AA`..), rows are
//! 1-based in text and 0-based everywhere else.

use std::fmt;

use crate::{MAX_COLS, MAX_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Text that is not a letters-then-digits reference inside the grid.
    Malformed(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "malformed cell address: '{text}'"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Convert 0-based column index to letter(s): 0 -> A, 25 -> Z, 26 -> AA.
pub fn col_to_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        letters.push(b'A' + ((n - 1) % 26) as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Format a 0-based (row, col) pair as an address like `B12`.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letters(col), row + 1)
}

/// Parse an address like `a1` or `BL256` into a 0-based (row, col) pair.
///
/// Letters are case-insensitive. Anything after the row digits is ignored.
pub fn parse_cell_ref(text: &str) -> Result<(usize, usize), AddressError> {
    let malformed = || AddressError::Malformed(text.to_string());
    let bytes = text.as_bytes();
    let mut i = 0;

    let mut col: usize = 0;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        let digit = (bytes[i].to_ascii_uppercase() - b'A' + 1) as usize;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(malformed)?;
        i += 1;
    }
    if i == 0 {
        return Err(malformed());
    }

    let digits_start = i;
    let mut row: usize = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        row = row
            .checked_mul(10)
            .and_then(|r| r.checked_add((bytes[i] - b'0') as usize))
            .ok_or_else(malformed)?;
        i += 1;
    }
    if i == digits_start || row == 0 {
        return Err(malformed());
    }

    let (row, col) = (row - 1, col - 1);
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(malformed());
    }
    Ok((row, col))
}
