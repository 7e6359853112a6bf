pub mod address;
pub mod cell;
pub mod grid;

/// Number of addressable rows (1..=256 in the UI).
pub const MAX_ROWS: usize = 256;

/// Number of addressable columns (A..=BL in the UI).
pub const MAX_COLS: usize = 64;
