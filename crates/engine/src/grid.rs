use rustc_hash::FxHashMap;

use super::cell::Cell;
use super::{MAX_COLS, MAX_ROWS};

/// Recalculation order shown on the status line. Nothing is recalculated;
/// the order is only recorded and displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalcOrder {
    #[default]
    Column,
    Row,
}

impl CalcOrder {
    pub fn indicator(self) -> char {
        match self {
            CalcOrder::Column => 'C',
            CalcOrder::Row => 'R',
        }
    }
}

/// Sparse cell store. Missing entries are empty cells.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: FxHashMap<(usize, usize), Cell>,
    calc_order: CalcOrder,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < MAX_ROWS && col < MAX_COLS
    }

    /// Borrow a populated cell. `None` for empty or out-of-range positions.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cell(row, col).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if !Self::in_bounds(row, col) {
            return;
        }
        if cell.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), cell);
        }
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells.remove(&(row, col));
    }

    pub fn clear_all(&mut self) {
        self.cells.clear();
    }

    pub fn used_count(&self) -> usize {
        self.cells.len()
    }

    /// Populated cells in row-major order.
    pub fn cells(&self) -> Vec<((usize, usize), &Cell)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&pos, cell)| (pos, cell)).collect();
        cells.sort_by_key(|&(pos, _)| pos);
        cells
    }

    pub fn calc_order(&self) -> CalcOrder {
        self.calc_order
    }

    pub fn set_calc_order(&mut self, order: CalcOrder) {
        self.calc_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellValue, FormatTag};

    fn label(text: &str) -> Cell {
        Cell::new(CellValue::label(text))
    }

    #[test]
    fn test_get_missing_is_empty() {
        let grid = Grid::new();
        assert!(grid.get(3, 4).is_empty());
        assert!(grid.cell(3, 4).is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = Grid::new();
        let cell = Cell::new(CellValue::value("12.5")).with_format(FormatTag::new("$2"));
        grid.set(10, 3, cell.clone());
        assert_eq!(grid.get(10, 3), cell);
        assert_eq!(grid.used_count(), 1);
    }

    #[test]
    fn test_set_empty_removes_entry() {
        let mut grid = Grid::new();
        grid.set(0, 0, label("x"));
        grid.set(0, 1, label("y"));
        assert_eq!(grid.used_count(), 2);

        grid.set(0, 0, Cell::empty());
        assert_eq!(grid.used_count(), 1);

        // Removing an absent key changes nothing
        grid.set(5, 5, Cell::empty());
        assert_eq!(grid.used_count(), 1);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut grid = Grid::new();
        grid.set(MAX_ROWS, 0, label("no"));
        grid.set(0, MAX_COLS, label("no"));
        grid.clear(MAX_ROWS + 10, MAX_COLS + 10);
        assert_eq!(grid.used_count(), 0);
        assert!(grid.get(MAX_ROWS, MAX_COLS).is_empty());
    }

    #[test]
    fn test_clear_and_clear_all() {
        let mut grid = Grid::new();
        grid.set(1, 1, label("a"));
        grid.set(2, 2, label("b"));
        grid.clear(1, 1);
        assert!(grid.get(1, 1).is_empty());
        assert_eq!(grid.used_count(), 1);
        grid.clear_all();
        assert_eq!(grid.used_count(), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let mut grid = Grid::new();
        grid.set(2, 0, label("c"));
        grid.set(0, 5, label("b"));
        grid.set(0, 1, label("a"));
        let order: Vec<_> = grid.cells().into_iter().map(|(pos, _)| pos).collect();
        assert_eq!(order, vec![(0, 1), (0, 5), (2, 0)]);
    }

    #[test]
    fn test_calc_order_indicator() {
        let mut grid = Grid::new();
        assert_eq!(grid.calc_order().indicator(), 'C');
        grid.set_calc_order(CalcOrder::Row);
        assert_eq!(grid.calc_order().indicator(), 'R');
    }
}
