//! Grid abstraction the resolver writes into, plus an in-memory sheet.

use std::collections::BTreeMap;

use crate::spec::{EnumCellValue, SpecCellBorder, SpecCellFormat};

/// Cell storage addressed by 1-based `(row, col)`.
///
/// `set_border` must replace only the border record; values and formats stay.
pub trait BorderGrid {
    /// Current border of a cell (all edges empty when never set).
    fn get_border(&self, row: u32, col: u32) -> SpecCellBorder;

    /// Replace the border record of a cell.
    fn set_border(&mut self, row: u32, col: u32, border: SpecCellBorder);
}

/// One populated cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Non-border format.
    pub format: SpecCellFormat,
    /// Border record.
    pub border: SpecCellBorder,
}

/// Sparse in-memory worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    dict_cells: BTreeMap<(u32, u32), SpecCell>,
}

impl SheetGrid {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a cell.
    pub fn write_value(&mut self, row: u32, col: u32, value: EnumCellValue) {
        self.dict_cells.entry((row, col)).or_default().value = value;
    }

    /// Value of a cell (`None` when blank).
    pub fn value(&self, row: u32, col: u32) -> EnumCellValue {
        self.dict_cells
            .get(&(row, col))
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    /// Overlay `patch` onto the cell's current format.
    pub fn set_format(&mut self, row: u32, col: u32, patch: &SpecCellFormat) {
        let cell = self.dict_cells.entry((row, col)).or_default();
        cell.format = cell.format.merge(patch);
    }

    /// Format of a cell (default when never set).
    pub fn format(&self, row: u32, col: u32) -> SpecCellFormat {
        self.dict_cells
            .get(&(row, col))
            .map(|cell| cell.format.clone())
            .unwrap_or_default()
    }

    /// Borrow the border of a cell, if the cell exists.
    pub fn border(&self, row: u32, col: u32) -> Option<&SpecCellBorder> {
        self.dict_cells.get(&(row, col)).map(|cell| &cell.border)
    }

    /// Borrow a cell, if it exists.
    pub fn cell(&self, row: u32, col: u32) -> Option<&SpecCell> {
        self.dict_cells.get(&(row, col))
    }

    /// Populated cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((u32, u32), &SpecCell)> {
        self.dict_cells.iter().map(|(coord, cell)| (*coord, cell))
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.dict_cells.len()
    }

    /// Whether no cell was populated.
    pub fn is_empty(&self) -> bool {
        self.dict_cells.is_empty()
    }

    /// `(max_row, max_col)` over populated cells.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dict_cells.keys().fold(None, |acc, (row, col)| match acc {
            None => Some((*row, *col)),
            Some((n_row, n_col)) => Some((u32::max(n_row, *row), u32::max(n_col, *col))),
        })
    }
}

impl BorderGrid for SheetGrid {
    fn get_border(&self, row: u32, col: u32) -> SpecCellBorder {
        self.border(row, col).cloned().unwrap_or_default()
    }

    fn set_border(&mut self, row: u32, col: u32, border: SpecCellBorder) {
        self.dict_cells.entry((row, col)).or_default().border = border;
    }
}
