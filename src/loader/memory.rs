//! In-memory workbook

use super::Workbook;
use crate::error::VizResult;
use crate::table::Cell;

/// A workbook held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<Cell>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a sheet from a raw grid
    pub fn with_sheet(mut self, name: &str, grid: Vec<Vec<Cell>>) -> Self {
        self.insert_sheet(name, grid);
        self
    }

    /// Add a sheet laid out like an ETABS export: title row, header row,
    /// an empty units row, then `rows`
    pub fn with_export_sheet(self, name: &str, header: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        let mut grid = Vec::with_capacity(rows.len() + 3);
        grid.push(vec![Cell::Text(format!("TABLE:  {}", name))]);
        grid.push(header.iter().map(|h| Cell::text(h)).collect());
        grid.push(vec![Cell::Empty; header.len()]);
        grid.extend(rows);
        self.with_sheet(name, grid)
    }

    /// Add (or replace) a sheet
    pub fn insert_sheet(&mut self, name: &str, grid: Vec<Vec<Cell>>) {
        match self.sheets.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = grid,
            None => self.sheets.push((name.to_string(), grid)),
        }
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> VizResult<Option<Vec<Vec<Cell>>>> {
        Ok(self
            .sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| grid.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_layout() {
        let mut wb = MemoryWorkbook::new().with_export_sheet(
            "Joints",
            &["UniqueName", "X"],
            vec![vec![Cell::text("1"), Cell::Number(0.0)]],
        );
        let grid = wb.read_sheet("Joints").unwrap().unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[1][1], Cell::text("X"));
        assert!(wb.read_sheet("Other").unwrap().is_none());
    }

    #[test]
    fn test_replacing_a_sheet_keeps_order() {
        let mut wb = MemoryWorkbook::new()
            .with_sheet("A", vec![])
            .with_sheet("B", vec![]);
        wb.insert_sheet("A", vec![vec![Cell::Empty]]);
        assert_eq!(wb.sheet_names(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(wb.read_sheet("A").unwrap().unwrap().len(), 1);
    }
}
