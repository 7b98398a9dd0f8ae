//! Spreadsheet files (xlsx, xlsm, xls, ods) read through calamine

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::Workbook;
use crate::error::{LoadError, VizResult};
use crate::table::Cell;

/// A workbook file on disk
pub struct XlsxWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl XlsxWorkbook {
    /// Open a workbook; the format is picked from the file extension
    pub fn open<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let path = path.as_ref().to_path_buf();
        let sheets = open_workbook_auto(&path)
            .map_err(|e| LoadError::Workbook(format!("{}: {}", path.display(), e)))?;
        log::info!("Opened workbook {}", path.display());
        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> VizResult<Option<Vec<Vec<Cell>>>> {
        if !self.sheet_names().iter().any(|n| n == name) {
            return Ok(None);
        }
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| LoadError::Workbook(format!("{}: {}", name, e)))?;
        Ok(Some(range_to_grid(&range)))
    }
}

/// Convert a calamine cell
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

/// Expand a used range back to absolute sheet coordinates.
///
/// calamine trims leading empty rows and columns; header rows are addressed
/// from the top of the sheet, so the offset is restored with blanks.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut grid: Vec<Vec<Cell>> = (0..row0).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col0 as usize];
        cells.extend(row.iter().map(to_cell));
        grid.push(cells);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::Int(4)), Cell::Number(4.0));
        assert_eq!(to_cell(&Data::Float(-0.5)), Cell::Number(-0.5));
        assert_eq!(to_cell(&Data::String("Dead".into())), Cell::text("Dead"));
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn test_offset_range_is_restored() {
        let mut range = Range::new((1, 2), (2, 3));
        range.set_value((1, 2), Data::String("Story".into()));
        range.set_value((2, 3), Data::Float(1.0));
        let grid = range_to_grid(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1][2], Cell::text("Story"));
        assert_eq!(grid[2][3], Cell::Number(1.0));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let err = XlsxWorkbook::open("does/not/exist.xlsx").err().unwrap();
        assert!(err.is_load_error());
    }
}
