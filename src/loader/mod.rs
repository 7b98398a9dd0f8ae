//! Workbook access and per-sheet table normalization
//!
//! ETABS exports each table on its own sheet with a title row, a header row
//! and a units row before the data. [`load_table`] turns such a sheet into a
//! [`Table`] according to a [`SheetSpec`].

mod memory;
mod xlsx;

pub use memory::MemoryWorkbook;
pub use xlsx::XlsxWorkbook;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, VizResult};
use crate::schema;
use crate::table::{Cell, Table};

/// Source of raw sheet grids
pub trait Workbook {
    /// Names of the sheets in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Cell grid of a sheet in absolute sheet coordinates, `None` when absent
    fn read_sheet(&mut self, name: &str) -> VizResult<Option<Vec<Vec<Cell>>>>;
}

/// How to read one sheet into a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Sheet name
    pub sheet: String,
    /// Zero-based row holding the column names; the next row (units) is skipped
    pub header_row: usize,
    /// Columns removed after reading
    pub drop_columns: Vec<String>,
    /// `(from, to)` column renames applied after dropping
    pub renames: Vec<(String, String)>,
    /// Columns that must exist after renaming
    pub required: Vec<String>,
}

impl SheetSpec {
    /// Spec for a sheet with the default ETABS layout and no rules
    pub fn new(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            header_row: 1,
            drop_columns: Vec::new(),
            renames: Vec::new(),
            required: Vec::new(),
        }
    }

    /// `Column Object Connectivity`
    pub fn column_connectivity() -> Self {
        Self::new(schema::COLUMN_CONNECTIVITY_SHEET)
            .with_dropped(&["GUID", "ColumnBay"])
            .with_rename(schema::UNIQUE_NAME_RAW, schema::UNIQUE_NAME)
            .with_required(&[
                schema::UNIQUE_NAME,
                schema::STORY,
                schema::UNIQUE_PT_I,
                schema::UNIQUE_PT_J,
            ])
    }

    /// `Point Object Connectivity`
    pub fn point_connectivity() -> Self {
        Self::new(schema::POINT_CONNECTIVITY_SHEET)
            .with_dropped(&["PointBay", "IsSpecial", "GUID", "Is Auto Point"])
            .with_rename(schema::UNIQUE_NAME_RAW, schema::UNIQUE_NAME)
            .with_required(&[schema::UNIQUE_NAME, schema::STORY, schema::X, schema::Y])
    }

    /// `Joint Displacements`
    pub fn joint_displacements() -> Self {
        Self::new(schema::JOINT_DISPLACEMENTS_SHEET)
            .with_rename(schema::UNIQUE_NAME_RAW, schema::UNIQUE_NAME)
            .with_required(&[
                schema::UNIQUE_NAME,
                schema::STORY,
                schema::OUTPUT_CASE,
                schema::UX,
                schema::UY,
                schema::UZ,
            ])
    }

    /// Read from a different sheet name
    pub fn with_sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    /// Set the header row
    pub fn with_header_row(mut self, row: usize) -> Self {
        self.header_row = row;
        self
    }

    /// Add columns to drop
    pub fn with_dropped(mut self, columns: &[&str]) -> Self {
        self.drop_columns
            .extend(columns.iter().map(|c| c.to_string()));
        self
    }

    /// Add a column rename
    pub fn with_rename(mut self, from: &str, to: &str) -> Self {
        self.renames.push((from.to_string(), to.to_string()));
        self
    }

    /// Add required columns
    pub fn with_required(mut self, columns: &[&str]) -> Self {
        self.required.extend(columns.iter().map(|c| c.to_string()));
        self
    }
}

/// Read one sheet and normalize it into a table
pub fn load_table<W: Workbook + ?Sized>(workbook: &mut W, spec: &SheetSpec) -> VizResult<Table> {
    let grid = workbook
        .read_sheet(&spec.sheet)?
        .ok_or_else(|| LoadError::SheetNotFound(spec.sheet.clone()))?;

    let header = grid
        .get(spec.header_row)
        .ok_or_else(|| LoadError::MissingHeaderRow {
            sheet: spec.sheet.clone(),
            row: spec.header_row,
        })?;

    let mut unnamed = Vec::new();
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.key();
            if name.is_empty() {
                unnamed.push(i);
                format!("Unnamed: {}", i)
            } else {
                name
            }
        })
        .collect();

    // header row, then units row, then data
    let mut blank = 0;
    let rows: Vec<Vec<Cell>> = grid
        .iter()
        .skip(spec.header_row + 2)
        .filter(|row| {
            let empty = row.iter().all(Cell::is_empty);
            if empty {
                blank += 1;
            }
            !empty
        })
        .cloned()
        .collect();
    if blank > 0 {
        log::debug!("'{}': skipped {} blank row(s)", spec.sheet, blank);
    }

    let raw = Table::from_rows(&spec.sheet, columns, rows);

    // Unnamed columns with no data are spreadsheet padding
    let padding: Vec<&str> = unnamed
        .iter()
        .filter(|&&col| raw.rows().iter().all(|row| row[col].is_empty()))
        .map(|&col| raw.columns()[col].as_str())
        .collect();
    let raw = raw.drop_columns(&padding);

    let drop: Vec<&str> = spec.drop_columns.iter().map(String::as_str).collect();
    for name in &drop {
        if raw.column_index(name).is_none() {
            log::debug!("'{}': no column '{}' to drop", spec.sheet, name);
        }
    }
    let renames: Vec<(&str, &str)> = spec
        .renames
        .iter()
        .map(|(from, to)| (from.as_str(), to.as_str()))
        .collect();
    let table = raw.drop_columns(&drop).rename_columns(&renames);

    let required: Vec<&str> = spec.required.iter().map(String::as_str).collect();
    table.require_columns(&required)?;

    log::debug!(
        "'{}': loaded {} row(s) x {} column(s)",
        spec.sheet,
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;

    fn workbook() -> MemoryWorkbook {
        MemoryWorkbook::new().with_sheet(
            "Sheet",
            vec![
                vec![Cell::text("TABLE: Sheet")],
                vec![Cell::text("Unique Name"), Cell::text("GUID"), Cell::text("Value"), Cell::Empty],
                vec![Cell::Empty, Cell::Empty, Cell::text("mm"), Cell::Empty],
                vec![Cell::text("1"), Cell::text("abc"), Cell::Number(0.5), Cell::Empty],
                vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
                vec![Cell::text("2"), Cell::text("def"), Cell::Number(1.5), Cell::Empty],
            ],
        )
    }

    fn spec() -> SheetSpec {
        SheetSpec::new("Sheet")
            .with_dropped(&["GUID", "NotThere"])
            .with_rename("Unique Name", "UniqueName")
            .with_required(&["UniqueName", "Value"])
    }

    #[test]
    fn test_units_row_and_blank_rows_are_skipped() {
        let table = load_table(&mut workbook(), &spec()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|row| row[1] != Cell::text("mm")));
        assert_eq!(table.cell(1, 0), &Cell::text("2"));
    }

    #[test]
    fn test_drop_rename_and_padding() {
        let table = load_table(&mut workbook(), &spec()).unwrap();
        assert_eq!(table.columns(), &["UniqueName".to_string(), "Value".to_string()]);
    }

    #[test]
    fn test_missing_sheet() {
        let err = load_table(&mut workbook(), &SheetSpec::new("Nope")).unwrap_err();
        assert!(matches!(err, VizError::Load(LoadError::SheetNotFound(ref s)) if s == "Nope"));
    }

    #[test]
    fn test_missing_header_row() {
        let spec = SheetSpec::new("Sheet").with_header_row(10);
        let err = load_table(&mut workbook(), &spec).unwrap_err();
        assert!(matches!(
            err,
            VizError::Load(LoadError::MissingHeaderRow { row: 10, .. })
        ));
    }

    #[test]
    fn test_missing_required_column_after_rename() {
        let spec = SheetSpec::new("Sheet").with_required(&["UniqueName"]);
        let err = load_table(&mut workbook(), &spec).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let mut wb = MemoryWorkbook::new().with_sheet(
            "Sheet",
            vec![vec![Cell::text("TABLE")], vec![Cell::text("A")]],
        );
        let table = load_table(&mut wb, &SheetSpec::new("Sheet")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["A".to_string()]);
    }
}
