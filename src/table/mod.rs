//! Column-named tables shared by every pipeline stage
//!
//! A [`Table`] keeps the sheet's column order and carries a row index: the
//! labels are assigned once (when a table is built or joined) and survive row
//! selection, so a derived table can always be lined up with the table it
//! came from.

mod cell;

pub use cell::Cell;

use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

use crate::error::{LoadError, VizResult};

/// Row-major table of [`Cell`]s with named columns
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    /// Source name (usually the sheet name), used in error messages
    name: String,
    /// Column names in order
    columns: Vec<String>,
    /// Row data; every row has exactly `columns.len()` cells
    rows: Vec<Vec<Cell>>,
    /// Row labels, parallel to `rows`
    #[serde(skip)]
    index: Vec<usize>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(name: &str, columns: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            columns,
            rows: Vec::new(),
            index: Vec::new(),
        }
    }

    /// Build a table from raw rows, labelling them `0..n`.
    ///
    /// Short rows are padded with [`Cell::Empty`]; extra trailing cells are cut.
    pub fn from_rows(name: &str, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        let index = (0..rows.len()).collect();
        Self {
            name: name.to_string(),
            columns,
            rows,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Row labels, parallel to [`Table::rows`]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve several columns at once, reporting every missing name
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, LoadError> {
        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => found.push(idx),
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(found)
        } else {
            Err(LoadError::MissingColumns {
                sheet: self.name.clone(),
                columns: missing,
            })
        }
    }

    /// Cell at (row position, column position)
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    /// Row at a position
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.rows[row]
    }

    /// Copy without the named columns; unknown names are ignored
    pub fn drop_columns(&self, names: &[&str]) -> Table {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        self.project(&keep)
    }

    /// Copy with columns renamed by `(from, to)` pairs; unknown names are ignored
    pub fn rename_columns(&self, renames: &[(&str, &str)]) -> Table {
        let mut table = self.clone();
        for column in table.columns.iter_mut() {
            if let Some((_, to)) = renames.iter().find(|(from, _)| column == from) {
                *column = to.to_string();
            }
        }
        table
    }

    /// Copy holding only the given columns, in the given order
    pub fn project(&self, columns: &[usize]) -> Table {
        Table {
            name: self.name.clone(),
            columns: columns.iter().map(|&c| self.columns[c].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| columns.iter().map(|&c| row[c].clone()).collect())
                .collect(),
            index: self.index.clone(),
        }
    }

    /// Copy holding only the rows that satisfy `keep`; labels are preserved
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let positions: Vec<usize> = (0..self.rows.len())
            .filter(|&i| keep(&self.rows[i]))
            .collect();
        self.select_rows(&positions)
    }

    /// Copy holding the rows at `positions`; labels are preserved
    pub fn select_rows(&self, positions: &[usize]) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: positions.iter().map(|&p| self.rows[p].clone()).collect(),
            index: positions.iter().map(|&p| self.index[p]).collect(),
        }
    }

    /// Copy with column `col` replaced by `values`
    pub fn with_column_values(&self, col: usize, values: Vec<Cell>) -> Table {
        debug_assert_eq!(values.len(), self.rows.len());
        let mut table = self.clone();
        for (row, value) in table.rows.iter_mut().zip(values) {
            row[col] = value;
        }
        table
    }

    /// Copy with a column set to `values`, appending it when absent
    pub fn with_column(&self, name: &str, values: Vec<Cell>) -> Table {
        match self.column_index(name) {
            Some(col) => self.with_column_values(col, values),
            None => {
                let mut table = self.clone();
                table.columns.push(name.to_string());
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row.push(value);
                }
                table
            }
        }
    }

    /// Copy carrying a new name
    pub fn renamed(&self, name: &str) -> Table {
        Table {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Append a row with the given label
    pub(crate) fn push_row(&mut self, label: usize, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
        self.index.push(label);
    }

    /// Distinct key values of a column in order of first appearance
    pub fn distinct(&self, col: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row[col].key())
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Write the table as comma-separated text with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> VizResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// The CSV export as a string
    pub fn to_csv_string(&self) -> VizResult<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            "Sample",
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec![Cell::text("a1"), Cell::Number(1.0), Cell::text("c1")],
                vec![Cell::text("a2"), Cell::Number(2.0)],
                vec![Cell::text("a1"), Cell::Number(3.0), Cell::text("c3")],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.row(1).len(), 3);
        assert_eq!(table.cell(1, 2), &Cell::Empty);
        assert_eq!(table.index(), &[0, 1, 2]);
    }

    #[test]
    fn test_drop_and_rename() {
        let table = sample().drop_columns(&["B", "Missing"]).rename_columns(&[("A", "Z")]);
        assert_eq!(table.columns(), &["Z".to_string(), "C".to_string()]);
        assert_eq!(table.cell(2, 1), &Cell::text("c3"));
    }

    #[test]
    fn test_require_columns_lists_every_missing_name() {
        let err = sample().require_columns(&["A", "X", "Y"]).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingColumns {
                sheet: "Sample".into(),
                columns: vec!["X".into(), "Y".into()],
            }
        );
    }

    #[test]
    fn test_filter_keeps_labels() {
        let table = sample().filter_rows(|row| row[0].key() == "a1");
        assert_eq!(table.len(), 2);
        assert_eq!(table.index(), &[0, 2]);
    }

    #[test]
    fn test_with_column_appends_then_replaces() {
        let table = sample().with_column("N", vec![Cell::Number(0.0); 3]);
        assert_eq!(table.columns().len(), 4);
        let table = table.with_column("N", vec![Cell::Number(1.0); 3]);
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.cell(0, 3), &Cell::Number(1.0));
    }

    #[test]
    fn test_distinct_preserves_first_appearance() {
        assert_eq!(sample().distinct(0), vec!["a1".to_string(), "a2".to_string()]);
    }

    #[test]
    fn test_csv_export() {
        let csv = sample().drop_columns(&["C"]).to_csv_string().unwrap();
        assert_eq!(csv, "A,B\na1,1\na2,2\na1,3\n");
    }

    #[test]
    fn test_empty_table_exports_header_only() {
        let table = Table::new("Empty", vec!["X".into(), "Y".into()]);
        assert_eq!(table.to_csv_string().unwrap(), "X,Y\n");
    }
}
