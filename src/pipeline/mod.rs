//! Join, filter and transform stages
//!
//! Every stage takes tables by reference and returns a new
//! [`DisplacementTable`]; nothing is modified in place.

mod filter;
mod join;
mod transform;

pub use filter::column_joints_only;
pub use join::{inner_join, join, JoinReport};
pub use transform::{normalize, scale, scale_from, value_range};

use crate::error::{LoadError, VizError, VizResult};
use crate::schema;
use crate::selection::Direction;
use crate::table::{Cell, Table};

/// Column positions every displacement stage relies on.
///
/// Resolved once per table, so selecting a direction never involves a name
/// lookup that could fail at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplacementColumns {
    pub unique_name: usize,
    pub story: usize,
    pub output_case: usize,
    pub ux: usize,
    pub uy: usize,
    pub uz: usize,
    pub x: usize,
    pub y: usize,
}

impl DisplacementColumns {
    pub fn resolve(table: &Table) -> Result<Self, LoadError> {
        let idx = table.require_columns(&[
            schema::UNIQUE_NAME,
            schema::STORY,
            schema::OUTPUT_CASE,
            schema::UX,
            schema::UY,
            schema::UZ,
            schema::X,
            schema::Y,
        ])?;
        Ok(Self {
            unique_name: idx[0],
            story: idx[1],
            output_case: idx[2],
            ux: idx[3],
            uy: idx[4],
            uz: idx[5],
            x: idx[6],
            y: idx[7],
        })
    }

    /// Position of a displacement component
    pub fn direction(&self, direction: Direction) -> usize {
        match direction {
            Direction::Ux => self.ux,
            Direction::Uy => self.uy,
            Direction::Uz => self.uz,
        }
    }
}

/// Joined displacement rows with resolved column positions
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementTable {
    table: Table,
    columns: DisplacementColumns,
}

impl DisplacementTable {
    /// Wrap a table holding displacement and joint coordinate columns
    pub fn new(table: Table) -> VizResult<Self> {
        let columns = DisplacementColumns::resolve(&table)?;
        Ok(Self { table, columns })
    }

    /// Same column layout, different rows or values
    fn derive(&self, table: Table) -> Self {
        Self {
            table,
            columns: self.columns,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn columns(&self) -> DisplacementColumns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Numeric values of column `col`, failing on the first non-numeric cell
    pub fn numbers(&self, col: usize) -> VizResult<Vec<f64>> {
        self.table
            .rows()
            .iter()
            .zip(self.table.index())
            .map(|(row, &label)| {
                row[col].to_number().ok_or_else(|| VizError::TypeCoercion {
                    column: self.table.columns()[col].clone(),
                    row: label,
                    value: row[col].to_string(),
                })
            })
            .collect()
    }

    /// Values of a displacement component
    pub fn values(&self, direction: Direction) -> VizResult<Vec<f64>> {
        self.numbers(self.columns.direction(direction))
    }

    /// Copy with the direction column converted to numbers
    pub fn coerce(&self, direction: Direction) -> VizResult<Self> {
        let values = self.values(direction)?;
        let col = self.columns.direction(direction);
        Ok(self.with_numbers(col, values))
    }

    /// Copy with column `col` set from `values`
    fn with_numbers(&self, col: usize, values: Vec<f64>) -> Self {
        let cells = values.into_iter().map(Cell::Number).collect();
        self.derive(self.table.with_column_values(col, cells))
    }

    /// Copy with an extra (or replaced) numeric column
    fn with_named_numbers(&self, name: &str, values: Vec<f64>) -> Self {
        let cells = values.into_iter().map(Cell::Number).collect();
        self.derive(self.table.with_column(name, cells))
    }

    /// Copy holding only the rows that satisfy `keep`
    fn filter<F>(&self, keep: F) -> Self
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.derive(self.table.filter_rows(keep))
    }

    /// Rows of one story under one output case
    pub fn select(&self, story: &str, load_case: &str) -> Self {
        let DisplacementColumns {
            story: story_col,
            output_case,
            ..
        } = self.columns;
        self.filter(|row| row[story_col].key() == story && row[output_case].key() == load_case)
    }

    /// Distinct stories in order of first appearance
    pub fn stories(&self) -> Vec<String> {
        self.table.distinct(self.columns.story)
    }

    /// Distinct output cases in order of first appearance
    pub fn load_cases(&self) -> Vec<String> {
        self.table.distinct(self.columns.output_case)
    }

    /// Values of the normalized companion column, when present
    pub fn norm(&self) -> Option<VizResult<Vec<f64>>> {
        self.table
            .column_index(schema::NORM_DISP)
            .map(|col| self.numbers(col))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{row, table};
    use super::*;

    #[test]
    fn test_coerce_parses_text() {
        let mut r = row("1", "1", "Dead", 0.0, 0.0, 0.0);
        r[5] = Cell::text("-0.75");
        let coerced = table(vec![r]).coerce(Direction::Uz).unwrap();
        assert_eq!(coerced.table().cell(0, 5), &Cell::Number(-0.75));
    }

    #[test]
    fn test_coerce_reports_column_and_row() {
        let mut bad = row("2", "1", "Dead", 0.0, 0.0, 0.0);
        bad[5] = Cell::text("n/a");
        let t = table(vec![row("1", "1", "Dead", -1.0, 0.0, 0.0), bad]);
        match t.coerce(Direction::Uz).unwrap_err() {
            VizError::TypeCoercion { column, row, value } => {
                assert_eq!(column, "Uz");
                assert_eq!(row, 1);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // the other components are untouched
        assert!(t.coerce(Direction::Ux).is_ok());
    }

    #[test]
    fn test_select_story_and_case() {
        let t = table(vec![
            row("1", "1", "Dead", -1.0, 0.0, 0.0),
            row("1", "1", "Live", -2.0, 0.0, 0.0),
            row("1", "2", "Dead", -3.0, 0.0, 0.0),
        ]);
        let selected = t.select("1", "Dead");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.table().index(), &[0]);
        assert!(t.select("9", "Dead").is_empty());
    }

    #[test]
    fn test_distinct_stories_and_cases() {
        let t = table(vec![
            row("1", "2", "Live", -1.0, 0.0, 0.0),
            row("1", "1", "Dead", -2.0, 0.0, 0.0),
            row("2", "2", "Live", -3.0, 0.0, 0.0),
        ]);
        assert_eq!(t.stories(), vec!["2".to_string(), "1".to_string()]);
        assert_eq!(t.load_cases(), vec!["Live".to_string(), "Dead".to_string()]);
    }
}
