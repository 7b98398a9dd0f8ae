//! Column object connectivity

use std::collections::HashSet;

use crate::error::VizResult;
use crate::loader::{load_table, SheetSpec, Workbook};
use crate::schema;
use crate::table::Table;

/// Column objects and the two joints each one connects
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConnectivity {
    table: Table,
    /// Position of `UniquePtI`
    pt_i: usize,
    /// Position of `UniquePtJ`
    pt_j: usize,
}

impl ColumnConnectivity {
    /// Load from the default `Column Object Connectivity` sheet
    pub fn load<W: Workbook + ?Sized>(workbook: &mut W) -> VizResult<Self> {
        Self::load_with(workbook, &SheetSpec::column_connectivity())
    }

    /// Load with a custom [`SheetSpec`]
    pub fn load_with<W: Workbook + ?Sized>(workbook: &mut W, spec: &SheetSpec) -> VizResult<Self> {
        Self::from_table(load_table(workbook, spec)?)
    }

    /// Wrap an already normalized table
    pub fn from_table(table: Table) -> VizResult<Self> {
        let idx = table.require_columns(&[
            schema::UNIQUE_NAME,
            schema::STORY,
            schema::UNIQUE_PT_I,
            schema::UNIQUE_PT_J,
        ])?;
        Ok(Self {
            pt_i: idx[2],
            pt_j: idx[3],
            table,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of column objects
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every joint that ends a column, on any story
    pub fn endpoint_ids(&self) -> HashSet<String> {
        self.table
            .rows()
            .iter()
            .flat_map(|row| [row[self.pt_i].key(), row[self.pt_j].key()])
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn columns() -> ColumnConnectivity {
        let table = Table::from_rows(
            "Columns",
            vec!["UniqueName".into(), "Story".into(), "UniquePtI".into(), "UniquePtJ".into()],
            vec![
                vec![Cell::text("C1"), Cell::text("2"), Cell::text("1"), Cell::text("3")],
                vec![Cell::text("C2"), Cell::text("1"), Cell::Number(3.0), Cell::text("5")],
            ],
        );
        ColumnConnectivity::from_table(table).unwrap()
    }

    #[test]
    fn test_endpoints_span_all_stories() {
        let ids = columns().endpoint_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("1") && ids.contains("3") && ids.contains("5"));
    }

    #[test]
    fn test_required_columns() {
        let table = Table::new("Columns", vec!["UniqueName".into(), "Story".into()]);
        assert!(ColumnConnectivity::from_table(table).unwrap_err().is_load_error());
    }
}
