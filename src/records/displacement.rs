//! Joint displacement results

use crate::error::VizResult;
use crate::loader::{load_table, SheetSpec, Workbook};
use crate::schema;
use crate::table::Table;

/// Joint displacements per output case, with the excluded case removed
#[derive(Debug, Clone, PartialEq)]
pub struct JointDisplacements {
    table: Table,
}

impl JointDisplacements {
    /// Load from the default `Joint Displacements` sheet, dropping `Modal` rows
    pub fn load<W: Workbook + ?Sized>(workbook: &mut W) -> VizResult<Self> {
        Self::load_with(workbook, &SheetSpec::joint_displacements(), schema::MODAL_CASE)
    }

    /// Load with a custom [`SheetSpec`] and excluded output case
    pub fn load_with<W: Workbook + ?Sized>(
        workbook: &mut W,
        spec: &SheetSpec,
        excluded_case: &str,
    ) -> VizResult<Self> {
        Self::from_table(load_table(workbook, spec)?, excluded_case)
    }

    /// Wrap a normalized table, removing rows of `excluded_case`
    pub fn from_table(table: Table, excluded_case: &str) -> VizResult<Self> {
        let idx = table.require_columns(&[
            schema::UNIQUE_NAME,
            schema::STORY,
            schema::OUTPUT_CASE,
            schema::UX,
            schema::UY,
            schema::UZ,
        ])?;
        let case = idx[2];
        let kept = table.filter_rows(|row| row[case].key() != excluded_case);
        let removed = table.len() - kept.len();
        if removed > 0 {
            log::info!(
                "Excluded {} '{}' displacement row(s)",
                removed,
                excluded_case
            );
        }
        Ok(Self { table: kept })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of displacement rows
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
