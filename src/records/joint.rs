//! Point object connectivity - joints and their plan coordinates

use std::collections::HashSet;

use crate::error::{LoadError, VizResult};
use crate::loader::{load_table, SheetSpec, Workbook};
use crate::schema;
use crate::table::Table;

/// Joints keyed by (UniqueName, Story)
#[derive(Debug, Clone, PartialEq)]
pub struct PointConnectivity {
    table: Table,
}

impl PointConnectivity {
    /// Load from the default `Point Object Connectivity` sheet
    pub fn load<W: Workbook + ?Sized>(workbook: &mut W) -> VizResult<Self> {
        Self::load_with(workbook, &SheetSpec::point_connectivity())
    }

    /// Load with a custom [`SheetSpec`]
    pub fn load_with<W: Workbook + ?Sized>(workbook: &mut W, spec: &SheetSpec) -> VizResult<Self> {
        Self::from_table(load_table(workbook, spec)?)
    }

    /// Wrap a normalized table, rejecting duplicate (UniqueName, Story) keys
    pub fn from_table(table: Table) -> VizResult<Self> {
        let idx = table.require_columns(&[
            schema::UNIQUE_NAME,
            schema::STORY,
            schema::X,
            schema::Y,
        ])?;
        let (name, story) = (idx[0], idx[1]);

        let mut seen = HashSet::with_capacity(table.len());
        for row in table.rows() {
            let key = (row[name].key(), row[story].key());
            if !seen.insert(key.clone()) {
                return Err(LoadError::DuplicateKey {
                    sheet: table.name().to_string(),
                    name: key.0,
                    story: key.1,
                }
                .into());
            }
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of joints
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
