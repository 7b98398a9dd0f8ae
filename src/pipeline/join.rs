//! Inner join of displacements with joint coordinates

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::DisplacementTable;
use crate::error::VizResult;
use crate::records::{JointDisplacements, PointConnectivity};
use crate::schema;
use crate::table::Table;

/// Row accounting for a join.
///
/// Rows without a partner are not an error, but a non-zero
/// `dropped_rows` usually means the sheets come from different model runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    /// Rows in the left table
    pub left_rows: usize,
    /// Rows in the right table
    pub right_rows: usize,
    /// Rows produced
    pub joined_rows: usize,
    /// Left rows without a matching right key
    pub dropped_rows: usize,
    /// Distinct unmatched keys
    pub dropped_keys: BTreeSet<Vec<String>>,
}

impl JoinReport {
    /// True when any left row found no partner
    pub fn has_mismatch(&self) -> bool {
        self.dropped_rows > 0
    }
}

/// Relational inner join on equal `keys`.
///
/// Output columns are the left columns followed by the right non-key columns
/// whose names are not already taken by the left side. Rows follow the left
/// table's order and are labelled `0..n`.
pub fn inner_join(left: &Table, right: &Table, keys: &[&str]) -> VizResult<(Table, JoinReport)> {
    let left_keys = left.require_columns(keys)?;
    let right_keys = right.require_columns(keys)?;

    let mut lookup: HashMap<Vec<String>, Vec<usize>> = HashMap::with_capacity(right.len());
    for (pos, row) in right.rows().iter().enumerate() {
        let key = right_keys.iter().map(|&c| row[c].key()).collect();
        lookup.entry(key).or_default().push(pos);
    }

    let right_extra: Vec<usize> = (0..right.columns().len())
        .filter(|c| !right_keys.contains(c))
        .filter(|&c| {
            let name = &right.columns()[c];
            let taken = left.column_index(name).is_some();
            if taken {
                log::debug!("join: keeping left '{}' over '{}' copy", name, right.name());
            }
            !taken
        })
        .collect();

    let mut columns = left.columns().to_vec();
    columns.extend(right_extra.iter().map(|&c| right.columns()[c].clone()));
    let mut joined = Table::new(left.name(), columns);

    let mut report = JoinReport {
        left_rows: left.len(),
        right_rows: right.len(),
        ..JoinReport::default()
    };

    let mut label = 0;
    for row in left.rows() {
        let key: Vec<String> = left_keys.iter().map(|&c| row[c].key()).collect();
        match lookup.get(&key) {
            Some(partners) => {
                for &partner in partners {
                    let mut out = row.clone();
                    out.extend(right_extra.iter().map(|&c| right.row(partner)[c].clone()));
                    joined.push_row(label, out);
                    label += 1;
                }
            }
            None => {
                report.dropped_rows += 1;
                report.dropped_keys.insert(key);
            }
        }
    }
    report.joined_rows = joined.len();

    Ok((joined, report))
}

/// Attach joint coordinates to every displacement row.
///
/// Displacement rows whose (UniqueName, Story) has no joint are dropped and
/// counted in the report.
pub fn join(
    displacements: &JointDisplacements,
    joints: &PointConnectivity,
) -> VizResult<(DisplacementTable, JoinReport)> {
    let (table, report) = inner_join(
        displacements.table(),
        joints.table(),
        &[schema::UNIQUE_NAME, schema::STORY],
    )?;

    if report.has_mismatch() {
        log::warn!(
            "{} displacement row(s) dropped: {} joint/story key(s) have no point connectivity entry",
            report.dropped_rows,
            report.dropped_keys.len()
        );
    }
    log::info!(
        "Joined {} displacement row(s) with {} joint(s) -> {} row(s)",
        report.left_rows,
        report.right_rows,
        report.joined_rows
    );

    let joined = DisplacementTable::new(table.renamed("Joined Displacements"))?;
    Ok((joined, report))
}
