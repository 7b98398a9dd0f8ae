//! Restrict displacements to joints that end a column

use super::DisplacementTable;
use crate::records::ColumnConnectivity;

/// Keep rows whose joint is a column end joint.
///
/// Membership is global: a joint id is kept on every story it appears on as
/// soon as any column, on any story, references it as `UniquePtI` or
/// `UniquePtJ`. Row labels are preserved.
pub fn column_joints_only(
    joined: &DisplacementTable,
    columns: &ColumnConnectivity,
) -> DisplacementTable {
    let endpoints = columns.endpoint_ids();
    let name = joined.columns().unique_name;
    let filtered = joined.filter(|row| endpoints.contains(&row[name].key()));
    log::info!(
        "Column joint filter kept {} of {} row(s) ({} column end joint(s))",
        filtered.len(),
        joined.len(),
        endpoints.len()
    );
    filtered
}
