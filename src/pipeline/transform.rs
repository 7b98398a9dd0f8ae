//! Display scaling and min-max normalization

use std::collections::HashMap;

use super::DisplacementTable;
use crate::error::{VizError, VizResult};
use crate::schema;
use crate::selection::Direction;

/// Multiply a displacement component by `factor`
pub fn scale(
    table: &DisplacementTable,
    direction: Direction,
    factor: f64,
) -> VizResult<DisplacementTable> {
    let values = table
        .values(direction)?
        .into_iter()
        .map(|v| v * factor)
        .collect();
    Ok(table.with_numbers(table.columns().direction(direction), values))
}

/// Set a component of `table` to `source`'s value times `factor`.
///
/// Rows are matched by label, so `table` may be any row subset of `source`;
/// the result's values never depend on what `table` itself held.
pub fn scale_from(
    table: &DisplacementTable,
    source: &DisplacementTable,
    direction: Direction,
    factor: f64,
) -> VizResult<DisplacementTable> {
    let col = source.columns().direction(direction);
    let by_label: HashMap<usize, usize> = source
        .table()
        .index()
        .iter()
        .enumerate()
        .map(|(pos, &label)| (label, pos))
        .collect();

    let values = table
        .table()
        .index()
        .iter()
        .map(|label| {
            let pos = *by_label
                .get(label)
                .ok_or(VizError::UnalignedRow(*label))?;
            let cell = source.table().cell(pos, col);
            cell.to_number()
                .map(|v| v * factor)
                .ok_or_else(|| VizError::TypeCoercion {
                    column: direction.column().to_string(),
                    row: *label,
                    value: cell.to_string(),
                })
        })
        .collect::<VizResult<Vec<f64>>>()?;

    Ok(table.with_numbers(table.columns().direction(direction), values))
}

/// Smallest and largest value of a component, `None` for an empty table
pub fn value_range(table: &DisplacementTable, direction: Direction) -> VizResult<Option<(f64, f64)>> {
    let values = table.values(direction)?;
    Ok(values.iter().fold(None, |range, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }))
}

/// Append `NormDisp = 1 - (v - min) / (max - min)` over all rows.
///
/// The smallest value maps to 1 and the largest to 0. With a zero range
/// (a single row, or all values equal) every row gets 1.
pub fn normalize(table: &DisplacementTable, direction: Direction) -> VizResult<DisplacementTable> {
    let values = table.values(direction)?;
    let norm = match value_range(table, direction)? {
        Some((min, max)) if max > min => {
            let span = max - min;
            values.iter().map(|v| 1.0 - (v - min) / span).collect()
        }
        Some(_) => {
            log::debug!("{}: zero range, NormDisp set to 1.0", direction);
            vec![1.0; values.len()]
        }
        None => Vec::new(),
    };
    Ok(table.with_named_numbers(schema::NORM_DISP, norm))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{row, table};
    use super::*;
    use crate::table::Cell;
    use approx::assert_relative_eq;

    fn sample() -> DisplacementTable {
        table(vec![
            row("1", "1", "Dead", -0.5, 0.0, 0.0),
            row("2", "1", "Dead", -1.5, 30.0, 0.0),
            row("3", "2", "Live", -1.0, 0.0, 30.0),
        ])
    }

    #[test]
    fn test_scale_is_linear() {
        let scaled = scale(&sample(), Direction::Uz, 3.0).unwrap();
        assert_eq!(scaled.values(Direction::Uz).unwrap(), vec![-1.5, -4.5, -3.0]);
        // other components are untouched
        assert_eq!(scaled.values(Direction::Ux).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scale_composes() {
        let twice = scale(&scale(&sample(), Direction::Uz, 2.0).unwrap(), Direction::Uz, 5.0).unwrap();
        let once = scale(&sample(), Direction::Uz, 10.0).unwrap();
        for (a, b) in twice
            .values(Direction::Uz)
            .unwrap()
            .iter()
            .zip(once.values(Direction::Uz).unwrap())
        {
            assert_relative_eq!(*a, b);
        }
    }

    #[test]
    fn test_scale_from_reads_source_values() {
        let source = sample();
        // subset whose own values were already altered
        let subset = scale(&source.filter(|r| r[0].key() != "2"), Direction::Uz, 100.0).unwrap();
        let scaled = scale_from(&subset, &source, Direction::Uz, 2.0).unwrap();
        assert_eq!(scaled.values(Direction::Uz).unwrap(), vec![-1.0, -2.0]);
        assert_eq!(scaled.table().index(), &[0, 2]);
    }

    #[test]
    fn test_scale_from_rejects_unknown_labels() {
        let source = sample().filter(|r| r[0].key() == "1");
        let err = scale_from(&sample(), &source, Direction::Uz, 1.0).unwrap_err();
        assert!(matches!(err, VizError::UnalignedRow(1)));
    }

    #[test]
    fn test_normalize_inverts_range() {
        let norm = normalize(&sample(), Direction::Uz).unwrap();
        let values = norm.norm().unwrap().unwrap();
        // -0.5 is the largest value, -1.5 the smallest
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 1.0);
        assert_relative_eq!(values[2], 0.5);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_zero_range() {
        let flat = table(vec![
            row("1", "1", "Dead", -2.0, 0.0, 0.0),
            row("2", "1", "Dead", -2.0, 1.0, 0.0),
        ]);
        let values = normalize(&flat, Direction::Uz).unwrap().norm().unwrap().unwrap();
        assert_eq!(values, vec![1.0, 1.0]);

        let single = table(vec![row("1", "1", "Dead", 4.0, 0.0, 0.0)]);
        let values = normalize(&single, Direction::Uz).unwrap().norm().unwrap().unwrap();
        assert_eq!(values, vec![1.0]);
    }

    #[test]
    fn test_normalize_empty_table() {
        let empty = table(Vec::new());
        let norm = normalize(&empty, Direction::Uz).unwrap();
        assert!(norm.is_empty());
        assert!(norm.table().column_index("NormDisp").is_some());
    }

    #[test]
    fn test_normalize_replaces_previous_column() {
        let once = normalize(&sample(), Direction::Uz).unwrap();
        let twice = normalize(&once, Direction::Uz).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_numeric_component_fails() {
        let mut bad = row("1", "1", "Dead", 0.0, 0.0, 0.0);
        bad[5] = Cell::Empty;
        assert!(matches!(
            normalize(&table(vec![bad]), Direction::Uz),
            Err(VizError::TypeCoercion { .. })
        ));
    }
}
