//! Cell - a single loosely typed spreadsheet value

use serde::{Deserialize, Serialize};
use std::fmt;

/// A spreadsheet cell as read from the workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric value (integers are widened to f64)
    Number(f64),
    /// Free text
    Text(String),
    /// Blank cell
    #[default]
    Empty,
}

impl Cell {
    /// Create a text cell
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    /// True for blank cells and whitespace-only text
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric view of the cell.
    /// Text is parsed after trimming; only finite values are accepted.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Key form used for joins and membership tests.
    ///
    /// Numbers and text compare by their display form, so a joint stored as
    /// `12` in one sheet and `"12"` in another refer to the same joint.
    pub fn key(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_text_is_coerced() {
        assert_eq!(Cell::text(" -0.25 ").to_number(), Some(-0.25));
        assert_eq!(Cell::Number(3.0).to_number(), Some(3.0));
        assert_eq!(Cell::text("abc").to_number(), None);
        assert_eq!(Cell::Empty.to_number(), None);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert_eq!(Cell::text("NaN").to_number(), None);
        assert_eq!(Cell::text("inf").to_number(), None);
        assert_eq!(Cell::Number(f64::NAN).to_number(), None);
    }

    #[test]
    fn test_keys_match_across_representations() {
        assert_eq!(Cell::Number(12.0).key(), "12");
        assert_eq!(Cell::text("12 ").key(), "12");
        assert_eq!(Cell::Empty.key(), "");
    }
}
