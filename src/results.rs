//! View results handed to the presenters

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::VizResult;
use crate::selection::Direction;
use crate::table::Table;

/// One bubble of the plan-view plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Plan X coordinate of the joint
    pub x: f64,
    /// Plan Y coordinate of the joint
    pub y: f64,
    /// Scaled displacement (colour)
    pub value: f64,
    /// Normalized displacement in [0, 1] (marker size)
    pub norm: f64,
}

/// Row counts through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    /// Displacement rows after excluding the modal case
    pub displacement_rows: usize,
    /// Rows surviving the join
    pub joined_rows: usize,
    /// Rows dropped by the join for lack of a joint
    pub dropped_on_join: usize,
    /// Rows at column end joints, all stories and cases
    pub filtered_rows: usize,
    /// Rows of the selected story and case
    pub selected_rows: usize,
    /// Smallest scaled value over the filtered rows
    pub min_value: Option<f64>,
    /// Largest scaled value over the filtered rows
    pub max_value: Option<f64>,
}

/// Plot input and display table for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplacementView {
    /// Plot title, e.g. `Vertical Displacement - Story1`
    pub title: String,
    pub story: String,
    pub load_case: String,
    pub direction: Direction,
    pub scale: u32,
    /// Plot input
    pub points: Vec<PlotPoint>,
    /// Selected rows without bookkeeping columns
    pub display: Table,
    pub summary: ViewSummary,
}

impl DisplacementView {
    /// True when the selection matched no rows
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The display table as CSV text
    pub fn to_csv(&self) -> VizResult<String> {
        self.display.to_csv_string()
    }

    /// Write the display table as a CSV file
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> VizResult<()> {
        let file = std::fs::File::create(path)?;
        self.display.write_csv(std::io::BufWriter::new(file))
    }

    /// Plot input and display table as JSON
    pub fn to_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
