//! Viewer options

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::VizResult;
use crate::loader::SheetSpec;
use crate::schema;
use crate::selection::{Direction, ScaleFactor};

/// Options for loading a workbook and the initial view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Workbook to open
    pub workbook: Option<PathBuf>,
    /// Sheet with column object connectivity
    pub column_sheet: String,
    /// Sheet with point object connectivity
    pub point_sheet: String,
    /// Sheet with joint displacements
    pub displacement_sheet: String,
    /// Zero-based header row shared by the three sheets
    pub header_row: usize,
    /// Output case removed from the displacements
    pub excluded_case: String,
    /// Initial displacement component
    pub direction: Direction,
    /// Initial display scale
    pub scale: ScaleFactor,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            workbook: None,
            column_sheet: schema::COLUMN_CONNECTIVITY_SHEET.to_string(),
            point_sheet: schema::POINT_CONNECTIVITY_SHEET.to_string(),
            displacement_sheet: schema::JOINT_DISPLACEMENTS_SHEET.to_string(),
            header_row: 1,
            excluded_case: schema::MODAL_CASE.to_string(),
            direction: Direction::default(),
            scale: ScaleFactor::default(),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_usize(name: &str) -> Option<usize> {
    env_string(name).and_then(|v| v.parse::<usize>().ok())
}

impl ViewerOptions {
    /// Read options from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `ETABS_WORKBOOK`, `ETABS_HEADER_ROW`, `ETABS_DIRECTION` and
    /// `ETABS_SCALE` when set. Unparsable values are logged and ignored.
    pub fn with_env(mut self) -> Self {
        if let Some(path) = env_string("ETABS_WORKBOOK") {
            self.workbook = Some(PathBuf::from(path));
        }
        if let Some(row) = env_usize("ETABS_HEADER_ROW") {
            self.header_row = row;
        }
        if let Some(direction) = env_string("ETABS_DIRECTION") {
            match direction.parse() {
                Ok(d) => self.direction = d,
                Err(e) => log::warn!("ETABS_DIRECTION ignored: {}", e),
            }
        }
        if let Some(scale) = env_usize("ETABS_SCALE") {
            match u32::try_from(scale).ok().map(ScaleFactor::new) {
                Some(Ok(s)) => self.scale = s,
                _ => log::warn!("ETABS_SCALE ignored: {} is not in 1..=10", scale),
            }
        }
        self
    }

    pub fn with_workbook<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.workbook = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_header_row(mut self, row: usize) -> Self {
        self.header_row = row;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_scale(mut self, scale: ScaleFactor) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_excluded_case(mut self, case: &str) -> Self {
        self.excluded_case = case.to_string();
        self
    }

    pub fn column_spec(&self) -> SheetSpec {
        SheetSpec::column_connectivity()
            .with_sheet(&self.column_sheet)
            .with_header_row(self.header_row)
    }

    pub fn point_spec(&self) -> SheetSpec {
        SheetSpec::point_connectivity()
            .with_sheet(&self.point_sheet)
            .with_header_row(self.header_row)
    }

    pub fn displacement_spec(&self) -> SheetSpec {
        SheetSpec::joint_displacements()
            .with_sheet(&self.displacement_sheet)
            .with_header_row(self.header_row)
    }
}
