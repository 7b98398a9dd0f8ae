//! ETABS Viz - column joint displacements from ETABS tabular exports
//!
//! Reads the `Column Object Connectivity`, `Point Object Connectivity` and
//! `Joint Displacements` sheets of an ETABS export and prepares a plan-view
//! bubble plot of the joints that end a column:
//! - inner join of displacements with joint coordinates on (UniqueName, Story)
//! - restriction to column end joints (any story)
//! - display scaling of Ux, Uy or Uz
//! - min-max normalization for marker sizing
//! - a display table with CSV export
//!
//! ## Example
//! ```rust
//! use etabs_viz::prelude::*;
//!
//! let t = Cell::text;
//! let mut workbook = MemoryWorkbook::new()
//!     .with_export_sheet(
//!         "Column Object Connectivity",
//!         &["Unique Name", "Story", "UniquePtI", "UniquePtJ"],
//!         vec![vec![t("C1"), t("Story1"), t("1"), t("2")]],
//!     )
//!     .with_export_sheet(
//!         "Point Object Connectivity",
//!         &["UniqueName", "Story", "X", "Y"],
//!         vec![
//!             vec![t("1"), t("Story1"), Cell::Number(0.0), Cell::Number(0.0)],
//!             vec![t("2"), t("Story1"), Cell::Number(30.0), Cell::Number(0.0)],
//!         ],
//!     )
//!     .with_export_sheet(
//!         "Joint Displacements",
//!         &["Unique Name", "Story", "Output Case", "Ux", "Uy", "Uz"],
//!         vec![
//!             vec![t("1"), t("Story1"), t("Dead"), t("0"), t("0"), t("-0.5")],
//!             vec![t("2"), t("Story1"), t("Dead"), t("0"), t("0"), t("-1.5")],
//!         ],
//!     );
//!
//! let model = DisplacementModel::load(&mut workbook).unwrap();
//! let selection = Selection::new("Story1", "Dead").with_scale(ScaleFactor::new(2).unwrap());
//! let view = model.view(&selection).unwrap();
//!
//! assert_eq!(view.points.len(), 2);
//! assert_eq!(view.points[1].value, -3.0);
//! let csv = view.to_csv().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod results;
pub mod schema;
pub mod selection;
pub mod table;

// Re-export common types
pub mod prelude {
    pub use crate::config::ViewerOptions;
    pub use crate::error::{LoadError, VizError, VizResult};
    pub use crate::loader::{load_table, MemoryWorkbook, SheetSpec, Workbook, XlsxWorkbook};
    pub use crate::model::{DisplacementModel, PreparedDisplacements};
    pub use crate::pipeline::{DisplacementTable, JoinReport};
    pub use crate::records::{ColumnConnectivity, JointDisplacements, PointConnectivity};
    pub use crate::results::{DisplacementView, PlotPoint, ViewSummary};
    pub use crate::selection::{Direction, ScaleFactor, Selection};
    pub use crate::table::{Cell, Table};
}
