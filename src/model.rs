//! Displacement model - the loaded session data and the view pipeline

use std::path::Path;

use crate::config::ViewerOptions;
use crate::error::VizResult;
use crate::loader::{Workbook, XlsxWorkbook};
use crate::pipeline::{self, DisplacementTable, JoinReport};
use crate::records::{ColumnConnectivity, JointDisplacements, PointConnectivity};
use crate::results::{DisplacementView, PlotPoint, ViewSummary};
use crate::schema;
use crate::selection::{Direction, ScaleFactor, Selection};

/// The three source tables of one workbook plus their join.
///
/// Built once per session and shared by reference; every view is derived
/// from it without modifying it.
#[derive(Debug, Clone)]
pub struct DisplacementModel {
    columns: ColumnConnectivity,
    joints: PointConnectivity,
    displacements: JointDisplacements,
    /// Displacements with joint coordinates, before the column filter
    joined: DisplacementTable,
    join_report: JoinReport,
}

/// Column joint displacements, scaled and normalized over all stories and cases
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDisplacements {
    pub direction: Direction,
    pub scale: ScaleFactor,
    /// Filtered rows with the scaled component and `NormDisp`
    pub table: DisplacementTable,
    /// Range of the scaled component used for `NormDisp`
    pub range: Option<(f64, f64)>,
}

impl DisplacementModel {
    /// Build a model from loaded tables
    pub fn new(
        columns: ColumnConnectivity,
        joints: PointConnectivity,
        displacements: JointDisplacements,
    ) -> VizResult<Self> {
        let (joined, join_report) = pipeline::join(&displacements, &joints)?;
        Ok(Self {
            columns,
            joints,
            displacements,
            joined,
            join_report,
        })
    }

    /// Load the three sheets with the default ETABS layout
    pub fn load<W: Workbook + ?Sized>(workbook: &mut W) -> VizResult<Self> {
        Self::load_with(workbook, &ViewerOptions::default())
    }

    /// Load the three sheets using the sheet names and header row in `options`
    pub fn load_with<W: Workbook + ?Sized>(
        workbook: &mut W,
        options: &ViewerOptions,
    ) -> VizResult<Self> {
        let columns = ColumnConnectivity::load_with(workbook, &options.column_spec())?;
        let joints = PointConnectivity::load_with(workbook, &options.point_spec())?;
        let displacements = JointDisplacements::load_with(
            workbook,
            &options.displacement_spec(),
            &options.excluded_case,
        )?;
        log::info!(
            "Loaded {} column(s), {} joint(s), {} displacement row(s)",
            columns.len(),
            joints.len(),
            displacements.len()
        );
        Self::new(columns, joints, displacements)
    }

    /// Open a workbook file with the default layout
    pub fn open<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        Self::open_with(path, &ViewerOptions::default())
    }

    /// Open a workbook file
    pub fn open_with<P: AsRef<Path>>(path: P, options: &ViewerOptions) -> VizResult<Self> {
        let mut workbook = XlsxWorkbook::open(path)?;
        Self::load_with(&mut workbook, options)
    }

    pub fn column_connectivity(&self) -> &ColumnConnectivity {
        &self.columns
    }

    pub fn point_connectivity(&self) -> &PointConnectivity {
        &self.joints
    }

    pub fn joint_displacements(&self) -> &JointDisplacements {
        &self.displacements
    }

    /// Displacements with coordinates, before the column filter
    pub fn joined(&self) -> &DisplacementTable {
        &self.joined
    }

    pub fn join_report(&self) -> &JoinReport {
        &self.join_report
    }

    /// Stories available for selection
    pub fn stories(&self) -> Vec<String> {
        self.joined.stories()
    }

    /// Output cases available for selection
    pub fn load_cases(&self) -> Vec<String> {
        self.joined.load_cases()
    }

    /// First story and first load case, `None` when nothing joined
    pub fn default_selection(&self) -> Option<Selection> {
        let story = self.stories().into_iter().next()?;
        let case = self.load_cases().into_iter().next()?;
        Some(Selection::new(&story, &case))
    }

    /// Coerce, filter to column joints, scale and normalize
    pub fn prepare(&self, direction: Direction, scale: ScaleFactor) -> VizResult<PreparedDisplacements> {
        let joined = self.joined.coerce(direction)?;
        let filtered = pipeline::column_joints_only(&joined, &self.columns);
        // scaled values come from the joined table, aligned by row label
        let scaled = pipeline::scale_from(&filtered, &joined, direction, scale.factor())?;
        let range = pipeline::value_range(&scaled, direction)?;
        let table = pipeline::normalize(&scaled, direction)?;
        Ok(PreparedDisplacements {
            direction,
            scale,
            table,
            range,
        })
    }

    /// Run the pipeline for one selection.
    ///
    /// A story/case pair without rows gives an empty view, not an error.
    pub fn view(&self, selection: &Selection) -> VizResult<DisplacementView> {
        let direction = selection.direction;
        let prepared = self.prepare(direction, selection.scale)?;
        let selected = prepared.table.select(&selection.story, &selection.load_case);
        let cols = selected.columns();

        let xs = selected.numbers(cols.x)?;
        let ys = selected.numbers(cols.y)?;
        let values = selected.values(direction)?;
        let norms = selected.norm().transpose()?.unwrap_or_default();
        let points = xs
            .into_iter()
            .zip(ys)
            .zip(values)
            .zip(norms)
            .map(|(((x, y), value), norm)| PlotPoint { x, y, value, norm })
            .collect::<Vec<_>>();

        if points.is_empty() {
            log::info!(
                "No rows for story '{}' under '{}'",
                selection.story,
                selection.load_case
            );
        }

        let display = selected
            .table()
            .drop_columns(schema::DISPLAY_HIDDEN)
            .renamed("Display");

        let summary = ViewSummary {
            displacement_rows: self.displacements.len(),
            joined_rows: self.join_report.joined_rows,
            dropped_on_join: self.join_report.dropped_rows,
            filtered_rows: prepared.table.len(),
            selected_rows: selected.len(),
            min_value: prepared.range.map(|(min, _)| min),
            max_value: prepared.range.map(|(_, max)| max),
        };

        Ok(DisplacementView {
            title: format!("{} - {}", direction.title(), selection.story),
            story: selection.story.clone(),
            load_case: selection.load_case.clone(),
            direction,
            scale: selection.scale.get(),
            points,
            display,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryWorkbook;
    use crate::table::Cell;

    fn workbook() -> MemoryWorkbook {
        let t = Cell::text;
        let n = Cell::Number;
        MemoryWorkbook::new()
            .with_export_sheet(
                "Column Object Connectivity",
                &["Unique Name", "Story", "ColumnBay", "UniquePtI", "UniquePtJ", "GUID"],
                vec![vec![t("C1"), t("Story1"), t("C1"), t("1"), t("2"), t("g")]],
            )
            .with_export_sheet(
                "Point Object Connectivity",
                &["UniqueName", "Story", "PointBay", "IsSpecial", "X", "Y", "Z", "GUID", "Is Auto Point"],
                vec![
                    vec![t("1"), t("Story1"), t("1"), t("No"), n(0.0), n(0.0), n(3.0), t("g"), t("No")],
                    vec![t("2"), t("Story1"), t("2"), t("No"), n(30.0), n(0.0), n(3.0), t("g"), t("No")],
                    vec![t("3"), t("Story1"), t("3"), t("No"), n(60.0), n(0.0), n(3.0), t("g"), t("No")],
                ],
            )
            .with_export_sheet(
                "Joint Displacements",
                &[
                    "Story", "Label", "Unique Name", "Output Case", "Case Type", "Step Type",
                    "Step Number", "Step Label", "Ux", "Uy", "Uz", "Rx", "Ry", "Rz",
                ],
                vec![
                    disp(t("1"), "Dead", -0.5),
                    disp(t("2"), "Dead", -1.5),
                    disp(t("3"), "Dead", -9.0),
                    disp(t("1"), "Modal", -100.0),
                ],
            )
    }

    fn disp(name: Cell, case: &str, uz: f64) -> Vec<Cell> {
        vec![
            Cell::text("Story1"),
            Cell::text("L"),
            name,
            Cell::text(case),
            Cell::text("LinStatic"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Number(0.1),
            Cell::Number(0.2),
            Cell::Number(uz),
            Cell::Number(0.0),
            Cell::Number(0.0),
            Cell::Number(0.0),
        ]
    }

    #[test]
    fn test_load_and_options() {
        let model = DisplacementModel::load(&mut workbook()).unwrap();
        assert_eq!(model.stories(), vec!["Story1".to_string()]);
        assert_eq!(model.load_cases(), vec!["Dead".to_string()]);
        assert_eq!(model.joint_displacements().len(), 3);
        assert_eq!(
            model.default_selection(),
            Some(Selection::new("Story1", "Dead"))
        );
    }

    #[test]
    fn test_non_column_joint_is_filtered() {
        let model = DisplacementModel::load(&mut workbook()).unwrap();
        let prepared = model.prepare(Direction::Uz, ScaleFactor::default()).unwrap();
        assert_eq!(model.joined().len(), 3);
        assert_eq!(prepared.table.len(), 2);
        assert_eq!(prepared.range, Some((-1.5, -0.5)));
    }

    #[test]
    fn test_view_display_columns() {
        let model = DisplacementModel::load(&mut workbook()).unwrap();
        let view = model.view(&Selection::new("Story1", "Dead")).unwrap();
        let columns: Vec<&str> = view.display.columns().iter().map(String::as_str).collect();
        assert_eq!(
            columns,
            vec!["Output Case", "Ux", "Uy", "Uz", "Rx", "Ry", "Rz", "X", "Y", "Z"]
        );
        assert_eq!(view.title, "Vertical Displacement - Story1");
    }

    #[test]
    fn test_other_direction() {
        let model = DisplacementModel::load(&mut workbook()).unwrap();
        let selection = Selection::new("Story1", "Dead")
            .with_direction(Direction::Uy)
            .with_scale(ScaleFactor::new(5).unwrap());
        let view = model.view(&selection).unwrap();
        assert!(view.points.iter().all(|p| (p.value - 1.0).abs() < 1e-12));
        // equal values: zero range
        assert!(view.points.iter().all(|p| p.norm == 1.0));
        assert_eq!(view.title, "Displacement Y - Story1");
    }

    #[test]
    fn test_missing_sheet_aborts_load() {
        let mut wb = MemoryWorkbook::new();
        let err = DisplacementModel::load(&mut wb).unwrap_err();
        assert!(err.is_load_error());
    }
}
