//! Plain-text rendering for the command line

use std::fmt::Write;

use crate::model::DisplacementModel;
use crate::results::DisplacementView;
use crate::selection::{Direction, ScaleFactor};

/// List the stories, load cases and selector ranges of a model
pub fn render_options(model: &DisplacementModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stories:");
    for story in model.stories() {
        let _ = writeln!(out, "  {}", story);
    }
    let _ = writeln!(out, "Load cases:");
    for case in model.load_cases() {
        let _ = writeln!(out, "  {}", case);
    }
    let directions: Vec<String> = Direction::ALL.iter().map(|d| d.to_string()).collect();
    let _ = writeln!(out, "Directions: {}", directions.join(", "));
    let _ = writeln!(out, "Scale: {}..={}", ScaleFactor::MIN, ScaleFactor::MAX);
    let report = model.join_report();
    if report.has_mismatch() {
        let _ = writeln!(
            out,
            "Warning: {} displacement row(s) had no matching joint",
            report.dropped_rows
        );
    }
    out
}

/// Plan-view summary of one selection
pub fn render_view(view: &DisplacementView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ({}) ===", view.title, view.load_case);
    let _ = writeln!(out, "Scale factor = {}", view.scale);

    let s = &view.summary;
    let _ = writeln!(
        out,
        "Rows: {} displacement, {} joined ({} dropped), {} at column joints, {} selected",
        s.displacement_rows, s.joined_rows, s.dropped_on_join, s.filtered_rows, s.selected_rows
    );
    if let (Some(min), Some(max)) = (s.min_value, s.max_value) {
        let _ = writeln!(out, "{} range: {:.6} .. {:.6}", view.direction, min, max);
    }

    if view.is_empty() {
        let _ = writeln!(out, "\nNo joints for this story and load case.");
        return out;
    }

    let _ = writeln!(out, "\n{:>12} {:>12} {:>14} {:>8}", "X", "Y", view.direction, "Norm");
    for p in &view.points {
        let _ = writeln!(
            out,
            "{:>12.3} {:>12.3} {:>14.6} {:>8.3}",
            p.x, p.y, p.value, p.norm
        );
    }
    out
}
