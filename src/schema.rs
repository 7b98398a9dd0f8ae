//! Column names of the ETABS tabular export, after renaming

/// Object identifier (joint or frame)
pub const UNIQUE_NAME: &str = "UniqueName";
/// Header used by ETABS before renaming
pub const UNIQUE_NAME_RAW: &str = "Unique Name";
pub const STORY: &str = "Story";
pub const LABEL: &str = "Label";

/// Column end joints
pub const UNIQUE_PT_I: &str = "UniquePtI";
pub const UNIQUE_PT_J: &str = "UniquePtJ";

/// Joint plan coordinates
pub const X: &str = "X";
pub const Y: &str = "Y";

pub const OUTPUT_CASE: &str = "Output Case";
pub const CASE_TYPE: &str = "Case Type";
pub const STEP_TYPE: &str = "Step Type";
pub const STEP_NUMBER: &str = "Step Number";
pub const STEP_LABEL: &str = "Step Label";

pub const UX: &str = "Ux";
pub const UY: &str = "Uy";
pub const UZ: &str = "Uz";

/// Normalized companion field appended by the transform
pub const NORM_DISP: &str = "NormDisp";

/// Output case whose rows never reach the pipeline
pub const MODAL_CASE: &str = "Modal";

/// Sheet names
pub const COLUMN_CONNECTIVITY_SHEET: &str = "Column Object Connectivity";
pub const POINT_CONNECTIVITY_SHEET: &str = "Point Object Connectivity";
pub const JOINT_DISPLACEMENTS_SHEET: &str = "Joint Displacements";

/// Bookkeeping columns removed from the display table
pub const DISPLAY_HIDDEN: &[&str] = &[
    STEP_TYPE,
    STEP_NUMBER,
    STEP_LABEL,
    NORM_DISP,
    LABEL,
    CASE_TYPE,
    UNIQUE_NAME,
    STORY,
];
