//! The three source tables of an ETABS export

mod column;
mod displacement;
mod joint;

pub use column::ColumnConnectivity;
pub use displacement::JointDisplacements;
pub use joint::PointConnectivity;
