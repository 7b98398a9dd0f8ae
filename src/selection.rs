//! View selection: story, load case, direction and scale

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VizError, VizResult};
use crate::schema;

/// Displacement component shown in the plan view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Ux,
    Uy,
    #[default]
    Uz,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Ux, Direction::Uy, Direction::Uz];

    /// Column holding this component
    pub fn column(self) -> &'static str {
        match self {
            Direction::Ux => schema::UX,
            Direction::Uy => schema::UY,
            Direction::Uz => schema::UZ,
        }
    }

    /// Plot title prefix
    pub fn title(self) -> &'static str {
        match self {
            Direction::Ux => "Displacement X",
            Direction::Uy => "Displacement Y",
            Direction::Uz => "Vertical Displacement",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Direction {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ux" | "x" => Ok(Direction::Ux),
            "uy" | "y" => Ok(Direction::Uy),
            "uz" | "z" => Ok(Direction::Uz),
            _ => Err(VizError::UnknownDirection(s.to_string())),
        }
    }
}

/// Integer display scale in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(value: u32) -> VizResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(VizError::InvalidScale(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Multiplier applied to displacements
    pub fn factor(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = VizError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScaleFactor> for u32 {
    fn from(value: ScaleFactor) -> Self {
        value.0
    }
}

/// Everything the view needs from the selector widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub story: String,
    pub load_case: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub scale: ScaleFactor,
}

impl Selection {
    /// Uz at scale 1
    pub fn new(story: &str, load_case: &str) -> Self {
        Self {
            story: story.to_string(),
            load_case: load_case.to_string(),
            direction: Direction::default(),
            scale: ScaleFactor::default(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_scale(mut self, scale: ScaleFactor) -> Self {
        self.scale = scale;
        self
    }
}
