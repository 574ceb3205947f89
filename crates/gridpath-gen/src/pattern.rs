//! Obstacle placement patterns.

use std::fmt;
use std::str::FromStr;

/// An obstacle placement heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Recursive-backtracking maze on a half-resolution lattice.
    Maze,
    /// Jittered blobs around random centres.
    Clusters,
    /// Nearly solid horizontal and vertical bands with random gaps.
    Corridors,
    /// Periodic partial walls every few rows and columns.
    LatticeBars,
    /// Concentric rings of obstacles around the centre.
    Spiral,
    /// Independent random obstacles in the interior.
    Scatter,
    /// Border ring plus horizontal walls with a central gap.
    Walled,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Maze,
        Pattern::Clusters,
        Pattern::Corridors,
        Pattern::LatticeBars,
        Pattern::Spiral,
        Pattern::Scatter,
        Pattern::Walled,
    ];

    /// Whether the pattern connects start and end without repair.
    pub fn is_connected_by_construction(self) -> bool {
        matches!(self, Pattern::Maze)
    }

    fn name(self) -> &'static str {
        match self {
            Pattern::Maze => "maze",
            Pattern::Clusters => "clusters",
            Pattern::Corridors => "corridors",
            Pattern::LatticeBars => "lattice-bars",
            Pattern::Spiral => "spiral",
            Pattern::Scatter => "scatter",
            Pattern::Walled => "walled",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown pattern name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePatternError(String);

impl fmt::Display for ParsePatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown obstacle pattern \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParsePatternError {}

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.to_ascii_lowercase().replace('_', "-");
        Pattern::ALL
            .into_iter()
            .find(|p| p.name() == s_lower)
            .ok_or_else(|| ParsePatternError(s.to_string()))
    }
}
