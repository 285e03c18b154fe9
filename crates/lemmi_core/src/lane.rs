//! Discrete lanes of the runner track.

use serde::{Deserialize, Serialize};

/// One of the three lanes. The player always occupies exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Leftmost lane.
    Left,
    /// Middle lane, where runs start.
    #[default]
    Center,
    /// Rightmost lane.
    Right,
}

impl Lane {
    /// Every lane, left to right.
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Index 0..3, left to right.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Lane for an index, clamping out-of-range values to the outer lanes.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Center,
            _ => Self::Right,
        }
    }

    /// Lane to the left; the left lane stays put.
    #[inline]
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::Left | Self::Center => Self::Left,
            Self::Right => Self::Center,
        }
    }

    /// Lane to the right; the right lane stays put.
    #[inline]
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::Left => Self::Center,
            Self::Center | Self::Right => Self::Right,
        }
    }

    /// World-space X of the lane center.
    #[inline]
    #[must_use]
    pub fn x(self, spacing: f32) -> f32 {
        (self.index() as f32 - 1.0) * spacing
    }
}
