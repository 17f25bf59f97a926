//! Responsive grid parameters for the archive card grid

use serde::Serialize;

/// A named viewport-width tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
    XLarge,
}

impl Breakpoint {
    /// All tiers, narrowest first
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Small,
        Breakpoint::Medium,
        Breakpoint::Large,
        Breakpoint::XLarge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Small => "small",
            Breakpoint::Medium => "medium",
            Breakpoint::Large => "large",
            Breakpoint::XLarge => "xlarge",
        }
    }

    /// Minimum viewport width of the tier in pixels
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Small => 0,
            Breakpoint::Medium => 768,
            Breakpoint::Large => 1024,
            Breakpoint::XLarge => 1440,
        }
    }
}

/// Column/row counts for the card grid at one breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

/// Grid dimensions for a given breakpoint.
///
/// Narrow viewports stack cards in a single column two rows deep; from the
/// medium tier up the grid widens to two columns, and large viewports
/// flatten to a single row.
pub fn layout_for(breakpoint: Breakpoint) -> GridLayout {
    match breakpoint {
        Breakpoint::Small => GridLayout {
            columns: 1,
            rows: 2,
        },
        Breakpoint::Medium => GridLayout {
            columns: 2,
            rows: 2,
        },
        Breakpoint::Large | Breakpoint::XLarge => GridLayout {
            columns: 2,
            rows: 1,
        },
    }
}
