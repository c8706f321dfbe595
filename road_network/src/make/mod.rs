//! Everything that derives or reshapes the network: lanes from road specs, junctions from the
//! graph, and the incremental road builder.

mod add_road;
pub mod buildings;
pub mod intersections;
pub mod lanes;
pub mod trees;

use std::fmt;

use geom::Pt2D;

/// What happened to a candidate road.
#[derive(Clone, Debug, PartialEq)]
pub enum RoadInsertion {
    Inserted,
    /// The candidate crossed an existing road. Both were cut at `at`, and every piece made it in.
    Split { at: Pt2D },
    /// Nothing changed.
    Rejected(Rejection),
}

impl RoadInsertion {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RoadInsertion::Rejected(_))
    }
}

/// Why a candidate road was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Zero length, no lanes, or a lane width that isn't a positive whole number.
    Degenerate,
    AlreadyExists,
    /// Not long enough to hold its own width plus the margin.
    TooShort,
    /// Leaves a shared junction too close in angle to a road already there.
    SharpAngle,
    /// An endpoint of one road comes too close to the other road.
    TooClose,
    /// Crosses another road too close to the end of either one.
    CrossingNearJunction,
    TooManySplits,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            Rejection::Degenerate => "degenerate road",
            Rejection::AlreadyExists => "road already exists",
            Rejection::TooShort => "too short for its width",
            Rejection::SharpAngle => "too sharp an angle at a junction",
            Rejection::TooClose => "too close to another road",
            Rejection::CrossingNearJunction => "crosses another road too close to a junction",
            Rejection::TooManySplits => "crosses too many roads",
        };
        write!(f, "{}", reason)
    }
}
