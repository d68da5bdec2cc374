//! Absolute positions and the reconstructed motion path.

use serde::Serialize;

use super::{Group, InstructionKind, Point2D, Point3D};

/// Absolute position of one resolved offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetPosition<P> {
    pub name: String,
    #[serde(flatten)]
    pub position: P,
    pub reference_name: String,
    pub group: Group,
}

pub type OffsetPosition2D = OffsetPosition<Point2D>;
pub type OffsetPosition3D = OffsetPosition<Point3D>;

/// A visited position tagged with where it came from in the program text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoint<P> {
    pub name: String,
    #[serde(flatten)]
    pub position: P,
    pub reference_name: String,
    pub group: Group,
    /// Index of the originating instruction in file order. Not renumbered after skips.
    pub sequence_index: usize,
    pub instruction: InstructionKind,
}

/// The chronologically ordered motion path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory<P> {
    pub points: Vec<TrajectoryPoint<P>>,
    pub total_points: usize,
}

impl<P> Trajectory<P> {
    pub fn new(points: Vec<TrajectoryPoint<P>>) -> Self {
        let total_points = points.len();
        Self {
            points,
            total_points,
        }
    }
}

pub type Trajectory2D = Trajectory<Point2D>;
pub type Trajectory3D = Trajectory<Point3D>;
