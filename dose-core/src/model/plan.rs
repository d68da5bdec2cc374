//! Everything one pipeline run produces.

use serde::Serialize;

use super::{
    Group, OffsetPosition2D, OffsetPosition3D, Point2D, Point3D, ReferenceFrame, ResolvedOffset,
    Trajectory2D, Trajectory3D,
};

/// Resolved dispensing layout for one program/data pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispensingPlan {
    pub reference_positions: ReferenceFrame<Point2D>,
    pub reference_positions_3d: ReferenceFrame<Point3D>,
    /// Group A first, then group B.
    pub offsets: Vec<ResolvedOffset>,
    pub positions: Vec<OffsetPosition2D>,
    pub positions_3d: Vec<OffsetPosition3D>,
    /// Program order.
    pub trajectory: Trajectory2D,
    pub trajectory_3d: Trajectory3D,
}

/// Summary counts of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub total_offsets: usize,
    pub group_a_count: usize,
    pub group_b_count: usize,
    pub total_positions: usize,
    pub trajectory_points: usize,
}

impl DispensingPlan {
    /// Resolved offsets of one group, in resolver order.
    pub fn offsets_in(&self, group: Group) -> impl Iterator<Item = &ResolvedOffset> {
        self.offsets.iter().filter(move |o| o.group == group)
    }

    pub fn stats(&self) -> PlanStats {
        PlanStats {
            total_offsets: self.offsets.len(),
            group_a_count: self.offsets_in(Group::A).count(),
            group_b_count: self.offsets_in(Group::B).count(),
            total_positions: self.positions.len(),
            trajectory_points: self.trajectory.total_points,
        }
    }
}
