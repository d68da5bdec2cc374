//! Plain records passed between pipeline stages and to renderers.

mod offset;
mod plan;
mod point;
mod trajectory;

pub use offset::{Group, InstructionKind, OffsetDefinition, ResolvedOffset, UsageEvent};
pub use plan::{DispensingPlan, PlanStats};
pub use point::{Coordinate, Point2D, Point3D, ReferenceFrame};
pub use trajectory::{
    OffsetPosition, OffsetPosition2D, OffsetPosition3D, Trajectory, Trajectory2D, Trajectory3D,
    TrajectoryPoint,
};
