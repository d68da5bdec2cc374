//! Resolution stages: offset join, position calculation, trajectory.

mod positions;
mod resolve;
mod trajectory;

pub use positions::{calculate_positions, calculate_positions_2d, calculate_positions_3d};
pub use resolve::{join_offsets, resolve_offsets};
pub use trajectory::{
    build_trajectory, build_trajectory_2d, build_trajectory_3d, trajectory_from_usages,
};
