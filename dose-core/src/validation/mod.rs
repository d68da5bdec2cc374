//! Plan validation.

mod validate;

pub use validate::{validate_plan, validate_trajectory, validate_trajectory_pair, ValidationResult};
