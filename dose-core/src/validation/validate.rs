//! Consistency checks on an assembled dispensing plan.

use crate::model::{DispensingPlan, Group, Point2D, Point3D, Trajectory};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a plan.
pub fn validate_plan(plan: &DispensingPlan) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for group in Group::ALL {
        if plan.offsets_in(group).next().is_none() {
            result.add_warning(format!("Group {}: No resolved offsets", group));
        }
    }

    if plan.positions.len() < plan.offsets.len() {
        result.add_warning(format!(
            "{} of {} offset(s) have no position (unknown reference)",
            plan.offsets.len() - plan.positions.len(),
            plan.offsets.len()
        ));
    }

    result.merge(validate_trajectory("2D trajectory", &plan.trajectory));
    result.merge(validate_trajectory("3D trajectory", &plan.trajectory_3d));
    result.merge(validate_trajectory_pair(&plan.trajectory, &plan.trajectory_3d));

    result
}

/// Validate ordering and bookkeeping of one trajectory.
pub fn validate_trajectory<P>(label: &str, trajectory: &Trajectory<P>) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if trajectory.points.is_empty() {
        result.add_warning(format!("{}: No points", label));
    }

    if trajectory.total_points != trajectory.points.len() {
        result.add_error(format!(
            "{}: total_points is {} but {} point(s) are present",
            label,
            trajectory.total_points,
            trajectory.points.len()
        ));
    }

    for (idx, pair) in trajectory.points.windows(2).enumerate() {
        if pair[1].sequence_index <= pair[0].sequence_index {
            result.add_error(format!(
                "{}, Point {}: sequence index {} does not follow {}",
                label,
                idx + 2,
                pair[1].sequence_index,
                pair[0].sequence_index
            ));
        }
    }

    result
}

/// Check that the 2D and 3D trajectories visit the same points in the same order.
pub fn validate_trajectory_pair(
    flat: &Trajectory<Point2D>,
    deep: &Trajectory<Point3D>,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if flat.points.len() != deep.points.len() {
        result.add_error(format!(
            "2D trajectory has {} point(s), 3D trajectory has {}",
            flat.points.len(),
            deep.points.len()
        ));
        return result;
    }

    for (idx, (a, b)) in flat.points.iter().zip(&deep.points).enumerate() {
        if a.name != b.name || a.sequence_index != b.sequence_index {
            result.add_error(format!(
                "Point {}: 2D visits {} (#{}) but 3D visits {} (#{})",
                idx + 1,
                a.name,
                a.sequence_index,
                b.name,
                b.sequence_index
            ));
        }
    }

    result
}
