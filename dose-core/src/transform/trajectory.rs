//! Reconstruction of the executed motion path in program order.

use std::collections::HashMap;

use crate::config::NamingConvention;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{
    Coordinate, Point2D, Point3D, ReferenceFrame, ResolvedOffset, Trajectory, Trajectory2D,
    Trajectory3D, TrajectoryPoint, UsageEvent,
};
use crate::parser::parse_sequential_usages;

/// Build the trajectory by re-scanning the program text in file order.
///
/// The order of `offsets` is irrelevant here; they only supply values.
pub fn build_trajectory<P: Coordinate>(
    program_text: &str,
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<P>,
    naming: &NamingConvention,
    sink: &mut dyn DiagnosticSink,
) -> Trajectory<P> {
    let usages = parse_sequential_usages(program_text, naming);
    trajectory_from_usages(&usages, offsets, frame, sink)
}

/// XY trajectory.
pub fn build_trajectory_2d(
    program_text: &str,
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<Point2D>,
    naming: &NamingConvention,
    sink: &mut dyn DiagnosticSink,
) -> Trajectory2D {
    build_trajectory(program_text, offsets, frame, naming, sink)
}

/// XYZ trajectory.
pub fn build_trajectory_3d(
    program_text: &str,
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<Point3D>,
    naming: &NamingConvention,
    sink: &mut dyn DiagnosticSink,
) -> Trajectory3D {
    build_trajectory(program_text, offsets, frame, naming, sink)
}

/// Turn ordered usage events into trajectory points.
///
/// Offsets are looked up by name; when several resolved offsets share a name
/// the last one wins. Usages whose offset or reference cannot be found are
/// reported and skipped without renumbering the remaining points.
pub fn trajectory_from_usages<P: Coordinate>(
    usages: &[UsageEvent],
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<P>,
    sink: &mut dyn DiagnosticSink,
) -> Trajectory<P> {
    let by_name: HashMap<&str, &ResolvedOffset> =
        offsets.iter().map(|o| (o.name.as_str(), o)).collect();

    let mut points = Vec::with_capacity(usages.len());
    for usage in usages {
        let Some(offset) = by_name.get(usage.offset_name.as_str()) else {
            sink.report(Diagnostic::UndefinedOffset {
                offset: usage.offset_name.clone(),
                reference: usage.reference_name.clone(),
            });
            continue;
        };
        let Some(reference) = frame.get(&usage.reference_name) else {
            sink.report(Diagnostic::UnknownReference {
                offset: usage.offset_name.clone(),
                reference: usage.reference_name.clone(),
            });
            continue;
        };

        points.push(TrajectoryPoint {
            name: offset.name.clone(),
            position: reference.displaced_by(offset),
            reference_name: usage.reference_name.clone(),
            group: offset.group,
            sequence_index: usage.sequence_index,
            instruction: usage.instruction,
        });
    }

    tracing::debug!(
        "Trajectory: {} point(s) from {} usage(s)",
        points.len(),
        usages.len()
    );
    Trajectory::new(points)
}
