//! Absolute positions of resolved offsets.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{
    Coordinate, OffsetPosition, OffsetPosition2D, OffsetPosition3D, Point2D, Point3D,
    ReferenceFrame, ResolvedOffset,
};

/// Compute `reference + offset` for every resolved offset, keeping input order.
///
/// An offset whose reference is not in the frame is reported and left out.
pub fn calculate_positions<P: Coordinate>(
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<P>,
    sink: &mut dyn DiagnosticSink,
) -> Vec<OffsetPosition<P>> {
    offsets
        .iter()
        .filter_map(|offset| {
            let Some(reference) = frame.get(&offset.reference_name) else {
                sink.report(Diagnostic::UnknownReference {
                    offset: offset.name.clone(),
                    reference: offset.reference_name.clone(),
                });
                return None;
            };
            Some(OffsetPosition {
                name: offset.name.clone(),
                position: reference.displaced_by(offset),
                reference_name: offset.reference_name.clone(),
                group: offset.group,
            })
        })
        .collect()
}

/// XY positions.
pub fn calculate_positions_2d(
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<Point2D>,
    sink: &mut dyn DiagnosticSink,
) -> Vec<OffsetPosition2D> {
    calculate_positions(offsets, frame, sink)
}

/// XYZ positions.
pub fn calculate_positions_3d(
    offsets: &[ResolvedOffset],
    frame: &ReferenceFrame<Point3D>,
    sink: &mut dyn DiagnosticSink,
) -> Vec<OffsetPosition3D> {
    calculate_positions(offsets, frame, sink)
}
