//! dose-core - Core library for KRL dispensing offset extraction.
//!
//! This library parses the two text files of a KUKA dispensing program, a
//! program (`.src`) with offset declarations and `PTP`/`LIN` instructions and
//! a data (`.dat`) file with the global reference positions, and resolves
//! every applied offset to an absolute coordinate. It also reconstructs the
//! motion path in the order the instructions appear in the program.
//!
//! # Example
//!
//! ```no_run
//! use dose_core::{build_plan, NamingConvention, TracingSink};
//!
//! let program = std::fs::read_to_string("PickAndDrop.src").unwrap();
//! let data = std::fs::read_to_string("PickAndDrop.dat").unwrap();
//! let plan = build_plan(&program, &data, &NamingConvention::default(), &mut TracingSink).unwrap();
//! println!("{} trajectory points", plan.trajectory.total_points);
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::{Config, NamingConvention};
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{DoseError, Result};
pub use generator::{export_json, render_offsets_report};
pub use model::{
    DispensingPlan, Group, InstructionKind, OffsetDefinition, OffsetPosition, PlanStats, Point2D,
    Point3D, ReferenceFrame, ResolvedOffset, Trajectory, TrajectoryPoint, UsageEvent,
};
pub use parser::{extract_reference_positions_2d, extract_reference_positions_3d, parse_program};
pub use transform::{
    build_trajectory_2d, build_trajectory_3d, calculate_positions_2d, calculate_positions_3d,
    resolve_offsets,
};
pub use validation::{validate_plan, ValidationResult};

/// Run the full pipeline over a program text and a data text.
///
/// 1. Extract the four reference positions (2D and 3D)
/// 2. Resolve offsets against their usages
/// 3. Calculate absolute positions
/// 4. Rebuild the trajectory in program order
/// 5. Repeat 3 and 4 against the 3D frame
///
/// Fails only when a canonical reference position is missing from `data_text`.
/// Everything else that cannot be resolved goes to `sink` and is skipped.
pub fn build_plan(
    program_text: &str,
    data_text: &str,
    naming: &NamingConvention,
    sink: &mut dyn DiagnosticSink,
) -> Result<DispensingPlan> {
    let names = naming.canonical_reference_names();
    let reference_positions = extract_reference_positions_2d(data_text, &names)?;
    let reference_positions_3d = extract_reference_positions_3d(data_text, &names)?;

    let offsets = resolve_offsets(program_text, naming, sink);

    let positions = calculate_positions_2d(&offsets, &reference_positions, sink);
    let trajectory = build_trajectory_2d(program_text, &offsets, &reference_positions, naming, sink);

    // Both frames hold the same names, so the 3D pass would only repeat the 2D diagnostics.
    let mut repeated: Vec<Diagnostic> = Vec::new();
    let positions_3d = calculate_positions_3d(&offsets, &reference_positions_3d, &mut repeated);
    let trajectory_3d = build_trajectory_3d(
        program_text,
        &offsets,
        &reference_positions_3d,
        naming,
        &mut repeated,
    );

    Ok(DispensingPlan {
        reference_positions,
        reference_positions_3d,
        offsets,
        positions,
        positions_3d,
        trajectory,
        trajectory_3d,
    })
}
