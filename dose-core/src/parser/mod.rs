//! KRL program and data text parsers.

mod data;
mod program;
mod scanner;

pub use data::{
    extract_reference_positions, extract_reference_positions_2d, extract_reference_positions_3d,
};
pub use program::{
    parse_all_offset_definitions, parse_group_usages, parse_offset_definitions, parse_program,
    parse_sequential_usages, ProgramListing,
};
