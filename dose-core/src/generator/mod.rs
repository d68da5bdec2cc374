//! Renderers over a finished plan.

mod export;
mod report;

pub use export::export_json;
pub use report::render_offsets_report;
