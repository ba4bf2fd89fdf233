//! Report rendering and output.
//!
//! Converts walk results into the JSON wire shape and writes them as a JSON
//! array or as JSON Lines.

mod report;
mod writer;

pub use report::{StepReport, WalkReport};
pub use writer::{export_reports, write_reports};
