//! AGP layout adapters
//!
//! Parsing of 4-column and 9-column AGP input and emission of either layout.

pub mod agp;
pub mod emit;

pub use agp::{AgpLayout, RecordStore};
pub use emit::{emit_four_column, emit_nine_column, AgpOutput, SegmentKind, SizedSegment, GAP_METHOD};
