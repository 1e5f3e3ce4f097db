//! AGP Convert - genome assembly layout conversion
//!
//! Reads an AGP layout (the minimal 4-column variant or the standard
//! 9-column variant), applies structural edits to its chromosomes and writes
//! it back out in either variant with recomputed coordinates.
//!
//! # Features
//!
//! - Select, filter, rename and reverse chromosomes
//! - Gap insertion between adjacent contigs
//! - Natural chromosome ordering and size-rank renaming
//! - Transparent gzip/bzip2 input and gzip output
//!
//! # Example
//!
//! ```ignore
//! use agp_convert::{pipeline, AgpLayout, PipelineConfig, RecordStore};
//!
//! let store = RecordStore::from_file("scaffolds.agp")?;
//! let sizes = pipeline::resolve_sizes(&store, None);
//!
//! let mut config = PipelineConfig::new(AgpLayout::NineColumn);
//! config.natural_order = true;
//! let result = pipeline::run(&store, sizes.as_ref(), &config)?;
//! ```

pub mod core;
pub mod formats;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    AgpError, AgpResult, ContigSizeTable, NaturalKey, PlacementRecord, RenameTable, Strand,
};
pub use crate::formats::{AgpLayout, AgpOutput, RecordStore, SegmentKind, SizedSegment};
pub use crate::pipeline::{convert_agp, ConversionStats, PipelineConfig, PipelineResult};
