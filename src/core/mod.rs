//! Core AGP data model and transforms
//!
//! This module contains the placement record model, strand encodings,
//! lookup tables, the structural edit stages and the size-rank deriver.

pub mod error;
pub mod io;
mod natural;
pub mod rank;
mod record;
mod strand;
mod tables;
pub mod transform;

pub use error::{AgpError, AgpResult};
pub use io::{AgpWriter, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
pub use natural::{natural_cmp, NaturalKey};
pub use rank::{chromosome_sizes, derive_size_rank};
pub use record::{PlacementRecord, GAP_CONTIG};
pub use strand::Strand;
pub use tables::{ContigSizeTable, RenameTable};
