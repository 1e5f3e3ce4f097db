//! Placement records
//!
//! A [`PlacementRecord`] places one contig on one chromosome. Until the
//! emitter resolves coordinates, `position` is the 1-based rank of the contig
//! within its chromosome, not a base offset.

use crate::core::Strand;

/// Contig name carried by gap sentinel records
pub const GAP_CONTIG: &str = "GAP";

/// A contig placed on a chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementRecord {
    pub chrom: String,
    pub contig: String,
    pub strand: Strand,
    pub position: i64,
}

impl PlacementRecord {
    pub fn new(
        chrom: impl Into<String>,
        contig: impl Into<String>,
        strand: Strand,
        position: i64,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            contig: contig.into(),
            strand,
            position,
        }
    }

    /// Gap sentinel placed between two adjacent contigs of `chrom`
    pub fn gap(chrom: impl Into<String>) -> Self {
        Self::new(chrom, GAP_CONTIG, Strand::Unknown, 0)
    }

    pub fn is_gap(&self) -> bool {
        self.contig == GAP_CONTIG
    }

    /// Same placement under a different chromosome id
    pub fn with_chrom(&self, chrom: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            ..self.clone()
        }
    }
}

/// 4-column layout: chromosome, contig, strand (0/1), position
impl std::fmt::Display for PlacementRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom,
            self.contig,
            self.strand.code(),
            self.position
        )
    }
}
