//! AGP emitter
//!
//! Converts ordered placement records into output rows:
//!
//! - 4-column: records pass through unchanged, strand as `0`/`1`.
//! - 9-column: each chromosome is laid out from base 1. Contigs take their
//!   length from the contig-size table, and gap sentinels become fixed-size
//!   `U` rows. Every segment starts at the previous segment's end + 1.

use crate::core::error::{AgpError, AgpResult};
use crate::core::transform::group_by_chromosome;
use crate::core::{ContigSizeTable, PlacementRecord, Strand};
use std::io::Write;

/// Component type of a 9-column row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `W`: a contig (WGS contig)
    Contig,
    /// `U`: a gap of unknown size
    Gap,
}

impl SegmentKind {
    pub fn code(&self) -> &'static str {
        match self {
            SegmentKind::Contig => "W",
            SegmentKind::Gap => "U",
        }
    }
}

/// Linkage evidence written in the last column of gap rows
pub const GAP_METHOD: &str = "proximity_ligation";

/// A resolved 9-column row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedSegment {
    pub chrom: String,
    /// 1-based inclusive start on the chromosome
    pub start: u64,
    /// 1-based inclusive end; `end = start + length - 1`
    pub end: u64,
    pub order: i64,
    pub kind: SegmentKind,
    pub name: String,
    /// Always 1: contigs are placed whole and gaps start at 1
    pub source_start: u64,
    pub source_length: u64,
    pub strand: Strand,
}

impl SizedSegment {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_gap(&self) -> bool {
        self.kind == SegmentKind::Gap
    }
}

impl std::fmt::Display for SizedSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last = match self.kind {
            SegmentKind::Contig => self.strand.symbol(),
            SegmentKind::Gap => GAP_METHOD,
        };
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.order,
            self.kind.code(),
            self.name,
            self.source_start,
            self.source_length,
            last
        )
    }
}

/// Rows produced by one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgpOutput {
    FourColumn(Vec<PlacementRecord>),
    NineColumn(Vec<SizedSegment>),
}

impl AgpOutput {
    /// Number of rows that will be written
    pub fn len(&self) -> usize {
        match self {
            AgpOutput::FourColumn(rows) => rows.len(),
            AgpOutput::NineColumn(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every row, tab-separated, one per line, no header
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            AgpOutput::FourColumn(rows) => {
                for row in rows {
                    writeln!(writer, "{}", row)?;
                }
            }
            AgpOutput::NineColumn(rows) => {
                for row in rows {
                    writeln!(writer, "{}", row)?;
                }
            }
        }
        Ok(())
    }
}

/// 4-column emission: records pass through unchanged
pub fn emit_four_column(records: &[PlacementRecord]) -> AgpOutput {
    AgpOutput::FourColumn(records.to_vec())
}

/// 9-column emission with resolved coordinates
///
/// Gap sentinels become `gap_size`-long `U` rows, or are dropped when
/// `gap_size` is 0 (the next contig then starts right after the previous
/// one). The order column carries each record's position unchanged.
/// Rows come out grouped by chromosome in first-seen order, so a chromosome
/// split across the input is still laid out as one run.
pub fn emit_nine_column(
    records: &[PlacementRecord],
    sizes: &ContigSizeTable,
    gap_size: i64,
) -> AgpResult<Vec<SizedSegment>> {
    if gap_size < 0 {
        return Err(AgpError::Config(format!(
            "gap size must be >= 0, got {}",
            gap_size
        )));
    }
    if sizes.is_empty() {
        return Err(AgpError::Config(
            "9-column output needs contig sizes, but the size table is empty".to_string(),
        ));
    }
    let gap_size = gap_size as u64;

    let mut segments = Vec::with_capacity(records.len());
    for (chrom, group) in group_by_chromosome(records) {
        let mut current_start: Option<u64> = Some(1);
        for record in group {
            let (kind, length) = if record.is_gap() {
                if gap_size == 0 {
                    continue;
                }
                (SegmentKind::Gap, gap_size)
            } else {
                match sizes.get(&record.contig) {
                    Some(size) if size > 0 => (SegmentKind::Contig, size),
                    _ => {
                        return Err(AgpError::MissingSize {
                            chrom: record.chrom.clone(),
                            contig: record.contig.clone(),
                        })
                    }
                }
            };

            let overflow = || {
                AgpError::Config(format!(
                    "chromosome {} grows past {} bp at {}",
                    chrom,
                    u64::MAX,
                    record.contig
                ))
            };
            let start = current_start.ok_or_else(overflow)?;
            let end = start.checked_add(length - 1).ok_or_else(overflow)?;
            segments.push(SizedSegment {
                chrom: record.chrom.clone(),
                start,
                end,
                order: record.position,
                kind,
                name: record.contig.clone(),
                source_start: 1,
                source_length: length,
                strand: record.strand,
            });
            current_start = end.checked_add(1);
        }
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> ContigSizeTable {
        [("ctgA", 100u64), ("ctgB", 50)].into_iter().collect()
    }

    fn two_contigs_with_gap() -> Vec<PlacementRecord> {
        vec![
            PlacementRecord::new("chr1", "ctgA", Strand::Forward, 1),
            PlacementRecord {
                position: 2,
                ..PlacementRecord::gap("chr1")
            },
            PlacementRecord::new("chr1", "ctgB", Strand::Reverse, 3),
        ]
    }

    fn lines(segments: &[SizedSegment]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nine_column_with_gap() {
        let segments = emit_nine_column(&two_contigs_with_gap(), &sizes(), 10).unwrap();
        assert_eq!(
            lines(&segments),
            vec![
                "chr1\t1\t100\t1\tW\tctgA\t1\t100\t+",
                "chr1\t101\t110\t2\tU\tGAP\t1\t10\tproximity_ligation",
                "chr1\t111\t160\t3\tW\tctgB\t1\t50\t-",
            ]
        );
    }

    #[test]
    fn test_zero_gap_drops_gap_rows() {
        let segments = emit_nine_column(&two_contigs_with_gap(), &sizes(), 0).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, 101);
        assert_eq!(segments[1].end, 150);
        assert!(segments.iter().all(|s| !s.is_gap()));
    }

    #[test]
    fn test_start_resets_per_chromosome() {
        let records = vec![
            PlacementRecord::new("chr1", "ctgA", Strand::Forward, 1),
            PlacementRecord::new("chr2", "ctgB", Strand::Forward, 1),
        ];
        let segments = emit_nine_column(&records, &sizes(), 100).unwrap();
        assert_eq!(segments[1].start, 1);
        assert_eq!(segments[1].end, 50);
    }

    #[test]
    fn test_interleaved_chromosome_is_laid_out_as_one_run() {
        let sizes: ContigSizeTable = [("ctgA", 100u64), ("ctgX", 7), ("ctgB", 50)]
            .into_iter()
            .collect();
        let records = vec![
            PlacementRecord::new("chr1", "ctgA", Strand::Forward, 1),
            PlacementRecord::new("chr2", "ctgX", Strand::Forward, 1),
            PlacementRecord::new("chr1", "ctgB", Strand::Reverse, 2),
        ];
        let segments = emit_nine_column(&records, &sizes, 0).unwrap();
        assert_eq!(
            lines(&segments),
            vec![
                "chr1\t1\t100\t1\tW\tctgA\t1\t100\t+",
                "chr1\t101\t150\t2\tW\tctgB\t1\t50\t-",
                "chr2\t1\t7\t1\tW\tctgX\t1\t7\t+",
            ]
        );
    }

    #[test]
    fn test_coordinate_overflow_is_config_error() {
        let sizes: ContigSizeTable = [("ctgA", u64::MAX), ("ctgB", 1)].into_iter().collect();
        let records = vec![
            PlacementRecord::new("chr1", "ctgA", Strand::Forward, 1),
            PlacementRecord::new("chr1", "ctgB", Strand::Forward, 2),
        ];
        let err = emit_nine_column(&records, &sizes, 0).unwrap_err();
        assert!(matches!(err, AgpError::Config(ref msg) if msg.contains("chr1")));
    }

    #[test]
    fn test_negative_gap_is_config_error() {
        let err = emit_nine_column(&two_contigs_with_gap(), &sizes(), -1).unwrap_err();
        assert!(matches!(err, AgpError::Config(_)));
    }

    #[test]
    fn test_empty_size_table_is_config_error() {
        let err = emit_nine_column(&two_contigs_with_gap(), &ContigSizeTable::new(), 10)
            .unwrap_err();
        assert!(matches!(err, AgpError::Config(_)));
    }

    #[test]
    fn test_missing_size_names_contig() {
        let records = vec![PlacementRecord::new("chr7", "ctgZ", Strand::Forward, 1)];
        match emit_nine_column(&records, &sizes(), 10).unwrap_err() {
            AgpError::MissingSize { chrom, contig } => {
                assert_eq!(chrom, "chr7");
                assert_eq!(contig, "ctgZ");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_size_counts_as_missing() {
        let sizes: ContigSizeTable = [("ctgA", 0u64)].into_iter().collect();
        let records = vec![PlacementRecord::new("chr1", "ctgA", Strand::Forward, 1)];
        assert!(matches!(
            emit_nine_column(&records, &sizes, 10),
            Err(AgpError::MissingSize { .. })
        ));
    }

    #[test]
    fn test_four_column_output_writes_codes() {
        let records = vec![PlacementRecord::new("chr1", "ctgA", Strand::Reverse, 1)];
        let output = emit_four_column(&records);
        let mut buf = Vec::new();
        output.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "chr1\tctgA\t1\t1\n");
    }
}
