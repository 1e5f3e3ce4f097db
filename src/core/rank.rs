//! Size-rank renaming
//!
//! Ranks chromosomes by total contig length (largest first) and assigns each
//! one the name `prefix + rank`.

use crate::core::record::PlacementRecord;
use crate::core::tables::{ContigSizeTable, RenameTable};
use crate::core::transform::group_by_chromosome;
use indexmap::IndexMap;
use log::info;

/// Total contig length per chromosome, in first-seen chromosome order
///
/// Gap sentinels are excluded and contigs missing from `sizes` count as 0.
pub fn chromosome_sizes<'a>(
    records: &'a [PlacementRecord],
    sizes: &ContigSizeTable,
) -> IndexMap<&'a str, u64> {
    group_by_chromosome(records)
        .into_iter()
        .map(|(chrom, group)| {
            let total: u64 = group
                .iter()
                .filter(|r| !r.is_gap())
                .map(|r| sizes.get(&r.contig).unwrap_or(0))
                .sum();
            (chrom, total)
        })
        .collect()
}

/// Build a rename table mapping each chromosome to `prefix + rank`, rank 1
/// being the largest
///
/// Equal totals keep first-seen order, so the earlier chromosome gets the
/// lower rank. The returned table iterates in rank order.
pub fn derive_size_rank(
    records: &[PlacementRecord],
    sizes: &ContigSizeTable,
    prefix: &str,
) -> RenameTable {
    let mut totals: Vec<(&str, u64)> = chromosome_sizes(records, sizes).into_iter().collect();
    // stable: ties stay in first-seen order
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .enumerate()
        .map(|(i, (chrom, total))| {
            let new_id = format!("{}{}", prefix, i + 1);
            info!("{} -> {} ({} bp)", chrom, new_id, total);
            (chrom, new_id)
        })
        .collect()
}
