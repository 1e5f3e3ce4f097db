//! Structural edits over placement records
//!
//! Every stage borrows its input and returns a new record list; nothing is
//! edited in place. The stages compose in any order, but the converter runs
//! them in this order:
//!
//! ```text
//! select -> filter -> rename -> reverse -> reorder_positions
//!        -> [insert_gaps] -> reorder_positions -> [natural_order]
//!        -> [derive_size_rank -> rename -> natural_order]
//! ```
//!
//! Grouping by chromosome always keeps first-seen chromosome order, so a
//! stage never moves a chromosome group unless it sorts groups on purpose.

use crate::core::natural::NaturalKey;
use crate::core::record::PlacementRecord;
use crate::core::tables::RenameTable;
use indexmap::IndexMap;

/// Group records by chromosome, keeping first-seen chromosome order and the
/// original record order within each group
pub fn group_by_chromosome(records: &[PlacementRecord]) -> IndexMap<&str, Vec<&PlacementRecord>> {
    let mut groups: IndexMap<&str, Vec<&PlacementRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.chrom.as_str()).or_default().push(record);
    }
    groups
}

/// Keep records whose chromosome id contains at least one of `keys`
pub fn select<S: AsRef<str>>(records: &[PlacementRecord], keys: &[S]) -> Vec<PlacementRecord> {
    records
        .iter()
        .filter(|r| keys.iter().any(|k| r.chrom.contains(k.as_ref())))
        .cloned()
        .collect()
}

/// Strip every occurrence of every key from the chromosome id, one key at a
/// time in the given order
pub fn filter<S: AsRef<str>>(records: &[PlacementRecord], keys: &[S]) -> Vec<PlacementRecord> {
    records
        .iter()
        .map(|r| {
            let chrom = keys
                .iter()
                .fold(r.chrom.clone(), |id, key| id.replace(key.as_ref(), ""));
            r.with_chrom(chrom)
        })
        .collect()
}

/// Replace chromosome ids through `table`; ids without an entry pass through
pub fn rename(records: &[PlacementRecord], table: &RenameTable) -> Vec<PlacementRecord> {
    records
        .iter()
        .map(|r| r.with_chrom(table.resolve(&r.chrom)))
        .collect()
}

/// Reverse the listed chromosomes: their record order is inverted and every
/// strand flipped. Other chromosomes, and the order of groups, are untouched.
pub fn reverse<S: AsRef<str>>(records: &[PlacementRecord], targets: &[S]) -> Vec<PlacementRecord> {
    let mut out = Vec::with_capacity(records.len());
    for (chrom, group) in group_by_chromosome(records) {
        if targets.iter().any(|t| t.as_ref() == chrom) {
            out.extend(group.into_iter().rev().map(|r| PlacementRecord {
                strand: r.strand.flip(),
                ..r.clone()
            }));
        } else {
            out.extend(group.into_iter().cloned());
        }
    }
    out
}

/// Renumber positions as 1..n per chromosome in current iteration order
///
/// Records are regrouped by chromosome (first-seen order), so a chromosome
/// whose records are not adjacent in the input still gets one dense run.
pub fn reorder_positions(records: &[PlacementRecord]) -> Vec<PlacementRecord> {
    let mut out = Vec::with_capacity(records.len());
    for (_, group) in group_by_chromosome(records) {
        out.extend(group.into_iter().zip(1..).map(|(record, position)| PlacementRecord {
            position,
            ..record.clone()
        }));
    }
    out
}

/// Sort each chromosome by position and put a gap sentinel between every
/// pair of adjacent contigs
///
/// No gap is placed before the first or after the last contig, so a
/// chromosome with n contigs gains n - 1 gaps.
pub fn insert_gaps(records: &[PlacementRecord]) -> Vec<PlacementRecord> {
    let mut out = Vec::with_capacity(records.len() * 2);
    for (chrom, mut group) in group_by_chromosome(records) {
        group.sort_by_key(|r| r.position);
        for (i, record) in group.iter().enumerate() {
            if i > 0 {
                out.push(PlacementRecord::gap(chrom));
            }
            out.push((*record).clone());
        }
    }
    out
}

/// Sort chromosome groups by the natural order of their ids; records keep
/// their order within each group
pub fn natural_order(records: &[PlacementRecord]) -> Vec<PlacementRecord> {
    let mut groups: Vec<(NaturalKey, Vec<&PlacementRecord>)> = group_by_chromosome(records)
        .into_iter()
        .map(|(chrom, group)| (NaturalKey::new(chrom), group))
        .collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    groups
        .into_iter()
        .flat_map(|(_, group)| group.into_iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strand;

    fn rec(chrom: &str, contig: &str, strand: Strand, position: i64) -> PlacementRecord {
        PlacementRecord::new(chrom, contig, strand, position)
    }

    fn chroms(records: &[PlacementRecord]) -> Vec<&str> {
        records.iter().map(|r| r.chrom.as_str()).collect()
    }

    fn contigs(records: &[PlacementRecord]) -> Vec<&str> {
        records.iter().map(|r| r.contig.as_str()).collect()
    }

    #[test]
    fn test_select_substring_any_key() {
        let records = vec![
            rec("chr1_RagTag", "a", Strand::Forward, 1),
            rec("Scaf_2", "b", Strand::Forward, 1),
            rec("ptg0003", "c", Strand::Forward, 1),
        ];
        let out = select(&records, &["RagTag", "ptg"]);
        assert_eq!(chroms(&out), vec!["chr1_RagTag", "ptg0003"]);
    }

    #[test]
    fn test_select_no_keys_keeps_nothing() {
        let records = vec![rec("chr1", "a", Strand::Forward, 1)];
        let keys: [&str; 0] = [];
        assert!(select(&records, &keys).is_empty());
    }

    #[test]
    fn test_filter_removes_all_occurrences_in_key_order() {
        let records = vec![rec("NX_chr1_RagTag_RagTag", "a", Strand::Reverse, 4)];
        let out = filter(&records, &["_RagTag", "NX_"]);
        assert_eq!(out[0].chrom, "chr1");
        assert_eq!(out[0].contig, "a");
        assert_eq!(out[0].strand, Strand::Reverse);
        assert_eq!(out[0].position, 4);
    }

    #[test]
    fn test_filter_key_order_matters() {
        // Removing "ab" first leaves "c"; removing "b" first leaves "ac"
        let records = vec![rec("abc", "x", Strand::Forward, 1)];
        assert_eq!(filter(&records, &["ab", "b"])[0].chrom, "c");
        assert_eq!(filter(&records, &["b", "ab"])[0].chrom, "ac");
    }

    #[test]
    fn test_rename_passes_unknown_through() {
        let table: RenameTable = [("Scaf_1", "chr1")].into_iter().collect();
        let records = vec![
            rec("Scaf_1", "a", Strand::Forward, 1),
            rec("Scaf_2", "b", Strand::Forward, 1),
        ];
        let out = rename(&records, &table);
        assert_eq!(chroms(&out), vec!["chr1", "Scaf_2"]);
    }

    #[test]
    fn test_reverse_flips_order_and_strand() {
        let records = vec![
            rec("chr0", "z", Strand::Forward, 1),
            rec("chr1", "a", Strand::Forward, 1),
            rec("chr1", "b", Strand::Forward, 2),
            rec("chr1", "c", Strand::Reverse, 3),
            rec("chr2", "d", Strand::Forward, 1),
        ];
        let out = reverse(&records, &["chr1"]);

        assert_eq!(contigs(&out), vec!["z", "c", "b", "a", "d"]);
        let strands: Vec<Strand> = out[1..4].iter().map(|r| r.strand).collect();
        assert_eq!(strands, vec![Strand::Forward, Strand::Reverse, Strand::Reverse]);
        let positions: Vec<i64> = out[1..4].iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![3, 2, 1]);
        assert_eq!(out[0].strand, Strand::Forward);
        assert_eq!(out[4].strand, Strand::Forward);
    }

    #[test]
    fn test_reverse_regroups_interleaved_chromosomes() {
        let records = vec![
            rec("chr1", "a", Strand::Forward, 1),
            rec("chr2", "x", Strand::Forward, 1),
            rec("chr1", "b", Strand::Forward, 2),
        ];
        let out = reverse(&records, &["chr9"]);
        assert_eq!(contigs(&out), vec!["a", "b", "x"]);
    }

    #[test]
    fn test_reorder_positions_dense_per_chromosome() {
        let records = vec![
            rec("chr1", "a", Strand::Forward, 7),
            rec("chr1", "b", Strand::Forward, 3),
            rec("chr2", "c", Strand::Forward, 9),
            rec("chr2", "d", Strand::Forward, 9),
            rec("chr2", "e", Strand::Forward, 0),
        ];
        let out = reorder_positions(&records);
        let positions: Vec<i64> = out.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_positions_regroups_interleaved_chromosomes() {
        let records = vec![
            rec("chr1", "a", Strand::Forward, 1),
            rec("chr2", "x", Strand::Forward, 1),
            rec("chr1", "b", Strand::Reverse, 1),
        ];
        let out = reorder_positions(&records);
        assert_eq!(chroms(&out), vec!["chr1", "chr1", "chr2"]);
        assert_eq!(contigs(&out), vec!["a", "b", "x"]);
        let positions: Vec<i64> = out.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 1]);
    }

    #[test]
    fn test_insert_gaps_between_contigs_only() {
        let records = vec![
            rec("chr1", "b", Strand::Forward, 2),
            rec("chr1", "a", Strand::Forward, 1),
            rec("chr1", "c", Strand::Forward, 3),
            rec("chr2", "solo", Strand::Reverse, 1),
        ];
        let out = insert_gaps(&records);
        assert_eq!(contigs(&out), vec!["a", "GAP", "b", "GAP", "c", "solo"]);
        assert!(out[1].is_gap());
        assert_eq!(out[1].chrom, "chr1");
        assert_eq!(out[1].strand, Strand::Unknown);
        assert_eq!(out[1].position, 0);
    }

    #[test]
    fn test_insert_gaps_sort_is_stable() {
        let records = vec![
            rec("chr1", "first", Strand::Forward, 1),
            rec("chr1", "second", Strand::Forward, 1),
        ];
        let out = insert_gaps(&records);
        assert_eq!(contigs(&out), vec!["first", "GAP", "second"]);
    }

    #[test]
    fn test_natural_order_sorts_groups_not_records() {
        let records = vec![
            rec("chr10", "j", Strand::Forward, 1),
            rec("chr2", "b2", Strand::Forward, 1),
            rec("chr2", "b1", Strand::Forward, 2),
            rec("chr1", "a", Strand::Forward, 1),
        ];
        let out = natural_order(&records);
        assert_eq!(chroms(&out), vec!["chr1", "chr2", "chr2", "chr10"]);
        assert_eq!(contigs(&out), vec!["a", "b2", "b1", "j"]);
    }

    #[test]
    fn test_stages_do_not_touch_input() {
        let records = vec![rec("chr1_x", "a", Strand::Forward, 5)];
        let snapshot = records.clone();
        let _ = filter(&records, &["_x"]);
        let _ = reverse(&records, &["chr1_x"]);
        let _ = reorder_positions(&records);
        assert_eq!(records, snapshot);
    }
}
