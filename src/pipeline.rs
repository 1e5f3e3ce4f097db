//! AGP conversion driver
//!
//! Runs the structural edits in their fixed order and hands the result to
//! the emitter:
//!
//! 1. select -> filter -> rename (id table) -> reverse
//! 2. reorder positions
//! 3. insert gaps (9-column output with gap size > 0 only)
//! 4. reorder positions
//! 5. natural order (optional)
//! 6. size-rank rename followed by natural order (optional)
//! 7. emit
//!
//! Everything a run needs is passed in through [`PipelineConfig`]; there is
//! no global state. Concurrent runs writing the same output path are not
//! coordinated, and a failure while writing can leave a partial file.

use crate::core::error::{AgpError, AgpResult};
use crate::core::io::AgpWriter;
use crate::core::rank::derive_size_rank;
use crate::core::transform::{
    filter, group_by_chromosome, insert_gaps, natural_order, rename, reorder_positions, reverse,
    select,
};
use crate::core::{ContigSizeTable, PlacementRecord, RenameTable};
use crate::formats::agp::{AgpLayout, RecordStore};
use crate::formats::emit::{emit_four_column, emit_nine_column, AgpOutput};
use log::{debug, info, warn};
use std::path::Path;

/// Gap length used between adjacent contigs unless configured otherwise
pub const DEFAULT_GAP_SIZE: i64 = 100;

/// Prefix for size-rank chromosome names unless configured otherwise
pub const DEFAULT_RANK_PREFIX: &str = "chr";

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub output_layout: AgpLayout,
    /// Gap length in bases for 9-column output; 0 disables gap rows
    pub gap_size: i64,
    /// Keep chromosomes whose id contains any of these keys
    pub select: Option<Vec<String>>,
    /// Strip these substrings from chromosome ids
    pub filter: Option<Vec<String>>,
    /// Chromosome id replacement table
    pub rename: Option<RenameTable>,
    /// Chromosomes to reverse-complement in layout
    pub reverse: Option<Vec<String>>,
    pub natural_order: bool,
    /// Rename chromosomes by descending total size using this prefix
    pub size_rank_prefix: Option<String>,
}

impl PipelineConfig {
    pub fn new(output_layout: AgpLayout) -> Self {
        Self {
            output_layout,
            gap_size: DEFAULT_GAP_SIZE,
            select: None,
            filter: None,
            rename: None,
            reverse: None,
            natural_order: false,
            size_rank_prefix: None,
        }
    }

    /// Check settings against the size information available for the run
    pub fn validate(&self, sizes: Option<&ContigSizeTable>) -> AgpResult<()> {
        if self.gap_size < 0 {
            return Err(AgpError::Config(format!(
                "gap size must be >= 0, got {}",
                self.gap_size
            )));
        }
        let has_sizes = sizes.is_some_and(|s| !s.is_empty());
        if self.output_layout == AgpLayout::NineColumn && !has_sizes {
            return Err(AgpError::Config(
                "9-column output needs contig sizes: pass a size file or use 9-column input"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn inserts_gaps(&self) -> bool {
        self.output_layout == AgpLayout::NineColumn && self.gap_size > 0
    }
}

/// Split a comma-separated option value into keys
///
/// # Examples
/// ```
/// use agp_convert::pipeline::split_keys;
/// assert_eq!(split_keys("_RagTag,NX_"), vec!["_RagTag", "NX_"]);
/// assert_eq!(split_keys("chr"), vec!["chr"]);
/// ```
pub fn split_keys(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Choose the size table for a run: an explicit size file wins, otherwise
/// sizes derived from 9-column input, otherwise none
pub fn resolve_sizes(
    store: &RecordStore,
    size_file: Option<ContigSizeTable>,
) -> Option<ContigSizeTable> {
    match size_file {
        Some(table) => {
            info!("Using contig sizes from size file ({} contigs)", table.len());
            Some(table)
        }
        None if !store.contig_sizes.is_empty() => {
            info!(
                "Using contig sizes from input AGP ({} contigs)",
                store.contig_sizes.len()
            );
            Some(store.contig_sizes.clone())
        }
        None => None,
    }
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Placement records read from the input
    pub input_records: usize,
    /// Rows written to the output
    pub output_rows: usize,
    /// Chromosomes in the output
    pub chromosomes: usize,
    /// Gap rows in the output
    pub gaps: usize,
    /// Bases covered by 9-column rows, gaps included; 0 for 4-column output
    pub assembled_bp: u64,
}

/// Result of running the pipeline in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    /// Records after the last stage, before emission
    pub records: Vec<PlacementRecord>,
    pub output: AgpOutput,
    /// Table applied by the size-rank stage, if it ran
    pub size_rank: Option<RenameTable>,
    pub stats: ConversionStats,
}

/// Run every configured stage over `store` and emit the output rows
pub fn run(
    store: &RecordStore,
    sizes: Option<&ContigSizeTable>,
    config: &PipelineConfig,
) -> AgpResult<PipelineResult> {
    config.validate(sizes)?;

    let mut records = store.records.clone();

    if let Some(keys) = &config.select {
        info!("Select chromosomes by keywords: {}", keys.join(","));
        records = select(&records, keys.as_slice());
    }
    if let Some(keys) = &config.filter {
        info!("Filter keywords out of chromosome ids: {}", keys.join(","));
        records = filter(&records, keys.as_slice());
    }
    if let Some(table) = &config.rename {
        info!("Replace chromosome ids ({} entries)", table.len());
        let unmapped: Vec<&str> = group_by_chromosome(&records)
            .into_keys()
            .filter(|id| table.get(id).is_none())
            .collect();
        if !unmapped.is_empty() {
            warn!(
                "{} chromosome ids have no replacement and keep their name: {}",
                unmapped.len(),
                unmapped.join(",")
            );
        }
        records = rename(&records, table);
    }
    if let Some(targets) = &config.reverse {
        info!("Reverse whole chromosomes: {}", targets.join(","));
        records = reverse(&records, targets.as_slice());
    }

    records = reorder_positions(&records);

    if config.inserts_gaps() {
        info!("Insert {} bp gaps between adjacent contigs", config.gap_size);
        records = insert_gaps(&records);
    }

    records = reorder_positions(&records);

    if config.natural_order {
        info!("Reorder chromosomes in natural order");
        records = natural_order(&records);
    }

    let mut size_rank = None;
    if let Some(prefix) = &config.size_rank_prefix {
        match sizes.filter(|s| !s.is_empty()) {
            Some(table) => {
                info!("Rename chromosomes by total size");
                let ranks = derive_size_rank(&records, table, prefix);
                records = natural_order(&rename(&records, &ranks));
                size_rank = Some(ranks);
            }
            None => warn!("No contig sizes available, skipping rename by size"),
        }
    }

    let output = match config.output_layout {
        AgpLayout::FourColumn => emit_four_column(&records),
        AgpLayout::NineColumn => {
            let table = sizes.ok_or_else(|| {
                AgpError::Config("9-column output needs contig sizes".to_string())
            })?;
            AgpOutput::NineColumn(emit_nine_column(&records, table, config.gap_size)?)
        }
    };

    let (gaps, assembled_bp) = match &output {
        AgpOutput::FourColumn(rows) => (rows.iter().filter(|r| r.is_gap()).count(), 0),
        AgpOutput::NineColumn(rows) => (
            rows.iter().filter(|r| r.is_gap()).count(),
            rows.iter().map(|r| r.len()).sum(),
        ),
    };
    let stats = ConversionStats {
        input_records: store.records.len(),
        output_rows: output.len(),
        chromosomes: group_by_chromosome(&records).len(),
        gaps,
        assembled_bp,
    };

    Ok(PipelineResult {
        records,
        output,
        size_rank,
        stats,
    })
}

/// Convert an AGP file end to end
///
/// `size_file` is an already loaded contig-size table, which takes priority
/// over sizes derived from the input. The output file is only created after
/// every stage and the emitter have succeeded.
pub fn convert_agp<P: AsRef<Path>>(
    input: P,
    output: P,
    size_file: Option<ContigSizeTable>,
    config: &PipelineConfig,
) -> AgpResult<ConversionStats> {
    let store = RecordStore::from_file(input.as_ref())?;
    info!(
        "Parsed {} input: {} placement records",
        store.layout,
        store.records.len()
    );
    let sizes = resolve_sizes(&store, size_file);

    let result = run(&store, sizes.as_ref(), config)?;

    let mut writer = AgpWriter::create(output.as_ref())?;
    if writer.is_compressed() {
        debug!("Writing gzip-compressed output to {}", output.as_ref().display());
    }
    result.output.write_to(&mut writer)?;
    writer.finish()?;

    Ok(result.stats)
}
