//! AGP layout parser
//!
//! Reads either the minimal 4-column layout
//!
//! ```text
//! chromosome  contig  strand(0|1)  position
//! ```
//!
//! or the standard 9-column layout
//!
//! ```text
//! chromosome  start  end  order  type(W|U|N)  contig  contig_start  contig_end  strand(+|-)
//! ```
//!
//! into a [`RecordStore`]. Only rows with exactly 4 or 9 tab-separated fields
//! count; if both kinds are present the 9-column rows win and the others are
//! ignored.

use crate::core::error::{AgpError, AgpResult};
use crate::core::io::{data_line, open_reader, split_tabs, LineIterator};
use crate::core::{ContigSizeTable, PlacementRecord, Strand};
use indexmap::IndexMap;
use log::debug;
use std::io::BufRead;
use std::path::Path;

/// Column layout of an AGP file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgpLayout {
    FourColumn,
    NineColumn,
}

impl AgpLayout {
    /// Number of tab-separated fields per row
    pub fn columns(&self) -> usize {
        match self {
            AgpLayout::FourColumn => 4,
            AgpLayout::NineColumn => 9,
        }
    }

    pub fn from_columns(columns: usize) -> Option<Self> {
        match columns {
            4 => Some(AgpLayout::FourColumn),
            9 => Some(AgpLayout::NineColumn),
            _ => None,
        }
    }

    /// Pick the layout for a set of observed row widths; 9 beats 4
    pub fn detect<I: IntoIterator<Item = usize>>(widths: I) -> AgpResult<Self> {
        let mut seen_four = false;
        for width in widths {
            match width {
                9 => return Ok(AgpLayout::NineColumn),
                4 => seen_four = true,
                _ => {}
            }
        }
        if seen_four {
            Ok(AgpLayout::FourColumn)
        } else {
            Err(AgpError::Format(
                "no 4-column or 9-column rows found".to_string(),
            ))
        }
    }
}

impl std::fmt::Display for AgpLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-column", self.columns())
    }
}

/// Component types that mark gap rows in the 9-column layout
const GAP_COMPONENT_TYPES: [&str; 2] = ["N", "U"];

/// One retained input row
struct Row {
    line: usize,
    fields: Vec<String>,
}

/// Placement records parsed from one AGP file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    /// Layout detected in the input
    pub layout: AgpLayout,
    /// Records in input order (4-column) or sorted by chromosome and rank (9-column)
    pub records: Vec<PlacementRecord>,
    /// Contig lengths derived from 9-column input; empty for 4-column input
    pub contig_sizes: ContigSizeTable,
}

impl RecordStore {
    /// Parse a (possibly compressed) AGP file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AgpResult<Self> {
        Self::from_reader(open_reader(path)?)
    }

    /// Parse AGP rows from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> AgpResult<Self> {
        let rows = read_rows(reader)?;
        if rows.is_empty() {
            return Err(AgpError::Format(
                "AGP input is empty or has no 4-column or 9-column rows".to_string(),
            ));
        }

        let layout = AgpLayout::detect(rows.iter().map(|r| r.fields.len()))?;
        let store = match layout {
            AgpLayout::FourColumn => RecordStore {
                layout,
                records: parse_four_column(&rows)?,
                contig_sizes: ContigSizeTable::new(),
            },
            AgpLayout::NineColumn => {
                let (records, contig_sizes) = parse_nine_column(&rows)?;
                RecordStore {
                    layout,
                    records,
                    contig_sizes,
                }
            }
        };

        debug!(
            "Parsed {} AGP: {} records, {} contig sizes",
            store.layout,
            store.records.len(),
            store.contig_sizes.len()
        );
        Ok(store)
    }
}

/// Keep data rows with exactly 4 or 9 fields
fn read_rows<R: BufRead>(reader: R) -> AgpResult<Vec<Row>> {
    let mut rows = Vec::new();
    let mut lines = LineIterator::new(reader);
    while let Some(line) = lines.next_line() {
        let (line_number, line) = line?;
        let Some(line) = data_line(line) else {
            continue;
        };
        let fields = split_tabs(line);
        if AgpLayout::from_columns(fields.len()).is_some() {
            rows.push(Row {
                line: line_number,
                fields: fields.into_iter().map(str::to_string).collect(),
            });
        }
    }
    Ok(rows)
}

fn parse_four_column(rows: &[Row]) -> AgpResult<Vec<PlacementRecord>> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows.iter().filter(|r| r.fields.len() == 4) {
        let f = &row.fields;
        let strand = match f[2].as_str() {
            "0" | "1" => Strand::from_code(&f[2]),
            other => return Err(AgpError::invalid_strand(row.line, other, "'0' or '1'")),
        };
        let position = f[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| AgpError::invalid_position(row.line, "position", &f[3]))?;
        records.push(PlacementRecord::new(f[0].as_str(), f[1].as_str(), strand, position));
    }
    Ok(records)
}

/// Placement records and contig sizes from 9-column rows
///
/// Positions are not read from the file. Each distinct contig gets its
/// first-seen rank within its chromosome; a contig listed twice on one
/// chromosome keeps its first rank. A contig listed twice gets the size of
/// its last row.
fn parse_nine_column(rows: &[Row]) -> AgpResult<(Vec<PlacementRecord>, ContigSizeTable)> {
    let mut sizes = ContigSizeTable::new();
    let mut ranks: IndexMap<String, IndexMap<String, i64>> = IndexMap::new();
    let mut records = Vec::with_capacity(rows.len());
    let mut ignored = 0usize;

    for row in rows {
        let f = &row.fields;
        if f.len() != 9 {
            ignored += 1;
            continue;
        }
        if GAP_COMPONENT_TYPES.contains(&f[4].as_str()) {
            continue;
        }

        let chrom = &f[0];
        let contig = &f[5];
        let strand = Strand::from_symbol(&f[8]);
        if !strand.is_known() {
            return Err(AgpError::invalid_strand(row.line, &f[8], "'+' or '-'"));
        }

        let start = f[6]
            .trim()
            .parse::<i64>()
            .map_err(|_| AgpError::invalid_position(row.line, "contig start", &f[6]))?;
        let end = f[7]
            .trim()
            .parse::<i64>()
            .map_err(|_| AgpError::invalid_position(row.line, "contig end", &f[7]))?;
        let length = end
            .checked_sub(start)
            .and_then(|span| span.checked_add(1))
            .filter(|length| *length > 0)
            .ok_or_else(|| AgpError::invalid_position(row.line, "contig end", &f[7]))?;
        sizes.insert(contig.as_str(), length as u64);

        let chrom_ranks = ranks.entry(chrom.clone()).or_default();
        let next_rank = chrom_ranks.len() as i64 + 1;
        let rank = *chrom_ranks.entry(contig.clone()).or_insert(next_rank);

        records.push(PlacementRecord::new(chrom.as_str(), contig.as_str(), strand, rank));
    }

    if ignored > 0 {
        debug!("Ignored {} 4-column rows in 9-column input", ignored);
    }

    // stable: equal (chromosome, rank) keep input order
    records.sort_by(|a, b| a.chrom.cmp(&b.chrom).then(a.position.cmp(&b.position)));
    Ok((records, sizes))
}
