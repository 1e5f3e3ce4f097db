//! Lookup tables loaded from auxiliary tab-separated files
//!
//! - [`ContigSizeTable`]: `contig<TAB>size`
//! - [`RenameTable`]: `old_id<TAB>new_id`
//!
//! Both keep insertion order. Duplicate keys overwrite earlier values (last
//! write wins). Blank lines, `#` comments and rows with fewer than two fields
//! are ignored. Tables are built once per run and only read afterwards.

use crate::core::error::AgpResult;
use crate::core::io::{data_line, open_reader, split_tabs, LineIterator};
use indexmap::IndexMap;
use log::warn;
use std::io::BufRead;
use std::path::Path;

/// Contig name -> contig length in bases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContigSizeTable {
    sizes: IndexMap<String, u64>,
}

impl ContigSizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a size table from a (possibly compressed) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AgpResult<Self> {
        Self::from_reader(open_reader(path)?)
    }

    /// Parse `contig<TAB>size` rows; rows with a non-integer size are
    /// reported and skipped
    pub fn from_reader<R: BufRead>(reader: R) -> AgpResult<Self> {
        let mut table = Self::new();
        let mut lines = LineIterator::new(reader);
        while let Some(line) = lines.next_line() {
            let (line_number, line) = line?;
            let Some(line) = data_line(line) else {
                continue;
            };
            let fields = split_tabs(line);
            if fields.len() < 2 {
                continue;
            }
            match fields[1].trim().parse::<u64>() {
                Ok(size) => table.insert(fields[0], size),
                Err(_) => warn!(
                    "Skipping size row at line {}: cannot convert '{}' to an integer",
                    line_number, fields[1]
                ),
            }
        }
        Ok(table)
    }

    /// Insert or overwrite a contig size
    pub fn insert(&mut self, contig: impl Into<String>, size: u64) {
        self.sizes.insert(contig.into(), size);
    }

    pub fn get(&self, contig: &str) -> Option<u64> {
        self.sizes.get(contig).copied()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.sizes.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for ContigSizeTable {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (contig, size) in iter {
            table.insert(contig, size);
        }
        table
    }
}

/// Old chromosome id -> new chromosome id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    ids: IndexMap<String, String>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rename table from a (possibly compressed) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AgpResult<Self> {
        Self::from_reader(open_reader(path)?)
    }

    /// Parse `old_id<TAB>new_id` rows
    pub fn from_reader<R: BufRead>(reader: R) -> AgpResult<Self> {
        let mut table = Self::new();
        let mut lines = LineIterator::new(reader);
        while let Some(line) = lines.next_line() {
            let (_, line) = line?;
            let Some(line) = data_line(line) else {
                continue;
            };
            let fields = split_tabs(line);
            if fields.len() < 2 {
                continue;
            }
            table.insert(fields[0], fields[1]);
        }
        Ok(table)
    }

    pub fn insert(&mut self, old_id: impl Into<String>, new_id: impl Into<String>) {
        self.ids.insert(old_id.into(), new_id.into());
    }

    pub fn get(&self, old_id: &str) -> Option<&str> {
        self.ids.get(old_id).map(String::as_str)
    }

    /// New id for `old_id`, or `old_id` itself when no entry exists
    pub fn resolve<'a>(&'a self, old_id: &'a str) -> &'a str {
        self.get(old_id).unwrap_or(old_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenameTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (old_id, new_id) in iter {
            table.insert(old_id, new_id);
        }
        table
    }
}
