//! Natural ("human") ordering of chromosome ids
//!
//! An id is split into alternating text and digit runs, always starting with
//! a (possibly empty) text run. Text runs compare case-insensitively and
//! digit runs compare by numeric value, so `chr2 < chr10`.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Text(String),
    /// Digit run with leading zeros removed; value order is (length, digits)
    Number(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            // Runs alternate from a shared text start, so mixed pairs
            // only occur at the same index for malformed keys.
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for natural ordering
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Chunk>);

impl NaturalKey {
    /// Build the key for `id`
    ///
    /// # Examples
    /// ```
    /// use agp_convert::core::NaturalKey;
    /// assert!(NaturalKey::new("chr2") < NaturalKey::new("chr10"));
    /// assert_eq!(NaturalKey::new("Chr01"), NaturalKey::new("chr1"));
    /// ```
    pub fn new(id: &str) -> Self {
        let mut chunks = Vec::new();
        let mut text = String::new();
        let mut chars = id.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                chunks.push(Chunk::Text(std::mem::take(&mut text).to_lowercase()));
                let mut digits = String::from(c);
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                let trimmed = digits.trim_start_matches('0');
                chunks.push(Chunk::Number(trimmed.to_string()));
            } else {
                text.push(c);
            }
        }
        chunks.push(Chunk::Text(text.to_lowercase()));

        NaturalKey(chunks)
    }
}

/// Compare two ids in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        let mut ids = vec!["chr10", "chr2", "chr1"];
        ids.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(ids, vec!["chr1", "chr2", "chr10"]);
    }

    #[test]
    fn test_text_runs_case_insensitive() {
        assert_eq!(natural_cmp("ChrX", "chrx"), Ordering::Equal);
        assert_eq!(natural_cmp("chrA", "chrb"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_equal_value() {
        assert_eq!(natural_cmp("chr01", "chr1"), Ordering::Equal);
        assert_eq!(natural_cmp("chr09", "chr10"), Ordering::Less);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("scaf99999999999999999999999", "scaf100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_ids() {
        let mut ids = vec!["chrY", "chr2_random", "chr2", "chrX", "chr11", "1"];
        ids.sort_by(|a, b| natural_cmp(a, b));
        // "1" starts with an empty text run, which sorts before "chr"
        assert_eq!(ids, vec!["1", "chr2", "chr2_random", "chr11", "chrX", "chrY"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("chr1", "chr1a"), Ordering::Less);
    }
}
