//! Error types for AGP conversion
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for AGP conversion
///
/// Every variant is terminal for a run: nothing is retried and no partial
/// result is returned.
#[derive(Debug, Error)]
pub enum AgpError {
    /// Empty, unparseable or ambiguous-column input
    #[error("Invalid AGP format: {0}")]
    Format(String),

    /// Strand field outside the accepted symbol set
    #[error("Invalid strand '{strand}' at line {line}: expected {expected}")]
    InvalidStrand {
        line: usize,
        strand: String,
        expected: &'static str,
    },

    /// Position or coordinate field that is not an integer
    #[error("Invalid {field} '{value}' at line {line}")]
    InvalidPosition {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// 9-column emission hit a contig with no known size
    #[error("Contig size not found for '{contig}' on chromosome '{chrom}'")]
    MissingSize { chrom: String, contig: String },

    /// Invalid run configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgpError {
    pub(crate) fn invalid_strand(line: usize, strand: &str, expected: &'static str) -> Self {
        AgpError::InvalidStrand {
            line,
            strand: strand.to_string(),
            expected,
        }
    }

    pub(crate) fn invalid_position(line: usize, field: &'static str, value: &str) -> Self {
        AgpError::InvalidPosition {
            line,
            field,
            value: value.to_string(),
        }
    }
}

/// Result type alias for AGP operations
pub type AgpResult<T> = std::result::Result<T, AgpError>;
