//! Contig orientation
//!
//! AGP layouts use two strand encodings: the 4-column layout stores `0`/`1`,
//! the 9-column layout stores `+`/`-`. Both decode into [`Strand`], and any
//! unrecognized symbol decodes to [`Strand::Unknown`] instead of failing.

/// Strand orientation of a contig relative to its chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    /// Decode the internal `0`/`1` encoding
    ///
    /// # Examples
    /// ```
    /// use agp_convert::core::Strand;
    /// assert_eq!(Strand::from_code("0"), Strand::Forward);
    /// assert_eq!(Strand::from_code("1"), Strand::Reverse);
    /// assert_eq!(Strand::from_code("+"), Strand::Unknown);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => Strand::Forward,
            "1" => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// Decode the external `+`/`-` encoding
    ///
    /// # Examples
    /// ```
    /// use agp_convert::core::Strand;
    /// assert_eq!(Strand::from_symbol("+"), Strand::Forward);
    /// assert_eq!(Strand::from_symbol("-"), Strand::Reverse);
    /// assert_eq!(Strand::from_symbol("?"), Strand::Unknown);
    /// ```
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// Internal encoding, `.` for unknown
    pub fn code(&self) -> &'static str {
        match self {
            Strand::Forward => "0",
            Strand::Reverse => "1",
            Strand::Unknown => ".",
        }
    }

    /// External encoding, `.` for unknown
    pub fn symbol(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        }
    }

    /// Opposite orientation; unknown stays unknown
    ///
    /// # Examples
    /// ```
    /// use agp_convert::core::Strand;
    /// assert_eq!(Strand::Forward.flip(), Strand::Reverse);
    /// assert_eq!(Strand::Reverse.flip(), Strand::Forward);
    /// assert_eq!(Strand::Unknown.flip(), Strand::Unknown);
    /// ```
    pub fn flip(&self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
            Strand::Unknown => Strand::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Strand::Unknown)
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_symbol_roundtrip() {
        for strand in [Strand::Forward, Strand::Reverse] {
            assert_eq!(Strand::from_code(strand.code()), strand);
            assert_eq!(Strand::from_symbol(strand.symbol()), strand);
        }
    }

    #[test]
    fn test_encodings_do_not_cross() {
        assert_eq!(Strand::from_symbol("0"), Strand::Unknown);
        assert_eq!(Strand::from_code("-"), Strand::Unknown);
    }

    #[test]
    fn test_unknown_renders_dot() {
        assert_eq!(Strand::Unknown.code(), ".");
        assert_eq!(Strand::Unknown.symbol(), ".");
        assert!(!Strand::Unknown.is_known());
    }

    #[test]
    fn test_double_flip_is_identity() {
        for strand in [Strand::Forward, Strand::Reverse, Strand::Unknown] {
            assert_eq!(strand.flip().flip(), strand);
        }
    }
}
