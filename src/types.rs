use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A nucleotide counted by the PWM calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
}

/// Uppercase character to matrix row
static BASE_ROWS: phf::Map<char, Base> = phf_map! {
    'A' => Base::A,
    'T' => Base::T,
    'G' => Base::G,
    'C' => Base::C,
};

impl Base {
    /// Fixed row order of the frequency matrix, also used for display
    pub const ROW_ORDER: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    /// Maps an uppercase nucleotide to its base, `None` for anything else
    pub fn from_char(c: char) -> Option<Base> {
        BASE_ROWS.get(&c).copied()
    }

    /// Row index of this base in the frequency matrix
    pub fn row(self) -> usize {
        match self {
            Base::A => 0,
            Base::T => 1,
            Base::G => 2,
            Base::C => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One record of a FASTA document
/// Records found before any header carry an empty label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub label: String,
    pub sequence: String,
}

/// How the calculator treats characters outside A, T, G, C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetPolicy {
    /// Skip them silently; affected columns may sum below 100
    #[default]
    Tolerant,
    /// Reject the batch on the first one
    Strict,
}
