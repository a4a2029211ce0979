use crate::error::{PwmError, Result};
use crate::types::{AlphabetPolicy, Base};
use log::{debug, warn};
use ndarray::{Array2, ArrayView1};
use polars::prelude::*;

/// Position frequency matrix of an aligned batch.
///
/// Four rows in [`Base::ROW_ORDER`], one column per alignment position. Each cell is the
/// percentage (0-100) of sequences carrying that base at that position.
#[derive(Debug, Clone, PartialEq)]
pub struct Pwm {
    matrix: Array2<f64>,
    num_sequences: usize,
}

impl Pwm {
    /// Number of positions (columns)
    pub fn len(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sequences the matrix was computed from
    pub fn num_sequences(&self) -> usize {
        self.num_sequences
    }

    /// Percentage of `base` at `column`, `None` past the last column
    pub fn value(&self, base: Base, column: usize) -> Option<f64> {
        self.matrix.get((base.row(), column)).copied()
    }

    pub fn row(&self, base: Base) -> ArrayView1<'_, f64> {
        self.matrix.row(base.row())
    }

    /// Sum of the four percentages at `column`; 100 unless the column holds non-ACGT characters
    pub fn column_sum(&self, column: usize) -> f64 {
        self.matrix.column(column).sum()
    }

    /// The raw 4 x L matrix
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Converts the matrix to a DataFrame with a `position` column and one column per base.
    ///
    /// # Returns
    /// * `Result<DataFrame>` - L rows; columns "position", "A", "T", "G", "C"
    ///
    /// # Errors
    /// * Returns `PwmError::DataError` if DataFrame creation fails
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Column::new(
            "position".into(),
            (0..self.len() as u32).collect::<Vec<u32>>(),
        )];
        columns.extend(Base::ROW_ORDER.iter().map(|base| {
            Column::new(
                base.to_string().into(),
                self.row(*base).to_vec(),
            )
        }));

        Ok(DataFrame::new(columns)?)
    }
}

/// Checks that every sequence has the length of the first one
fn check_lengths(sequences: &[String]) -> Result<usize> {
    let expected = sequences[0].chars().count();
    for (index, seq) in sequences.iter().enumerate().skip(1) {
        let found = seq.chars().count();
        if found != expected {
            return Err(PwmError::length_mismatch(index, expected, found));
        }
    }
    Ok(expected)
}

/// Computes the position frequency matrix of a batch of aligned sequences.
///
/// For every column the occurrences of A, T, G and C are counted across all sequences and
/// each count is divided by the number of sequences and multiplied by 100. Sequences are
/// expected to be uppercase already (see [`crate::fasta::normalize_sequences`]).
///
/// # Arguments
/// * `sequences` - The aligned sequences; the first one fixes the length L
/// * `policy` - What to do with characters outside A, T, G, C
///
/// # Returns
/// * `Result<Pwm>` - A 4 x L matrix with rows A, T, G, C
///
/// # Errors
/// * `PwmError::NoSequences` - If `sequences` is empty
/// * `PwmError::LengthMismatch` - If a sequence differs in length from the first one
/// * `PwmError::InvalidSequence` - Under `AlphabetPolicy::Strict`, on the first non-ACGT character
///
/// # Example
/// ```
/// use tf_pwm_rs::pwm::calculate_pwm;
/// use tf_pwm_rs::types::{AlphabetPolicy, Base};
///
/// let seqs: Vec<String> = ["ATCG", "ATCG", "ATCG", "ATGG"].iter().map(|s| s.to_string()).collect();
/// let pwm = calculate_pwm(&seqs, AlphabetPolicy::Tolerant).unwrap();
/// assert_eq!(pwm.value(Base::C, 2), Some(75.0));
/// assert_eq!(pwm.value(Base::G, 2), Some(25.0));
/// ```
pub fn calculate_pwm(sequences: &[String], policy: AlphabetPolicy) -> Result<Pwm> {
    if sequences.is_empty() {
        return Err(PwmError::NoSequences);
    }

    let length = check_lengths(sequences)?;
    let num_sequences = sequences.len();

    let mut counts = Array2::<usize>::zeros((Base::ROW_ORDER.len(), length));
    let mut skipped = 0usize;

    for (index, seq) in sequences.iter().enumerate() {
        for (position, c) in seq.chars().enumerate() {
            match Base::from_char(c) {
                Some(base) => counts[[base.row(), position]] += 1,
                None if policy == AlphabetPolicy::Strict => {
                    return Err(PwmError::invalid_sequence(index, position, c));
                }
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        warn!(
            "{} non-ACGT characters were not counted; affected columns sum below 100",
            skipped
        );
    }

    let matrix = counts.mapv(|count| count as f64 / num_sequences as f64 * 100.0);
    debug!(
        "computed PWM over {} sequences of length {}",
        num_sequences, length
    );

    Ok(Pwm {
        matrix,
        num_sequences,
    })
}
