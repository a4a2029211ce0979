use crate::error::{PwmError, Result};
use crate::types::FastaRecord;
use log::debug;
use polars::prelude::*;
use std::fs;

/// Splits FASTA text into records.
///
/// Header lines start with `>`; every other non-empty line is trimmed and appended to the
/// current record until the next header or the end of the text. Lines that appear before the
/// first header still form a record (with an empty label). Records without any sequence
/// data are dropped. No alphabet or length validation happens here.
///
/// # Arguments
/// * `text` - Raw FASTA content, possibly holding several records
///
/// # Returns
/// * `Vec<FastaRecord>` - The records in input order, empty for empty input
pub fn parse_fasta_records(text: &str) -> Vec<FastaRecord> {
    let mut records = Vec::new();

    let mut current_label = String::new();
    let mut current_sequence = String::new();

    for line in text.lines() {
        let line = line.trim();

        if let Some(label) = line.strip_prefix('>') {
            if !current_sequence.is_empty() {
                records.push(FastaRecord {
                    label: std::mem::take(&mut current_label),
                    sequence: std::mem::take(&mut current_sequence),
                });
            }
            current_label = label.trim().to_string();
        } else if !line.is_empty() {
            current_sequence.push_str(line);
        }
    }

    if !current_sequence.is_empty() {
        records.push(FastaRecord {
            label: current_label,
            sequence: current_sequence,
        });
    }

    debug!("parsed {} FASTA records", records.len());
    records
}

/// Splits FASTA text into its sequences, headers stripped.
///
/// ```
/// use tf_pwm_rs::fasta::parse_fasta;
///
/// assert_eq!(parse_fasta(">s1\nATCG\n>s2\nATGG"), vec!["ATCG", "ATGG"]);
/// ```
pub fn parse_fasta(text: &str) -> Vec<String> {
    parse_fasta_records(text)
        .into_iter()
        .map(|record| record.sequence)
        .collect()
}

/// Uppercases every sequence so lowercase input counts like uppercase
pub fn normalize_sequences(sequences: Vec<String>) -> Vec<String> {
    sequences
        .into_iter()
        .map(|seq| seq.to_uppercase())
        .collect()
}

/// The unparsed line list of a submission, as handed to logo renderers
pub fn raw_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Reads sequences from a FASTA format file and converts them into a Polars DataFrame.
///
/// # Arguments
/// * `filename` - Path to the FASTA file to read
///
/// # Returns
/// * `Result<DataFrame>` - A DataFrame with two columns:
///   - "label": The sequence identifiers (without '>' prefix)
///   - "sequence": The corresponding sequences in uppercase
///
/// # Errors
/// * Returns `PwmError::InvalidFileFormat` if no sequences are found
/// * Returns `PwmError::DataError` if DataFrame creation fails
/// * Returns `PwmError::Io` for file reading issues
pub fn read_fasta(filename: &str) -> Result<DataFrame> {
    let text = fs::read_to_string(filename)?;
    let records = parse_fasta_records(&text);

    if records.is_empty() {
        return Err(PwmError::InvalidFileFormat("No sequences found".into()));
    }

    let (labels, sequences): (Vec<String>, Vec<String>) = records
        .into_iter()
        .map(|record| (record.label, record.sequence.to_uppercase()))
        .unzip();

    let df = DataFrame::new(vec![
        Column::new("label".into(), labels),
        Column::new("sequence".into(), sequences),
    ])?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_without_sequence_is_dropped() {
        let records = parse_fasta_records(">empty\n>full\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "full");
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(parse_fasta(">a\r\nAC\r\nGT\r\n"), vec!["ACGT"]);
    }
}
