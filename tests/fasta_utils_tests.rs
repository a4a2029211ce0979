use tf_pwm_rs::fasta;

#[test]
fn test_parse_fasta() {
    let sequences = fasta::parse_fasta(">s1\nATCG\n>s2\nATGG");
    assert_eq!(sequences, vec!["ATCG", "ATGG"]);

    // multi-line records are concatenated
    let sequences = fasta::parse_fasta(">s1\nAT\nCG\n\n>s2\nAT\nGG\n");
    assert_eq!(sequences, vec!["ATCG", "ATGG"]);

    // empty input
    assert!(fasta::parse_fasta("").is_empty());
    assert!(fasta::parse_fasta(">only_header\n").is_empty());
}

#[test]
fn test_parse_fasta_leading_lines_without_header() {
    let records = fasta::parse_fasta_records("ACGT\n>s2\nTTTT");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].label, "");
    assert_eq!(records[0].sequence, "ACGT");
    assert_eq!(records[1].label, "s2");
}

#[test]
fn test_parse_keeps_case_and_alphabet() {
    // validation and case normalisation belong to the caller
    let sequences = fasta::parse_fasta(">s1\nacgN");
    assert_eq!(sequences, vec!["acgN"]);
    assert_eq!(fasta::normalize_sequences(sequences), vec!["ACGN"]);
}

#[test]
fn test_raw_lines_keep_headers() {
    let lines = fasta::raw_lines(">s1\nATCG\n>s2\nATGG");
    assert_eq!(lines, vec![">s1", "ATCG", ">s2", "ATGG"]);
}

#[test]
fn test_read_fasta() {
    let path = "tests/data/test1.fasta";
    let df = fasta::read_fasta(path).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 2);

    let sequences = df.column("sequence").unwrap().str().unwrap();
    assert_eq!(sequences.get(0), Some("TGACTCAT"));

    let labels = df.column("label").unwrap().str().unwrap();
    assert_eq!(labels.get(1), Some("site_2 chr1:4357733-4357742"));

    // test file does not exist
    let result = fasta::read_fasta("tests/data/nonexistent.fasta");
    assert!(result.is_err());
}

#[test]
fn test_read_fasta_without_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headers_only.fasta");
    std::fs::write(&path, ">a\n>b\n").unwrap();

    let result = fasta::read_fasta(path.to_str().unwrap());
    assert!(matches!(
        result,
        Err(tf_pwm_rs::error::PwmError::InvalidFileFormat(_))
    ));
}
