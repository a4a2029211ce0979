use clap::Parser;
use log::{info, warn};
use polars::prelude::*;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tf_pwm_rs::config::GenerateConfig;
use tf_pwm_rs::error::PwmError;
use tf_pwm_rs::generator::{generate, PwmRequest};
use tf_pwm_rs::logo::{encode_png, ClassicLogoRenderer, LogoRenderer};
use tf_pwm_rs::types::AlphabetPolicy;

#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("{0}")]
    Pwm(#[from] PwmError),
}

#[derive(Parser)]
#[command(
    name = "pwm-generator",
    about = "Builds a position weight matrix and a sequence logo from aligned FASTA sequences",
    long_about = "Reads aligned FASTA sequences (all of the same length), computes the percentage \
                  of A, T, G and C at every position, prints the matrix as a tab-separated table \
                  ready to copy, and optionally draws a sequence logo.",
    version,
    after_help = "Example usage:\n    \
                  pwm-generator sites.fasta --logo logo.png\n    \
                  cat sites.fasta | pwm-generator - --csv pwm.csv --strict",
    color = clap::ColorChoice::Always
)]
#[derive(Debug)]
struct Args {
    /// Path to the FASTA file, or `-` to read standard input
    /// Every sequence must have the same length
    #[arg(value_name = "FASTA_FILE")]
    input: String,

    /// Write the sequence logo to this PNG file
    #[arg(long, value_name = "PNG")]
    logo: Option<PathBuf>,

    /// Also write the matrix as CSV (position, A, T, G, C)
    #[arg(long, value_name = "CSV")]
    csv: Option<PathBuf>,

    /// TOML configuration file (alphabet policy, logo layout)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Reject sequences containing characters other than A, T, G, C
    #[arg(long)]
    strict: bool,

    /// Skip logo rendering
    #[arg(long)]
    no_logo: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn read_input(input: &str) -> Result<String, GeneratorError> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn create_parent_dir(path: &Path) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Handles one invocation; an empty submission is a warning, not an error
fn run(args: &Args) -> Result<(), GeneratorError> {
    let mut config = GenerateConfig::load(args.config.as_deref())?;
    if args.strict {
        config.alphabet = AlphabetPolicy::Strict;
    }
    config.render_logo = config.render_logo && !args.no_logo && args.logo.is_some();

    let request = PwmRequest::new(read_input(&args.input)?);
    let renderer = ClassicLogoRenderer::new(config.logo.clone());

    let report = match generate(&request, &config, Some(&renderer as &dyn LogoRenderer)) {
        Ok(report) => report,
        Err(PwmError::NoSequences) => {
            warn!("You forgot the FASTA sequences :)");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", report.table);

    if let (Some(path), Some(logo)) = (&args.logo, &report.logo) {
        create_parent_dir(path)?;
        fs::write(path, encode_png(logo)?)?;
        info!("logo written to {}", path.display());
    }

    if let Some(path) = &args.csv {
        create_parent_dir(path)?;
        let mut df = report.pwm.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
        info!("matrix written to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<(), GeneratorError> {
    let args = Args::parse();
    setup_logging(args.verbose);
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/logo.png");
        create_parent_dir(&path).unwrap();
        assert!(dir.path().join("out/nested").is_dir());

        // bare file names have no parent to create
        create_parent_dir(Path::new("logo.png")).unwrap();
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.fasta");
        fs::write(&path, ">a\nACGT\n").unwrap();
        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), ">a\nACGT\n");
    }

    fn write_fasta(dir: &Path, name: &str, text: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_run_empty_input_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fasta(dir.path(), "empty.fasta", ">only_header\n");
        let csv = dir.path().join("pwm.csv");
        let args = Args::try_parse_from([
            "pwm-generator",
            input.as_str(),
            "--csv",
            csv.to_str().unwrap(),
        ])
        .unwrap();

        assert!(run(&args).is_ok());
        // nothing computed, nothing written
        assert!(!csv.exists());
    }

    #[test]
    fn test_run_rejects_mismatched_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fasta(dir.path(), "mismatch.fasta", ">a\nTGACTCAT\n>b\nTGACTCA\n");
        let args = Args::try_parse_from(["pwm-generator", input.as_str()]).unwrap();

        assert!(matches!(
            run(&args),
            Err(GeneratorError::Pwm(PwmError::LengthMismatch {
                index: 1,
                expected: 8,
                found: 7
            }))
        ));
    }

    #[test]
    fn test_run_strict_rejects_ambiguity_codes() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fasta(dir.path(), "iupac.fasta", ">a\nACGT\n>b\nACRT\n");

        let args = Args::try_parse_from(["pwm-generator", input.as_str()]).unwrap();
        assert!(run(&args).is_ok());

        let args = Args::try_parse_from(["pwm-generator", input.as_str(), "--strict"]).unwrap();
        assert!(matches!(
            run(&args),
            Err(GeneratorError::Pwm(PwmError::InvalidSequence { .. }))
        ));
    }

    #[test]
    fn test_run_writes_csv_and_logo() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fasta(
            dir.path(),
            "sites.fasta",
            ">a\nATCG\n>b\nATCG\n>c\nATCG\n>d\nATGG\n",
        );
        let csv = dir.path().join("out/pwm.csv");
        let logo = dir.path().join("out/logo.png");
        let args = Args::try_parse_from([
            "pwm-generator",
            input.as_str(),
            "--csv",
            csv.to_str().unwrap(),
            "--logo",
            logo.to_str().unwrap(),
        ])
        .unwrap();

        run(&args).unwrap();

        let df = LazyCsvReader::new(&csv)
            .with_has_header(true)
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(df.shape(), (4, 5));
        let c = df.column("C").unwrap().f64().unwrap();
        assert_eq!(c.get(2), Some(75.0));

        assert!(fs::read(&logo).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["pwm-generator", "-", "--strict", "-vv"]).unwrap();
        assert_eq!(args.input, "-");
        assert!(args.strict);
        assert_eq!(args.verbose, 2);
        assert!(args.logo.is_none());
    }
}
