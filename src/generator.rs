//! One "Generate PWM" request, from submitted text to table and logo

use crate::config::GenerateConfig;
use crate::error::{PwmError, Result};
use crate::fasta::{normalize_sequences, parse_fasta, raw_lines};
use crate::format::format_pwm;
use crate::logo::LogoRenderer;
use crate::pwm::{calculate_pwm, Pwm};
use image::RgbaImage;
use log::{debug, info};

/// Text submitted by the user
#[derive(Debug, Clone, Default)]
pub struct PwmRequest {
    pub fasta_text: String,
}

impl PwmRequest {
    pub fn new(fasta_text: impl Into<String>) -> Self {
        Self {
            fasta_text: fasta_text.into(),
        }
    }
}

/// Everything shown back to the user
#[derive(Debug, Clone)]
pub struct PwmReport {
    /// Parsed, uppercased sequences
    pub sequences: Vec<String>,
    pub pwm: Pwm,
    /// Tab-separated table, one bracketed line per base
    pub table: String,
    pub logo: Option<RgbaImage>,
}

/// Runs parse, uppercase, compute and format for one submission.
///
/// Blank text or text without any sequence stops before the calculator with
/// `PwmError::NoSequences`. When `renderer` is given and `config.render_logo` is set, the
/// raw submission lines are rendered as well; renderer errors are returned unchanged.
///
/// # Errors
/// * `PwmError::NoSequences` - Nothing to compute
/// * `PwmError::LengthMismatch` / `PwmError::InvalidSequence` - Rejected batch
/// * Any error raised by the renderer
pub fn generate(
    request: &PwmRequest,
    config: &GenerateConfig,
    renderer: Option<&dyn LogoRenderer>,
) -> Result<PwmReport> {
    if request.fasta_text.trim().is_empty() {
        return Err(PwmError::NoSequences);
    }

    let sequences = normalize_sequences(parse_fasta(&request.fasta_text));
    if sequences.is_empty() {
        return Err(PwmError::NoSequences);
    }
    debug!("request holds {} sequences", sequences.len());

    let pwm = calculate_pwm(&sequences, config.alphabet)?;
    let table = format_pwm(&pwm);

    let logo = match renderer {
        Some(renderer) if config.render_logo => {
            Some(renderer.render(&raw_lines(&request.fasta_text))?)
        }
        _ => None,
    };

    info!(
        "generated PWM: {} sequences x {} positions{}",
        pwm.num_sequences(),
        pwm.len(),
        if logo.is_some() { " with logo" } else { "" }
    );

    Ok(PwmReport {
        sequences,
        pwm,
        table,
        logo,
    })
}
