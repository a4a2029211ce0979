//! Sequence logo rendering.
//!
//! Rendering sits behind [`LogoRenderer`] so callers only rely on "ordered sequence lines in,
//! raster image out". [`ClassicLogoRenderer`] is the built-in backend.

use crate::error::{PwmError, Result};
use crate::fasta::parse_fasta_records;
use crate::pwm::{calculate_pwm, Pwm};
use crate::types::{AlphabetPolicy, Base};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use log::debug;
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Maximum information content of a DNA column, in bits
const MAX_BITS: f64 = 2.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// WebLogo "classic" nucleotide colours
static CLASSIC_COLORS: phf::Map<char, [u8; 3]> = phf_map! {
    'A' => [0, 128, 0],
    'C' => [0, 0, 255],
    'G' => [255, 165, 0],
    'T' => [255, 0, 0],
};

/// Capability to turn a submission's sequence lines into an image
pub trait LogoRenderer {
    /// Renders the raw, unparsed lines of a submission
    fn render(&self, lines: &[String]) -> Result<RgbaImage>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Monochrome,
}

impl ColorScheme {
    pub fn color(self, base: Base) -> Rgba<u8> {
        match self {
            ColorScheme::Classic => {
                let [r, g, b] = CLASSIC_COLORS
                    .get(&base.as_char())
                    .copied()
                    .unwrap_or([0, 0, 0]);
                Rgba([r, g, b, 255])
            }
            ColorScheme::Monochrome => Rgba([0, 0, 0, 255]),
        }
    }
}

/// Layout of the rendered logo, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoOptions {
    /// Width of one position's stack
    pub stack_width: u32,
    /// Height of a fully conserved (2 bit) stack
    pub stack_height: u32,
    /// Blank border around the plot
    pub margin: u32,
    pub color_scheme: ColorScheme,
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self {
            stack_width: 24,
            stack_height: 120,
            margin: 8,
            color_scheme: ColorScheme::Classic,
        }
    }
}

/// Draws one stacked column per position, scaled by information content
#[derive(Debug, Clone, Default)]
pub struct ClassicLogoRenderer {
    options: LogoOptions,
}

impl ClassicLogoRenderer {
    pub fn new(options: LogoOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LogoOptions {
        &self.options
    }

    /// Image size for `columns` stacks, `None` if it does not fit in u32
    fn dimensions(&self, columns: usize) -> Option<(u32, u32)> {
        let opts = &self.options;
        let border = opts.margin.checked_mul(2)?;
        let plot_width = u32::try_from(columns)
            .ok()?
            .checked_mul(opts.stack_width)?;
        let width = border.checked_add(plot_width)?;
        let height = border.checked_add(opts.stack_height)?;
        Some((width, height))
    }

    fn draw(&self, pwm: &Pwm) -> Result<RgbaImage> {
        let opts = &self.options;
        let (width, height) = self.dimensions(pwm.len()).ok_or_else(|| {
            PwmError::render(format!(
                "logo of {} positions does not fit the configured layout",
                pwm.len()
            ))
        })?;
        let mut img = RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND);

        let baseline = opts.margin as f64 + opts.stack_height as f64;
        let scale = opts.stack_height as f64 / MAX_BITS;

        for column in 0..pwm.len() {
            let frequencies = column_frequencies(pwm, column);
            let bits = information_content(&frequencies);

            let mut stack: Vec<(Base, f64)> = frequencies.to_vec();
            stack.sort_by(|a, b| a.1.total_cmp(&b.1));

            let x0 = opts.margin + column as u32 * opts.stack_width;
            // leave a one pixel gutter between stacks
            let x1 = x0 + opts.stack_width.saturating_sub(1);

            let mut bottom = baseline;
            for (base, freq) in stack {
                let top = bottom - freq * bits * scale;
                fill_rect(
                    &mut img,
                    x0,
                    x1,
                    top.round() as u32,
                    bottom.round() as u32,
                    opts.color_scheme.color(base),
                );
                bottom = top;
            }
        }

        Ok(img)
    }
}

impl LogoRenderer for ClassicLogoRenderer {
    fn render(&self, lines: &[String]) -> Result<RgbaImage> {
        // wrapped records span several lines
        let sequences: Vec<String> = parse_fasta_records(&lines.join("\n"))
            .into_iter()
            .map(|record| record.sequence.to_uppercase())
            .collect();

        if sequences.is_empty() {
            return Err(PwmError::render("no sequence lines to draw"));
        }

        let pwm = calculate_pwm(&sequences, AlphabetPolicy::Tolerant)
            .map_err(|e| PwmError::render(format!("cannot draw these sequences: {}", e)))?;
        let img = self.draw(&pwm)?;
        debug!(
            "rendered logo of {} positions ({}x{} px)",
            pwm.len(),
            img.width(),
            img.height()
        );
        Ok(img)
    }
}

/// Base frequencies (0-1) at one column
fn column_frequencies(pwm: &Pwm, column: usize) -> [(Base, f64); 4] {
    Base::ROW_ORDER.map(|base| (base, pwm.value(base, column).unwrap_or(0.0) / 100.0))
}

/// Information content of a column in bits: 2 minus the Shannon entropy
pub fn information_content(frequencies: &[(Base, f64)]) -> f64 {
    let entropy: f64 = frequencies
        .iter()
        .filter(|(_, p)| *p > 0.0)
        .map(|(_, p)| -p * p.log2())
        .sum();
    (MAX_BITS - entropy).max(0.0)
}

fn fill_rect(img: &mut RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(img.width());
    let y1 = y1.min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Encodes a rendered logo as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_information_content_bounds() {
        let conserved = [(Base::A, 1.0), (Base::T, 0.0), (Base::G, 0.0), (Base::C, 0.0)];
        assert!((information_content(&conserved) - 2.0).abs() < 1e-12);

        let uniform = Base::ROW_ORDER.map(|b| (b, 0.25));
        assert!(information_content(&uniform).abs() < 1e-12);
    }

    #[test]
    fn test_oversized_layout_is_rejected() {
        let renderer = ClassicLogoRenderer::new(LogoOptions {
            stack_width: u32::MAX / 2,
            ..LogoOptions::default()
        });
        let lines = vec!["ACGT".to_string(), "ACGA".to_string()];
        assert!(matches!(renderer.render(&lines), Err(PwmError::Render(_))));

        let renderer = ClassicLogoRenderer::new(LogoOptions {
            margin: u32::MAX,
            ..LogoOptions::default()
        });
        assert!(matches!(renderer.render(&lines), Err(PwmError::Render(_))));
    }

    #[test]
    fn test_classic_colors_cover_all_bases() {
        for base in Base::ROW_ORDER {
            assert_eq!(ColorScheme::Classic.color(base)[3], 255);
        }
    }
}
