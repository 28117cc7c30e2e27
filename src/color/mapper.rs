use super::{oklab_to_rgb, BaseColor, Oklab, Rgb};
use crate::error::{GrassError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of the base chroma kept at zero intensity.
pub const CHROMA_FLOOR: f64 = 0.3;
const CHROMA_SPAN: f64 = 0.7;
/// Fraction of the base lightness kept at zero intensity.
pub const LIGHTNESS_FLOOR: f64 = 0.4;
const LIGHTNESS_SPAN: f64 = 0.6;

/// GitHub's empty-cell gray.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xeb, 0xed, 0xf0);

/// What a day without activity looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    /// Scale the base color down to its floor like any other intensity.
    #[default]
    Floor,
    /// Intensity 0 is replaced by a fixed background color.
    Background(Rgb),
}

/// How a raw commit count becomes an intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Relative to the busiest day of the displayed period.
    #[default]
    Relative,
    /// Saturates at a fixed number of commits per day.
    Cap(u32),
}

impl Normalization {
    pub fn intensity(&self, count: u32, period_max: u32) -> f64 {
        let denom = match *self {
            Normalization::Relative => period_max,
            Normalization::Cap(cap) => cap,
        };
        if count == 0 {
            0.0
        } else if denom == 0 {
            1.0
        } else {
            (count as f64 / denom as f64).min(1.0)
        }
    }
}

/// Turns (base color, intensity) into a display color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorMapper {
    zero_policy: ZeroPolicy,
}

impl ColorMapper {
    pub fn new(zero_policy: ZeroPolicy) -> Self {
        Self { zero_policy }
    }

    pub fn with_background(background: Rgb) -> Self {
        Self::new(ZeroPolicy::Background(background))
    }

    pub fn zero_policy(&self) -> ZeroPolicy {
        self.zero_policy
    }

    /// Map `intensity` (clamped to [0, 1]) onto `base`.
    pub fn map(&self, base: &BaseColor, intensity: f64) -> Result<Rgb> {
        let intensity = checked_intensity(intensity)?;
        let lab = base.to_oklab()?;

        if let ZeroPolicy::Background(background) = self.zero_policy {
            if intensity == 0.0 {
                return Ok(background);
            }
        }

        let scaled = Self::scale(lab, intensity);
        oklab_to_rgb(scaled.l, scaled.a, scaled.b)
    }

    /// Scale chroma by `0.3 + 0.7i` and lightness by `0.4 + 0.6i`. Hue is untouched.
    pub fn scale(base: Oklab, intensity: f64) -> Oklab {
        let chroma = CHROMA_FLOOR + CHROMA_SPAN * intensity;
        let lightness = LIGHTNESS_FLOOR + LIGHTNESS_SPAN * intensity;
        Oklab {
            l: base.l * lightness,
            a: base.a * chroma,
            b: base.b * chroma,
        }
    }
}

/// [`ColorMapper::map`] with the default floor policy.
pub fn map_intensity_to_color(base: &BaseColor, intensity: f64) -> Result<Rgb> {
    ColorMapper::default().map(base, intensity)
}

fn checked_intensity(intensity: f64) -> Result<f64> {
    if !intensity.is_finite() {
        return Err(GrassError::invalid_color(format!("non-finite intensity {intensity}")));
    }
    Ok(intensity.clamp(0.0, 1.0))
}
