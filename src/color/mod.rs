//! Perceptual color handling for grass cells.
//!
//! Base colors are converted into OKLAB, scaled by activity intensity and
//! converted back into 8-bit sRGB for display.

pub mod mapper;
pub mod oklab;
pub mod parse;

pub use mapper::{map_intensity_to_color, ColorMapper, Normalization, ZeroPolicy, DEFAULT_BACKGROUND};
pub use oklab::{hsl_to_rgb, linear_to_srgb, oklab_to_rgb, rgb_to_oklab, srgb_to_linear};
pub use parse::BaseColor;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(12,200,3)`.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn to_oklab(&self) -> Oklab {
        rgb_to_oklab(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = crate::error::GrassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse::parse_rgb(&value)
    }
}

/// A color in the OKLAB space. Components are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklab {
    #[serde(rename = "L")]
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// Colorfulness, `sqrt(a² + b²)`.
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    pub fn to_rgb(&self) -> crate::error::Result<Rgb> {
        oklab_to_rgb(self.l, self.a, self.b)
    }
}
