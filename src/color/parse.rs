use super::{hsl_to_rgb, Oklab, Rgb};
use crate::error::{GrassError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Saturation and lightness used when a member is identified by a hue angle.
pub const HUE_SATURATION: f64 = 0.7;
pub const HUE_LIGHTNESS: f64 = 0.5;

/// The color identity of one tracked member.
///
/// Accepted textual forms:
/// * `#rgb` / `#rrggbb`
/// * `rgb(r, g, b)`
/// * `oklab(L a b)` (commas or whitespace)
/// * `hue(h)` with `h` in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BaseColor {
    Rgb(Rgb),
    Oklab(Oklab),
    Hue(f64),
}

impl BaseColor {
    /// Resolve to OKLAB, rejecting non-finite components.
    pub fn to_oklab(&self) -> Result<Oklab> {
        match *self {
            BaseColor::Rgb(rgb) => Ok(rgb.to_oklab()),
            BaseColor::Oklab(lab) => {
                if lab.is_finite() {
                    Ok(lab)
                } else {
                    Err(GrassError::invalid_color(format!(
                        "non-finite OKLAB base ({}, {}, {})",
                        lab.l, lab.a, lab.b
                    )))
                }
            }
            BaseColor::Hue(h) => Ok(hsl_to_rgb(h, HUE_SATURATION, HUE_LIGHTNESS)?.to_oklab()),
        }
    }

    /// The base color itself in sRGB, used for previews.
    pub fn to_rgb(&self) -> Result<Rgb> {
        match *self {
            BaseColor::Rgb(rgb) => Ok(rgb),
            BaseColor::Oklab(lab) => lab.to_rgb(),
            BaseColor::Hue(h) => hsl_to_rgb(h, HUE_SATURATION, HUE_LIGHTNESS),
        }
    }
}

impl From<Rgb> for BaseColor {
    fn from(rgb: Rgb) -> Self {
        BaseColor::Rgb(rgb)
    }
}

impl From<Oklab> for BaseColor {
    fn from(lab: Oklab) -> Self {
        BaseColor::Oklab(lab)
    }
}

impl FromStr for BaseColor {
    type Err = GrassError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(args) = function_args(s, "oklab") {
            let [l, a, b] = parse_components::<3>(args, s)?;
            let lab = Oklab::new(l, a, b);
            if !lab.is_finite() {
                return Err(GrassError::invalid_color(format!("non-finite component in '{s}'")));
            }
            return Ok(BaseColor::Oklab(lab));
        }
        if let Some(args) = function_args(s, "hue") {
            let [h] = parse_components::<1>(args, s)?;
            if !h.is_finite() {
                return Err(GrassError::invalid_color(format!("non-finite hue in '{s}'")));
            }
            return Ok(BaseColor::Hue(h));
        }
        parse_rgb(s).map(BaseColor::Rgb)
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseColor::Rgb(rgb) => write!(f, "{}", rgb.to_hex()),
            BaseColor::Oklab(lab) => write!(f, "oklab({} {} {})", lab.l, lab.a, lab.b),
            BaseColor::Hue(h) => write!(f, "hue({h})"),
        }
    }
}

impl TryFrom<String> for BaseColor {
    type Error = GrassError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<BaseColor> for String {
    fn from(color: BaseColor) -> Self {
        color.to_string()
    }
}

/// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
pub fn parse_rgb(s: &str) -> Result<Rgb> {
    let s = s.trim();
    if let Some(args) = function_args(s, "rgb") {
        let [r, g, b] = parse_components::<3>(args, s)?;
        let channel = |v: f64| -> Result<u8> {
            if v.fract() == 0.0 && (0.0..=255.0).contains(&v) {
                Ok(v as u8)
            } else {
                Err(GrassError::invalid_color(format!("channel {v} out of range in '{s}'")))
            }
        };
        return Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?));
    }

    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| GrassError::invalid_color(format!("unrecognized color '{s}'")))?;
    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(GrassError::invalid_color(format!("invalid hex digits in '{s}'")));
    }

    // All bytes are ASCII hex digits at this point, so slicing and parsing can't fail.
    let byte = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).unwrap_or(0);
    match hex.len() {
        3 => Ok(Rgb::new(byte(0, 1) * 17, byte(1, 1) * 17, byte(2, 1) * 17)),
        6 => Ok(Rgb::new(byte(0, 2), byte(2, 2), byte(4, 2))),
        _ => Err(GrassError::invalid_color(format!("invalid hex length in '{s}'"))),
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..].trim_start().strip_prefix('(')?.strip_suffix(')')
}

fn parse_components<const N: usize>(args: &str, original: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != N {
        return Err(GrassError::invalid_color(format!(
            "expected {N} components in '{original}', found {}",
            parts.len()
        )));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| GrassError::invalid_color(format!("invalid number '{part}' in '{original}'")))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_rgb("#00FF00").unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(parse_rgb("#22a75f").unwrap(), Rgb::new(0x22, 0xa7, 0x5f));
        assert_eq!(parse_rgb("#fa0").unwrap(), Rgb::new(255, 170, 0));
        assert_eq!(parse_rgb(" rgb(1, 2, 3) ").unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["", "00ff00", "#00ff0", "#gg0000", "#00ff00ff", "rgb(1,2)", "rgb(1,2,300)", "rgb(1.5,2,3)"] {
            assert!(
                matches!(parse_rgb(bad), Err(GrassError::InvalidColorInput(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn parses_oklab_and_hue() {
        assert_eq!(
            "oklab(0.8 -0.4 0.2)".parse::<BaseColor>().unwrap(),
            BaseColor::Oklab(Oklab::new(0.8, -0.4, 0.2))
        );
        assert_eq!(
            "OKLAB(0.8, -0.4, 0.2)".parse::<BaseColor>().unwrap(),
            BaseColor::Oklab(Oklab::new(0.8, -0.4, 0.2))
        );
        assert_eq!("hue(210)".parse::<BaseColor>().unwrap(), BaseColor::Hue(210.0));
        assert!("oklab(NaN 0 0)".parse::<BaseColor>().is_err());
        assert!("oklab(0.5 0)".parse::<BaseColor>().is_err());
        assert!("hue(inf)".parse::<BaseColor>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for text in ["#00ff00", "oklab(0.8 -0.4 0.2)", "hue(42.5)"] {
            let color: BaseColor = text.parse().unwrap();
            assert_eq!(color.to_string(), text);
        }
    }

    #[test]
    fn serde_uses_textual_form() {
        let color: BaseColor = serde_json::from_str("\"#123456\"").unwrap();
        assert_eq!(color, BaseColor::Rgb(Rgb::new(0x12, 0x34, 0x56)));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#123456\"");
        assert!(serde_json::from_str::<BaseColor>("\"#12345\"").is_err());
    }

    #[test]
    fn non_finite_oklab_base_is_rejected() {
        let base = BaseColor::Oklab(Oklab::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(base.to_oklab(), Err(GrassError::InvalidColorInput(_))));
    }
}
