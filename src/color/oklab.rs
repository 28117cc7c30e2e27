use super::{Oklab, Rgb};
use crate::error::{GrassError, Result};

/// Remove the sRGB transfer function from an encoded channel in [0, 1].
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Apply the sRGB transfer function to a linear-light channel.
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn rgb_to_oklab(r: u8, g: u8, b: u8) -> Oklab {
    let r = srgb_to_linear(r as f64 / 255.0);
    let g = srgb_to_linear(g as f64 / 255.0);
    let b = srgb_to_linear(b as f64 / 255.0);

    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

/// Bound on the nonlinear cone responses so cubing them and mixing the
/// result stays finite. Anything this far out saturates its channels anyway.
const CONE_LIMIT: f64 = 1e100;

/// Convert OKLAB back to 8-bit sRGB.
///
/// Out-of-gamut input clamps per channel. Non-finite components are rejected
/// with [`GrassError::InvalidColorInput`].
pub fn oklab_to_rgb(l: f64, a: f64, b: f64) -> Result<Rgb> {
    if !(l.is_finite() && a.is_finite() && b.is_finite()) {
        return Err(GrassError::invalid_color(format!(
            "non-finite OKLAB component ({l}, {a}, {b})"
        )));
    }

    let l_ = (l + 0.3963377774 * a + 0.2158037573 * b).clamp(-CONE_LIMIT, CONE_LIMIT);
    let m_ = (l - 0.1055613458 * a - 0.0638541728 * b).clamp(-CONE_LIMIT, CONE_LIMIT);
    let s_ = (l - 0.0894841775 * a - 1.2914855480 * b).clamp(-CONE_LIMIT, CONE_LIMIT);

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
    let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
    let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

    Ok(Rgb {
        r: quantize(linear_to_srgb(r)),
        g: quantize(linear_to_srgb(g)),
        b: quantize(linear_to_srgb(b)),
    })
}

/// Scale an encoded channel to 8 bits, rounding half up and clamping.
fn quantize(c: f64) -> u8 {
    (c * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// HSL to sRGB. `h` in degrees (wrapped), `s` and `l` in [0, 1].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Result<Rgb> {
    if !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return Err(GrassError::invalid_color(format!(
            "non-finite HSL component ({h}, {s}, {l})"
        )));
    }
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Ok(Rgb {
        r: quantize(r + m),
        g: quantize(g + m),
        b: quantize(b + m),
    })
}
