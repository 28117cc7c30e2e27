pub mod cache;
pub mod calendar;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod git;
pub mod grass;
pub mod model;
pub mod readme;
pub mod svg;
pub mod tui;

pub use color::{map_intensity_to_color, BaseColor, ColorMapper, Normalization, Oklab, Rgb, ZeroPolicy};
pub use error::{GrassError, Result};
