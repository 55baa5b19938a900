//! Color space conversion utilities
//!
//! Converts 8-bit RGB pixels into the other two color spaces the statistics
//! engine reports on, keeping every channel on the same 0-255 integer scale:
//! - HSV with hue rescaled from degrees onto 0-255
//! - CIE Lab (D65) quantized the usual 8-bit way: `L * 255 / 100`, `a + 128`,
//!   `b + 128`
//!
//! Quantization loses information, so converting back is not expected to
//! reproduce the source color.

use palette::{FromColor, Hsv, Lab, Srgb};
use serde::{Deserialize, Serialize};

use crate::constants::bins::{CHANNEL_MAX, HUE_DEGREES, LAB_AB_OFFSET, LAB_L_MAX};

/// Color spaces reported by the region statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    Rgb,
    Hsv,
    Lab,
}

impl ColorSpace {
    /// Short channel labels in storage order
    pub fn channel_names(&self) -> [&'static str; 3] {
        match self {
            ColorSpace::Rgb => ["R", "G", "B"],
            ColorSpace::Hsv => ["H", "S", "V"],
            ColorSpace::Lab => ["L", "a", "b"],
        }
    }
}

/// Which optional color spaces to compute in addition to RGB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSpaceSelection {
    pub hsv: bool,
    pub lab: bool,
}

impl ColorSpaceSelection {
    pub fn rgb_only() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self { hsv: true, lab: true }
    }
}

/// Converts 8-bit RGB into quantized HSV and Lab triples
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

#[inline]
fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, f32::from(CHANNEL_MAX)) as u8
}

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    fn srgb(rgb: [u8; 3]) -> Srgb {
        Srgb::new(rgb[0], rgb[1], rgb[2]).into_format()
    }

    /// Convert RGB (0-255) to Lab color space (D65)
    pub fn rgb_to_lab(&self, rgb: [u8; 3]) -> Lab {
        Lab::from_color(Self::srgb(rgb))
    }

    /// Convert RGB to HSV with all three channels on a 0-255 scale
    pub fn rgb_to_hsv8(&self, rgb: [u8; 3]) -> [u8; 3] {
        let hsv: Hsv = Hsv::from_color(Self::srgb(rgb));
        let max = f32::from(CHANNEL_MAX);
        [
            quantize(hsv.hue.into_positive_degrees() * max / HUE_DEGREES),
            quantize(hsv.saturation * max),
            quantize(hsv.value * max),
        ]
    }

    /// Convert RGB to 8-bit quantized Lab
    pub fn rgb_to_lab8(&self, rgb: [u8; 3]) -> [u8; 3] {
        let lab = self.rgb_to_lab(rgb);
        [
            quantize(lab.l * f32::from(CHANNEL_MAX) / LAB_L_MAX),
            quantize(lab.a + LAB_AB_OFFSET),
            quantize(lab.b + LAB_AB_OFFSET),
        ]
    }

    /// Convert RGB into `space`, identity for RGB
    pub fn convert(&self, space: ColorSpace, rgb: [u8; 3]) -> [u8; 3] {
        match space {
            ColorSpace::Rgb => rgb,
            ColorSpace::Hsv => self.rgb_to_hsv8(rgb),
            ColorSpace::Lab => self.rgb_to_lab8(rgb),
        }
    }

    /// Hexadecimal color string (e.g., "#FF0000")
    pub fn rgb_to_hex(&self, rgb: [u8; 3]) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
    }
}
