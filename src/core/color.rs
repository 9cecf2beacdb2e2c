//! 8-bit RGBA colors, HSV conversion and the textual formats used by the
//! readouts and clipboard export.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::Color;
use serde::{Deserialize, Serialize};

/// Four 8-bit channels. Alpha is carried but ignored by every text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    #[inline]
    pub const fn from_hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// `0xRRGGBB` packing (alpha dropped).
    #[inline]
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_hsv(self) -> Hsv {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { delta / max };
        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        Hsv { h: h.rem_euclid(360.0), s, v: max }
    }

    #[allow(clippy::many_single_char_names)]
    pub fn from_hsv(hsv: Hsv) -> Self {
        let h = hsv.h.rem_euclid(360.0);
        let s = hsv.s.clamp(0.0, 1.0);
        let v = hsv.v.clamp(0.0, 1.0);

        let sector = (h / 60.0).floor();
        let f = h / 60.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::rgb(channel(r), channel(g), channel(b))
    }

    pub fn to_bevy(self) -> Color {
        Color::srgba_u8(self.r, self.g, self.b, self.a)
    }
}

#[inline]
fn channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = String;

    /// Accepts `#RRGGBB` or `RRGGBB`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected 6 hex digits, got '{s}'"));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgba::from_hex)
            .map_err(|e| format!("invalid hex color '{s}': {e}"))
    }
}

/// Clipboard export formats, in copy-button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// `#RRGGBB`
    Hex,
    /// `R, G, B`
    Rgb,
    /// `H.H, S.SS, V.VV`
    Hsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Hex, ExportFormat::Rgb, ExportFormat::Hsv];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Text placed on the clipboard.
    pub fn export(self, color: Rgba) -> String {
        match self {
            ExportFormat::Hex => color.to_string(),
            ExportFormat::Rgb => format!("{}, {}, {}", color.r, color.g, color.b),
            ExportFormat::Hsv => {
                let hsv = color.to_hsv();
                format!("{:.1}, {:.2}, {:.2}", hsv.h, hsv.s, hsv.v)
            }
        }
    }

    /// Fixed-width text shown next to the copy button.
    pub fn readout(self, color: Rgba) -> String {
        match self {
            ExportFormat::Hex => format!("HEX: {color}"),
            ExportFormat::Rgb => format!("RGB: {:03}, {:03}, {:03}", color.r, color.g, color.b),
            ExportFormat::Hsv => {
                let hsv = color.to_hsv();
                format!("HSV: {:05.1}°, {:04.2}, {:04.2}", hsv.h, hsv.s, hsv.v)
            }
        }
    }
}
