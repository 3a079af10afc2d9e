//! Trace channel configuration

use serde::{Deserialize, Serialize};

use crate::waveform::TraceKind;

/// ARGB color with CSS-hex parse/format, used for trace, grid, and
/// background paint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceColor {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl TraceColor {
    /// Opaque color from RGB components.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 255,
            red,
            green,
            blue,
        }
    }

    /// Packed ARGB for the pixel buffer.
    pub fn to_argb_u32(&self) -> u32 {
        u32::from_be_bytes([self.alpha, self.red, self.green, self.blue])
    }

    /// Unpack from the pixel buffer representation.
    pub fn from_argb_u32(value: u32) -> Self {
        let [alpha, red, green, blue] = value.to_be_bytes();
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Convert to CSS hex color (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub fn to_css_hex(&self) -> String {
        if self.alpha == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }

    /// Parse a CSS hex color. Accepts `#rrggbb` and `#rrggbbaa`.
    pub fn from_css_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            6 => Some(Self {
                alpha: 255,
                red: byte(0..2)?,
                green: byte(2..4)?,
                blue: byte(4..6)?,
            }),
            8 => Some(Self {
                alpha: byte(6..8)?,
                red: byte(0..2)?,
                green: byte(2..4)?,
                blue: byte(4..6)?,
            }),
            _ => None,
        }
    }
}

/// Immutable per-channel rendering configuration.
///
/// One of these exists per monitor channel; the renderer never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceChannel {
    pub kind: TraceKind,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Cursor advance per frame, in pixels
    pub sweep_speed: f64,
    /// Width of the erased slice painted ahead of the cursor, in pixels
    pub erase_gap: u32,
    /// Reference grid rule spacing, in pixels
    pub grid_spacing: u32,
    pub trace_color: TraceColor,
    pub grid_color: TraceColor,
    pub background: TraceColor,
    /// Amplitude mapped to the bottom edge of the surface
    pub amp_min: f64,
    /// Amplitude mapped to the top edge of the surface
    pub amp_max: f64,
}

impl TraceChannel {
    /// Reference configuration for a channel kind: canvas geometry, sweep
    /// speed, and the amplitude band the waveform occupies.
    pub fn for_kind(kind: TraceKind) -> Self {
        let base = Self {
            kind,
            width: 1200,
            height: 150,
            sweep_speed: 2.0,
            erase_gap: 14,
            grid_spacing: 25,
            trace_color: TraceColor::rgb(0x22, 0xdd, 0x7a),
            grid_color: TraceColor::rgb(0x17, 0x30, 0x24),
            background: TraceColor::rgb(0x07, 0x0c, 0x0a),
            amp_min: -0.6,
            amp_max: 1.8,
        };
        match kind {
            TraceKind::Cardiac => base,
            TraceKind::Pleth => Self {
                width: 580,
                height: 120,
                trace_color: TraceColor::rgb(0x33, 0xbb, 0xff),
                amp_min: -0.3,
                amp_max: 1.3,
                ..base
            },
            TraceKind::Arterial => Self {
                width: 580,
                height: 120,
                trace_color: TraceColor::rgb(0xff, 0x55, 0x55),
                amp_min: 40.0,
                amp_max: 110.0,
                ..base
            },
            TraceKind::Capno => Self {
                width: 1200,
                height: 120,
                sweep_speed: 1.0,
                trace_color: TraceColor::rgb(0xff, 0xd2, 0x4a),
                amp_min: -4.0,
                amp_max: 50.0,
                ..base
            },
        }
    }

    /// Map an amplitude into the surface's vertical pixel range, clamped to
    /// the configured band. Larger amplitudes draw higher on screen.
    pub fn amplitude_to_y(&self, amplitude: f64) -> i32 {
        if self.height == 0 {
            return 0;
        }
        let span = self.amp_max - self.amp_min;
        let norm = if span.abs() < f64::EPSILON {
            0.5
        } else {
            ((amplitude - self.amp_min) / span).clamp(0.0, 1.0)
        };
        ((1.0 - norm) * (self.height - 1) as f64).round() as i32
    }
}

impl Default for TraceChannel {
    fn default() -> Self {
        Self::for_kind(TraceKind::Cardiac)
    }
}
