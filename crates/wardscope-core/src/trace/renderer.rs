//! Scrolling trace renderer
//!
//! Paints one channel as a continuously scrolling strip chart. Per frame it
//! erases a narrow slice at the cursor, redraws the reference grid inside
//! that slice (the erase wipes grid lines in its path), samples the waveform
//! at `t` and `t - ε`, draws the connecting segment, and advances the cursor
//! modulo the surface width. Only the slice is repainted, so the older trace
//! persists behind the moving cursor.

use tracing::debug;

use super::channel::TraceChannel;
use super::surface::DrawSurface;
use crate::vitals::VitalsSnapshot;
use crate::waveform::Tuning;

/// Lookback used to get the previous sample point, so consecutive frames
/// draw connected segments instead of isolated dots.
pub const SAMPLE_EPSILON_SECS: f64 = 0.01;

/// Per-channel scrolling renderer. Owns the wrapping draw cursor; the
/// surface and the vitals snapshot are supplied per frame.
pub struct TraceRenderer {
    channel: TraceChannel,
    tuning: Tuning,
    cursor: f64,
    frames: u64,
}

impl TraceRenderer {
    pub fn new(channel: TraceChannel) -> Self {
        Self::with_tuning(channel, Tuning::default())
    }

    /// Renderer with explicit texture tuning (tests use [`Tuning::NONE`]).
    pub fn with_tuning(channel: TraceChannel, tuning: Tuning) -> Self {
        Self {
            channel,
            tuning,
            cursor: 0.0,
            frames: 0,
        }
    }

    pub fn channel(&self) -> &TraceChannel {
        &self.channel
    }

    /// Current horizontal cursor position in pixels.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Frames rendered since construction.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Render one frame at simulated time `t` seconds.
    ///
    /// A surface that is not ready (zero-sized, not yet attached) makes this
    /// a no-op: no paint, no cursor advance, no error. The next frame
    /// retries.
    pub fn render_frame(&mut self, t: f64, vitals: &VitalsSnapshot, surface: &mut dyn DrawSurface) {
        if !surface.is_ready() {
            debug!(kind = ?self.channel.kind, "surface not ready, skipping frame");
            return;
        }

        let width = surface.width();
        let height = surface.height();
        let x = self.cursor as i32;
        let gap = self.channel.erase_gap.max(self.channel.sweep_speed.ceil() as u32 + 1);

        // Erase slice ahead of the cursor. Wrap the part that runs off the
        // right edge back to column zero.
        let overflow = (x + gap as i32) - width as i32;
        surface.fill_rect(x, 0, gap, height, self.channel.background);
        if overflow > 0 {
            surface.fill_rect(0, 0, overflow as u32, height, self.channel.background);
        }

        self.redraw_grid_slice(surface, x, gap, overflow);

        // Sample the waveform now and just before now, and connect the two.
        let kind = self.channel.kind;
        let a_prev = kind.sample_with(t - SAMPLE_EPSILON_SECS, vitals, &self.tuning);
        let a_now = kind.sample_with(t, vitals, &self.tuning);
        let y0 = self.channel.amplitude_to_y(a_prev);
        let y1 = self.channel.amplitude_to_y(a_now);
        let x1 = x + self.channel.sweep_speed.round() as i32;
        if x1 < width as i32 {
            surface.draw_line(x, y0, x1, y1, self.channel.trace_color);
        } else {
            // Segment crosses the wrap seam; draw the tail at the left edge.
            surface.draw_line(x, y0, width as i32 - 1, y1, self.channel.trace_color);
            surface.draw_line(0, y1, x1 - width as i32, y1, self.channel.trace_color);
        }

        self.cursor = (self.cursor + self.channel.sweep_speed).rem_euclid(width as f64);
        self.frames += 1;
    }

    /// Repaint grid rules inside the erased slice.
    fn redraw_grid_slice(&self, surface: &mut dyn DrawSurface, x: i32, gap: u32, overflow: i32) {
        let spacing = self.channel.grid_spacing;
        if spacing == 0 {
            return;
        }
        let height = surface.height() as i32;

        let mut vertical_rules = |start: i32, end: i32| {
            let mut gx = (start / spacing as i32) * spacing as i32;
            if gx < start {
                gx += spacing as i32;
            }
            while gx < end {
                surface.draw_line(gx, 0, gx, height - 1, self.channel.grid_color);
                gx += spacing as i32;
            }
        };
        vertical_rules(x, x + gap as i32);
        if overflow > 0 {
            vertical_rules(0, overflow);
        }

        let mut gy = 0;
        while gy < height {
            surface.fill_rect(x, gy, gap, 1, self.channel.grid_color);
            if overflow > 0 {
                surface.fill_rect(0, gy, overflow as u32, 1, self.channel.grid_color);
            }
            gy += spacing as i32;
        }
    }
}
