//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::palette::{self, BORDER, EMPTY_DOT, FIELD_BG, HINT, LABEL, OVERLAY, VALUE};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    help: &'static [(&'static str, &'static str)],
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2)
    }
}

/// Top-left corner of the board frame.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            help: &[],
        }
    }

    /// Key bindings listed under the side panel.
    pub fn with_help(mut self, help: &'static [(&'static str, &'static str)]) -> Self {
        self.help = help;
        self
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    /// Outer size of the board frame, borders included.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and fully repainted.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        self.draw_border(fb, origin.x, origin.y, frame_w, frame_h);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.color_at(x as usize, y as usize) {
                    Some(color) => self.draw_cell(fb, origin, x, y, color),
                    None => self.fill_cell(fb, origin, x, y, '·', EMPTY_DOT),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.paused {
            self.draw_overlay(fb, origin, "PAUSED");
        } else if snap.ended.is_some_and(|reason| reason.is_loss()) {
            self.draw_overlay(fb, origin, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        fb.put(x, y, '┌', BORDER);
        fb.put(x + w - 1, y, '┐', BORDER);
        fb.put(x, y + h - 1, '└', BORDER);
        fb.put(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', BORDER);
            fb.put(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', BORDER);
            fb.put(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, color: Color) {
        self.fill_cell(fb, origin, x, y, '█', palette::style_for(color));
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, ch: char, style: Style) {
        let px = origin.x + 1 + x * self.cell_w;
        let py = origin.y + 1 + y;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let mut y = origin.y;
        fb.put_str(panel_x, y, "SCORE", LABEL);
        fb.put_u32(panel_x, y + 1, snap.score, VALUE);
        y += 3;

        fb.put_str(panel_x, y, "LEVEL", LABEL);
        draw_level(fb, panel_x, y + 1, snap.level_tenths);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y += 1;
        let preview_bg = Style::new(FIELD_BG, FIELD_BG);
        let preview_w = MAX_PIECE_SIZE as u16 * self.cell_w;
        fb.fill_rect(panel_x, y, preview_w, MAX_PIECE_SIZE as u16, ' ', preview_bg);
        if let Some(next) = snap.next {
            let style = palette::style_for(next.color);
            for (r, c) in next.grid.occupied() {
                let px = panel_x + c as u16 * self.cell_w;
                fb.fill_rect(px, y + r as u16, self.cell_w, 1, '█', style);
            }
        }
        y += MAX_PIECE_SIZE as u16 + 1;

        for (keys, action) in self.help {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, keys, VALUE);
            fb.put_str(panel_x + 7, y, action, HINT);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, origin: Origin, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let text_w = text.chars().count() as u16;
        let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, origin.y + frame_h / 2, text, OVERLAY);
    }
}

/// Level multiplier as `x1.3`.
fn draw_level(fb: &mut FrameBuffer, x: u16, y: u16, level_tenths: u32) {
    let whole = level_tenths / 10;
    let digits = if whole >= 10 { 2 } else { 1 };
    fb.put(x, y, 'x', VALUE);
    fb.put_u32(x + 1, y, whole, VALUE);
    fb.put(x + 1 + digits, y, '.', VALUE);
    fb.put_u32(x + 2 + digits, y, level_tenths % 10, VALUE);
}
