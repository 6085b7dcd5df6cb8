//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The renderer keeps the last frame it wrote. Each draw compares row by row
//! and rewrites only the span between the first and last changed glyph of
//! every changed row; a size change forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame. Returns the number of rows written.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let rows = match &self.last {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_changed_rows(prev, fb, &mut self.buf)?
            }
            _ => encode_full(fb, &mut self.buf)?,
        };
        if rows > 0 {
            self.flush_buf()?;
        }

        match &mut self.last {
            Some(prev) => prev.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(rows)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..fb.height() {
        encode_span(out, fb.row(y), 0, y, &mut pen)?;
    }
    finish(out)?;
    Ok(fb.height() as usize)
}

/// Encode only the rows that differ between `prev` and `next`.
///
/// Both frames must have the same size.
pub fn encode_changed_rows(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let mut pen = None;
    let mut rows = 0;
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        let Some(first) = old.iter().zip(new).position(|(a, b)| a != b) else {
            continue;
        };
        // `first` exists, so a last differing index exists too.
        let last = old
            .iter()
            .zip(new)
            .rposition(|(a, b)| a != b)
            .unwrap_or(first);
        encode_span(out, &new[first..=last], first as u16, y, &mut pen)?;
        rows += 1;
    }
    if rows > 0 {
        finish(out)?;
    }
    Ok(rows)
}

fn encode_span(
    out: &mut Vec<u8>,
    glyphs: &[Glyph],
    x: u16,
    y: u16,
    pen: &mut Option<Style>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for glyph in glyphs {
        if *pen != Some(glyph.style) {
            apply_style(out, glyph.style)?;
            *pen = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn term_color(rgb: Rgb) -> TermColor {
    TermColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
