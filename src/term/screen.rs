//! Terminal setup and frame flushing.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::frame::Frame;

/// Owns the raw-mode terminal. Frames are always drawn in full; at 60 Hz on
/// a board this small, diffing is not worth carrying.
pub struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current_fg: Option<Color> = None;
        let mut current_bold = false;

        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width() {
                let glyph = frame.get(x, y).unwrap_or_default();
                if glyph.bold != current_bold {
                    self.stdout.queue(SetAttribute(if glyph.bold {
                        Attribute::Bold
                    } else {
                        Attribute::Reset
                    }))?;
                    current_bold = glyph.bold;
                    // Attribute::Reset also drops the color.
                    if !glyph.bold {
                        current_fg = None;
                    }
                }
                if current_fg != Some(glyph.fg) {
                    self.stdout.queue(SetForegroundColor(glyph.fg))?;
                    current_fg = Some(glyph.fg);
                }
                self.stdout.queue(Print(glyph.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
