//! Character frame the game view draws into.

use crossterm::style::Color;

/// One styled terminal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
}

impl Glyph {
    pub fn new(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bold: false,
        }
    }

    pub fn bold(ch: char, fg: Color) -> Self {
        Self { ch, fg, bold: true }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bold: false,
        }
    }
}

/// Row-major grid of glyphs; out-of-range writes are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Color) {
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::new(ch, fg));
            cx += 1;
        }
    }

    pub fn put_str_bold(&mut self, x: u16, y: u16, text: &str, fg: Color) {
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::bold(ch, fg));
            cx += 1;
        }
    }

    /// The characters of one row, for tests and logging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_the_frame_are_clipped() {
        let mut frame = Frame::new(4, 2);
        frame.put(10, 10, Glyph::new('x', Color::Red));
        frame.put_str(2, 0, "long text", Color::Reset);
        assert_eq!(frame.row_text(0), "  lo");
    }

    #[test]
    fn row_text_reflects_writes() {
        let mut frame = Frame::new(5, 1);
        frame.put_str(0, 0, "ab", Color::Reset);
        frame.put(4, 0, Glyph::new('z', Color::Reset));
        assert_eq!(frame.row_text(0), "ab  z");
    }
}
