// Line layout and off-screen composition of a frame

use super::TextFont;
use crate::models::{Frame, LINE_COUNT};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
/// Vertical gap between consecutive lines.
pub const LINE_PADDING: u32 = 2;
/// Largest font height for which all lines fit the panel.
pub const MAX_FONT_PX: u32 =
    (DISPLAY_HEIGHT - (LINE_COUNT as u32 - 1) * LINE_PADDING) / LINE_COUNT as u32;

/// Top-left origin of each text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLayout {
    line_height: u32,
    origins: [Point; LINE_COUNT],
}

impl LineLayout {
    pub fn for_font_height(font_px: u32) -> Self {
        let line_height = font_px + LINE_PADDING;
        let origins = std::array::from_fn(|i| Point::new(0, (i as u32 * line_height) as i32));
        Self {
            line_height,
            origins,
        }
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    pub fn origins(&self) -> &[Point; LINE_COUNT] {
        &self.origins
    }
}

pub struct Renderer {
    font: TextFont,
    layout: LineLayout,
}

impl Renderer {
    pub fn new(font: TextFont) -> Self {
        let layout = LineLayout::for_font_height(font.pixel_height());
        Self { font, layout }
    }

    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    pub fn font(&self) -> &TextFont {
        &self.font
    }

    /// Clears `target` and draws every line. Nothing reaches the glass until the caller flushes.
    pub fn render<D>(&self, frame: &Frame, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::Off)?;
        for (line, origin) in frame.lines().iter().zip(self.layout.origins()) {
            self.font.draw(line, *origin, target)?;
        }
        Ok(())
    }
}
