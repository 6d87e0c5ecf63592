// Panel abstraction over the SSD1306, plus off-screen text rendering

mod font;
mod oled;
mod render;

pub use font::{FALLBACK_FONT, TextFont};
pub use oled::OledPanel;
pub use render::{DISPLAY_HEIGHT, DISPLAY_WIDTH, LINE_PADDING, LineLayout, MAX_FONT_PX, Renderer};

use crate::models::Frame;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("cannot open I2C bus {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("display init failed: {0}")]
    Init(String),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("display flush failed: {0}")]
    Flush(String),
}

/// A monochrome panel that shows whole frames.
pub trait Panel {
    /// Render `frame` off-screen and replace the visible buffer in one flush.
    fn show(&mut self, frame: &Frame, renderer: &Renderer) -> Result<(), PanelError>;

    fn blank(&mut self) -> Result<(), PanelError>;
}

/// Owns the panel for the life of the process and blanks it when dropped.
pub struct BlankOnDrop<P: Panel> {
    panel: P,
}

impl<P: Panel> BlankOnDrop<P> {
    pub fn new(panel: P) -> Self {
        Self { panel }
    }
}

impl<P: Panel> Deref for BlankOnDrop<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.panel
    }
}

impl<P: Panel> DerefMut for BlankOnDrop<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}

impl<P: Panel> Drop for BlankOnDrop<P> {
    fn drop(&mut self) {
        match self.panel.blank() {
            Ok(()) => tracing::info!("Display cleared"),
            Err(e) => tracing::warn!(
                error = %e,
                operation = "blank",
                "failed to clear display on exit"
            ),
        }
    }
}
