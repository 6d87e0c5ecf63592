// Scalable font with built-in bitmap fallback

use ab_glyph::{Font, FontVec, GlyphId, InvalidFont, PxScale, ScaleFont, point};
use embedded_graphics::mono_font::iso_8859_1::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use std::path::Path;
use thiserror::Error;

/// Built-in font used when no scalable font can be loaded. ISO-8859-1 so "°" renders.
pub const FALLBACK_FONT: &MonoFont<'static> = &FONT_5X8;

/// Anti-aliased coverage at or above this lights the pixel.
const COVERAGE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
enum FontLoadError {
    #[error("read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse font: {0}")]
    Parse(#[from] InvalidFont),
}

pub enum TextFont {
    Outline {
        font: FontVec,
        scale: PxScale,
        size_px: u32,
    },
    Bitmap(&'static MonoFont<'static>),
}

impl TextFont {
    /// Loads `path` at `size_px`; any failure logs a warning and yields the bitmap fallback.
    pub fn load(path: Option<&Path>, size_px: u32) -> Self {
        let Some(path) = path else {
            return Self::bitmap();
        };
        match load_outline(path) {
            Ok(font) => {
                let scale = em_scale(&font, size_px);
                tracing::debug!(path = %path.display(), size_px, scale = scale.y, "Loaded font");
                TextFont::Outline {
                    font,
                    scale,
                    size_px,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "font not usable, falling back to built-in font"
                );
                Self::bitmap()
            }
        }
    }

    pub fn bitmap() -> Self {
        TextFont::Bitmap(FALLBACK_FONT)
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, TextFont::Bitmap(_))
    }

    /// Nominal line height in pixels, used for layout.
    pub fn pixel_height(&self) -> u32 {
        match self {
            TextFont::Outline { size_px, .. } => *size_px,
            TextFont::Bitmap(font) => font.character_size.height,
        }
    }

    /// Draws `text` with its top edge at `top_left`.
    pub fn draw<D>(&self, text: &str, top_left: Point, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            TextFont::Bitmap(font) => {
                let style = MonoTextStyle::new(*font, BinaryColor::On);
                Text::with_baseline(text, top_left, style, Baseline::Top).draw(target)?;
                Ok(())
            }
            TextFont::Outline { font, scale, .. } => {
                target.draw_iter(outline_pixels(font, *scale, text, top_left))
            }
        }
    }
}

/// `size_px` is the em size; ab_glyph's `PxScale` is ascent-to-descent height.
fn em_scale(font: &FontVec, size_px: u32) -> PxScale {
    let em = size_px as f32;
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(em * font.height_unscaled() / upem),
        _ => PxScale::from(em),
    }
}

fn load_outline(path: &Path) -> Result<FontVec, FontLoadError> {
    let bytes = std::fs::read(path)?;
    Ok(FontVec::try_from_vec(bytes)?)
}

fn outline_pixels(
    font: &FontVec,
    scale: PxScale,
    text: &str,
    top_left: Point,
) -> Vec<Pixel<BinaryColor>> {
    let scaled = font.as_scaled(scale);
    let mut caret = point(top_left.x as f32, top_left.y as f32 + scaled.ascent());
    let mut previous: Option<GlyphId> = None;
    let mut pixels = Vec::new();

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                if coverage >= COVERAGE_THRESHOLD {
                    let p = Point::new(bounds.min.x as i32 + x as i32, bounds.min.y as i32 + y as i32);
                    pixels.push(Pixel(p, BinaryColor::On));
                }
            });
        }
    }
    pixels
}
