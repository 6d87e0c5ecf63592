// Shared test helpers: fixed metrics source, recording panel, in-memory framebuffer

#![allow(dead_code)]

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use oledstats::display::{DISPLAY_HEIGHT, DISPLAY_WIDTH, Panel, PanelError, Renderer};
use oledstats::metrics_repo::MetricsSource;
use oledstats::models::*;
use std::cell::RefCell;
use std::convert::Infallible;
use std::net::Ipv4Addr;
use std::rc::Rc;

pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        cpu_percent: 23.4,
        mem_used_mb: 512.0,
        mem_total_mb: 2048.0,
        disk_percent: 61.2,
        temperature: Ok(Celsius(45.0)),
        ip_address: Ok(Ipv4Addr::new(192, 168, 1, 10)),
    }
}

pub fn degraded_snapshot() -> Snapshot {
    Snapshot {
        temperature: Err(SentinelReason::NoFile),
        ip_address: Err(SentinelReason::NoAddress),
        ..sample_snapshot()
    }
}

/// Always returns the same snapshot and counts reads.
pub struct FixedSource {
    pub snapshot: Snapshot,
    pub reads: usize,
}

impl FixedSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot, reads: 0 }
    }
}

impl MetricsSource for FixedSource {
    fn snapshot(&mut self) -> Snapshot {
        self.reads += 1;
        self.snapshot.clone()
    }
}

#[derive(Default)]
pub struct PanelLog {
    pub shown: Vec<Frame>,
    pub show_attempts: usize,
    pub blanks: usize,
}

/// Renders into a framebuffer and records every call; optionally fails every `show`.
pub struct RecordingPanel {
    pub log: Rc<RefCell<PanelLog>>,
    pub screen: Framebuffer,
    pub fail_show: bool,
}

impl RecordingPanel {
    pub fn new() -> (Self, Rc<RefCell<PanelLog>>) {
        let log = Rc::new(RefCell::new(PanelLog::default()));
        let panel = Self {
            log: log.clone(),
            screen: Framebuffer::new(),
            fail_show: false,
        };
        (panel, log)
    }

    pub fn failing() -> (Self, Rc<RefCell<PanelLog>>) {
        let (mut panel, log) = Self::new();
        panel.fail_show = true;
        (panel, log)
    }
}

impl Panel for RecordingPanel {
    fn show(&mut self, frame: &Frame, renderer: &Renderer) -> Result<(), PanelError> {
        let mut log = self.log.borrow_mut();
        log.show_attempts += 1;
        if self.fail_show {
            return Err(PanelError::Flush("bus gone".into()));
        }
        let _ = renderer.render(frame, &mut self.screen);
        log.shown.push(frame.clone());
        Ok(())
    }

    fn blank(&mut self) -> Result<(), PanelError> {
        self.screen.fill(false);
        self.log.borrow_mut().blanks += 1;
        Ok(())
    }
}

/// 128x64 monochrome buffer.
pub struct Framebuffer {
    pixels: Vec<bool>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![false; (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize],
        }
    }

    pub fn fill(&mut self, on: bool) {
        self.pixels.iter_mut().for_each(|p| *p = on);
    }

    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        self.pixels[(y * DISPLAY_WIDTH + x) as usize]
    }

    pub fn lit_in_rows(&self, rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..DISPLAY_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_lit(x, y))
            .count()
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < DISPLAY_WIDTH && (p.y as u32) < DISPLAY_HEIGHT {
                self.pixels[(p.y as u32 * DISPLAY_WIDTH + p.x as u32) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}
