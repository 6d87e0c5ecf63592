// SSD1306 128x64 over Linux I2C, buffered so each frame is a single flush

use super::{Panel, PanelError, Renderer};
use crate::config;
use crate::models::Frame;
use linux_embedded_hal::I2cdev;
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

type Ssd1306Buffered =
    Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledPanel {
    display: Ssd1306Buffered,
}

impl OledPanel {
    /// Opens `/dev/i2c-<bus>`, initialises the controller and blanks the screen.
    pub fn open(config: &config::DisplayConfig) -> Result<Self, PanelError> {
        let path = config.device_path();
        tracing::info!(
            path = %path,
            address = %format!("{:#04x}", config.address),
            "Initializing OLED display"
        );

        let i2c = I2cdev::new(&path).map_err(|e| PanelError::Open {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, config.address);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        display
            .init()
            .map_err(|e| PanelError::Init(format!("{:?}", e)))?;
        display.clear_buffer();
        display
            .flush()
            .map_err(|e| PanelError::Flush(format!("{:?}", e)))?;

        tracing::info!("OLED display initialized");
        Ok(Self { display })
    }
}

impl Panel for OledPanel {
    fn show(&mut self, frame: &Frame, renderer: &Renderer) -> Result<(), PanelError> {
        renderer
            .render(frame, &mut self.display)
            .map_err(|e| PanelError::Draw(format!("{:?}", e)))?;
        self.display
            .flush()
            .map_err(|e| PanelError::Flush(format!("{:?}", e)))
    }

    fn blank(&mut self) -> Result<(), PanelError> {
        self.display.clear_buffer();
        self.display
            .flush()
            .map_err(|e| PanelError::Flush(format!("{:?}", e)))
    }
}
