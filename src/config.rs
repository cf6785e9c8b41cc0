//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Width in pixels (corresponds to source outputs)
    pub width: u16,
    /// Height in pixels (corresponds to gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0, width > MAX_SOURCE_OUTPUTS, or width % 8 != 0
    /// - height == 0, height > MAX_GATE_OUTPUTS, or height % 8 != 0
    ///
    /// Both axes must be byte-aligned because the framebuffer packs 8
    /// pixels per byte and the partial-window command addresses bytes.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_SOURCE_OUTPUTS || width % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_GATE_OUTPUTS || height % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Calculate required frame buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }

    /// The 4 parameter bytes for the resolution setting command (0x61)
    ///
    /// Layout is [width MSB, width LSB, height MSB, height LSB].
    pub fn resolution_data(&self) -> [u8; 4] {
        [
            (self.width >> 8) as u8,
            (self.width & 0xFF) as u8,
            (self.height >> 8) as u8,
            (self.height & 0xFF) as u8,
        ]
    }
}

/// Display configuration
///
/// This struct holds all configurable register values for the UC8179
/// controller. Use `Builder` to create a Config. Defaults match the
/// 800x480 7.5" reference panel.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Booster soft-start settings (4 bytes for command 0x06)
    pub booster_soft_start: [u8; 4],
    /// Power rail settings (4 bytes for command 0x01)
    pub power_setting: [u8; 4],
    /// Panel setting byte (command 0x00)
    pub panel_setting: u8,
    /// Dual SPI mode byte (command 0x15)
    pub dual_spi: u8,
    /// TCON gate/source timing byte (command 0x60)
    pub tcon: u8,
    /// VCOM and data interval settings (2 bytes for command 0x50)
    pub vcom_data_interval: [u8; 2],
    /// Optional VCOM_DC voltage (command 0x82, skipped when None)
    pub vcm_dc: Option<u8>,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use uc8179::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(800, 480) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Booster soft-start settings (4 bytes for command 0x06)
    booster_soft_start: [u8; 4],
    /// Power rail settings (4 bytes for command 0x01)
    power_setting: [u8; 4],
    /// Panel setting byte (command 0x00)
    panel_setting: u8,
    /// Dual SPI mode byte (command 0x15)
    dual_spi: u8,
    /// TCON gate/source timing byte (command 0x60)
    tcon: u8,
    /// VCOM and data interval settings (2 bytes for command 0x50)
    vcom_data_interval: [u8; 2],
    /// Optional VCOM_DC voltage (command 0x82)
    vcm_dc: Option<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Reference booster ramp for the 800x480 panel
            booster_soft_start: [0x17, 0x17, 0x27, 0x17],
            // VDS/VDG internal, VDH/VDL +-15V, VGH/VGL +-20V
            power_setting: [0x07, 0x17, 0x3F, 0x3F],
            // LUT from OTP, black/white mode, scan up, shift right, booster on
            panel_setting: 0x1F,
            // Single data line
            dual_spi: 0x00,
            // Default gate/source non-overlap period
            tcon: 0x22,
            // Border floating, default data interval
            vcom_data_interval: [0x10, 0x07],
            // OTP VCOM by default
            vcm_dc: None,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set booster soft-start parameters
    pub fn booster_soft_start(mut self, values: [u8; 4]) -> Self {
        self.booster_soft_start = values;
        self
    }

    /// Set power rail parameters
    pub fn power_setting(mut self, values: [u8; 4]) -> Self {
        self.power_setting = values;
        self
    }

    /// Set the panel setting byte
    pub fn panel_setting(mut self, value: u8) -> Self {
        self.panel_setting = value;
        self
    }

    /// Set the dual SPI mode byte
    pub fn dual_spi(mut self, value: u8) -> Self {
        self.dual_spi = value;
        self
    }

    /// Set the TCON timing byte
    pub fn tcon(mut self, value: u8) -> Self {
        self.tcon = value;
        self
    }

    /// Set VCOM and data interval parameters
    pub fn vcom_data_interval(mut self, values: [u8; 2]) -> Self {
        self.vcom_data_interval = values;
        self
    }

    /// Set the VCOM_DC voltage
    ///
    /// When unset, the controller uses the VCOM value programmed in OTP.
    pub fn vcm_dc(mut self, value: u8) -> Self {
        self.vcm_dc = Some(value);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            booster_soft_start: self.booster_soft_start,
            power_setting: self.power_setting,
            panel_setting: self.panel_setting,
            dual_spi: self.dual_spi,
            tcon: self.tcon,
            vcom_data_interval: self.vcom_data_interval,
            vcm_dc: self.vcm_dc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reference_panel() {
        let dims = Dimensions::new(800, 480).unwrap();
        assert_eq!(dims.buffer_size(), 800 * 480 / 8);
        assert_eq!(dims.resolution_data(), [0x03, 0x20, 0x01, 0xE0]);
    }

    #[test]
    fn test_dimensions_width_not_byte_aligned() {
        assert!(matches!(
            Dimensions::new(801, 480),
            Err(BuilderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_dimensions_height_not_byte_aligned() {
        assert!(matches!(
            Dimensions::new(800, 481),
            Err(BuilderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_dimensions_too_large() {
        assert!(Dimensions::new(808, 480).is_err());
        assert!(Dimensions::new(800, 608).is_err());
    }

    #[test]
    fn test_dimensions_zero() {
        assert!(Dimensions::new(0, 480).is_err());
        assert!(Dimensions::new(800, 0).is_err());
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(800, 480).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.booster_soft_start, [0x17, 0x17, 0x27, 0x17]);
        assert_eq!(config.power_setting, [0x07, 0x17, 0x3F, 0x3F]);
        assert_eq!(config.panel_setting, 0x1F);
        assert_eq!(config.vcm_dc, None);
    }
}
