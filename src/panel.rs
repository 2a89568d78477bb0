//! A device abstraction for LED matrix panels made of cascaded 8x8 modules.
//!
//! See [`Panel`] for usage and examples.

pub mod mapping;

mod driver;
mod raster;
mod text;

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::BinaryColor,
    prelude::{OriginDimensions, Pixel, Size},
};

pub use self::driver::{DriverHandle, MatrixDriver};
pub use self::mapping::{DeviceAddress, DeviceMapper, Orientation};
pub use self::text::{
    Glyph, GlyphColumn, GlyphSource, MAX_FONT_HEIGHT, MAX_GLYPH_WIDTH, PanelFont, TextRotation,
};
use crate::matrix_buffer::MAX_INTENSITY;
use crate::{Error, Result};

/// Spacing between characters when the configuration does not set one.
pub const DEFAULT_CHAR_SPACING: u16 = 1;

/// Compile-time description of a panel: module tiling, orientation and text defaults.
///
/// Build it in a `const` so a bad geometry fails the build:
///
/// ```rust
/// use matrix_panel::{Orientation, PanelConfig, PanelFont};
///
/// const CONFIG: PanelConfig = PanelConfig::new(4, 1)
///     .rotated()
///     .with_char_spacing(0)
///     .with_font(PanelFont::Font3x4);
///
/// assert_eq!(CONFIG.orientation(), Orientation::Rotated90);
/// assert_eq!(CONFIG.mapper().x_max(), 7);
/// assert_eq!(CONFIG.mapper().y_max(), 31);
/// ```
///
/// ```compile_fail
/// use matrix_panel::PanelConfig;
///
/// const CONFIG: PanelConfig = PanelConfig::new(0, 1); // zero modules
/// let _ = CONFIG;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    x_devices: u8,
    y_devices: u8,
    orientation: Orientation,
    char_spacing: u16,
    font: PanelFont,
}

impl PanelConfig {
    /// A panel of `x_devices` × `y_devices` modules in [`Orientation::Normal`].
    ///
    /// Panics (at compile time in a `const`) if either count is zero or the total
    /// exceeds [`mapping::MAX_DEVICES`].
    #[must_use]
    pub const fn new(x_devices: u8, y_devices: u8) -> Self {
        let _ = DeviceMapper::new(x_devices, y_devices, Orientation::Normal);
        Self {
            x_devices,
            y_devices,
            orientation: Orientation::Normal,
            char_spacing: DEFAULT_CHAR_SPACING,
            font: PanelFont::Font5x7,
        }
    }

    /// Same panel, viewed turned by 90°.
    #[must_use]
    pub const fn rotated(self) -> Self {
        self.with_orientation(Orientation::Rotated90)
    }

    /// Same panel with an explicit orientation.
    #[must_use]
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Columns left blank between two characters.
    #[must_use]
    pub const fn with_char_spacing(self, char_spacing: u16) -> Self {
        Self {
            char_spacing,
            ..self
        }
    }

    /// Built-in font used by [`Panel::draw_text`].
    #[must_use]
    pub const fn with_font(self, font: PanelFont) -> Self {
        Self { font, ..self }
    }

    /// Orientation of the panel.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Character spacing a new panel starts with.
    #[must_use]
    pub const fn char_spacing(&self) -> u16 {
        self.char_spacing
    }

    /// Built-in font a new panel starts with.
    #[must_use]
    pub const fn font(&self) -> PanelFont {
        self.font
    }

    /// Coordinate mapper for this geometry.
    #[must_use]
    pub const fn mapper(&self) -> DeviceMapper {
        DeviceMapper::new(self.x_devices, self.y_devices, self.orientation)
    }
}

/// A Cartesian pixel surface over a chain of 8x8 LED modules.
///
/// The origin `(0, 0)` is the lower left LED; `x` grows to the right up to
/// [`x_max`](Self::x_max) and `y` grows upward up to [`y_max`](Self::y_max).
/// Every drawing call returns `true` only if all of its points landed on the panel.
/// Points that fall off the panel are skipped, the rest of the shape is still drawn.
///
/// # Updates
///
/// While updates are enabled (the default), each top-level call flushes the driver once
/// when it finishes, so a rectangle costs one flush, not one per pixel. Call
/// [`suspend_updates`](Self::suspend_updates) (or use
/// [`with_updates_suspended`](Self::with_updates_suspended)) to compose a whole
/// frame and push it with a single flush.
///
/// # Driver ownership
///
/// [`Panel::new`] takes the driver by value and drops it with the panel (or returns it
/// from [`release`](Self::release)). [`Panel::borrowing`] draws through a driver the
/// caller keeps.
///
/// # Example
///
/// ```rust
/// use matrix_panel::{MatrixBuffer, Panel, PanelConfig};
///
/// let mut buffer = MatrixBuffer::<2>::new();
/// {
///     let mut panel = Panel::borrowing(&mut buffer, PanelConfig::new(2, 1))?;
///     panel.with_updates_suspended(|panel| {
///         panel.draw_line(0, 0, 15, 7, true);
///         panel.draw_circle(8, 4, 3, true);
///     });
///     assert!(panel.point(15, 7));
/// }
/// assert_eq!(buffer.flush_count(), 1);
/// # Ok::<(), matrix_panel::Error>(())
/// ```
pub struct Panel<'a, D, F = PanelFont> {
    driver: DriverHandle<'a, D>,
    mapper: DeviceMapper,
    font: F,
    char_spacing: u16,
    default_char_spacing: u16,
    update_enabled: bool,
    dirty: bool,
    batch_depth: u8,
}

impl<D: MatrixDriver> Panel<'static, D> {
    /// Create a panel that owns its driver.
    ///
    /// # Errors
    ///
    /// [`Error::DriverTooSmall`] if the driver has fewer modules than `config` covers.
    pub fn new(driver: D, config: PanelConfig) -> Result<Self> {
        Self::with_handle(DriverHandle::Owned(driver), config)
    }
}

impl<'a, D: MatrixDriver> Panel<'a, D> {
    /// Create a panel that draws through a driver owned by the caller.
    ///
    /// # Errors
    ///
    /// [`Error::DriverTooSmall`] if the driver has fewer modules than `config` covers.
    pub fn borrowing(driver: &'a mut D, config: PanelConfig) -> Result<Self> {
        Self::with_handle(DriverHandle::Borrowed(driver), config)
    }

    fn with_handle(driver: DriverHandle<'a, D>, config: PanelConfig) -> Result<Self> {
        let mapper = config.mapper();
        let required = mapper.device_count();
        let available = driver.device_count();
        if available < required {
            return Err(Error::DriverTooSmall {
                required,
                available,
            });
        }
        info!(
            "Panel: {}x{} modules, {}x{} pixels, owned driver: {}",
            mapper.x_devices(),
            mapper.y_devices(),
            mapper.width(),
            mapper.height(),
            driver.is_owned()
        );
        Ok(Self {
            driver,
            mapper,
            font: config.font(),
            char_spacing: config.char_spacing(),
            default_char_spacing: config.char_spacing(),
            update_enabled: true,
            dirty: false,
            batch_depth: 0,
        })
    }
}

impl<'a, D: MatrixDriver, F> Panel<'a, D, F> {
    /// Largest legal `x` coordinate.
    #[must_use]
    pub const fn x_max(&self) -> u16 {
        self.mapper.x_max()
    }

    /// Largest legal `y` coordinate.
    #[must_use]
    pub const fn y_max(&self) -> u16 {
        self.mapper.y_max()
    }

    /// Panel width in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.mapper.width()
    }

    /// Panel height in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.mapper.height()
    }

    /// The coordinate mapper chosen at construction.
    #[must_use]
    pub const fn mapper(&self) -> &DeviceMapper {
        &self.mapper
    }

    /// Initialize the driver and return the panel to its freshly built state: blank,
    /// updates enabled, configured character spacing.
    pub fn begin(&mut self) {
        debug!("Panel::begin");
        self.driver.begin();
        self.update_enabled = true;
        self.dirty = false;
        self.batch_depth = 0;
        self.char_spacing = self.default_char_spacing;
    }

    /// Turn the LED at `(x, y)` on or off.
    ///
    /// Returns `false`, without touching the driver, when the point is off the panel.
    /// Otherwise returns the driver's result.
    pub fn set_point(&mut self, x: u16, y: u16, state: bool) -> bool {
        let written = self.write_point(x, y, state);
        self.flush_if_due();
        written
    }

    /// State of the LED at `(x, y)`.
    ///
    /// An LED that is off and a point outside the panel both read as `false`.
    #[must_use]
    pub fn point(&self, x: u16, y: u16) -> bool {
        self.mapper
            .address_of(x, y)
            .is_some_and(|address| self.driver.pixel(address))
    }

    /// Enable or disable pushing changes to the hardware after each drawing call.
    ///
    /// Re-enabling flushes anything drawn while updates were off.
    pub fn set_update_enabled(&mut self, enabled: bool) {
        self.update_enabled = enabled;
        if self.batch_depth == 0 {
            self.driver.set_auto_update(enabled);
        }
        self.flush_if_due();
    }

    /// Stop flushing after each drawing call.
    pub fn suspend_updates(&mut self) {
        self.set_update_enabled(false);
    }

    /// Flush pending changes and go back to flushing after each drawing call.
    pub fn resume_updates(&mut self) {
        self.set_update_enabled(true);
    }

    /// True when drawing calls flush as they finish.
    #[must_use]
    pub const fn is_update_enabled(&self) -> bool {
        self.update_enabled
    }

    /// Run `draw` with updates suspended, then restore the previous setting.
    ///
    /// If updates were enabled before, everything `draw` changed goes out in one flush.
    pub fn with_updates_suspended<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.update_enabled;
        self.set_update_enabled(false);
        let result = draw(self);
        self.set_update_enabled(previous);
        result
    }

    /// Push all pending changes to the hardware, whether or not updates are enabled.
    pub fn flush(&mut self) {
        trace!("Panel::flush: dirty={}", self.dirty);
        self.driver.flush();
        self.dirty = false;
    }

    /// True when drawing has happened since the last flush.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Turn every LED of the panel off.
    pub fn clear(&mut self) {
        debug!("Panel::clear: {} modules", self.mapper.device_count());
        self.driver.clear_devices(0, self.mapper.device_count());
        self.dirty = true;
        self.flush_if_due();
    }

    /// Set the brightness, clamped to `0..=15`.
    pub fn set_intensity(&mut self, level: u8) {
        let level = level.min(MAX_INTENSITY);
        debug!("Panel::set_intensity: {}", level);
        self.driver.set_intensity(level);
    }

    /// The driver the panel draws through.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the driver. Changes made here bypass the panel's update tracking.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the panel, giving back the driver if the panel owned it.
    #[must_use]
    pub fn release(self) -> Option<D> {
        self.driver.into_owned()
    }

    // Runs `draw` as one unit: the driver's auto-update is held off until the outermost
    // unit ends, which then flushes once if updates are enabled.
    fn batch<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R {
        if self.batch_depth == 0 {
            self.driver.set_auto_update(false);
        }
        self.batch_depth = self.batch_depth.saturating_add(1);
        let result = draw(self);
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.driver.set_auto_update(self.update_enabled);
            self.flush_if_due();
        }
        result
    }

    // Signed entry point for the rasterizers; negative coordinates are off the panel.
    fn plot(&mut self, x: i32, y: i32, state: bool) -> bool {
        match (u16::try_from(x), u16::try_from(y)) {
            (Ok(x), Ok(y)) => self.write_point(x, y, state),
            _ => false,
        }
    }

    fn write_point(&mut self, x: u16, y: u16, state: bool) -> bool {
        let Some(address) = self.mapper.address_of(x, y) else {
            return false;
        };
        self.dirty = true;
        self.driver.set_pixel(address, state)
    }

    fn flush_if_due(&mut self) {
        if self.update_enabled && self.dirty && self.batch_depth == 0 {
            self.flush();
        }
    }
}

impl<D: MatrixDriver, F> OriginDimensions for Panel<'_, D, F> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

/// embedded-graphics coordinates have `y` growing downward; the panel flips them so
/// `Point::zero()` is the top left LED.
impl<D: MatrixDriver, F> DrawTarget for Panel<'_, D, F> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let y_max = i32::from(self.y_max());
        self.batch(|panel| {
            for Pixel(point, color) in pixels {
                // Far above the panel the flip overflows; such pixels are off the panel.
                if let Some(y) = y_max.checked_sub(point.y) {
                    panel.plot(point.x, y, color.is_on());
                }
            }
        });
        Ok(())
    }
}
