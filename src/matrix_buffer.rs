//! An in-memory [`MatrixDriver`] laid out like the MAX72xx digit registers.
//!
//! See [`MatrixBuffer`] for details.

use crate::panel::{
    DeviceAddress, MatrixDriver,
    mapping::{COL_SIZE, ROW_SIZE},
};

/// Highest value of the MAX72xx intensity register.
pub const MAX_INTENSITY: u8 = 15;

// Intensity after `begin`, half of the register range.
const DEFAULT_INTENSITY: u8 = MAX_INTENSITY / 2;

/// Frame store for a chain of `DEVICES` 8x8 modules.
///
/// Each module keeps eight row bytes, bit `n` of a row byte being module column `n`,
/// which is exactly what a MAX72xx digit register holds. A transport that owns the SPI
/// bus reads the bytes back with [`row_bits`](Self::row_bits) after each
/// [`flush`](MatrixDriver::flush); on the host the buffer simply records what would
/// have been sent.
///
/// # Example
///
/// ```rust
/// use matrix_panel::{DeviceAddress, MatrixBuffer, MatrixDriver};
///
/// let mut buffer = MatrixBuffer::<2>::new();
/// assert!(buffer.set_pixel(DeviceAddress::new(3, 9), true));
/// assert_eq!(buffer.row_bits(1, 3), Some(0b0000_0010));
/// assert!(!buffer.set_pixel(DeviceAddress::new(3, 16), true)); // past the last module
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixBuffer<const DEVICES: usize> {
    rows: [[u8; ROW_SIZE as usize]; DEVICES],
    auto_update: bool,
    dirty: bool,
    flush_count: u32,
    intensity: u8,
}

impl<const DEVICES: usize> MatrixBuffer<DEVICES> {
    /// Create a blank buffer with automatic updates on.
    #[must_use]
    pub const fn new() -> Self {
        assert!(DEVICES > 0, "DEVICES must be positive");
        Self {
            rows: [[0; ROW_SIZE as usize]; DEVICES],
            auto_update: true,
            dirty: false,
            flush_count: 0,
            intensity: DEFAULT_INTENSITY,
        }
    }

    /// Row byte of one module, `None` if `device` or `row` is out of range.
    #[must_use]
    pub fn row_bits(&self, device: usize, row: usize) -> Option<u8> {
        self.rows.get(device)?.get(row).copied()
    }

    /// True when changes are waiting for a flush.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How many times the buffer has been flushed.
    #[must_use]
    pub const fn flush_count(&self) -> u32 {
        self.flush_count
    }

    /// Last automatic-update setting received from the panel.
    #[must_use]
    pub const fn auto_update(&self) -> bool {
        self.auto_update
    }

    /// Current intensity register value.
    #[must_use]
    pub const fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Number of LEDs currently on.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|bits| bits.count_ones() as usize)
            .sum()
    }

    // Row byte and bit mask for an address, if the address is in the chain.
    fn locate(&self, address: DeviceAddress) -> Option<(usize, usize, u8)> {
        let device = usize::from(address.device());
        let row = usize::from(address.row);
        if device >= DEVICES || row >= usize::from(ROW_SIZE) {
            return None;
        }
        let mask = 1u8 << (address.column % COL_SIZE);
        Some((device, row, mask))
    }
}

impl<const DEVICES: usize> Default for MatrixBuffer<DEVICES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEVICES: usize> MatrixDriver for MatrixBuffer<DEVICES> {
    fn begin(&mut self) {
        self.rows = [[0; ROW_SIZE as usize]; DEVICES];
        self.auto_update = true;
        self.intensity = DEFAULT_INTENSITY;
        self.dirty = true;
        self.flush();
    }

    fn device_count(&self) -> u16 {
        u16::try_from(DEVICES).unwrap_or(u16::MAX)
    }

    fn set_pixel(&mut self, address: DeviceAddress, state: bool) -> bool {
        let Some((device, row, mask)) = self.locate(address) else {
            return false;
        };
        let Some(bits) = self.rows.get_mut(device).and_then(|rows| rows.get_mut(row)) else {
            return false;
        };
        if state {
            *bits |= mask;
        } else {
            *bits &= !mask;
        }
        self.dirty = true;
        true
    }

    fn pixel(&self, address: DeviceAddress) -> bool {
        self.locate(address)
            .and_then(|(device, row, mask)| Some(self.row_bits(device, row)? & mask != 0))
            .unwrap_or(false)
    }

    fn set_auto_update(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }

    fn flush(&mut self) {
        trace!("MatrixBuffer::flush: dirty={}", self.dirty);
        self.flush_count = self.flush_count.wrapping_add(1);
        self.dirty = false;
    }

    fn set_intensity(&mut self, level: u8) {
        self.intensity = level.min(MAX_INTENSITY);
    }

    fn clear_devices(&mut self, first_device: u16, count: u16) {
        let first = usize::from(first_device);
        for device_rows in self.rows.iter_mut().skip(first).take(usize::from(count)) {
            *device_rows = [0; ROW_SIZE as usize];
        }
        self.dirty = true;
    }
}
