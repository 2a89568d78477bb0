//! The low-level module driver a [`Panel`](super::Panel) draws through.

use core::ops::{Deref, DerefMut};

use super::mapping::DeviceAddress;

/// Capability set of a low-level LED module driver (a MAX72xx chain or a stand-in).
///
/// The panel only ever talks to the hardware through this trait; SPI wiring, register
/// layout and font storage stay with the implementor. All calls are synchronous. A
/// driver that cannot report hardware failures returns `true` from
/// [`set_pixel`](Self::set_pixel) for any address it owns.
///
/// [`MatrixBuffer`](crate::MatrixBuffer) is the in-crate implementation.
pub trait MatrixDriver {
    /// Initialize the chain: wake the modules, clear them, and turn automatic updates on.
    fn begin(&mut self);

    /// Number of modules in the chain.
    fn device_count(&self) -> u16;

    /// Switch one LED on or off. Returns `false` if the address is not in the chain.
    fn set_pixel(&mut self, address: DeviceAddress, state: bool) -> bool;

    /// Current state of one LED; `false` for addresses outside the chain.
    fn pixel(&self, address: DeviceAddress) -> bool;

    /// Enable or suspend pushing changes to the hardware as they happen.
    fn set_auto_update(&mut self, enabled: bool);

    /// Push all pending changes to the hardware now, whatever the auto-update setting.
    fn flush(&mut self);

    /// Set the brightness register (`0..=15` on MAX72xx parts).
    fn set_intensity(&mut self, level: u8);

    /// Turn off every LED of `count` modules starting at `first_device`.
    fn clear_devices(&mut self, first_device: u16, count: u16);
}

/// How a [`Panel`](super::Panel) holds its driver, fixed when the panel is built.
///
/// An `Owned` driver is dropped with the panel (or handed back by
/// [`Panel::release`](super::Panel::release)). A `Borrowed` driver outlives the panel and
/// is never released by it.
#[derive(Debug)]
pub enum DriverHandle<'a, D> {
    /// The panel owns the driver.
    Owned(D),
    /// The driver belongs to the caller.
    Borrowed(&'a mut D),
}

impl<D> DriverHandle<'_, D> {
    /// True when the panel owns the driver.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Give back an owned driver; `None` for a borrowed one.
    #[must_use]
    pub fn into_owned(self) -> Option<D> {
        match self {
            Self::Owned(driver) => Some(driver),
            Self::Borrowed(_) => None,
        }
    }
}

impl<D> Deref for DriverHandle<'_, D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(driver) => driver,
            Self::Borrowed(driver) => driver,
        }
    }
}

impl<D> DerefMut for DriverHandle<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Owned(driver) => driver,
            Self::Borrowed(driver) => driver,
        }
    }
}
