use derive_more::{Display, Error};

/// Errors raised while assembling a [`Panel`](crate::panel::Panel).
///
/// Drawing itself never fails with an `Error`: points outside the panel are reported
/// through the `bool` each drawing call returns.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The driver chain holds fewer modules than the panel geometry needs.
    #[display("driver holds {available} modules but the panel needs {required}")]
    DriverTooSmall {
        /// Modules the panel geometry covers.
        required: u16,
        /// Modules the driver reports.
        available: u16,
    },
    /// The font is taller than a glyph column can hold (32 rows).
    #[display("font is {height} rows tall, at most 32 are supported")]
    FontTooTall {
        /// Height reported by the font.
        height: u16,
    },
}

/// Crate-wide result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
