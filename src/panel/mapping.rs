//! Translation between Cartesian `(x, y)` pixels and driver `(row, column)` addresses.
//!
//! See [`DeviceMapper`] for the layout rules and examples.

/// Rows in one LED module.
pub const ROW_SIZE: u16 = 8;
/// Columns in one LED module.
pub const COL_SIZE: u16 = 8;
/// Longest module chain the mapper accepts (device indices are 8 bits wide on the driver side).
pub const MAX_DEVICES: u16 = 255;

/// How the panel is mounted relative to the way its modules were wired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Module rows run along the panel's `x` axis.
    #[default]
    Normal,
    /// The panel is turned 90°: module rows run along the panel's `y` axis.
    Rotated90,
}

/// A location in the cascaded module chain, as understood by the low-level driver.
///
/// `row` is in `0..8`. `column` spans the whole chain, `0..devices * 8`; module `n`
/// owns columns `n * 8..n * 8 + 8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress {
    /// Row within the module, `0..8`.
    pub row: u8,
    /// Column across the whole cascaded chain.
    pub column: u16,
}

impl DeviceAddress {
    /// Create an address from its row and chain column.
    #[must_use]
    pub const fn new(row: u8, column: u16) -> Self {
        Self { row, column }
    }

    /// Index of the module (position in the cascade) that owns this address.
    #[must_use]
    pub const fn device(&self) -> u16 {
        self.column / COL_SIZE
    }
}

/// Pure coordinate transform for a panel of `x_devices` × `y_devices` modules.
///
/// Modules are cabled in rows: the first `x_devices` modules of the chain form the
/// bottom band of the panel, the next `x_devices` the band above it, and so on. Inside
/// a band, chain columns run right to left, and inside a module, row 0 is the top row.
///
/// ```text
/// 2×2 modules, Normal orientation (module index in the chain):
///
///   y 15 ┌────┬────┐
///        │ M3 │ M2 │   band 1: chain columns 16..32, right to left
///   y 8  ├────┼────┤
///        │ M1 │ M0 │   band 0: chain columns 0..16, right to left
///   y 0  └────┴────┘
///       x 0       x 15
/// ```
///
/// With [`Orientation::Rotated90`] the same chain is viewed turned by 90°: the panel
/// is `y_devices * 8` pixels wide and `x_devices * 8` pixels tall, and the bands run
/// along `y`.
///
/// The mapping is a bijection between the coordinate rectangle
/// `[0, x_max] × [0, y_max]` and the addresses of the chain; [`Self::xy_of`] is its
/// inverse.
///
/// # Example
///
/// ```rust
/// use matrix_panel::{DeviceAddress, DeviceMapper, Orientation};
///
/// const MAPPER: DeviceMapper = DeviceMapper::new(2, 1, Orientation::Normal);
///
/// // The lower left pixel is the bottom row of the last column in the band.
/// assert_eq!(MAPPER.address_of(0, 0), Some(DeviceAddress::new(7, 15)));
/// assert_eq!(MAPPER.address_of(15, 7), Some(DeviceAddress::new(0, 0)));
/// assert_eq!(MAPPER.address_of(16, 0), None);
/// assert_eq!(MAPPER.xy_of(DeviceAddress::new(7, 15)), Some((0, 0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceMapper {
    x_devices: u16,
    y_devices: u16,
    orientation: Orientation,
}

impl DeviceMapper {
    /// Constructor: checks that the geometry is non-empty and fits one driver chain.
    ///
    /// Used in a `const`, a bad geometry is a compile-time error.
    #[must_use]
    pub const fn new(x_devices: u8, y_devices: u8, orientation: Orientation) -> Self {
        assert!(x_devices > 0, "x_devices must be positive");
        assert!(y_devices > 0, "y_devices must be positive");
        assert!(
            (x_devices as u16) * (y_devices as u16) <= MAX_DEVICES,
            "x_devices * y_devices must not exceed MAX_DEVICES"
        );
        Self {
            x_devices: x_devices as u16,
            y_devices: y_devices as u16,
            orientation,
        }
    }

    /// Modules along the wiring's horizontal axis.
    #[must_use]
    pub const fn x_devices(&self) -> u16 {
        self.x_devices
    }

    /// Modules along the wiring's vertical axis.
    #[must_use]
    pub const fn y_devices(&self) -> u16 {
        self.y_devices
    }

    /// Orientation selected at construction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Total number of modules in the chain.
    #[must_use]
    pub const fn device_count(&self) -> u16 {
        self.x_devices * self.y_devices
    }

    /// Number of chain columns in one band of modules.
    #[must_use]
    pub const fn chain_width(&self) -> u16 {
        self.x_devices * COL_SIZE
    }

    /// Largest legal `x` coordinate.
    #[must_use]
    pub const fn x_max(&self) -> u16 {
        match self.orientation {
            Orientation::Normal => self.x_devices * COL_SIZE - 1,
            Orientation::Rotated90 => self.y_devices * ROW_SIZE - 1,
        }
    }

    /// Largest legal `y` coordinate.
    #[must_use]
    pub const fn y_max(&self) -> u16 {
        match self.orientation {
            Orientation::Normal => self.y_devices * ROW_SIZE - 1,
            Orientation::Rotated90 => self.x_devices * COL_SIZE - 1,
        }
    }

    /// Panel width in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.x_max() + 1
    }

    /// Panel height in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.y_max() + 1
    }

    /// True when `(x, y)` lies on the panel.
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x <= self.x_max() && y <= self.y_max()
    }

    /// Module row for an in-range `(x, y)`.
    ///
    /// The result is meaningless for coordinates outside the panel; callers check
    /// [`Self::contains`] first (or use [`Self::address_of`]).
    #[must_use]
    pub const fn row_of(&self, x: u16, y: u16) -> u8 {
        let (band_source, _) = self.band_axes(x, y);
        (ROW_SIZE - (band_source % ROW_SIZE) - 1) as u8
    }

    /// Chain column for an in-range `(x, y)`.
    ///
    /// Same precondition as [`Self::row_of`].
    #[must_use]
    pub const fn column_of(&self, x: u16, y: u16) -> u16 {
        let (band_source, along) = self.band_axes(x, y);
        let chain_width = self.chain_width();
        (band_source / ROW_SIZE)
            .wrapping_mul(chain_width)
            .wrapping_add(chain_width - 1)
            .wrapping_sub(along % chain_width)
    }

    /// Device address of `(x, y)`, or `None` when the point is off the panel.
    #[must_use]
    pub const fn address_of(&self, x: u16, y: u16) -> Option<DeviceAddress> {
        if !self.contains(x, y) {
            return None;
        }
        Some(DeviceAddress {
            row: self.row_of(x, y),
            column: self.column_of(x, y),
        })
    }

    /// Inverse of [`Self::address_of`]: the pixel shown by a device address.
    #[must_use]
    pub const fn xy_of(&self, address: DeviceAddress) -> Option<(u16, u16)> {
        if address.row as u16 >= ROW_SIZE || address.column >= self.device_count() * COL_SIZE {
            return None;
        }
        let chain_width = self.chain_width();
        let along = chain_width - 1 - (address.column % chain_width);
        let band_source =
            (address.column / chain_width) * ROW_SIZE + (ROW_SIZE - 1 - address.row as u16);
        match self.orientation {
            Orientation::Normal => Some((along, band_source)),
            Orientation::Rotated90 => Some((self.x_max() - band_source, along)),
        }
    }

    // Splits a coordinate into the axis that selects band and row (`band_source`) and the
    // axis that runs along the chain (`along`).
    const fn band_axes(&self, x: u16, y: u16) -> (u16, u16) {
        match self.orientation {
            Orientation::Normal => (y, x),
            Orientation::Rotated90 => (self.x_max().wrapping_sub(x), y),
        }
    }
}
