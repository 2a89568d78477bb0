//! Pixel graphics for LED matrix panels built from cascaded 8x8 MAX72xx-style modules.
//!
//! A [`Panel`] turns a chain of 8x8 LED driver modules into one Cartesian pixel field.
//! The origin is the lower left corner, `x` grows to the right and `y` grows upward.
//! On top of single points the panel draws lines, rectangles, triangles, quadrilaterals,
//! polygons, circles and text.
//!
//! The panel never talks to the hardware itself. It draws through a [`MatrixDriver`],
//! the capability set of a low-level module driver (set/get one LED, flush, intensity,
//! clear). [`MatrixBuffer`] is an in-memory implementation shaped like the MAX72xx
//! register file, suitable both as the frame store for a real SPI transport and for
//! running everything on the host.
//!
//! # Glossary
//!
//! - **Module:** one 8x8 LED driver chip, the tile the panel is built from.
//! - **Zig-zag wiring:** modules are cabled row by row in alternating direction, so the
//!   cascaded chain index is not a linear function of `(x, y)`. See [`DeviceMapper`].
//! - **Device address:** the `(row, column)` pair the driver understands, where `column`
//!   spans the whole cascaded chain.
//! - **Update enabled:** whether drawing calls push to the hardware as they go or wait
//!   for an explicit [`Panel::flush`].
//!
//! # Example
//!
//! ```rust
//! use matrix_panel::{MatrixBuffer, Panel, PanelConfig, TextRotation};
//!
//! // Four modules wide, two modules tall: a 32x16 pixel field.
//! const CONFIG: PanelConfig = PanelConfig::new(4, 2);
//!
//! let mut panel = Panel::new(MatrixBuffer::<8>::new(), CONFIG)?;
//! panel.begin();
//!
//! assert!(panel.draw_rectangle(0, 0, panel.x_max(), panel.y_max(), true));
//! assert!(panel.draw_circle(16, 8, 5, true));
//! let width = panel.draw_text(2, 12, "Hi", TextRotation::Rot0, true);
//! assert_eq!(width, panel.text_width("Hi"));
//! # Ok::<(), matrix_panel::Error>(())
//! ```
#![cfg_attr(not(any(test, feature = "host")), no_std)]

#[macro_use]
mod fmt;

mod error;
pub mod matrix_buffer;
pub mod panel;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
pub use crate::matrix_buffer::MatrixBuffer;
pub use crate::panel::{
    DeviceAddress, DeviceMapper, DriverHandle, Glyph, GlyphSource, MatrixDriver, Orientation,
    Panel, PanelConfig, PanelFont, TextRotation,
};
