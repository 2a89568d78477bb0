//! Text layout along one of four reading directions.
//!
//! Glyph bitmaps come from a [`GlyphSource`]. The built-in [`PanelFont`]s wrap the
//! embedded-graphics ASCII fonts plus a compact 3x4 font for single-module panels; any
//! [`MonoFont`] can also be used directly.

use embedded_graphics::{
    Drawable,
    draw_target::DrawTarget,
    image::ImageRaw,
    mono_font::{
        DecorationDimensions, MonoFont, MonoTextStyle,
        ascii::{
            FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10, FONT_6X12, FONT_6X13,
            FONT_6X13_BOLD, FONT_6X13_ITALIC, FONT_7X13, FONT_7X13_BOLD, FONT_7X13_ITALIC,
            FONT_7X14, FONT_7X14_BOLD, FONT_8X13, FONT_8X13_BOLD, FONT_8X13_ITALIC, FONT_9X15,
            FONT_9X15_BOLD, FONT_9X18, FONT_9X18_BOLD, FONT_10X20,
        },
        mapping::StrGlyphMapping,
    },
    pixelcolor::BinaryColor,
    prelude::{OriginDimensions, Pixel, Point, Size},
    text::{Baseline, Text},
};
use heapless::Vec;

use super::{MatrixDriver, Panel};
use crate::{Error, Result};

/// One column of a glyph. Bit 0 is the top row.
pub type GlyphColumn = u32;

/// Widest glyph a [`Glyph`] can hold.
pub const MAX_GLYPH_WIDTH: usize = 16;

/// Tallest font the panel accepts (one bit per row in a [`GlyphColumn`]).
pub const MAX_FONT_HEIGHT: u16 = GlyphColumn::BITS as u16;

/// Column bitmaps of one character, left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    columns: Vec<GlyphColumn, MAX_GLYPH_WIDTH>,
}

impl Glyph {
    /// Build a glyph from its columns. Columns past [`MAX_GLYPH_WIDTH`] are dropped.
    #[must_use]
    pub fn from_columns(columns: &[GlyphColumn]) -> Self {
        Self {
            columns: columns.iter().take(MAX_GLYPH_WIDTH).copied().collect(),
        }
    }

    /// Width in columns, which is also how far the cursor moves for this glyph.
    #[must_use]
    pub fn width(&self) -> u16 {
        // At most MAX_GLYPH_WIDTH.
        self.columns.len() as u16
    }

    /// Bitmap of column `index`, `None` past the glyph's width.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<GlyphColumn> {
        self.columns.get(index).copied()
    }

    /// True when the bit at `column`, `row` (row 0 at the top) is set.
    #[must_use]
    pub fn is_lit(&self, column: usize, row: u16) -> bool {
        row < MAX_FONT_HEIGHT
            && self
                .column(column)
                .is_some_and(|bits| (bits >> row) & 1 != 0)
    }

    /// All columns, left to right.
    #[must_use]
    pub fn columns(&self) -> &[GlyphColumn] {
        &self.columns
    }
}

/// Where glyph bitmaps come from.
///
/// Implementations report one height for the whole font and a [`Glyph`] per character;
/// glyphs may differ in width. Characters the font lacks should map to a placeholder
/// glyph rather than an empty one so text keeps its shape.
pub trait GlyphSource {
    /// Rows in every glyph, at most [`MAX_FONT_HEIGHT`].
    fn font_height(&self) -> u16;

    /// Bitmap for `ch`.
    fn glyph(&self, ch: char) -> Glyph;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &G {
    fn font_height(&self) -> u16 {
        (**self).font_height()
    }

    fn glyph(&self, ch: char) -> Glyph {
        (**self).glyph(ch)
    }
}

// Collects the pixels of one rendered character into glyph columns.
struct GlyphCanvas {
    size: Size,
    columns: Vec<GlyphColumn, MAX_GLYPH_WIDTH>,
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if color.is_on() && y < GlyphColumn::BITS {
                if let Some(column) = self.columns.get_mut(x) {
                    *column |= 1 << y;
                }
            }
        }
        Ok(())
    }
}

impl GlyphSource for MonoFont<'_> {
    fn font_height(&self) -> u16 {
        u16::try_from(self.character_size.height).unwrap_or(u16::MAX)
    }

    fn glyph(&self, ch: char) -> Glyph {
        let width = usize::try_from(self.character_size.width).unwrap_or(MAX_GLYPH_WIDTH);
        let mut canvas = GlyphCanvas {
            size: self.character_size,
            columns: core::iter::repeat_n(0, width.min(MAX_GLYPH_WIDTH)).collect(),
        };
        let mut utf8 = [0u8; 4];
        let style = MonoTextStyle::new(self, BinaryColor::On);
        let text = Text::with_baseline(
            ch.encode_utf8(&mut utf8),
            Point::zero(),
            style,
            Baseline::Top,
        );
        let Ok(_) = text.draw(&mut canvas);
        Glyph {
            columns: canvas.columns,
        }
    }
}

// Packed bitmap for the 3x4 font (ASCII 0x20-0x7E, 16 glyphs per image row).
const FONT_3X4_DATA: [u8; 144] = [
    0x0a, 0xd5, 0x10, 0x4a, 0xa0, 0x01, 0x0a, 0xfe, 0x68, 0x85, 0x70, 0x02, 0x08, 0x74, 0x90, 0x86,
    0xa5, 0xc4, 0x08, 0x5e, 0x68, 0x48, 0x08, 0x10, 0xeb, 0x7b, 0xe7, 0xfd, 0x22, 0x27, 0xb8, 0x9b,
    0x39, 0xb4, 0x05, 0xd1, 0xa9, 0x3e, 0xea, 0x5d, 0x28, 0x0a, 0xff, 0xf3, 0xfc, 0xe4, 0x45, 0xd2,
    0xff, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0xb7, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0xfe, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x97, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xe0, 0xd0, 0xf7, 0xe5,
    0x6d, 0x48, 0xc0, 0x68, 0xdf, 0x35, 0x6f, 0x49, 0x40, 0x40, 0x86, 0xf5, 0xd7, 0xab, 0xe0, 0xc7,
    0x5f, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0x37, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0x1e, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x17, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xb1, 0x80, 0xf7, 0xe5,
    0x6d, 0x48, 0xa0, 0xa8, 0xdf, 0x35, 0x6f, 0x49, 0x20, 0x90, 0x86, 0xf5, 0xd7, 0xab, 0xb1, 0x80,
];
const FONT_3X4_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new("\0 \u{7e}", 0);

/// The 3x4 font: digits and upper case fit on half a module.
pub const FONT_3X4: MonoFont<'static> = MonoFont {
    image: ImageRaw::new(&FONT_3X4_DATA, 48),
    glyph_mapping: &FONT_3X4_MAPPING,
    character_size: Size::new(3, 4),
    character_spacing: 0,
    baseline: 3,
    underline: DecorationDimensions::new(3, 1),
    strikethrough: DecorationDimensions::new(2, 1),
};

/// Built-in fonts, named by glyph width × height.
///
/// Every variant fits in [`MAX_FONT_HEIGHT`] rows, so a [`PanelConfig`](super::PanelConfig)
/// can pick any of them without a runtime check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelFont {
    /// 3x4 digits and capitals, see [`FONT_3X4`].
    Font3x4,
    /// 4x6 ASCII font.
    Font4x6,
    /// 5x7 ASCII font, one module row tall.
    #[default]
    Font5x7,
    /// 5x8 ASCII font.
    Font5x8,
    /// 6x9 ASCII font.
    Font6x9,
    /// 6x10 ASCII font.
    Font6x10,
    /// 6x12 ASCII font.
    Font6x12,
    /// 6x13 ASCII font.
    Font6x13,
    /// 6x13 bold ASCII font.
    Font6x13Bold,
    /// 6x13 italic ASCII font.
    Font6x13Italic,
    /// 7x13 ASCII font.
    Font7x13,
    /// 7x13 bold ASCII font.
    Font7x13Bold,
    /// 7x13 italic ASCII font.
    Font7x13Italic,
    /// 7x14 ASCII font.
    Font7x14,
    /// 7x14 bold ASCII font.
    Font7x14Bold,
    /// 8x13 ASCII font.
    Font8x13,
    /// 8x13 bold ASCII font.
    Font8x13Bold,
    /// 8x13 italic ASCII font.
    Font8x13Italic,
    /// 9x15 ASCII font.
    Font9x15,
    /// 9x15 bold ASCII font.
    Font9x15Bold,
    /// 9x18 ASCII font, for panels three modules tall.
    Font9x18,
    /// 9x18 bold ASCII font.
    Font9x18Bold,
    /// 10x20 ASCII font.
    Font10x20,
}

impl PanelFont {
    /// The `MonoFont` behind this variant.
    #[must_use]
    pub const fn to_font(self) -> MonoFont<'static> {
        match self {
            Self::Font3x4 => FONT_3X4,
            Self::Font4x6 => FONT_4X6,
            Self::Font5x7 => FONT_5X7,
            Self::Font5x8 => FONT_5X8,
            Self::Font6x9 => FONT_6X9,
            Self::Font6x10 => FONT_6X10,
            Self::Font6x12 => FONT_6X12,
            Self::Font6x13 => FONT_6X13,
            Self::Font6x13Bold => FONT_6X13_BOLD,
            Self::Font6x13Italic => FONT_6X13_ITALIC,
            Self::Font7x13 => FONT_7X13,
            Self::Font7x13Bold => FONT_7X13_BOLD,
            Self::Font7x13Italic => FONT_7X13_ITALIC,
            Self::Font7x14 => FONT_7X14,
            Self::Font7x14Bold => FONT_7X14_BOLD,
            Self::Font8x13 => FONT_8X13,
            Self::Font8x13Bold => FONT_8X13_BOLD,
            Self::Font8x13Italic => FONT_8X13_ITALIC,
            Self::Font9x15 => FONT_9X15,
            Self::Font9x15Bold => FONT_9X15_BOLD,
            Self::Font9x18 => FONT_9X18,
            Self::Font9x18Bold => FONT_9X18_BOLD,
            Self::Font10x20 => FONT_10X20,
        }
    }
}

impl GlyphSource for PanelFont {
    fn font_height(&self) -> u16 {
        self.to_font().font_height()
    }

    fn glyph(&self, ch: char) -> Glyph {
        self.to_font().glyph(ch)
    }
}

/// Reading direction of a line of text.
///
/// The anchor passed to [`Panel::draw_text`] is the top left corner of the first glyph
/// as seen by someone reading in that direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRotation {
    /// Upright, text runs right.
    #[default]
    Rot0,
    /// Turned a quarter counterclockwise, text runs up.
    Rot90,
    /// Upside down, text runs left.
    Rot180,
    /// Turned a quarter clockwise, text runs down.
    Rot270,
}

impl TextRotation {
    // Panel position of glyph column `column`, bit row `row`, for a glyph anchored at
    // `(x, y)`.
    const fn place(self, x: i32, y: i32, column: i32, row: i32) -> (i32, i32) {
        match self {
            Self::Rot0 => (x.saturating_add(column), y.saturating_sub(row)),
            Self::Rot90 => (x.saturating_add(row), y.saturating_add(column)),
            Self::Rot180 => (x.saturating_sub(column), y.saturating_add(row)),
            Self::Rot270 => (x.saturating_sub(row), y.saturating_sub(column)),
        }
    }

    // Cursor movement for `distance` columns of text.
    const fn advance(self, distance: i32) -> (i32, i32) {
        match self {
            Self::Rot0 => (distance, 0),
            Self::Rot90 => (0, distance),
            Self::Rot180 => (distance.saturating_neg(), 0),
            Self::Rot270 => (0, distance.saturating_neg()),
        }
    }
}

impl<'a, D: MatrixDriver, F: GlyphSource> Panel<'a, D, F> {
    /// Draw `text` starting at `(x, y)` and return how far the cursor moved.
    ///
    /// Lit glyph bits are set to `state`; everything else under the text is left as it
    /// was. Pixels that fall off the panel are skipped.
    ///
    /// ```rust
    /// use matrix_panel::{MatrixBuffer, Panel, PanelConfig, PanelFont, TextRotation};
    ///
    /// const CONFIG: PanelConfig = PanelConfig::new(4, 1).with_font(PanelFont::Font3x4);
    ///
    /// let mut panel = Panel::new(MatrixBuffer::<4>::new(), CONFIG)?;
    /// let x = (panel.width() - panel.text_width("12:30")) / 2;
    /// assert_eq!(panel.draw_text(x, 5, "12:30", TextRotation::Rot0, true), 19);
    /// # Ok::<(), matrix_panel::Error>(())
    /// ```
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        rotation: TextRotation,
        state: bool,
    ) -> u16 {
        self.render_text(x, y, text, rotation, state, false)
    }

    /// Like [`draw_text`](Self::draw_text), but also writes `!state` to the unlit glyph
    /// cells and the spacing between characters, so new text fully replaces old text of
    /// the same width.
    pub fn draw_text_opaque(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        rotation: TextRotation,
        state: bool,
    ) -> u16 {
        self.render_text(x, y, text, rotation, state, true)
    }

    /// Distance [`draw_text`](Self::draw_text) would move the cursor, without drawing.
    #[must_use]
    pub fn text_width(&self, text: &str) -> u16 {
        let mut chars = text.chars().peekable();
        let mut width: u16 = 0;
        while let Some(ch) = chars.next() {
            width = width.saturating_add(self.font.glyph(ch).width());
            if chars.peek().is_some() {
                width = width.saturating_add(self.char_spacing);
            }
        }
        width
    }

    /// Rows in the current font.
    #[must_use]
    pub fn font_height(&self) -> u16 {
        self.font.font_height()
    }

    /// Blank columns between two characters.
    #[must_use]
    pub const fn char_spacing(&self) -> u16 {
        self.char_spacing
    }

    /// Change the spacing until the next [`begin`](Self::begin).
    pub fn set_char_spacing(&mut self, spacing: u16) {
        self.char_spacing = spacing;
    }

    /// The current font.
    #[must_use]
    pub const fn font(&self) -> &F {
        &self.font
    }

    /// Replace the font with another of the same type.
    ///
    /// # Errors
    ///
    /// [`Error::FontTooTall`] if the font has more than [`MAX_FONT_HEIGHT`] rows; the
    /// current font is kept.
    pub fn set_font(&mut self, font: F) -> Result<()> {
        check_height(&font)?;
        debug!("Panel::set_font: {} rows", font.font_height());
        self.font = font;
        Ok(())
    }

    /// Switch to a font of another type, such as a [`MonoFont`] or a custom
    /// [`GlyphSource`].
    ///
    /// # Errors
    ///
    /// [`Error::FontTooTall`] if the font has more than [`MAX_FONT_HEIGHT`] rows. The
    /// unchanged panel comes back with the error, so an owned driver is not lost.
    #[allow(clippy::result_large_err, reason = "the error hands the panel back")]
    pub fn with_font<G: GlyphSource>(self, font: G) -> Result<Panel<'a, D, G>, (Error, Self)> {
        if let Err(error) = check_height(&font) {
            return Err((error, self));
        }
        debug!("Panel::with_font: {} rows", font.font_height());
        Ok(Panel {
            driver: self.driver,
            mapper: self.mapper,
            font,
            char_spacing: self.char_spacing,
            default_char_spacing: self.default_char_spacing,
            update_enabled: self.update_enabled,
            dirty: self.dirty,
            batch_depth: self.batch_depth,
        })
    }

    fn render_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        rotation: TextRotation,
        state: bool,
        opaque: bool,
    ) -> u16 {
        let height = self.font.font_height().min(MAX_FONT_HEIGHT);
        let spacing = self.char_spacing;
        self.batch(|panel| {
            let (mut cursor_x, mut cursor_y) = (i32::from(x), i32::from(y));
            let mut moved: u16 = 0;
            let mut chars = text.chars().peekable();
            while let Some(ch) = chars.next() {
                let glyph = panel.font.glyph(ch);
                let gap = if chars.peek().is_some() { spacing } else { 0 };
                let glyph_width = glyph.width();
                let advance = glyph_width.saturating_add(gap);
                // Only opaque text touches the spacing columns.
                let span = if opaque { advance } else { glyph_width };
                for column in 0..span {
                    for row in 0..height {
                        let lit = glyph.is_lit(usize::from(column), row);
                        if !lit && !opaque {
                            continue;
                        }
                        let (px, py) = rotation.place(
                            cursor_x,
                            cursor_y,
                            i32::from(column),
                            i32::from(row),
                        );
                        panel.plot(px, py, if lit { state } else { !state });
                    }
                }
                let (dx, dy) = rotation.advance(i32::from(advance));
                cursor_x = cursor_x.saturating_add(dx);
                cursor_y = cursor_y.saturating_add(dy);
                moved = moved.saturating_add(advance);
            }
            moved
        })
    }
}

fn check_height<G: GlyphSource>(font: &G) -> Result<()> {
    let height = font.font_height();
    if height > MAX_FONT_HEIGHT {
        return Err(Error::FontTooTall { height });
    }
    Ok(())
}
