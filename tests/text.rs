#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for text layout, measurement and fonts.

use std::collections::BTreeSet;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use matrix_panel::{
    Error, Glyph, GlyphSource, MatrixBuffer, MatrixDriver, Panel, PanelConfig, PanelFont, Result,
    TextRotation,
};

type Points = BTreeSet<(u16, u16)>;

/// Four rows tall, bit 0 is the top row.
struct BlockFont;

impl GlyphSource for BlockFont {
    fn font_height(&self) -> u16 {
        4
    }

    fn glyph(&self, ch: char) -> Glyph {
        match ch {
            ' ' => Glyph::from_columns(&[0, 0, 0]),
            'I' => Glyph::from_columns(&[0, 0b1111, 0]),
            'L' => Glyph::from_columns(&[0b1111, 0b1000, 0b1000]),
            '.' => Glyph::from_columns(&[0b1000]),
            _ => Glyph::from_columns(&[0b1111, 0b1111, 0b1111]),
        }
    }
}

/// Blank glyphs of a configurable height.
struct HeightOnly(u16);

impl GlyphSource for HeightOnly {
    fn font_height(&self) -> u16 {
        self.0
    }

    fn glyph(&self, _ch: char) -> Glyph {
        Glyph::from_columns(&[0, 0])
    }
}

fn block_panel() -> Result<Panel<'static, MatrixBuffer<4>, BlockFont>> {
    let mut panel = Panel::new(MatrixBuffer::<4>::new(), PanelConfig::new(2, 2))?;
    panel.begin();
    panel.with_font(BlockFont).map_err(|(error, _)| error)
}

fn lit<D: MatrixDriver, F>(panel: &Panel<'_, D, F>) -> Points {
    (0..=panel.y_max())
        .flat_map(|y| (0..=panel.x_max()).map(move |x| (x, y)))
        .filter(|&(x, y)| panel.point(x, y))
        .collect()
}

fn points(list: &[(u16, u16)]) -> Points {
    list.iter().copied().collect()
}

#[test]
fn text_width_adds_spacing_between_glyphs_only() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.char_spacing(), 1);
    assert_eq!(panel.text_width(""), 0);
    assert_eq!(panel.text_width("I"), 3);
    assert_eq!(panel.text_width("IL"), 7);
    assert_eq!(panel.text_width(". ."), 7);
    panel.set_char_spacing(0);
    assert_eq!(panel.text_width("IL"), 6);
    Ok(())
}

#[test]
fn upright_glyph_hangs_below_anchor() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(0, 7, "L", TextRotation::Rot0, true), 3);
    assert_eq!(
        lit(&panel),
        points(&[(0, 7), (0, 6), (0, 5), (0, 4), (1, 4), (2, 4)])
    );
    Ok(())
}

#[test]
fn quarter_turn_glyph_runs_up() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(3, 0, "L", TextRotation::Rot90, true), 3);
    assert_eq!(
        lit(&panel),
        points(&[(3, 0), (4, 0), (5, 0), (6, 0), (6, 1), (6, 2)])
    );
    Ok(())
}

#[test]
fn half_turn_glyph_runs_left() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(10, 0, "L", TextRotation::Rot180, true), 3);
    assert_eq!(
        lit(&panel),
        points(&[(10, 0), (10, 1), (10, 2), (10, 3), (9, 3), (8, 3)])
    );
    Ok(())
}

#[test]
fn three_quarter_turn_glyph_runs_down() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(7, 7, "L", TextRotation::Rot270, true), 3);
    assert_eq!(
        lit(&panel),
        points(&[(7, 7), (6, 7), (5, 7), (4, 7), (4, 6), (4, 5)])
    );
    Ok(())
}

#[test]
fn cursor_advances_by_width_plus_spacing() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(0, 7, "IL", TextRotation::Rot0, true), 7);
    assert_eq!(
        lit(&panel),
        points(&[
            (1, 7),
            (1, 6),
            (1, 5),
            (1, 4),
            (4, 7),
            (4, 6),
            (4, 5),
            (4, 4),
            (5, 4),
            (6, 4),
        ])
    );

    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(0, 0, "IL", TextRotation::Rot90, true), 7);
    assert_eq!(
        lit(&panel),
        points(&[
            (0, 1),
            (1, 1),
            (2, 1),
            (3, 1),
            (0, 4),
            (1, 4),
            (2, 4),
            (3, 4),
            (3, 5),
            (3, 6),
        ])
    );
    Ok(())
}

#[test]
fn half_turn_cursor_moves_left() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(10, 0, "IL", TextRotation::Rot180, true), 7);
    assert_eq!(
        lit(&panel),
        points(&[
            (9, 0),
            (9, 1),
            (9, 2),
            (9, 3),
            (6, 0),
            (6, 1),
            (6, 2),
            (6, 3),
            (5, 3),
            (4, 3),
        ])
    );
    Ok(())
}

#[test]
fn three_quarter_turn_cursor_moves_down() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(7, 10, "IL", TextRotation::Rot270, true), 7);
    assert_eq!(
        lit(&panel),
        points(&[
            (7, 9),
            (6, 9),
            (5, 9),
            (4, 9),
            (7, 6),
            (6, 6),
            (5, 6),
            (4, 6),
            (4, 5),
            (4, 4),
        ])
    );
    Ok(())
}

#[test]
fn huge_spacing_saturates_the_cursor() -> Result<()> {
    let mut panel = block_panel()?;
    panel.set_char_spacing(u16::MAX);
    let text = "I".repeat(40_000);
    assert_eq!(panel.text_width(&text), u16::MAX);
    assert_eq!(panel.draw_text(0, 7, &text, TextRotation::Rot0, true), u16::MAX);
    assert_eq!(lit(&panel), points(&[(1, 7), (1, 6), (1, 5), (1, 4)]));
    Ok(())
}

#[test]
fn text_off_the_edge_is_clipped() -> Result<()> {
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(14, 7, "IL", TextRotation::Rot0, true), 7);
    assert_eq!(lit(&panel), points(&[(15, 7), (15, 6), (15, 5), (15, 4)]));

    // Hanging below the origin.
    let mut panel = block_panel()?;
    assert_eq!(panel.draw_text(0, 1, "L", TextRotation::Rot0, true), 3);
    assert_eq!(lit(&panel), points(&[(0, 1), (0, 0)]));
    Ok(())
}

#[test]
fn drawing_text_off_erases_only_lit_bits() -> Result<()> {
    let mut panel = block_panel()?;
    for y in 4..=7 {
        panel.draw_hline(y, 0, 2, true);
    }
    panel.draw_text(0, 7, "L", TextRotation::Rot0, false);
    assert_eq!(
        lit(&panel),
        points(&[(1, 7), (1, 6), (1, 5), (2, 7), (2, 6), (2, 5)])
    );
    Ok(())
}

#[test]
fn opaque_text_overwrites_background_and_gaps() -> Result<()> {
    let mut panel = block_panel()?;
    for y in 3..=7 {
        panel.draw_hline(y, 0, 6, true);
    }
    assert_eq!(panel.draw_text_opaque(0, 7, "I.", TextRotation::Rot0, true), 5);
    let drawn = lit(&panel);
    let expected: Points = (0..=6)
        .map(|x| (x, 3))
        .chain((4..=7).map(|y| (1, y)))
        .chain([(4, 4)])
        .chain((4..=7).flat_map(|y| [(5, y), (6, y)]))
        .collect();
    assert_eq!(drawn, expected);
    Ok(())
}

#[test]
fn text_flushes_once() -> Result<()> {
    let mut panel = block_panel()?;
    let flushes = panel.driver().flush_count();
    panel.draw_text(0, 7, "LIL", TextRotation::Rot0, true);
    assert_eq!(panel.driver().flush_count(), flushes + 1);
    Ok(())
}

#[test]
fn begin_restores_configured_spacing() -> Result<()> {
    let mut panel = block_panel()?;
    panel.set_char_spacing(3);
    assert_eq!(panel.text_width("IL"), 9);
    panel.begin();
    assert_eq!(panel.text_width("IL"), 7);
    Ok(())
}

#[test]
fn compact_font_metrics() {
    let font = PanelFont::Font3x4;
    assert_eq!(font.font_height(), 4);
    assert_eq!(font.glyph('A').width(), 3);
    assert!(font.glyph(' ').columns().iter().all(|&bits| bits == 0));
    assert!(font.glyph('A').columns().iter().any(|&bits| bits != 0));
    assert!(
        font.glyph('8')
            .columns()
            .iter()
            .all(|&bits| bits < 1 << 4)
    );
}

#[test]
fn default_font_is_five_by_seven() -> Result<()> {
    let mut panel = Panel::new(MatrixBuffer::<4>::new(), PanelConfig::new(4, 1))?;
    panel.begin();
    assert_eq!(*panel.font(), PanelFont::Font5x7);
    assert_eq!(panel.font_height(), 7);
    assert_eq!(panel.text_width("Hi"), 11);
    assert_eq!(panel.draw_text(2, 7, "Hi", TextRotation::Rot0, true), 11);
    let drawn = lit(&panel);
    assert!(!drawn.is_empty());
    assert!(drawn.iter().all(|&(x, y)| (2..13).contains(&x) && y >= 1));
    Ok(())
}

#[test]
fn every_built_in_font_fits() {
    let fonts = [
        PanelFont::Font3x4,
        PanelFont::Font4x6,
        PanelFont::Font5x7,
        PanelFont::Font5x8,
        PanelFont::Font6x9,
        PanelFont::Font6x10,
        PanelFont::Font6x12,
        PanelFont::Font6x13,
        PanelFont::Font6x13Bold,
        PanelFont::Font6x13Italic,
        PanelFont::Font7x13,
        PanelFont::Font7x13Bold,
        PanelFont::Font7x13Italic,
        PanelFont::Font7x14,
        PanelFont::Font7x14Bold,
        PanelFont::Font8x13,
        PanelFont::Font8x13Bold,
        PanelFont::Font8x13Italic,
        PanelFont::Font9x15,
        PanelFont::Font9x15Bold,
        PanelFont::Font9x18,
        PanelFont::Font9x18Bold,
        PanelFont::Font10x20,
    ];
    for font in fonts {
        let height = font.font_height();
        assert!(height <= 32, "{font:?} is {height} rows");
        let glyph = font.glyph('W');
        assert_eq!(u32::from(glyph.width()), font.to_font().character_size.width);
        assert!(glyph.columns().iter().all(|&bits| bits < 1 << height));
    }
}

#[test]
fn mono_font_can_replace_built_in_font() -> Result<()> {
    let mut panel = Panel::new(MatrixBuffer::<4>::new(), PanelConfig::new(4, 1))?;
    panel.set_point(0, 0, true);
    let mut panel = panel.with_font(&FONT_6X10).map_err(|(error, _)| error)?;
    assert_eq!(panel.font_height(), 10);
    assert_eq!(panel.text_width("ab"), 13);
    assert!(panel.point(0, 0));
    panel.draw_text(0, 7, "ab", TextRotation::Rot0, true);
    assert!(panel.driver().lit_count() > 1);
    Ok(())
}

#[test]
fn twenty_row_font_fills_three_module_rows() -> Result<()> {
    let mut panel = Panel::new(
        MatrixBuffer::<6>::new(),
        PanelConfig::new(2, 3).with_font(PanelFont::Font10x20),
    )?;
    panel.begin();
    assert_eq!(panel.font_height(), 20);
    // The descender of 'g' sits below row 16 of the glyph.
    assert_eq!(panel.draw_text(0, 23, "g", TextRotation::Rot0, true), 10);
    let drawn = lit(&panel);
    assert!(drawn.iter().any(|&(_, y)| y < 8), "lowest module row unused");
    assert!(drawn.iter().all(|&(x, y)| x < 10 && y >= 4));
    Ok(())
}

#[test]
fn rejected_font_hands_the_panel_back() -> Result<()> {
    let mut panel = Panel::new(MatrixBuffer::<4>::new(), PanelConfig::new(2, 2))?;
    panel.set_point(3, 3, true);
    let Err((error, panel)) = panel.with_font(HeightOnly(40)) else {
        panic!("a 40 row font was accepted");
    };
    assert_eq!(error, Error::FontTooTall { height: 40 });
    assert!(panel.point(3, 3));
    assert_eq!(*panel.font(), PanelFont::Font5x7);
    let buffer = panel.release().expect("panel owns its driver");
    assert_eq!(buffer.lit_count(), 1);
    Ok(())
}

#[test]
fn tall_fonts_are_rejected() -> Result<()> {
    let panel = Panel::new(MatrixBuffer::<4>::new(), PanelConfig::new(2, 2))?;
    let mut panel = panel
        .with_font(HeightOnly(32))
        .map_err(|(error, _)| error)?;
    assert_eq!(
        panel.set_font(HeightOnly(33)),
        Err(Error::FontTooTall { height: 33 })
    );
    assert_eq!(panel.font_height(), 32);
    panel.set_font(HeightOnly(5))?;
    assert_eq!(panel.font_height(), 5);
    Ok(())
}

#[test]
fn glyph_keeps_at_most_sixteen_columns() {
    let glyph = Glyph::from_columns(&[1; 20]);
    assert_eq!(glyph.width(), 16);
    assert_eq!(glyph.column(15), Some(1));
    assert_eq!(glyph.column(16), None);
    assert!(glyph.is_lit(0, 0));
    assert!(!glyph.is_lit(0, 1));
    assert!(!glyph.is_lit(20, 0));
}
