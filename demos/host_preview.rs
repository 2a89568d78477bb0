#![cfg(feature = "host")]
//! Draws a scoreboard-style frame on a 4x2 module panel and writes it to a PNG.
//!
//! Run with `cargo run --features host --bin demo_host_preview [output.png]`.

use std::error::Error;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use matrix_panel::{MatrixBuffer, Panel, PanelConfig, PanelFont, TextRotation, to_png};
use smart_leds::RGB8;

// Four modules across, two high: 32x16 pixels.
const CONFIG: PanelConfig = PanelConfig::new(4, 2).with_font(PanelFont::Font3x4);
const LIT_COLOR: RGB8 = RGB8::new(255, 48, 16);

fn main() -> Result<(), Box<dyn Error>> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/previews/host_preview.png".to_owned());

    let mut panel = Panel::new(MatrixBuffer::<8>::new(), CONFIG)?;
    panel.begin();
    panel.set_intensity(4);

    panel.with_updates_suspended(|panel| {
        panel.draw_rectangle(0, 0, panel.x_max(), panel.y_max(), true);

        // Score on the top half, centered.
        let score = "12:07";
        let x = (panel.width() - panel.text_width(score)) / 2;
        panel.draw_text(x, panel.y_max() - 2, score, TextRotation::Rot0, true);

        // Period marker: a ball and a pennant on the bottom half.
        panel.draw_circle(7, 4, 2, true);
        panel.draw_triangle(20, 2, 20, 6, 25, 4, true);
    });

    // embedded-graphics primitives draw in screen coordinates (y down).
    Line::new(Point::new(1, 8), Point::new(30, 8))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut panel)?;

    let flushes = panel.driver().flush_count();
    println!("{} LEDs lit after {flushes} flushes", panel.driver().lit_count());
    to_png::write_panel_png(&panel, &output_path, 640, LIT_COLOR)?;
    Ok(())
}
