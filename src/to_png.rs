//! Host-side PNG previews of a panel, drawn as soft round LEDs.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use smart_leds::RGB8;

use crate::panel::{MatrixDriver, Panel};

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Color of an LED that is off: dark, but visible against the black board.
pub const UNLIT_COLOR: RGB8 = RGB8::new(24, 24, 24);

/// Render the panel's current LED states into a PNG no larger than
/// `target_max_dimension` on either side.
///
/// The image is the panel as seen from the front: `y_max` at the top, the origin in the
/// lower left corner. Lit LEDs use `lit_color`, dark ones [`UNLIT_COLOR`].
///
/// # Errors
///
/// Any I/O or PNG encoding error.
pub fn write_panel_png<D: MatrixDriver, F>(
    panel: &Panel<'_, D, F>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    lit_color: RGB8,
) -> Result<(), Box<dyn Error>> {
    write_panel_png_with_gamma(
        panel,
        output_path,
        target_max_dimension,
        lit_color,
        PREVIEW_INVERSE_GAMMA,
    )
}

/// [`write_panel_png`] with a custom preview inverse gamma.
///
/// # Errors
///
/// Any I/O or PNG encoding error.
pub fn write_panel_png_with_gamma<D: MatrixDriver, F>(
    panel: &Panel<'_, D, F>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    lit_color: RGB8,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let leds = LedGrid::capture(panel, lit_color);
    let cell_size = select_cell_size(leds.width, leds.height, target_max_dimension);
    let (width, height, pixels) = leds.render(cell_size, preview_inverse_gamma);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

// LED colors in image order: row 0 is the panel's top row.
struct LedGrid {
    width: u32,
    height: u32,
    colors: Vec<RGB8>,
}

impl LedGrid {
    fn capture<D: MatrixDriver, F>(panel: &Panel<'_, D, F>, lit_color: RGB8) -> Self {
        let colors = (0..=panel.y_max())
            .rev()
            .flat_map(|y| (0..=panel.x_max()).map(move |x| (x, y)))
            .map(|(x, y)| if panel.point(x, y) { lit_color } else { UNLIT_COLOR })
            .collect();
        Self {
            width: u32::from(panel.width()),
            height: u32::from(panel.height()),
            colors,
        }
    }

    fn render(&self, cell_size: u32, preview_inverse_gamma: f32) -> (u32, u32, Vec<u8>) {
        let led_margin = (cell_size / 8).max(1);
        let led_radius = cell_size.saturating_sub(led_margin * 2) / 2;
        assert!(led_radius > 0, "target_max_dimension is too small for this panel");
        let fade_width = (led_radius / 3).max(1);
        let border = led_radius;
        let width = self.width * cell_size + border * 2;
        let height = self.height * cell_size + border * 2;
        let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];

        let center = (cell_size - 1) as i32 / 2;
        let radius_sq = (led_radius as i32).pow(2);
        let led_radius_f = led_radius as f32;
        let inner_radius_f = led_radius.saturating_sub(fade_width) as f32;

        for (index, color) in self.colors.iter().enumerate() {
            let index = index as u32;
            let cell_origin_x = (index % self.width) * cell_size;
            let cell_origin_y = (index / self.width) * cell_size;
            let linear = [color.r, color.g, color.b]
                .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner_radius_f {
                        1.0
                    } else {
                        let fade_span = led_radius_f - inner_radius_f;
                        (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                    };
                    let x = border + cell_origin_x + local_x;
                    let y = border + cell_origin_y + local_y;
                    let start = ((y * width + x) * 3 * 2) as usize;
                    let Some(pixel) = bytes.get_mut(start..start + 6) else {
                        continue;
                    };
                    for (channel, value) in pixel.chunks_exact_mut(2).zip(linear) {
                        channel.copy_from_slice(&linear_to_u16(value * intensity).to_be_bytes());
                    }
                }
            }
        }

        (width, height, bytes)
    }
}

fn select_cell_size(panel_width: u32, panel_height: u32, target_max_dimension: u32) -> u32 {
    assert!(target_max_dimension > 0, "target_max_dimension must be positive");
    let mut cell_size = target_max_dimension;
    while cell_size > 1 {
        let led_margin = (cell_size / 8).max(1);
        let led_radius = cell_size.saturating_sub(led_margin * 2) / 2;
        let max_dimension = panel_width.max(panel_height) * cell_size + led_radius * 2;
        if max_dimension <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    cell_size
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    (f32::from(channel) / 255.0).powf(preview_inverse_gamma)
}

fn linear_to_u16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}
