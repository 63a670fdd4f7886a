//! Text rasterization: anti-aliased multi-line text onto a transparent
//! buffer, with per-line alignment, 90° block rotation, and vertical
//! (one character per line) layout.
//!
//! Glyphs are drawn with coverage accumulation, so overlapping outlines
//! darken instead of overwriting. Rotation renders the tight content block
//! first, rotates the whole buffer (bounds expand exactly, no cropping),
//! and centers the result inside the text area.

use ab_glyph::{Font, FontArc, ScaleFont, point};
use image::{Rgba, RgbaImage, imageops};

use crate::render::autosize::{line_height, line_width};
use crate::template::{TextAlignment, TextRotation};

/// Split resolved text into render lines.
///
/// Vertical mode explodes the string into one-character lines and feeds
/// them through the same multi-line path; it is not a separate algorithm.
pub fn split_lines(text: &str, vertical: bool) -> Vec<String> {
    if vertical {
        text.chars()
            .filter(|c| *c != '\n')
            .map(|c| c.to_string())
            .collect()
    } else {
        text.split('\n').map(|s| s.to_string()).collect()
    }
}

/// Rasterize lines into a transparent buffer of exactly
/// `area_width × area_height` pixels.
///
/// The unrotated content block is aligned horizontally per `alignment` and
/// vertically centered; a rotated block is centered on both axes. Content
/// larger than the area (min-size overflow) is clipped at the area bounds.
pub fn rasterize(
    lines: &[String],
    size: f32,
    font: &FontArc,
    area_width: u32,
    area_height: u32,
    alignment: TextAlignment,
    rotation: TextRotation,
) -> RgbaImage {
    let mut area = RgbaImage::from_pixel(area_width, area_height, Rgba([0, 0, 0, 0]));
    if area_width == 0 || area_height == 0 {
        return area;
    }

    let block = content_block(lines, size, font, alignment);
    let block = match rotation {
        TextRotation::None => block,
        TextRotation::Quarter => imageops::rotate90(&block),
        TextRotation::Half => imageops::rotate180(&block),
        TextRotation::ThreeQuarter => imageops::rotate270(&block),
    };

    let offset_x = match (rotation, alignment) {
        // Unrotated text keeps its alignment against the area edges
        (TextRotation::None, TextAlignment::Left) => 0i64,
        (TextRotation::None, TextAlignment::Center) => {
            (area_width as i64 - block.width() as i64) / 2
        }
        (TextRotation::None, TextAlignment::Right) => area_width as i64 - block.width() as i64,
        // Rotated blocks are centered in the area
        _ => (area_width as i64 - block.width() as i64) / 2,
    };
    let offset_y = (area_height as i64 - block.height() as i64) / 2;

    blit(&mut area, &block, offset_x.max(0), offset_y.max(0));
    area
}

/// Render the tight content block: width of the widest line, stacked line
/// heights, each line aligned within the block width.
pub fn content_block(
    lines: &[String],
    size: f32,
    font: &FontArc,
    alignment: TextAlignment,
) -> RgbaImage {
    let lh = line_height(font, size);
    let widths: Vec<f32> = lines.iter().map(|l| line_width(font, size, l)).collect();
    let block_w = widths.iter().fold(0.0f32, |a, &w| a.max(w)).ceil().max(1.0) as u32;
    let block_h = ((lines.len() as f32 * lh).ceil().max(1.0)) as u32;

    let mut block = RgbaImage::from_pixel(block_w, block_h, Rgba([0, 0, 0, 0]));
    let scaled = font.as_scaled(size);
    let ascent = scaled.ascent();

    for (i, line) in lines.iter().enumerate() {
        let start_x = match alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => (block_w as f32 - widths[i]) / 2.0,
            TextAlignment::Right => block_w as f32 - widths[i],
        };
        let baseline = i as f32 * lh + ascent;
        draw_line(&mut block, font, size, line, start_x, baseline);
    }

    block
}

/// Draw one line of glyphs with coverage accumulation.
fn draw_line(buffer: &mut RgbaImage, font: &FontArc, size: f32, line: &str, x: f32, baseline: f32) {
    let scaled = font.as_scaled(size);
    let mut caret = x;

    for ch in line.chars() {
        let glyph_id = font.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(size, point(caret, baseline));
        caret += scaled.h_advance(glyph_id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, coverage| {
            let x = px as i32 + bounds.min.x as i32;
            let y = py as i32 + bounds.min.y as i32;
            if x < 0 || y < 0 || x >= buffer.width() as i32 || y >= buffer.height() as i32 {
                return;
            }
            let pixel = buffer.get_pixel_mut(x as u32, y as u32);
            let alpha = (coverage * 255.0).round() as u8;
            // Accumulate: overlapping outlines darken, never lighten
            pixel[3] = pixel[3].max(alpha);
        });
    }
}

/// Copy non-transparent pixels of `src` into `dst` at an offset, clipping
/// at the destination bounds.
fn blit(dst: &mut RgbaImage, src: &RgbaImage, offset_x: i64, offset_y: i64) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        let dx = sx as i64 + offset_x;
        let dy = sy as i64 + offset_y;
        if dx < 0 || dy < 0 || dx >= dst.width() as i64 || dy >= dst.height() as i64 {
            continue;
        }
        dst.put_pixel(dx as u32, dy as u32, *pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;
    use pretty_assertions::assert_eq;

    fn test_font() -> FontArc {
        font::resolve("default").unwrap()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ink(buffer: &RgbaImage) -> usize {
        buffer.pixels().filter(|p| p[3] > 0).count()
    }

    #[test]
    fn split_lines_on_newlines() {
        assert_eq!(split_lines("a\nb", false), vec!["a", "b"]);
        assert_eq!(split_lines("abc", false), vec!["abc"]);
    }

    #[test]
    fn split_lines_vertical_explodes_chars() {
        assert_eq!(split_lines("abc", true), vec!["a", "b", "c"]);
        // Newlines are already line breaks; vertical mode drops them
        assert_eq!(split_lines("a\nb", true), vec!["a", "b"]);
    }

    #[test]
    fn rasterize_fills_exact_area() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["Hi"]),
            14.0,
            &font,
            200,
            60,
            TextAlignment::Left,
            TextRotation::None,
        );
        assert_eq!(raster.width(), 200);
        assert_eq!(raster.height(), 60);
        assert!(ink(&raster) > 0);
    }

    #[test]
    fn content_block_has_antialiased_coverage() {
        let font = test_font();
        let block = content_block(&lines(&["Smooth"]), 24.0, &font, TextAlignment::Left);
        let intermediate = block
            .pixels()
            .any(|p| p[3] > 2 && p[3] < 253);
        assert!(intermediate, "expected anti-aliased alpha values");
    }

    #[test]
    fn rotation_swaps_block_bounds() {
        let font = test_font();
        let block = content_block(&lines(&["Resistor"]), 18.0, &font, TextAlignment::Left);
        let rotated = imageops::rotate90(&block);
        assert_eq!(rotated.width(), block.height());
        assert_eq!(rotated.height(), block.width());
    }

    #[test]
    fn quarter_plus_three_quarter_restores_bounds() {
        let font = test_font();
        let block = content_block(&lines(&["Resistor"]), 18.0, &font, TextAlignment::Left);
        let round_trip = imageops::rotate270(&imageops::rotate90(&block));
        assert_eq!(round_trip.width(), block.width());
        assert_eq!(round_trip.height(), block.height());
        // Complementary rotations restore the exact pixels, not just bounds
        assert_eq!(round_trip.as_raw(), block.as_raw());
    }

    #[test]
    fn left_alignment_touches_left_edge() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["W"]),
            20.0,
            &font,
            300,
            60,
            TextAlignment::Left,
            TextRotation::None,
        );
        let leftmost = raster
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, _, _)| x)
            .min()
            .unwrap();
        assert!(leftmost < 5, "leftmost ink at {}", leftmost);
    }

    #[test]
    fn right_alignment_hugs_right_edge() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["W"]),
            20.0,
            &font,
            300,
            60,
            TextAlignment::Right,
            TextRotation::None,
        );
        let rightmost = raster
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, _, _)| x)
            .max()
            .unwrap();
        assert!(rightmost > 250, "rightmost ink at {}", rightmost);
    }

    #[test]
    fn center_alignment_balances_margins() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["II"]),
            20.0,
            &font,
            300,
            60,
            TextAlignment::Center,
            TextRotation::None,
        );
        let xs: Vec<u32> = raster
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, _, _)| x)
            .collect();
        let left = *xs.iter().min().unwrap() as i64;
        let right = *xs.iter().max().unwrap() as i64;
        let imbalance = (left - (300 - 1 - right)).abs();
        assert!(imbalance <= 2, "margin imbalance {}", imbalance);
    }

    #[test]
    fn rotated_text_still_lands_in_area() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["Up"]),
            14.0,
            &font,
            60,
            200,
            TextAlignment::Left,
            TextRotation::Quarter,
        );
        assert_eq!(raster.width(), 60);
        assert_eq!(raster.height(), 200);
        assert!(ink(&raster) > 0);
    }

    #[test]
    fn oversized_content_is_clipped_not_panicking() {
        let font = test_font();
        let raster = rasterize(
            &lines(&["A very long line that overflows"]),
            30.0,
            &font,
            40,
            20,
            TextAlignment::Left,
            TextRotation::None,
        );
        assert_eq!(raster.width(), 40);
        assert_eq!(raster.height(), 20);
    }

    #[test]
    fn vertical_block_is_tall_and_narrow() {
        let font = test_font();
        let horizontal = content_block(&split_lines("abc", false), 16.0, &font, TextAlignment::Center);
        let vertical = content_block(&split_lines("abc", true), 16.0, &font, TextAlignment::Center);
        assert!(vertical.height() > horizontal.height());
        assert!(vertical.width() < horizontal.width());
    }
}
