//! Auto-sizing: find the largest font size whose text fits a bounding box.
//!
//! The search walks integer point sizes from `max_size` down to `min_size`
//! and accepts the first size where the stacked line height fits the box
//! height and every non-empty line fits the box width. Nothing fits →
//! fall back to `min_size`; overflow is tolerated (the caller's canvas
//! bounds clip it) but rendering never fails over text size.

use ab_glyph::{Font, FontArc, ScaleFont};

use crate::template::FontConfig;

/// Advance width of a line at the given point size.
pub fn line_width(font: &FontArc, size: f32, line: &str) -> f32 {
    let scaled = font.as_scaled(size);
    line.chars()
        .map(|ch| scaled.h_advance(font.glyph_id(ch)))
        .sum()
}

/// Height of one text line at the given point size, including line gap.
pub fn line_height(font: &FontArc, size: f32) -> f32 {
    let scaled = font.as_scaled(size);
    scaled.height() + scaled.line_gap()
}

/// Pick the rendering size for a block of lines in a `box_width` ×
/// `box_height` area.
///
/// Deterministic: identical inputs always produce the same size.
pub fn choose_size(
    lines: &[String],
    box_width: u32,
    box_height: u32,
    font: &FontArc,
    config: &FontConfig,
) -> f32 {
    if !config.auto_size {
        return config.size;
    }

    let max = config.max_size.floor() as i32;
    let min = config.min_size.ceil() as i32;
    let mut size = max;
    while size >= min {
        if fits(lines, box_width, box_height, font, size as f32) {
            return size as f32;
        }
        size -= 1;
    }
    config.min_size
}

/// Whether every line fits the box at a candidate size.
fn fits(lines: &[String], box_width: u32, box_height: u32, font: &FontArc, size: f32) -> bool {
    let total_height = lines.len() as f32 * line_height(font, size);
    if total_height > box_height as f32 {
        return false;
    }
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .all(|line| line_width(font, size, line) <= box_width as f32)
}
