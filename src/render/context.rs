//! Render context — per-call pixel geometry derived from physical size.
//!
//! Constructed once per render call and discarded after. All mm→px
//! conversions in the pipeline go through [`mm_to_px`] so the rounding
//! identity `label_width_px == round(width_mm / 25.4 * dpi)` holds
//! everywhere.

use crate::template::{LabelTemplate, MM_PER_INCH};

/// Convert a physical millimeter measure to pixels at the given DPI.
pub fn mm_to_px(mm: f32, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * dpi as f32).round() as u32
}

/// Read-only pixel geometry for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub dpi: u32,
    pub label_width_px: u32,
    pub label_height_px: u32,
}

impl RenderContext {
    /// Derive the pixel geometry for a template at a DPI.
    pub fn new(template: &LabelTemplate, dpi: u32) -> Self {
        Self {
            dpi,
            label_width_px: mm_to_px(template.width_mm, dpi),
            label_height_px: mm_to_px(template.height_mm, dpi),
        }
    }
}
