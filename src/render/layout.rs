//! Layout calculation: QR size/anchor and the remaining text area.
//!
//! Anchors are axis formulas, not a 9-entry lookup table: a position
//! decomposes into a horizontal and a vertical anchor and the two compose.
//! The text area is the margin-reduced label minus the QR footprint plus
//! inter-element gap, subtracted from whichever side the QR occupies.

use crate::EtiquetaError;
use crate::render::context::{RenderContext, mm_to_px};
use crate::template::{HorizontalAnchor, LabelTemplate, VerticalAnchor};

/// Pixel slot allocated to the QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrSlot {
    pub size_px: u32,
    pub x: u32,
    pub y: u32,
}

/// All pixel geometry computed once per render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDimensions {
    /// QR slot, present only when the template renders a QR code.
    pub qr: Option<QrSlot>,
    pub text_x: u32,
    pub text_y: u32,
    pub text_width: u32,
    pub text_height: u32,
    pub margin_px: u32,
    pub gap_px: u32,
}

/// Compute the layout for a template within a render context.
///
/// Errors with [`EtiquetaError::Render`] when the geometry is infeasible:
/// margins that consume the label, a QR minimum size that cannot fit the
/// available area, or a negative text area for a text-bearing layout.
pub fn compute(
    template: &LabelTemplate,
    ctx: &RenderContext,
) -> Result<LayoutDimensions, EtiquetaError> {
    let width = ctx.label_width_px as i64;
    let height = ctx.label_height_px as i64;
    let margin = mm_to_px(template.spacing.margin_mm, ctx.dpi) as i64;
    let gap = mm_to_px(template.spacing.gap_mm, ctx.dpi) as i64;

    let avail_w = width - 2 * margin;
    let avail_h = height - 2 * margin;
    if avail_w <= 0 || avail_h <= 0 {
        return Err(EtiquetaError::Render(format!(
            "margins leave no drawable area ({}x{} px inside {}x{} px)",
            avail_w, avail_h, width, height
        )));
    }

    let qr = if template.renders_qr() {
        Some(qr_slot(template, ctx, width, height, margin, avail_w, avail_h)?)
    } else {
        None
    };

    // Full margin-reduced area, then carve out the QR's side.
    let mut text_x = margin;
    let mut text_y = margin;
    let mut text_w = avail_w;
    let mut text_h = avail_h;

    if let Some(slot) = qr {
        let size = slot.size_px as i64;
        let qx = slot.x as i64;
        let qy = slot.y as i64;
        let (h_anchor, v_anchor) = template.qr_position.anchors();
        let corner = template.qr_position.is_corner();

        match h_anchor {
            HorizontalAnchor::Left => {
                text_x = qx + size + gap;
                text_w = width - margin - text_x;
            }
            HorizontalAnchor::Right => {
                text_w = qx - gap - margin;
            }
            HorizontalAnchor::Center => {}
        }
        // Corners reduce the text area only on the matching horizontal
        // side; pure top/bottom positions reduce it vertically.
        if !corner {
            match v_anchor {
                VerticalAnchor::Top => {
                    text_y = qy + size + gap;
                    text_h = height - margin - text_y;
                }
                VerticalAnchor::Bottom => {
                    text_h = qy - gap - margin;
                }
                VerticalAnchor::Center => {}
            }
        }
    }

    if template.renders_text() && (text_w <= 0 || text_h <= 0) {
        return Err(EtiquetaError::Render(format!(
            "QR footprint leaves no text area ({}x{} px)",
            text_w, text_h
        )));
    }

    Ok(LayoutDimensions {
        qr,
        text_x: text_x.max(0) as u32,
        text_y: text_y.max(0) as u32,
        text_width: text_w.max(0) as u32,
        text_height: text_h.max(0) as u32,
        margin_px: margin as u32,
        gap_px: gap as u32,
    })
}

/// Size and anchor the QR code.
///
/// Size is the scale fraction of the smaller available dimension, floored
/// at the physical minimum and clamped to the available space. The anchor
/// margin may be tightened by `qr_max_margin_mm` (0 = no cap) so the code
/// never floats further from its edge than the template allows.
fn qr_slot(
    template: &LabelTemplate,
    ctx: &RenderContext,
    width: i64,
    height: i64,
    margin: i64,
    avail_w: i64,
    avail_h: i64,
) -> Result<QrSlot, EtiquetaError> {
    let min_size = mm_to_px(template.qr_min_size_mm, ctx.dpi) as i64;
    let avail = avail_w.min(avail_h);
    if min_size > avail {
        return Err(EtiquetaError::Render(format!(
            "QR minimum size {} px exceeds available area {} px",
            min_size, avail
        )));
    }

    let scaled = (avail as f32 * template.qr_scale).round() as i64;
    let size = scaled.max(min_size).min(avail);

    let qr_margin = if template.qr_max_margin_mm > 0.0 {
        margin.min(mm_to_px(template.qr_max_margin_mm, ctx.dpi) as i64)
    } else {
        margin
    };

    let (h_anchor, v_anchor) = template.qr_position.anchors();
    let x = match h_anchor {
        HorizontalAnchor::Left => qr_margin,
        HorizontalAnchor::Center => (width - size) / 2,
        HorizontalAnchor::Right => width - qr_margin - size,
    };
    let y = match v_anchor {
        VerticalAnchor::Top => qr_margin,
        VerticalAnchor::Center => (height - size) / 2,
        VerticalAnchor::Bottom => height - qr_margin - size,
    };

    Ok(QrSlot {
        size_px: size as u32,
        x: x.max(0) as u32,
        y: y.max(0) as u32,
    })
}
