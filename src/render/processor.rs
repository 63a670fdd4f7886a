//! Template processor — the single pure entry point of the engine.
//!
//! Stateless: `render()` carries no state between calls and reads only its
//! inputs plus the read-only font cache, so independent renders can run
//! concurrently without locking. Any validation failure aborts before any
//! rendering work begins; no partial canvas is ever returned.

use crate::EtiquetaError;
use crate::font;
use crate::render::compose::{self, RenderedLabel};
use crate::render::context::RenderContext;
use crate::render::layout;
use crate::render::{autosize, qr, text};
use crate::template::{FieldMap, LabelTemplate, placeholder};

/// Render one template against one data record at the given DPI.
///
/// Pipeline: validate → resolve placeholders → compute context and layout
/// → encode QR (if enabled) → auto-size and rasterize text (if any) →
/// composite.
pub fn render(
    template: &LabelTemplate,
    data: &FieldMap,
    dpi: u32,
) -> Result<RenderedLabel, EtiquetaError> {
    if dpi == 0 {
        return Err(EtiquetaError::Validation("dpi must be positive".to_string()));
    }
    template.validate()?;

    let content = placeholder::resolve(&template.text_template, data)?;

    let ctx = RenderContext::new(template, dpi);
    if ctx.label_width_px == 0 || ctx.label_height_px == 0 {
        return Err(EtiquetaError::Validation(format!(
            "label rounds to zero pixels at {} dpi ({}x{} mm)",
            dpi, template.width_mm, template.height_mm
        )));
    }

    let dims = layout::compute(template, &ctx)?;

    let qr_raster = match dims.qr {
        Some(slot) => Some(qr::encode(&content.qr_payload, slot.size_px)?),
        None => None,
    };

    let text_raster = if template.renders_text() && !content.text.trim().is_empty() {
        let face = font::resolve(&template.font.family)?;
        let lines = text::split_lines(&content.text, template.layout_type.vertical_text());
        let size = autosize::choose_size(
            &lines,
            dims.text_width,
            dims.text_height,
            &face,
            &template.font,
        );
        Some(text::rasterize(
            &lines,
            size,
            &face,
            dims.text_width,
            dims.text_height,
            template.text_alignment,
            template.text_rotation,
        ))
    } else {
        None
    };

    Ok(compose::compose(
        &ctx,
        &dims,
        qr_raster.as_ref(),
        text_raster.as_ref(),
    ))
}
