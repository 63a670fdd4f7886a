//! Compositing: assemble the final label raster from child rasters.
//!
//! The compositor allocates a fresh white canvas per call sized exactly to
//! the label's pixel dimensions and pastes the QR and text rasters at their
//! computed positions. It performs no resizing or clipping of its own; a
//! child raster that does not fit its allocated area is an upstream defect.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::EtiquetaError;
use crate::render::context::RenderContext;
use crate::render::layout::LayoutDimensions;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// The finished raster, owned exclusively by the caller.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub width_px: u32,
    pub height_px: u32,
    image: RgbImage,
}

impl RenderedLabel {
    /// Borrow the raw RGB pixel buffer (row-major, 3 bytes per pixel).
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Take ownership of the underlying image.
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Encode the raster as PNG bytes for preview callers.
    pub fn to_png(&self) -> Result<Vec<u8>, EtiquetaError> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| EtiquetaError::Render(format!("PNG encoding failed: {}", e)))?;
        Ok(buffer.into_inner())
    }
}

/// Assemble the final label from the QR raster and the text raster.
pub fn compose(
    ctx: &RenderContext,
    layout: &LayoutDimensions,
    qr_raster: Option<&RgbImage>,
    text_raster: Option<&RgbaImage>,
) -> RenderedLabel {
    let mut canvas = RgbImage::from_pixel(ctx.label_width_px, ctx.label_height_px, BACKGROUND);

    if let (Some(raster), Some(slot)) = (qr_raster, layout.qr) {
        debug_assert_eq!(raster.width(), slot.size_px);
        debug_assert_eq!(raster.height(), slot.size_px);
        paste_opaque(&mut canvas, raster, slot.x, slot.y);
    }

    if let Some(raster) = text_raster {
        debug_assert_eq!(raster.width(), layout.text_width);
        debug_assert_eq!(raster.height(), layout.text_height);
        overlay_alpha(&mut canvas, raster, layout.text_x, layout.text_y);
    }

    RenderedLabel {
        width_px: canvas.width(),
        height_px: canvas.height(),
        image: canvas,
    }
}

/// Paste an opaque raster, replacing canvas pixels.
fn paste_opaque(canvas: &mut RgbImage, raster: &RgbImage, at_x: u32, at_y: u32) {
    for (x, y, pixel) in raster.enumerate_pixels() {
        canvas.put_pixel(at_x + x, at_y + y, *pixel);
    }
}

/// Alpha-blend a transparent raster over the canvas.
fn overlay_alpha(canvas: &mut RgbImage, raster: &RgbaImage, at_x: u32, at_y: u32) {
    for (x, y, pixel) in raster.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        if alpha == 0.0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(at_x + x, at_y + y);
        for c in 0..3 {
            let blended = pixel[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = blended.round() as u8;
        }
    }
}
