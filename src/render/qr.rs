//! QR payload encoding and pixel scaling.
//!
//! The payload is encoded at error-correction level L — small-format labels
//! trade redundancy for data capacity, and the module matrix stays as
//! coarse as possible so each module prints large. The matrix is scaled to
//! the exact target pixel size with nearest-neighbor sampling; smoothing
//! would blur module edges and hurt scan reliability.

use image::{Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};

use crate::EtiquetaError;

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// Encode a payload into a square raster of exactly `target_px` pixels.
///
/// A payload exceeding the matrix capacity at level L is a
/// [`EtiquetaError::Render`] error, never a truncated code.
pub fn encode(payload: &str, target_px: u32) -> Result<RgbImage, EtiquetaError> {
    if target_px == 0 {
        return Err(EtiquetaError::Render(
            "QR target size must be positive".to_string(),
        ));
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
        .map_err(|e| EtiquetaError::Render(format!("QR encoding failed: {}", e)))?;

    let modules = code.width();
    let mut raster = RgbImage::from_pixel(target_px, target_px, LIGHT);

    // Nearest-neighbor: each target pixel samples exactly one module.
    for py in 0..target_px {
        let my = (py as usize * modules) / target_px as usize;
        for px in 0..target_px {
            let mx = (px as usize * modules) / target_px as usize;
            if code[(mx, my)] == qrcode::Color::Dark {
                raster.put_pixel(px, py, DARK);
            }
        }
    }

    Ok(raster)
}
