//! # Etiqueta - Label Template Rendering Engine
//!
//! Etiqueta converts an abstract label description (physical size, text
//! template, QR settings, rotation, alignment) plus a record of runtime
//! field values into an exact RGB pixel raster for a thermal/label
//! printer. It provides:
//!
//! - **Template model**: serde-enabled label templates with closed enums
//! - **Placeholder resolution**: `{field}` substitution and QR payloads
//! - **Layout**: millimeter-precise QR and text area geometry at any DPI
//! - **Text**: auto-sized, aligned, rotatable TTF rasterization
//! - **QR**: level-L encoding scaled with hard module edges
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::{render, template::{FieldMap, LabelTemplate, QrPosition}};
//!
//! let template = LabelTemplate {
//!     width_mm: 39.0,
//!     height_mm: 12.0,
//!     text_template: "{part_name}".into(),
//!     qr_position: QrPosition::Left,
//!     ..Default::default()
//! };
//!
//! let mut data = FieldMap::new();
//! data.insert("id".into(), "42".into());
//! data.insert("part_name".into(), "Resistor".into());
//!
//! let label = render(&template, &data, 300)?;
//! assert_eq!((label.width_px, label.height_px), (461, 142));
//! let png = label.to_png()?;
//! # let _ = png;
//! # Ok::<(), etiqueta::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template schema and placeholder resolution |
//! | [`render`] | Layout, QR, text rasterization, compositing |
//! | [`font`] | Font candidate chain and cache |
//! | [`error`] | Error types |
//!
//! The engine is a pure, synchronous, CPU-bound function: no state is
//! carried between calls, and independent renders may run concurrently.
//! The only shared resource is the font cache, which is read-through and
//! safe for concurrent access.

pub mod error;
pub mod font;
pub mod render;
pub mod template;

// Re-exports for convenience
pub use error::EtiquetaError;
pub use render::{RenderedLabel, render};
pub use template::LabelTemplate;
