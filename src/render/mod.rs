//! # Rendering Pipeline
//!
//! The pixel side of the engine: per-call geometry, QR encoding, text
//! auto-sizing and rasterization, and final compositing.
//!
//! ## Modules
//!
//! - [`context`]: per-call pixel geometry (mm → px at a DPI)
//! - [`layout`]: QR size/anchor formulas and the remaining text area
//! - [`qr`]: payload → module matrix → nearest-neighbor scaled raster
//! - [`autosize`]: largest-fit font size search
//! - [`text`]: multi-line rasterization, alignment, rotation
//! - [`compose`]: final canvas assembly
//! - [`processor`]: the `render()` orchestrator
//!
//! ## Usage Example
//!
//! ```
//! use etiqueta::render::processor::render;
//! use etiqueta::template::{FieldMap, LabelTemplate};
//!
//! let template = LabelTemplate {
//!     text_template: "{part_name}".into(),
//!     ..Default::default()
//! };
//! let mut data = FieldMap::new();
//! data.insert("id".into(), "42".into());
//! data.insert("part_name".into(), "Resistor".into());
//!
//! let label = render(&template, &data, 300).unwrap();
//! assert_eq!((label.width_px, label.height_px), (461, 142));
//! ```

pub mod autosize;
pub mod compose;
pub mod context;
pub mod layout;
pub mod processor;
pub mod qr;
pub mod text;

pub use compose::RenderedLabel;
pub use context::RenderContext;
pub use layout::LayoutDimensions;
pub use processor::render;
