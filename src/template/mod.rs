//! # Label Template Model
//!
//! The template schema and placeholder resolution. A [`LabelTemplate`]
//! describes a label's physical size and content layout independent of any
//! data record; [`placeholder::resolve`] binds it to one record's fields.
//!
//! ```
//! use etiqueta::template::{LabelTemplate, placeholder, FieldMap};
//!
//! let template = LabelTemplate {
//!     text_template: "{part_name}".into(),
//!     ..Default::default()
//! };
//! let mut data = FieldMap::new();
//! data.insert("part_name".into(), "Resistor".into());
//!
//! let content = placeholder::resolve(&template.text_template, &data).unwrap();
//! assert_eq!(content.text, "Resistor");
//! ```

pub mod placeholder;
pub mod types;

pub use placeholder::{ResolvedContent, resolve};
pub use types::*;
