//! Template struct types for the label rendering engine.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and JSON deserialization — a template record
//! is typically loaded straight from a persistence layer.
//!
//! The enum-like fields of the original dynamic model (layout type,
//! rotation, QR position, alignment) are closed tagged enums here, which
//! removes the "unrecognized string value" class of runtime errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::EtiquetaError;

/// Millimeters per inch, the bridge between physical size and DPI.
pub const MM_PER_INCH: f32 = 25.4;

/// A runtime field value supplied alongside a template.
///
/// The original model passed an untyped dict; a closed scalar variant set
/// keeps stringification explicit and field presence statically checkable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

/// The field→value record a label is rendered against.
pub type FieldMap = HashMap<String, FieldValue>;

/// Structural arrangement of a label's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    /// Text only; a QR code is never rendered even if `qr_enabled` is set.
    TextOnly,
    /// QR code only; the text template is ignored.
    QrOnly,
    /// QR code beside normally flowed text.
    #[default]
    QrTextHorizontal,
    /// QR code with text laid out one character per line.
    QrTextVertical,
    /// QR code and text, geometry fully driven by `qr_position`.
    Combined,
}

impl LayoutType {
    /// Whether this layout renders text.
    pub fn has_text(self) -> bool {
        !matches!(self, LayoutType::QrOnly)
    }

    /// Whether this layout renders a QR code (when `qr_enabled`).
    pub fn has_qr(self) -> bool {
        !matches!(self, LayoutType::TextOnly)
    }

    /// Whether text is exploded into one-character lines.
    pub fn vertical_text(self) -> bool {
        matches!(self, LayoutType::QrTextVertical)
    }
}

/// Rotation of the rendered text block, in 90° steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRotation {
    #[default]
    #[serde(rename = "0")]
    None,
    #[serde(rename = "90")]
    Quarter,
    #[serde(rename = "180")]
    Half,
    #[serde(rename = "270")]
    ThreeQuarter,
}

impl TextRotation {
    /// Rotation angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            TextRotation::None => 0,
            TextRotation::Quarter => 90,
            TextRotation::Half => 180,
            TextRotation::ThreeQuarter => 270,
        }
    }
}

/// Per-line horizontal alignment of text within its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Where the QR code is anchored on the label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrPosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Horizontal anchor component of a [`QrPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// Vertical anchor component of a [`QrPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

impl QrPosition {
    /// Decompose into independent axis anchors.
    ///
    /// Side positions center on the perpendicular axis; corners combine
    /// the two side formulas.
    pub fn anchors(self) -> (HorizontalAnchor, VerticalAnchor) {
        match self {
            QrPosition::Left => (HorizontalAnchor::Left, VerticalAnchor::Center),
            QrPosition::Right => (HorizontalAnchor::Right, VerticalAnchor::Center),
            QrPosition::Top => (HorizontalAnchor::Center, VerticalAnchor::Top),
            QrPosition::Bottom => (HorizontalAnchor::Center, VerticalAnchor::Bottom),
            QrPosition::Center => (HorizontalAnchor::Center, VerticalAnchor::Center),
            QrPosition::TopLeft => (HorizontalAnchor::Left, VerticalAnchor::Top),
            QrPosition::TopRight => (HorizontalAnchor::Right, VerticalAnchor::Top),
            QrPosition::BottomLeft => (HorizontalAnchor::Left, VerticalAnchor::Bottom),
            QrPosition::BottomRight => (HorizontalAnchor::Right, VerticalAnchor::Bottom),
        }
    }

    /// Whether this is a corner position (reduces the text area only on
    /// the matching horizontal side).
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            QrPosition::TopLeft
                | QrPosition::TopRight
                | QrPosition::BottomLeft
                | QrPosition::BottomRight
        )
    }
}

fn default_font_size() -> f32 {
    12.0
}

fn default_min_font_size() -> f32 {
    6.0
}

fn default_max_font_size() -> f32 {
    24.0
}

fn default_true() -> bool {
    true
}

fn default_font_family() -> String {
    "default".to_string()
}

/// Font selection and sizing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family resolved through the font resolver's candidate chain.
    #[serde(default = "default_font_family")]
    pub family: String,
    /// Fixed point size used when `auto_size` is off.
    #[serde(default = "default_font_size")]
    pub size: f32,
    /// Lower bound for auto-sizing (and the overflow fallback size).
    #[serde(default = "default_min_font_size")]
    pub min_size: f32,
    /// Upper bound for auto-sizing.
    #[serde(default = "default_max_font_size")]
    pub max_size: f32,
    /// Pick the largest size in `[min_size, max_size]` that fits.
    #[serde(default = "default_true")]
    pub auto_size: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size: default_font_size(),
            min_size: default_min_font_size(),
            max_size: default_max_font_size(),
            auto_size: true,
        }
    }
}

fn default_margin_mm() -> f32 {
    1.0
}

fn default_gap_mm() -> f32 {
    1.0
}

/// Physical spacing: outer margins and the gap between QR and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingConfig {
    /// Uniform outer margin in millimeters.
    #[serde(default = "default_margin_mm")]
    pub margin_mm: f32,
    /// Gap between the QR footprint and the text area in millimeters.
    #[serde(default = "default_gap_mm")]
    pub gap_mm: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            margin_mm: default_margin_mm(),
            gap_mm: default_gap_mm(),
        }
    }
}

fn default_qr_scale() -> f32 {
    0.9
}

fn default_qr_min_size_mm() -> f32 {
    5.0
}

/// A reusable description of a label's physical size and content layout,
/// independent of any specific data record.
///
/// Immutable input to a render call; the engine never mutates it.
///
/// ## Example
///
/// ```
/// use etiqueta::template::LabelTemplate;
///
/// let template = LabelTemplate {
///     width_mm: 39.0,
///     height_mm: 12.0,
///     text_template: "{part_name}".into(),
///     ..Default::default()
/// };
/// assert!(template.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplate {
    /// Physical width in millimeters (must be > 0).
    pub width_mm: f32,
    /// Physical height in millimeters (must be > 0).
    pub height_mm: f32,
    #[serde(default)]
    pub layout_type: LayoutType,
    /// Text with `{field}` placeholders and optional `{qr}` / `{qr=field}` tokens.
    #[serde(default)]
    pub text_template: String,
    #[serde(default)]
    pub text_rotation: TextRotation,
    #[serde(default)]
    pub text_alignment: TextAlignment,
    #[serde(default = "default_true")]
    pub qr_enabled: bool,
    #[serde(default)]
    pub qr_position: QrPosition,
    /// Fraction of the smaller available dimension the QR targets (0, 1].
    #[serde(default = "default_qr_scale")]
    pub qr_scale: f32,
    /// Scannability floor: the QR never renders smaller than this.
    #[serde(default = "default_qr_min_size_mm")]
    pub qr_min_size_mm: f32,
    /// Maximum whitespace allowed around the QR inside its slot.
    #[serde(default)]
    pub qr_max_margin_mm: f32,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub spacing: SpacingConfig,
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self {
            width_mm: 39.0,
            height_mm: 12.0,
            layout_type: LayoutType::default(),
            text_template: String::new(),
            text_rotation: TextRotation::default(),
            text_alignment: TextAlignment::default(),
            qr_enabled: true,
            qr_position: QrPosition::default(),
            qr_scale: default_qr_scale(),
            qr_min_size_mm: default_qr_min_size_mm(),
            qr_max_margin_mm: 0.0,
            font: FontConfig::default(),
            spacing: SpacingConfig::default(),
        }
    }
}

impl LabelTemplate {
    /// Validate the template before any rendering work.
    ///
    /// Callers (e.g. an HTTP layer persisting templates) can reject a bad
    /// template up front; the processor also runs this on every render.
    pub fn validate(&self) -> Result<(), EtiquetaError> {
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 {
            return Err(EtiquetaError::Validation(format!(
                "label dimensions must be positive, got {}x{} mm",
                self.width_mm, self.height_mm
            )));
        }
        if self.layout_type.has_text() && self.text_template.trim().is_empty() {
            return Err(EtiquetaError::Validation(format!(
                "layout {:?} requires a non-empty text template",
                self.layout_type
            )));
        }
        if !(self.qr_scale > 0.0 && self.qr_scale <= 1.0) {
            return Err(EtiquetaError::Validation(format!(
                "qr_scale must be in (0, 1], got {}",
                self.qr_scale
            )));
        }
        if self.qr_min_size_mm <= 0.0 {
            return Err(EtiquetaError::Validation(format!(
                "qr_min_size_mm must be positive, got {}",
                self.qr_min_size_mm
            )));
        }
        if self.qr_max_margin_mm < 0.0 {
            return Err(EtiquetaError::Validation(format!(
                "qr_max_margin_mm must be non-negative, got {}",
                self.qr_max_margin_mm
            )));
        }
        if self.renders_qr() && self.qr_min_size_mm > self.width_mm.min(self.height_mm) {
            return Err(EtiquetaError::Validation(format!(
                "qr_min_size_mm ({}) exceeds the label's smaller dimension ({})",
                self.qr_min_size_mm,
                self.width_mm.min(self.height_mm)
            )));
        }
        if self.font.min_size <= 0.0 || self.font.max_size < self.font.min_size {
            return Err(EtiquetaError::Validation(format!(
                "font size range [{}, {}] is invalid",
                self.font.min_size, self.font.max_size
            )));
        }
        if self.spacing.margin_mm < 0.0 || self.spacing.gap_mm < 0.0 {
            return Err(EtiquetaError::Validation(
                "margins and gap must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a QR code will actually be rendered for this template.
    pub fn renders_qr(&self) -> bool {
        self.qr_enabled && self.layout_type.has_qr()
    }

    /// Whether text will actually be rendered for this template.
    pub fn renders_text(&self) -> bool {
        self.layout_type.has_text() && !self.text_template.trim().is_empty()
    }
}
