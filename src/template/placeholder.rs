//! Placeholder resolution: `{field}` substitution and QR payload extraction.
//!
//! A single pass over the text template replaces `{name}` tokens from the
//! field map, strips `{qr}` / `{qr=name}` tokens, and determines the QR
//! payload string. Tokens without a matching field stay verbatim — flagging
//! unresolved placeholders is a caller concern, not a render failure.

use crate::EtiquetaError;
use crate::template::types::FieldMap;

/// Record-locator prefix applied to payloads derived from `id` / `part_id`.
const PAYLOAD_PREFIX: &str = "MM:";

/// Payload used when the data record has no fields at all.
const PAYLOAD_DEFAULT: &str = "MM:UNKNOWN";

/// Output of placeholder resolution: display text plus the QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Text with placeholders substituted and QR tokens stripped.
    pub text: String,
    /// The string to encode into the QR module matrix.
    pub qr_payload: String,
}

/// Resolve a text template against a field map.
///
/// - `{name}` present in the map → replaced by the stringified value.
/// - `{name}` absent from the map → left verbatim.
/// - `{qr}` → stripped; payload follows the default resolution chain.
/// - `{qr=name}` → stripped; payload is the raw value of `name`, and a
///   missing `name` is a [`EtiquetaError::Data`] error raised immediately.
/// - Literal `\n` sequences become line breaks.
pub fn resolve(template: &str, data: &FieldMap) -> Result<ResolvedContent, EtiquetaError> {
    let mut text = String::with_capacity(template.len());
    let mut qr_field: Option<String> = None;

    let mut rest = template;
    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            // Unterminated brace: keep the remainder verbatim
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let token = &after_open[..close];
        rest = &after_open[close + 1..];

        if token == "qr" {
            // Stripped; payload comes from the default chain
            continue;
        }
        if let Some(name) = token.strip_prefix("qr=") {
            match data.get(name) {
                Some(value) => qr_field = Some(value.to_string()),
                None => {
                    return Err(EtiquetaError::Data(format!(
                        "QR field '{}' is not present in the data record",
                        name
                    )));
                }
            }
            continue;
        }
        match data.get(token) {
            Some(value) => text.push_str(&value.to_string()),
            // Not in the map: keep the token verbatim
            None => {
                text.push('{');
                text.push_str(token);
                text.push('}');
            }
        }
    }
    text.push_str(rest);

    let qr_payload = match qr_field {
        Some(value) => value,
        None => default_payload(data),
    };

    Ok(ResolvedContent {
        text: text.replace("\\n", "\n"),
        qr_payload,
    })
}

/// Default QR payload resolution: `id` → `part_id` → first available field
/// → fixed default.
///
/// `id` / `part_id` values carry the `MM:` record-locator prefix. The
/// first-available fallback takes the lexicographically smallest key so the
/// choice is deterministic for identical inputs.
fn default_payload(data: &FieldMap) -> String {
    for key in ["id", "part_id"] {
        if let Some(value) = data.get(key) {
            return format!("{}{}", PAYLOAD_PREFIX, value);
        }
    }
    data.keys()
        .min_by(|a, b| a.cmp(b))
        .and_then(|k| data.get(k))
        .map(|v| v.to_string())
        .unwrap_or_else(|| PAYLOAD_DEFAULT.to_string())
}
