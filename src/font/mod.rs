//! # Font Resolver
//!
//! Loads and caches font faces from an ordered list of candidate files.
//! Resolution is a pure lookup: a family name maps to candidate paths
//! (family-specific files in the system font directories, then the default
//! fallback chain), and the first candidate that loads wins.
//!
//! The cache is read-through with idempotent overwrite: a first-load race
//! loads the same immutable font data twice and the last insert wins, which
//! is harmless. Once loaded, a [`FontArc`] is shared read-only across
//! concurrent render calls.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

use ab_glyph::FontArc;

use crate::EtiquetaError;

/// Directories scanned for family-specific font files, in order.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/noto",
    "/usr/share/fonts/truetype/freefont",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

/// The fallback chain consulted when no family-specific file loads.
/// Order is observable behavior: the first file that exists and parses wins.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

fn cache() -> &'static RwLock<HashMap<String, FontArc>> {
    static CACHE: OnceLock<RwLock<HashMap<String, FontArc>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve a font family to a loaded face, consulting the cache first.
///
/// `"default"` (or an empty family) goes straight to the fallback chain.
/// Any other family first tries `<family>.ttf` (spaces kept and stripped)
/// in the known font directories, then the fallback chain — so an unknown
/// family degrades to the default face instead of failing the render.
///
/// Fails with [`EtiquetaError::Font`] only when every candidate fails.
pub fn resolve(family: &str) -> Result<FontArc, EtiquetaError> {
    let key = if family.trim().is_empty() {
        "default"
    } else {
        family.trim()
    };

    if let Some(font) = cache().read().expect("font cache poisoned").get(key) {
        return Ok(font.clone());
    }

    let font = load_first(&candidate_paths(key)).ok_or_else(|| {
        EtiquetaError::Font(format!(
            "no loadable font for family '{}' (tried family files and {} fallbacks)",
            key,
            FALLBACK_FONTS.len()
        ))
    })?;

    cache()
        .write()
        .expect("font cache poisoned")
        .insert(key.to_string(), font.clone());
    Ok(font)
}

/// Build the ordered candidate list for a family.
fn candidate_paths(family: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if family != "default" {
        let compact: String = family.chars().filter(|c| !c.is_whitespace()).collect();
        for dir in FONT_DIRS {
            paths.push(PathBuf::from(dir).join(format!("{}.ttf", family)));
            if compact != family {
                paths.push(PathBuf::from(dir).join(format!("{}.ttf", compact)));
            }
        }
    }
    paths.extend(FALLBACK_FONTS.iter().map(PathBuf::from));
    paths
}

/// Try each candidate in order; first successful parse wins.
fn load_first(paths: &[PathBuf]) -> Option<FontArc> {
    for path in paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        if let Ok(font) = FontArc::try_from_vec(bytes) {
            return Some(font);
        }
    }
    None
}
