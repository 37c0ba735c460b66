//! QR codes for share links.
//!
//! Codes use error-correction level Q and are rendered as standalone SVG
//! markup, so they can be written to a file or inlined into a page.

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::{Result, UnlockedError};

/// Pixel size of one QR module.
const MODULE_SIZE: u32 = 6;

/// Renders `data` (normally a share link) as an SVG QR code.
///
/// The XML declaration is left out; the result starts at `<svg`.
///
/// # Errors
///
/// Returns [`UnlockedError::QrCodeError`] if `data` does not fit in a
/// QR code at level Q.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{qr_svg, share_link};
///
/// let link = share_link("https://unlocked.example", "https://medium.com/@a/b").unwrap();
/// let svg = qr_svg(&link).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn qr_svg(data: &str) -> Result<String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::Q)
        .map_err(|e| UnlockedError::QrCodeError(e.to_string()))?;

    let rendered = code
        .render::<svg::Color<'_>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    let svg = match rendered.find("<svg") {
        Some(start) => rendered[start..].to_string(),
        None => rendered,
    };

    debug!(version = ?code.version(), bytes = svg.len(), "rendered qr code");
    Ok(svg)
}
