//! Font registration for the `ab_glyph` text path, which does not discover OS fonts.

use log::{debug, warn};
use plotters::style::FontStyle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const FALLBACK_FONTS: [&str; 6] = [
    "assets/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register a "sans-serif" font once per process. Returns whether text can be drawn.
///
/// `preferred` is only consulted on the first call.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FALLBACK_FONTS.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = fs::read(&path) else { continue };
            // plotters keeps the font for the life of the process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                debug!("registered chart font {}", path.display());
                return true;
            }
        }
        warn!("no usable TrueType font found; charts are drawn without captions and labels");
        false
    })
}
