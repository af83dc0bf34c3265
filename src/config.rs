// Defaults used when no settings file exists yet
pub const APP_NAME: &str = "filmstrip";
pub const APP_DISPLAY_NAME: &str = "Filmstrip";
pub const DEFAULT_WINDOW_WIDTH: u32 = 960;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 540;

/// Name the host registers the carousel's drawing surface under.
pub const SURFACE_NAME: &str = "strip";

/// Extensions accepted when expanding a directory into slide sources.
/// Matches the codecs the image decoder is built with.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "tiff", "webp", "pnm", "qoi", "tga",
];

/// Ring-buffer capacity of the in-memory log kept for panic reports.
pub const MAX_LOG_LINES: usize = 1000;
