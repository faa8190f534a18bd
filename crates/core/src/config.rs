//! Configuration constants for UFO conversion.

/// Extension identifying a UFO package, without the leading dot.
pub const UFO_EXTENSION: &str = "ufo";

/// Glob pattern matching UFO packages inside a directory.
pub const UFO_PATTERN: &str = "*.ufo";

/// Output subfolder for CFF-flavored OpenType fonts.
pub const OTF_FOLDER: &str = "otf";

/// Output subfolder for TrueType fonts.
pub const TTF_FOLDER: &str = "ttf";

/// Output subfolder for WOFF2 web fonts.
pub const WOFF2_FOLDER: &str = "woff2";

/// Default fontmake executable, used for OTF and (by default) TTF output.
pub const DEFAULT_FONTMAKE: &str = "fontmake";

/// Default fontc executable, used when TTF output is routed to fontc.
pub const DEFAULT_FONTC: &str = "fontc";
