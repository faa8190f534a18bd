//! Output formats and the immutable conversion request.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::config::{OTF_FOLDER, TTF_FOLDER, WOFF2_FOLDER};

/// A compiled output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Otf,
    Ttf,
    Woff2,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Otf => "otf",
            Format::Ttf => "ttf",
            Format::Woff2 => "woff2",
        }
    }

    /// Subfolder of the output directory this format is written to.
    pub fn folder(self) -> &'static str {
        match self {
            Format::Otf => OTF_FOLDER,
            Format::Ttf => TTF_FOLDER,
            Format::Woff2 => WOFF2_FOLDER,
        }
    }

    /// `{output_dir}/{folder}/{font_name}.{extension}`
    pub fn output_path(self, output_dir: &Path, font_name: &str) -> PathBuf {
        output_dir.join(self.folder()).join(format!("{font_name}.{}", self.extension()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Otf => f.write_str("OTF"),
            Format::Ttf => f.write_str("TTF"),
            Format::Woff2 => f.write_str("WOFF2"),
        }
    }
}

/// The set of output formats enabled for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formats {
    pub otf: bool,
    pub ttf: bool,
    pub woff2: bool,
}

impl Formats {
    pub const ALL: Self = Self { otf: true, ttf: true, woff2: true };
    pub const NONE: Self = Self { otf: false, ttf: false, woff2: false };

    pub fn is_empty(&self) -> bool {
        !(self.otf || self.ttf || self.woff2)
    }

    /// WOFF2 is re-flavored from the OTF build, so either one needs it.
    pub fn needs_otf_build(&self) -> bool {
        self.otf || self.woff2
    }
}

/// What to convert and where to put it. Built once per run.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// A `.ufo` package or a directory containing them.
    pub input: PathBuf,
    /// Base output directory; `None` writes next to each source.
    pub output_dir: Option<PathBuf>,
    pub formats: Formats,
    /// Continue a directory batch after a package fails.
    pub keep_going: bool,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>, formats: Formats) -> Self {
        Self { input: input.into(), output_dir: None, formats, keep_going: false }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// Resolve the base output directory for one UFO package.
pub fn output_dir_for(ufo: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => ufo.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}
