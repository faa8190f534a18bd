//! CLI definitions and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, warn};

use ufo_convert_core::{
    BatchOutcome, CompilerConfig, ConversionRequest, ExternalCompiler, Formats, TtfBackend,
    config::{DEFAULT_FONTC, DEFAULT_FONTMAKE},
    convert_batch,
};

#[derive(Parser, Debug)]
#[command(name = "ufo-convert", version)]
#[command(about = "Convert UFO font sources to OTF, TTF and WOFF2")]
#[command(after_help = "Examples:\n  \
    ufo-convert -a sources/MyFont-Regular.ufo\n  \
    ufo-convert -c -w -o dist sources/")]
pub struct Cli {
    /// The input .ufo file or folder containing .ufo files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Output base directory (default: the folder containing each .ufo)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Convert .ufo to .otf
    #[arg(short, long)]
    pub convert: bool,
    /// Convert .ufo to .woff2
    #[arg(short, long)]
    pub woff: bool,
    /// Convert .ufo to .ttf
    #[arg(short, long)]
    pub ttf: bool,
    /// Convert .ufo to all formats
    #[arg(short, long)]
    pub all: bool,
    /// Keep converting the rest of a folder after a file fails
    #[arg(short, long)]
    pub keep_going: bool,
    /// Compiler used for TTF output
    #[arg(long, value_enum, default_value_t = TtfBackendArg::Fontmake)]
    pub ttf_backend: TtfBackendArg,
    /// fontmake executable
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_FONTMAKE)]
    pub fontmake: String,
    /// fontc executable
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_FONTC)]
    pub fontc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TtfBackendArg {
    Fontmake,
    Fontc,
}

impl From<TtfBackendArg> for TtfBackend {
    fn from(arg: TtfBackendArg) -> Self {
        match arg {
            TtfBackendArg::Fontmake => TtfBackend::Fontmake,
            TtfBackendArg::Fontc => TtfBackend::Fontc,
        }
    }
}

impl Cli {
    pub fn formats(&self) -> Formats {
        if self.all {
            return Formats::ALL;
        }
        Formats { otf: self.convert, ttf: self.ttf, woff2: self.woff }
    }

    pub fn request(&self) -> ConversionRequest {
        let request = ConversionRequest::new(&self.input, self.formats()).keep_going(self.keep_going);
        match &self.output {
            Some(dir) => request.with_output_dir(dir),
            None => request,
        }
    }

    pub fn compiler_config(&self) -> CompilerConfig {
        CompilerConfig {
            fontmake: self.fontmake.clone(),
            fontc: self.fontc.clone(),
            ttf_backend: self.ttf_backend.into(),
        }
    }

    pub fn run(self) -> Result<()> {
        let request = self.request();
        if request.formats.is_empty() {
            warn!("No output format selected (use -c, -t, -w or -a); nothing to do");
            return Ok(());
        }
        debug!("{request:?}");

        let compiler = ExternalCompiler::new(self.compiler_config());
        match convert_batch(&request, &compiler)? {
            BatchOutcome::NotFound => {}
            BatchOutcome::Converted(result) => result.ok_or_bail()?,
        }
        Ok(())
    }
}
