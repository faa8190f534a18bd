//! Compilation of UFO sources by external font compilers.
//!
//! [`FontCompiler`] is the seam between the batch converter and the tools
//! that actually build binary fonts. [`ExternalCompiler`] runs `fontmake`
//! (and optionally `fontc`) as child processes and hands back the bytes of
//! the compiled font.

use std::{
    fmt,
    fs::read,
    path::Path,
    process::Command,
    time::Instant,
};

use log::{debug, info};
use tempfile::tempdir;
use ufo_convert_woff2::{SfntFlavor, convert_to_woff2};

use crate::{
    config::{DEFAULT_FONTC, DEFAULT_FONTMAKE},
    error::{Error, Result},
};

/// A binary font a UFO can be compiled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// OpenType with CFF outlines.
    Otf,
    /// TrueType outlines.
    Ttf,
}

impl Target {
    pub fn extension(self) -> &'static str {
        match self {
            Target::Otf => "otf",
            Target::Ttf => "ttf",
        }
    }

    pub fn flavor(self) -> SfntFlavor {
        match self {
            Target::Otf => SfntFlavor::Cff,
            Target::Ttf => SfntFlavor::TrueType,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Otf => f.write_str("OTF"),
            Target::Ttf => f.write_str("TTF"),
        }
    }
}

/// Compiles UFO packages into binary fonts.
pub trait FontCompiler {
    /// Compile the UFO at `ufo` and return the compiled font data.
    fn compile(&self, ufo: &Path, target: Target) -> Result<Vec<u8>>;

    /// Re-flavor compiled sfnt data as WOFF2.
    fn to_woff2(&self, sfnt: &[u8]) -> Result<Vec<u8>> {
        convert_to_woff2(sfnt).map_err(|e| Error::Woff2(format!("{e:#}")))
    }
}

/// Which tool builds TrueType output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TtfBackend {
    #[default]
    Fontmake,
    Fontc,
}

/// Executables used by [`ExternalCompiler`].
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub fontmake: String,
    pub fontc: String,
    pub ttf_backend: TtfBackend,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            fontmake: DEFAULT_FONTMAKE.to_string(),
            fontc: DEFAULT_FONTC.to_string(),
            ttf_backend: TtfBackend::default(),
        }
    }
}

/// Compiles by running external programs.
///
/// Each build gets its own temporary directory, which is removed once the
/// output has been read back.
#[derive(Debug, Clone, Default)]
pub struct ExternalCompiler {
    config: CompilerConfig,
}

impl ExternalCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Build the command line that compiles `ufo` into `output`.
    fn command(&self, ufo: &Path, target: Target, workdir: &Path, output: &Path) -> Command {
        match (target, self.config.ttf_backend) {
            (Target::Ttf, TtfBackend::Fontc) => {
                let mut cmd = Command::new(&self.config.fontc);
                cmd.arg("--build-dir").arg(workdir.join("build")).arg("-o").arg(output).arg(ufo);
                cmd
            }
            _ => {
                let mut cmd = Command::new(&self.config.fontmake);
                cmd.arg("-u")
                    .arg(ufo)
                    .arg("-o")
                    .arg(target.extension())
                    .arg("--output-path")
                    .arg(output);
                cmd
            }
        }
    }
}

impl FontCompiler for ExternalCompiler {
    fn compile(&self, ufo: &Path, target: Target) -> Result<Vec<u8>> {
        let workdir =
            tempdir().map_err(|e| Error::io("Failed to create temporary build directory", e))?;
        let output = workdir.path().join(format!("font.{}", target.extension()));

        let mut cmd = self.command(ufo, target, workdir.path(), &output);
        let program = cmd.get_program().to_string_lossy().into_owned();
        debug!("Running {cmd:?}");

        let start = Instant::now();
        let result = cmd
            .output()
            .map_err(|source| Error::ToolLaunch { program: program.clone(), source })?;

        if !result.status.success() {
            return Err(Error::ToolFailed {
                program,
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        info!(
            "{program} built {target} for {} in {:.2}s",
            ufo.display(),
            start.elapsed().as_secs_f64()
        );

        let data = read(&output).map_err(|e| {
            Error::io(format!("Failed to read {program} output {}", output.display()), e)
        })?;
        check_artifact(&data, target)
            .map_err(|reason| Error::InvalidArtifact { program, target, reason })?;
        Ok(data)
    }
}

/// Check that `data` is a parseable sfnt with the outline flavor `target` implies.
pub fn check_artifact(data: &[u8], target: Target) -> std::result::Result<(), String> {
    let flavor = SfntFlavor::detect(data).map_err(|e| format!("{e:#}"))?;
    if flavor != target.flavor() {
        return Err(format!("expected {} outlines, found {flavor}", target.flavor()));
    }
    Ok(())
}
