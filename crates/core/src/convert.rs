//! Batch conversion of UFO packages.

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    compile::{FontCompiler, Target},
    error::{Error, Result},
    io::{FontFile, glob_sources, is_ufo_path},
    request::{ConversionRequest, Format, Formats, output_dir_for},
    source::FontSource,
};

/// Files written for one UFO package.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub font_name: String,
    pub written: Vec<PathBuf>,
}

/// Result of a batch conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn ok_or_bail(&self) -> Result<()> {
        if self.failed > 0 {
            return Err(Error::BatchFailed { succeeded: self.succeeded, failed: self.failed });
        }
        Ok(())
    }
}

/// What [`convert_batch`] found at the input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The input was neither a UFO package nor a directory containing one.
    NotFound,
    Converted(BatchResult),
}

/// Convert a single UFO package into every format in `formats`.
///
/// Output goes to `{output_dir}/{format}/`, where `output_dir` defaults to
/// the directory containing `ufo`. OTF and WOFF2 share one OTF build.
pub fn convert_one(
    ufo: &Path,
    output_dir: Option<&Path>,
    formats: Formats,
    compiler: &dyn FontCompiler,
) -> Result<ConversionReport> {
    let source = FontSource::load(ufo)?;
    let font_name = source.resolve_name();
    let out_dir = output_dir_for(ufo, output_dir);
    let mut written = Vec::new();

    if formats.needs_otf_build() {
        println!("Converting rendered UFO to OTF");
        let otf = compiler.compile(ufo, Target::Otf)?;

        if formats.otf {
            written.push(save(&out_dir, Format::Otf, &font_name, &otf)?);
        }

        if formats.woff2 {
            let woff2 = compiler.to_woff2(&otf)?;
            written.push(save(&out_dir, Format::Woff2, &font_name, &woff2)?);
        }
    }

    if formats.ttf {
        println!("Converting rendered UFO to TTF");
        let ttf = compiler.compile(ufo, Target::Ttf)?;
        written.push(save(&out_dir, Format::Ttf, &font_name, &ttf)?);
    }

    Ok(ConversionReport { source: ufo.to_path_buf(), font_name, written })
}

fn save(out_dir: &Path, format: Format, font_name: &str, data: &[u8]) -> Result<PathBuf> {
    let file = FontFile::new(format.output_path(out_dir, font_name));
    println!("Saving {format} to {}", file.path().display());
    file.write(data)?;
    debug!("Wrote {} bytes to {}", data.len(), file.path().display());
    Ok(file.path().to_path_buf())
}

/// Convert the package or directory of packages named by the request.
///
/// Packages in a directory are converted one at a time in name order. The
/// first failure aborts the batch unless `keep_going` is set, in which case
/// failures are printed and counted in the returned [`BatchResult`].
pub fn convert_batch(
    request: &ConversionRequest,
    compiler: &dyn FontCompiler,
) -> Result<BatchOutcome> {
    let input = request.input.as_path();
    let output_dir = request.output_dir.as_deref();

    if is_ufo_path(input) {
        convert_one(input, output_dir, request.formats, compiler)
            .map_err(|e| e.converting(input))?;
        return Ok(BatchOutcome::Converted(BatchResult { succeeded: 1, failed: 0 }));
    }

    if !input.is_dir() {
        println!("Could not find any .ufo files in {}", input.display());
        return Ok(BatchOutcome::NotFound);
    }

    let sources = glob_sources(input)?;
    if sources.is_empty() {
        println!("Could not find any .ufo files in {}", input.display());
        return Ok(BatchOutcome::NotFound);
    }
    debug!("Found {} UFO packages in {}", sources.len(), input.display());

    let mut result = BatchResult::default();
    for ufo in &sources {
        match convert_one(ufo, output_dir, request.formats, compiler) {
            Ok(report) => {
                debug!(
                    "{} -> {} ({} files)",
                    report.source.display(),
                    report.font_name,
                    report.written.len()
                );
                result.succeeded += 1;
            }
            Err(e) => {
                let e = e.converting(ufo);
                if !request.keep_going {
                    return Err(e);
                }
                eprintln!("{e}");
                result.failed += 1;
            }
        }
    }

    println!("Converted: {} succeeded, {} failed", result.succeeded, result.failed);
    Ok(BatchOutcome::Converted(result))
}
