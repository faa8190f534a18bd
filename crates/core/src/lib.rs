//! UFO Convert Core - batch conversion of UFO font sources into OTF, TTF and
//! WOFF2 files.
//!
//! The binary font formats are built by external compilers behind the
//! [`FontCompiler`] trait; this crate loads the sources, names the outputs
//! and lays them out under per-format folders.

pub mod compile;
pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod request;
pub mod source;

pub use compile::{CompilerConfig, ExternalCompiler, FontCompiler, Target, TtfBackend};
pub use convert::{BatchOutcome, BatchResult, ConversionReport, convert_batch, convert_one};
pub use error::{Error, Result};
pub use request::{ConversionRequest, Format, Formats};
pub use source::{FontSource, resolve_name};
