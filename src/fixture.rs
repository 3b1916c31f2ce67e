//! The end-to-end "load, shift, save" and "fill, copy, verify" scenarios.
//!
//! A [`FixtureConfig`] names the project root, the input and output image
//! files under it, the weight triple, and the copy buffer geometry.
//! Defaults reproduce the canonical run: `In.png` → `Out.png` with weights
//! R 0.5, G 0.3, B 1.0, and a 160 000 element copy at 16-byte alignment.
//!
//! ```no_run
//! use dye::Simd;
//! use dye::fixture::{Fixture, FixtureConfig};
//!
//! let fixture = Fixture::new(FixtureConfig::from_env()?);
//! let shifted = fixture.run_color_shift(&Simd)?;
//! println!("{}x{}", shifted.width(), shifted.height());
//! fixture.run_copy(&Simd)?;
//! # Ok::<(), dye::fixture::FixtureError>(())
//! ```

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::aligned::Alignment;
use crate::codec::{self, CodecError};
use crate::img::ArgbImage;
use crate::oracle::{self, Agreement, CopyCase, Mismatch};
use crate::pixel::ChannelWeights;
use crate::strategy::Kernel;
use crate::SizeError;

/// Overrides the project root when set.
pub const ROOT_ENV: &str = "DYE_FIXTURE_ROOT";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("no project root two levels above {}", cwd.display())]
    NoProjectRoot { cwd: PathBuf },

    #[error("cannot read current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("{kernel} rejected the image: {source}")]
    Kernel {
        kernel: &'static str,
        #[source]
        source: SizeError,
    },

    #[error("copy check failed: {0}")]
    Copy(#[from] Mismatch),

    #[error("no buffer alignment guarantees {bytes} bytes")]
    UnsupportedAlignment { bytes: usize },
}

/// Two directory levels above `cwd`, or `None` if `cwd` is too shallow.
pub fn project_root(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors().nth(2).map(Path::to_path_buf)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureConfig {
    pub root: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub weights: ChannelWeights,
    pub copy_len: usize,
    pub alignment: Alignment,
}

impl FixtureConfig {
    pub const INPUT: &'static str = "In.png";
    pub const OUTPUT: &'static str = "Out.png";
    /// Byte alignment of the canonical copy buffers.
    pub const ALIGNMENT_BYTES: usize = 16;

    /// Canonical settings rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            input: PathBuf::from(Self::INPUT),
            output: PathBuf::from(Self::OUTPUT),
            weights: ChannelWeights::WARM_DOWN,
            copy_len: CopyCase::DEFAULT_LEN,
            alignment: Alignment::Simd16,
        }
    }

    /// Root from `DYE_FIXTURE_ROOT`, else [`project_root`] of the current
    /// directory.
    pub fn from_env() -> Result<Self, FixtureError> {
        resolve_root(std::env::var_os(ROOT_ENV), std::env::current_dir).map(Self::new)
    }

    pub fn with_weights(mut self, weights: ChannelWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_input(mut self, name: impl Into<PathBuf>) -> Self {
        self.input = name.into();
        self
    }

    pub fn with_output(mut self, name: impl Into<PathBuf>) -> Self {
        self.output = name.into();
        self
    }

    pub fn with_copy(mut self, len: usize, alignment: Alignment) -> Self {
        self.copy_len = len;
        self.alignment = alignment;
        self
    }

    /// Copy buffers aligned to at least `bytes`.
    pub fn with_alignment_bytes(mut self, bytes: usize) -> Result<Self, FixtureError> {
        self.alignment =
            Alignment::at_least(bytes).ok_or(FixtureError::UnsupportedAlignment { bytes })?;
        Ok(self)
    }

    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }

    pub fn copy_case(&self) -> CopyCase {
        CopyCase::new(self.copy_len, self.alignment)
    }
}

fn resolve_root(
    env: Option<OsString>,
    cwd: impl FnOnce() -> io::Result<PathBuf>,
) -> Result<PathBuf, FixtureError> {
    if let Some(root) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let cwd = cwd().map_err(FixtureError::CurrentDir)?;
    project_root(&cwd).ok_or(FixtureError::NoProjectRoot { cwd })
}

#[derive(Debug, Clone)]
pub struct Fixture {
    config: FixtureConfig,
}

impl Fixture {
    pub fn new(config: FixtureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Load the input image, weight it with `kernel`, write the output
    /// image, and return what was written.
    pub fn run_color_shift<K: Kernel + ?Sized>(&self, kernel: &K) -> Result<ArgbImage, FixtureError> {
        let input = self.config.input_path();
        let mut img = codec::load_argb(&input)?;
        img.color_shift(kernel, self.config.weights)
            .map_err(|source| FixtureError::Kernel {
                kernel: kernel.name(),
                source,
            })?;
        let output = self.config.output_path();
        codec::save_png(&img, &output)?;
        tracing::debug!(
            kernel = kernel.name(),
            input = %input.display(),
            output = %output.display(),
            "color shift fixture done"
        );
        Ok(img)
    }

    /// Fill, copy and verify the configured float buffers with `kernel`.
    pub fn run_copy<K: Kernel + ?Sized>(&self, kernel: &K) -> Result<Agreement, FixtureError> {
        let case = self.config.copy_case();
        oracle::run_copy(kernel, case)?;
        tracing::debug!(kernel = kernel.name(), len = case.len, alignment = ?case.alignment, "copy fixture done");
        Ok(Agreement { elements: case.len })
    }
}
