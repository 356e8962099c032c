//! Output file helper types.
//!
//! Each analysis produces a chart and, on request, a JSON report. The names of
//! these files depend on the analysis mode and on the run parameters, so they
//! are centralized here.

use std::{
    fmt::Display,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{cli::CLI, rate::report::RunParams};

/// Which analysis an output file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSubject {
    Sweep,
    Run(RunParams),
}

impl Display for OutputSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSubject::Sweep => write!(f, "performance-sweep"),
            OutputSubject::Run(p) => write!(f, "performance-k-{}-a-{}", p.k, p.alpha),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFile {
    Chart(OutputSubject),
    Report(OutputSubject),
}

impl Display for RateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateFile::Chart(s) => write!(f, "{}.png", s),
            RateFile::Report(s) => write!(f, "{}.json", s),
        }
    }
}

/// An output directory.
///
/// This type provides the I/O interface for files produced by the analysis.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of `f` inside this directory.
    pub fn file_path(&self, f: &RateFile) -> PathBuf {
        self.path.join(f.to_string())
    }

    /// Create and open `f` for writing, truncating any previous version.
    pub fn create_file(&self, f: &RateFile) -> Result<BufWriter<File>> {
        let path = self.file_path(f);

        let file = File::create(&path)
            .with_context(|| format!("Could not create {}", path.display()))?;

        Ok(BufWriter::new(file))
    }

    /// Create the directory pointed by `self.path()` if it does not already
    /// exist.
    pub fn create_dir(&self) -> Result<()> {
        if !self.path.exists() {
            std::fs::create_dir_all(&self.path)
                .with_context(|| format!("Could not create {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl From<&CLI> for OutputDirectory {
    fn from(cli: &CLI) -> Self {
        match &cli.output_dir {
            Some(p) => OutputDirectory::new(p.clone()),
            None => OutputDirectory::new("."),
        }
    }
}
