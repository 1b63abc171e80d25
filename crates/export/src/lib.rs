//! Export helpers: JSON handoff records, visualizer launch, and CSV plot samples.
//!
//! Writing a record and launching the visualizer are separate steps. A record that was
//! written stays written even when the visualizer cannot be started.

pub mod record;
pub mod series;

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use serde_json::to_writer_pretty;
use thiserror::Error;
use tracing::{info, warn};

pub use record::*;

/// File name every handoff directory uses.
pub const DATA_FILE: &str = "data.json";

/// Failure to produce an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize record for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write CSV samples: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure to start the external visualizer. Never affects an export that already happened.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("visualizer '{}' is unavailable: {source}", program.display())]
    Unavailable {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("visualizer '{}' failed to start: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Visualizer projects that consume handoff files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffTarget {
    Orbits,
    Kepler,
    BinaryStars,
    Roche,
    Escape,
    Gravity,
    Pong,
    BlackHole,
    Luminosity,
    Parallax,
}

impl HandoffTarget {
    pub const ALL: [HandoffTarget; 10] = [
        HandoffTarget::Orbits,
        HandoffTarget::Kepler,
        HandoffTarget::BinaryStars,
        HandoffTarget::Roche,
        HandoffTarget::Escape,
        HandoffTarget::Gravity,
        HandoffTarget::Pong,
        HandoffTarget::BlackHole,
        HandoffTarget::Luminosity,
        HandoffTarget::Parallax,
    ];

    /// Directory below the output root that holds this target's project and data file.
    pub fn subdir(&self) -> &'static str {
        match self {
            HandoffTarget::Orbits => "orbits",
            HandoffTarget::Kepler => "kepler",
            HandoffTarget::BinaryStars => "binary_stars",
            HandoffTarget::Roche => "roche",
            HandoffTarget::Escape => "escape",
            HandoffTarget::Gravity => "gravity",
            HandoffTarget::Pong => "pong",
            HandoffTarget::BlackHole => "blackhole",
            HandoffTarget::Luminosity => "luminosity",
            HandoffTarget::Parallax => "parallax",
        }
    }

    /// Every target except `kepler` reads a data file; `kepler` is launched as-is.
    pub fn writes_data(&self) -> bool {
        !matches!(self, HandoffTarget::Kepler)
    }

    /// Look a target up by its directory name.
    pub fn from_subdir(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.subdir().eq_ignore_ascii_case(name))
    }

    pub fn project_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(self.subdir())
    }

    pub fn data_file(&self, output_root: &Path) -> PathBuf {
        self.project_dir(output_root).join(DATA_FILE)
    }
}

impl fmt::Display for HandoffTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// Result of a write-then-launch handoff.
#[derive(Debug)]
pub struct HandoffOutcome {
    /// Path of the record that was written.
    pub path: PathBuf,
    /// Whether the visualizer could be started.
    pub visualizer: Result<(), HandoffError>,
}

/// Serialize `record` as pretty JSON to `path`, replacing any previous file.
///
/// Parent directories are created when missing.
pub fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<PathBuf, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    to_writer_pretty(&mut writer, record).map_err(|source| ExportError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    info!(path = %path.display(), "wrote handoff record");
    Ok(path.to_path_buf())
}

/// Start `visualizer` with the absolute `project_dir` as its only argument.
///
/// The child is left running; only the ability to start it is reported.
pub fn launch(visualizer: &Path, project_dir: &Path) -> Result<(), HandoffError> {
    let dir = std::path::absolute(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
    let spawned = Command::new(visualizer)
        .arg(&dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => {
            info!(pid = child.id(), project = %dir.display(), "visualizer launched");
            Ok(())
        }
        Err(source) => {
            let program = visualizer.to_path_buf();
            let err = match source.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    HandoffError::Unavailable { program, source }
                }
                _ => HandoffError::Spawn { program, source },
            };
            warn!(%err, "visualizer launch failed");
            Err(err)
        }
    }
}

/// Write `record` to the target's data file, then try to launch the visualizer on it.
pub fn handoff<T: Serialize>(
    output_root: &Path,
    visualizer: &Path,
    target: HandoffTarget,
    record: &T,
) -> Result<HandoffOutcome, ExportError> {
    let path = write_record(&target.data_file(output_root), record)?;
    let visualizer = launch(visualizer, &target.project_dir(output_root));
    Ok(HandoffOutcome { path, visualizer })
}
