use std::path::Path;
use std::process::{Command, Stdio};

pub mod batch;
pub mod clip;
pub mod command;
pub mod error;
pub mod filters;
pub mod graph;
pub mod job;
pub mod logging;
pub mod movie;
pub mod options;
pub mod time;

use command::{CompiledCommand, FFMPEG_BIN};
use error::ReelError;
use job::{Job, JobStatus};

pub fn run(command: &CompiledCommand) -> Result<Job, ReelError> {
    let args = command.to_args()?;
    let mut job = Job::new();
    job.start();

    tracing::info!(
        output = %command.output.display(),
        inputs = command.inputs.len(),
        tracks = command.track_count(),
        "running ffmpeg"
    );
    tracing::debug!(args = ?args, "ffmpeg arguments");

    let mut cmd = Command::new(FFMPEG_BIN);
    cmd.args(&args).stderr(Stdio::piped());

    let child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReelError::BinaryNotFound
        } else {
            ReelError::ProcessFailed {
                exit_code: None,
                stderr: e.to_string(),
            }
        }
    })?;

    let output = child.wait_with_output().map_err(|e| ReelError::ProcessFailed {
        exit_code: None,
        stderr: e.to_string(),
    })?;

    if output.status.success() {
        job.finish(JobStatus::Finished);
        tracing::info!(elapsed = ?job.elapsed(), "ffmpeg finished");
        Ok(job)
    } else {
        job.finish(JobStatus::Failed);
        tracing::warn!(exit_code = ?output.status.code(), "ffmpeg failed");
        Err(ReelError::ProcessFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(target_os = "macos")]
const OPENER: (&str, &[&str]) = ("open", &[]);
#[cfg(target_os = "windows")]
const OPENER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: (&str, &[&str]) = ("xdg-open", &[]);

/// Hands the rendered file to the platform's default viewer.
pub fn open_output(path: &Path) -> Result<(), ReelError> {
    let (program, prefix) = OPENER;
    tracing::info!(path = %path.display(), opener = program, "opening output");

    let status = Command::new(program)
        .args(prefix)
        .arg(path)
        .status()
        .map_err(|e| ReelError::ProcessFailed {
            exit_code: None,
            stderr: format!("{program}: {e}"),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ReelError::ProcessFailed {
            exit_code: status.code(),
            stderr: format!("{program} could not open {}", path.display()),
        })
    }
}
