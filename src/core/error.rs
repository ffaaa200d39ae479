use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReelError {
    #[error("ffmpeg binary not found in PATH")]
    BinaryNotFound,
    #[error("ffmpeg process failed (exit_code={exit_code:?}): {stderr}")]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("invalid command: {message}")]
    InvalidCommand { message: String },
    #[error("invalid time value '{value}' (expected seconds or HH:MM:SS)")]
    InvalidTime { value: String },
    #[error("clip {clip} takes audio from clip {audio_index}, which is not an earlier clip")]
    UnresolvedAudioSource { clip: usize, audio_index: usize },
    #[error("frame clip {clip} has no {field}; set it on the frame or globally")]
    MissingFrameDimension { clip: usize, field: &'static str },
    #[error("timeline line {line}: {message}")]
    Timeline { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
