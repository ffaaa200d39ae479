use std::path::PathBuf;

use crate::core::time::TimeValue;

pub const DEFAULT_FRAME_COLOR: &str = "black";

#[derive(Debug, Clone, PartialEq)]
pub enum Clip {
    File(FileClip),
    Frame(FrameClip),
}

impl Clip {
    pub fn audio_index(&self) -> Option<usize> {
        match self {
            Clip::File(file) => file.audio_index,
            Clip::Frame(frame) => frame.audio_index,
        }
    }

    /// Frames and `no_audio` files take their audio from the silent source.
    pub fn is_silent(&self) -> bool {
        match self {
            Clip::File(file) => file.no_audio,
            Clip::Frame(_) => true,
        }
    }

    pub fn is_audio_only(&self) -> bool {
        matches!(self, Clip::File(file) if file.audio_only)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileClip {
    pub path: PathBuf,
    pub trim: TrimPoints,
    pub audio_only: bool,
    pub no_audio: bool,
    pub audio_index: Option<usize>,
    pub filters: FilterOptions,
}

impl FileClip {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A solid-color clip generated by lavfi. Unset dimensions fall back to the
/// global options at compile time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClip {
    pub color: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub duration: f64,
    pub audio_index: Option<usize>,
    pub draw_text: Option<DrawText>,
}

impl FrameClip {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimPoints {
    pub ss: Option<TimeValue>,
    pub to: Option<TimeValue>,
    pub t: Option<TimeValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub reverse: bool,
    pub crop_x: Option<u32>,
    pub crop_y: Option<u32>,
    pub fps: Option<f64>,
    pub equalizer: Equalizer,
    pub volume: Option<f64>,
    pub draw_text: Option<DrawText>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equalizer {
    pub saturation: Option<f64>,
    pub brightness: Option<f64>,
    pub gamma: Option<f64>,
    pub contrast: Option<f64>,
}

impl Equalizer {
    pub fn is_empty(&self) -> bool {
        self.saturation.is_none()
            && self.brightness.is_none()
            && self.gamma.is_none()
            && self.contrast.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub font_size: u32,
    pub font_file: PathBuf,
    pub text: String,
    pub font_color: String,
    pub center: bool,
}
