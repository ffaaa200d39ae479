//! Filter-graph fragment builders and per-clip chain composers.
//!
//! Every builder drops unset fields entirely; a builder with nothing to say
//! returns `None` so the caller can fall back to the raw demuxed stream.

use crate::core::clip::{
    DrawText, Equalizer, FileClip, FilterOptions, FrameClip, TrimPoints, DEFAULT_FRAME_COLOR,
};
use crate::core::error::ReelError;
use crate::core::options::GlobalOptions;

pub fn draw_text(options: &DrawText) -> String {
    let parts = [
        format!("fontsize={}", options.font_size),
        format!("fontfile={}", options.font_file.display()),
        format!("text='{}'", options.text),
        if options.center {
            "x=(w-text_w)/2".to_string()
        } else {
            "x=0".to_string()
        },
        if options.center {
            "y=(h-text_h)/2".to_string()
        } else {
            "y=0".to_string()
        },
        format!("fontcolor={}", options.font_color),
    ];

    format!("drawtext={}", parts.join(":"))
}

// Field order is end, start, duration.
fn trim_fields(points: &TrimPoints) -> Result<Option<String>, ReelError> {
    let mut parts = Vec::new();
    if let Some(to) = &points.to {
        parts.push(format!("end={}", to.as_seconds()?));
    }
    if let Some(ss) = &points.ss {
        parts.push(format!("start={}", ss.as_seconds()?));
    }
    if let Some(t) = &points.t {
        parts.push(format!("duration={}", t.as_seconds()?));
    }

    if parts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parts.join(":")))
    }
}

pub fn trim(points: &TrimPoints) -> Result<Option<String>, ReelError> {
    Ok(trim_fields(points)?.map(|fields| format!("trim={fields},setpts=PTS-STARTPTS")))
}

pub fn atrim(points: &TrimPoints) -> Result<Option<String>, ReelError> {
    Ok(trim_fields(points)?.map(|fields| format!("atrim={fields},asetpts=PTS-STARTPTS")))
}

pub fn equalizer(eq: &Equalizer) -> Option<String> {
    if eq.is_empty() {
        return None;
    }

    let parts: Vec<String> = [
        eq.saturation.map(|v| format!("saturation={v}")),
        eq.brightness.map(|v| format!("brightness={v}")),
        eq.gamma.map(|v| format!("gamma={v}")),
        eq.contrast.map(|v| format!("contrast={v}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    Some(format!("eq={}", parts.join(":")))
}

/// Input clause for a file clip. In trim-filter mode the seek flags are left
/// out so the offset is not applied twice.
pub fn file_input(clip: &FileClip, use_trim_filter: bool) -> String {
    let mut parts = Vec::new();
    if !use_trim_filter {
        if let Some(ss) = &clip.trim.ss {
            parts.push(format!("-ss {}", ss.as_clock()));
        }
        if let Some(to) = &clip.trim.to {
            parts.push(format!("-to {}", to.as_clock()));
        }
        if let Some(t) = &clip.trim.t {
            parts.push(format!("-t {}", t.as_clock()));
        }
    }
    let path = clip.path.to_string_lossy();
    parts.push(format!("-i {}", shell_words::quote(&path)));
    parts.join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

pub fn frame_input(frame: &FrameClip, size: FrameSize) -> String {
    let source = [
        format!(
            "color={}",
            frame.color.as_deref().unwrap_or(DEFAULT_FRAME_COLOR)
        ),
        format!("s={}x{}", size.width, size.height),
        format!("d={}", frame.duration),
        format!("r={}", size.fps),
    ];
    format!("-f lavfi -i {}", source.join(":"))
}

/// Video chain: fps, crop, eq, drawtext, trim, reverse.
///
/// `reverse` must stay behind `trim`, otherwise the trim window would be cut
/// out of the already reversed stream.
pub fn video_chain(
    filters: &FilterOptions,
    points: &TrimPoints,
    options: &GlobalOptions,
) -> Result<Option<String>, ReelError> {
    let mut chain = Vec::new();

    if let Some(fps) = filters.fps.or(options.fps) {
        chain.push(format!("fps={fps}"));
    }
    if let (Some(width), Some(height)) = (options.width, options.height) {
        chain.push(format!(
            "crop={}:{}:{}:{}",
            width,
            height,
            filters.crop_x.unwrap_or(0),
            filters.crop_y.unwrap_or(0)
        ));
    }
    if let Some(eq) = equalizer(&filters.equalizer) {
        chain.push(eq);
    }
    if let Some(text) = &filters.draw_text {
        chain.push(draw_text(text));
    }
    if options.use_trim_filter {
        if let Some(fragment) = trim(points)? {
            chain.push(fragment);
        }
    }
    if filters.reverse {
        chain.push("reverse".to_string());
    }

    Ok(join_chain(chain))
}

/// Audio chain: volume, then atrim.
pub fn audio_chain(
    filters: &FilterOptions,
    points: &TrimPoints,
    options: &GlobalOptions,
) -> Result<Option<String>, ReelError> {
    let mut chain = Vec::new();

    if let Some(volume) = filters.volume {
        chain.push(format!("volume={volume}"));
    }
    if options.use_trim_filter {
        if let Some(fragment) = atrim(points)? {
            chain.push(fragment);
        }
    }

    Ok(join_chain(chain))
}

fn join_chain(chain: Vec<String>) -> Option<String> {
    if chain.is_empty() {
        None
    } else {
        Some(chain.join(","))
    }
}
