//! Stream routing: turns the clip registry into inputs, filter lines and the
//! concat track list.

use crate::core::clip::{Clip, FilterOptions, FrameClip, TrimPoints};
use crate::core::command::CompiledCommand;
use crate::core::error::ReelError;
use crate::core::filters::{self, FrameSize};
use crate::core::options::GlobalOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStreams {
    /// `None` for audio-only clips.
    pub video: Option<String>,
    pub audio: String,
}

/// Labels resolved so far in one compile, indexed by clip position.
#[derive(Debug, Default)]
pub struct StreamLookup {
    entries: Vec<ResolvedStreams>,
}

impl StreamLookup {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, streams: ResolvedStreams) {
        self.entries.push(streams);
    }

    pub fn get(&self, index: usize) -> Option<&ResolvedStreams> {
        self.entries.get(index)
    }

    /// Audio label of an earlier clip, for an explicit audio-source reference.
    pub fn audio_of(&self, audio_index: usize, clip: usize) -> Result<&str, ReelError> {
        self.entries
            .get(audio_index)
            .map(|streams| streams.audio.as_str())
            .ok_or(ReelError::UnresolvedAudioSource { clip, audio_index })
    }
}

pub fn video_demux(index: usize) -> String {
    format!("[{index}:v:0]")
}

pub fn audio_demux(index: usize) -> String {
    format!("[{index}:a:0]")
}

fn frame_size(
    frame: &FrameClip,
    index: usize,
    options: &GlobalOptions,
) -> Result<FrameSize, ReelError> {
    let missing = |field| ReelError::MissingFrameDimension { clip: index, field };
    Ok(FrameSize {
        width: frame.width.or(options.width).ok_or_else(|| missing("width"))?,
        height: frame.height.or(options.height).ok_or_else(|| missing("height"))?,
        fps: frame.fps.or(options.fps).ok_or_else(|| missing("fps"))?,
    })
}

// A frame is generated at its own rate; only the text overlay is per-clip.
fn frame_filters(frame: &FrameClip) -> FilterOptions {
    FilterOptions {
        draw_text: frame.draw_text.clone(),
        ..FilterOptions::default()
    }
}

pub fn compile(clips: &[Clip], options: &GlobalOptions) -> Result<CompiledCommand, ReelError> {
    let null_audio = audio_demux(clips.len());
    let no_trim = TrimPoints::default();

    let mut inputs = Vec::with_capacity(clips.len());
    let mut filter_lines = Vec::new();
    let mut lookup = StreamLookup::new();

    for (index, clip) in clips.iter().enumerate() {
        let frame_view;
        let (clip_filters, points) = match clip {
            Clip::File(file) => (&file.filters, &file.trim),
            Clip::Frame(frame) => {
                frame_view = frame_filters(frame);
                (&frame_view, &no_trim)
            }
        };

        let audio_chain = filters::audio_chain(clip_filters, points, options)?;
        let prescribed = match clip.audio_index() {
            Some(audio_index) => Some(lookup.audio_of(audio_index, index)?.to_string()),
            None if clip.is_silent() => Some(null_audio.clone()),
            None => None,
        };

        match clip {
            Clip::File(file) => inputs.push(filters::file_input(file, options.use_trim_filter)),
            Clip::Frame(frame) => {
                inputs.push(filters::frame_input(frame, frame_size(frame, index, options)?))
            }
        }

        let audio = match (prescribed, &audio_chain) {
            (Some(label), Some(chain)) => {
                tracing::warn!(
                    clip = index,
                    audio = %label,
                    dropped = %chain,
                    "audio filters ignored, clip takes its audio from another stream"
                );
                label
            }
            (Some(label), None) => label,
            (None, Some(chain)) => {
                let label = format!("[audio{index}]");
                filter_lines.push(format!("{}{chain}{label}", audio_demux(index)));
                label
            }
            (None, None) => audio_demux(index),
        };

        if clip.is_audio_only() {
            tracing::debug!(clip = index, audio = %audio, "audio-only clip");
            lookup.record(ResolvedStreams { video: None, audio });
            continue;
        }

        let video = match filters::video_chain(clip_filters, points, options)? {
            Some(chain) => {
                let label = format!("[video{index}]");
                filter_lines.push(format!("{}{chain}{label}", video_demux(index)));
                label
            }
            None => video_demux(index),
        };

        tracing::debug!(clip = index, video = %video, audio = %audio, "resolved streams");
        lookup.record(ResolvedStreams {
            video: Some(video),
            audio,
        });
    }

    let tracks: Vec<String> = clips
        .iter()
        .enumerate()
        .filter(|(_, clip)| !clip.is_audio_only())
        .filter_map(|(index, _)| lookup.get(index))
        .filter_map(|streams| {
            let video = streams.video.as_ref()?;
            Some(format!("{video}{}", streams.audio))
        })
        .collect();

    tracing::debug!(
        clips = clips.len(),
        tracks = tracks.len(),
        filter_lines = filter_lines.len(),
        "compiled timeline"
    );

    Ok(CompiledCommand {
        inputs,
        filter_lines,
        tracks,
        pixel_format: options.pixel_format.clone(),
        output: options.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clip::FileClip;
    use crate::core::time::TimeValue;

    fn options() -> GlobalOptions {
        GlobalOptions::new("out.mp4")
    }

    #[test]
    fn unfiltered_clip_uses_raw_demux_labels() {
        let clips = vec![Clip::File(FileClip::new("a.mp4"))];
        let command = compile(&clips, &options()).unwrap();
        assert!(command.filter_lines.is_empty());
        assert_eq!(command.tracks, vec!["[0:v:0][0:a:0]".to_string()]);
    }

    #[test]
    fn silent_clips_take_the_null_source() {
        let clips = vec![
            Clip::File(FileClip {
                no_audio: true,
                ..FileClip::new("a.mp4")
            }),
            Clip::Frame(FrameClip {
                width: Some(320),
                height: Some(240),
                fps: Some(25.0),
                ..FrameClip::new(1.0)
            }),
        ];
        let command = compile(&clips, &options()).unwrap();
        assert_eq!(
            command.tracks,
            vec!["[0:v:0][2:a:0]".to_string(), "[1:v:0][2:a:0]".to_string()]
        );
    }

    #[test]
    fn audio_only_clip_feeds_a_later_reference() {
        let clips = vec![
            Clip::File(FileClip {
                audio_only: true,
                filters: FilterOptions {
                    volume: Some(0.8),
                    ..FilterOptions::default()
                },
                ..FileClip::new("music.mp3")
            }),
            Clip::File(FileClip {
                audio_index: Some(0),
                ..FileClip::new("b.mp4")
            }),
        ];
        let command = compile(&clips, &options()).unwrap();
        assert_eq!(command.inputs, vec!["-i music.mp3", "-i b.mp4"]);
        assert_eq!(
            command.filter_lines,
            vec!["[0:a:0]volume=0.8[audio0]".to_string()]
        );
        assert_eq!(command.tracks, vec!["[1:v:0][audio0]".to_string()]);
    }

    #[test]
    fn reference_drops_local_audio_filters() {
        let clips = vec![
            Clip::File(FileClip::new("a.mp4")),
            Clip::File(FileClip {
                audio_index: Some(0),
                filters: FilterOptions {
                    volume: Some(2.0),
                    ..FilterOptions::default()
                },
                ..FileClip::new("b.mp4")
            }),
        ];
        let command = compile(&clips, &options()).unwrap();
        assert!(command.filter_lines.is_empty());
        assert_eq!(
            command.tracks,
            vec!["[0:v:0][0:a:0]".to_string(), "[1:v:0][0:a:0]".to_string()]
        );
    }

    #[test]
    fn forward_and_self_references_are_rejected() {
        for audio_index in [1, 2] {
            let clips = vec![
                Clip::File(FileClip::new("a.mp4")),
                Clip::File(FileClip {
                    audio_index: Some(audio_index),
                    ..FileClip::new("b.mp4")
                }),
                Clip::File(FileClip::new("c.mp4")),
            ];
            let err = compile(&clips, &options()).unwrap_err();
            assert!(matches!(
                err,
                ReelError::UnresolvedAudioSource { clip: 1, audio_index: i } if i == audio_index
            ));
        }
    }

    #[test]
    fn frame_without_dimensions_is_rejected() {
        let clips = vec![Clip::Frame(FrameClip::new(2.0))];
        let err = compile(&clips, &options()).unwrap_err();
        assert!(matches!(
            err,
            ReelError::MissingFrameDimension { clip: 0, field: "width" }
        ));
    }

    #[test]
    fn trim_filter_mode_moves_trim_into_the_graph() {
        let clips = vec![Clip::File(FileClip {
            trim: TrimPoints {
                ss: Some(TimeValue::Seconds(5)),
                t: Some(TimeValue::Seconds(10)),
                ..TrimPoints::default()
            },
            ..FileClip::new("a.mp4")
        })];

        let seek = compile(&clips, &options()).unwrap();
        assert_eq!(seek.inputs, vec!["-ss 00:00:05 -t 00:00:10 -i a.mp4"]);
        assert!(seek.filter_lines.is_empty());

        let graph = compile(
            &clips,
            &GlobalOptions {
                use_trim_filter: true,
                ..options()
            },
        )
        .unwrap();
        assert_eq!(graph.inputs, vec!["-i a.mp4"]);
        assert_eq!(
            graph.filter_lines,
            vec![
                "[0:a:0]atrim=start=5:duration=10,asetpts=PTS-STARTPTS[audio0]".to_string(),
                "[0:v:0]trim=start=5:duration=10,setpts=PTS-STARTPTS[video0]".to_string(),
            ]
        );
        assert_eq!(graph.tracks, vec!["[video0][audio0]".to_string()]);
    }
}
