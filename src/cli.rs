use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::batch;
use crate::core::clip::{DrawText, Equalizer, FileClip, FilterOptions, FrameClip, TrimPoints};
use crate::core::error::ReelError;
use crate::core::movie::Movie;
use crate::core::options::{BuildOverrides, GlobalOptions, RenderStyle};
use crate::core::time::TimeValue;

#[derive(Debug, Parser)]
#[command(
    name = "ffreel",
    version,
    about = "Compile a clip timeline into one ffmpeg concat command"
)]
pub struct SystemCli {
    /// Path to a .reel file describing the timeline
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Print the command instead of running it
    #[arg(long)]
    pub print: bool,
    /// Print the command on a single line and exit
    #[arg(long, conflicts_with = "print")]
    pub compact: bool,
    /// Open the output once ffmpeg is done
    #[arg(long)]
    pub open: bool,
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub fps: Option<f64>,
    #[arg(long = "pixel-format")]
    pub pixel_format: Option<String>,
    /// Trim inside the filter graph instead of seeking on the inputs
    #[arg(long)]
    pub use_trim_filter: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

impl SystemCli {
    pub fn overrides(&self) -> BuildOverrides {
        BuildOverrides {
            output: self.output.clone(),
            width: self.width,
            height: self.height,
            fps: self.fps,
            pixel_format: self.pixel_format.clone(),
            use_trim_filter: self.use_trim_filter.then_some(true),
            print: self.print.then_some(true),
            open: self.open.then_some(true),
        }
    }
}

/// Grammar of a single timeline line.
#[derive(Debug, Parser)]
#[command(name = "reel")]
pub struct TimelineLine {
    #[command(subcommand)]
    pub directive: Directive,
}

#[derive(Debug, Subcommand)]
pub enum Directive {
    Output(OutputArgs),
    File(FileArgs),
    Frame(FrameArgs),
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    pub path: PathBuf,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub fps: Option<f64>,
    #[arg(long = "pixel-format")]
    pub pixel_format: Option<String>,
    #[arg(long)]
    pub use_trim_filter: bool,
    #[arg(long)]
    pub print: bool,
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    pub path: PathBuf,
    #[arg(long = "ss")]
    pub ss: Option<TimeValue>,
    #[arg(long = "to")]
    pub to: Option<TimeValue>,
    #[arg(long = "t")]
    pub t: Option<TimeValue>,
    #[arg(long)]
    pub audio_only: bool,
    #[arg(long)]
    pub no_audio: bool,
    /// Take audio from an earlier clip (0-based, counting file/frame lines)
    #[arg(long)]
    pub audio_index: Option<usize>,
    #[arg(long)]
    pub reverse: bool,
    #[arg(long)]
    pub crop_x: Option<u32>,
    #[arg(long)]
    pub crop_y: Option<u32>,
    #[arg(long)]
    pub fps: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub saturation: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub gamma: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<f64>,
    #[arg(long)]
    pub volume: Option<f64>,
    #[command(flatten)]
    pub text: TextArgs,
}

#[derive(Debug, Args)]
pub struct FrameArgs {
    #[arg(long)]
    pub duration: f64,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub fps: Option<f64>,
    #[arg(long)]
    pub audio_index: Option<usize>,
    #[command(flatten)]
    pub text: TextArgs,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    #[arg(long, requires = "font_file")]
    pub text: Option<String>,
    #[arg(long)]
    pub font_file: Option<PathBuf>,
    #[arg(long, default_value_t = 48)]
    pub font_size: u32,
    #[arg(long, default_value = "white")]
    pub font_color: String,
    #[arg(long)]
    pub center: bool,
}

pub fn text_args_to_draw_text(args: TextArgs) -> Option<DrawText> {
    Some(DrawText {
        text: args.text?,
        font_file: args.font_file?,
        font_size: args.font_size,
        font_color: args.font_color,
        center: args.center,
    })
}

pub fn output_args_to_options(args: OutputArgs) -> GlobalOptions {
    GlobalOptions {
        output: args.path,
        width: args.width,
        height: args.height,
        fps: args.fps,
        pixel_format: args.pixel_format,
        use_trim_filter: args.use_trim_filter,
        print: args.print,
        open: args.open,
    }
}

pub fn file_args_to_clip(args: FileArgs) -> FileClip {
    FileClip {
        path: args.path,
        trim: TrimPoints {
            ss: args.ss,
            to: args.to,
            t: args.t,
        },
        audio_only: args.audio_only,
        no_audio: args.no_audio,
        audio_index: args.audio_index,
        filters: FilterOptions {
            reverse: args.reverse,
            crop_x: args.crop_x,
            crop_y: args.crop_y,
            fps: args.fps,
            equalizer: Equalizer {
                saturation: args.saturation,
                brightness: args.brightness,
                gamma: args.gamma,
                contrast: args.contrast,
            },
            volume: args.volume,
            draw_text: text_args_to_draw_text(args.text),
        },
    }
}

pub fn frame_args_to_clip(args: FrameArgs) -> FrameClip {
    FrameClip {
        color: args.color,
        width: args.width,
        height: args.height,
        fps: args.fps,
        duration: args.duration,
        audio_index: args.audio_index,
        draw_text: text_args_to_draw_text(args.text),
    }
}

pub fn parse_line(line: &str) -> Result<Directive, String> {
    let mut argv = Vec::new();
    argv.push("reel".to_string());

    let tokens = shell_words::split(line).map_err(|err| err.to_string())?;
    argv.extend(tokens);

    let parsed = TimelineLine::try_parse_from(argv).map_err(|err| err.to_string())?;
    Ok(parsed.directive)
}

/// Builds a movie from logical timeline lines. Clip indices count `file`
/// and `frame` lines only, in order of appearance.
pub fn parse_timeline(lines: Vec<(usize, String)>) -> Result<Movie, ReelError> {
    let mut options: Option<GlobalOptions> = None;
    let mut directives = Vec::new();

    for (line, text) in lines {
        let directive = parse_line(&text).map_err(|message| ReelError::Timeline {
            line,
            message: message.trim_end().to_string(),
        })?;
        match directive {
            Directive::Output(args) => {
                if options.is_some() {
                    return Err(ReelError::Timeline {
                        line,
                        message: "more than one output directive".to_string(),
                    });
                }
                options = Some(output_args_to_options(args));
            }
            other => directives.push(other),
        }
    }

    let mut movie = Movie::new(options.unwrap_or_default());
    for directive in directives {
        match directive {
            Directive::File(args) => {
                movie.add_file(file_args_to_clip(args));
            }
            Directive::Frame(args) => {
                movie.add_frame(frame_args_to_clip(args));
            }
            Directive::Output(_) => {}
        }
    }

    tracing::debug!(clips = movie.clips().len(), "timeline loaded");
    Ok(movie)
}

pub fn load_timeline(cli: &SystemCli) -> Result<Movie, ReelError> {
    let lines = batch::read_timeline_file(&cli.file)?;
    let mut movie = parse_timeline(lines)?;
    movie.options = movie.options.merged(&cli.overrides());
    Ok(movie)
}

/// The one-line command for `--compact`, or `None` when the movie should go
/// through the regular print/run path.
pub fn compact_command(cli: &SystemCli, movie: &Movie) -> Result<Option<String>, ReelError> {
    if !cli.compact {
        return Ok(None);
    }
    let command = movie.build(&BuildOverrides::default())?;
    Ok(Some(command.render(RenderStyle::Compact)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clip::Clip;

    #[test]
    fn parses_file_line_with_filters() {
        let directive =
            parse_line("file 'my clip.mp4' --ss 00:00:05 --t 10 --brightness -0.2 --reverse")
                .unwrap();
        let Directive::File(args) = directive else {
            panic!("expected a file directive");
        };
        let clip = file_args_to_clip(args);
        assert_eq!(clip.path, PathBuf::from("my clip.mp4"));
        assert_eq!(clip.trim.ss, Some(TimeValue::Clock("00:00:05".to_string())));
        assert_eq!(clip.trim.t, Some(TimeValue::Seconds(10)));
        assert_eq!(clip.filters.equalizer.brightness, Some(-0.2));
        assert!(clip.filters.reverse);
        assert_eq!(clip.filters.draw_text, None);
    }

    #[test]
    fn text_requires_font_file() {
        assert!(parse_line("frame --duration 2 --text hi").is_err());

        let Directive::Frame(args) =
            parse_line("frame --duration 2 --text 'Hello there' --font-file /f.ttf --center")
                .unwrap()
        else {
            panic!("expected a frame directive");
        };
        let text = frame_args_to_clip(args).draw_text.unwrap();
        assert_eq!(text.text, "Hello there");
        assert_eq!(text.font_size, 48);
        assert_eq!(text.font_color, "white");
        assert!(text.center);
    }

    #[test]
    fn rejects_bad_time_values() {
        assert!(parse_line("file a.mp4 --ss 1:2").is_err());
    }

    #[test]
    fn timeline_errors_name_the_line() {
        let err = parse_timeline(vec![
            (1, "output out.mp4".to_string()),
            (3, "clip a.mp4".to_string()),
        ])
        .unwrap_err();
        assert!(matches!(err, ReelError::Timeline { line: 3, .. }));

        let err = parse_timeline(vec![
            (1, "output a.mp4".to_string()),
            (2, "output b.mp4".to_string()),
        ])
        .unwrap_err();
        assert!(matches!(err, ReelError::Timeline { line: 2, .. }));
    }

    #[test]
    fn output_line_may_come_last() {
        let movie = parse_timeline(vec![
            (1, "file a.mp4".to_string()),
            (2, "frame --duration 1".to_string()),
            (3, "output out.mp4 --width 640 --height 480 --fps 30".to_string()),
        ])
        .unwrap();
        assert_eq!(movie.options.output, PathBuf::from("out.mp4"));
        assert_eq!(movie.options.width, Some(640));
        assert!(matches!(movie.clips()[1], Clip::Frame(_)));
    }

    #[test]
    fn comment_inside_continued_line_is_not_an_argument() {
        let lines = batch::logical_lines(
            "output out.mp4\nframe --duration 3 \\\n# card colour\n  --color red\n",
        );
        let movie = parse_timeline(lines).unwrap();
        let Clip::Frame(frame) = &movie.clips()[0] else {
            panic!("expected a frame clip");
        };
        assert_eq!(frame.color.as_deref(), Some("red"));
    }

    #[test]
    fn compact_flag_prints_one_line() {
        let cli = SystemCli::try_parse_from(["ffreel", "movie.reel", "--compact", "-o", "cut.mp4"])
            .unwrap();
        let mut movie = parse_timeline(vec![
            (1, "output out.mp4".to_string()),
            (2, "file a.mp4".to_string()),
        ])
        .unwrap();
        movie.options = movie.options.merged(&cli.overrides());

        assert_eq!(
            compact_command(&cli, &movie).unwrap().as_deref(),
            Some(
                "ffmpeg -i a.mp4 -f lavfi -t 0.1 -i anullsrc \
                 -filter_complex \"[0:v:0][0:a:0]concat=n=1:v=1:a=1[outv][outa]\" \
                 -map \"[outv]\" -map \"[outa]\" cut.mp4 -y"
            )
        );
    }

    #[test]
    fn without_compact_the_movie_is_executed() {
        let cli = SystemCli::try_parse_from(["ffreel", "movie.reel", "--print"]).unwrap();
        let movie = parse_timeline(vec![(1, "output out.mp4".to_string())]).unwrap();
        assert_eq!(compact_command(&cli, &movie).unwrap(), None);
    }

    #[test]
    fn compact_conflicts_with_print() {
        let parsed = SystemCli::try_parse_from(["ffreel", "movie.reel", "--compact", "--print"]);
        assert!(parsed.is_err());
    }
}
