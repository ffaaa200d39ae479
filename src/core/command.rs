use std::path::PathBuf;

use crate::core::error::ReelError;
use crate::core::options::RenderStyle;

pub const FFMPEG_BIN: &str = "ffmpeg";

/// Silent placeholder audio, always the input right after the last clip.
pub const NULL_AUDIO_INPUT: &str = "-f lavfi -t 0.1 -i anullsrc";

/// The pieces of one ffmpeg concat invocation, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCommand {
    pub inputs: Vec<String>,
    pub filter_lines: Vec<String>,
    pub tracks: Vec<String>,
    pub pixel_format: Option<String>,
    pub output: PathBuf,
}

impl CompiledCommand {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn filter_graph(&self, style: RenderStyle) -> String {
        let (line_sep, track_sep, wrap) = match style {
            RenderStyle::Compact => (";", "", ""),
            RenderStyle::HumanReadable => (";\\\n", "\\\n", "\\\n"),
        };

        let tracks = self.tracks.join(track_sep);
        let body = if self.filter_lines.is_empty() {
            tracks
        } else {
            format!("{}{}{}", self.filter_lines.join(line_sep), line_sep, tracks)
        };

        format!(
            "{wrap}{body}{wrap}concat=n={}:v=1:a=1[outv][outa]",
            self.track_count()
        )
    }

    pub fn render(&self, style: RenderStyle) -> String {
        let mut clauses = Vec::with_capacity(self.inputs.len() + 6);
        clauses.push(FFMPEG_BIN.to_string());
        clauses.extend(self.inputs.iter().cloned());
        clauses.push(NULL_AUDIO_INPUT.to_string());
        clauses.push(format!("-filter_complex \"{}\"", self.filter_graph(style)));
        clauses.push("-map \"[outv]\" -map \"[outa]\"".to_string());

        if let Some(format) = &self.pixel_format {
            clauses.push(format!("-pix_fmt {format}"));
        }

        let output = self.output.to_string_lossy();
        clauses.push(format!("{} -y", shell_words::quote(&output)));

        let sep = match style {
            RenderStyle::Compact => " ",
            RenderStyle::HumanReadable => " \\\n",
        };
        clauses.join(sep)
    }

    /// Arguments for the ffmpeg process, binary name excluded. The filter
    /// graph and output path are passed through verbatim, so quotes in
    /// drawtext text reach ffmpeg untouched.
    pub fn to_args(&self) -> Result<Vec<String>, ReelError> {
        let mut args = Vec::new();
        for clause in self.inputs.iter().map(String::as_str).chain([NULL_AUDIO_INPUT]) {
            let tokens = shell_words::split(clause).map_err(|err| ReelError::InvalidCommand {
                message: err.to_string(),
            })?;
            args.extend(tokens);
        }

        args.push("-filter_complex".to_string());
        args.push(self.filter_graph(RenderStyle::Compact));
        for label in ["[outv]", "[outa]"] {
            args.push("-map".to_string());
            args.push(label.to_string());
        }

        if let Some(format) = &self.pixel_format {
            args.push("-pix_fmt".to_string());
            args.push(format.clone());
        }

        args.push(self.output.to_string_lossy().into_owned());
        args.push("-y".to_string());
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompiledCommand {
        CompiledCommand {
            inputs: vec!["-i a.mp4".to_string()],
            filter_lines: vec!["[0:v:0]reverse[video0]".to_string()],
            tracks: vec!["[video0][0:a:0]".to_string()],
            pixel_format: Some("yuv420p".to_string()),
            output: PathBuf::from("out.mp4"),
        }
    }

    #[test]
    fn compact_render() {
        assert_eq!(
            sample().render(RenderStyle::Compact),
            "ffmpeg -i a.mp4 -f lavfi -t 0.1 -i anullsrc \
             -filter_complex \"[0:v:0]reverse[video0];[video0][0:a:0]concat=n=1:v=1:a=1[outv][outa]\" \
             -map \"[outv]\" -map \"[outa]\" -pix_fmt yuv420p out.mp4 -y"
        );
    }

    #[test]
    fn human_readable_render_uses_line_continuations() {
        let rendered = sample().render(RenderStyle::HumanReadable);
        assert!(rendered.starts_with("ffmpeg \\\n-i a.mp4 \\\n"));
        assert!(rendered.contains(
            "-filter_complex \"\\\n[0:v:0]reverse[video0];\\\n[video0][0:a:0]\\\nconcat=n=1"
        ));
        assert!(rendered.ends_with(" \\\nout.mp4 -y"));
    }

    #[test]
    fn no_leading_separator_without_filter_lines() {
        let command = CompiledCommand {
            filter_lines: Vec::new(),
            tracks: vec!["[0:v:0][0:a:0]".to_string()],
            pixel_format: None,
            ..sample()
        };
        assert_eq!(
            command.filter_graph(RenderStyle::Compact),
            "[0:v:0][0:a:0]concat=n=1:v=1:a=1[outv][outa]"
        );
    }

    #[test]
    fn args_unquote_the_filter_graph() {
        let args = sample().to_args().unwrap();
        assert_eq!(args[0], "-i");
        let graph_at = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert_eq!(
            args[graph_at + 1],
            "[0:v:0]reverse[video0];[video0][0:a:0]concat=n=1:v=1:a=1[outv][outa]"
        );
        assert!(args.contains(&"[outv]".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("-y"));
    }

    #[test]
    fn args_keep_double_quotes_in_the_graph() {
        let command = CompiledCommand {
            inputs: vec!["-i 'my clip.mp4'".to_string()],
            filter_lines: vec!["[0:v:0]drawtext=text='say \"hi\" now'[video0]".to_string()],
            output: PathBuf::from("final cut.mp4"),
            ..sample()
        };
        let args = command.to_args().unwrap();
        assert_eq!(&args[..2], ["-i", "my clip.mp4"]);
        let graph_at = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert!(args[graph_at + 1].contains("text='say \"hi\" now'"));
        assert_eq!(
            &args[args.len() - 4..],
            ["-pix_fmt", "yuv420p", "final cut.mp4", "-y"]
        );
    }
}
