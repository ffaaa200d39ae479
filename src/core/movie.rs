use std::thread;
use std::time::Duration;

use crate::core::clip::{Clip, FileClip, FrameClip};
use crate::core::command::CompiledCommand;
use crate::core::error::ReelError;
use crate::core::graph;
use crate::core::job::Job;
use crate::core::options::{BuildOverrides, GlobalOptions, RenderStyle};

/// Delay between ffmpeg exiting and the output being handed to the opener.
pub const OPEN_DELAY: Duration = Duration::from_secs(1);

/// The clip registry. Registry order is timeline order and the index
/// returned by `add_file`/`add_frame` is the clip's identity.
#[derive(Debug, Clone)]
pub struct Movie {
    pub options: GlobalOptions,
    clips: Vec<Clip>,
}

impl Movie {
    pub fn new(options: GlobalOptions) -> Self {
        Self {
            options,
            clips: Vec::new(),
        }
    }

    pub fn add_file(&mut self, clip: FileClip) -> usize {
        self.clips.push(Clip::File(clip));
        self.clips.len() - 1
    }

    pub fn add_frame(&mut self, clip: FrameClip) -> usize {
        self.clips.push(Clip::Frame(clip));
        self.clips.len() - 1
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn build(&self, overrides: &BuildOverrides) -> Result<CompiledCommand, ReelError> {
        let options = self.options.merged(overrides);
        if options.output.as_os_str().is_empty() {
            return Err(ReelError::InvalidCommand {
                message: "no output path; add an `output` line or pass -o".to_string(),
            });
        }
        graph::compile(&self.clips, &options)
    }

    /// Prints the human-readable command when `print` is set, otherwise runs
    /// ffmpeg and optionally opens the result.
    pub fn execute(&self) -> Result<Option<Job>, ReelError> {
        let command = self.build(&BuildOverrides::default())?;

        if self.options.print {
            println!("{}", command.render(RenderStyle::HumanReadable));
            return Ok(None);
        }

        let job = crate::core::run(&command)?;
        if self.options.open {
            thread::sleep(OPEN_DELAY);
            crate::core::open_output(&self.options.output)?;
        }
        Ok(Some(job))
    }
}
