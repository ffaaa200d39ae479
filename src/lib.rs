//! Compile clip timelines into a single ffmpeg `filter_complex` concat command.
//!
//! ```no_run
//! use ffreel::core::clip::{FileClip, FrameClip};
//! use ffreel::core::movie::Movie;
//! use ffreel::core::options::{BuildOverrides, GlobalOptions, RenderStyle};
//!
//! let mut movie = Movie::new(GlobalOptions {
//!     width: Some(1280),
//!     height: Some(720),
//!     fps: Some(30.0),
//!     ..GlobalOptions::new("out.mp4")
//! });
//! movie.add_frame(FrameClip::new(2.0));
//! movie.add_file(FileClip::new("talk.mp4"));
//!
//! let command = movie.build(&BuildOverrides::default())?;
//! println!("{}", command.render(RenderStyle::HumanReadable));
//! # Ok::<(), ffreel::core::error::ReelError>(())
//! ```

pub mod cli;
pub mod core;
