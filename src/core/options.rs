use std::path::PathBuf;

/// Settings shared by every clip in one compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub output: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub pixel_format: Option<String>,
    /// Trim inside the filter graph instead of seeking on the input.
    pub use_trim_filter: bool,
    pub print: bool,
    pub open: bool,
}

/// Per-call overrides for [`GlobalOptions`]; `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOverrides {
    pub output: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub pixel_format: Option<String>,
    pub use_trim_filter: Option<bool>,
    pub print: Option<bool>,
    pub open: Option<bool>,
}

impl GlobalOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn merged(&self, overrides: &BuildOverrides) -> GlobalOptions {
        GlobalOptions {
            output: overrides
                .output
                .clone()
                .unwrap_or_else(|| self.output.clone()),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            fps: overrides.fps.or(self.fps),
            pixel_format: overrides
                .pixel_format
                .clone()
                .or_else(|| self.pixel_format.clone()),
            use_trim_filter: overrides.use_trim_filter.unwrap_or(self.use_trim_filter),
            print: overrides.print.unwrap_or(self.print),
            open: overrides.open.unwrap_or(self.open),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// One line, fragments joined by single spaces and semicolons.
    #[default]
    Compact,
    /// Line continuations between fragments, for terminal display.
    HumanReadable,
}
