// src/options.rs

//! Per-call plot configuration.
//!
//! `PlotOptions` is consumed by exactly one render call. It can be built in
//! code or deserialised from JSON, which is why the save destination is kept
//! loosely typed until the render call validates it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_BINS_FACTOR, DEFAULT_FRAMES_PER_NS, HISTOGRAM_PREFIX, LINE_PLOT_PREFIX,
    OUTPUT_EXTENSION, SAVE_PATH_SEPARATOR,
};
use crate::error::{PlotError, Result};

/// How x-axis ticks are labelled.
///
/// In option files the mode is a case-insensitive name (`"rel"`,
/// `"Relative"`, `"none"`, ...) or a boolean: `false` turns the tick rewrite
/// off and `true` selects the default relative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XTickMode {
    /// Frame indices rewritten to a nanosecond timescale starting at 0.
    #[default]
    Relative,
    /// From the rounded window start to the rounded window end. Not implemented.
    Absolute,
    /// Leave the backend's default index ticks.
    None,
}

impl<'de> Deserialize<'de> for XTickMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(XTickMode::None),
            Raw::Flag(true) => Ok(XTickMode::Relative),
            Raw::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

impl fmt::Display for XTickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            XTickMode::Relative => "relative",
            XTickMode::Absolute => "absolute",
            XTickMode::None => "none",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for XTickMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rel" | "relative" => Ok(XTickMode::Relative),
            "abs" | "absolute" => Ok(XTickMode::Absolute),
            "none" | "false" | "off" => Ok(XTickMode::None),
            other => Err(PlotError::usage(format!(
                "unknown x tick mode '{other}' (expected relative, absolute or none)"
            ))),
        }
    }
}

/// Save destination as supplied by the caller.
///
/// `false` disables saving, a string names the output. Any other value is
/// kept so that the render call can reject it as a usage error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaveSetting {
    Flag(bool),
    Name(String),
    Other(serde_json::Value),
}

impl Default for SaveSetting {
    fn default() -> Self {
        SaveSetting::Flag(false)
    }
}

impl From<&str> for SaveSetting {
    fn from(name: &str) -> Self {
        SaveSetting::Name(name.to_string())
    }
}

impl From<String> for SaveSetting {
    fn from(name: String) -> Self {
        SaveSetting::Name(name)
    }
}

impl SaveSetting {
    /// Validates the setting. `Ok(None)` means display only.
    pub fn resolve(&self) -> Result<Option<SaveTarget>> {
        match self {
            SaveSetting::Flag(false) => Ok(None),
            SaveSetting::Name(name) => SaveTarget::parse(name).map(Some),
            SaveSetting::Flag(true) | SaveSetting::Other(_) => {
                Err(PlotError::usage("Specify a saving filename."))
            }
        }
    }
}

/// Which figure a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Line,
    Histogram,
}

impl FigureKind {
    pub fn file_prefix(self) -> &'static str {
        match self {
            FigureKind::Line => LINE_PLOT_PREFIX,
            FigureKind::Histogram => HISTOGRAM_PREFIX,
        }
    }
}

/// A validated save destination: optional directory plus file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub directory: Option<PathBuf>,
    pub stem: String,
}

impl SaveTarget {
    /// Splits `name` on the first `/` into directory and stem.
    pub fn parse(name: &str) -> Result<Self> {
        let (directory, stem) = match name.split_once(SAVE_PATH_SEPARATOR) {
            Some((dir, stem)) => (Some(dir), stem),
            None => (None, name),
        };

        if stem.is_empty() {
            return Err(PlotError::usage(format!(
                "save name '{name}' has an empty file stem"
            )));
        }
        if stem.contains(SAVE_PATH_SEPARATOR) {
            return Err(PlotError::usage(format!(
                "save name '{name}' has more than one directory level"
            )));
        }

        Ok(Self {
            directory: directory.filter(|d| !d.is_empty()).map(PathBuf::from),
            stem: stem.to_string(),
        })
    }

    /// Output path for one figure, e.g. `plots/plot_run1.png`.
    pub fn file_path(&self, kind: FigureKind) -> PathBuf {
        let file_name = format!("{}{}.{}", kind.file_prefix(), self.stem, OUTPUT_EXTENSION);
        match &self.directory {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Creates the destination directory when one was given.
    pub fn ensure_directory(&self) -> Result<()> {
        if let Some(dir) = &self.directory {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| PlotError::io(dir.clone(), e))?;
                tracing::info!("Created output directory '{}'", dir.display());
            }
        }
        Ok(())
    }
}

/// Display options for one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Reverse sequences and labels so the first series draws last (on top).
    pub invert_order: bool,
    /// Also emit a histogram of the windowed data.
    pub histogram: bool,
    /// `(y title, x title)`.
    #[serde(alias = "axis")]
    pub axis_titles: Option<(String, String)>,
    #[serde(alias = "xticks")]
    pub xtick_mode: XTickMode,
    /// Trajectory frames per nanosecond.
    #[serde(alias = "one_ns")]
    pub frames_per_ns: usize,
    #[serde(alias = "strt")]
    pub window_start: usize,
    /// Exclusive end index; `None` means the full length of the first sequence.
    #[serde(alias = "end")]
    pub window_end: Option<usize>,
    /// Multiplies the histogram bin count (1.0 gives one bin per axis unit).
    pub bins_factor: f64,
    #[serde(alias = "savefig")]
    pub save: SaveSetting,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            invert_order: false,
            histogram: false,
            axis_titles: None,
            xtick_mode: XTickMode::Relative,
            frames_per_ns: DEFAULT_FRAMES_PER_NS,
            window_start: 0,
            window_end: None,
            bins_factor: DEFAULT_BINS_FACTOR,
            save: SaveSetting::default(),
        }
    }
}

impl PlotOptions {
    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Checks the numeric options that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.xtick_mode == XTickMode::Absolute {
            return Err(PlotError::Unsupported(
                "absolute x tick mode is not implemented; use relative or none".to_string(),
            ));
        }
        if self.frames_per_ns == 0 {
            return Err(PlotError::invalid_input("frames_per_ns must be positive"));
        }
        if !self.bins_factor.is_finite() || self.bins_factor <= 0.0 {
            return Err(PlotError::invalid_input(format!(
                "bins_factor must be a positive number, got {}",
                self.bins_factor
            )));
        }
        if let Some(end) = self.window_end {
            if end <= self.window_start {
                return Err(PlotError::invalid_input(format!(
                    "empty window: start {} is not before end {end}",
                    self.window_start
                )));
            }
        }
        Ok(())
    }
}
