//! Command-line configuration for batch conversion.

use std::path::PathBuf;

use cssflip::FlipOptions;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: cssflip [OPTIONS] <DIR>

Writes a right-to-left copy of every stylesheet under DIR next to the
original, e.g. `site.css` -> `site-rtl.css`.

Options:
    --suffix <SUFFIX>   Suffix inserted before the extension [default: -rtl]
    --ext <EXT>         Extension of the stylesheets to convert [default: css]
    --url-left-right    Swap `left`/`right` inside url(...)
    --url-ltr-rtl       Swap `ltr`/`rtl` inside url(...)
    -h, --help          Print this help

Set RUST_LOG=debug for per-file diagnostics.";

/// Errors from parsing command-line arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing stylesheet directory")]
    MissingRoot,

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("suffix must not be empty")]
    EmptySuffix,

    /// `-h` / `--help` was given.
    #[error("help requested")]
    HelpRequested,
}

/// Settings for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory searched recursively for stylesheets.
    pub root: PathBuf,
    /// Inserted between file stem and extension for output files. Inputs
    /// whose stem already ends with it are skipped.
    pub suffix: String,
    /// Extension, without the dot, of files to convert.
    pub extension: String,
    pub options: FlipOptions,
}

impl Config {
    pub const DEFAULT_SUFFIX: &'static str = "-rtl";
    pub const DEFAULT_EXTENSION: &'static str = "css";

    /// A config for `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: Self::DEFAULT_SUFFIX.to_string(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
            options: FlipOptions::empty(),
        }
    }

    /// Parses arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut root = None;
        let mut suffix = Self::DEFAULT_SUFFIX.to_string();
        let mut extension = Self::DEFAULT_EXTENSION.to_string();
        let mut options = FlipOptions::empty();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "--suffix" => {
                    suffix = args.next().ok_or(ConfigError::MissingValue(arg))?;
                }
                "--ext" => {
                    let value = args.next().ok_or(ConfigError::MissingValue(arg))?;
                    extension = value.trim_start_matches('.').to_string();
                }
                "--url-left-right" => options |= FlipOptions::SWAP_LEFT_RIGHT_IN_URL,
                "--url-ltr-rtl" => options |= FlipOptions::SWAP_LTR_RTL_IN_URL,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ if root.is_none() => root = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        if suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        Ok(Self {
            root: root.ok_or(ConfigError::MissingRoot)?,
            suffix,
            extension,
            options,
        })
    }
}
