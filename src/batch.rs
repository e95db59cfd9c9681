//! Directory-level conversion: find stylesheets, flip them, write siblings.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use cssflip::{FlipError, Flipper};
use rayon::prelude::*;
use thiserror::Error;

use crate::config::Config;

/// Errors from a batch run. Each carries the file it happened on.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to flip {}", path.display())]
    Flip {
        path: PathBuf,
        #[source]
        source: FlipError,
    },

    #[error("{} has no file name to derive an output name from", path.display())]
    NoOutputName { path: PathBuf },
}

impl BatchError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| BatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of converting one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub substitutions: usize,
}

/// Result of converting a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub reports: Vec<FileReport>,
}

impl Summary {
    pub fn files(&self) -> usize {
        self.reports.len()
    }

    pub fn substitutions(&self) -> usize {
        self.reports.iter().map(|r| r.substitutions).sum()
    }
}

/// `dir/site.css` with suffix `-rtl` becomes `dir/site-rtl.css`.
pub fn output_path(path: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let name = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    Some(path.with_file_name(name))
}

/// Whether `path` is itself an output of a previous run.
pub fn is_generated(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(suffix))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Lists the stylesheets under `config.root` that need converting, sorted.
///
/// Symlinks are followed. Each real directory is walked once, so a link
/// pointing back up the tree does not loop.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>, BatchError> {
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    let mut pending = vec![config.root.clone()];

    while let Some(dir) = pending.pop() {
        let real = fs::canonicalize(&dir).map_err(BatchError::io(&dir))?;
        if !visited.insert(real) {
            log::trace!("already walked {}", dir.display());
            continue;
        }
        for entry in fs::read_dir(&dir).map_err(BatchError::io(&dir))? {
            let entry = entry.map_err(BatchError::io(&dir))?;
            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) if fs::symlink_metadata(&path).is_ok_and(|m| m.is_symlink()) => {
                    log::warn!("skipping broken link {}: {err}", path.display());
                    continue;
                }
                Err(err) => return Err(BatchError::io(&path)(err)),
            };

            if metadata.is_dir() {
                pending.push(path);
            } else if has_extension(&path, &config.extension) {
                if is_generated(&path, &config.suffix) {
                    log::trace!("skipping generated {}", path.display());
                } else {
                    found.push(path);
                }
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Flips one stylesheet and writes the result next to it.
pub fn convert_file(
    path: &Path,
    suffix: &str,
    flipper: &Flipper<'_>,
) -> Result<FileReport, BatchError> {
    let output = output_path(path, suffix).ok_or_else(|| BatchError::NoOutputName {
        path: path.to_path_buf(),
    })?;
    let ltr = fs::read_to_string(path).map_err(BatchError::io(path))?;
    let result = flipper.transform(&ltr).map_err(|source| BatchError::Flip {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(&output, &result.text).map_err(BatchError::io(&output))?;

    log::debug!(
        "{} -> {} ({} declarations flipped)",
        path.display(),
        output.display(),
        result.diagnostics.substitutions
    );
    Ok(FileReport {
        input: path.to_path_buf(),
        output,
        substitutions: result.diagnostics.substitutions,
    })
}

/// Converts every stylesheet under `config.root`, one rayon task per file.
///
/// Stops at the first error; files already written stay on disk.
pub fn convert_tree(config: &Config) -> Result<Summary, BatchError> {
    let files = discover(config)?;
    log::info!(
        "converting {} stylesheets under {}",
        files.len(),
        config.root.display()
    );

    let flipper = Flipper::new().with_options(config.options);
    let reports = files
        .par_iter()
        .map(|path| convert_file(path, &config.suffix, &flipper))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Summary { reports })
}
