//! Batch driver around the [`cssflip`] engine.
//!
//! Walks a directory tree, flips every stylesheet it finds and writes the
//! result beside the original with a suffix inserted before the extension
//! (`site.css` → `site-rtl.css`). Files that already carry the suffix are
//! skipped, so re-running over the same tree never flips generated output.
//!
//! ```no_run
//! use cssflip_cli::{Config, convert_tree};
//!
//! let summary = convert_tree(&Config::new("static/css")).unwrap();
//! println!("{} files, {} declarations flipped", summary.files(), summary.substitutions());
//! ```

pub mod batch;
pub mod config;

pub use batch::{BatchError, FileReport, Summary, convert_file, convert_tree, discover, output_path};
pub use config::{Config, ConfigError, USAGE};
