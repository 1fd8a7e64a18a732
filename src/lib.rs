//! # codebundle
//!
//! A library and CLI tool that flattens a project tree into a single text file,
//! ready to be pasted into a Large Language Model's context window.
//!
//! ## Features
//!
//! - Recursive walk with directory pruning by exact name (`build`, `.git`, ...)
//! - File selection by case-sensitive extension suffix
//! - One `PATH:` delimited block per file, content copied verbatim
//! - Unreadable or non-UTF-8 files become a one-line placeholder, never a failed run
//! - Deterministic order: files before subdirectories, both sorted by name
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use codebundle::{BundleConfig, bundle};
//!
//! let config = BundleConfig::default();
//!
//! match bundle(&config) {
//!     Ok(report) => println!("{} files bundled", report.files),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Bundle the current Flutter project into flutter_full_codebase.txt
//! codebundle
//!
//! # Bundle a Rust project
//! codebundle ../my-crate -e .rs,.toml -x target,.git -o crate.txt
//!
//! # Show which files would be bundled
//! codebundle --list
//! ```

pub mod bundler;
pub mod config;
pub mod error;
pub mod fs_utils;

// Re-export main types and functions for convenience
pub use bundler::{
    BANNER, BundleConfig, BundleReport, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS,
    DEFAULT_OUTPUT, RULE_WIDTH, SelectedFile, bundle, selected_files, write_bundle,
};
pub use config::{ConfigOverrides, FileConfig, load_config_file, resolve_config};
pub use error::{BundleError, Result};
