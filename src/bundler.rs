use crate::error::{BundleError, Result};
use crate::fs_utils::{has_selected_extension, is_excluded_dir, read_file_contents, validate_root};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Two-line banner opening every bundle
pub const BANNER: &str = "FLUTTER PROJECT CODEBASE BUNDLE\nGenerated for Gemini Analysis\n";

/// Width of the `=` rule around each `PATH:` line
pub const RULE_WIDTH: usize = 60;

/// Bundle file name used when none is configured
pub const DEFAULT_OUTPUT: &str = "flutter_full_codebase.txt";

/// Extensions selected when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &[".dart", ".yaml"];

/// Directory names pruned when none are configured
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "build",
    ".dart_tool",
    ".gradle",
    ".idea",
    "android",
    "ios",
    "web",
    "linux",
    "macos",
    "windows",
    ".git",
];

/// Configuration for a single bundling run
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Directory the walk starts from
    pub root: PathBuf,
    /// Case-sensitive file name suffixes to include (e.g. `.dart`)
    pub extensions: BTreeSet<String>,
    /// Directory names pruned wherever they appear below the root
    pub excluded_dirs: BTreeSet<String>,
    /// Bundle destination, truncated at the start of the run
    pub output: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Outcome of a bundling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    /// Where the bundle was written
    pub output: PathBuf,
    /// Number of `PATH:` blocks written, placeholders included
    pub files: usize,
    /// Number of files whose content was replaced by an error placeholder
    pub errors: usize,
}

/// A file picked by the walk for inclusion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    /// Path as constructed by the walk (root joined with the entry)
    pub path: PathBuf,
    /// Path below the root
    pub relative: PathBuf,
}

/// Lists the files a bundle of `config` would contain, in bundle order
///
/// # Errors
///
/// - `BundleError::RootNotFound` or `BundleError::NotADirectory` for a bad root.
/// - `BundleError::Walk` if the root itself can't be listed.
pub fn selected_files(config: &BundleConfig) -> Result<Vec<SelectedFile>> {
    validate_root(&config.root)?;

    walk_selected(config)
        .map(|path| {
            let path = path?;
            let relative = path
                .strip_prefix(&config.root)
                .unwrap_or(&path)
                .to_path_buf();
            Ok(SelectedFile { path, relative })
        })
        .collect()
}

/// Writes the banner and one block per selected file to `writer`
///
/// Files that can't be read or decoded get a one-line placeholder instead
/// of their content and are counted in [`BundleReport::errors`].
///
/// # Errors
///
/// - `BundleError::RootNotFound` or `BundleError::NotADirectory` for a bad root.
/// - `BundleError::Io` if writing to `writer` fails.
/// - `BundleError::Walk` if the root itself can't be listed.
pub fn write_bundle<W: Write>(config: &BundleConfig, writer: &mut W) -> Result<BundleReport> {
    validate_root(&config.root)?;

    let write_err = |e: io::Error| BundleError::io(&config.output, e);
    let rule = "=".repeat(RULE_WIDTH);

    writer.write_all(BANNER.as_bytes()).map_err(write_err)?;

    let mut report = BundleReport {
        output: config.output.clone(),
        files: 0,
        errors: 0,
    };

    for path in walk_selected(config) {
        let path = path?;
        log::trace!("Bundling {}", path.display());

        write!(writer, "\n\n{rule}\nPATH: {}\n{rule}\n\n", path.display()).map_err(write_err)?;

        match read_file_contents(&path) {
            Ok(contents) => writer.write_all(contents.as_bytes()).map_err(write_err)?,
            Err(e) => {
                log::warn!("{e}");
                writeln!(writer, "// Error reading file: {e}").map_err(write_err)?;
                report.errors += 1;
            }
        }
        report.files += 1;
    }

    Ok(report)
}

/// Creates (or truncates) the configured output file and writes the bundle into it
///
/// The root is checked before the output is touched, so a bad root leaves
/// no file behind. A failure midway leaves the partial bundle on disk.
///
/// # Errors
///
/// - `BundleError::RootNotFound` or `BundleError::NotADirectory` for a bad root.
/// - `BundleError::OutputOpen` if the output can't be created.
/// - `BundleError::Io` if writing or flushing the output fails.
pub fn bundle(config: &BundleConfig) -> Result<BundleReport> {
    validate_root(&config.root)?;

    let file = File::create(&config.output).map_err(|source| BundleError::OutputOpen {
        path: config.output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let result = write_bundle(config, &mut writer);
    let flushed = writer
        .flush()
        .map_err(|e| BundleError::io(&config.output, e));

    let report = result?;
    flushed?;

    log::info!(
        "Bundled {} files ({} unreadable) into {}",
        report.files,
        report.errors,
        report.output.display()
    );
    Ok(report)
}

/// Lazily walks the tree, yielding selected file paths in bundle order
fn walk_selected(config: &BundleConfig) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    let output = OutputIdentity::new(&config.output);

    WalkDir::new(&config.root)
        .sort_by(files_before_dirs)
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, &config.excluded_dirs))
        .filter_map(move |result| match result {
            Ok(entry) => select_entry(entry, &config.extensions, &output).map(Ok),
            Err(err) if err.depth() == 0 => Some(Err(err.into())),
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                None
            }
        })
}

/// Files of a directory come before its subdirectories, each group by name
fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_pruned(entry: &DirEntry, excluded: &BTreeSet<String>) -> bool {
    // the root is never pruned, whatever its name
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let pruned = entry
        .file_name()
        .to_str()
        .is_some_and(|name| is_excluded_dir(name, excluded));
    if pruned {
        log::debug!("Pruning {}", entry.path().display());
    }
    pruned
}

fn select_entry(
    entry: DirEntry,
    extensions: &BTreeSet<String>,
    output: &OutputIdentity,
) -> Option<PathBuf> {
    if entry.file_type().is_dir() {
        return None;
    }
    // symlinked directories are listed but never descended into
    if entry.path_is_symlink() && entry.path().is_dir() {
        return None;
    }

    let name = entry.file_name().to_string_lossy();
    if !has_selected_extension(&name, extensions) {
        return None;
    }

    if output.matches(entry.path()) {
        log::debug!("Skipping bundle output {}", entry.path().display());
        return None;
    }

    Some(entry.into_path())
}

/// Recognizes the bundle file if it sits inside the walked tree
struct OutputIdentity {
    file_name: Option<std::ffi::OsString>,
    canonical: Option<PathBuf>,
}

impl OutputIdentity {
    fn new(output: &Path) -> Self {
        Self {
            file_name: output.file_name().map(ToOwned::to_owned),
            canonical: fs::canonicalize(output).ok(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(canonical) = &self.canonical else {
            return false;
        };
        if path.file_name() != self.file_name.as_deref() {
            return false;
        }
        fs::canonicalize(path).is_ok_and(|p| &p == canonical)
    }
}
