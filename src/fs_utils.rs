use crate::error::{BundleError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Checks that the traversal root exists and is a directory
///
/// # Errors
///
/// - `BundleError::RootNotFound` if nothing exists at `root`.
/// - `BundleError::NotADirectory` if `root` is a file or other non-directory.
/// - `BundleError::Io` for any other metadata failure.
pub fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(BundleError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BundleError::RootNotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(BundleError::io(root, e)),
    }
}

/// Reads the full contents of a file as strict UTF-8
///
/// Invalid byte sequences are an error, never replaced.
///
/// # Errors
///
/// - `BundleError::Io` if the file can't be opened or read.
/// - `BundleError::InvalidUtf8` if the bytes don't decode.
pub fn read_file_contents(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| BundleError::io(path, e))?;
    String::from_utf8(bytes).map_err(|e| BundleError::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Whether a directory with this name is pruned from the walk
pub fn is_excluded_dir(name: &str, excluded: &BTreeSet<String>) -> bool {
    excluded.contains(name)
}

/// Whether a file name ends with any of the configured extensions
pub fn has_selected_extension(name: &str, extensions: &BTreeSet<String>) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
