use crate::bundler::BundleConfig;
use crate::error::{BundleError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Options read from a TOML configuration file
///
/// Every key is optional. Relative paths are taken as given, i.e. relative
/// to the working directory of the run.
///
/// ```toml
/// root = "."
/// output = "bundle.txt"
/// extensions = [".dart", ".yaml"]
/// exclude_dirs = ["build", ".git"]
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
}

/// Reads and parses a configuration file
///
/// # Errors
///
/// Returns `BundleError::Config` if the file can't be read or isn't valid TOML
/// for [`FileConfig`].
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| BundleError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| BundleError::Config {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Builds the run configuration: command line > config file > built-in default
pub fn resolve_config(overrides: ConfigOverrides, file: Option<FileConfig>) -> BundleConfig {
    let file = file.unwrap_or_default();
    let defaults = BundleConfig::default();

    let config = BundleConfig {
        root: overrides.root.or(file.root).unwrap_or(defaults.root),
        output: overrides.output.or(file.output).unwrap_or(defaults.output),
        extensions: pick_set(overrides.extensions, file.extensions, defaults.extensions),
        excluded_dirs: pick_set(
            overrides.exclude_dirs,
            file.exclude_dirs,
            defaults.excluded_dirs,
        ),
    };

    for ext in &config.extensions {
        if !ext.starts_with('.') {
            log::warn!("Extension '{ext}' has no leading dot and matches any name ending in it");
        }
    }

    config
}

fn pick_set(
    cli: Option<Vec<String>>,
    file: Option<Vec<String>>,
    default: BTreeSet<String>,
) -> BTreeSet<String> {
    cli.or(file)
        .map(|items| items.into_iter().collect())
        .unwrap_or(default)
}
