use clap::{Parser, ValueEnum};
use codebundle::{
    BundleConfig, BundleError, ConfigOverrides, Result, bundle, load_config_file, resolve_config,
    selected_files,
};
use log::LevelFilter;
use std::path::PathBuf;

const LONG_HELP: &str = r#"
Bundle format:
  FLUTTER PROJECT CODEBASE BUNDLE
  Generated for Gemini Analysis


  ============================================================
  PATH: ./lib/main.dart
  ============================================================

  <file content>

Examples:
  # Bundle the current Flutter project with the built-in defaults
  codebundle
  # Bundle another directory into a chosen file
  codebundle ~/src/app -o app.txt
  # Bundle a Rust crate
  codebundle -e .rs,.toml -x target,.git
  # Use a configuration file (command-line flags still win)
  codebundle --config codebundle.toml
  # Show which files would be bundled
  codebundle --list
  # Same, as JSON for scripting
  codebundle --list=json

Configuration file (all keys optional):
  root = "."
  output = "bundle.txt"
  extensions = [".dart", ".yaml"]
  exclude_dirs = ["build", ".dart_tool", ".git"]
"#;

/// Flatten a project tree into one text file for LLM context.
#[derive(Parser, Debug)]
#[command(
    name = "codebundle",
    version,
    about = "Flatten a project tree into one text file for LLM context.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Directory to bundle [default: .]
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Bundle file to write [default: flutter_full_codebase.txt]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// File extension to include, e.g. ".dart" (repeatable, comma-separated) [default: .dart,.yaml]
    #[arg(short = 'e', long = "ext", value_name = "EXT", value_delimiter = ',', action = clap::ArgAction::Append)]
    extensions: Option<Vec<String>>,

    /// Directory name to skip at any depth (repeatable, comma-separated)
    #[arg(short = 'x', long = "exclude-dir", value_name = "NAME", value_delimiter = ',', action = clap::ArgAction::Append)]
    exclude_dirs: Option<Vec<String>>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the files that would be bundled instead of writing the bundle
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain")]
    list: Option<ListFormat>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// One path per line
    Plain,
    /// JSON array for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    log::debug!("Using {config:?}");

    let result = if let Some(format) = cli.list {
        list_files(&config, format)
    } else {
        run_bundle(&config, cli.quiet)
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<BundleConfig> {
    let file = cli
        .config
        .as_deref()
        .map(|path| {
            log::info!("Reading configuration from {}", path.display());
            load_config_file(path)
        })
        .transpose()?;

    let overrides = ConfigOverrides {
        root: cli.root.clone(),
        output: cli.output.clone(),
        extensions: cli.extensions.clone(),
        exclude_dirs: cli.exclude_dirs.clone(),
    };

    Ok(resolve_config(overrides, file))
}

fn run_bundle(config: &BundleConfig, quiet: bool) -> Result<()> {
    log::info!(
        "Bundling {} into {}",
        config.root.display(),
        config.output.display()
    );

    let report = bundle(config)?;

    if report.errors > 0 {
        log::warn!(
            "{} of {} files could not be read; see the placeholders in the bundle",
            report.errors,
            report.files
        );
    }

    if !quiet {
        println!(
            "✅ Success! Your Flutter codebase is bundled in: {}",
            report.output.display()
        );
    }
    Ok(())
}

fn list_files(config: &BundleConfig, format: ListFormat) -> Result<()> {
    let files = selected_files(config)?;
    log::info!("{} files selected", files.len());

    match format {
        ListFormat::Plain => {
            for file in &files {
                println!("{}", file.path.display());
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&files).map_err(BundleError::from)?;
            println!("{json}");
        }
    }

    Ok(())
}
