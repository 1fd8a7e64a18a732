use codebundle::{BANNER, BundleConfig, BundleError, bundle};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn config_for(root: &Path, output: &Path) -> BundleConfig {
    BundleConfig {
        root: root.to_path_buf(),
        output: output.to_path_buf(),
        ..BundleConfig::default()
    }
}

#[test]
fn excluded_directory_is_pruned() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();
    let root = project.path();
    fs::create_dir(root.join("lib")).unwrap();
    fs::create_dir(root.join("build")).unwrap();
    fs::write(root.join("lib/main.dart"), "void main(){}").unwrap();
    fs::write(root.join("build/gen.dart"), "generated").unwrap();

    let mut config = config_for(root, &out.path().join("bundle.txt"));
    config.excluded_dirs = set(&["build"]);
    let report = bundle(&config).unwrap();

    let written = fs::read_to_string(&config.output).unwrap();
    let main_path = root.join("lib").join("main.dart");
    assert!(written.contains(&format!("PATH: {}\n", main_path.display())));
    assert!(written.contains("void main(){}"));
    assert!(!written.contains("gen.dart"));
    assert!(!written.contains("generated"));
    assert_eq!(report.files, 1);
}

#[test]
fn only_configured_extensions_are_selected() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();
    let root = project.path();
    fs::write(root.join("pubspec.yaml"), "name: app").unwrap();
    fs::write(root.join("README.md"), "# App").unwrap();

    let mut config = config_for(root, &out.path().join("bundle.txt"));
    config.extensions = set(&[".dart", ".yaml"]);
    let report = bundle(&config).unwrap();

    let written = fs::read_to_string(&config.output).unwrap();
    assert!(written.contains("pubspec.yaml"));
    assert!(written.contains("name: app"));
    assert!(!written.contains("README.md"));
    assert_eq!(report.files, 1);
}

#[test]
fn unreadable_file_gets_placeholder_and_run_succeeds() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();
    let root = project.path();
    fs::write(root.join("broken.dart"), [0xff, 0xfe, 0x00, b'x']).unwrap();
    fs::write(root.join("good.dart"), "ok").unwrap();

    let config = config_for(root, &out.path().join("bundle.txt"));
    let report = bundle(&config).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.errors, 1);

    let written = fs::read_to_string(&config.output).unwrap();
    let header = format!("PATH: {}\n", root.join("broken.dart").display());
    let after = written.split(&header).nth(1).unwrap();
    let mut lines = after.lines();
    assert_eq!(lines.next(), Some("=".repeat(60).as_str()));
    assert_eq!(lines.next(), Some(""));
    assert!(lines.next().unwrap().starts_with("// Error reading file: "));
    assert!(written.ends_with("ok"));
}

#[test]
fn empty_tree_produces_banner_only() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    let config = config_for(project.path(), &out.path().join("bundle.txt"));
    let report = bundle(&config).unwrap();

    assert_eq!(fs::read_to_string(&config.output).unwrap(), BANNER);
    assert_eq!(report.files, 0);
    assert_eq!(report.errors, 0);
}

#[test]
fn missing_root_fails_before_output_is_created() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    let config = config_for(&project.path().join("nope"), &out.path().join("bundle.txt"));
    let err = bundle(&config).unwrap_err();
    assert!(matches!(err, BundleError::RootNotFound { .. }));
    assert!(!config.output.exists());
}

#[test]
fn every_selected_file_appears_exactly_once() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();
    let root = project.path();
    let files = [
        "pubspec.yaml",
        "lib/main.dart",
        "lib/src/widgets/button.dart",
        "test/widget_test.dart",
        "packages/api/lib/api.dart",
        "packages/api/pubspec.yaml",
    ];
    for (i, relative) in files.iter().enumerate() {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("content #{i}\n")).unwrap();
    }
    fs::create_dir_all(root.join("android/app")).unwrap();
    fs::write(root.join("android/app/plugin.dart"), "excluded").unwrap();

    let config = config_for(root, &out.path().join("bundle.txt"));
    let report = bundle(&config).unwrap();
    assert_eq!(report.files, files.len());

    let written = fs::read_to_string(&config.output).unwrap();
    for (i, relative) in files.iter().enumerate() {
        let header = format!("PATH: {}\n", root.join(relative).display());
        assert_eq!(written.matches(&header).count(), 1, "{relative}");
        assert_eq!(written.matches(&format!("content #{i}\n")).count(), 1);
    }
    assert!(!written.contains("excluded"));
}
