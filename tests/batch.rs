use std::fs;

use cssflip_cli::{BatchError, Config, convert_tree, discover};
use tempfile::TempDir;

fn tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("widgets/forms")).unwrap();
    fs::write(root.join("site.css"), ".a { float: left; }").unwrap();
    fs::write(root.join("site-rtl.css"), "stale output").unwrap();
    fs::write(root.join("widgets/nav.css"), ".nav { margin: 0 1px 0 2px; }").unwrap();
    fs::write(root.join("widgets/forms/input.CSS"), "input { text-align: left }").unwrap();
    fs::write(root.join("widgets/readme.txt"), "float: left").unwrap();
    dir
}

#[test]
fn test_discover_skips_generated_and_foreign_files() {
    let dir = tree();
    let found = discover(&Config::new(dir.path())).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![
            std::path::PathBuf::from("site.css"),
            "widgets/forms/input.CSS".into(),
            "widgets/nav.css".into(),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_discover_follows_symlinked_directories() {
    use std::os::unix::fs::symlink;

    let shared = tempfile::tempdir().unwrap();
    fs::write(shared.path().join("theme.css"), ".t { float: left }").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("site.css"), ".a { float: left }").unwrap();
    symlink(shared.path(), root.join("shared")).unwrap();
    symlink(root, shared.path().join("back")).unwrap();
    symlink(root.join("missing"), root.join("dangling.css")).unwrap();

    let found = discover(&Config::new(root)).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![std::path::PathBuf::from("shared/theme.css"), "site.css".into()]
    );
}

#[test]
fn test_convert_tree_writes_siblings() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tree();
    let root = dir.path();

    let summary = convert_tree(&Config::new(root)).unwrap();
    assert_eq!(summary.files(), 3);
    assert_eq!(summary.substitutions(), 3);

    assert_eq!(
        fs::read_to_string(root.join("site-rtl.css")).unwrap(),
        ".a { float: right; }"
    );
    assert_eq!(
        fs::read_to_string(root.join("widgets/nav-rtl.css")).unwrap(),
        ".nav { margin: 0 2px 0 1px; }"
    );
    assert_eq!(
        fs::read_to_string(root.join("widgets/forms/input-rtl.CSS")).unwrap(),
        "input { text-align: right }"
    );
    assert!(!root.join("widgets/readme-rtl.txt").exists());
    assert!(!root.join("site-rtl-rtl.css").exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tree();
    let config = Config::new(dir.path());
    convert_tree(&config).unwrap();
    let first = fs::read_to_string(dir.path().join("site-rtl.css")).unwrap();

    let summary = convert_tree(&config).unwrap();
    assert_eq!(summary.files(), 3);
    assert_eq!(fs::read_to_string(dir.path().join("site-rtl.css")).unwrap(), first);
}

#[test]
fn test_custom_suffix_and_url_options() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.css"), "a { background: url(left.png) left }").unwrap();

    let config =
        Config::from_args(["--suffix", ".rtl", "--url-left-right", dir.path().to_str().unwrap()])
            .unwrap();
    convert_tree(&config).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("a.rtl.css")).unwrap(),
        "a { background: url(right.png) right }"
    );
}

#[test]
fn test_missing_root_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_tree(&Config::new(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, BatchError::Io { .. }), "{err:?}");
}

#[test]
fn test_non_utf8_stylesheet_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.css"), [0xff, 0xfe, b'a']).unwrap();
    let err = convert_tree(&Config::new(dir.path())).unwrap_err();
    match err {
        BatchError::Io { path, .. } => assert!(path.ends_with("bad.css")),
        other => panic!("unexpected error: {other:?}"),
    }
}
