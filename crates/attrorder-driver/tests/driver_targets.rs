use std::fs;
use std::path::Path;

use attrorder_core::OrderOptions;
use attrorder_driver::{
    check_target, format_target, lex_target, options_for_target, resolve_target, write_target,
    AttrOrderError,
};

const UNSORTED: &str = "@interface A : NSObject\n@property(copy, nonatomic) NSString *name;\n@end\n";
const SORTED: &str = "@interface A : NSObject\n@property(nonatomic, copy) NSString *name;\n@end\n";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, content).expect("write file");
}

fn target(path: &Path) -> String {
    path.display().to_string()
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        &dir.path().join("attrorder.toml"),
        "attribute_order = [\"class\", \"nonatomic\", \"copy\"]\n",
    );
    write(&dir.path().join("Sources/A.m"), UNSORTED);
    write(&dir.path().join("Sources/A.h"), SORTED);
    write(&dir.path().join("Sources/Nested/B.mm"), UNSORTED);
    write(&dir.path().join("Sources/notes.txt"), UNSORTED);
    dir
}

#[test]
fn directory_targets_expand_to_objc_sources() {
    let dir = project();
    let sources = dir.path().join("Sources");

    let direct = resolve_target(&target(&sources)).expect("direct");
    let names: Vec<_> = direct
        .iter()
        .map(|p| p.file_name().and_then(|n| n.to_str()).unwrap_or_default())
        .collect();
    assert_eq!(names, ["A.h", "A.m"]);

    let recursive = resolve_target(&format!("{}/...", target(&sources))).expect("recursive");
    assert_eq!(recursive.len(), 3);
    let globbed = resolve_target(&format!("{}/**", target(&sources))).expect("globbed");
    assert_eq!(recursive, globbed);
}

#[test]
fn missing_or_empty_targets_are_invalid_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    assert!(matches!(
        resolve_target(&target(&missing)),
        Err(AttrOrderError::InvalidPath(_))
    ));
    assert!(matches!(
        resolve_target(&target(dir.path())),
        Err(AttrOrderError::InvalidPath(_))
    ));
}

#[test]
fn config_is_discovered_from_ancestors() {
    let dir = project();
    let file = dir.path().join("Sources/Nested/B.mm");
    let options = options_for_target(&target(&file), None).expect("options");
    assert_eq!(options.order.names(), ["class", "nonatomic", "copy"]);

    let formatted = format_target(&target(&file), &options).expect("format");
    assert_eq!(formatted.formatted, SORTED);
    assert!(formatted.changed());
}

#[test]
fn explicit_config_wins_over_discovery() {
    let dir = project();
    let explicit = dir.path().join("other.toml");
    write(&explicit, "attribute_order = [\"copy\", \"nonatomic\"]\n");
    let file = dir.path().join("Sources/A.h");

    let options = options_for_target(&target(&file), Some(&explicit)).expect("options");
    let formatted = format_target(&target(&file), &options).expect("format");
    assert_eq!(formatted.formatted, UNSORTED);
}

#[test]
fn broken_config_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(&dir.path().join("attrorder.toml"), "attribute_order = [1, 2]\n");
    write(&dir.path().join("A.m"), SORTED);
    let err = options_for_target(&target(&dir.path().join("A.m")), None).expect_err("bad config");
    assert!(matches!(err, AttrOrderError::Config(_)));
}

#[test]
fn fmt_without_write_needs_a_single_file() {
    let dir = project();
    let err = format_target(&target(&dir.path().join("Sources")), &OrderOptions::default())
        .expect_err("directory");
    assert!(matches!(err, AttrOrderError::InvalidCommand(_)));
}

#[test]
fn check_reports_and_write_fixes() {
    let dir = project();
    let all = format!("{}/...", target(dir.path()));
    let options = options_for_target(&all, None).expect("options");

    let pending = check_target(&all, &options).expect("check");
    assert_eq!(pending.len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("Sources/A.m")).expect("read"),
        UNSORTED
    );

    let written = write_target(&all, &options).expect("write");
    assert_eq!(written.len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("Sources/A.m")).expect("read"),
        SORTED
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("Sources/notes.txt")).expect("read"),
        UNSORTED
    );

    assert!(check_target(&all, &options).expect("recheck").is_empty());
}

#[test]
fn lex_target_keeps_diagnostics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("A.m");
    write(&file, "@property(copy) id x; /* open");
    let cst = lex_target(&target(&file)).expect("lex");
    assert_eq!(cst.diagnostics.len(), 1);
    assert_eq!(cst.path, target(&file));
}
