use std::fs;
use std::path::{Path, PathBuf};

use crate::AttrOrderError;

const SOURCE_EXTENSIONS: &[&str] = &["m", "mm", "h"];

/// Objective-C implementation files and the headers that declare their properties.
pub(super) fn is_objc_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

pub(super) fn collect_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), AttrOrderError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            collect_files(&entry_path, paths)?;
            continue;
        }

        if is_objc_source(&entry_path) {
            paths.push(entry_path);
        }
    }
    Ok(())
}

pub(super) fn collect_direct_files(
    dir: &Path,
    paths: &mut Vec<PathBuf>,
) -> Result<(), AttrOrderError> {
    for entry in fs::read_dir(dir)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_objc_source(&entry_path) {
            paths.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_objc_extensions() {
        assert!(is_objc_source(Path::new("Sources/Account.m")));
        assert!(is_objc_source(Path::new("Sources/Bridge.mm")));
        assert!(is_objc_source(Path::new("Account.h")));
        assert!(!is_objc_source(Path::new("main.c")));
        assert!(!is_objc_source(Path::new("Makefile")));
    }
}
