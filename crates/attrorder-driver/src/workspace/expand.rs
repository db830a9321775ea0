use std::path::PathBuf;

use crate::AttrOrderError;

use super::resolve::resolve_target_path;
use super::walk::{collect_direct_files, collect_files};

/// Splits `dir/...` and `dir/**` into the directory and a recursive flag.
fn split_target(target: &str) -> (&str, bool) {
    let base = target
        .strip_suffix("/...")
        .or_else(|| target.strip_suffix("/**"));
    match base {
        Some("") => (".", true),
        Some(base) => (base, true),
        None => (target, false),
    }
}

/// The file or directory a target names, without expanding it.
pub(crate) fn target_root(target: &str) -> Result<PathBuf, AttrOrderError> {
    let (base, _) = split_target(target);
    resolve_target_path(base).ok_or_else(|| AttrOrderError::InvalidPath(target.to_string()))
}

pub(crate) fn expand_target(target: &str) -> Result<Vec<PathBuf>, AttrOrderError> {
    let (_, recursive) = split_target(target);
    let path = target_root(target)?;

    if path.is_file() {
        return Ok(vec![path]);
    }

    let mut paths = Vec::new();
    if path.is_dir() {
        if recursive {
            collect_files(&path, &mut paths)?;
        } else {
            collect_direct_files(&path, &mut paths)?;
        }
    }

    paths.sort();
    if paths.is_empty() {
        return Err(AttrOrderError::InvalidPath(target.to_string()));
    }

    Ok(paths)
}
