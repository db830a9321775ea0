use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Resolves a target relative to the current directory, then relative to any enclosing
/// directory that holds an `attrorder.toml`.
pub(super) fn resolve_target_path(target: &str) -> Option<PathBuf> {
    let target_path = Path::new(target);
    if target_path.is_absolute() {
        return target_path.exists().then(|| target_path.to_path_buf());
    }

    if target_path.exists() {
        return Some(target_path.to_path_buf());
    }

    let Ok(mut dir) = std::env::current_dir() else {
        return None;
    };

    loop {
        if dir.join(CONFIG_FILE_NAME).exists() {
            let candidate = dir.join(target);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        let Some(parent) = dir.parent() else {
            break;
        };
        dir = parent.to_path_buf();
    }

    None
}
