#![deny(clippy::unwrap_used)]

mod config;
mod workspace;

use std::fs;
use std::path::{Path, PathBuf};

use attrorder_core::{canonicalize_text_with_report, CanonicalizeReport, OrderOptions};
use attrorder_syntax::{lex_file, CstFile, Diagnostic, FileDiagnostic};
use rayon::prelude::*;
use tracing::{debug, info};

pub use config::{
    discover_config, load_options, parse_config, read_config, AttrOrderConfig, CONFIG_FILE_NAME,
};

#[derive(Debug, thiserror::Error)]
pub enum AttrOrderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0} file(s) need formatting")]
    CheckFailed(usize),
}

/// One source file after canonicalization.
#[derive(Debug, Clone)]
pub struct FormattedFile {
    pub path: PathBuf,
    pub original: String,
    pub formatted: String,
    pub report: CanonicalizeReport,
    pub diagnostics: Vec<Diagnostic>,
}

impl FormattedFile {
    pub fn changed(&self) -> bool {
        self.original != self.formatted
    }

    pub fn file_diagnostics(&self) -> Vec<FileDiagnostic> {
        let path = self.path.display().to_string();
        self.diagnostics
            .iter()
            .map(|diagnostic| FileDiagnostic {
                path: path.clone(),
                diagnostic: diagnostic.clone(),
            })
            .collect()
    }
}

/// Resolves a target string into the source files it names, sorted.
pub fn resolve_target(target: &str) -> Result<Vec<PathBuf>, AttrOrderError> {
    workspace::expand_target(target)
}

/// Loads options for `target`: `explicit` config if given, else the nearest `attrorder.toml`.
pub fn options_for_target(
    target: &str,
    explicit: Option<&Path>,
) -> Result<OrderOptions, AttrOrderError> {
    let root = workspace::target_root(target)?;
    load_options(explicit, &root)
}

pub fn format_file(path: &Path, options: &OrderOptions) -> Result<FormattedFile, AttrOrderError> {
    let original = fs::read_to_string(path)?;
    let result = canonicalize_text_with_report(&original, options);
    debug!(
        path = %path.display(),
        lists = result.report.lists_seen,
        rewritten = result.report.rewritten.len(),
        bailed = result.report.bailed.len(),
        "formatted file"
    );
    Ok(FormattedFile {
        path: path.to_path_buf(),
        original,
        formatted: result.text,
        report: result.report,
        diagnostics: result.diagnostics,
    })
}

/// Formats files in parallel; results keep the order of `paths`.
pub fn format_files(
    paths: &[PathBuf],
    options: &OrderOptions,
) -> Result<Vec<FormattedFile>, AttrOrderError> {
    paths
        .par_iter()
        .map(|path| format_file(path, options))
        .collect()
}

/// Formats exactly one target file and returns its canonical text.
pub fn format_target(
    target: &str,
    options: &OrderOptions,
) -> Result<FormattedFile, AttrOrderError> {
    let paths = workspace::expand_target(target)?;
    let [path] = paths.as_slice() else {
        return Err(AttrOrderError::InvalidCommand(
            "fmt expects a single file path (use --write for directories)".to_string(),
        ));
    };
    format_file(path, options)
}

/// Rewrites every file of `target` whose canonical form differs; returns the files written.
pub fn write_target(
    target: &str,
    options: &OrderOptions,
) -> Result<Vec<FormattedFile>, AttrOrderError> {
    let paths = workspace::expand_target(target)?;
    let changed: Vec<FormattedFile> = format_files(&paths, options)?
        .into_iter()
        .filter(FormattedFile::changed)
        .collect();
    for file in &changed {
        fs::write(&file.path, &file.formatted)?;
        info!(path = %file.path.display(), lists = file.report.rewritten.len(), "wrote file");
    }
    Ok(changed)
}

/// Files of `target` that are not in canonical form. Nothing is written.
pub fn check_target(
    target: &str,
    options: &OrderOptions,
) -> Result<Vec<FormattedFile>, AttrOrderError> {
    let paths = workspace::expand_target(target)?;
    Ok(format_files(&paths, options)?
        .into_iter()
        .filter(FormattedFile::changed)
        .collect())
}

/// Lexes one target file for token dumps.
pub fn lex_target(target: &str) -> Result<CstFile, AttrOrderError> {
    let paths = workspace::expand_target(target)?;
    let [path] = paths.as_slice() else {
        return Err(AttrOrderError::InvalidCommand(
            "lex expects a single file path".to_string(),
        ));
    };
    let content = fs::read_to_string(path)?;
    Ok(lex_file(&path.display().to_string(), &content))
}
