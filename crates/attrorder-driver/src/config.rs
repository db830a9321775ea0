use std::path::{Path, PathBuf};

use attrorder_core::{OrderOptions, OrderSpec, DEFAULT_MARKER};
use attrorder_syntax::{lex, TokenKind};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::AttrOrderError;

pub const CONFIG_FILE_NAME: &str = "attrorder.toml";

/// Contents of an `attrorder.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttrOrderConfig {
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub attribute_order: Vec<String>,
}

impl AttrOrderConfig {
    /// Validates the config and builds the options a formatting run shares across files.
    pub fn to_options(&self, origin: &Path) -> Result<OrderOptions, AttrOrderError> {
        let marker = match &self.marker {
            Some(marker) => {
                if !is_single_token(marker) {
                    return Err(config_error(
                        origin,
                        format!("marker {marker:?} must be a single token"),
                    ));
                }
                marker.clone()
            }
            None => DEFAULT_MARKER.to_string(),
        };

        for name in &self.attribute_order {
            if !is_attribute_name(name) {
                return Err(config_error(
                    origin,
                    format!("attribute_order entry {name:?} is not an attribute name"),
                ));
            }
        }

        let order = OrderSpec::new(self.attribute_order.iter().map(String::as_str));
        if order.names().len() != self.attribute_order.len() {
            warn!(
                path = %origin.display(),
                "attribute_order repeats names; the first position is used"
            );
        }

        Ok(OrderOptions { marker, order })
    }
}

pub fn parse_config(text: &str, origin: &Path) -> Result<AttrOrderConfig, AttrOrderError> {
    toml::from_str(text).map_err(|err| config_error(origin, err.to_string()))
}

pub fn read_config(path: &Path) -> Result<AttrOrderConfig, AttrOrderError> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text, path)
}

/// Nearest `attrorder.toml` in `start` (or its directory, for a file) and its ancestors.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let dir = if start.is_file() { start.parent()? } else { start };
    let dir = dir.canonicalize().ok()?;
    dir.ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Options for a run: the explicit config if given, else the nearest discovered one, else
/// defaults.
pub fn load_options(
    explicit: Option<&Path>,
    target_root: &Path,
) -> Result<OrderOptions, AttrOrderError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(target_root),
    };
    let Some(path) = path else {
        debug!("no {CONFIG_FILE_NAME} found; using defaults");
        return Ok(OrderOptions::default());
    };
    debug!(path = %path.display(), "loading config");
    read_config(&path)?.to_options(&path)
}

fn config_error(origin: &Path, message: String) -> AttrOrderError {
    AttrOrderError::Config(format!("failed to parse {}: {message}", origin.display()))
}

fn significant_kinds(text: &str) -> Vec<TokenKind> {
    let (tokens, diagnostics) = lex(text);
    if !diagnostics.is_empty() {
        return Vec::new();
    }
    tokens
        .iter()
        .filter(|token| !token.kind.is_trivia())
        .map(|token| token.kind)
        .collect()
}

fn is_single_token(text: &str) -> bool {
    !text.trim().is_empty() && text.trim() == text && significant_kinds(text).len() == 1
}

fn is_attribute_name(text: &str) -> bool {
    text.trim() == text && matches!(significant_kinds(text).as_slice(), [kind] if kind.is_word())
}
