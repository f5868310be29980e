use crate::error::ReleaseError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogType {
    Text,
    Html,
    Markdown,
}

/// Release channel of an uploaded file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Alpha,
    Beta,
    Release,
}

/// The `metadata` part of an upload request.
///
/// Serializes to exactly five camel cased fields; nothing else goes over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub changelog: String,
    pub changelog_type: ChangelogType,
    pub display_name: String,
    pub game_versions: Vec<u32>,
    pub release_type: ReleaseType,
}

/// A changelog file takes precedence over inline text; neither gives an empty changelog.
pub fn load_changelog(
    inline: Option<&str>,
    changelog_file: Option<&Path>,
) -> Result<String, ReleaseError> {
    match changelog_file {
        Some(path) if !path.as_os_str().is_empty() => {
            std::fs::read_to_string(path).map_err(|source| ReleaseError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(inline.unwrap_or_default().to_string()),
    }
}
