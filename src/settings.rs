use crate::{error::ReleaseError, warning, ReleaseLog};
use easy_error::{self, ResultExt};
use serde::Deserialize;
use std::path::Path;

/// Credential store holding named server entries.
///
/// ```json
/// { "servers": [{ "id": "curseforge", "passphrase": "..." }] }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    servers: Vec<Server>,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub id: String,
    pub passphrase: Option<String>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Settings, easy_error::Error> {
        let content = std::fs::read_to_string(path).context("Unable to read settings file")?;

        serde_json::from_str(&content).context("Unable to parse settings file")
    }

    pub fn server(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|server| server.id == id)
    }
}

/// Picks the API token.
///
/// A server entry in the settings store wins over an inline token. When the
/// entry cannot be found the inline token is used instead.
pub fn resolve_token(
    server: Option<&str>,
    settings: Option<&Settings>,
    inline_token: Option<&str>,
    log: &dyn ReleaseLog,
) -> Result<String, ReleaseError> {
    if let Some(server) = server {
        match settings.and_then(|settings| settings.server(server)) {
            Some(entry) => {
                return match entry.passphrase.as_deref() {
                    Some(passphrase) if !passphrase.is_empty() => Ok(passphrase.to_string()),
                    _ => Err(ReleaseError::credentials(format!(
                        "Found server entry '{}' in settings but its passphrase is missing or empty",
                        server
                    ))),
                };
            }
            None => warning!(
                log,
                "Unable to retrieve settings or server '{}'. Falling back to token parameter",
                server
            ),
        }
    }

    match inline_token {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ReleaseError::credentials(
            "Unable to read authentication configuration, make sure to set the token or server parameter",
        )),
    }
}
