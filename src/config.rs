use crate::error::ReleaseError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_BASE_URI: &str = "https://:game.curseforge.com";
pub const USER_AGENT: &str = "twitch-release-plugin";
/// `X-Api-Token`, in the lowercase form `HeaderName::from_static` requires
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Connection settings for the project API.
///
/// Only obtainable through [`ClientConfig::new`], so every field is known to be
/// populated and the token is known to be a valid header value.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_uri_template: String,
    game: String,
    project_id: String,
    token: HeaderValue,
}

impl ClientConfig {
    pub fn new(
        base_uri_template: impl Into<String>,
        game: impl Into<String>,
        project_id: impl Into<String>,
        token: &str,
    ) -> Result<ClientConfig, ReleaseError> {
        let base_uri_template = base_uri_template.into();
        let game = game.into();
        let project_id = project_id.into();

        if token.is_empty() {
            return Err(ReleaseError::empty("token"));
        }
        if project_id.is_empty() {
            return Err(ReleaseError::empty("projectId"));
        }
        if base_uri_template.is_empty() {
            return Err(ReleaseError::empty("baseUri"));
        }
        if game.is_empty() {
            return Err(ReleaseError::empty("game"));
        }

        let mut token =
            HeaderValue::from_str(token).map_err(|_| ReleaseError::InvalidClientState {
                field: "token",
                reason: "is not a valid header value",
            })?;

        token.set_sensitive(true);

        Ok(ClientConfig {
            base_uri_template,
            game,
            project_id,
            token,
        })
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Substitutes `:game` into the base URI and `:projectId` into `path`.
    ///
    /// Replacement is literal; values are not escaped. The result is returned
    /// exactly as built, or rejected if it is not a URI that parses back to itself.
    pub fn endpoint_uri(&self, path: &str) -> Result<String, ReleaseError> {
        let uri = format!(
            "{}{}",
            self.base_uri_template.replace(":game", &self.game),
            path.replace(":projectId", &self.project_id)
        );

        if let Some(c) = uri.chars().find(|c| !is_uri_char(*c)) {
            return Err(ReleaseError::UriConstruction {
                reason: format!("invalid character {:?}", c),
                uri,
            });
        }

        let parsed = match Url::parse(&uri) {
            Ok(parsed) => parsed,
            Err(err) => {
                return Err(ReleaseError::UriConstruction {
                    reason: err.to_string(),
                    uri,
                })
            }
        };

        // Scheme and host compare case-insensitively, nothing else may change
        if !parsed.as_str().eq_ignore_ascii_case(&uri) {
            return Err(ReleaseError::UriConstruction {
                reason: format!("would be sent as '{}'", parsed),
                uri,
            });
        }

        Ok(uri)
    }

    /// Builds a client that sends the plugin user agent and the API token on every request.
    pub fn http_client(&self, timeout: Duration) -> Result<reqwest::Client, ReleaseError> {
        let mut headers = HeaderMap::new();

        headers.insert(HeaderName::from_static(API_TOKEN_HEADER), self.token.clone());

        Ok(reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?)
    }
}

/// RFC 3986 unreserved, reserved and percent characters
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "/api/projects/:projectId/upload-file";

    fn assert_rejected(game: &str, project_id: &str) {
        let config = ClientConfig::new(DEFAULT_BASE_URI, game, project_id, "t").unwrap();

        match config.endpoint_uri(ENDPOINT) {
            Err(ReleaseError::UriConstruction { uri, .. }) => assert_eq!(
                uri,
                format!("https://{game}.curseforge.com/api/projects/{project_id}/upload-file")
            ),
            other => panic!("expected uri error for {game}/{project_id}, got {other:?}"),
        }
    }

    #[test]
    fn prepares_endpoint_uri() {
        for (game, project_id) in [("wow", "111111"), ("minecraft", "42"), ("sc2", "9")] {
            let config = ClientConfig::new(DEFAULT_BASE_URI, game, project_id, "t").unwrap();

            assert_eq!(
                config.endpoint_uri(ENDPOINT).unwrap(),
                format!("https://{game}.curseforge.com/api/projects/{project_id}/upload-file")
            );
        }
    }

    #[test]
    fn keeps_game_case() {
        let config = ClientConfig::new(DEFAULT_BASE_URI, "WoW", "111111", "t").unwrap();

        assert_eq!(
            config.endpoint_uri(ENDPOINT).unwrap(),
            "https://WoW.curseforge.com/api/projects/111111/upload-file"
        );
    }

    #[test]
    fn rejects_any_empty_field() {
        let cases = [
            (DEFAULT_BASE_URI, "wow", "111111", "", "token"),
            (DEFAULT_BASE_URI, "wow", "", "t", "projectId"),
            ("", "wow", "111111", "t", "baseUri"),
            (DEFAULT_BASE_URI, "", "111111", "t", "game"),
        ];

        for (base_uri, game, project_id, token, name) in cases {
            match ClientConfig::new(base_uri, game, project_id, token) {
                Err(ReleaseError::InvalidClientState { field, reason }) => {
                    assert_eq!(field, name);
                    assert_eq!(reason, "must not be empty");
                }
                other => panic!("expected invalid state for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_token_unfit_for_header() {
        let err = ClientConfig::new(DEFAULT_BASE_URI, "wow", "1", "line\nbreak").unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::InvalidClientState { field: "token", .. }
        ));
        assert_eq!(
            err.to_string(),
            "Client is in invalid state, token is not a valid header value"
        );
    }

    #[test]
    fn rejects_uri_with_invalid_characters() {
        assert_rejected("bad game", "1");
        assert_rejected("wow", "11 11");
        assert_rejected("wow", "1\\..\\..\\x");
    }

    #[test]
    fn rejects_uri_the_parser_would_rewrite() {
        assert_rejected("wow", "1/../../x");
        assert_rejected("wow", "./1");
    }

    #[test]
    fn hides_token_in_debug_output() {
        let config = ClientConfig::new(DEFAULT_BASE_URI, "wow", "1", "secret-token").unwrap();

        assert!(!format!("{config:?}").contains("secret-token"));
    }

    #[test]
    fn token_header_matches_api_name() {
        assert_eq!(
            HeaderName::from_static(API_TOKEN_HEADER),
            HeaderName::from_bytes(b"X-Api-Token").unwrap()
        );
    }

    #[test]
    fn builds_http_client() {
        let config = ClientConfig::new(DEFAULT_BASE_URI, "wow", "1", "t").unwrap();

        assert!(config.http_client(Duration::from_secs(5)).is_ok());
    }
}
