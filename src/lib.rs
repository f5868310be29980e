mod log_macros;

pub mod api_structs;
pub mod config;
pub mod error;
pub mod metadata;
pub mod release;
pub mod settings;

use clap::{error::ErrorKind, Parser};
use config::{ClientConfig, DEFAULT_BASE_URI};
use core::fmt::Arguments;
use error::ReleaseError;
use metadata::{load_changelog, ChangelogType, Metadata, ReleaseType};
use release::ReleaseService;
use settings::{resolve_token, Settings};
use std::time::Duration;
use std::{error::Error, path::PathBuf};
use yansi::Paint;

pub trait ReleaseLog {
    fn output(self: &Self, args: Arguments);
    fn warning(self: &Self, args: Arguments);
    fn error(self: &Self, args: Arguments);
}

pub struct ReleaseTool<'a> {
    log: &'a dyn ReleaseLog,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Disable colors in output
    #[arg(long = "no-color", env = "NO_CLI_COLOR")]
    no_color: bool,

    /// Game the project belongs to
    #[arg(long, env = "TWITCH_RELEASE_GAME", default_value = "wow")]
    game: String,

    /// Id of the project (shown on the project page)
    #[arg(short = 'p', long, env = "TWITCH_RELEASE_PROJECT_ID", value_name = "ID")]
    project_id: Option<String>,

    /// Display name of the uploaded file
    #[arg(
        short = 'n',
        long,
        env = "TWITCH_RELEASE_DISPLAY_NAME",
        default_value = "addon"
    )]
    display_name: String,

    /// Changelog text
    #[arg(long, env = "TWITCH_RELEASE_CHANGELOG")]
    changelog: Option<String>,

    /// Changelog file, overrides --changelog
    #[arg(long, env = "TWITCH_RELEASE_CHANGELOG_FILE", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    changelog_file: Option<PathBuf>,

    /// Format of the changelog
    #[arg(
        long,
        env = "TWITCH_RELEASE_CHANGELOG_TYPE",
        value_enum,
        default_value = "text"
    )]
    changelog_type: ChangelogType,

    /// Comma separated game version ids
    #[arg(
        short = 'g',
        long,
        env = "TWITCH_RELEASE_GAME_VERSIONS",
        value_name = "IDS",
        value_delimiter = ','
    )]
    game_versions: Vec<u32>,

    /// Release channel
    #[arg(
        long,
        env = "TWITCH_RELEASE_RELEASE_TYPE",
        value_enum,
        default_value = "release"
    )]
    release_type: ReleaseType,

    /// The addon file to upload
    #[arg(short = 'f', long, env = "TWITCH_RELEASE_FILE", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    file: Option<PathBuf>,

    /// API token, used when no server entry provides one
    #[arg(short = 't', long, env = "TWITCH_RELEASE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Server entry in the settings file holding the API token
    #[arg(short = 's', long, env = "TWITCH_RELEASE_SERVER", value_name = "NAME")]
    server: Option<String>,

    /// JSON settings file with server entries
    #[arg(long, env = "TWITCH_RELEASE_SETTINGS", value_name = "JSON-FILE", value_hint = clap::ValueHint::FilePath)]
    settings_file: Option<PathBuf>,

    /// Base URI template, ':game' is replaced with the game
    #[arg(long, env = "TWITCH_RELEASE_BASE_URI", default_value = DEFAULT_BASE_URI, hide = true)]
    base_uri: String,

    /// The timeout for the upload in seconds
    #[arg(long = "timeout", value_name = "TIMEOUT-SECS", default_value = "300")]
    timeout_secs: u64,
}

impl<'a> ReleaseTool<'a> {
    pub fn new(log: &'a dyn ReleaseLog) -> ReleaseTool {
        ReleaseTool { log }
    }

    pub async fn run(
        self: &mut Self,
        args: impl IntoIterator<Item = std::ffi::OsString>,
    ) -> Result<(), Box<dyn Error>> {
        let cli = match Cli::try_parse_from(args) {
            Ok(m) => m,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    output!(self.log, "{}", err.to_string());
                    return Ok(());
                }
                _ => return Err(ReleaseError::InvalidParameter(err).into()),
            },
        };

        if cli.no_color {
            Paint::disable();
        }

        let project_id = cli
            .project_id
            .filter(|id| !id.is_empty())
            .ok_or(ReleaseError::MissingRequiredParameter("projectId"))?;

        if cli.game_versions.is_empty() {
            return Err(ReleaseError::MissingRequiredParameter("gameVersions").into());
        }

        let file = cli
            .file
            .filter(|file| !file.as_os_str().is_empty())
            .ok_or(ReleaseError::MissingRequiredParameter("file"))?;

        let store = match &cli.settings_file {
            Some(path) => Some(Settings::from_file(path).map_err(|err| {
                ReleaseError::CredentialResolution {
                    message: format!("Unable to load settings file '{}'", path.display()),
                    source: Some(err),
                }
            })?),
            None => None,
        };
        let token = resolve_token(
            cli.server.as_deref(),
            store.as_ref(),
            cli.token.as_deref(),
            self.log,
        )?;
        let config = ClientConfig::new(cli.base_uri, cli.game, project_id, &token)?;

        let metadata = Metadata {
            changelog: load_changelog(cli.changelog.as_deref(), cli.changelog_file.as_deref())?,
            changelog_type: cli.changelog_type,
            display_name: cli.display_name,
            game_versions: cli.game_versions,
            release_type: cli.release_type,
        };

        output!(
            self.log,
            "Creating release '{}' for {} (game versions {:?})",
            metadata.display_name,
            config.game(),
            metadata.game_versions
        );

        let service =
            ReleaseService::new(&config, Duration::from_secs(cli.timeout_secs), self.log);

        service.upload(&metadata, &file).await?;

        Ok(())
    }
}
