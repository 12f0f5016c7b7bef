//! Command-line settings for a sync run.

use crate::sync::adapters::http::{DEFAULT_HABITICA_URL, DEFAULT_TODOIST_URL};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Raw command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "habitsync",
    version,
    about = "Sync Todoist tasks into Habitica",
    override_usage = "habitsync -u <USER_ID> -t <API_TOKEN> -a <TODOIST_TOKEN> [-f <DIR>]"
)]
pub struct CliArgs {
    /// Your Habitica user id.
    #[arg(short = 'u', long = "uid", env = "HABITICA_USER_ID")]
    pub uid: Option<String>,

    /// Your Habitica API token.
    #[arg(short = 't', long = "token", env = "HABITICA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Your Todoist API token.
    #[arg(short = 'a', long = "todoist", env = "TODOIST_API_TOKEN", hide_env_values = true)]
    pub todoist: Option<String>,

    /// Directory holding the sync history.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Habitica API root.
    #[arg(long, hide = true, default_value = DEFAULT_HABITICA_URL)]
    pub habitica_url: String,

    /// Todoist API root.
    #[arg(long, hide = true, default_value = DEFAULT_TODOIST_URL)]
    pub todoist_url: String,
}

/// Errors raised before any network access when settings are incomplete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `--uid` was not given.
    #[error("No HabitRPG User Id found")]
    MissingHabiticaUserId,
    /// `--token` was not given.
    #[error("No HabitRPG API Token found")]
    MissingHabiticaToken,
    /// `--todoist` was not given.
    #[error("No Todoist API Token found")]
    MissingTodoistToken,
    /// No `--file` and no home directory to fall back to.
    #[error("no history directory given and no home directory found")]
    MissingHistoryDirectory,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Habitica user id.
    pub habitica_user_id: String,
    /// Habitica API token.
    pub habitica_token: String,
    /// Todoist API token.
    pub todoist_token: String,
    /// Directory containing the history file.
    pub history_dir: PathBuf,
    /// Habitica API root.
    pub habitica_url: String,
    /// Todoist API root.
    pub todoist_url: String,
}

fn required(value: Option<String>, missing: ConfigError) -> Result<String, ConfigError> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(missing)
}

impl SyncConfig {
    /// Validates arguments, falling back to `home` for the history directory.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for the first missing credential, or
    /// [`ConfigError::MissingHistoryDirectory`] when neither `--file` nor a
    /// home directory is available.
    pub fn from_args(args: CliArgs, home: Option<PathBuf>) -> Result<Self, ConfigError> {
        let habitica_user_id = required(args.uid, ConfigError::MissingHabiticaUserId)?;
        let habitica_token = required(args.token, ConfigError::MissingHabiticaToken)?;
        let todoist_token = required(args.todoist, ConfigError::MissingTodoistToken)?;
        let history_dir = args
            .file
            .or(home)
            .ok_or(ConfigError::MissingHistoryDirectory)?;

        Ok(Self {
            habitica_user_id,
            habitica_token,
            todoist_token,
            history_dir,
            habitica_url: args.habitica_url,
            todoist_url: args.todoist_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, ConfigError, SyncConfig};
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    fn args(uid: Option<&str>, token: Option<&str>, todoist: Option<&str>) -> CliArgs {
        CliArgs {
            uid: uid.map(str::to_owned),
            token: token.map(str::to_owned),
            todoist: todoist.map(str::to_owned),
            file: None,
            habitica_url: "http://habitica.test".to_owned(),
            todoist_url: "http://todoist.test".to_owned(),
        }
    }

    #[rstest]
    #[case(args(None, Some("t"), Some("a")), ConfigError::MissingHabiticaUserId)]
    #[case(args(Some("u"), None, Some("a")), ConfigError::MissingHabiticaToken)]
    #[case(args(Some("u"), Some("t"), None), ConfigError::MissingTodoistToken)]
    #[case(args(Some("  "), Some("t"), Some("a")), ConfigError::MissingHabiticaUserId)]
    fn missing_credentials_are_rejected(#[case] input: CliArgs, #[case] expected: ConfigError) {
        let result = SyncConfig::from_args(input, Some(PathBuf::from("/home/user")));
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn history_dir_falls_back_to_home() {
        let config = SyncConfig::from_args(
            args(Some("u"), Some("t"), Some("a")),
            Some(PathBuf::from("/home/user")),
        )
        .expect("complete arguments should validate");
        assert_eq!(config.history_dir, PathBuf::from("/home/user"));
    }

    #[test]
    fn explicit_history_dir_wins_over_home() {
        let mut input = args(Some("u"), Some("t"), Some("a"));
        input.file = Some(PathBuf::from("/var/sync"));
        let config = SyncConfig::from_args(input, Some(PathBuf::from("/home/user")))
            .expect("complete arguments should validate");
        assert_eq!(config.history_dir, PathBuf::from("/var/sync"));
    }

    #[test]
    fn missing_home_without_file_is_rejected() {
        let result = SyncConfig::from_args(args(Some("u"), Some("t"), Some("a")), None);
        assert_eq!(result, Err(ConfigError::MissingHistoryDirectory));
    }

    #[test]
    fn short_flags_parse() {
        let parsed = CliArgs::try_parse_from([
            "habitsync", "-u", "user", "-t", "secret", "-a", "todo", "-f", "/tmp/h",
        ])
        .expect("flags should parse");
        assert_eq!(parsed.uid.as_deref(), Some("user"));
        assert_eq!(parsed.token.as_deref(), Some("secret"));
        assert_eq!(parsed.todoist.as_deref(), Some("todo"));
        assert_eq!(parsed.file, Some(PathBuf::from("/tmp/h")));
        assert_eq!(parsed.habitica_url, "https://habitica.com/api/v3");
    }
}
