use super::error::ConfigError;
use crate::render::prelude::{DEFAULT_FORMAT, DEFAULT_USER_AGENT};
use clap::{ArgGroup, Parser};
use derive_builder::Builder;
use directories::BaseDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const RUN_ID_ENV_VAR: &str = "SSRS_RUN_ID";
pub const PROFILE_FILE_NAME: &str = "profile.yaml";

/// Settings needed to build a `ReportRenderer` backed by the HTTP transport.
#[derive(Debug, Clone, Builder, PartialEq, Eq)]
#[builder(setter(into))]
pub struct RendererConfig {
    pub server_url: String,
    #[builder(default)]
    pub timeout: Option<Duration>,
    #[builder(default = "DEFAULT_USER_AGENT.to_string()")]
    pub user_agent: String,
}

/// On-disk profile, every field is optional and command line values win.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderProfile {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub default_format: Option<String>,
}

impl RenderProfile {
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|error| ConfigError::ProfileParseError {
            path: path.display().to_string(),
            error,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|error| ConfigError::IoError {
                    path: path.display().to_string(),
                    error,
                })?;
        Self::parse(path, &contents)
    }
}

#[derive(Parser, Debug, Default)]
#[clap(group = ArgGroup::new("server"))]
pub struct ServerOptions {
    /// Base URL of the report server, e.g. http://host/ReportServer
    #[arg(long, env = "SSRS_SERVER_URL", global(true))]
    server_url: Option<String>,

    /// Give up on the request after this long, e.g. 30s or 1500ms. No timeout by default.
    #[arg(long, env = "SSRS_TIMEOUT", global(true), value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// YAML profile holding serverUrl, timeout, userAgent and defaultFormat. When not set
    /// the profile in the user config directory is used if it exists.
    #[arg(long, env = "SSRS_CONFIG", global(true))]
    config: Option<PathBuf>,

    /// When outputting logs the run-id is the unique value that will define where these go.
    #[arg(long, global(true), env = RUN_ID_ENV_VAR)]
    run_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FoundConfig {
    pub renderer: RendererConfig,
    pub default_format: String,
    pub profile_path: Option<PathBuf>,
    pub run_id: String,
}

impl ServerOptions {
    pub fn generate_run_id() -> String {
        let id = nanoid::nanoid!(4, &nanoid::alphabet::SAFE);
        let now = chrono::Local::now();
        let current_time = now.format("%Y%m%d");
        format!("{}-{}", current_time, id)
    }

    pub fn get_run_id(&self) -> String {
        self.run_id.clone().unwrap_or_else(Self::generate_run_id)
    }

    fn find_profile(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }

        let default_path = default_profile_path()?;
        debug!("Checking if {} exists", default_path.display());
        default_path.exists().then_some(default_path)
    }

    pub async fn load_config(&self) -> Result<FoundConfig, ConfigError> {
        let profile_path = self.find_profile();
        let profile = match &profile_path {
            Some(path) => RenderProfile::load(path).await?,
            None => RenderProfile::default(),
        };

        let found_config = self.merge(profile, profile_path)?;
        debug!("Loaded config {:?}", found_config);

        Ok(found_config)
    }

    fn merge(
        &self,
        profile: RenderProfile,
        profile_path: Option<PathBuf>,
    ) -> Result<FoundConfig, ConfigError> {
        let is_set = |url: &String| !url.trim().is_empty();
        let server_url = self
            .server_url
            .clone()
            .filter(is_set)
            .or(profile.server_url.filter(is_set))
            .ok_or(ConfigError::MissingServerUrl)?;

        let timeout = match (self.timeout, profile.timeout) {
            (Some(timeout), _) => Some(timeout),
            (None, Some(value)) => Some(parse_duration(&value)?),
            (None, None) => None,
        };

        let mut builder = RendererConfigBuilder::default();
        builder.server_url(server_url).timeout(timeout);
        if let Some(user_agent) = profile.user_agent {
            builder.user_agent(user_agent);
        }
        let renderer = builder
            .build()
            .map_err(|_| ConfigError::MissingServerUrl)?;

        Ok(FoundConfig {
            renderer,
            default_format: profile
                .default_format
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            profile_path,
            run_id: self.get_run_id(),
        })
    }
}

pub fn default_profile_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("ssrs-render").join(PROFILE_FILE_NAME))
}

/// Accepts `30s`, `1500ms` or a bare number of seconds.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let v = value.trim();
    let parsed = if let Some(ms) = v.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(s) = v.strip_suffix('s') {
        s.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else {
        v.parse::<u64>().ok().map(Duration::from_secs)
    };

    parsed.ok_or_else(|| ConfigError::InvalidDuration {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(server_url: Option<&str>, timeout: Option<Duration>) -> ServerOptions {
        ServerOptions {
            server_url: server_url.map(str::to_string),
            timeout,
            config: None,
            run_id: Some("test-run".to_string()),
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(Duration::from_secs(30), parse_duration("30s").unwrap());
        assert_eq!(Duration::from_millis(1500), parse_duration("1500ms").unwrap());
        assert_eq!(Duration::from_secs(5), parse_duration(" 5 ").unwrap());
        assert!(matches!(
            parse_duration("soon"),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_profile_fills_in_missing_values() {
        let profile = RenderProfile::parse(
            Path::new("profile.yaml"),
            "serverUrl: http://host/ReportServer\ntimeout: 10s\nuserAgent: nightly-job\ndefaultFormat: EXCEL\n",
        )
        .unwrap();

        let found = options(None, None).merge(profile, None).unwrap();
        assert_eq!("http://host/ReportServer", found.renderer.server_url);
        assert_eq!(Some(Duration::from_secs(10)), found.renderer.timeout);
        assert_eq!("nightly-job", found.renderer.user_agent);
        assert_eq!("EXCEL", found.default_format);
        assert_eq!("test-run", found.run_id);
    }

    #[test]
    fn test_command_line_wins_over_profile() {
        let profile = RenderProfile {
            server_url: Some("http://profile/ReportServer".to_string()),
            timeout: Some("10s".to_string()),
            ..Default::default()
        };

        let found = options(Some("http://cli/ReportServer"), Some(Duration::from_secs(2)))
            .merge(profile, None)
            .unwrap();
        assert_eq!("http://cli/ReportServer", found.renderer.server_url);
        assert_eq!(Some(Duration::from_secs(2)), found.renderer.timeout);
        assert_eq!(DEFAULT_USER_AGENT, found.renderer.user_agent);
        assert_eq!("PDF", found.default_format);
    }

    #[test]
    fn test_blank_command_line_server_url_falls_back_to_profile() {
        let profile = RenderProfile {
            server_url: Some("http://profile/ReportServer".to_string()),
            ..Default::default()
        };

        let found = options(Some("  "), None).merge(profile, None).unwrap();
        assert_eq!("http://profile/ReportServer", found.renderer.server_url);

        let result = options(Some(""), None).merge(RenderProfile::default(), None);
        assert!(matches!(result, Err(ConfigError::MissingServerUrl)));
    }

    #[test]
    fn test_missing_server_url() {
        let result = options(None, None).merge(RenderProfile::default(), None);
        assert!(matches!(result, Err(ConfigError::MissingServerUrl)));
    }

    #[test]
    fn test_unknown_profile_keys_are_rejected() {
        let result = RenderProfile::parse(Path::new("profile.yaml"), "password: hunter2\n");
        assert!(matches!(
            result,
            Err(ConfigError::ProfileParseError { .. })
        ));
    }
}
