/// `load_config` module: loads the optional YAML config file and merges it with
/// command-line flags and environment variables into the session used for every
/// storage call.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`CliConfig`]
/// - Merge flag/env values over file values into a [`SessionConfig`]
/// - Report unreadable or malformed files with the file path in the message
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
///
/// Accepted YAML keys: `profile`, `region`, `endpoint_url`, `website`
/// (`index_document`, `error_document`). All are optional.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use webotron_core::contract::WebsiteConfig;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub website: WebsiteConfig,
}

/// Everything needed to talk to the storage service, resolved once at startup.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionConfig {
    /// Named AWS profile; `None` uses the SDK default chain.
    pub profile: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    pub website: WebsiteConfig,
}

impl SessionConfig {
    /// Flag/env values win over values from the config file.
    pub fn merge(
        profile: Option<String>,
        region: Option<String>,
        endpoint_url: Option<String>,
        file: CliConfig,
    ) -> Self {
        let session = SessionConfig {
            profile: profile.or(file.profile),
            region: region.or(file.region),
            endpoint_url: endpoint_url.or(file.endpoint_url),
            website: file.website,
        };
        info!(
            profile = session.profile.as_deref().unwrap_or("<default>"),
            region = session.region.as_deref().unwrap_or("<default>"),
            endpoint_url = session.endpoint_url.as_deref().unwrap_or("<aws>"),
            "Session configuration resolved"
        );
        session
    }
}

/// Loads a YAML config file. An empty file yields the default config.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!(
                "Failed to parse config YAML {:?}: {e}",
                path_ref
            ))
        }
    }
}
