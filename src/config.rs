//! Application-level configuration loading: service endpoints, voice and announcement templates.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::services::template::{self, TemplateKind};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COURTCALLER_CONFIG_PATH";
/// Where the scrape and speech services listen when nothing else is configured.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

const DEFAULT_ASSIGNMENT_TEMPLATE: &str =
    "Wedstrijd op terrein {court}. {discipline} {level}. {teamA} tegen {teamB}.";
const DEFAULT_COMMENCING_TEMPLATE: &str = "Terrein {court}, de wedstrijd mag aanvangen.";
const DEFAULT_RECALL_TEMPLATE: &str = "{callCount} oproep voor terrein {court}: {teamNames}.";

/// Announcement wording, one template per announcement kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    /// Spoken when a match is sent to a court.
    pub assignment: String,
    /// Spoken when a match on a court may start.
    pub commencing: String,
    /// Spoken when a team is summoned again.
    pub recall: String,
}

impl Templates {
    /// Check every template against its placeholder set.
    pub fn validate(&self) -> Result<(), template::UnknownPlaceholder> {
        template::validate(TemplateKind::Assignment, &self.assignment)?;
        template::validate(TemplateKind::Commencing, &self.commencing)?;
        template::validate(TemplateKind::Recall, &self.recall)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            assignment: DEFAULT_ASSIGNMENT_TEMPLATE.to_string(),
            commencing: DEFAULT_COMMENCING_TEMPLATE.to_string(),
            recall: DEFAULT_RECALL_TEMPLATE.to_string(),
        }
    }
}

/// Credentials and voice forwarded to the speech service with every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Speech provider key; empty lets the speech service use its own.
    pub api_key: String,
    /// Provider voice identifier; empty selects the service default.
    pub voice_id: String,
}

/// Operator settings that may change while the board is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Speech service credentials and voice.
    pub voice: VoiceSettings,
    /// Announcement wording.
    pub templates: Templates,
}

#[derive(Debug, Clone)]
/// Runtime configuration read once at startup.
pub struct AppConfig {
    /// Base URL shared by the scrape (`/api/scrape-matches`) and speech (`/api`) services.
    pub api_base_url: String,
    /// Tournament page scraped when the operator does not give one.
    pub scrape_url: String,
    /// Initial operator settings.
    pub settings: Settings,
}

impl AppConfig {
    /// Load the configuration from disk and the environment, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded board configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.apply_overrides(|name| env::var(name).ok());

        if let Err(err) = config.settings.templates.validate() {
            warn!(error = %err, "configured template will be spoken with the token left in");
        }

        config
    }

    /// Parse the JSON configuration file; missing keys keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Apply `COURTCALLER_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COURTCALLER_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = lookup("COURTCALLER_SCRAPE_URL") {
            self.scrape_url = url;
        }
        if let Some(key) = lookup("COURTCALLER_API_KEY") {
            self.settings.voice.api_key = key;
        }
        if let Some(voice) = lookup("COURTCALLER_VOICE_ID") {
            self.settings.voice.voice_id = voice;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            scrape_url: String::new(),
            settings: Settings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    api_base_url: Option<String>,
    scrape_url: Option<String>,
    api_key: Option<String>,
    voice_id: Option<String>,
    #[serde(default)]
    templates: RawTemplates,
}

#[derive(Debug, Default, Deserialize)]
struct RawTemplates {
    assignment: Option<String>,
    commencing: Option<String>,
    recall: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = Templates::default();
        Self {
            api_base_url: raw
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            scrape_url: raw.scrape_url.unwrap_or_default(),
            settings: Settings {
                voice: VoiceSettings {
                    api_key: raw.api_key.unwrap_or_default(),
                    voice_id: raw.voice_id.unwrap_or_default(),
                },
                templates: Templates {
                    assignment: raw.templates.assignment.unwrap_or(defaults.assignment),
                    commencing: raw.templates.commencing.unwrap_or(defaults.commencing),
                    recall: raw.templates.recall.unwrap_or(defaults.recall),
                },
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
