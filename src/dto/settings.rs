//! DTO definitions for operator settings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    config::{Settings, Templates},
    dto::validation::validate_voice_id,
};

/// Announcement templates as exchanged with the operator UI.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateSet {
    /// Placeholders: `{court}`, `{discipline}`, `{level}`, `{teamA}`, `{teamB}`.
    pub assignment: String,
    /// Placeholders: `{court}`.
    pub commencing: String,
    /// Placeholders: `{callCount}`, `{court}`, `{teamNames}`.
    pub recall: String,
}

impl From<&Templates> for TemplateSet {
    fn from(templates: &Templates) -> Self {
        Self {
            assignment: templates.assignment.clone(),
            commencing: templates.commencing.clone(),
            recall: templates.recall.clone(),
        }
    }
}

/// Settings as reported back; the API key itself is never echoed.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    /// Whether a speech provider key is configured.
    pub api_key_set: bool,
    /// Voice used for announcements; empty for the service default.
    pub voice_id: String,
    /// Current announcement wording.
    pub templates: TemplateSet,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        Self {
            api_key_set: !settings.voice.api_key.is_empty(),
            voice_id: settings.voice.voice_id.clone(),
            templates: TemplateSet::from(&settings.templates),
        }
    }
}

/// Partial update of the templates; absent fields keep their value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct TemplatesUpdate {
    /// New court assignment template.
    #[validate(length(min = 1, max = 500))]
    pub assignment: Option<String>,
    /// New match start template.
    #[validate(length(min = 1, max = 500))]
    pub commencing: Option<String>,
    /// New recall template.
    #[validate(length(min = 1, max = 500))]
    pub recall: Option<String>,
}

/// Partial update of the operator settings; absent fields keep their value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateSettingsRequest {
    /// Speech provider key; an empty string clears it.
    pub api_key: Option<String>,
    /// Provider voice identifier; an empty string selects the default.
    #[validate(custom(function = "validate_voice_id"))]
    pub voice_id: Option<String>,
    /// Template changes.
    #[validate(nested)]
    pub templates: Option<TemplatesUpdate>,
}
