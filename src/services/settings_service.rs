use tracing::info;

use crate::{
    config::Templates,
    dto::settings::{SettingsResponse, UpdateSettingsRequest},
    error::ServiceError,
    state::SharedState,
};

/// Current operator settings.
pub async fn settings(state: &SharedState) -> SettingsResponse {
    SettingsResponse::from(&state.settings().await)
}

/// Apply a partial settings update.
///
/// Templates are checked against their placeholder sets before anything is
/// changed, so a rejected request leaves every setting as it was.
pub async fn update_settings(
    state: &SharedState,
    request: UpdateSettingsRequest,
) -> Result<SettingsResponse, ServiceError> {
    let updated = state
        .update_settings(|settings| {
            if let Some(update) = request.templates {
                let current = &settings.templates;
                let templates = Templates {
                    assignment: update
                        .assignment
                        .unwrap_or_else(|| current.assignment.clone()),
                    commencing: update
                        .commencing
                        .unwrap_or_else(|| current.commencing.clone()),
                    recall: update.recall.unwrap_or_else(|| current.recall.clone()),
                };
                templates.validate()?;
                settings.templates = templates;
            }
            if let Some(api_key) = request.api_key {
                settings.voice.api_key = api_key;
            }
            if let Some(voice_id) = request.voice_id {
                settings.voice.voice_id = voice_id;
            }
            Ok::<_, ServiceError>(settings.clone())
        })
        .await?;

    info!(voice_id = %updated.voice.voice_id, "settings updated");
    Ok(SettingsResponse::from(&updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::settings::TemplatesUpdate,
        test_support::{RecordingSynthesizer, fixture, terse_templates},
    };

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let response = update_settings(
            &fx.state,
            UpdateSettingsRequest {
                api_key: Some("sk-live".into()),
                templates: Some(TemplatesUpdate {
                    commencing: Some("Baan {court}, begin maar".into()),
                    ..TemplatesUpdate::default()
                }),
                ..UpdateSettingsRequest::default()
            },
        )
        .await
        .unwrap();

        assert!(response.api_key_set);
        assert_eq!(response.templates.commencing, "Baan {court}, begin maar");
        assert_eq!(response.templates.recall, terse_templates().recall);
        assert_eq!(fx.state.settings().await.voice.api_key, "sk-live");
    }

    #[tokio::test]
    async fn unknown_placeholder_rejects_whole_update() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let err = update_settings(
            &fx.state,
            UpdateSettingsRequest {
                voice_id: Some("abc123".into()),
                templates: Some(TemplatesUpdate {
                    commencing: Some("Terrein {court} voor {teamA}".into()),
                    ..TemplatesUpdate::default()
                }),
                ..UpdateSettingsRequest::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(ref message) if message.contains("{teamA}")));
        let settings = fx.state.settings().await;
        assert_eq!(settings.templates, terse_templates());
        assert_eq!(settings.voice.voice_id, "");
    }
}
