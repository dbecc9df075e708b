/// Operator actions that end in a spoken announcement.
pub mod announcement_service;
/// Announcement text construction.
pub mod announcer;
/// Speech synthesis and single-slot playback.
pub mod audio_player;
/// Board read and reload operations.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match list ownership, reconciliation and caching.
pub mod match_store;
/// Playback status and stop.
pub mod playback_service;
/// Runtime operator settings.
pub mod settings_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events streaming service.
pub mod sse_service;
/// Placeholder substitution for templates.
pub mod template;
