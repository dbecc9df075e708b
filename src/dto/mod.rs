pub mod health;
pub mod matches;
pub mod settings;
pub mod sse;
pub mod validation;
