//! Errors for the fallible edges of the engine: configuration, snapshots, template banks.
//!
//! The profile operations themselves never fail; unknown users are created lazily and
//! unknown labels fall through to default branches.

use crate::templates::TemplateCategory;

#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("Template category '{}' has no candidate replies", .0.as_str())]
    EmptyTemplates(TemplateCategory),
}

pub type Result<T> = std::result::Result<T, PersonaError>;
