use thiserror::Error;
use vista_motion::MotionError;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to parse site configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid site configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Motion(#[from] MotionError),
}
