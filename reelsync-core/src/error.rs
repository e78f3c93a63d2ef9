use thiserror::Error;

/// Engine-level errors.
///
/// Nothing in this taxonomy is fatal to the host: store and feed failures
/// degrade to "this marker/update did not happen", playback failures leave
/// the engine reflecting the actual media element state.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(String),

    #[error("change feed error: {0}")]
    Feed(String),

    #[error("playback error: {0}")]
    Playback(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
