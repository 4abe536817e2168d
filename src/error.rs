use thiserror::Error;

/// Unified failure taxonomy for the search core. `NoLegalMoves` is deliberately
/// absent: an agent with no legal root move returns `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("evaluator failed: {0}")]
    EvaluatorFailed(String),

    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
