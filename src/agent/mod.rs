pub mod alpha_beta;
pub mod minimax;
pub mod quiescence;

pub use alpha_beta::AlphaBetaAgent;
pub use minimax::MinimaxAgent;
pub use quiescence::QuiescenceAgent;

use crate::board::Board;
use crate::error::EngineError;

/// A pluggable search agent: given a state, picks a move for the side to
/// move, or `None` if there is no legal move (checkmate or stalemate at the
/// root).
pub trait Agent<B: Board> {
    fn get_move(&mut self, state: &mut B) -> Result<Option<B::Move>, EngineError>;

    /// Releases the agent's evaluator. A no-op if the evaluator holds no
    /// external resources.
    fn quit(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Validated configuration shared by every agent: how many plies of plain
/// search to run before handing off to a leaf evaluation (or, for
/// [`QuiescenceAgent`], to a quiescence extension).
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    move_depth_limit: u32,
}

impl AgentConfig {
    /// `move_depth_limit` must be at least 1 — depth 0 would mean "never
    /// search," which is a configuration error, not a valid (if useless)
    /// operating point.
    pub fn new(move_depth_limit: u32) -> Result<Self, EngineError> {
        if move_depth_limit == 0 {
            return Err(EngineError::ConfigError(
                "move_depth_limit must be at least 1".into(),
            ));
        }
        Ok(AgentConfig { move_depth_limit })
    }

    pub fn move_depth_limit(&self) -> u32 {
        self.move_depth_limit
    }
}

/// Configuration for [`QuiescenceAgent`]: a plain-search depth plus a
/// separate quiescence extension depth.
#[derive(Debug, Clone, Copy)]
pub struct QuiescenceConfig {
    base: AgentConfig,
    quiescence_depth_limit: u32,
}

impl QuiescenceConfig {
    /// Unlike `move_depth_limit`, a `quiescence_depth_limit` of 0 is a
    /// legitimate operating point: it degenerates the extension to "return
    /// the static evaluation," not an error.
    pub fn new(move_depth_limit: u32, quiescence_depth_limit: u32) -> Result<Self, EngineError> {
        Ok(QuiescenceConfig {
            base: AgentConfig::new(move_depth_limit)?,
            quiescence_depth_limit,
        })
    }

    pub fn move_depth_limit(&self) -> u32 {
        self.base.move_depth_limit
    }

    pub fn quiescence_depth_limit(&self) -> u32 {
        self.quiescence_depth_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_is_rejected() {
        assert!(AgentConfig::new(0).is_err());
    }

    #[test]
    fn positive_depth_is_accepted() {
        assert!(AgentConfig::new(3).is_ok());
    }

    #[test]
    fn quiescence_depth_zero_is_allowed() {
        assert!(QuiescenceConfig::new(1, 0).is_ok());
    }

    #[test]
    fn quiescence_rejects_zero_move_depth() {
        assert!(QuiescenceConfig::new(0, 4).is_err());
    }
}
