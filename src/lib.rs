pub mod agent;
pub mod board;
pub mod error;
pub mod eval;
pub mod score;
pub mod side;

pub use agent::{
    Agent, AgentConfig, AlphaBetaAgent, MinimaxAgent, QuiescenceAgent, QuiescenceConfig,
};
pub use board::{Board, ChessState};
pub use error::EngineError;
pub use eval::{Evaluator, ExternalEvaluator, MaterialEvaluator, SearchLimit};
pub use score::{to_float, PovScore, Score};
pub use side::Side;
