use crate::agent::{Agent, AgentConfig};
use crate::board::Board;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::score::{to_float, PovScore};
use crate::side::Side;

/// Plain depth-limited minimax: no pruning, every legal move at every node
/// is explored. Useful mainly as a reference the alpha-beta agent is
/// expected to agree with at the root.
pub struct MinimaxAgent<B: Board> {
    evaluator: Box<dyn Evaluator<B>>,
    config: AgentConfig,
}

impl<B: Board> MinimaxAgent<B> {
    pub fn new(evaluator: Box<dyn Evaluator<B>>, config: AgentConfig) -> Self {
        MinimaxAgent { evaluator, config }
    }
}

impl<B: Board> Agent<B> for MinimaxAgent<B> {
    fn get_move(&mut self, state: &mut B) -> Result<Option<B::Move>, EngineError> {
        let depth = self.config.move_depth_limit();
        let (_, mv) = match state.turn() {
            Side::White => max_value(state, self.evaluator.as_mut(), depth)?,
            Side::Black => min_value(state, self.evaluator.as_mut(), depth)?,
        };
        Ok(mv)
    }

    fn quit(&mut self) -> Result<(), EngineError> {
        self.evaluator.quit()
    }
}

pub(crate) fn max_value<B: Board>(
    state: &mut B,
    evaluator: &mut dyn Evaluator<B>,
    depth: u32,
) -> Result<(PovScore, Option<B::Move>), EngineError> {
    if state.is_game_over() || depth == 0 {
        return Ok((evaluator.get_evaluation(state)?, None));
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Ok((evaluator.get_evaluation(state)?, None));
    }

    let mut best: Option<(f64, PovScore, B::Move)> = None;
    for mv in moves {
        state.push(mv);
        let (child, _) = min_value(state, evaluator, depth - 1)?;
        state.pop();

        let f = to_float(child, Side::White);
        let better = match &best {
            None => true,
            Some((best_f, _, _)) => f > *best_f,
        };
        if better {
            best = Some((f, child, mv));
        }
    }

    let (_, score, mv) = best.expect("moves is non-empty");
    Ok((score, Some(mv)))
}

pub(crate) fn min_value<B: Board>(
    state: &mut B,
    evaluator: &mut dyn Evaluator<B>,
    depth: u32,
) -> Result<(PovScore, Option<B::Move>), EngineError> {
    if state.is_game_over() || depth == 0 {
        return Ok((evaluator.get_evaluation(state)?, None));
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Ok((evaluator.get_evaluation(state)?, None));
    }

    let mut best: Option<(f64, PovScore, B::Move)> = None;
    for mv in moves {
        state.push(mv);
        let (child, _) = max_value(state, evaluator, depth - 1)?;
        state.pop();

        let f = to_float(child, Side::Black);
        let better = match &best {
            None => true,
            Some((best_f, _, _)) => f < *best_f,
        };
        if better {
            best = Some((f, child, mv));
        }
    }

    let (_, score, mv) = best.expect("moves is non-empty");
    Ok((score, Some(mv)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentConfig;
    use crate::board::ChessState;
    use crate::eval::MaterialEvaluator;

    fn agent(depth: u32) -> MinimaxAgent<ChessState> {
        MinimaxAgent::new(Box::new(MaterialEvaluator::new()), AgentConfig::new(depth).unwrap())
    }

    #[test]
    fn finds_mate_in_one() {
        let mut state = ChessState::from_fen(
            "r1bqkbnr/p1pp1ppp/1pn5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 4",
        )
        .unwrap();
        let mut a = agent(1);
        let mv = a.get_move(&mut state).unwrap().unwrap();
        assert_eq!(mv.to_string(), "f3f7");
    }

    #[test]
    fn returns_none_on_stalemate() {
        let mut state = ChessState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let mut a = agent(2);
        assert_eq!(a.get_move(&mut state).unwrap(), None);
    }

    #[test]
    fn make_unmake_invariant_holds() {
        let mut state = ChessState::new();
        let fen_before = state.fen();
        let mut a = agent(2);
        a.get_move(&mut state).unwrap();
        assert_eq!(state.fen(), fen_before);
    }

    #[test]
    fn picks_first_legal_move_when_material_is_tied() {
        let mut state = ChessState::new();
        let first_legal = state.legal_moves()[0];
        let mut a = agent(1);
        let mv = a.get_move(&mut state).unwrap().unwrap();
        assert_eq!(mv, first_legal);
    }
}
