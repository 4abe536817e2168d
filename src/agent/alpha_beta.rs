use crate::agent::{Agent, AgentConfig};
use crate::board::Board;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::score::{to_float, PovScore};
use crate::side::Side;

/// Minimax with alpha-beta pruning driven by the score order of the side to
/// move. Agrees with [`crate::agent::MinimaxAgent`] on the root score for
/// any given depth and evaluator; may differ only in *which* equally-scored
/// move is returned.
pub struct AlphaBetaAgent<B: Board> {
    evaluator: Box<dyn Evaluator<B>>,
    config: AgentConfig,
}

impl<B: Board> AlphaBetaAgent<B> {
    pub fn new(evaluator: Box<dyn Evaluator<B>>, config: AgentConfig) -> Self {
        AlphaBetaAgent { evaluator, config }
    }
}

impl<B: Board> Agent<B> for AlphaBetaAgent<B> {
    fn get_move(&mut self, state: &mut B) -> Result<Option<B::Move>, EngineError> {
        let depth = self.config.move_depth_limit();
        let (_, mv) = match state.turn() {
            Side::White => max_value(
                state,
                self.evaluator.as_mut(),
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )?,
            Side::Black => min_value(
                state,
                self.evaluator.as_mut(),
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )?,
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
    mut alpha: f64,
    beta: f64,
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
        let (child, _) = min_value(state, evaluator, depth - 1, alpha, beta)?;
        state.pop();

        let f = to_float(child, Side::White);
        let better = match &best {
            None => true,
            Some((best_f, _, _)) => f > *best_f,
        };
        if better {
            best = Some((f, child, mv));
        }
        let best_f = best.as_ref().unwrap().0;
        if f > beta {
            break;
        }
        alpha = alpha.max(best_f);
    }

    let (_, score, mv) = best.expect("moves is non-empty");
    Ok((score, Some(mv)))
}

pub(crate) fn min_value<B: Board>(
    state: &mut B,
    evaluator: &mut dyn Evaluator<B>,
    depth: u32,
    alpha: f64,
    mut beta: f64,
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
        let (child, _) = max_value(state, evaluator, depth - 1, alpha, beta)?;
        state.pop();

        let f = to_float(child, Side::Black);
        let better = match &best {
            None => true,
            Some((best_f, _, _)) => f < *best_f,
        };
        if better {
            best = Some((f, child, mv));
        }
        let best_f = best.as_ref().unwrap().0;
        if f < alpha {
            break;
        }
        beta = beta.min(best_f);
    }

    let (_, score, mv) = best.expect("moves is non-empty");
    Ok((score, Some(mv)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChessState;
    use crate::eval::MaterialEvaluator;

    fn ab_agent(depth: u32) -> AlphaBetaAgent<ChessState> {
        AlphaBetaAgent::new(Box::new(MaterialEvaluator::new()), AgentConfig::new(depth).unwrap())
    }

    #[test]
    fn finds_mate_in_one() {
        let mut state = ChessState::from_fen(
            "r1bqkbnr/p1pp1ppp/1pn5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 4",
        )
        .unwrap();
        let mut a = ab_agent(1);
        let mv = a.get_move(&mut state).unwrap().unwrap();
        assert_eq!(mv.to_string(), "f3f7");
    }

    #[test]
    fn prefers_the_capture() {
        let mut state = ChessState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut a = ab_agent(2);
        let mv = a.get_move(&mut state).unwrap().unwrap();
        assert_eq!(mv.to_string(), "e4d5");
    }

    #[test]
    fn agrees_with_minimax_at_the_root() {
        let positions = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1",
            "r1bqkbnr/p1pp1ppp/1pn5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 4",
        ];
        for fen in positions {
            let mut s1 = ChessState::from_fen(fen).unwrap();
            let mut s2 = ChessState::from_fen(fen).unwrap();
            let mut eval_mm = MaterialEvaluator::new();
            let mut eval_ab = MaterialEvaluator::new();
            let side = s1.turn();

            let (score_mm, _) =
                crate::agent::minimax::max_value(&mut s1, &mut eval_mm, 2).unwrap();
            let (score_ab, _) = max_value(
                &mut s2,
                &mut eval_ab,
                2,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )
            .unwrap();

            assert_eq!(to_float(score_mm, side), to_float(score_ab, side));
        }
    }
}
