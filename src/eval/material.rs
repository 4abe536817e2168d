use crate::board::Board;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::score::{PovScore, Score};
use crate::side::Side;

const PAWN: i32 = 100;
const KNIGHT: i32 = 310;
const BISHOP: i32 = 320;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
const TEMPO: i32 = 50;

/// A lightweight evaluator counting material plus a small tempo bonus for
/// the side to move. No positional terms, no game phase, no PSTs — the
/// point of this evaluator is to be cheap and transparent, not strong.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> Self {
        MaterialEvaluator
    }
}

fn piece_value(c: char) -> i32 {
    match c.to_ascii_lowercase() {
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        _ => 0,
    }
}

/// Sums White-relative centipawns from the FEN piece-placement field, plus a
/// tempo bonus for whoever is to move.
fn material_cp<B: Board>(state: &B) -> i32 {
    let fen = state.fen();
    let placement = fen.split_whitespace().next().unwrap_or("");
    let mut total = 0;
    for c in placement.chars() {
        if c.is_ascii_alphabetic() {
            let v = piece_value(c);
            total += if c.is_ascii_uppercase() { v } else { -v };
        }
    }
    total += match state.turn() {
        Side::White => TEMPO,
        Side::Black => -TEMPO,
    };
    total
}

impl<B: Board> Evaluator<B> for MaterialEvaluator {
    fn get_evaluation(&mut self, state: &B) -> Result<PovScore, EngineError> {
        if state.is_checkmate() {
            return Ok(PovScore::new(Score::MateGiven, state.turn()));
        }
        Ok(PovScore::new(Score::Cp(material_cp(state)), state.turn()))
    }
}
