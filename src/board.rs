use std::fmt::Display;

use chess::{BoardStatus, ChessMove, Error as ChessError, MoveGen};

use crate::error::EngineError;
use crate::side::Side;

/// The externally supplied board capability the search core treats as a
/// black box: legal-move enumeration, make/unmake, and a handful of
/// predicates. Nothing in `agent` or `eval` reaches past this trait into
/// concrete chess rules.
pub trait Board {
    type Move: Copy + Eq + Display;

    fn legal_moves(&self) -> Vec<Self::Move>;
    fn push(&mut self, mv: Self::Move);
    fn pop(&mut self);
    fn turn(&self) -> Side;
    fn is_game_over(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_check(&self) -> bool;
    fn gives_check(&self, mv: Self::Move) -> bool;
    fn is_capture(&self, mv: Self::Move) -> bool;
    fn fen(&self) -> String;
}

/// Production [`Board`] implementation wrapping `chess::Board`. That crate's
/// API is immutable (`make_move_new` returns a fresh `Board`), so this type
/// layers an explicit undo stack on top to give callers the mutate-in-place,
/// make/unmake discipline the search core is written against.
pub struct ChessState {
    current: chess::Board,
    history: Vec<chess::Board>,
}

impl ChessState {
    pub fn new() -> Self {
        ChessState {
            current: chess::Board::default(),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        use std::str::FromStr;
        let board = chess::Board::from_str(fen)
            .map_err(|e: ChessError| EngineError::InvalidPosition(format!("{fen}: {e}")))?;
        Ok(ChessState {
            current: board,
            history: Vec::new(),
        })
    }
}

impl Default for ChessState {
    fn default() -> Self {
        ChessState::new()
    }
}

impl Board for ChessState {
    type Move = ChessMove;

    fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.current).collect()
    }

    fn push(&mut self, mv: ChessMove) {
        self.history.push(self.current);
        self.current = self.current.make_move_new(mv);
    }

    fn pop(&mut self) {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
        }
    }

    fn turn(&self) -> Side {
        Side::from(self.current.side_to_move())
    }

    fn is_game_over(&self) -> bool {
        self.current.status() != BoardStatus::Ongoing
    }

    fn is_checkmate(&self) -> bool {
        self.current.status() == BoardStatus::Checkmate
    }

    fn is_check(&self) -> bool {
        self.current.checkers().popcnt() > 0
    }

    fn gives_check(&self, mv: ChessMove) -> bool {
        self.current.make_move_new(mv).checkers().popcnt() > 0
    }

    fn is_capture(&self, mv: ChessMove) -> bool {
        let to = mv.get_dest();
        let them = opp(self.current.side_to_move());
        if self.current.color_on(to) == Some(them) {
            return true;
        }
        // en passant: destination is the ep square, moving piece is a pawn
        // stepping diagonally onto an otherwise-empty square.
        if let Some(ep_sq) = self.current.en_passant() {
            if to == ep_sq {
                if let Some(piece) = self.current.piece_on(mv.get_source()) {
                    if piece == chess::Piece::Pawn
                        && mv.get_source().get_file() != to.get_file()
                        && self.current.piece_on(to).is_none()
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn fen(&self) -> String {
        self.current.to_string()
    }
}

#[inline]
fn opp(c: chess::Color) -> chess::Color {
    if c == chess::Color::White {
        chess::Color::Black
    } else {
        chess::Color::White
    }
}
