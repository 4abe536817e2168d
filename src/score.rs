use crate::side::Side;
use std::cmp::Ordering as CmpOrdering;

/// A chess evaluation, always relative to some side (see [`PovScore`]).
///
/// `Mate(n)` uses a signed ply count: positive favors the relative side,
/// negative favors the opponent. `MateGiven` is the terminal "checkmate has
/// just been delivered against the side to move" value — worse than any
/// finite `Mate(-k)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Cp(i32),
    Mate(i16),
    MateGiven,
    PosInf,
    NegInf,
}

const MATE_KEY_BASE: f64 = 1.0e9;

impl Score {
    #[inline]
    pub fn cp(n: i32) -> Score {
        Score::Cp(n)
    }

    #[inline]
    pub fn mate(n: i16) -> Score {
        Score::Mate(n)
    }

    #[inline]
    pub fn pos_inf() -> Score {
        Score::PosInf
    }

    #[inline]
    pub fn neg_inf() -> Score {
        Score::NegInf
    }

    #[inline]
    pub fn is_mate(&self) -> bool {
        matches!(self, Score::Mate(_) | Score::MateGiven)
    }

    /// A single monotone real-valued key realizing the total order described
    /// in the module docs: mates-in-favor rank above all centipawn values
    /// (sooner mates ranking higher still), mates-against rank below all
    /// centipawn values (further-off mates ranking higher), and `MateGiven`
    /// sits below every `Mate(-k)`.
    fn key(&self) -> f64 {
        match *self {
            Score::NegInf => f64::NEG_INFINITY,
            Score::PosInf => f64::INFINITY,
            Score::MateGiven => -MATE_KEY_BASE,
            Score::Mate(n) if n > 0 => MATE_KEY_BASE - n as f64,
            Score::Mate(n) => -MATE_KEY_BASE + n as f64,
            Score::Cp(x) => x as f64,
        }
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.key().partial_cmp(&other.key()).expect("Score::key is never NaN")
    }
}

/// A [`Score`] paired with the side it is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PovScore {
    pub score: Score,
    pub turn: Side,
}

impl PovScore {
    #[inline]
    pub fn new(score: Score, turn: Side) -> PovScore {
        PovScore { score, turn }
    }
}

/// Converts a [`PovScore`] into a comparable real number from `viewer`'s
/// perspective. Mate scores (including `MateGiven`) collapse to `±∞`; this
/// is the one place mate distance is deliberately discarded, since `to_float`
/// is used purely for alpha/beta comparisons, not for move preference among
/// mates of different lengths (that finer ordering lives in `Score::cmp`).
pub fn to_float(pov: PovScore, viewer: Side) -> f64 {
    let sign = if pov.turn == viewer { 1.0 } else { -1.0 };
    let magnitude = match pov.score {
        Score::Cp(x) => x as f64,
        Score::Mate(n) if n > 0 => f64::INFINITY,
        Score::Mate(_) => f64::NEG_INFINITY,
        Score::MateGiven => f64::NEG_INFINITY,
        Score::PosInf => f64::INFINITY,
        Score::NegInf => f64::NEG_INFINITY,
    };
    sign * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_beats_any_centipawn_score() {
        assert!(Score::Mate(1) > Score::Cp(9_000));
        assert!(Score::Cp(-9_000) > Score::Mate(-1));
    }

    #[test]
    fn faster_mate_preferred() {
        assert!(Score::Mate(1) > Score::Mate(2));
    }

    #[test]
    fn slower_loss_preferred() {
        assert!(Score::Mate(-2) > Score::Mate(-1));
    }

    #[test]
    fn mate_given_is_worse_than_any_losing_mate() {
        assert!(Score::Mate(-50) > Score::MateGiven);
    }

    #[test]
    fn to_float_flips_sign_for_opposite_viewer() {
        let pov = PovScore::new(Score::Cp(120), Side::White);
        assert_eq!(to_float(pov, Side::White), 120.0);
        assert_eq!(to_float(pov, Side::Black), -120.0);
    }

    #[test]
    fn to_float_collapses_mate_to_infinity() {
        let pov = PovScore::new(Score::Mate(3), Side::White);
        assert_eq!(to_float(pov, Side::White), f64::INFINITY);
        assert_eq!(to_float(pov, Side::Black), f64::NEG_INFINITY);
    }
}

#[cfg(test)]
mod score_order_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cp_order_matches_integer_order(a: i32, b: i32) {
            prop_assert_eq!(Score::Cp(a).cmp(&Score::Cp(b)), a.cmp(&b));
        }

        #[test]
        fn winning_mate_always_beats_any_centipawn_score(n in 1i16..=200, cp: i32) {
            prop_assert!(Score::Mate(n) > Score::Cp(cp));
        }

        #[test]
        fn losing_mate_is_always_beaten_by_any_centipawn_score(n in 1i16..=200, cp: i32) {
            prop_assert!(Score::Cp(cp) > Score::Mate(-n));
        }

        #[test]
        fn shorter_winning_mate_is_preferred(n in 1i16..=200) {
            prop_assert!(Score::Mate(n) > Score::Mate(n + 1));
        }

        #[test]
        fn longer_losing_mate_is_preferred(n in 1i16..=200) {
            prop_assert!(Score::Mate(-(n + 1)) > Score::Mate(-n));
        }

        #[test]
        fn to_float_is_antisymmetric_in_viewer(cp: i32) {
            let pov = PovScore::new(Score::Cp(cp), Side::White);
            prop_assert_eq!(to_float(pov, Side::White), -to_float(pov, Side::Black));
        }
    }
}
