use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::board::Board;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::score::{PovScore, Score};
use crate::side::Side;

/// How long the external engine is allowed to think on each `get_evaluation`
/// call. Mirrors the two search limits a UCI `go` command accepts.
#[derive(Debug, Clone, Copy)]
pub enum SearchLimit {
    Depth(u32),
    MoveTimeMs(u64),
}

/// An evaluator backed by a separate UCI-speaking engine process. Talks the
/// same line protocol the engine binary built from this crate would speak on
/// its own stdin/stdout, just from the client side of the pipe.
pub struct ExternalEvaluator {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    limit: SearchLimit,
    quit_sent: bool,
}

impl ExternalEvaluator {
    pub fn new(engine_path: &str, limit: SearchLimit) -> Result<Self, EngineError> {
        let mut child = Command::new(engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| EngineError::EvaluatorFailed(format!("spawn {engine_path}: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::EvaluatorFailed("engine stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::EvaluatorFailed("engine stdout unavailable".into()))?;

        let mut eval = ExternalEvaluator {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            limit,
            quit_sent: false,
        };
        eval.handshake()?;
        Ok(eval)
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        log::debug!("> {line}");
        writeln!(self.stdin, "{line}")
            .map_err(|e| EngineError::EvaluatorFailed(format!("write to engine: {e}")))?;
        self.stdin
            .flush()
            .map_err(|e| EngineError::EvaluatorFailed(format!("flush to engine: {e}")))
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| EngineError::EvaluatorFailed(format!("read from engine: {e}")))?;
        if n == 0 {
            return Err(EngineError::EvaluatorFailed(
                "engine closed its output before responding".into(),
            ));
        }
        log::debug!("< {}", line.trim_end());
        Ok(line)
    }

    fn wait_for(&mut self, token: &str) -> Result<(), EngineError> {
        loop {
            let line = self.read_line()?;
            if line.trim() == token {
                return Ok(());
            }
        }
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        self.send("uci")?;
        self.wait_for("uciok")?;
        self.send("isready")?;
        self.wait_for("readyok")?;
        Ok(())
    }

    fn go_command(&self) -> String {
        match self.limit {
            SearchLimit::Depth(d) => format!("go depth {d}"),
            SearchLimit::MoveTimeMs(ms) => format!("go movetime {ms}"),
        }
    }
}

impl<B: Board> Evaluator<B> for ExternalEvaluator {
    fn get_evaluation(&mut self, state: &B) -> Result<PovScore, EngineError> {
        self.send(&format!("position fen {}", state.fen()))?;
        self.send(&self.go_command())?;

        let mut last_score: Option<Score> = None;
        loop {
            let line = self.read_line()?;
            let trimmed = line.trim();
            if let Some(score) = parse_info_score(trimmed) {
                last_score = Some(score);
            }
            if trimmed.starts_with("bestmove") {
                break;
            }
        }

        let score = last_score.ok_or_else(|| {
            EngineError::EvaluatorFailed("engine never reported a score before bestmove".into())
        })?;
        Ok(PovScore::new(score, state.turn()))
    }

    fn quit(&mut self) -> Result<(), EngineError> {
        if self.quit_sent {
            return Ok(());
        }
        self.quit_sent = true;
        if let Err(e) = self.send("quit") {
            log::warn!("failed to send quit to external engine: {e}");
        }
        if let Err(e) = self.child.wait() {
            log::warn!("external engine did not exit cleanly: {e}");
        }
        Ok(())
    }
}

impl Drop for ExternalEvaluator {
    fn drop(&mut self) {
        let _ = <Self as Evaluator<crate::board::ChessState>>::quit(self);
    }
}

/// Parses the `score cp X` / `score mate Y` token out of a UCI `info` line.
/// `Side` is not involved here: the returned `Score` is relative to whichever
/// side the analysing engine considers itself to be, i.e. the side to move
/// in the position it was just told about.
fn parse_info_score(line: &str) -> Option<Score> {
    if !line.starts_with("info") {
        return None;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let idx = tokens.iter().position(|&t| t == "score")?;
    let kind = *tokens.get(idx + 1)?;
    let value: i64 = tokens.get(idx + 2)?.parse().ok()?;
    match kind {
        "cp" => Some(Score::Cp(value as i32)),
        "mate" => Some(Score::Mate(value as i16)),
        _ => None,
    }
}
