use std::fmt;

use quiz_core::model::Quiz;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlayError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a play session stands. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Asking,
    Won,
    Lost,
}

/// Result of answering the pending question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct { score: u32 },
    Incorrect { score: u32 },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Random quiz run over a snapshot of the store.
///
/// Each step draws uniformly over the quizzes still remaining. A correct answer
/// removes the drawn quiz, so it is never asked twice; the first wrong answer
/// ends the run. The score only ever grows and is dropped with the session.
pub struct PlaySession<R = StdRng> {
    remaining: Vec<Quiz>,
    score: u32,
    pending: Option<usize>,
    state: PlayState,
    rng: R,
}

impl PlaySession<StdRng> {
    /// Start a run seeded from the operating system.
    #[must_use]
    pub fn new(snapshot: Vec<Quiz>) -> Self {
        Self::with_rng(snapshot, StdRng::from_os_rng())
    }
}

impl<R: Rng> PlaySession<R> {
    #[must_use]
    pub fn with_rng(snapshot: Vec<Quiz>, rng: R) -> Self {
        Self {
            remaining: snapshot,
            score: 0,
            pending: None,
            state: PlayState::Asking,
            rng,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Quizzes not yet answered correctly.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != PlayState::Asking
    }

    /// Draw the next question.
    ///
    /// Returns `Ok(None)` once nothing is left to ask, moving the run to `Won`.
    /// Drawing again without answering redraws over the same remaining set.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::NotAsking` after the run was lost.
    /// Returns `PlayError::InconsistentDraw` if the drawn index names no quiz.
    pub fn next_question(&mut self) -> Result<Option<&Quiz>, PlayError> {
        match self.state {
            PlayState::Lost => return Err(PlayError::NotAsking),
            PlayState::Won => return Ok(None),
            PlayState::Asking => {}
        }

        if self.remaining.is_empty() {
            self.state = PlayState::Won;
            self.pending = None;
            return Ok(None);
        }

        let index = self.rng.random_range(0..self.remaining.len());
        let remaining = self.remaining.len();
        let quiz = self
            .remaining
            .get(index)
            .ok_or(PlayError::InconsistentDraw { index, remaining })?;
        self.pending = Some(index);
        Ok(Some(quiz))
    }

    /// Judge `reply` against the pending question.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::NotAsking` if no question was drawn.
    /// Returns `PlayError::InconsistentDraw` if the pending index names no quiz.
    pub fn answer(&mut self, reply: &str) -> Result<Verdict, PlayError> {
        if self.state != PlayState::Asking {
            return Err(PlayError::NotAsking);
        }
        let index = self.pending.take().ok_or(PlayError::NotAsking)?;
        let remaining = self.remaining.len();
        let quiz = self
            .remaining
            .get(index)
            .ok_or(PlayError::InconsistentDraw { index, remaining })?;

        if quiz.is_answered_by(reply) {
            self.score += 1;
            self.remaining.remove(index);
            Ok(Verdict::Correct { score: self.score })
        } else {
            self.state = PlayState::Lost;
            Ok(Verdict::Incorrect { score: self.score })
        }
    }
}

impl<R> fmt::Debug for PlaySession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaySession")
            .field("remaining", &self.remaining.len())
            .field("score", &self.score)
            .field("pending", &self.pending)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
