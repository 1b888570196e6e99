//! Live Game Session
//!
//! Drives one game: owns the sampler (and through it the RNG) exclusively,
//! records commits, and keeps the score and lives counters. Sessions never
//! share mutable state; every collaborator receives the session explicitly.

use thiserror::Error;
use tracing::debug;

use crate::game::history::{Commit, CommitLog, SeenUnseen};
use crate::game::sampler::{SeenThreshold, WordSampler};
use crate::game::words::{UnseenSetId, WordPool};

/// Lives at the start of every game. The replay protocol encodes exactly this
/// many incorrect-commit indices, so the value is a protocol constant.
pub const INITIAL_LIVES: u32 = 3;

/// Errors from driving a session out of order or past its end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Three wrong guesses have been made; the game is over.
    #[error("the game is already over")]
    Finished,

    /// `next_word` was called while a word still awaits its guess.
    #[error("the current word has not been guessed yet")]
    PendingGuess,

    /// `guess` was called with no word outstanding.
    #[error("no word is awaiting a guess")]
    NothingToGuess,

    /// The word pool was empty and no word can be produced.
    #[error("the word pool is exhausted")]
    PoolExhausted,
}

/// One live game.
#[derive(Clone, Debug)]
pub struct GameSession {
    seed: u64,
    threshold: SeenThreshold,
    pool: WordPool,
    sampler: WordSampler,
    log: CommitLog,
    score: u32,
    lives: u32,
    pending: bool,
}

impl GameSession {
    /// Start a game over `pool` with the given seed and seen threshold.
    ///
    /// The pool is kept untouched (the sampler works on a copy); encoding a
    /// finished game replays against this original ordering.
    pub fn new(seed: u64, threshold: SeenThreshold, pool: WordPool) -> GameSession {
        debug!(seed, set = %pool.id(), words = pool.len(), "starting game session");
        let sampler = WordSampler::new(seed, threshold, pool.words().to_vec());
        GameSession {
            seed,
            threshold,
            pool,
            sampler,
            log: CommitLog::new(),
            score: 0,
            lives: INITIAL_LIVES,
            pending: false,
        }
    }

    /// Produce the next word to display. The word must be guessed before the
    /// next call.
    pub fn next_word(&mut self) -> Result<String, GameError> {
        if self.finished() {
            return Err(GameError::Finished);
        }
        if self.pending {
            return Err(GameError::PendingGuess);
        }
        let word = self.sampler.next().ok_or(GameError::PoolExhausted)?;
        self.pending = true;
        Ok(word)
    }

    /// Commit the player's guess for the current word.
    ///
    /// Returns whether the guess was correct. A correct guess scores a point;
    /// an incorrect one costs a life, and the third lost life ends the game.
    pub fn guess(&mut self, guess: SeenUnseen) -> Result<bool, GameError> {
        if self.finished() {
            return Err(GameError::Finished);
        }
        let element = match self.sampler.current() {
            Some(word) if self.pending => word.to_string(),
            _ => return Err(GameError::NothingToGuess),
        };

        let actual = if self.sampler.has_seen(&element) {
            SeenUnseen::Seen
        } else {
            SeenUnseen::Unseen
        };
        let commit = Commit::new(element, actual, guess);
        if commit.correct() {
            self.score += 1;
        } else {
            self.lives -= 1;
        }
        self.pending = false;
        let correct = commit.correct();
        self.log.push(commit);
        Ok(correct)
    }

    /// True once all lives are spent.
    pub fn finished(&self) -> bool {
        self.lives == 0
    }

    /// The seed this game was started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The seen threshold this game was started with.
    pub fn seen_threshold(&self) -> SeenThreshold {
        self.threshold
    }

    /// Correct guesses so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives remaining.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// The commit history so far.
    pub fn log(&self) -> &CommitLog {
        &self.log
    }

    /// The untouched word pool the game was started over.
    pub fn word_pool(&self) -> &WordPool {
        &self.pool
    }

    /// Identity of the pool this game draws from.
    pub fn unseen_set_id(&self) -> UnseenSetId {
        self.pool.id()
    }
}

// =============================================================================
// TESTS
// =============================================================================
