//! Commit History
//!
//! The append-only record of a game in progress: one [`Commit`] per round,
//! holding the displayed word, its true seen/unseen status, and the player's
//! guess. Score and lives are owned by the session, not the log.

use serde::{Deserialize, Serialize};

// =============================================================================
// SEEN / UNSEEN
// =============================================================================

/// True status or guess for one round: was the word shown before?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeenUnseen {
    /// The word was displayed earlier in this game.
    Seen,
    /// The word is new.
    Unseen,
}

impl SeenUnseen {
    /// The opposite status.
    pub fn flipped(self) -> SeenUnseen {
        match self {
            SeenUnseen::Seen => SeenUnseen::Unseen,
            SeenUnseen::Unseen => SeenUnseen::Seen,
        }
    }
}

// =============================================================================
// COMMIT
// =============================================================================

/// One round's record. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The displayed word.
    pub element: String,
    /// The word's true status.
    pub actual: SeenUnseen,
    /// The player's guess.
    pub guess: SeenUnseen,
}

impl Commit {
    /// Create a commit record.
    pub fn new(element: String, actual: SeenUnseen, guess: SeenUnseen) -> Commit {
        Commit {
            element,
            actual,
            guess,
        }
    }

    /// True if the guess matched the actual status. Derived, never stored.
    pub fn correct(&self) -> bool {
        self.actual == self.guess
    }
}

// =============================================================================
// COMMIT LOG
// =============================================================================

/// Append-only ordered sequence of commits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitLog {
    commits: Vec<Commit>,
}

impl CommitLog {
    /// Create an empty log.
    pub fn new() -> CommitLog {
        CommitLog::default()
    }

    /// Append a commit. Commits are never removed or reordered.
    pub fn push(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Number of commits recorded.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// True if nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The commit at `index`, in commit order.
    pub fn get(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index)
    }

    /// Forward iteration in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, Commit> {
        self.commits.iter()
    }

    /// 0-based indices of incorrect guesses, strictly increasing.
    ///
    /// This is the compact encoding shared payloads carry: together with the
    /// seed and threshold it reconstructs the full history.
    pub fn incorrect_indices(&self) -> Vec<u32> {
        self.commits
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.correct())
            .map(|(i, _)| i as u32)
            .collect()
    }
}

impl<'a> IntoIterator for &'a CommitLog {
    type Item = &'a Commit;
    type IntoIter = std::slice::Iter<'a, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
