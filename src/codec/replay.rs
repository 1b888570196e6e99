//! Deterministic Replay
//!
//! Reconstructs a finished game from its minimal encoded state by re-running
//! the sampler with the original seed and threshold. The sampler's branch
//! decisions are deterministic, so each step's true seen/unseen status falls
//! out of the replay; guesses are the true status flipped at the recorded
//! incorrect indices.

use crate::core::hash::{Ksink, Mix64, ELEMENT_CHECKSUM_SEED};
use crate::game::history::{Commit, CommitLog, SeenUnseen};
use crate::game::sampler::{SeenThreshold, WordSampler};
use crate::game::session::INITIAL_LIVES;
use crate::game::words::{UnseenSetId, WordPool};

use super::error::{DecodeError, EncodeError};

/// A successfully decoded game: the reconstructed history plus its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// Correct guesses over the whole game.
    pub score: u32,
    /// Lives left at the end (always 0 for a well-formed payload).
    pub lives: u32,
    /// The full reconstructed commit history, in order.
    pub commits: Vec<Commit>,
    /// The word set the game was played against.
    pub unseen_set_id: UnseenSetId,
}

/// Hard ceiling on the reconstructed commit count. Far beyond any playable
/// game; payloads claiming more are rejected before a single replay step.
pub(crate) const MAX_REPLAY_COMMITS: usize = 1_000_000;

/// Validate incorrect-commit indices and derive the implied commit count.
///
/// A well-formed payload carries exactly [`INITIAL_LIVES`] strictly
/// increasing indices; the last one, plus one, is the total number of
/// commits (the game ends the step the last life is lost). Counts above
/// [`MAX_REPLAY_COMMITS`] are rejected outright.
pub(crate) fn implied_commit_count(incorrect: &[u32]) -> Result<usize, DecodeError> {
    if incorrect.len() != INITIAL_LIVES as usize {
        return Err(DecodeError::BadChecksum);
    }
    if !incorrect.windows(2).all(|w| w[0] < w[1]) {
        return Err(DecodeError::BadChecksum);
    }
    // Non-empty by the length check above.
    let steps = incorrect[incorrect.len() - 1] as usize + 1;
    if steps > MAX_REPLAY_COMMITS {
        return Err(DecodeError::BadChecksum);
    }
    Ok(steps)
}

/// Reconstruct the full game from its encoded essentials.
///
/// `expected_checksum` is the payload's element checksum when the schema
/// carries one; the replayed sequence must reproduce it exactly.
pub(crate) fn reconstruct(
    seed: u64,
    threshold: SeenThreshold,
    incorrect: &[u32],
    expected_checksum: Option<u64>,
    pool: &WordPool,
) -> Result<GameResult, DecodeError> {
    let steps = implied_commit_count(incorrect)?;

    let mut sampler = WordSampler::new(seed, threshold, pool.words().to_vec());
    let mut digest = ELEMENT_CHECKSUM_SEED;
    let mut commits = Vec::with_capacity(steps);
    let mut score = 0u32;
    let mut lives = INITIAL_LIVES;
    let mut wrong = incorrect.iter();
    let mut next_wrong = wrong.next();

    for index in 0..steps {
        // A payload that outruns its own pool is corrupt.
        let element = sampler.next().ok_or(DecodeError::BadChecksum)?;
        let actual = if sampler.has_seen(&element) {
            SeenUnseen::Seen
        } else {
            SeenUnseen::Unseen
        };
        digest = Ksink::hash(digest, element.as_bytes());

        let guess = if next_wrong == Some(&(index as u32)) {
            next_wrong = wrong.next();
            lives -= 1;
            actual.flipped()
        } else {
            score += 1;
            actual
        };
        commits.push(Commit::new(element, actual, guess));
    }

    if let Some(expected) = expected_checksum {
        if digest != expected {
            return Err(DecodeError::BadChecksum);
        }
    }
    debug_assert_eq!(lives, 0, "replay must end the step the last life is lost");

    Ok(GameResult {
        score,
        lives,
        commits,
        unseen_set_id: pool.id(),
    })
}

/// Replay the sampler against a live log and compute the element checksum.
///
/// Self-check for the encode path: every replayed element must equal its
/// logged counterpart, otherwise the caller handed an inconsistent
/// `(seed, threshold, pool, log)` combination.
pub(crate) fn checked_element_checksum(
    seed: u64,
    threshold: SeenThreshold,
    pool: &WordPool,
    log: &CommitLog,
) -> Result<u64, EncodeError> {
    let mut sampler = WordSampler::new(seed, threshold, pool.words().to_vec());
    let mut digest = ELEMENT_CHECKSUM_SEED;
    for (index, commit) in log.iter().enumerate() {
        let element = sampler
            .next()
            .ok_or(EncodeError::ReplayExhausted { index })?;
        if element != commit.element {
            return Err(EncodeError::ReplayMismatch {
                index,
                logged: commit.element.clone(),
                replayed: element,
            });
        }
        digest = Ksink::hash(digest, element.as_bytes());
    }
    Ok(digest)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> WordPool {
        WordPool::new(
            UnseenSetId::Unspecified,
            [
                "lumiere", "nuage", "sentier", "orage", "falaise", "riviere", "brume", "etoile",
                "sommet", "clairiere", "galet", "mousse",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
        )
    }

    fn threshold() -> SeenThreshold {
        SeenThreshold::from_scaled(400_000_000).unwrap()
    }

    #[test]
    fn test_implied_commit_count() {
        assert_eq!(implied_commit_count(&[2, 5, 7]), Ok(8));
        assert_eq!(implied_commit_count(&[0, 1, 2]), Ok(3));
        // Wrong cardinality.
        assert_eq!(implied_commit_count(&[2, 5]), Err(DecodeError::BadChecksum));
        assert_eq!(
            implied_commit_count(&[2, 5, 7, 9]),
            Err(DecodeError::BadChecksum)
        );
        // Not strictly increasing.
        assert_eq!(
            implied_commit_count(&[5, 5, 7]),
            Err(DecodeError::BadChecksum)
        );
        assert_eq!(
            implied_commit_count(&[7, 5, 2]),
            Err(DecodeError::BadChecksum)
        );
    }

    #[test]
    fn test_implied_commit_count_caps_hostile_lengths() {
        // A near-u32::MAX index must be refused up front, not replayed.
        assert_eq!(
            implied_commit_count(&[0, 1, u32::MAX]),
            Err(DecodeError::BadChecksum)
        );
        assert_eq!(
            implied_commit_count(&[0, 1, MAX_REPLAY_COMMITS as u32]),
            Err(DecodeError::BadChecksum)
        );
        assert_eq!(
            implied_commit_count(&[0, 1, MAX_REPLAY_COMMITS as u32 - 1]),
            Ok(MAX_REPLAY_COMMITS)
        );
    }

    #[test]
    fn test_reconstruct_known_game() {
        // Pinned game: seed 812364469 over the test pool, always guessing
        // unseen, dies at commits 2, 5 and 7.
        let result =
            reconstruct(812364469, threshold(), &[2, 5, 7], None, &pool()).unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.lives, 0);
        assert_eq!(result.commits.len(), 8);
        assert_eq!(result.unseen_set_id, UnseenSetId::Unspecified);

        let actual: Vec<SeenUnseen> = result.commits.iter().map(|c| c.actual).collect();
        use SeenUnseen::*;
        assert_eq!(
            actual,
            vec![Unseen, Unseen, Seen, Unseen, Unseen, Seen, Unseen, Seen]
        );
        // Every incorrect commit is the actual status flipped.
        for (i, commit) in result.commits.iter().enumerate() {
            assert_eq!(commit.correct(), ![2, 5, 7].contains(&i));
            assert_eq!(commit.guess == commit.actual, commit.correct());
        }
    }

    #[test]
    fn test_reconstruct_checks_element_checksum() {
        let ok = reconstruct(
            812364469,
            threshold(),
            &[2, 5, 7],
            Some(13500260806812561041),
            &pool(),
        );
        assert!(ok.is_ok());

        let bad = reconstruct(
            812364469,
            threshold(),
            &[2, 5, 7],
            Some(13500260806812561041 ^ 1),
            &pool(),
        );
        assert_eq!(bad, Err(DecodeError::BadChecksum));
    }

    #[test]
    fn test_reconstruct_rejects_overrunning_pool() {
        let tiny = WordPool::new(UnseenSetId::Unspecified, Vec::new());
        assert_eq!(
            reconstruct(1, threshold(), &[0, 1, 2], None, &tiny),
            Err(DecodeError::BadChecksum)
        );
    }

    #[test]
    fn test_checked_element_checksum_matches_reconstruction() {
        let result =
            reconstruct(812364469, threshold(), &[2, 5, 7], None, &pool()).unwrap();
        let mut log = CommitLog::new();
        for commit in &result.commits {
            log.push(commit.clone());
        }
        let digest = checked_element_checksum(812364469, threshold(), &pool(), &log).unwrap();
        assert_eq!(digest, 13500260806812561041);
    }

    #[test]
    fn test_checked_element_checksum_rejects_foreign_log() {
        let mut log = CommitLog::new();
        log.push(Commit::new(
            "intrus".to_string(),
            SeenUnseen::Unseen,
            SeenUnseen::Unseen,
        ));
        let err = checked_element_checksum(812364469, threshold(), &pool(), &log);
        assert!(matches!(err, Err(EncodeError::ReplayMismatch { index: 0, .. })));
    }
}
