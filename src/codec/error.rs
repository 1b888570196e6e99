//! Codec Error Taxonomy
//!
//! Decode errors are a closed set the presentation layer can map to a
//! generic failure state; they are always returned, never panicked.
//! Encode errors are programmer-contract violations and are deliberately
//! loud.

use thiserror::Error;

use crate::game::words::UnseenSetId;

/// Failures while sealing a finished game into a payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Only finished games (all lives spent) can be encoded.
    #[error("game is not finished: {lives} lives remain")]
    GameNotFinished {
        /// Lives still remaining in the log being encoded.
        lives: u32,
    },

    /// The log continues past the commit that spent the last life. No real
    /// game produces such a log, and its payload could never verify.
    #[error("log continues past the terminal commit at index {index}")]
    TrailingCommits {
        /// Index of the terminal (last incorrect) commit.
        index: usize,
    },

    /// Replaying the sampler did not reproduce the logged elements. The log
    /// and the `(seed, threshold, pool)` triple disagree; encoding corrupt
    /// data is never an option.
    #[error("replay produced `{replayed}` but the log holds `{logged}` at commit {index}")]
    ReplayMismatch {
        /// Commit index where the replay diverged.
        index: usize,
        /// Element recorded in the log.
        logged: String,
        /// Element the replay produced.
        replayed: String,
    },

    /// The replay ran out of words before covering the log.
    #[error("word pool exhausted during replay at commit {index}")]
    ReplayExhausted {
        /// Commit index that could not be replayed.
        index: usize,
    },

    /// Payload body serialization failed.
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures while decoding a shared payload. Coarse by design: everything
/// that indicates untrusted or corrupted input collapses into `BadChecksum`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A required query field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The version tag matches no known payload schema.
    #[error("version `{0}` is not recognised")]
    UnknownVersion(String),

    /// Transport digest mismatch, structurally invalid payload, or element
    /// checksum mismatch after replay. All three mean the data cannot be
    /// trusted.
    #[error("the payload is corrupted")]
    BadChecksum,

    /// The payload belongs to a different word set than the caller supplied.
    /// Distinct from `BadChecksum`: the data may be internally consistent.
    #[error("payload was encoded against unseen set `{found}`, expected `{expected}`")]
    UnseenSetMismatch {
        /// The set the caller's pool belongs to.
        expected: UnseenSetId,
        /// The set named by the payload.
        found: String,
    },
}
