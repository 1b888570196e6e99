//! Game Logic Module
//!
//! Everything a live game needs, all of it deterministic:
//!
//! - `words`: word-pool identity and delivered pools
//! - `sampler`: the seen/unseen sampling engine
//! - `history`: commits and the append-only commit log
//! - `session`: the live-game driver (guess flow, score, lives)

pub mod history;
pub mod sampler;
pub mod session;
pub mod words;

// Re-export key types
pub use history::{Commit, CommitLog, SeenUnseen};
pub use sampler::{SeenThreshold, ThresholdError, WordSampler, THRESHOLD_MAX};
pub use session::{GameError, GameSession, INITIAL_LIVES};
pub use words::{UnseenSetId, WordPool};
