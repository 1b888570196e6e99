//! # Deja Vu Engine
//!
//! Deterministic core for a seen/unseen word game: a seeded sampler deals
//! words, the player guesses whether each one has appeared before, and a
//! finished game seals into a short URL-safe payload that anyone can verify
//! by replaying it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DEJA VU ENGINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/   - deterministic primitives                         │
//! │    rng     - konadare192px++ PRNG, bounded sampling         │
//! │    hash    - Knomul/Ksink mixers, element checksum          │
//! │  game/   - live-game logic                                  │
//! │    words   - word-set identity, delivered pools             │
//! │    sampler - seen/unseen sampling engine                    │
//! │    history - commits and the append-only commit log         │
//! │    session - guess flow, score, lives                       │
//! │  codec/  - game-over replay protocol                        │
//! │    v01     - "goc-v01" payload schema (current)             │
//! │    v00     - "00" payload schema (legacy, decode-only)      │
//! │    replay  - reconstruction by deterministic replay         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Contract
//!
//! Everything downstream of a seed is reproducible bit for bit on any
//! platform: the PRNG and mixers use explicit wrapping arithmetic, the
//! sampler's threshold is integer-scaled (no floats on the hot path), and
//! the commit log pins the exact guess sequence. A sealed payload therefore
//! needs to carry only the seed, the threshold and the incorrect-commit
//! indices; the decoder replays the rest and cross-checks an element
//! checksum over the dealt words.
//!
//! ## Example
//!
//! ```
//! use deja_vu::{
//!     decode_game_over, GameSession, SealedEncoded, SeenThreshold, SeenUnseen, UnseenSetId,
//!     WordPool,
//! };
//!
//! let pool = WordPool::new(
//!     UnseenSetId::Unspecified,
//!     ["lumiere", "nuage", "sentier", "orage", "falaise", "riviere"]
//!         .iter()
//!         .map(|w| w.to_string())
//!         .collect(),
//! );
//! let threshold = SeenThreshold::from_scaled(400_000_000)?;
//!
//! let mut session = GameSession::new(812364469, threshold, pool.clone());
//! while !session.finished() {
//!     session.next_word()?;
//!     session.guess(SeenUnseen::Unseen)?;
//! }
//!
//! let sealed = SealedEncoded::from_session(&session)?;
//! let replayed = decode_game_over(&sealed.as_query(), &pool)?;
//! assert_eq!(replayed.score, session.score());
//! assert_eq!(replayed.lives, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod codec;
pub mod core;
pub mod game;

// Re-export the main public API
pub use codec::{decode_game_over, DecodeError, EncodeError, GameResult, SealedEncoded};
pub use core::rng::DeterministicRng;
pub use game::history::{Commit, CommitLog, SeenUnseen};
pub use game::sampler::{SeenThreshold, ThresholdError, WordSampler, THRESHOLD_MAX};
pub use game::session::{GameError, GameSession, INITIAL_LIVES};
pub use game::words::{UnseenSetId, WordPool};

/// Crate version, straight from the manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
