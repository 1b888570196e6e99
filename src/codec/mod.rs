//! Game-Over Replay Protocol
//!
//! Serializes a finished game into a short URL-safe string and decodes it
//! back by deterministic replay.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     REPLAY PROTOCOL                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  mod.rs     - SealedEncoded envelope, query text, dispatch  │
//! │  v01.rs     - "goc-v01" payload schema (current)            │
//! │  v00.rs     - "00" payload schema (legacy, decode-only)     │
//! │  replay.rs  - reconstruction by deterministic replay        │
//! │  error.rs   - encode/decode error taxonomy                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The envelope carries four query fields: `version` (schema tag),
//! `checksum` (transport digest over `data`, decimal u64), `data` (the
//! schema-specific payload text) and `unseen_set_id` (which word set the
//! game was played against). Decoding is a pure function of the query text
//! and the caller's pool; independent payloads decode safely in parallel.

pub mod error;
pub mod replay;
pub mod v00;
pub mod v01;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::game::history::CommitLog;
use crate::game::sampler::SeenThreshold;
use crate::game::session::GameSession;
use crate::game::words::{UnseenSetId, WordPool};

pub use error::{DecodeError, EncodeError};
pub use replay::GameResult;

// =============================================================================
// SEALED ENVELOPE
// =============================================================================

/// A sealed game-over payload, ready to travel as URL query parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SealedEncoded {
    version: String,
    checksum: u64,
    data: String,
    unseen_set_id: UnseenSetId,
}

impl SealedEncoded {
    /// Seal a finished game from its essentials under the current schema.
    ///
    /// Replays the sampler against `log` as a self-check before anything is
    /// serialized; inconsistent inputs fail loudly (see [`EncodeError`]).
    pub fn seal(
        seed: u64,
        threshold: SeenThreshold,
        pool: &WordPool,
        log: &CommitLog,
    ) -> Result<SealedEncoded, EncodeError> {
        let data = v01::encode(seed, threshold, pool, log)?;
        let checksum = v01::transport_checksum(data.as_bytes());
        debug!(version = v01::VERSION, checksum, "sealed game-over payload");
        Ok(SealedEncoded {
            version: v01::VERSION.to_string(),
            checksum,
            data,
            unseen_set_id: pool.id(),
        })
    }

    /// Seal a finished [`GameSession`].
    pub fn from_session(session: &GameSession) -> Result<SealedEncoded, EncodeError> {
        SealedEncoded::seal(
            session.seed(),
            session.seen_threshold(),
            session.word_pool(),
            session.log(),
        )
    }

    /// Render as URL query text (`version=…&checksum=…&data=…&unseen_set_id=…`).
    pub fn as_query(&self) -> String {
        serde_urlencoded::to_string(self)
            .expect("a flat struct of strings and integers always serializes")
    }

    /// The schema tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The transport digest over `data`.
    pub fn checksum(&self) -> u64 {
        self.checksum
    }

    /// The schema-specific payload text.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The word set the sealed game was played against.
    pub fn unseen_set_id(&self) -> UnseenSetId {
        self.unseen_set_id
    }
}

// =============================================================================
// DECODE
// =============================================================================

/// Raw envelope fields as they come off the query string; presence is
/// validated field by field so missing ones are reported by name.
#[derive(Debug, Deserialize)]
struct RawQuery {
    version: Option<String>,
    checksum: Option<String>,
    data: Option<String>,
    unseen_set_id: Option<String>,
}

/// Decode a game-over query string against the caller's word pool.
///
/// Checks run in protocol order: required fields, version dispatch, transport
/// digest, payload structure, set identity, then replay with element-checksum
/// verification. Every failure is returned as a [`DecodeError`]; this
/// function never panics on untrusted input.
pub fn decode_game_over(query: &str, pool: &WordPool) -> Result<GameResult, DecodeError> {
    let raw: RawQuery =
        serde_urlencoded::from_str(query).map_err(|_| DecodeError::BadChecksum)?;
    let version = raw.version.ok_or(DecodeError::MissingField("version"))?;
    let checksum = raw.checksum.ok_or(DecodeError::MissingField("checksum"))?;
    let data = raw.data.ok_or(DecodeError::MissingField("data"))?;
    // Field presence is checked before version dispatch; only legacy
    // envelopes, which predate the unseen_set_id field, may omit it.
    if raw.unseen_set_id.is_none() && version != v00::VERSION {
        return Err(DecodeError::MissingField("unseen_set_id"));
    }
    debug!(version = %version, "decoding game-over payload");

    match version.as_str() {
        v01::VERSION => {
            let claimed_set = raw
                .unseen_set_id
                .ok_or(DecodeError::MissingField("unseen_set_id"))?;
            let checksum: u64 = checksum.parse().map_err(|_| DecodeError::BadChecksum)?;
            if v01::transport_checksum(data.as_bytes()) != checksum {
                warn!("transport checksum mismatch on v01 payload");
                return Err(DecodeError::BadChecksum);
            }
            v01::decode(&data, &claimed_set, pool)
        }
        v00::VERSION => {
            // Legacy envelopes predate the unseen_set_id field.
            let checksum: u64 = checksum.parse().map_err(|_| DecodeError::BadChecksum)?;
            if v00::transport_checksum(data.as_bytes()) != checksum {
                warn!("transport checksum mismatch on legacy payload");
                return Err(DecodeError::BadChecksum);
            }
            v00::decode(&data, pool)
        }
        _ => Err(DecodeError::UnknownVersion(version)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
