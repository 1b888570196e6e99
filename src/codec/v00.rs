//! Legacy Payload Schema `"00"`
//!
//! The first published share format: standard base64 of
//! `{unseen_id, seed, incorrect_commits}`, KNOMUL transport digest, no
//! element checksum, threshold fixed at 0.4 over the French dictionary set.
//! Decode-only; new games always seal as [`super::v01::VERSION`]. Kept so
//! links shared under the old schema keep resolving.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::warn;

use crate::core::hash::{Knomul, Mix64};
use crate::game::sampler::SeenThreshold;
use crate::game::words::{UnseenSetId, WordPool};

use super::error::DecodeError;
use super::replay::{reconstruct, GameResult};

/// Version tag of the legacy schema.
pub const VERSION: &str = "00";

/// Key of the legacy transport digest.
const TRANSPORT_SEED: u64 = 4997987866499591411;

/// Scaled threshold every legacy game was played at.
const LEGACY_THRESHOLD: u32 = 400_000_000;

/// Legacy transport digest over the encoded `data` text.
pub(crate) fn transport_checksum(data: &[u8]) -> u64 {
    Knomul::hash(TRANSPORT_SEED, data)
}

/// The decoded form of the legacy `data` field. Field names are wire format.
#[derive(Debug, Deserialize)]
struct PayloadV00 {
    #[allow(dead_code)] // carried on the wire, superseded by the fixed set below
    unseen_id: UnseenSetId,
    seed: u64,
    incorrect_commits: Vec<u32>,
}

/// Decode a legacy `data` text whose transport digest already checked out.
///
/// Legacy payloads were only ever produced against `DictionaryFr01`; the
/// caller's pool must be that set.
pub(crate) fn decode(data: &str, pool: &WordPool) -> Result<GameResult, DecodeError> {
    let bytes = STANDARD.decode(data).map_err(|_| {
        warn!("legacy game-over data is not valid base64");
        DecodeError::BadChecksum
    })?;
    let payload: PayloadV00 = serde_json::from_slice(&bytes).map_err(|_| {
        warn!("legacy game-over data is not a valid v00 payload");
        DecodeError::BadChecksum
    })?;

    if pool.id() != UnseenSetId::DictionaryFr01 {
        return Err(DecodeError::UnseenSetMismatch {
            expected: pool.id(),
            found: UnseenSetId::DictionaryFr01.name().to_string(),
        });
    }

    let threshold =
        SeenThreshold::from_scaled(LEGACY_THRESHOLD).expect("legacy threshold is within range");
    reconstruct(payload.seed, threshold, &payload.incorrect_commits, None, pool)
}

// =============================================================================
// TESTS
// =============================================================================
