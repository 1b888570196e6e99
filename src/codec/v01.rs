//! Payload Schema `goc-v01`
//!
//! The current game-over payload: JSON body
//! `{seed, seen_threshold, incorrect_commits, element_checksum}` encoded as
//! base64url (no padding), guarded in transit by a KSINK digest over the
//! encoded text. Every constant here is frozen; schema changes require a new
//! version tag.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::hash::{Ksink, Mix64};
use crate::game::history::CommitLog;
use crate::game::sampler::SeenThreshold;
use crate::game::session::INITIAL_LIVES;
use crate::game::words::{UnseenSetId, WordPool};

use super::error::{DecodeError, EncodeError};
use super::replay::{checked_element_checksum, reconstruct, GameResult};

/// Version tag of this schema. Published tags are never reused.
pub const VERSION: &str = "goc-v01";

/// Key of the transport digest over the encoded `data` text.
const TRANSPORT_SEED: u64 = 9375103332589136009;

/// Transport digest guarding `data` against transcription and URL corruption
/// (distinct from the element checksum, which guards semantic replay
/// correctness).
pub(crate) fn transport_checksum(data: &[u8]) -> u64 {
    Ksink::hash(TRANSPORT_SEED, data)
}

/// The decoded form of the `data` field. Field names are wire format.
#[derive(Debug, Serialize, Deserialize)]
struct PayloadV01 {
    seed: u64,
    seen_threshold: u32,
    incorrect_commits: Vec<u32>,
    element_checksum: u64,
}

/// Encode a finished game's essentials into the `data` text.
///
/// Replays the sampler over the log as a self-check: a mismatch means the
/// caller's `(seed, threshold, pool, log)` are inconsistent, which is a
/// programmer error and fails loudly rather than encoding corrupt data.
pub(crate) fn encode(
    seed: u64,
    threshold: SeenThreshold,
    pool: &WordPool,
    log: &CommitLog,
) -> Result<String, EncodeError> {
    let incorrect = log.incorrect_indices();
    if incorrect.len() != INITIAL_LIVES as usize {
        return Err(EncodeError::GameNotFinished {
            lives: INITIAL_LIVES.saturating_sub(incorrect.len() as u32),
        });
    }
    // The last incorrect commit must also be the last commit: decode derives
    // the total commit count from it, so anything after is unrepresentable.
    let terminal = incorrect[incorrect.len() - 1] as usize;
    if log.len() != terminal + 1 {
        return Err(EncodeError::TrailingCommits { index: terminal });
    }
    let element_checksum = checked_element_checksum(seed, threshold, pool, log)?;
    let payload = PayloadV01 {
        seed,
        seen_threshold: threshold.scaled(),
        incorrect_commits: incorrect,
        element_checksum,
    };
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_string(&payload)?))
}

/// Decode a `data` text whose transport digest already checked out.
///
/// `claimed_set` is the envelope's `unseen_set_id`; it must name the set the
/// caller's pool belongs to. The check runs after structural parsing (a
/// corrupt payload is `BadChecksum` regardless of set) but before replay, so
/// a wrong pool surfaces as `UnseenSetMismatch` rather than the checksum
/// failure the replay would otherwise produce.
pub(crate) fn decode(
    data: &str,
    claimed_set: &str,
    pool: &WordPool,
) -> Result<GameResult, DecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(data).map_err(|_| {
        warn!("game-over data is not valid base64url");
        DecodeError::BadChecksum
    })?;
    let payload: PayloadV01 = serde_json::from_slice(&bytes).map_err(|_| {
        warn!("game-over data is not a valid v01 payload");
        DecodeError::BadChecksum
    })?;
    let threshold =
        SeenThreshold::from_scaled(payload.seen_threshold).map_err(|_| DecodeError::BadChecksum)?;

    match UnseenSetId::from_name(claimed_set) {
        Some(id) if id == pool.id() => (),
        _ => {
            return Err(DecodeError::UnseenSetMismatch {
                expected: pool.id(),
                found: claimed_set.to_string(),
            });
        }
    }

    reconstruct(
        payload.seed,
        threshold,
        &payload.incorrect_commits,
        Some(payload.element_checksum),
        pool,
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::history::{Commit, SeenUnseen};

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

    fn finished_log() -> CommitLog {
        let result = reconstruct(812364469, threshold(), &[2, 5, 7], None, &pool()).unwrap();
        let mut log = CommitLog::new();
        for commit in result.commits {
            log.push(commit);
        }
        log
    }

    // Pinned wire bytes for the game above. Must never change.
    const DATA: &str = "eyJzZWVkIjo4MTIzNjQ0NjksInNlZW5fdGhyZXNob2xkIjo0MDAwMDAwMDAsImluY29ycmVj\
dF9jb21taXRzIjpbMiw1LDddLCJlbGVtZW50X2NoZWNrc3VtIjoxMzUwMDI2MDgwNjgxMjU2MTA0MX0";

    #[test]
    fn test_encode_known_wire_bytes() {
        let data = encode(812364469, threshold(), &pool(), &finished_log()).unwrap();
        assert_eq!(data, DATA);
        assert_eq!(transport_checksum(data.as_bytes()), 8760671391306425287);
    }

    #[test]
    fn test_decode_known_wire_bytes() {
        let result = decode(DATA, "Unspecified", &pool()).unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.lives, 0);
        assert_eq!(result.commits.len(), 8);
    }

    #[test]
    fn test_encode_rejects_unfinished_game() {
        let log = CommitLog::new();
        let err = encode(812364469, threshold(), &pool(), &log);
        assert!(matches!(err, Err(EncodeError::GameNotFinished { lives: 3 })));
    }

    #[test]
    fn test_encode_rejects_commits_after_game_over() {
        // Correct commits after the third wrong guess cannot come from a real
        // game; decode would stop at the terminal commit and never verify.
        let mut log = finished_log();
        log.push(Commit::new(
            "riviere".to_string(),
            SeenUnseen::Seen,
            SeenUnseen::Seen,
        ));
        let err = encode(812364469, threshold(), &pool(), &log);
        assert!(matches!(err, Err(EncodeError::TrailingCommits { index: 7 })));
    }

    #[test]
    fn test_encode_rejects_inconsistent_log() {
        let mut log = finished_log();
        log = {
            // Rebuild the log with one foreign element spliced in.
            let mut tampered = CommitLog::new();
            for (i, commit) in log.iter().enumerate() {
                if i == 3 {
                    tampered.push(Commit::new(
                        "intrus".to_string(),
                        SeenUnseen::Unseen,
                        SeenUnseen::Unseen,
                    ));
                } else {
                    tampered.push(commit.clone());
                }
            }
            tampered
        };
        let err = encode(812364469, threshold(), &pool(), &log);
        assert!(matches!(err, Err(EncodeError::ReplayMismatch { index: 3, .. })));
    }

    #[test]
    fn test_decode_rejects_garbled_data() {
        assert_eq!(
            decode("not base64url!!", "Unspecified", &pool()),
            Err(DecodeError::BadChecksum)
        );
        let not_json = URL_SAFE_NO_PAD.encode("pas du json");
        assert_eq!(
            decode(&not_json, "Unspecified", &pool()),
            Err(DecodeError::BadChecksum)
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_threshold() {
        let body = r#"{"seed":1,"seen_threshold":1000000001,"incorrect_commits":[0,1,2],"element_checksum":0}"#;
        let data = URL_SAFE_NO_PAD.encode(body);
        assert_eq!(
            decode(&data, "Unspecified", &pool()),
            Err(DecodeError::BadChecksum)
        );
    }

    #[test]
    fn test_decode_rejects_malformed_incorrect_indices() {
        for indices in ["[2,5]", "[2,5,7,9]", "[5,5,7]", "[7,5,2]"] {
            let body = format!(
                r#"{{"seed":812364469,"seen_threshold":400000000,"incorrect_commits":{indices},"element_checksum":13500260806812561041}}"#
            );
            let data = URL_SAFE_NO_PAD.encode(body);
            assert_eq!(
                decode(&data, "Unspecified", &pool()),
                Err(DecodeError::BadChecksum),
                "indices {indices} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_reports_wrong_unseen_set() {
        // Internally consistent payload, wrong pool identity: must be the
        // distinct mismatch error, not a checksum failure.
        let err = decode(DATA, "DictionaryFr01", &pool());
        assert_eq!(
            err,
            Err(DecodeError::UnseenSetMismatch {
                expected: UnseenSetId::Unspecified,
                found: "DictionaryFr01".to_string(),
            })
        );

        let err = decode(DATA, "PasUnSet", &pool());
        assert_eq!(
            err,
            Err(DecodeError::UnseenSetMismatch {
                expected: UnseenSetId::Unspecified,
                found: "PasUnSet".to_string(),
            })
        );
    }
}
