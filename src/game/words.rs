//! Word Pool Identity
//!
//! A game is played against one named word set. The set's identity travels
//! with encoded payloads so a decoder can refuse to replay against the wrong
//! pool, and pool *order* is part of the replay contract: encode and decode
//! must be handed the same words in the same order.
//!
//! Fetching the words themselves (network or bundled asset) is an external
//! collaborator; the core takes delivered pools by value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the set that unseen elements are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnseenSetId {
    /// Placeholder set, used by tests and tooling.
    Unspecified,

    /// French dictionary words.
    DictionaryFr01,

    /// The 999 most used French words according to
    /// [Wiktionary](https://en.wiktionary.org/wiki/Wiktionary:Frequency_lists/French_wordlist_opensubtitles_5000).
    Top999WiktionaryFr,
}

impl UnseenSetId {
    /// Stable protocol number for each variant. Never reused, never changed.
    pub fn unique_number(&self) -> u64 {
        match self {
            UnseenSetId::Unspecified => 7359453237177161485,
            UnseenSetId::DictionaryFr01 => 16775286842649692529,
            UnseenSetId::Top999WiktionaryFr => 4682054772874934823,
        }
    }

    /// The name used on the wire (`unseen_set_id` query field).
    pub fn name(&self) -> &'static str {
        match self {
            UnseenSetId::Unspecified => "Unspecified",
            UnseenSetId::DictionaryFr01 => "DictionaryFr01",
            UnseenSetId::Top999WiktionaryFr => "Top999WiktionaryFr",
        }
    }

    /// Parse a wire name back into an id. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<UnseenSetId> {
        match name {
            "Unspecified" => Some(UnseenSetId::Unspecified),
            "DictionaryFr01" => Some(UnseenSetId::DictionaryFr01),
            "Top999WiktionaryFr" => Some(UnseenSetId::Top999WiktionaryFr),
            _ => None,
        }
    }
}

impl fmt::Display for UnseenSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, immutable word list tagged with its identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPool {
    id: UnseenSetId,
    words: Vec<String>,
}

impl WordPool {
    /// Create a pool from delivered words. Order is preserved as given.
    pub fn new(id: UnseenSetId, words: Vec<String>) -> WordPool {
        WordPool { id, words }
    }

    /// The pool's identity.
    pub fn id(&self) -> UnseenSetId {
        self.id
    }

    /// The words, in delivery order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words in the pool.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the pool holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
