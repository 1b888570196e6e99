//! Protocol Mixing Functions
//!
//! The two fixed 64-bit mixers that anchor the replay protocol, plus the
//! order-sensitive element checksum fold built on top of them.
//!
//! These functions are protocol constants: every encoder and decoder must
//! compute bit-identical digests, on every platform, forever. Changing either
//! mixer (or any constant below) breaks all previously shared payloads and
//! requires a new payload version tag.

/// 64-bit fractional part of sqrt(3) (a SHA-512 initial value).
const SQRT_3: u64 = 0xBB67AE8584CAA73B;

/// 64-bit fractional part of sqrt(5).
const SQRT_5: u64 = 0x3C6EF372FE94F82B;

/// 64-bit fractional part of sqrt(19).
const SQRT_19: u64 = 0x5BE0CD19137E2179;

/// Starting accumulator for the element checksum fold.
pub const ELEMENT_CHECKSUM_SEED: u64 = 2636128771936786712;

// =============================================================================
// MIX64 TRAIT
// =============================================================================

/// A keyed 64-bit permutation with derived state-seeding and byte-fold hashing.
///
/// `permute` maps `(x, c)` to a well-distributed 64 bits; everything else is
/// defined in terms of it. All arithmetic is explicitly wrapping so debug and
/// release builds produce the same stream.
pub trait Mix64 {
    /// Permute `x` under the mixing key `c`.
    fn permute(x: u64, c: u64) -> u64;

    /// Fold `bytes` into a 64-bit digest starting from `seed`.
    ///
    /// Order-sensitive: permuting the input changes the result.
    fn hash(seed: u64, bytes: &[u8]) -> u64 {
        bytes.iter().fold(seed, |c, &b| Self::permute(b as u64, c))
    }

    /// Scramble `state` in place, two full passes, each word keyed by its
    /// predecessor. With `forbid_all_zeros` the all-zero fixpoint is excluded.
    fn stir(state: &mut [u64], forbid_all_zeros: bool) {
        match state.len() {
            0 => (),
            1 => {
                state[0] = Self::permute(state[0], SQRT_19);
                if forbid_all_zeros && state[0] == 0 {
                    state[0] = Self::permute(0, SQRT_5);
                }
            }
            n => {
                for _ in 0..2 {
                    for i in 0..n {
                        state[i] = Self::permute(state[i], state[(i + n - 1) % n]);
                    }
                    if forbid_all_zeros && state.iter().all(|x| *x == 0) {
                        state[0] = SQRT_5;
                    }
                }
            }
        }
    }

    /// Expand `seed` into `state` (sequential fill, then `stir`).
    ///
    /// Used to seed the generator in [`crate::core::rng`]; never produces an
    /// all-zero state.
    fn mix_state(state: &mut [u64], seed: u64) {
        for (i, x) in state.iter_mut().enumerate() {
            *x = seed.wrapping_add(i as u64);
        }
        Self::stir(state, true);
    }
}

// =============================================================================
// KNOMUL
// =============================================================================

/// Multiplication-free indexed permutation (Pelle Evensen's KNOMUL).
///
/// Keys the legacy `"00"` transport checksum and the generator seeding.
pub struct Knomul;

impl Mix64 for Knomul {
    fn permute(mut x: u64, mut c: u64) -> u64 {
        for i in 0..5u64 {
            x ^= x.rotate_right(25) ^ x.rotate_right(49);
            c = c.wrapping_add(SQRT_3.wrapping_add(c << 15).wrapping_add(c << 7).wrapping_add(i));
            c ^= (c >> 47) ^ (c >> 23);
            x = x.wrapping_add(c);
            x ^= (x >> 11) ^ (x >> 3);
        }
        x
    }
}

// =============================================================================
// KSINK
// =============================================================================

/// Multiply-mix indexed permutation (Pelle Evensen's KSINK).
///
/// Keys the `goc-v01` transport checksum and the element checksum.
pub struct Ksink;

impl Mix64 for Ksink {
    fn permute(mut x: u64, mut c: u64) -> u64 {
        for _ in 0..3 {
            c = c.wrapping_add(SQRT_3);
            c ^= c.rotate_right(49) ^ c.rotate_right(25);
            x ^= (x >> 47) ^ (x >> 29);
            x = x.wrapping_add(c);
            c = c.wrapping_mul(SQRT_5);
            x = x.wrapping_mul(SQRT_19);
        }
        x
    }
}

// =============================================================================
// ELEMENT CHECKSUM
// =============================================================================

/// Digest fingerprinting the exact element sequence a seed produced.
///
/// Folds [`Ksink::hash`] across `elements` in order, starting from
/// [`ELEMENT_CHECKSUM_SEED`]. An empty sequence yields the seed itself.
pub fn element_checksum<I, S>(elements: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    elements
        .into_iter()
        .fold(ELEMENT_CHECKSUM_SEED, |acc, e| Ksink::hash(acc, e.as_ref()))
}

// =============================================================================
// TESTS
// =============================================================================
