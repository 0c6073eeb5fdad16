// One-shot komihash: seed setup, round primitives, the 8-lane bulk loop,
// and the short-tail epilogue.
//
// The function is a pure mapping of (message, seed) to a 64-bit digest and
// dispatches on length only, never on content. Messages up to 63 bytes run
// entirely on the primary lane pair (S1, S5); longer messages spread across
// eight lanes tied together by a cross-lane XOR each 64-byte block, then
// collapse back to the pair for the epilogue.

use crate::hash::load::{pad_tail_l3, pad_tail_l4, pad_tail_nz, read_u64_le};
use crate::hash::mul::mul128;

// ---------------------------------------------------------------------------
// Lane constants (mantissa bits of pi; fixed by the digest format)
// ---------------------------------------------------------------------------

pub(crate) const LANE1: u64 = 0x243F_6A88_85A3_08D3;
pub(crate) const LANE2: u64 = 0x1319_8A2E_0370_7344;
pub(crate) const LANE3: u64 = 0xA409_3822_299F_31D0;
pub(crate) const LANE4: u64 = 0x082E_FA98_EC4E_6C89;
pub(crate) const LANE5: u64 = 0x4528_21E6_38D0_1377;
pub(crate) const LANE6: u64 = 0xBE54_66CF_34E9_0C6C;
pub(crate) const LANE7: u64 = 0xC0AC_29B7_C97C_50DD;
pub(crate) const LANE8: u64 = 0x3F84_D5B5_B547_0917;

/// Even bit half of the user seed, mixed into S1.
const SEED_MASK_EVEN: u64 = 0x5555_5555_5555_5555;
/// Odd bit half of the user seed, mixed into S5.
const SEED_MASK_ODD: u64 = 0xAAAA_AAAA_AAAA_AAAA;

// ---------------------------------------------------------------------------
// Round primitives
// ---------------------------------------------------------------------------

/// Input-less mixing round on the primary pair.
#[inline(always)]
pub(crate) fn hash_round(s1: &mut u64, s5: &mut u64) {
    let (u, v) = (*s1, *s5);
    mul128(u, v, s1, s5);
    *s1 ^= *s5;
}

/// Absorb 16 message bytes at `msg[off..]` into the primary pair.
#[inline(always)]
pub(crate) fn hash16(msg: &[u8], off: usize, s1: &mut u64, s5: &mut u64) {
    let m1 = *s1 ^ read_u64_le(msg, off);
    let m2 = *s5 ^ read_u64_le(msg, off + 8);
    mul128(m1, m2, s1, s5);
    *s1 ^= *s5;
}

/// Final round: absorb the padded last words and close with one more
/// input-less round.
#[inline(always)]
pub(crate) fn hash_fin(r1: u64, r2: u64, mut s5: u64) -> u64 {
    let mut s1 = 0u64;
    mul128(r1, r2, &mut s1, &mut s5);
    s1 ^= s5;
    hash_round(&mut s1, &mut s5);
    s1
}

/// Initialize the primary pair from the user seed.
///
/// The seed's even and odd bit halves enter disjoint lanes; the round that
/// follows is required even for empty input, so that patterned seeds (such
/// as coordinate-derived Perlin noise seeds) are diffused before the first
/// message byte is absorbed.
#[inline(always)]
pub(crate) fn seed_init(seed: u64) -> (u64, u64) {
    let mut s1 = LANE1 ^ (seed & SEED_MASK_EVEN);
    let mut s5 = LANE5 ^ (seed & SEED_MASK_ODD);
    hash_round(&mut s1, &mut s5);
    (s1, s5)
}

// ---------------------------------------------------------------------------
// The eight-lane bulk state
// ---------------------------------------------------------------------------

/// The eight 64-bit lanes of the bulk loop.
#[derive(Clone, Copy)]
pub(crate) struct Lanes {
    s1: u64,
    s2: u64,
    s3: u64,
    s4: u64,
    s5: u64,
    s6: u64,
    s7: u64,
    s8: u64,
}

impl Lanes {
    /// Spread an already-initialized primary pair across all eight lanes.
    #[inline]
    pub(crate) fn derive(s1: u64, s5: u64) -> Self {
        Self {
            s1,
            s2: LANE2 ^ s1,
            s3: LANE3 ^ s1,
            s4: LANE4 ^ s1,
            s5,
            s6: LANE6 ^ s5,
            s7: LANE7 ^ s5,
            s8: LANE8 ^ s5,
        }
    }

    /// Initialize all eight lanes directly from a user seed.
    #[inline]
    pub(crate) fn begin(seed: u64) -> Self {
        let (s1, s5) = seed_init(seed);
        Self::derive(s1, s5)
    }

    #[inline]
    pub(crate) fn from_words(w: &[u64; 8]) -> Self {
        Self {
            s1: w[0],
            s2: w[1],
            s3: w[2],
            s4: w[3],
            s5: w[4],
            s6: w[5],
            s7: w[6],
            s8: w[7],
        }
    }

    #[inline]
    pub(crate) fn to_words(self) -> [u64; 8] {
        [
            self.s1, self.s2, self.s3, self.s4, self.s5, self.s6, self.s7,
            self.s8,
        ]
    }

    /// Run the 64-byte-per-iteration bulk loop over `msg[pos..]` while more
    /// than `threshold` bytes remain. Returns the new position.
    ///
    /// The trailing cross-lane XOR each iteration fuses the four lane pairs
    /// into one wide PRNG; dropping it changes every digest.
    #[inline]
    pub(crate) fn absorb(&mut self, msg: &[u8], mut pos: usize, threshold: usize) -> usize {
        debug_assert!(threshold >= 63);
        while msg.len() - pos > threshold {
            let m1 = self.s1 ^ read_u64_le(msg, pos);
            let m5 = self.s5 ^ read_u64_le(msg, pos + 32);
            mul128(m1, m5, &mut self.s1, &mut self.s5);

            let m2 = self.s2 ^ read_u64_le(msg, pos + 8);
            let m6 = self.s6 ^ read_u64_le(msg, pos + 40);
            mul128(m2, m6, &mut self.s2, &mut self.s6);

            let m3 = self.s3 ^ read_u64_le(msg, pos + 16);
            let m7 = self.s7 ^ read_u64_le(msg, pos + 48);
            mul128(m3, m7, &mut self.s3, &mut self.s7);

            let m4 = self.s4 ^ read_u64_le(msg, pos + 24);
            let m8 = self.s8 ^ read_u64_le(msg, pos + 56);
            mul128(m4, m8, &mut self.s4, &mut self.s8);

            pos += 64;

            self.s2 ^= self.s5;
            self.s3 ^= self.s6;
            self.s4 ^= self.s7;
            self.s1 ^= self.s8;
        }
        pos
    }

    /// Collapse the eight lanes back to the primary pair.
    #[inline]
    pub(crate) fn fold(self) -> (u64, u64) {
        (
            self.s1 ^ self.s2 ^ self.s3 ^ self.s4,
            self.s5 ^ self.s6 ^ self.s7 ^ self.s8,
        )
    }
}

// ---------------------------------------------------------------------------
// Epilogue (at most 63 bytes remain)
// ---------------------------------------------------------------------------

/// Finish a message whose tail `msg[pos..]` holds at most 63 bytes.
///
/// Precondition: `msg` holds at least 16 bytes overall, so the padded
/// loaders' backward windows stay inside `msg`.
#[inline]
pub(crate) fn epilogue(msg: &[u8], mut pos: usize, mut s1: u64, mut s5: u64) -> u64 {
    let mut rem = msg.len() - pos;
    debug_assert!(rem <= 63);
    debug_assert!(pos + rem >= 16);

    if rem > 31 {
        hash16(msg, pos, &mut s1, &mut s5);
        hash16(msg, pos + 16, &mut s1, &mut s5);
        pos += 32;
        rem -= 32;
    }
    if rem > 15 {
        hash16(msg, pos, &mut s1, &mut s5);
        pos += 16;
        rem -= 16;
    }
    let (r1, r2) = if rem > 7 {
        (
            s1 ^ read_u64_le(msg, pos),
            s5 ^ pad_tail_l4(msg, pos + 8, rem - 8),
        )
    } else {
        (s1 ^ pad_tail_l4(msg, pos, rem), s5)
    };
    hash_fin(r1, r2, s5)
}

// ---------------------------------------------------------------------------
// One-shot hash
// ---------------------------------------------------------------------------

/// Hash `msg` with the given seed, returning the 64-bit komihash digest.
///
/// The digest is bit-identical across platforms and equals the result of
/// feeding the same bytes through [`KomihashStream`] in any chunking.
///
/// ```
/// assert_eq!(okomi::komihash(b"7 chars", 0), 0x2c514f6e5dcb11cb);
/// ```
///
/// [`KomihashStream`]: crate::KomihashStream
pub fn komihash(msg: &[u8], seed: u64) -> u64 {
    let (mut s1, mut s5) = seed_init(seed);
    let n = msg.len();

    if n < 16 {
        let mut r1 = s1;
        let mut r2 = s5;
        if n > 7 {
            r2 ^= pad_tail_l3(msg, 8, n - 8);
            r1 ^= read_u64_le(msg, 0);
        } else if n != 0 {
            r1 ^= pad_tail_nz(msg, 0, n);
        }
        return hash_fin(r1, r2, s5);
    }

    if n < 32 {
        hash16(msg, 0, &mut s1, &mut s5);
        let (r1, r2) = if n > 23 {
            (
                s1 ^ read_u64_le(msg, 16),
                s5 ^ pad_tail_l4(msg, 24, n - 24),
            )
        } else {
            (s1 ^ pad_tail_l4(msg, 16, n - 16), s5)
        };
        return hash_fin(r1, r2, s5);
    }

    let mut pos = 0;
    if n > 63 {
        let mut lanes = Lanes::derive(s1, s5);
        pos = lanes.absorb(msg, 0, 63);
        (s1, s5) = lanes.fold();
    }
    epilogue(msg, pos, s1, s5)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
