// The 64x64 -> 128 multiply primitive shared by the hash and the PRNG.
//
// `mul128` writes the low half of the product into `lo` and *adds* the high
// half into `hi_accum`. Every callsite either starts from the value it wants
// accumulated into or treats the pre-call contents as part of the state, so
// the accumulating form is the contract, not an optimization.
//
// On 64-bit targets the compiler lowers the u128 product to a single `mul`
// (x86-64) or `mul` + `umulh` (aarch64). On 32-bit targets the product is
// decomposed into four 32x32 -> 64 partials with explicit carry propagation;
// both paths produce identical bits.

/// Full 128-bit product: `lo = low64(u * v)`, `hi_accum += high64(u * v)`.
#[cfg(not(target_pointer_width = "32"))]
#[inline(always)]
pub(crate) fn mul128(u: u64, v: u64, lo: &mut u64, hi_accum: &mut u64) {
    let p = (u as u128) * (v as u128);
    *lo = p as u64;
    *hi_accum = hi_accum.wrapping_add((p >> 64) as u64);
}

/// Full 128-bit product via four 32x32 -> 64 partial products.
#[cfg(target_pointer_width = "32")]
#[inline(always)]
pub(crate) fn mul128(u: u64, v: u64, lo: &mut u64, hi_accum: &mut u64) {
    let ul = u & 0xFFFF_FFFF;
    let uh = u >> 32;
    let vl = v & 0xFFFF_FFFF;
    let vh = v >> 32;

    let ll = ul * vl;
    let lh = ul * vh;
    let hl = uh * vl;
    let hh = uh * vh;

    // Middle column: carries from ll plus the low halves of the cross terms.
    let mid = (ll >> 32) + (lh & 0xFFFF_FFFF) + (hl & 0xFFFF_FFFF);

    *lo = (ll & 0xFFFF_FFFF) | (mid << 32);
    *hi_accum = hi_accum.wrapping_add(hh + (lh >> 32) + (hl >> 32) + (mid >> 32));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(u: u64, v: u64) -> (u64, u64) {
        let p = (u as u128) * (v as u128);
        (p as u64, (p >> 64) as u64)
    }

    #[test]
    fn product_matches_u128_reference() {
        let cases = [
            (0u64, 0u64),
            (1, u64::MAX),
            (u64::MAX, u64::MAX),
            (0xAAAA_AAAA_AAAA_AAAA, 0xAAAA_AAAA_AAAA_AAAA),
            (0x243F_6A88_85A3_08D3, 0x4528_21E6_38D0_1377),
            (0xFFFF_FFFF, 0x1_0000_0001),
            (0xDEAD_BEEF_CAFE_F00D, 0x0123_4567_89AB_CDEF),
        ];
        for (u, v) in cases {
            let (want_lo, want_hi) = reference(u, v);
            let mut lo = 0u64;
            let mut hi = 0u64;
            mul128(u, v, &mut lo, &mut hi);
            assert_eq!((lo, hi), (want_lo, want_hi), "u={u:#x} v={v:#x}");
        }
    }

    #[test]
    fn high_half_accumulates() {
        let mut lo = 0u64;
        let mut hi = 100u64;
        mul128(u64::MAX, u64::MAX, &mut lo, &mut hi);
        let (want_lo, want_hi) = reference(u64::MAX, u64::MAX);
        assert_eq!(lo, want_lo);
        assert_eq!(hi, want_hi.wrapping_add(100));
    }

    #[test]
    fn accumulator_wraps() {
        let mut lo = 0u64;
        let mut hi = u64::MAX;
        mul128(u64::MAX, u64::MAX, &mut lo, &mut hi);
        let (_, want_hi) = reference(u64::MAX, u64::MAX);
        assert_eq!(hi, want_hi.wrapping_sub(1));
    }

    #[test]
    fn randomized_against_reference() {
        // Deterministic LCG sweep; exercises carry propagation paths.
        let mut s = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..10_000 {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let u = s;
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let v = s;
            let (want_lo, want_hi) = reference(u, v);
            let mut lo = 0u64;
            let mut hi = 0u64;
            mul128(u, v, &mut lo, &mut hi);
            assert_eq!((lo, hi), (want_lo, want_hi));
        }
    }
}
