// Incremental (streamed) komihash.
//
// The context buffers input until at least 128 contiguous bytes are
// available, then switches lazily into the eight-lane bulk loop. Draining
// always leaves at least a full 64-byte block buffered, so the finalizer's
// epilogue windows are guaranteed to fall inside the buffer. The finalizer
// never touches stored state, which makes intermediate digests free.

use crate::hash::oneshot::{Lanes, epilogue, komihash};

/// Streamed komihash context.
///
/// `B` is the internal buffer size: a compile-time constant, multiple of 64
/// and at least 128 bytes. It affects only where the buffering/bulk boundary
/// falls; digests are identical for every valid `B`.
///
/// A context is a plain value owned by its caller. `update` takes `&mut
/// self` and `finalize` takes `&self`, so repeated finalization and
/// update-after-finalize resume come for free:
///
/// ```
/// use okomi::KomihashStream;
///
/// let mut st = KomihashStream::<768>::new(0);
/// st.update(b"This is a 32-byte ");
/// st.update(b"testing string");
/// assert_eq!(st.finalize(), okomi::komihash(b"This is a 32-byte testing string", 0));
/// ```
#[derive(Clone)]
pub struct KomihashStream<const B: usize = 768> {
    buf: [u8; B],
    seed: [u64; 8],
    buf_fill: usize,
    is_hashing: bool,
}

impl<const B: usize> KomihashStream<B> {
    /// Create a fresh context for the given seed.
    pub fn new(seed: u64) -> Self {
        const {
            assert!(
                B >= 128 && B % 64 == 0,
                "stream buffer size must be a multiple of 64, at least 128"
            );
        }
        let mut ctx = Self {
            buf: [0; B],
            seed: [0; 8],
            buf_fill: 0,
            is_hashing: false,
        };
        ctx.seed[0] = seed;
        ctx
    }

    /// Discard all buffered input and state, restarting with `seed`.
    pub fn reset(&mut self, seed: u64) {
        self.seed = [0; 8];
        self.seed[0] = seed;
        self.buf_fill = 0;
        self.is_hashing = false;
    }

    /// Hash an entire message through a throwaway context.
    ///
    /// Equal to [`komihash`](crate::komihash) for every input; useful as an
    /// equivalence check and for callers already generic over the context.
    pub fn oneshot(msg: &[u8], seed: u64) -> u64 {
        let mut ctx = Self::new(seed);
        ctx.update(msg);
        ctx.finalize()
    }

    /// Load the eight lanes, initializing them from the stored seed on the
    /// first bulk entry.
    fn begin_or_resume(&mut self) -> Lanes {
        if self.is_hashing {
            Lanes::from_words(&self.seed)
        } else {
            self.is_hashing = true;
            Lanes::begin(self.seed[0])
        }
    }

    /// Append `msg` to the hashed stream.
    pub fn update(&mut self, msg: &[u8]) {
        let mut msg = msg;

        // A partially filled buffer that the new input tops up is drained
        // through the bulk loop first, preserving stream order.
        if self.buf_fill != 0 && self.buf_fill + msg.len() >= B {
            let take = B - self.buf_fill;
            self.buf[self.buf_fill..].copy_from_slice(&msg[..take]);
            msg = &msg[take..];

            let mut lanes = self.begin_or_resume();
            let pos = lanes.absorb(&self.buf, 0, 127);
            debug_assert_eq!(pos, B - 64);
            if msg.len() > 63 {
                // Enough input follows: absorb the leftover block in place
                // instead of parking it in the buffer.
                let end = lanes.absorb(&self.buf, pos, 63);
                debug_assert_eq!(end, B);
                self.buf_fill = 0;
            } else {
                self.buf.copy_within(B - 64.., 0);
                self.buf_fill = 64;
            }
            self.seed = lanes.to_words();
        }

        // Bulk-process caller memory directly. The loop stops once 128 or
        // fewer bytes remain, keeping a 64..=127 byte tail for the buffer so
        // the finalizer always sees at least one full block.
        if self.buf_fill == 0 && msg.len() > 127 {
            let mut lanes = self.begin_or_resume();
            let pos = lanes.absorb(msg, 0, 127);
            msg = &msg[pos..];
            self.seed = lanes.to_words();
        }

        self.buf[self.buf_fill..self.buf_fill + msg.len()].copy_from_slice(msg);
        self.buf_fill += msg.len();
    }

    /// Compute the digest of everything fed so far.
    ///
    /// Does not consume or alter the context: calling `finalize` twice
    /// returns the same value, and further `update` calls continue the
    /// stream as if no digest had been taken.
    pub fn finalize(&self) -> u64 {
        if !self.is_hashing {
            // Nothing was ever bulk-processed; the whole message sits in
            // the buffer and the original seed is still in slot 0.
            return komihash(&self.buf[..self.buf_fill], self.seed[0]);
        }
        let msg = &self.buf[..self.buf_fill];
        let mut lanes = Lanes::from_words(&self.seed);
        let mut pos = 0;
        if msg.len() > 63 {
            pos = lanes.absorb(msg, 0, 63);
        }
        let (s1, s5) = lanes.fold();
        epilogue(msg, pos, s1, s5)
    }
}

impl<const B: usize> Default for KomihashStream<B> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<const B: usize> std::fmt::Debug for KomihashStream<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KomihashStream")
            .field("buf_size", &B)
            .field("buf_fill", &self.buf_fill)
            .field("is_hashing", &self.is_hashing)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(n: usize) -> Vec<u8> {
        (0..n).map(|i| (i % 256) as u8).collect()
    }

    fn stream_chunked<const B: usize>(msg: &[u8], seed: u64, chunk: usize) -> u64 {
        let mut ctx = KomihashStream::<B>::new(seed);
        for piece in msg.chunks(chunk.max(1)) {
            ctx.update(piece);
        }
        ctx.finalize()
    }

    #[test]
    fn oneshot_equivalence() {
        for n in [0usize, 1, 7, 8, 15, 16, 31, 32, 63, 64, 127, 128, 129, 767, 768, 769, 3000] {
            let msg = pattern(n);
            assert_eq!(
                KomihashStream::<768>::oneshot(&msg, 5),
                komihash(&msg, 5),
                "n = {n}"
            );
        }
    }

    #[test]
    fn chunking_is_invisible() {
        let msg = pattern(3000);
        let want = komihash(&msg, 0x42);
        for chunk in [1usize, 2, 7, 63, 64, 65, 127, 128, 500, 767, 768, 769] {
            assert_eq!(stream_chunked::<768>(&msg, 0x42, chunk), want, "chunk = {chunk}");
        }
    }

    #[test]
    fn buffer_size_is_invisible() {
        let msg = pattern(5000);
        let want = komihash(&msg, 9);
        for chunk in [1usize, 130, 1000] {
            assert_eq!(stream_chunked::<128>(&msg, 9, chunk), want);
            assert_eq!(stream_chunked::<192>(&msg, 9, chunk), want);
            assert_eq!(stream_chunked::<1024>(&msg, 9, chunk), want);
        }
    }

    #[test]
    fn finalize_is_repeatable() {
        let mut ctx = KomihashStream::<768>::new(1);
        ctx.update(&pattern(1000));
        let first = ctx.finalize();
        assert_eq!(ctx.finalize(), first);
        assert_eq!(ctx.finalize(), first);
    }

    #[test]
    fn update_after_finalize_resumes() {
        let msg = pattern(2000);
        let mut ctx = KomihashStream::<768>::new(3);
        ctx.update(&msg[..700]);
        let intermediate = ctx.finalize();
        assert_eq!(intermediate, komihash(&msg[..700], 3));
        ctx.update(&msg[700..]);
        assert_eq!(ctx.finalize(), komihash(&msg, 3));
    }

    #[test]
    fn empty_stream_matches_empty_oneshot() {
        for seed in [0u64, 1, u64::MAX] {
            let ctx = KomihashStream::<768>::new(seed);
            assert_eq!(ctx.finalize(), komihash(b"", seed), "seed = {seed}");
        }
    }

    #[test]
    fn zero_length_updates_are_noops() {
        let msg = pattern(300);
        let mut ctx = KomihashStream::<768>::new(0);
        ctx.update(b"");
        ctx.update(&msg);
        ctx.update(b"");
        assert_eq!(ctx.finalize(), komihash(&msg, 0));
    }

    #[test]
    fn reset_restarts_the_stream() {
        let mut ctx = KomihashStream::<768>::new(1);
        ctx.update(&pattern(1000));
        ctx.reset(2);
        ctx.update(b"fresh");
        assert_eq!(ctx.finalize(), komihash(b"fresh", 2));
    }

    #[test]
    fn buffered_tail_stays_at_least_one_block() {
        // Once bulk processing has begun, the context keeps >= 64 bytes
        // buffered so the finalizer windows are always in bounds.
        let mut ctx = KomihashStream::<128>::new(0);
        ctx.update(&pattern(129));
        assert!(ctx.is_hashing);
        assert!(ctx.buf_fill >= 64);
        for n in [1usize, 63, 64, 127, 128, 129, 500] {
            ctx.update(&pattern(n));
            assert!(ctx.buf_fill >= 64, "n = {n}");
        }
    }
}
