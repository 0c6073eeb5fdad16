// `std::hash::Hasher` adapters so komihash can back a HashMap.
//
// The adapter streams every `write` through a minimum-size incremental
// context, so multi-write sequences hash exactly the byte concatenation.
// Integer writes go through `Hasher`'s default native-endian byte encoding;
// that is fine for table use but is not the portable digest. Use
// `komihash`/`KomihashStream` directly when bit-stable output matters.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hasher};

use crate::hash::stream::KomihashStream;

/// `HashMap` keyed with komihash.
pub type KomiHashMap<K, V> = HashMap<K, V, KomihashBuildHasher>;

/// `HashSet` keyed with komihash.
pub type KomiHashSet<T> = HashSet<T, KomihashBuildHasher>;

/// Streaming [`Hasher`] over komihash.
///
/// Uses the smallest valid context buffer; short keys never leave the
/// buffered path, so table lookups stay cheap.
#[derive(Clone, Debug)]
pub struct KomihashHasher {
    ctx: KomihashStream<128>,
}

impl KomihashHasher {
    /// Hasher with seed 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Hasher with an explicit seed, e.g. for per-table randomization.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ctx: KomihashStream::new(seed),
        }
    }
}

impl Default for KomihashHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for KomihashHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.ctx.update(bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.ctx.finalize()
    }
}

/// An implementation of [`BuildHasher`] that produces [`KomihashHasher`]s.
///
/// The default builder uses seed 0; [`with_seed`](Self::with_seed) gives
/// every table its own keyed hasher family.
#[derive(Clone, Copy, Debug, Default)]
pub struct KomihashBuildHasher {
    seed: u64,
}

impl KomihashBuildHasher {
    /// Builder producing hashers keyed with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl BuildHasher for KomihashBuildHasher {
    type Hasher = KomihashHasher;

    fn build_hasher(&self) -> KomihashHasher {
        KomihashHasher::with_seed(self.seed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
