// komihash core.
//
// This module provides:
// - Little-endian loaders and padded tail loaders (load)
// - The 64x64 -> 128 multiply primitive with a 32-bit fallback (mul)
// - The one-shot hash: rounds, bulk loop, epilogue (oneshot)
// - The incremental streaming context (stream)

pub(crate) mod load;
pub(crate) mod mul;
pub mod oneshot;
pub mod stream;

pub use oneshot::komihash;
pub use stream::KomihashStream;
