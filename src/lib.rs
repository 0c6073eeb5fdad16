//! Okomi: the KOMIHASH 64-bit non-cryptographic hash and the KOMIRAND
//! pseudo-random generator in Rust.
//!
//! The crate provides:
//! - The one-shot hash ([`komihash`])
//! - A streamed, incrementally-updatable context ([`KomihashStream`])
//! - The KOMIRAND generator ([`komirand`], [`Komirand`])
//! - `std::hash::Hasher` adapters for `HashMap` use (`hasher`)
//! - File-oriented helpers (`io`, feature `file-io`)
//! - An optional CLI (`cli` feature)
//!
//! Digests are bit-identical across platforms for a given (message, seed)
//! pair, and the streamed context produces the one-shot digest for every
//! chunking of the same bytes. The hash is not cryptographically secure.
//!
//! # Quick Start
//!
//! ```
//! use okomi::{KomihashStream, komihash};
//!
//! let digest = komihash(b"A 16-byte string", 0);
//! assert_eq!(digest, 0x467caa28ea3da7a6);
//!
//! let mut st = KomihashStream::<768>::new(0);
//! st.update(b"A 16-byte");
//! st.update(b" string");
//! assert_eq!(st.finalize(), digest);
//! ```

pub mod hash;
pub mod hasher;
pub mod rand;

#[cfg(feature = "file-io")]
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use hash::oneshot::komihash;
pub use hash::stream::KomihashStream;
pub use hasher::{KomihashBuildHasher, KomihashHasher};
pub use rand::{Komirand, komirand};
