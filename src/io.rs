// File-level hashing helpers.
//
// Wraps the streaming context with buffered reads so whole files and
// arbitrary readers can be digested without loading them into memory.
// Feature-gated behind `file-io`.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::hash::stream::KomihashStream;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Result of hashing a file or reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashStats {
    /// Number of bytes digested.
    pub bytes: u64,
    /// The 64-bit komihash digest.
    pub hash: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file hashing operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// The input file could not be opened.
    #[error("{path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// A read from the input failed mid-stream.
    #[error("read error: {0}")]
    Read(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Reader hashing
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Digest everything `reader` yields, streaming in 64 KiB windows.
pub fn hash_reader<R: Read>(mut reader: R, seed: u64) -> Result<HashStats, IoError> {
    let mut ctx = KomihashStream::<768>::new(seed);
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        total += n as u64;
        ctx.update(&buf[..n]);
    }
    Ok(HashStats {
        bytes: total,
        hash: ctx.finalize(),
    })
}

/// Digest a file by path.
pub fn hash_file(path: &Path, seed: u64) -> Result<HashStats, IoError> {
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = hash_reader(BufReader::with_capacity(BUF_SIZE, file), seed)?;
    log::debug!(
        "hashed {}: {} bytes -> {:016x}",
        path.display(),
        stats.bytes,
        stats.hash
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
