#![no_main]
use libfuzzer_sys::fuzz_target;
use okomi::{KomihashStream, komihash};
use std::hash::Hasher;

fuzz_target!(|data: &[u8]| {
    // The hash is total: any byte span and any seed must digest without
    // panicking, and all three surfaces must agree.
    let seed = if data.len() >= 8 {
        u64::from_le_bytes(data[..8].try_into().unwrap())
    } else {
        0
    };

    let a = komihash(data, seed);
    let b = KomihashStream::<768>::oneshot(data, seed);
    assert_eq!(a, b);

    let mut h = okomi::KomihashHasher::with_seed(seed);
    h.write(data);
    assert_eq!(h.finish(), a);

    // Prefix digests must all be defined as well.
    if !data.is_empty() {
        let _ = komihash(&data[..data.len() / 2], seed);
    }
});
