#![no_main]
use libfuzzer_sys::fuzz_target;
use okomi::{KomihashStream, komihash};

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    // First 8 bytes seed the hash; the ninth drives the chunking pattern.
    let seed = u64::from_le_bytes(data[..8].try_into().unwrap());
    let stride = data[8] as usize;
    let payload = &data[9..];

    let want = komihash(payload, seed);

    // Feed the same payload in chunks of varying size; every partition must
    // produce the one-shot digest.
    let mut ctx = KomihashStream::<768>::new(seed);
    let mut small = KomihashStream::<128>::new(seed);
    let mut pos = 0;
    let mut step = stride;
    while pos < payload.len() {
        let k = (step % 97 + 1).min(payload.len() - pos);
        ctx.update(&payload[pos..pos + k]);
        small.update(&payload[pos..pos + k]);
        pos += k;
        step = step.wrapping_add(stride | 1);
    }

    assert_eq!(ctx.finalize(), want);
    assert_eq!(small.finalize(), want);

    // Finalize must be repeatable.
    assert_eq!(ctx.finalize(), want);
});
