use okomi::{KomihashStream, komihash, komirand};

#[derive(Debug)]
struct Vector {
    name: String,
    seed: u64,
    len: usize,
    expected: u64,
}

fn load_vectors() -> Vec<Vector> {
    let manifest = include_str!("vectors/manifest.tsv");
    manifest
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| {
            let parts: Vec<_> = line.split('|').collect();
            assert_eq!(parts.len(), 4, "invalid vector row: {line}");
            Vector {
                name: parts[0].to_string(),
                seed: u64::from_str_radix(parts[1], 16).unwrap(),
                len: parts[2].parse().unwrap(),
                expected: u64::from_str_radix(parts[3], 16).unwrap(),
            }
        })
        .collect()
}

fn incrementing(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

#[test]
fn vector_database_is_non_empty() {
    let vectors = load_vectors();
    assert!(vectors.len() > 400);
}

#[test]
fn oneshot_matches_all_vectors() {
    for v in load_vectors() {
        let msg = incrementing(v.len);
        assert_eq!(komihash(&msg, v.seed), v.expected, "vector {}", v.name);
    }
}

#[test]
fn stream_matches_all_vectors() {
    for v in load_vectors() {
        let msg = incrementing(v.len);
        assert_eq!(
            KomihashStream::<768>::oneshot(&msg, v.seed),
            v.expected,
            "vector {}",
            v.name
        );
    }
}

#[test]
fn stream_single_byte_updates_match_small_vectors() {
    for v in load_vectors().iter().filter(|v| v.len <= 300) {
        let msg = incrementing(v.len);
        let mut ctx = KomihashStream::<768>::new(v.seed);
        for b in &msg {
            ctx.update(std::slice::from_ref(b));
        }
        assert_eq!(ctx.finalize(), v.expected, "vector {}", v.name);
    }
}

#[test]
fn published_string_vectors() {
    let cases: [(u64, &[u8], u64); 5] = [
        (0x0, b"This is a 32-byte testing string", 0x05ad960802903a9d),
        (0x0, b"The cat is out of the bag", 0xd15723521d3c37b1),
        (0x0, b"A 16-byte string", 0x467caa28ea3da7a6),
        (0x0, b"7 chars", 0x2c514f6e5dcb11cb),
        (
            0x0123456789ABCDEF,
            b"This is a 32-byte testing string",
            0x6ce66a2e8d4979a5,
        ),
    ];
    for (seed, msg, want) in &cases {
        assert_eq!(komihash(msg, *seed), *want);
        assert_eq!(KomihashStream::<768>::oneshot(msg, *seed), *want);
    }

    let inc256 = incrementing(256);
    assert_eq!(komihash(&inc256, 0x0), 0x94c3dbdca59ddf57);

    let inc56 = incrementing(0x38);
    assert_eq!(komihash(&inc56, 0x100), 0xbea291b225ff384d);
}

#[test]
fn komirand_published_sequence() {
    let want = [
        0xaaaaaaaaaaaaaaaa_u64,
        0xfffffffffffffffe,
        0x4924924924924910,
        0xbaebaebaebaeba00,
        0x400c62cc4727496b,
        0x35a969173e8f925b,
        0xdb47f6bae9a247ad,
        0x98e0f6cece6711fe,
    ];
    let (mut s1, mut s2) = (0u64, 0u64);
    for (i, w) in want.iter().enumerate() {
        assert_eq!(komirand(&mut s1, &mut s2), *w, "sample {i}");
    }
}
