//! End-to-end blob codec tests: lossless round-trips for every codec,
//! rejection of structurally invalid wire bytes, and enforcement of the
//! size bounds that make the format safe to parse from untrusted input.

use geopbf_codecs::{decode_blob, encode_blob, Compression, Lz4Codec, ZlibCodec, ZstdCodec};
use geopbf_core::format::{FIELD_LZ4, FIELD_RAW, FIELD_RAW_SIZE, FIELD_ZLIB, FIELD_ZSTD};
use geopbf_core::wire::{put_key, put_len_field, put_varint_field, WIRE_VARINT};
use geopbf_core::{Blob, BlobError, Codec, Limits};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"node 42 at 52.5200 13.4050 tagged highway=primary ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

// ── round-trips ────────────────────────────────────────────────────────────

#[test]
fn raw_blob_wire_layout_and_roundtrip() {
    let encoded = encode_blob(b"hello world", Compression::None).unwrap();

    // Field 1, length-delimited: key 0x0a, length 11, then the bytes.
    let mut expected = vec![0x0a, 0x0b];
    expected.extend_from_slice(b"hello world");
    assert_eq!(encoded, expected);

    match Blob::decode(&encoded, &Limits::default()).unwrap() {
        Blob::Raw(content) => assert_eq!(content, b"hello world"),
        blob => panic!("expected raw blob, got {:?}", blob),
    }
    assert_eq!(decode_blob(&encoded, &Limits::default()).unwrap(), b"hello world");
}

#[test]
fn zlib_blob_declares_raw_size_and_roundtrips() {
    let content = vec![0x41u8; 1024 * 1024];
    let encoded = encode_blob(&content, Compression::Zlib(6)).unwrap();

    match Blob::decode(&encoded, &Limits::default()).unwrap() {
        Blob::Compressed {
            codec,
            data,
            raw_size,
        } => {
            assert_eq!(codec, FIELD_ZLIB);
            assert_eq!(raw_size, 1_048_576);
            assert!(
                data.len() < content.len() / 100,
                "repeated bytes should compress substantially: {} bytes",
                data.len()
            );
        }
        blob => panic!("expected compressed blob, got {:?}", blob),
    }

    assert_eq!(decode_blob(&encoded, &Limits::default()).unwrap(), content);
}

#[test]
fn lz4_roundtrip() {
    let content = compressible_bytes(200_000);
    let encoded = encode_blob(&content, Compression::Lz4).unwrap();
    match Blob::decode(&encoded, &Limits::default()).unwrap() {
        Blob::Compressed { codec, .. } => assert_eq!(codec, FIELD_LZ4),
        blob => panic!("expected compressed blob, got {:?}", blob),
    }
    assert_eq!(decode_blob(&encoded, &Limits::default()).unwrap(), content);
}

#[test]
fn zstd_roundtrip() {
    let content = pseudo_random_bytes(100_000, 0xDEAD_BEEF);
    let encoded = encode_blob(&content, Compression::Zstd(3)).unwrap();
    match Blob::decode(&encoded, &Limits::default()).unwrap() {
        Blob::Compressed { codec, .. } => assert_eq!(codec, FIELD_ZSTD),
        blob => panic!("expected compressed blob, got {:?}", blob),
    }
    assert_eq!(decode_blob(&encoded, &Limits::default()).unwrap(), content);
}

#[test]
fn empty_content_roundtrips() {
    for compression in [
        Compression::None,
        Compression::Zlib(6),
        Compression::Lz4,
        Compression::Zstd(3),
    ] {
        let encoded = encode_blob(b"", compression).unwrap();
        assert_eq!(decode_blob(&encoded, &Limits::default()).unwrap(), b"");
    }
}

#[test]
fn encode_is_deterministic() {
    let content = compressible_bytes(50_000);
    for compression in [
        Compression::None,
        Compression::Zlib(6),
        Compression::Lz4,
        Compression::Zstd(3),
    ] {
        let first = encode_blob(&content, compression).unwrap();
        let second = encode_blob(&content, compression).unwrap();
        assert_eq!(first, second, "{:?} encode should be byte-identical", compression);
    }
}

// ── structural validation ──────────────────────────────────────────────────

#[test]
fn both_content_fields_rejected() {
    let data = ZlibCodec::default().compress(b"payload").unwrap();
    let mut buf = Vec::new();
    put_len_field(&mut buf, FIELD_RAW, b"payload");
    put_varint_field(&mut buf, FIELD_RAW_SIZE, 7);
    put_len_field(&mut buf, FIELD_ZLIB, &data);

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("more than one content field"))
    ));
}

#[test]
fn duplicate_content_field_rejected() {
    let mut buf = Vec::new();
    put_len_field(&mut buf, FIELD_RAW, b"first");
    put_len_field(&mut buf, FIELD_RAW, b"second");

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("more than one content field"))
    ));
}

#[test]
fn missing_content_field_rejected() {
    let mut buf = Vec::new();
    put_varint_field(&mut buf, FIELD_RAW_SIZE, 128);

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("no content field"))
    ));
    assert!(matches!(
        Blob::decode(&[], &Limits::default()),
        Err(BlobError::Malformed("no content field"))
    ));
}

#[test]
fn compressed_without_raw_size_rejected() {
    let data = ZlibCodec::default().compress(b"payload").unwrap();
    let mut buf = Vec::new();
    put_len_field(&mut buf, FIELD_ZLIB, &data);

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("compressed content without raw_size"))
    ));
}

#[test]
fn negative_raw_size_rejected() {
    // int32 -1 arrives as a ten-byte two's-complement varint.
    let data = ZlibCodec::default().compress(b"payload").unwrap();
    let mut buf = Vec::new();
    put_key(&mut buf, FIELD_RAW_SIZE, WIRE_VARINT);
    buf.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
    put_len_field(&mut buf, FIELD_ZLIB, &data);

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("raw_size is negative or exceeds int32"))
    ));
}

#[test]
fn truncated_content_field_rejected() {
    // Declares 11 payload bytes but carries 2.
    let buf = [0x0a, 0x0b, b'h', b'i'];
    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed(_))
    ));
}

#[test]
fn content_field_with_wrong_wire_type_rejected() {
    let mut buf = Vec::new();
    put_varint_field(&mut buf, FIELD_RAW, 42);

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::Malformed("content field is not length-delimited"))
    ));
}

#[test]
fn unknown_fields_are_skipped() {
    let mut buf = Vec::new();
    // An lzma payload (field 4) is not a supported content field here.
    put_len_field(&mut buf, 4, b"\x00\x01\x02");
    put_varint_field(&mut buf, 200, 7);
    put_len_field(&mut buf, FIELD_RAW, b"still fine");

    assert_eq!(
        decode_blob(&buf, &Limits::default()).unwrap(),
        b"still fine"
    );
}

// ── size bounds ────────────────────────────────────────────────────────────

#[test]
fn oversized_declared_raw_size_rejected_before_decompression() {
    // The payload is not valid zlib; if decompression were attempted it
    // would fail with a backend error, so SizeExceeded proves the bound
    // check ran first.
    let mut buf = Vec::new();
    put_varint_field(&mut buf, FIELD_RAW_SIZE, 33 * 1024 * 1024);
    put_len_field(&mut buf, FIELD_ZLIB, b"not a zlib stream");

    assert!(matches!(
        Blob::decode(&buf, &Limits::default()),
        Err(BlobError::SizeExceeded { size, max })
            if size == 33 * 1024 * 1024 && max == 32 * 1024 * 1024
    ));
}

#[test]
fn oversized_serialized_blob_rejected() {
    let content = compressible_bytes(100);
    let encoded = encode_blob(&content, Compression::None).unwrap();

    let limits = Limits {
        max_blob_len: 64,
        ..Limits::default()
    };
    assert!(matches!(
        Blob::decode(&encoded, &limits),
        Err(BlobError::SizeExceeded { .. })
    ));
}

#[test]
fn raw_size_mismatch_rejected() {
    let content = b"the actual content of this blob";
    let data = ZlibCodec::default().compress(content).unwrap();

    for declared in [content.len() as u64 + 5, content.len() as u64 - 3] {
        let mut buf = Vec::new();
        put_varint_field(&mut buf, FIELD_RAW_SIZE, declared);
        put_len_field(&mut buf, FIELD_ZLIB, &data);

        assert!(
            matches!(
                decode_blob(&buf, &Limits::default()),
                Err(BlobError::Decompression(_))
            ),
            "declared raw_size {} should fail the length check",
            declared
        );
    }
}

#[test]
fn corrupt_compressed_stream_rejected() {
    let content = compressible_bytes(10_000);
    let encoded = encode_blob(&content, Compression::Zlib(6)).unwrap();

    // Flip a byte in the middle of the compressed payload.
    let mut corrupted = encoded.clone();
    let mid = corrupted.len() / 2;
    corrupted[mid] ^= 0xff;

    assert!(decode_blob(&corrupted, &Limits::default()).is_err());
}

// ── raw_size laxity and codec dispatch ─────────────────────────────────────

#[test]
fn stale_raw_size_on_raw_content_is_ignored_by_default() {
    let mut buf = Vec::new();
    put_len_field(&mut buf, FIELD_RAW, b"raw content");
    put_varint_field(&mut buf, FIELD_RAW_SIZE, 9999);

    assert_eq!(
        decode_blob(&buf, &Limits::default()).unwrap(),
        b"raw content"
    );

    let strict = Limits {
        strict_raw_size: true,
        ..Limits::default()
    };
    assert!(matches!(
        Blob::decode(&buf, &strict),
        Err(BlobError::Malformed("raw_size does not match raw content length"))
    ));
}

#[test]
fn accurate_raw_size_on_raw_content_passes_strict_mode() {
    let mut buf = Vec::new();
    put_len_field(&mut buf, FIELD_RAW, b"raw content");
    put_varint_field(&mut buf, FIELD_RAW_SIZE, 11);

    let strict = Limits {
        strict_raw_size: true,
        ..Limits::default()
    };
    assert_eq!(decode_blob(&buf, &strict).unwrap(), b"raw content");
}

#[test]
fn codec_mismatch_rejected() {
    let blob = Blob::compress(b"content", &ZlibCodec::default()).unwrap();
    assert!(matches!(
        blob.into_content(&Lz4Codec),
        Err(BlobError::CodecMismatch { expected, found })
            if expected == FIELD_ZLIB && found == FIELD_LZ4
    ));
}

#[test]
fn oversized_content_refused_at_encode_time() {
    let content = vec![0u8; 32 * 1024 * 1024 + 1];
    assert!(matches!(
        Blob::compress(&content, &ZstdCodec::default()),
        Err(BlobError::SizeExceeded { .. })
    ));
}
