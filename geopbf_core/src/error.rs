use thiserror::Error;

/// Errors returned by the blob codec.
///
/// All variants are terminal for the single encode or decode call that
/// produced them; the file-level caller decides whether a bad blob
/// aborts the whole read or is skipped.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Structural violation: the bytes do not form a well-formed blob
    /// (both or neither content field present, bad wire type, truncated
    /// field, out-of-range `raw_size`).
    #[error("malformed blob: {0}")]
    Malformed(&'static str),

    /// A declared or actual size exceeds the configured maximum.
    #[error("blob size {size} exceeds maximum {max} bytes")]
    SizeExceeded { size: u64, max: u64 },

    /// The compression backend rejected the stream, or the decompressed
    /// length did not match the declared `raw_size`.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Encode-side compression backend failure.
    #[error("compression failed: {0}")]
    Compression(String),

    /// Content extraction was attempted with a codec whose wire field
    /// does not match the blob's compression field.
    #[error("codec mismatch: blob payload uses field {expected} but the supplied codec handles field {found}")]
    CodecMismatch { expected: u32, found: u32 },
}

impl BlobError {
    /// Decompressed output length disagrees with the declared `raw_size`.
    pub fn length_mismatch(declared: u32, actual: usize) -> Self {
        Self::Decompression(format!(
            "decompressed to {actual} bytes but raw_size declares {declared}"
        ))
    }
}
