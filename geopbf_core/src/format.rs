/// Wire field number for verbatim (uncompressed) blob content.
pub const FIELD_RAW: u32 = 1;

/// Wire field number for the declared uncompressed content length.
/// Mandatory whenever a compressed content field is present; int32 on
/// the wire.
pub const FIELD_RAW_SIZE: u32 = 2;

/// Wire field number for zlib/DEFLATE-compressed content.
pub const FIELD_ZLIB: u32 = 3;

/// Wire field number for lz4 block-compressed content.
pub const FIELD_LZ4: u32 = 6;

/// Wire field number for zstd-compressed content.
pub const FIELD_ZSTD: u32 = 7;

/// Largest serialized blob the decoder accepts, before decompression:
/// 16 MiB (format convention for this file type).
pub const MAX_BLOB_LEN: usize = 16 * 1024 * 1024;

/// Largest declared uncompressed content size the decoder accepts:
/// 32 MiB. Anything above is rejected before the payload is touched,
/// so a hostile blob cannot force an over-allocation through a lying
/// `raw_size`.
pub const MAX_RAW_SIZE: u32 = 32 * 1024 * 1024;

/// Decode-side safety bounds, supplied by the caller that frames
/// individual blobs within a file.
///
/// The defaults are the format-level conventions ([`MAX_BLOB_LEN`],
/// [`MAX_RAW_SIZE`]); a file-level collaborator that knows a tighter
/// declared length for a specific blob should pass it in here.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Largest serialized blob the decoder will parse.
    pub max_blob_len: usize,
    /// Largest declared uncompressed size the decoder will accept.
    pub max_raw_size: u32,
    /// Require that a raw blob carrying the optional `raw_size` field
    /// declares the content length correctly. Off by default: known
    /// producers leave the field unset or stale for uncompressed blobs.
    pub strict_raw_size: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_blob_len: MAX_BLOB_LEN,
            max_raw_size: MAX_RAW_SIZE,
            strict_raw_size: false,
        }
    }
}
