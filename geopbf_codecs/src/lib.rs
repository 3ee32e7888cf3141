mod lz4_codec;
mod zlib_codec;
mod zstd_codec;

pub use lz4_codec::Lz4Codec;
pub use zlib_codec::ZlibCodec;
pub use zstd_codec::ZstdCodec;

use std::sync::Arc;

use geopbf_core::format::{FIELD_LZ4, FIELD_ZLIB, FIELD_ZSTD};
use geopbf_core::{decompress_exact, Blob, BlobError, Codec, Limits};

/// Compression policy for [`encode_blob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Store content verbatim.
    None,
    /// DEFLATE/zlib at the given level (0–9).
    Zlib(u32),
    /// lz4 block compression.
    Lz4,
    /// zstd at the given level (1–22).
    Zstd(i32),
}

impl Default for Compression {
    fn default() -> Self {
        Self::Zlib(6)
    }
}

/// Resolve a codec from the wire field its payload is stored under.
///
/// Called when decoding an existing blob, so content can be recovered
/// without knowing in advance how it was compressed.
pub fn codec_by_field(field: u32) -> Result<Arc<dyn Codec>, BlobError> {
    match field {
        FIELD_ZLIB => Ok(Arc::new(ZlibCodec::default())),
        FIELD_LZ4 => Ok(Arc::new(Lz4Codec)),
        FIELD_ZSTD => Ok(Arc::new(ZstdCodec::default())),
        _ => Err(BlobError::Malformed("unknown compression field")),
    }
}

/// Encode `content` as a serialized blob under the given compression
/// policy.
///
/// With [`Compression::None`] the content is stored verbatim in the
/// `raw` field and no `raw_size` is emitted; otherwise the chosen
/// backend runs and `raw_size` records the original length. Output is
/// deterministic for a given content and policy.
pub fn encode_blob(content: &[u8], compression: Compression) -> Result<Vec<u8>, BlobError> {
    let blob = match compression {
        Compression::None => Blob::Raw(content.to_vec()),
        Compression::Zlib(level) => Blob::compress(content, &ZlibCodec::new(level))?,
        Compression::Lz4 => Blob::compress(content, &Lz4Codec)?,
        Compression::Zstd(level) => Blob::compress(content, &ZstdCodec::new(level))?,
    };
    Ok(blob.encode())
}

/// Decode a serialized blob and recover its content bytes.
///
/// Structural validation and size bounds follow `limits` (see
/// [`Blob::decode`]); compressed payloads are dispatched to the codec
/// matching their wire field and length-checked against the declared
/// `raw_size`.
pub fn decode_blob(buf: &[u8], limits: &Limits) -> Result<Vec<u8>, BlobError> {
    match Blob::decode(buf, limits)? {
        Blob::Raw(content) => Ok(content),
        Blob::Compressed {
            codec,
            data,
            raw_size,
        } => decompress_exact(codec_by_field(codec)?.as_ref(), &data, raw_size),
    }
}
