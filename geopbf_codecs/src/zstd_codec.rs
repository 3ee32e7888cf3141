use geopbf_core::format::FIELD_ZSTD;
use geopbf_core::{BlobError, Codec};

/// Zstandard codec.
///
/// Best general-purpose ratio of the bundled codecs for mixed
/// structured content.
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn field(&self) -> u32 {
        FIELD_ZSTD
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, BlobError> {
        zstd::bulk::compress(raw, self.level).map_err(|e| BlobError::Compression(e.to_string()))
    }

    fn decompress(&self, data: &[u8], raw_size: usize) -> Result<Vec<u8>, BlobError> {
        // bulk::decompress treats raw_size as a hard output capacity, so
        // an overlong stream errors in the backend without growing the
        // buffer past the declared size.
        zstd::bulk::decompress(data, raw_size).map_err(|e| BlobError::Decompression(e.to_string()))
    }
}
