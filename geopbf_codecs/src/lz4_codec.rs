use lz4_flex::block::{compress, decompress_into};

use geopbf_core::format::FIELD_LZ4;
use geopbf_core::{BlobError, Codec};

/// lz4 block codec.
///
/// Fastest decompression of the bundled codecs; the usual choice when
/// decode latency matters more than size reduction. The uncompressed
/// length travels in the blob's `raw_size` field, so the plain block
/// forms are used here rather than lz4's size-prepended helpers.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn field(&self) -> u32 {
        FIELD_LZ4
    }

    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, BlobError> {
        Ok(compress(raw))
    }

    fn decompress(&self, data: &[u8], raw_size: usize) -> Result<Vec<u8>, BlobError> {
        // Decode into a buffer pre-sized to raw_size; a stream that
        // needs more room fails inside the backend instead of growing.
        let mut content = vec![0u8; raw_size];
        let written = decompress_into(data, &mut content)
            .map_err(|e| BlobError::Decompression(e.to_string()))?;
        content.truncate(written);
        Ok(content)
    }
}
