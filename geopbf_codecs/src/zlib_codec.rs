use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use geopbf_core::format::FIELD_ZLIB;
use geopbf_core::{BlobError, Codec};

/// DEFLATE/zlib codec, the baseline compression every reader of the
/// format supports.
///
/// Levels follow flate2: 0 = store, 1 = fastest, 9 = smallest
/// (default: 6).
pub struct ZlibCodec {
    pub level: u32,
}

impl Default for ZlibCodec {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl ZlibCodec {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for ZlibCodec {
    fn field(&self) -> u32 {
        FIELD_ZLIB
    }

    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, BlobError> {
        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::new(self.level));
        encoder
            .write_all(raw)
            .map_err(|e| BlobError::Compression(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| BlobError::Compression(e.to_string()))
    }

    fn decompress(&self, data: &[u8], raw_size: usize) -> Result<Vec<u8>, BlobError> {
        // The stream carries no trustworthy length of its own, so the
        // read is capped at raw_size + 1: an overlong stream surfaces as
        // a length mismatch without ever allocating past the declared
        // size.
        let mut content = Vec::with_capacity(raw_size);
        let mut decoder = ZlibDecoder::new(data).take(raw_size as u64 + 1);
        decoder
            .read_to_end(&mut content)
            .map_err(|e| BlobError::Decompression(e.to_string()))?;
        Ok(content)
    }
}
