use crate::error::BlobError;

/// Core compression abstraction.
///
/// Each `Codec` implementation:
/// - Is identified by the stable wire field number its payload is stored
///   under in a serialized blob ([`field`](Codec::field)).
/// - Must bound the output allocation of `decompress` by the declared
///   `raw_size`, so a corrupt or hostile stream can never force an
///   allocation larger than the caller agreed to. The exact-length
///   equality check itself is layered on top by [`decompress_exact`].
/// - Holds no per-call state; one instance may serve concurrent calls.
pub trait Codec: Send + Sync {
    /// Wire field number the compressed payload is stored under.
    fn field(&self) -> u32;

    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Compress `raw` into this codec's payload encoding.
    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, BlobError>;

    /// Decompress `data`, which is declared to expand to `raw_size`
    /// bytes. Output must be capped at `raw_size` during decoding;
    /// backend errors surface as [`BlobError::Decompression`].
    fn decompress(&self, data: &[u8], raw_size: usize) -> Result<Vec<u8>, BlobError>;
}

/// Run `codec` over `data` and require exactly `raw_size` output bytes.
///
/// A shorter or longer result is a [`BlobError::Decompression`], never a
/// silent truncation or pad.
pub fn decompress_exact(
    codec: &dyn Codec,
    data: &[u8],
    raw_size: u32,
) -> Result<Vec<u8>, BlobError> {
    let content = codec.decompress(data, raw_size as usize)?;
    if content.len() != raw_size as usize {
        return Err(BlobError::length_mismatch(raw_size, content.len()));
    }
    Ok(content)
}
