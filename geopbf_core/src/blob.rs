use crate::codec::{decompress_exact, Codec};
use crate::error::BlobError;
use crate::format::{Limits, FIELD_LZ4, FIELD_RAW, FIELD_RAW_SIZE, FIELD_ZLIB, FIELD_ZSTD, MAX_RAW_SIZE};
use crate::wire::{self, WireReader, WIRE_LEN, WIRE_VARINT};

/// One content block of a GeoPBF file, stored verbatim or compressed.
///
/// The variants mirror the wire format's mutually exclusive content
/// fields, so a `Blob` that exists is structurally well-formed: it
/// cannot carry both payloads or neither. It is a plain value with no
/// identity beyond its contents and exists only as a staging point
/// between raw bytes and the caller's use of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blob {
    /// Content stored with no compression (wire field 1).
    Raw(Vec<u8>),
    /// Compressed content plus its declared uncompressed length.
    Compressed {
        /// Wire field number identifying the compression codec
        /// ([`FIELD_ZLIB`], [`FIELD_LZ4`], or [`FIELD_ZSTD`]).
        codec: u32,
        /// The compressed payload bytes.
        data: Vec<u8>,
        /// Uncompressed content length in bytes (wire field 2).
        raw_size: u32,
    },
}

impl Blob {
    /// Compress `content` with `codec` and stage it as a blob.
    ///
    /// Content above [`MAX_RAW_SIZE`] is refused with
    /// [`BlobError::SizeExceeded`] before the backend runs: the codec
    /// never produces a blob its own decoder must reject.
    pub fn compress(content: &[u8], codec: &dyn Codec) -> Result<Self, BlobError> {
        let raw_size = u32::try_from(content.len())
            .ok()
            .filter(|&n| n <= MAX_RAW_SIZE)
            .ok_or(BlobError::SizeExceeded {
                size: content.len() as u64,
                max: u64::from(MAX_RAW_SIZE),
            })?;
        let data = codec.compress(content)?;
        Ok(Self::Compressed {
            codec: codec.field(),
            data,
            raw_size,
        })
    }

    /// Wire field number of the compression codec, `None` for raw content.
    pub fn compression(&self) -> Option<u32> {
        match self {
            Self::Raw(_) => None,
            Self::Compressed { codec, .. } => Some(*codec),
        }
    }

    /// Uncompressed content length in bytes. For compressed blobs this
    /// is the declared `raw_size`, not yet verified against the stream.
    pub fn raw_size(&self) -> usize {
        match self {
            Self::Raw(content) => content.len(),
            Self::Compressed { raw_size, .. } => *raw_size as usize,
        }
    }

    /// Length in bytes of the stored payload (compressed or verbatim).
    pub fn payload_len(&self) -> usize {
        match self {
            Self::Raw(content) => content.len(),
            Self::Compressed { data, .. } => data.len(),
        }
    }

    /// Serialize to the tagged wire layout.
    ///
    /// Raw blobs emit only field 1. Compressed blobs emit `raw_size`
    /// (field 2) followed by the payload field. Output is deterministic
    /// for a given blob value.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Raw(content) => {
                let mut buf = Vec::with_capacity(content.len() + 8);
                wire::put_len_field(&mut buf, FIELD_RAW, content);
                buf
            }
            Self::Compressed {
                codec,
                data,
                raw_size,
            } => {
                let mut buf = Vec::with_capacity(data.len() + 16);
                wire::put_varint_field(&mut buf, FIELD_RAW_SIZE, u64::from(*raw_size));
                wire::put_len_field(&mut buf, *codec, data);
                buf
            }
        }
    }

    /// Parse and validate a serialized blob.
    ///
    /// Every bound in `limits` is enforced before any allocation is
    /// sized from untrusted input: the serialized length against
    /// `max_blob_len`, the declared `raw_size` against `max_raw_size`.
    /// Exactly one content field must be present; a second one, even of
    /// the same kind, is rejected rather than resolved last-wins.
    /// Unknown fields are skipped. Decompression is deferred to
    /// [`Blob::into_content`].
    ///
    /// A `raw_size` accompanying raw content is parsed and ignored
    /// unless `limits.strict_raw_size` is set, in which case it must
    /// match the content length exactly.
    pub fn decode(buf: &[u8], limits: &Limits) -> Result<Self, BlobError> {
        if buf.len() > limits.max_blob_len {
            return Err(BlobError::SizeExceeded {
                size: buf.len() as u64,
                max: limits.max_blob_len as u64,
            });
        }

        let mut content: Option<(u32, &[u8])> = None;
        let mut raw_size: Option<u64> = None;

        let mut reader = WireReader::new(buf);
        while !reader.is_empty() {
            let (field, wire_type) = reader.key()?;
            match field {
                FIELD_RAW | FIELD_ZLIB | FIELD_LZ4 | FIELD_ZSTD => {
                    if wire_type != WIRE_LEN {
                        return Err(BlobError::Malformed(
                            "content field is not length-delimited",
                        ));
                    }
                    let bytes = reader.bytes()?;
                    if content.is_some() {
                        return Err(BlobError::Malformed("more than one content field"));
                    }
                    content = Some((field, bytes));
                }
                FIELD_RAW_SIZE => {
                    if wire_type != WIRE_VARINT {
                        return Err(BlobError::Malformed("raw_size is not a varint"));
                    }
                    let value = reader.varint()?;
                    if value > i32::MAX as u64 {
                        return Err(BlobError::Malformed(
                            "raw_size is negative or exceeds int32",
                        ));
                    }
                    raw_size = Some(value);
                }
                _ => reader.skip(wire_type)?,
            }
        }

        let (field, bytes) = content.ok_or(BlobError::Malformed("no content field"))?;

        if field == FIELD_RAW {
            if let Some(declared) = raw_size {
                if limits.strict_raw_size && declared != bytes.len() as u64 {
                    return Err(BlobError::Malformed(
                        "raw_size does not match raw content length",
                    ));
                }
            }
            return Ok(Self::Raw(bytes.to_vec()));
        }

        let declared =
            raw_size.ok_or(BlobError::Malformed("compressed content without raw_size"))?;
        if declared > u64::from(limits.max_raw_size) {
            return Err(BlobError::SizeExceeded {
                size: declared,
                max: u64::from(limits.max_raw_size),
            });
        }

        Ok(Self::Compressed {
            codec: field,
            data: bytes.to_vec(),
            raw_size: declared as u32,
        })
    }

    /// Consume the blob and recover the original content bytes.
    ///
    /// Raw content is returned as-is without consulting `codec`. For
    /// compressed content the codec's wire field must match the blob's;
    /// the payload is then decompressed with the output capped at the
    /// declared `raw_size` and checked for an exact length match.
    pub fn into_content(self, codec: &dyn Codec) -> Result<Vec<u8>, BlobError> {
        match self {
            Self::Raw(content) => Ok(content),
            Self::Compressed {
                codec: field,
                data,
                raw_size,
            } => {
                if codec.field() != field {
                    return Err(BlobError::CodecMismatch {
                        expected: field,
                        found: codec.field(),
                    });
                }
                decompress_exact(codec, &data, raw_size)
            }
        }
    }
}
