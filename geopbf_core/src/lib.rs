pub mod blob;
pub mod codec;
pub mod error;
pub mod format;
pub mod wire;

pub use blob::Blob;
pub use codec::{decompress_exact, Codec};
pub use error::BlobError;
pub use format::{Limits, MAX_BLOB_LEN, MAX_RAW_SIZE};
