//! # Bitstring Codec
//!
//! Encoding and decoding of status list bitstrings per
//! [Bitstring Status List v1.0](https://www.w3.org/TR/vc-bitstring-status-list/).
//!
//! Bits are packed MSB-first into bytes (the first index, with a value of
//! zero, is located at the left-most bit in the bitstring), then compressed
//! with GZIP and encoded as base64url without padding. This is the only form
//! in which a status list is persisted or published, so the format must not
//! drift: third-party verifiers decode it.

use std::io::{Read, Write};

use base64ct::{Base64UrlUnpadded, Encoding};
use bitvec::order::Msb0;
use bitvec::vec::BitVec;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Error;
use crate::Result;

/// Encodes a packed bit array as a compressed, base64url (no padding) string.
///
/// # Errors
///
/// Returns `Error::Codec` if compression fails.
pub fn encode(bits: &BitVec<u8, Msb0>) -> Result<String> {
    let mut gz_encoder = GzEncoder::new(Vec::new(), Compression::default());
    gz_encoder
        .write_all(bits.as_raw_slice())
        .map_err(|e| Error::Codec(format!("issue compressing bitstring: {e}")))?;
    let compressed = gz_encoder
        .finish()
        .map_err(|e| Error::Codec(format!("issue compressing bitstring: {e}")))?;

    Ok(Base64UrlUnpadded::encode_string(&compressed))
}

/// Decodes an encoded status list into a bit array of length `capacity`.
///
/// The exact inverse of [`encode`]: base64url-decode, decompress, unpack
/// MSB-first, truncate to `capacity`.
///
/// # Errors
///
/// Returns `Error::Codec` if the input is not valid base64url, is not a
/// valid GZIP stream, or decompresses to fewer bytes than `capacity` bits
/// require.
pub fn decode(encoded: &str, capacity: usize) -> Result<BitVec<u8, Msb0>> {
    let compressed = Base64UrlUnpadded::decode_vec(encoded)
        .map_err(|e| Error::Codec(format!("issue decoding base64url: {e}")))?;

    let mut packed = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut packed)
        .map_err(|e| Error::Codec(format!("issue decompressing bitstring: {e}")))?;

    if packed.len() * 8 < capacity {
        return Err(Error::Codec(format!(
            "encoded list covers {} bits, expected at least {capacity}",
            packed.len() * 8
        )));
    }

    let mut bits = BitVec::<u8, Msb0>::from_vec(packed);
    bits.truncate(capacity);

    Ok(bits)
}
