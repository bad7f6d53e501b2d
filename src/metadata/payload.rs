//! Codec for compressed payloads embedded in task settings.
//!
//! Registry patches and similar blobs are stored as text of the form
//!
//! ```text
//! [0..22]  : format marker, ignored
//! [22..]   : hex encoded, compressed UTF-8 text
//! ```
//!
//! The compressed stream is zlib framed in exports; streams without a valid zlib header
//! are decoded as raw DEFLATE.

use std::io::{Read, Write};

use flate2::{
    read::{DeflateDecoder, ZlibDecoder},
    write::ZlibEncoder,
    Compression,
};

use crate::{Error, Result};

/// Number of characters of the format marker in front of the hex data
pub const MARKER_LEN: usize = 22;

/// Marker written by [`encode_payload`]
pub const DEFAULT_MARKER: &str = "RESZLIB000000000000000";

/// Decodes an embedded payload into text.
///
/// # Arguments
///
/// * `blob` - The payload as found in the document, marker included. Whitespace around
///   the blob is ignored.
///
/// # Errors
///
/// - [`Error::MalformedPayload`] if the blob is shorter than the marker, carries no data,
///   is not valid hex, or is not a valid compressed stream
/// - [`Error::EncodingError`] if the decompressed bytes are not UTF-8
///
/// # Examples
///
/// ```rust
/// use bbscope::metadata::payload::{decode_payload, encode_payload};
///
/// let blob = encode_payload("Windows Registry Editor Version 5.00")?;
/// assert_eq!(decode_payload(&blob)?, "Windows Registry Editor Version 5.00");
/// # Ok::<(), bbscope::Error>(())
/// ```
pub fn decode_payload(blob: &str) -> Result<String> {
    let blob = blob.trim();
    let data_start = blob
        .char_indices()
        .nth(MARKER_LEN)
        .map(|(offset, _)| offset)
        .ok_or_else(|| {
            Error::MalformedPayload(format!(
                "payload of {} characters carries no data after the {MARKER_LEN} character marker",
                blob.chars().count()
            ))
        })?;

    let compressed = hex::decode(&blob[data_start..])
        .map_err(|e| Error::MalformedPayload(format!("invalid hex data - {e}")))?;

    let decompressed = decompress(&compressed)?;
    Ok(String::from_utf8(decompressed)?)
}

/// Encodes text the way [`decode_payload`] expects it, using [`DEFAULT_MARKER`].
///
/// # Errors
/// Returns [`Error::Io`] if the zlib encoder fails.
pub fn encode_payload(text: &str) -> Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    let compressed = encoder.finish()?;

    let mut blob = String::with_capacity(MARKER_LEN + compressed.len() * 2);
    blob.push_str(DEFAULT_MARKER);
    blob.push_str(&hex::encode_upper(compressed));
    Ok(blob)
}

fn is_zlib_header(data: &[u8]) -> bool {
    if data.len() < 2 {
        return false;
    }
    let (cmf, flg) = (data[0], data[1]);
    // CM = 8 (deflate), window <= 32K, FCHECK
    cmf & 0x0F == 8 && cmf >> 4 <= 7 && (u16::from(cmf) << 8 | u16::from(flg)) % 31 == 0
}

fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    let outcome = if is_zlib_header(data) {
        ZlibDecoder::new(data).read_to_end(&mut decompressed)
    } else {
        DeflateDecoder::new(data).read_to_end(&mut decompressed)
    };

    outcome.map_err(|e| Error::MalformedPayload(format!("corrupt compressed stream - {e}")))?;
    Ok(decompressed)
}
