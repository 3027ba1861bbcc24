//! Frame codec: the two wire shapes that cross the transport boundary — the
//! ASCII header record and the binary `bitmask || payload` packet frame.
//!
//! The bitmask layout is bit-exact and MUST NOT be changed independently in
//! encoder and decoder: build a little-endian byte buffer (bit `i mod 8` of
//! byte `i div 8`), then reverse the byte order before transmission.

use crate::error::{CoreError, CoreResult, FrameError, ProtocolError};

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Serializes a set of distinct block indices in `[0, k)` into a
/// byte-reversed little-endian bitmask of exactly `ceil(k / 8)` bytes.
pub fn indices_to_bitmask(indices: &[usize], k: usize) -> CoreResult<Vec<u8>> {
    let num_bytes = ceil_div(k, 8);
    let mut le_buf = vec![0u8; num_bytes];
    for &i in indices {
        if i >= k {
            return Err(CoreError::Protocol(ProtocolError::IndexOutOfRange {
                index: i,
                k,
            }));
        }
        le_buf[i / 8] |= 1 << (i % 8);
    }
    le_buf.reverse();
    Ok(le_buf)
}

/// Parses a bitmask back into an ascending, deduplicated list of indices in
/// `[0, k)`. `bitmask` must be exactly `ceil(k / 8)` bytes.
pub fn bitmask_to_indices(bitmask: &[u8], k: usize) -> CoreResult<Vec<usize>> {
    let num_bytes = ceil_div(k, 8);
    if bitmask.len() != num_bytes {
        return Err(CoreError::Protocol(ProtocolError::PayloadLengthMismatch {
            expected: num_bytes,
            actual: bitmask.len(),
        }));
    }

    // Undo the byte-reversal to recover the little-endian buffer.
    let mut le_buf = bitmask.to_vec();
    le_buf.reverse();

    let mut indices = Vec::new();
    for i in 0..k {
        let byte = le_buf[i / 8];
        if (byte >> (i % 8)) & 1 == 1 {
            indices.push(i);
        }
    }
    Ok(indices)
}

/// Builds the ASCII header record:
/// `HEADER:<file_name>:<file_size>:<K>:<block_size>`.
pub fn encode_header(file_name: &str, file_size: usize, k: usize, block_size: usize) -> CoreResult<String> {
    if file_name.contains(':') {
        return Err(CoreError::Frame(FrameError::NameContainsColon));
    }
    Ok(format!("HEADER:{file_name}:{file_size}:{k}:{block_size}"))
}

/// Parsed fields of a header record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub file_name: String,
    pub file_size: usize,
    pub k: usize,
    pub block_size: usize,
}

/// Parses a `HEADER:<file_name>:<file_size>:<K>:<block_size>` record.
pub fn decode_header(record: &str) -> CoreResult<Header> {
    let parts: Vec<&str> = record.split(':').collect();
    if parts.len() != 5 {
        return Err(CoreError::Frame(FrameError::FieldCount(parts.len())));
    }
    if parts[0] != "HEADER" {
        return Err(CoreError::Frame(FrameError::Malformed(record.to_string())));
    }

    let file_name = parts[1].to_string();
    let file_size = parse_field("file_size", parts[2])?;
    let k = parse_field("K", parts[3])?;
    let block_size = parse_field("block_size", parts[4])?;

    Ok(Header {
        file_name,
        file_size,
        k,
        block_size,
    })
}

fn parse_field(field: &'static str, value: &str) -> CoreResult<usize> {
    value
        .parse::<usize>()
        .map_err(|_| CoreError::Frame(FrameError::NotAnInteger {
            field,
            value: value.to_string(),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmask_is_bit_exact() {
        let bitmask = indices_to_bitmask(&[0, 3, 9], 10).unwrap();
        assert_eq!(bitmask, vec![0x02, 0x09]);
    }

    #[test]
    fn bitmask_round_trips() {
        let indices = vec![0, 3, 9];
        let bitmask = indices_to_bitmask(&indices, 10).unwrap();
        let back = bitmask_to_indices(&bitmask, 10).unwrap();
        assert_eq!(back, vec![0, 3, 9]);
    }

    #[test]
    fn bitmask_index_out_of_range_is_protocol_error() {
        let err = indices_to_bitmask(&[10], 10).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Protocol(ProtocolError::IndexOutOfRange { index: 10, k: 10 })
        ));
    }

    #[test]
    fn bitmask_never_sets_bits_past_k() {
        // K=10 needs 2 bytes (16 bit slots); bits 10..16 must never be readable as set.
        let bitmask = indices_to_bitmask(&[9], 10).unwrap();
        let back = bitmask_to_indices(&bitmask, 10).unwrap();
        assert_eq!(back, vec![9]);
    }

    #[test]
    fn header_round_trips() {
        let record = encode_header("payload.bin", 12345, 40, 256).unwrap();
        assert_eq!(record, "HEADER:payload.bin:12345:40:256");
        let parsed = decode_header(&record).unwrap();
        assert_eq!(
            parsed,
            Header {
                file_name: "payload.bin".to_string(),
                file_size: 12345,
                k: 40,
                block_size: 256,
            }
        );
    }

    #[test]
    fn header_name_with_colon_is_rejected() {
        let err = encode_header("bad:name.bin", 1, 1, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Frame(FrameError::NameContainsColon)
        ));
    }

    #[test]
    fn header_field_count_mismatch_is_frame_error() {
        let err = decode_header("HEADER:name:1:2").unwrap_err();
        assert!(matches!(err, CoreError::Frame(FrameError::FieldCount(4))));
    }

    #[test]
    fn header_non_numeric_field_is_frame_error() {
        let err = decode_header("HEADER:name:abc:2:3").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Frame(FrameError::NotAnInteger { field: "file_size", .. })
        ));
    }
}
