//! Tunable defaults shared across the crate. Every default here can be
//! overridden per call; nothing downstream hardcodes these.

/// Bytes available in one transport frame for `bitmask + block payload`.
/// Sized to fit base64-expanded into a QR v40-L envelope with margin.
pub const MAX_PAYLOAD_SIZE: usize = 2210;

/// Largest `file_size` the default `MAX_PAYLOAD_SIZE` envelope can carry.
pub const MAX_FILE_SIZE: usize = 9_785_888;

/// Robust Soliton Distribution robustness constant `c`.
pub const DEFAULT_RSD_C: f64 = 0.1;

/// Robust Soliton Distribution failure probability `delta`.
pub const DEFAULT_RSD_DELTA: f64 = 0.5;
