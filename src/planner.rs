//! Block-size planner: chooses the largest `block_size` such that
//! `ceil(K/8) + block_size <= max_payload_size`, where `K = ceil(file_size /
//! block_size)`.

use crate::error::{ConfigError, CoreError, CoreResult};

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Chooses the largest feasible `block_size` for `file_size` bytes of
/// payload under the `max_payload_size` envelope. Returns
/// `ConfigError::Infeasible` if no `block_size` in `1..max_payload_size`
/// satisfies the constraint.
pub fn choose_block_size(file_size: usize, max_payload_size: usize) -> CoreResult<usize> {
    if file_size == 0 {
        return Err(CoreError::Config(ConfigError::ZeroFileSize));
    }
    if max_payload_size < 2 {
        return Err(CoreError::Config(ConfigError::PayloadTooSmall(
            max_payload_size,
        )));
    }

    // Scan from the largest candidate block_size downward; the first hit
    // is maximal by construction. A block_size this large leaves no room
    // for any bitmask byte, so the true upper bound is max_payload_size - 1.
    for block_size in (1..max_payload_size).rev() {
        let k = ceil_div(file_size, block_size);
        let bitmask_bytes = ceil_div(k, 8);
        if bitmask_bytes + block_size <= max_payload_size {
            return Ok(block_size);
        }
    }

    Err(CoreError::Config(ConfigError::Infeasible {
        file_size,
        max_payload_size,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_FILE_SIZE, MAX_PAYLOAD_SIZE};

    #[test]
    fn feasible_for_small_file() {
        let bs = choose_block_size(5, MAX_PAYLOAD_SIZE).unwrap();
        assert!(bs > 0);
        let k = ceil_div(5, bs);
        assert!(ceil_div(k, 8) + bs <= MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn feasible_at_max_file_size_default_envelope() {
        let bs = choose_block_size(MAX_FILE_SIZE, MAX_PAYLOAD_SIZE).unwrap();
        let k = ceil_div(MAX_FILE_SIZE, bs);
        assert!(ceil_div(k, 8) + bs <= MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn zero_file_size_is_config_error() {
        let err = choose_block_size(0, MAX_PAYLOAD_SIZE).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::ZeroFileSize)
        ));
    }

    #[test]
    fn payload_too_small_is_config_error() {
        let err = choose_block_size(10, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::PayloadTooSmall(1))
        ));
    }

    #[test]
    fn result_is_maximal() {
        let file_size = 10_000;
        let max_payload = 300;
        let bs = choose_block_size(file_size, max_payload).unwrap();
        // No larger block_size (up to max_payload - 1) can also satisfy the constraint.
        for candidate in (bs + 1)..max_payload {
            let k = ceil_div(file_size, candidate);
            assert!(
                ceil_div(k, 8) + candidate > max_payload,
                "block_size {bs} was not maximal: {candidate} also fits"
            );
        }
    }
}
