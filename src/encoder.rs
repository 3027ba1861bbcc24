//! LT encoder: fragments a payload into blocks and produces an unbounded
//! stream of XOR-combined packets keyed by an index set.

use log::trace;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::{ConfigError, CoreError, CoreResult};
use crate::rsd::RobustSoliton;
use crate::sampler::{sample_degree, sample_indices};

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// An LT encoder over an immutable, blocked payload, generic over its RNG
/// so callers can seed it for deterministic tests (`R = StdRng`) or default
/// to `ThreadRng` in production.
pub struct Encoder<R = ThreadRng> {
    blocks: Vec<Vec<u8>>,
    block_size: usize,
    rsd: RobustSoliton,
    rng: R,
}

impl Encoder<ThreadRng> {
    /// Builds an encoder with `rand::thread_rng()` as its randomness source.
    pub fn new(payload: &[u8], block_size: usize) -> CoreResult<Self> {
        Self::with_rng(payload, block_size, rand::thread_rng())
    }
}

impl<R: Rng> Encoder<R> {
    /// Builds an encoder with an explicit RNG. `block_size` must be > 0 and
    /// `payload` must be non-empty.
    pub fn with_rng(payload: &[u8], block_size: usize, rng: R) -> CoreResult<Self> {
        if block_size == 0 {
            return Err(CoreError::Config(ConfigError::ZeroBlockSize(block_size)));
        }
        if payload.is_empty() {
            return Err(CoreError::Config(ConfigError::ZeroFileSize));
        }

        let k = ceil_div(payload.len(), block_size);
        let mut blocks = Vec::with_capacity(k);
        for chunk in payload.chunks(block_size) {
            let mut block = vec![0u8; block_size];
            block[..chunk.len()].copy_from_slice(chunk);
            blocks.push(block);
        }

        let rsd = RobustSoliton::new(k);

        Ok(Encoder {
            blocks,
            block_size,
            rsd,
            rng,
        })
    }

    /// Number of source blocks.
    pub fn k(&self) -> usize {
        self.blocks.len()
    }

    /// Size in bytes of each source block (and each packet's payload).
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Samples a degree, samples that many distinct indices, and returns
    /// the resulting `(indices, xor-of-blocks)` packet. Pure per-call state
    /// beyond the RNG — packets are mutually independent.
    pub fn next_packet(&mut self) -> (Vec<usize>, Vec<u8>) {
        let degree = sample_degree(&mut self.rng, &self.rsd);
        let indices = sample_indices(&mut self.rng, self.blocks.len(), degree);
        trace!("encoder: sampled degree={degree} indices={indices:?}");

        let mut payload = vec![0u8; self.block_size];
        for &i in &indices {
            xor_into(&mut payload, &self.blocks[i]);
        }

        (indices, payload)
    }
}
