//! A rateless erasure code (Luby Transform / LT code) for transporting a
//! finite payload across a one-way channel where the sender cannot know
//! which packets the receiver observes: the encoder emits an unbounded
//! stream of degree-sampled, XOR-combined packets; the decoder accumulates
//! any sufficient subset and reconstructs the payload exactly via
//! residual-graph peeling.
//!
//! This crate is the core only: block fragmentation, Robust Soliton degree
//! sampling, the encoder, the decoder, the block-size planner, and the
//! frame codec. File I/O, QR rendering, and any GUI are collaborators that
//! sit outside this crate and talk to it only through the types below.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod planner;
pub mod rsd;
pub mod sampler;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ConfigError, CoreError, CoreResult, FrameError, ProtocolError};
pub use frame::{bitmask_to_indices, decode_header, encode_header, indices_to_bitmask, Header};
pub use planner::choose_block_size;
pub use rsd::RobustSoliton;

use rand::rngs::ThreadRng;

/// Builds an encoder over `payload` with the given `block_size`, using
/// `rand::thread_rng()`. Thin wrapper over [`Encoder::new`] for parity with
/// the interface name collaborators were given.
pub fn new_encoder(payload: &[u8], block_size: usize) -> CoreResult<Encoder<ThreadRng>> {
    Encoder::new(payload, block_size)
}

/// Builds a decoder for `k` source blocks of `block_size` bytes. Thin
/// wrapper over [`Decoder::new`].
pub fn new_decoder(k: usize, block_size: usize) -> CoreResult<Decoder> {
    Decoder::new(k, block_size)
}
