//! LT decoder: an incremental, event-driven peeling engine over a residual
//! bipartite graph. Ingests packets one at a time and recovers original
//! blocks by repeated singleton release, propagated through a FIFO ripple
//! queue.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, warn};

use crate::error::{ConfigError, CoreError, CoreResult, ProtocolError};

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// A residual packet: the still-unexplained indices `s` (kept sorted) and
/// the XOR accumulator `p` with all recovered indices already eliminated.
/// Tombstoned (set to `None` in the decoder's `residual` table) once `s`
/// drains to empty — by then every `adj` entry referencing it is gone too.
struct Residual {
    s: Vec<usize>,
    p: Vec<u8>,
}

/// The residual-graph peeling decoder. Owned exclusively by its caller;
/// `ingest` is synchronous and resolves all transitively-reachable
/// singletons before returning.
pub struct Decoder {
    k: usize,
    block_size: usize,
    recovered: Vec<Option<Vec<u8>>>,
    recovered_count: usize,
    residual: Vec<Option<Residual>>,
    adj: Vec<BTreeSet<usize>>,
    ripple: VecDeque<usize>,
}

impl Decoder {
    /// Creates a decoder for `k` source blocks of `block_size` bytes each
    /// (both learned out-of-band from the header frame). The decoder
    /// starts empty; it learns exclusively from `ingest`.
    pub fn new(k: usize, block_size: usize) -> CoreResult<Self> {
        if k == 0 {
            return Err(CoreError::Config(ConfigError::ZeroBlockCount));
        }
        if block_size == 0 {
            return Err(CoreError::Config(ConfigError::ZeroBlockSize(block_size)));
        }

        Ok(Decoder {
            k,
            block_size,
            recovered: vec![None; k],
            recovered_count: 0,
            residual: Vec::new(),
            adj: vec![BTreeSet::new(); k],
            ripple: VecDeque::new(),
        })
    }

    /// Number of source blocks this decoder targets.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Blocks recovered so far.
    pub fn recovered_count(&self) -> usize {
        self.recovered_count
    }

    /// Ingests one packet. Returns `Ok(true)` if it contributed new
    /// information, `Ok(false)` if it was redundant (a silent no-op — all
    /// indices were already recovered). Validation errors abort the call
    /// and leave decoder state unchanged.
    pub fn ingest(&mut self, indices: &[usize], payload: &[u8]) -> CoreResult<bool> {
        if payload.len() != self.block_size {
            warn!(
                "decoder: rejecting packet with payload length {} (expected {})",
                payload.len(),
                self.block_size
            );
            return Err(CoreError::Protocol(ProtocolError::PayloadLengthMismatch {
                expected: self.block_size,
                actual: payload.len(),
            }));
        }
        for &i in indices {
            if i >= self.k {
                warn!("decoder: rejecting packet with index {i} out of range for K={}", self.k);
                return Err(CoreError::Protocol(ProtocolError::IndexOutOfRange {
                    index: i,
                    k: self.k,
                }));
            }
        }

        let mut p_prime = payload.to_vec();
        let mut s_prime: Vec<usize> = Vec::with_capacity(indices.len());
        for &i in indices {
            if let Some(known) = &self.recovered[i] {
                xor_into(&mut p_prime, known);
            } else if !s_prime.contains(&i) {
                s_prime.push(i);
            }
        }

        if s_prime.is_empty() {
            debug!("decoder: ingest redundant, no new information");
            return Ok(false);
        }
        s_prime.sort_unstable();

        let pos = self.residual.len();
        for &i in &s_prime {
            self.adj[i].insert(pos);
        }
        self.residual.push(Some(Residual {
            s: s_prime.clone(),
            p: p_prime.clone(),
        }));
        debug!("decoder: ingest accepted as residual #{pos}, degree {}", s_prime.len());

        if s_prime.len() == 1 {
            self.release(s_prime[0], p_prime);
        }

        self.peel();
        Ok(true)
    }

    fn release(&mut self, b: usize, data: Vec<u8>) {
        if self.recovered[b].is_some() {
            return;
        }
        debug!("decoder: released block {b}");
        self.recovered[b] = Some(data);
        self.recovered_count += 1;
        self.ripple.push_back(b);
    }

    fn peel(&mut self) {
        while let Some(b) = self.ripple.pop_front() {
            let r = self.recovered[b]
                .clone()
                .expect("ripple only ever holds recovered blocks");
            let snapshot: Vec<usize> = self.adj[b].iter().copied().collect();

            for pos in snapshot {
                let contains_b = self.residual[pos]
                    .as_ref()
                    .map_or(false, |res| res.s.binary_search(&b).is_ok());
                if !contains_b {
                    // Already updated out-of-band; adj[b] entry is stale but harmless.
                    continue;
                }

                let remaining = {
                    let res = self.residual[pos].as_mut().unwrap();
                    res.s.retain(|&x| x != b);
                    xor_into(&mut res.p, &r);
                    res.s.len()
                };
                self.adj[b].remove(&pos);

                match remaining {
                    0 => {
                        self.residual[pos] = None;
                    }
                    1 => {
                        let res = self.residual[pos].take().unwrap();
                        self.release(res.s[0], res.p);
                    }
                    _ => {}
                }
            }
        }
    }

    /// True once every source block has been recovered.
    pub fn is_complete(&self) -> bool {
        self.recovered_count == self.k
    }

    /// Returns `recovered[0] || recovered[1] || ... || recovered[K-1]`.
    /// Callers truncate to `file_size` themselves (the decoder has no
    /// notion of the original, unpadded length).
    pub fn reconstruct(&self) -> CoreResult<Vec<u8>> {
        if !self.is_complete() {
            return Err(CoreError::Protocol(ProtocolError::DecodingIncomplete {
                recovered: self.recovered_count,
                k: self.k,
            }));
        }

        let mut out = Vec::with_capacity(self.k * self.block_size);
        for block in &self.recovered {
            out.extend_from_slice(block.as_ref().expect("is_complete implies every block is Some"));
        }
        Ok(out)
    }
}
