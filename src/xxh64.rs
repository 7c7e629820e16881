/*
 * Copyright (c) 2024 K--Aethiax
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * Alternatively, the contents of this file may be used under the terms of
 * the MIT license as described below.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! XXH64: 64-bit digests over 32-byte blocks.

use super::*;
use crate::buffer::Pending;
use crate::mix::w64::{avalanche, merge_round, round};
use crate::mix::{read_u32, read_u64};
use crate::state::{Format, RecordReader, RecordWriter, TAG_LEN};
use core::fmt;

pub use crate::mix::w64::{PRIME_1, PRIME_2, PRIME_3, PRIME_4, PRIME_5};

const BLOCK_LEN: usize = 32;

/// Size in bytes of an encoded [`Xxh64`] state record.
pub const STATE_LEN: usize = TAG_LEN + 4 * 8 + 8 + BLOCK_LEN;

const FORMAT: Format = Format {
    name: "xxh64",
    tag: *b"xxh\x06",
    len: STATE_LEN,
};

#[derive(Clone, Copy, PartialEq, Eq)]
struct Lanes([u64; 4]);

impl Lanes {
    const fn new(seed: u64) -> Self {
        Self([
            seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2),
            seed.wrapping_add(PRIME_2),
            seed,
            seed.wrapping_sub(PRIME_1),
        ])
    }

    #[inline(always)]
    fn mix_block(&mut self, block: &[u8]) {
        self.0[0] = round(self.0[0], read_u64(&block[0..]));
        self.0[1] = round(self.0[1], read_u64(&block[8..]));
        self.0[2] = round(self.0[2], read_u64(&block[16..]));
        self.0[3] = round(self.0[3], read_u64(&block[24..]));
    }

    #[inline(always)]
    fn mix_blocks<'a>(&mut self, bytes: &'a [u8]) -> &'a [u8] {
        let blocks = bytes.chunks_exact(BLOCK_LEN);
        let tail = blocks.remainder();
        for block in blocks {
            self.mix_block(block);
        }
        tail
    }

    #[inline(always)]
    fn converge(&self) -> u64 {
        let [v1, v2, v3, v4] = self.0;
        let mut h = v1
            .rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18));
        h = merge_round(h, v1);
        h = merge_round(h, v2);
        h = merge_round(h, v3);
        merge_round(h, v4)
    }
}

#[inline(always)]
fn finalize(lanes: &Lanes, tot_len: u64, tail: &[u8]) -> u64 {
    debug_assert!(tail.len() < BLOCK_LEN);

    let mut h = if tot_len >= BLOCK_LEN as u64 {
        lanes.converge()
    } else {
        lanes.0[2].wrapping_add(PRIME_5)
    };
    h = h.wrapping_add(tot_len);

    let words = tail.chunks_exact(8);
    let mut rest = words.remainder();
    for word in words {
        h ^= round(0, read_u64(word));
        h = h.rotate_left(27).wrapping_mul(PRIME_1).wrapping_add(PRIME_4);
    }
    if rest.len() >= 4 {
        h ^= (read_u32(rest) as u64).wrapping_mul(PRIME_1);
        h = h.rotate_left(23).wrapping_mul(PRIME_2).wrapping_add(PRIME_3);
        rest = &rest[4..];
    }
    for &byte in rest {
        h ^= (byte as u64).wrapping_mul(PRIME_5);
        h = h.rotate_left(11).wrapping_mul(PRIME_1);
    }

    avalanche(h)
}

/// One-shot XXH64 with seed 0.
#[inline]
pub fn hash(bytes: &[u8]) -> u64 {
    hash_with_seed(bytes, 0)
}
/// One-shot XXH64.
#[inline]
pub fn hash_with_seed(bytes: &[u8], seed: u64) -> u64 {
    let mut lanes = Lanes::new(seed);
    let tail = lanes.mix_blocks(bytes);
    finalize(&lanes, bytes.len() as u64, tail)
}

/// Streamed XXH64 hasher.
///
/// Behaves like [`Xxh32`](crate::Xxh32) with 64-bit lanes: finishing is side-effect
/// free and the state round-trips through [`encode_state`](Self::encode_state).
#[derive(Clone, PartialEq, Eq)]
pub struct Xxh64 {
    lanes: Lanes,
    pending: Pending<BLOCK_LEN>,
    tot_len: u64,
    seed: u64,
}
#[allow(missing_docs)]
impl Xxh64 {
    /// Digest size in bytes.
    pub const DIGEST_LEN: usize = 8;
    /// Bytes consumed per round of lane mixing.
    pub const BLOCK_LEN: usize = BLOCK_LEN;
    /// Size in bytes of an encoded state record.
    pub const STATE_LEN: usize = STATE_LEN;

    pub const fn new() -> Self {
        Self::with_seed(0)
    }
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            lanes: Lanes::new(seed),
            pending: Pending::new(),
            tot_len: 0,
            seed,
        }
    }

    pub fn reset(&mut self) {
        self.lanes = Lanes::new(self.seed);
        self.pending.clear();
        self.tot_len = 0;
    }
    pub fn reset_with_seed(&mut self, seed: u64) {
        log::trace!("xxh64: reseeding with {:#018x}", seed);
        self.seed = seed;
        self.reset();
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
    pub const fn total_len(&self) -> u64 {
        self.tot_len
    }

    /// Absorbs `bytes`, always returning `bytes.len()`.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let this_len = bytes.len();
        self.tot_len = self.tot_len.wrapping_add(this_len as u64);

        if unlikely(this_len < self.pending.vacant()) {
            self.pending.extend(bytes);
            return this_len;
        }

        let mut rest = bytes;
        if !self.pending.is_empty() {
            let (block, after) = self.pending.top_up(rest);
            self.lanes.mix_block(block);
            rest = after;
        }
        let tail = self.lanes.mix_blocks(rest);
        self.pending.extend(tail);

        this_len
    }

    pub fn finish(&self) -> u64 {
        finalize(&self.lanes, self.tot_len, self.pending.as_slice())
    }
    /// The digest rendered big-endian.
    pub fn finish_bytes(&self) -> [u8; 8] {
        self.finish().to_be_bytes()
    }

    pub fn encode_state(&self) -> [u8; STATE_LEN] {
        let mut record = [0; STATE_LEN];
        let mut w = RecordWriter::new(&mut record, &FORMAT);
        for lane in self.lanes.0 {
            w.put_u64(lane);
        }
        w.put_u64(self.tot_len);
        w.put(self.pending.as_slice());
        w.pad(self.pending.vacant());
        w.finish();
        record
    }

    /// Keeps the stored seed; leaves the hasher untouched on error.
    pub fn decode_state(&mut self, record: &[u8]) -> Result<()> {
        let mut r = RecordReader::open(record, &FORMAT)?;
        let lanes = Lanes([r.take_u64(), r.take_u64(), r.take_u64(), r.take_u64()]);
        let tot_len = r.take_u64();
        let region = r.take(BLOCK_LEN);

        self.lanes = lanes;
        self.tot_len = tot_len;
        self.pending = Pending::restore(&region[..(tot_len % BLOCK_LEN as u64) as usize]);
        log::trace!("xxh64: restored state at {} bytes", tot_len);
        Ok(())
    }
    pub fn from_state(record: &[u8]) -> Result<Self> {
        let mut hasher = Self::new();
        hasher.decode_state(record)?;
        Ok(hasher)
    }
}
impl Default for Xxh64 {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for Xxh64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xxh64")
            .field("seed", &self.seed)
            .field("total_len", &self.tot_len)
            .field("buffered", &self.pending.len())
            .finish_non_exhaustive()
    }
}
impl core::hash::Hasher for Xxh64 {
    fn finish(&self) -> u64 {
        self.finish()
    }
    fn write(&mut self, bytes: &[u8]) {
        self.write(bytes);
    }
}
#[cfg(feature = "std")]
impl std::io::Write for Xxh64 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Xxh64::write(self, buf))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
