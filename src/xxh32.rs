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

//! XXH32: 32-bit digests over 16-byte blocks.
//!
//! ```
//! use xxhash_digest::{xxh32, Xxh32};
//!
//! let mut hasher = Xxh32::new();
//! hasher.write(b"ab");
//! hasher.write(b"c");
//! assert_eq!(hasher.finish(), xxh32::hash(b"abc"));
//! assert_eq!(hasher.finish(), 0x32d153ff);
//! ```

use super::*;
use crate::buffer::Pending;
use crate::mix::read_u32;
use crate::mix::w32::{avalanche, round};
use crate::state::{Format, RecordReader, RecordWriter, TAG_LEN};
use core::fmt;

pub use crate::mix::w32::{PRIME_1, PRIME_2, PRIME_3, PRIME_4, PRIME_5};

const BLOCK_LEN: usize = 16;

/// Size in bytes of an encoded [`Xxh32`] state record.
pub const STATE_LEN: usize = TAG_LEN + 4 * 4 + 8 + BLOCK_LEN;

const FORMAT: Format = Format {
    name: "xxh32",
    tag: *b"xxh\x03",
    len: STATE_LEN,
};

#[derive(Clone, Copy, PartialEq, Eq)]
struct Lanes([u32; 4]);

impl Lanes {
    const fn new(seed: u32) -> Self {
        Self([
            seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2),
            seed.wrapping_add(PRIME_2),
            seed,
            seed.wrapping_sub(PRIME_1),
        ])
    }

    #[inline(always)]
    fn mix_block(&mut self, block: &[u8]) {
        self.0[0] = round(self.0[0], read_u32(&block[0..]));
        self.0[1] = round(self.0[1], read_u32(&block[4..]));
        self.0[2] = round(self.0[2], read_u32(&block[8..]));
        self.0[3] = round(self.0[3], read_u32(&block[12..]));
    }

    /// Mixes every whole block of `bytes`, returning the tail that remains.
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
    fn converge(&self) -> u32 {
        let [v1, v2, v3, v4] = self.0;
        v1.rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18))
    }
}

/// Terminal step of both [`hash_with_seed`] and [`Xxh32::finish`].
#[inline(always)]
fn finalize(lanes: &Lanes, tot_len: u64, tail: &[u8]) -> u32 {
    debug_assert!(tail.len() < BLOCK_LEN);

    let mut h = if tot_len >= BLOCK_LEN as u64 {
        lanes.converge()
    } else {
        // Nothing mixed yet, lane 3 is still the seed.
        lanes.0[2].wrapping_add(PRIME_5)
    };
    h = h.wrapping_add(tot_len as u32);

    let words = tail.chunks_exact(4);
    let rest = words.remainder();
    for word in words {
        h = h.wrapping_add(read_u32(word).wrapping_mul(PRIME_3));
        h = h.rotate_left(17).wrapping_mul(PRIME_4);
    }
    for &byte in rest {
        h = h.wrapping_add((byte as u32).wrapping_mul(PRIME_5));
        h = h.rotate_left(11).wrapping_mul(PRIME_1);
    }

    avalanche(h)
}

/// One-shot XXH32 with seed 0.
#[inline]
pub fn hash(bytes: &[u8]) -> u32 {
    hash_with_seed(bytes, 0)
}
/// One-shot XXH32.
#[inline]
pub fn hash_with_seed(bytes: &[u8], seed: u32) -> u32 {
    let mut lanes = Lanes::new(seed);
    let tail = lanes.mix_blocks(bytes);
    finalize(&lanes, bytes.len() as u64, tail)
}

/// Streamed XXH32 hasher.
///
/// [`finish`](Self::finish) only reads the state, so a hasher can be finished, fed
/// more bytes, and finished again. The whole state can be suspended with
/// [`encode_state`](Self::encode_state) and resumed with [`decode_state`](Self::decode_state).
#[derive(Clone, PartialEq, Eq)]
pub struct Xxh32 {
    lanes: Lanes,
    pending: Pending<BLOCK_LEN>,
    tot_len: u64,
    seed: u32,
}
#[allow(missing_docs)]
impl Xxh32 {
    /// Digest size in bytes.
    pub const DIGEST_LEN: usize = 4;
    /// Bytes consumed per round of lane mixing.
    pub const BLOCK_LEN: usize = BLOCK_LEN;
    /// Size in bytes of an encoded state record.
    pub const STATE_LEN: usize = STATE_LEN;

    pub const fn new() -> Self {
        Self::with_seed(0)
    }
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            lanes: Lanes::new(seed),
            pending: Pending::new(),
            tot_len: 0,
            seed,
        }
    }

    /// Starts over with the seed this hasher was last seeded with.
    pub fn reset(&mut self) {
        self.lanes = Lanes::new(self.seed);
        self.pending.clear();
        self.tot_len = 0;
    }
    pub fn reset_with_seed(&mut self, seed: u32) {
        log::trace!("xxh32: reseeding with {:#010x}", seed);
        self.seed = seed;
        self.reset();
    }

    pub const fn seed(&self) -> u32 {
        self.seed
    }
    /// Bytes written since construction or the last reset.
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

    pub fn finish(&self) -> u32 {
        finalize(&self.lanes, self.tot_len, self.pending.as_slice())
    }
    /// The digest rendered big-endian.
    pub fn finish_bytes(&self) -> [u8; 4] {
        self.finish().to_be_bytes()
    }

    /// Serializes the complete state. The seed is not part of the record.
    pub fn encode_state(&self) -> [u8; STATE_LEN] {
        let mut record = [0; STATE_LEN];
        let mut w = RecordWriter::new(&mut record, &FORMAT);
        for lane in self.lanes.0 {
            w.put_u32(lane);
        }
        w.put_u64(self.tot_len);
        w.put(self.pending.as_slice());
        w.pad(self.pending.vacant());
        w.finish();
        record
    }

    /// Replaces the state with a record produced by [`encode_state`](Self::encode_state).
    ///
    /// The stored seed is kept. On error the hasher is left untouched.
    pub fn decode_state(&mut self, record: &[u8]) -> Result<()> {
        let mut r = RecordReader::open(record, &FORMAT)?;
        let lanes = Lanes([r.take_u32(), r.take_u32(), r.take_u32(), r.take_u32()]);
        let tot_len = r.take_u64();
        let region = r.take(BLOCK_LEN);

        self.lanes = lanes;
        self.tot_len = tot_len;
        self.pending = Pending::restore(&region[..(tot_len % BLOCK_LEN as u64) as usize]);
        log::trace!("xxh32: restored state at {} bytes", tot_len);
        Ok(())
    }
    /// Restores a hasher whose stored seed is 0.
    pub fn from_state(record: &[u8]) -> Result<Self> {
        let mut hasher = Self::new();
        hasher.decode_state(record)?;
        Ok(hasher)
    }
}
impl Default for Xxh32 {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for Xxh32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xxh32")
            .field("seed", &self.seed)
            .field("total_len", &self.tot_len)
            .field("buffered", &self.pending.len())
            .finish_non_exhaustive()
    }
}
/// `finish` widens the 32-bit digest.
impl core::hash::Hasher for Xxh32 {
    fn finish(&self) -> u64 {
        self.finish() as u64
    }
    fn write(&mut self, bytes: &[u8]) {
        self.write(bytes);
    }
}
#[cfg(feature = "std")]
impl std::io::Write for Xxh32 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Xxh32::write(self, buf))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test_vectors {
    use super::*;
    extern crate std;
    use std::{vec, vec::Vec};

    fn random_split(bytes: &[u8]) -> (&[u8], &[u8], &[u8]) {
        match bytes.len() as u64 {
            0 => (&[], &[], &[]),
            1 => (&bytes[0..1], &[], &[]),
            2 => (&bytes[0..1], &bytes[1..2], &[]),
            3 => (&bytes[0..1], &bytes[1..2], &bytes[2..3]),
            n => {
                let p = wyhash::wyrng(&mut n.clone()) % (n - 2);
                let q = wyhash::wyrng(&mut !n) % (n - p);
                let (x, y) = bytes.split_at(p as usize);
                let (y, z) = y.split_at(q as usize);
                (x, y, z)
            }
        }
    }

    #[test]
    fn one_shot_eq_streamed() {
        (0..1024).map(|n| (n, vec![0xAB; n])).for_each(|(i, bytes)| {
            let one_shot = hash_with_seed(&bytes, 42);
            let streamed = {
                let mut hasher = Xxh32::with_seed(42);
                let (x, y, z) = random_split(&bytes);
                hasher.write(x);
                hasher.write(y);
                hasher.write(z);
                hasher.finish()
            };
            assert_eq!((i, one_shot), (i, streamed));
        })
    }

    #[test]
    fn every_chunk_size_agrees() {
        let bytes = (0..=255u8).cycle().take(1024).collect::<Vec<_>>();
        let whole = hash(&bytes);
        for chunk in [1, 2, 3, 4, 7, 8, 15, 16, 17, 32, 64, 128, 1024] {
            let mut hasher = Xxh32::new();
            bytes.chunks(chunk).for_each(|c| assert_eq!(hasher.write(c), c.len()));
            assert_eq!((chunk, hasher.finish()), (chunk, whole));
        }
    }

    #[test]
    fn block_boundaries() {
        let bytes = vec![0x5a; 3 * BLOCK_LEN + 1];
        for len in [15, 16, 17, 31, 32, 33, 47, 48, 49] {
            let mut hasher = Xxh32::with_seed(9);
            hasher.write(&bytes[..len - 1]);
            hasher.write(&[]);
            hasher.write(&bytes[len - 1..len]);
            assert_eq!((len, hasher.finish()), (len, hash_with_seed(&bytes[..len], 9)));
        }
    }

    #[test]
    fn known_values() {
        let cases: &[(&[u8], u32)] = &[
            (b"", 0x02cc5d05),
            (b"a", 0x550d7456),
            (b"abc", 0x32d153ff),
            (b"message digest", 0x7c948494),
            (b"abcdefghijklmnopqrstuvwxyz", 0x63a14d5f),
            (b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789", 0x9c285e64),
            (b"12345678901234567890123456789012345678901234567890123456789012345678901234567890", 0x9c05f475),
            (b"The quick brown fox jumps over the lazy dog", 0xe85ea4de),
        ];
        for &(msg, expected) in cases {
            assert_eq!(hash(msg), expected);
            let mut hasher = Xxh32::new();
            hasher.write(msg);
            assert_eq!(hasher.finish(), expected);
            assert_eq!(hasher.finish_bytes(), expected.to_be_bytes());
        }
    }

    #[test]
    fn known_seeded_values() {
        let cases: &[(u32, &[u8], u32)] = &[
            (1, b"", 0x0b2cb792),
            (1, b"abc", 0xaa3da8ff),
            (1, b"0123456789abcdef", 0xf31fe1cf),
            (1, b"The quick brown fox jumps over the lazy dog", 0x234f8471),
            (PRIME_1, b"", 0x36b78ae7),
            (PRIME_1, b"abc", 0xa1ae7709),
            (PRIME_1, b"0123456789abcdef", 0x72e8faf9),
            (u32::MAX, b"", 0x9061da9d),
            (u32::MAX, b"The quick brown fox jumps over the lazy dog", 0x5a2a0096),
        ];
        for &(seed, msg, expected) in cases {
            assert_eq!(hash_with_seed(msg, seed), expected);
        }
    }

    #[test]
    fn test_hash() {
        #[rustfmt::skip] const RESULTS: &[u32] = &[
            0x02cc5d05, 0xc94b84ed, 0xd6864c02, 0xecc86e74, 0x27ace16b, 0x82a6236c, 0x5b1e7b02, 0x4a62a6f7, 0xa0201a85, 0x0657cdde,
            0x485ee76e, 0x55b2cef9, 0x3f7c0aca, 0x47662583, 0x0f6064f3, 0x9453c78d, 0xd9387f2c, 0x5a804185, 0xe414c91d, 0x1051c7e6,
            0xd3a1470d, 0x477be649, 0x7bbc1b04, 0x258dc323, 0xe3cb778c, 0x453f6ad6, 0x4c8d9f23, 0x06f3d04f, 0x63268174, 0x32f23fdd,
            0xdb7cf69b, 0x3c08bdfd, 0xed4004c7, 0x4ebab06d, 0xf4936fe8, 0xbb9187be, 0x496e92e7, 0x130abb6b, 0x8b251429, 0xc1ee7d34,
            0x5c6ce329, 0xd5f3924a, 0xf9a19043, 0x87ebad61, 0x8577028d, 0xf7967a48, 0x68abd629, 0x8d3bfd1b, 0x332d4c8c, 0xf5e2494b,
            0x647d0183, 0x606d1e16, 0x74e6d789, 0xea1ce78d, 0xc6b585ba, 0x33167838, 0x05c4e2a6, 0x3a6984fb, 0xb3eb353a, 0x2aae7b81,
            0xa97866ba, 0x5cfde3a9, 0xd6409934, 0xabb263ce, 0x00076a52, 0x7914e501, 0x2dca1f2a, 0x30a32e56, 0x534499a5, 0xcce26112,
            0x900a6870, 0x73ac4d2c, 0xffd198d7, 0x31822371, 0xa40df2c2, 0xeaecad8e, 0x6bf2be24, 0x7019dc22, 0x4de30e76, 0xadb9d899,
            0x11b507f6, 0x6d08e0d2, 0xa126e2a7, 0x9f666239, 0x7f4959fd, 0x038331a9, 0xbddde9da, 0x74633276, 0x910daab1, 0xa213040b,
            0xd5762018, 0x245cc6a2, 0xad0d610d, 0xfb7ac5c3, 0x2d8c1b0a, 0xe46383dd, 0x26d0ec8f, 0xc5b2e985, 0xefb11f30, 0x19e43c6c,
            0x5d841c4c, 0xdf05ca17, 0xc0dbb22e, 0xc1b4c123, 0x020f84a8, 0xe3d5c36b, 0x8a61b89e, 0xd1a26b3f, 0x297666fa, 0x9e628270,
            0x76de0be7, 0x95dae94a, 0x2f26f6db, 0xbff337fb, 0xbd0a2f37, 0xe55d37d5, 0x172ffd2f, 0x5bb53596, 0xb08a0133, 0xdddfa23a,
            0x49cfffe3, 0xdcf21f6a, 0xf9d6f44c, 0x391a1e71, 0x4fa51f2f, 0x43fd7dab, 0xec92e8c9, 0x40108c94, 0x09ae2fd8, 0xc2bf573b,
            0x9679bd75, 0x280c8ea1, 0x7ce46d26, 0xb48bb455, 0xc0e0957a, 0x54abf05d, 0x0c013bff, 0xa0257cf7, 0xb48d133c, 0xf8d60ff9,
            0x80915f40, 0x1b4fa837, 0x031919f7, 0x734952a8, 0xb1b281b9, 0x1e70d70e, 0x1c19db97, 0x490e0f2d, 0x0665ca65, 0xab094254,
            0x6f7d429b, 0x0e627c6a, 0xc333e03d, 0x33bd323b, 0xc01e5acf, 0x345c766e, 0xd885b26b, 0x9569fa10, 0x9571cd92, 0x42c62f58,
            0x5a4ad2cd, 0xd9b5fda2, 0xba8a5b4c, 0xf2dc71d1, 0xc857b187, 0xb66356c7, 0x79a19c6f, 0x8930d2d0, 0x6821247e, 0x72bf3f50,
            0xe60d1ba0, 0x794c25f4, 0x935f8ac1, 0x330b1d5c, 0xcf6d26a1, 0x1b298621, 0x2e90faad, 0xe3c062f7, 0x661916e4, 0x5534cf4c,
            0x49d7d980, 0xc0aff09b, 0x976ba04f, 0x5a3f3316, 0x69f13572, 0x277b37bb, 0x06aee0de, 0xb7f860e2, 0x18c42def, 0x12b574e2,
            0x72810b8f, 0xdaee76e6, 0x1b216d80, 0xc6968917, 0xbe433aba, 0xbdff36cf, 0x2a35a8fd, 0x073f7783, 0x7ef1c2fd, 0x76a5348e,
        ];
        let ans = (0..RESULTS.len()).map(|n| hash(&vec![0xAB; n])).collect::<Vec<_>>();
        RESULTS.iter().zip(ans).enumerate().for_each(|(i, (e, a))| assert_eq!((i, *e), (i, a)));
    }

    #[test]
    fn finish_is_pure() {
        let mut hasher = Xxh32::with_seed(3);
        hasher.write(b"The quick brown fox ");
        let first = hasher.finish();
        assert_eq!(hasher.finish(), first);
        assert_eq!(first, hash_with_seed(b"The quick brown fox ", 3));

        hasher.write(b"jumps over the lazy dog");
        assert_eq!(hasher.finish(), hash_with_seed(b"The quick brown fox jumps over the lazy dog", 3));
        assert_eq!(hasher.total_len(), 43);
    }

    #[test]
    fn reset_matches_fresh() {
        let mut hasher = Xxh32::with_seed(77);
        hasher.write(&[1; 100]);
        hasher.reset();
        assert!(hasher == Xxh32::with_seed(77));
        hasher.write(b"abc");
        assert_eq!(hasher.finish(), hash_with_seed(b"abc", 77));

        hasher.reset_with_seed(0);
        assert_eq!(hasher.seed(), 0);
        assert_eq!(hasher.total_len(), 0);
        assert_eq!(hasher.finish(), 0x02cc5d05);
    }

    #[test]
    fn state_layout() {
        let mut hasher = Xxh32::with_seed(7);
        hasher.write(b"0123456789abcdefxyz");
        #[rustfmt::skip] const RECORD: [u8; STATE_LEN] = [
            0x78, 0x78, 0x68, 0x03,
            0xdb, 0x5a, 0xbc, 0x91, 0xfa, 0x95, 0x8f, 0xfd, 0xe7, 0x30, 0x3b, 0x09, 0x40, 0x3e, 0x6a, 0x1a,
            0x13, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x78, 0x79, 0x7a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(hasher.encode_state(), RECORD);
    }

    #[test]
    fn stale_scratch_is_not_encoded() {
        let mut hasher = Xxh32::new();
        hasher.write(&[0xff; 15]);
        hasher.write(&[0xff; 2]);
        let record = hasher.encode_state();
        assert_eq!(record[28], 0xff);
        assert!(record[29..].iter().all(|&b| b == 0));
    }

    #[test]
    fn state_round_trip() {
        let bytes = (0..200u8).collect::<Vec<_>>();
        for split in [0, 1, 15, 16, 17, 63, 64, 100] {
            let mut original = Xxh32::with_seed(5);
            original.write(&bytes[..split]);

            let mut restored = Xxh32::with_seed(5);
            restored.write(b"discarded by decode");
            restored.decode_state(&original.encode_state()).unwrap();
            assert!(restored == original);
            assert_eq!(restored.finish(), original.finish());

            original.write(&bytes[split..]);
            restored.write(&bytes[split..]);
            assert_eq!(restored.finish(), original.finish());
            assert_eq!(restored.finish(), hash_with_seed(&bytes, 5));
        }
    }

    #[test]
    fn from_state_keeps_seed_zero() {
        let mut original = Xxh32::with_seed(11);
        original.write(b"abc");
        let restored = Xxh32::from_state(&original.encode_state()).unwrap();
        assert_eq!(restored.seed(), 0);
        assert_eq!(restored.finish(), original.finish());
    }

    #[test]
    fn decode_rejects_malformed() {
        let mut hasher = Xxh32::new();
        hasher.write(b"abc");
        let record = hasher.encode_state();

        let mut bad_tag = record;
        bad_tag[3] = 0x06;
        assert_eq!(Xxh32::from_state(&bad_tag), Err(Error::InvalidStateTag));
        assert_eq!(Xxh32::from_state(&record[..3]), Err(Error::InvalidStateTag));
        assert_eq!(
            Xxh32::from_state(&record[..STATE_LEN - 1]),
            Err(Error::InvalidStateSize { expected: STATE_LEN, actual: STATE_LEN - 1 })
        );
        let mut long = Vec::from(&record[..]);
        long.push(0);
        assert_eq!(
            Xxh32::from_state(&long),
            Err(Error::InvalidStateSize { expected: STATE_LEN, actual: STATE_LEN + 1 })
        );

        let before = hasher.clone();
        assert!(hasher.decode_state(&bad_tag).is_err());
        assert!(hasher == before);
    }

    #[test]
    fn core_hasher_widens() {
        let mut hasher = Xxh32::new();
        core::hash::Hasher::write(&mut hasher, b"abc");
        assert_eq!(core::hash::Hasher::finish(&hasher), 0x32d153ff);
    }
}
