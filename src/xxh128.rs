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

//! 128-bit digests, computed by the XXH3-128 implementation of [`xxhash_rust`].
//!
//! This module only adapts the provider's `u128` result into [`Uint128`] and gives it the
//! same hasher surface as the 32/64-bit variants. Seed 0 is defined by XXH3 to be the
//! unseeded routine, so the seeded entry points are used unconditionally.

use core::fmt;
use xxhash_rust::xxh3::{xxh3_128, xxh3_128_with_seed, Xxh3};

/// Lower 64-bit, then upper 64-bit.
#[inline(always)]
const fn u128_to_u64s(x: u128) -> (u64, u64) {
    (x as u64, (x >> 64) as u64)
}
/// Lower 64-bit, then upper 64-bit.
#[inline(always)]
const fn u64s_to_u128(lo: u64, hi: u64) -> u128 {
    ((hi as u128) << 64) | lo as u128
}

/// A 128-bit digest split into its halves.
///
/// Canonical rendering puts `hi` first, both as bytes and as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint128 {
    /// Upper 64 bits.
    pub hi: u64,
    /// Lower 64 bits.
    pub lo: u64,
}

impl Uint128 {
    /// Big-endian bytes, `hi` first.
    pub const fn to_be_bytes(self) -> [u8; 16] {
        u64s_to_u128(self.lo, self.hi).to_be_bytes()
    }
}
impl From<u128> for Uint128 {
    fn from(x: u128) -> Self {
        let (lo, hi) = u128_to_u64s(x);
        Self { hi, lo }
    }
}
impl From<Uint128> for u128 {
    fn from(x: Uint128) -> Self {
        u64s_to_u128(x.lo, x.hi)
    }
}
impl fmt::LowerHex for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// One-shot XXH3-128 with seed 0.
#[inline]
pub fn hash(bytes: &[u8]) -> Uint128 {
    xxh3_128(bytes).into()
}
/// One-shot XXH3-128.
#[inline]
pub fn hash_with_seed(bytes: &[u8], seed: u64) -> Uint128 {
    xxh3_128_with_seed(bytes, seed).into()
}

/// Streamed XXH3-128 hasher.
///
/// Unlike [`Xxh32`](crate::Xxh32) and [`Xxh64`](crate::Xxh64) there is no state codec:
/// the provider's state is opaque.
#[derive(Clone)]
pub struct Xxh128 {
    inner: Xxh3,
    seed: u64,
}
#[allow(missing_docs)]
impl Xxh128 {
    /// Digest size in bytes.
    pub const DIGEST_LEN: usize = 16;

    pub fn new() -> Self {
        Self::with_seed(0)
    }
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: Xxh3::with_seed(seed),
            seed,
        }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
    pub fn reset_with_seed(&mut self, seed: u64) {
        log::trace!("xxh128: reseeding with {:#018x}", seed);
        *self = Self::with_seed(seed);
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Absorbs `bytes`, always returning `bytes.len()`.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.inner.update(bytes);
        bytes.len()
    }

    pub fn finish(&self) -> Uint128 {
        self.inner.digest128().into()
    }
    /// The digest rendered big-endian, `hi` first.
    pub fn finish_bytes(&self) -> [u8; 16] {
        self.finish().to_be_bytes()
    }
}
impl Default for Xxh128 {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for Xxh128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xxh128").field("seed", &self.seed).finish_non_exhaustive()
    }
}
#[cfg(feature = "std")]
impl std::io::Write for Xxh128 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Xxh128::write(self, buf))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
