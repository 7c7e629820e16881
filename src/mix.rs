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

//! Mixing primitives shared by the one-shot functions and the streaming engines.
//!
//! The primes and rotation amounts are the published XXH32 / XXH64 constants.
//! Changing any of them yields plausible but non-conforming digests.

#[inline(always)]
pub(crate) fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes[0..4].try_into().unwrap())
}
#[inline(always)]
pub(crate) fn read_u64(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(bytes[0..8].try_into().unwrap())
}

pub(crate) mod w32 {
    /// XXH32 prime 1.
    pub const PRIME_1: u32 = 0x9e3779b1;
    /// XXH32 prime 2.
    pub const PRIME_2: u32 = 0x85ebca77;
    /// XXH32 prime 3.
    pub const PRIME_3: u32 = 0xc2b2ae3d;
    /// XXH32 prime 4.
    pub const PRIME_4: u32 = 0x27d4eb2f;
    /// XXH32 prime 5.
    pub const PRIME_5: u32 = 0x165667b1;

    #[inline(always)]
    pub const fn round(acc: u32, input: u32) -> u32 {
        acc.wrapping_add(input.wrapping_mul(PRIME_2))
            .rotate_left(13)
            .wrapping_mul(PRIME_1)
    }

    #[inline(always)]
    pub const fn avalanche(mut h: u32) -> u32 {
        h ^= h >> 15;
        h = h.wrapping_mul(PRIME_2);
        h ^= h >> 13;
        h = h.wrapping_mul(PRIME_3);
        h ^ (h >> 16)
    }
}

pub(crate) mod w64 {
    /// XXH64 prime 1.
    pub const PRIME_1: u64 = 0x9e3779b185ebca87;
    /// XXH64 prime 2.
    pub const PRIME_2: u64 = 0xc2b2ae3d27d4eb4f;
    /// XXH64 prime 3.
    pub const PRIME_3: u64 = 0x165667b19e3779f9;
    /// XXH64 prime 4.
    pub const PRIME_4: u64 = 0x85ebca77c2b2ae63;
    /// XXH64 prime 5.
    pub const PRIME_5: u64 = 0x27d4eb2f165667c5;

    #[inline(always)]
    pub const fn round(acc: u64, input: u64) -> u64 {
        acc.wrapping_add(input.wrapping_mul(PRIME_2))
            .rotate_left(31)
            .wrapping_mul(PRIME_1)
    }

    /// Folds one converged lane into the running hash.
    #[inline(always)]
    pub const fn merge_round(h: u64, lane: u64) -> u64 {
        (h ^ round(0, lane)).wrapping_mul(PRIME_1).wrapping_add(PRIME_4)
    }

    #[inline(always)]
    pub const fn avalanche(mut h: u64) -> u64 {
        h ^= h >> 33;
        h = h.wrapping_mul(PRIME_2);
        h ^= h >> 29;
        h = h.wrapping_mul(PRIME_3);
        h ^ (h >> 32)
    }
}
