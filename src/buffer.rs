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

/// Bytes written but not yet mixed into the lanes.
///
/// Storage is one full block so it can double as the scratch block that completes a
/// partial block; between writes at most `N - 1` bytes are occupied. Bytes past `len`
/// are stale scratch and never observable.
#[derive(Clone)]
pub(crate) struct Pending<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Pending<N> {
    pub(crate) const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    pub(crate) fn restore(bytes: &[u8]) -> Self {
        let mut pending = Self::new();
        pending.extend(bytes);
        pending
    }

    #[inline(always)]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still needed to complete the current block.
    #[inline(always)]
    pub(crate) const fn vacant(&self) -> usize {
        N - self.len
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends `bytes`, which must leave the buffer short of a full block.
    #[inline(always)]
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() < self.vacant());
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Completes the current block from the front of `bytes` and empties the buffer.
    ///
    /// Returns the completed block together with the unconsumed rest of `bytes`.
    #[inline(always)]
    pub(crate) fn top_up<'a>(&mut self, bytes: &'a [u8]) -> (&[u8; N], &'a [u8]) {
        let (head, rest) = bytes.split_at(self.vacant());
        self.buf[self.len..].copy_from_slice(head);
        self.len = 0;
        (&self.buf, rest)
    }
}

impl<const N: usize> PartialEq for Pending<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<const N: usize> Eq for Pending<N> {}
