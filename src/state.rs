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

//! Fixed-layout state records: a 4-byte tag, little-endian fields, zero padding.

use crate::mix::{read_u32, read_u64};
use crate::{Error, Result};

pub(crate) const TAG_LEN: usize = 4;

/// Shape of one record format.
pub(crate) struct Format {
    pub name: &'static str,
    pub tag: [u8; TAG_LEN],
    pub len: usize,
}

pub(crate) struct RecordWriter<'a> {
    out: &'a mut [u8],
    off: usize,
}

impl<'a> RecordWriter<'a> {
    /// `out` must be zeroed and exactly `format.len` bytes long.
    pub(crate) fn new(out: &'a mut [u8], format: &Format) -> Self {
        debug_assert_eq!(out.len(), format.len);
        out[..TAG_LEN].copy_from_slice(&format.tag);
        Self { out, off: TAG_LEN }
    }

    pub(crate) fn put_u32(&mut self, v: u32) {
        self.put(&v.to_le_bytes());
    }

    pub(crate) fn put_u64(&mut self, v: u64) {
        self.put(&v.to_le_bytes());
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) {
        self.out[self.off..self.off + bytes.len()].copy_from_slice(bytes);
        self.off += bytes.len();
    }

    /// Leaves `n` bytes of zero padding.
    pub(crate) fn pad(&mut self, n: usize) {
        self.off += n;
    }

    pub(crate) fn finish(self) {
        debug_assert_eq!(self.off, self.out.len());
    }
}

pub(crate) struct RecordReader<'a> {
    rest: &'a [u8],
}

impl<'a> RecordReader<'a> {
    /// Validates tag, then size. Nothing is parsed leniently.
    pub(crate) fn open(record: &'a [u8], format: &Format) -> Result<Self> {
        let checked = if record.len() < TAG_LEN || record[..TAG_LEN] != format.tag {
            Err(Error::InvalidStateTag)
        } else if record.len() != format.len {
            Err(Error::InvalidStateSize {
                expected: format.len,
                actual: record.len(),
            })
        } else {
            Ok(Self { rest: &record[TAG_LEN..] })
        };
        checked.inspect_err(|err| log::debug!("{}: rejecting state record: {}", format.name, err))
    }

    pub(crate) fn take_u32(&mut self) -> u32 {
        read_u32(self.take(4))
    }

    pub(crate) fn take_u64(&mut self) -> u64 {
        read_u64(self.take(8))
    }

    pub(crate) fn take(&mut self, n: usize) -> &'a [u8] {
        let (head, rest) = self.rest.split_at(n);
        self.rest = rest;
        head
    }
}
