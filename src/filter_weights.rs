/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
/// One tap of a subsampling row.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct Contributor {
    pub source: usize,
    pub weight: f32,
}

impl Contributor {
    pub(crate) fn new(source: usize, weight: f32) -> Contributor {
        Contributor { source, weight }
    }
}

/// Per-axis table mapping every destination index to the source samples it is
/// built from.
///
/// Rows are stored back to back with a fixed stride of `num_contributors`,
/// `counts[i]` holds how many leading slots of row `i` are live.
#[derive(Debug, Clone)]
pub(crate) struct SubsamplingTable {
    pub contributors: Vec<Contributor>,
    pub counts: Vec<usize>,
    pub num_contributors: usize,
}

impl SubsamplingTable {
    pub(crate) fn new(
        contributors: Vec<Contributor>,
        counts: Vec<usize>,
        num_contributors: usize,
    ) -> SubsamplingTable {
        SubsamplingTable {
            contributors,
            counts,
            num_contributors,
        }
    }

    #[inline(always)]
    pub(crate) fn row(&self, index: usize) -> &[Contributor] {
        let start = index * self.num_contributors;
        &self.contributors[start..start + self.counts[index]]
    }

    #[inline]
    pub(crate) fn destination_size(&self) -> usize {
        self.counts.len()
    }
}
