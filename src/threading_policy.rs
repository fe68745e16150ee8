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
use crate::ResampleError;
use rayon::ThreadPool;
use std::num::NonZeroUsize;

/// How many partitions a resize job is split into.
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ThreadingPolicy {
    Single,
    Fixed(usize),
    /// One partition per available core.
    #[default]
    Adaptive,
}

impl ThreadingPolicy {
    pub fn thread_count(&self) -> usize {
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Fixed(thread_count) => (*thread_count).max(1),
            ThreadingPolicy::Adaptive => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// Where the extra partitions of a job run.
///
/// Partition 0 always runs on the calling thread, so a job with `N` partitions
/// needs `N - 1` pool threads.
pub(crate) enum ExecutionContext<'a> {
    Inline,
    Owned(ThreadPool),
    Shared(&'a ThreadPool),
}

impl<'a> ExecutionContext<'a> {
    pub(crate) fn resolve(
        threads: usize,
        shared: Option<&'a ThreadPool>,
    ) -> Result<ExecutionContext<'a>, ResampleError> {
        if threads <= 1 {
            return Ok(ExecutionContext::Inline);
        }
        if let Some(pool) = shared {
            return Ok(ExecutionContext::Shared(pool));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads - 1)
            .thread_name(|index| format!("resample-{index}"))
            .build()?;
        Ok(ExecutionContext::Owned(pool))
    }

    pub(crate) fn pool(&self) -> Option<&ThreadPool> {
        match self {
            ExecutionContext::Inline => None,
            ExecutionContext::Owned(pool) => Some(pool),
            ExecutionContext::Shared(pool) => Some(pool),
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, ExecutionContext::Owned(_))
    }
}
