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
use crate::convolve_naive_u8::{horizontal_handler, vertical_handler};
use crate::coordinator::{CancellationToken, Coordinator};
use crate::math::weights::make_subsampling;
use crate::resample_error::try_vec;
use crate::support::MIN_DESTINATION_SIZE;
use crate::unsafe_slice::UnsafeSlice;
use crate::{
    ImageSize, PixelLayout, ResampleBufferMismatch, ResampleError, ResamplingFilter, RowSource,
};
use rayon::ThreadPool;
use std::time::Duration;
use tracing::debug;

/// Everything one resize call needs, built fresh for every call.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ResizeJob {
    pub source_size: ImageSize,
    pub destination_size: ImageSize,
    pub layout: PixelLayout,
    pub filter: ResamplingFilter,
    pub threads: usize,
    pub timeout: Option<Duration>,
}

impl ResizeJob {
    pub(crate) fn new(
        source_size: ImageSize,
        destination_size: ImageSize,
        layout: PixelLayout,
        filter: ResamplingFilter,
        threads: usize,
        timeout: Option<Duration>,
    ) -> Result<ResizeJob, ResampleError> {
        if destination_size.width < MIN_DESTINATION_SIZE
            || destination_size.height < MIN_DESTINATION_SIZE
        {
            return Err(ResampleError::InvalidArgument {
                width: destination_size.width,
                height: destination_size.height,
            });
        }
        if source_size.width == 0 || source_size.height == 0 {
            return Err(ResampleError::ZeroImageDimensions);
        }
        Ok(ResizeJob {
            source_size,
            destination_size,
            layout,
            filter,
            threads: threads.max(1),
            timeout,
        })
    }

    #[inline]
    pub(crate) fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Runs both passes, `destination` receives `dst_w * dst_h * channels` bytes.
    pub(crate) fn execute<S: RowSource + ?Sized>(
        &self,
        source: &S,
        destination: &mut [u8],
        shared: Option<&ThreadPool>,
        interrupt: Option<&CancellationToken>,
        notify: &mut dyn FnMut(f32),
    ) -> Result<(), ResampleError> {
        let channels = self.channels();
        let src_width = self.source_size.width;
        let src_height = self.source_size.height;
        let dst_width = self.destination_size.width;
        let dst_height = self.destination_size.height;
        let dst_stride = dst_width * channels;

        if destination.len() != dst_stride * dst_height {
            return Err(ResampleError::BufferMismatch(ResampleBufferMismatch {
                expected: dst_stride * dst_height,
                width: dst_width,
                height: dst_height,
                channels,
                slice_len: destination.len(),
            }));
        }

        debug!(
            src_width,
            src_height,
            dst_width,
            dst_height,
            channels,
            support = self.filter.support,
            threads = self.threads,
            "resize started"
        );

        let horizontal = make_subsampling(&self.filter, src_width, dst_width)?;
        let vertical = make_subsampling(&self.filter, src_height, dst_height)?;

        let work_stride = dst_stride;
        let work_len = work_stride
            .checked_mul(src_height)
            .ok_or(ResampleError::DestinationImageIsTooLarge)?;
        let mut work = try_vec![0u8; work_len];

        let mut coordinator = Coordinator::new(
            self.threads,
            shared,
            interrupt,
            self.timeout,
            src_height + dst_width,
            notify,
        )?;
        let partitions = coordinator.partitions();

        let row_len = src_width * channels;
        let mut buckets: Vec<Vec<(usize, &mut [u8])>> =
            (0..partitions).map(|_| Vec::new()).collect();
        for (y, row) in work.chunks_exact_mut(work_stride).enumerate() {
            buckets[y % partitions].push((y, row));
        }

        let horizontal_row = horizontal_handler(self.layout);
        coordinator.run_pass("horizontal", buckets, |_, rows, progress| {
            let mut source_row = try_vec![0u8; row_len];
            for (y, work_row) in rows {
                progress.checkpoint()?;
                source.read_row(y, &mut source_row)?;
                horizontal_row(&horizontal, &source_row, work_row);
                progress.step();
            }
            Ok(())
        })?;

        let work = work.as_slice();
        let output = UnsafeSlice::new(destination);
        let vertical_column = vertical_handler(self.layout);
        coordinator.run_pass("vertical", vec![(); partitions], |partition, _, progress| {
            for x in partition.indices(dst_width) {
                progress.checkpoint()?;
                vertical_column(&vertical, x, work, work_stride, &output, dst_stride);
                progress.step();
            }
            Ok(())
        })?;

        debug!(dst_width, dst_height, "resize finished");
        Ok(())
    }
}
