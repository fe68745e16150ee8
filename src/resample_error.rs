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
use std::time::Duration;
use thiserror::Error;

/// Buffer mismatch error description
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResampleBufferMismatch {
    pub expected: usize,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub slice_len: usize,
}

impl std::fmt::Display for ResampleBufferMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Image buffer len expected to be {} [w({})*h({})*channels({})] but received {}",
            self.expected, self.width, self.height, self.channels, self.slice_len,
        ))
    }
}

/// Error enumeration type
#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("Target size was {width}x{height} but must be at least 3x3")]
    InvalidArgument { width: usize, height: usize },
    #[error("One of image dimensions is 0, this should not happen")]
    ZeroImageDimensions,
    #[error("Input image larger than memory capabilities")]
    SourceImageIsTooLarge,
    #[error("Destination image larger than memory capabilities")]
    DestinationImageIsTooLarge,
    #[error("{0}")]
    BufferMismatch(ResampleBufferMismatch),
    #[error(
        "Destination image must be compatible with source image. Source image had {source_channels} channels destination image had {destination_channels} channels"
    )]
    ChannelMismatch {
        source_channels: usize,
        destination_channels: usize,
    },
    #[error("Filter support must be finite and positive but got {0}")]
    InvalidFilterSupport(f32),
    #[error("Weights of subsampling row {index} sum to zero, filter kernel is broken")]
    DegenerateWeights { index: usize },
    #[error("Filter kernel produced more than {capacity} contributors for subsampling row {index}")]
    KernelSupportExceeded { index: usize, capacity: usize },
    #[error("Timeout ({0:?}) exceeded while waiting for resample workers")]
    TimeoutExceeded(Duration),
    #[error("Resample worker {worker} failed: {source}")]
    WorkerFailure {
        worker: usize,
        #[source]
        source: Box<ResampleError>,
    },
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),
    #[error("Resampling was interrupted")]
    Interrupted,
    #[error("Resampling job was cancelled")]
    Cancelled,
    #[error("Unable to read source pixels: {0}")]
    PixelAccess(String),
    #[error("Unable to build resample thread pool: {0}")]
    ExecutionContext(#[from] rayon::ThreadPoolBuildError),
    #[error("There is no enough memory to allocate {0} bytes")]
    OutOfMemory(usize),
}

impl ResampleError {
    /// Returns error as int code
    #[inline]
    pub fn code(&self) -> usize {
        match self {
            ResampleError::InvalidArgument { .. } => 1,
            ResampleError::ZeroImageDimensions => 2,
            ResampleError::SourceImageIsTooLarge => 3,
            ResampleError::DestinationImageIsTooLarge => 4,
            ResampleError::BufferMismatch(_) => 5,
            ResampleError::ChannelMismatch { .. } => 6,
            ResampleError::InvalidFilterSupport(_) => 7,
            ResampleError::DegenerateWeights { .. } => 8,
            ResampleError::KernelSupportExceeded { .. } => 9,
            ResampleError::TimeoutExceeded(_) => 10,
            ResampleError::WorkerFailure { .. } => 11,
            ResampleError::WorkerPanicked(_) => 12,
            ResampleError::Interrupted => 13,
            ResampleError::Cancelled => 14,
            ResampleError::PixelAccess(_) => 15,
            ResampleError::ExecutionContext(_) => 16,
            ResampleError::OutOfMemory(_) => 17,
        }
    }

    /// Whether the failure stopped the job before it could finish, rather than
    /// a problem with the inputs.
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            ResampleError::TimeoutExceeded(_)
                | ResampleError::WorkerFailure { .. }
                | ResampleError::Interrupted
                | ResampleError::Cancelled
        )
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::resample_error::ResampleError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
