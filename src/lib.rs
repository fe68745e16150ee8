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
#![deny(deprecated)]
#![allow(clippy::too_many_arguments)]
//! Separable image resampling.
//!
//! Images are resized in two passes, horizontal into a work buffer and then
//! vertical into the destination, each split over interleaved partitions that
//! run in parallel. Kernels are taken from [`ResamplingFunction`] or supplied as
//! a [`ResamplingFilter`].
//!
//! ```
//! use pic_resample::{ImageSize, ImageStore, PixelLayout, ResamplingFunction, Scaler, Scaling};
//!
//! let pixels = vec![128u8; 16 * 16 * 3];
//! let source = ImageStore::from_slice(&pixels, 16, 16, PixelLayout::Rgb8).unwrap();
//! let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
//! let resized = scaler.resize(&source, ImageSize::new(8, 5)).unwrap();
//! assert_eq!(resized.as_bytes().len(), 8 * 5 * 3);
//! ```
mod convolve_naive_u8;
mod coordinator;
mod filter_weights;
mod image_size;
mod image_store;
mod math;
mod progress;
mod resample_error;
mod resize_job;
mod sampler;
mod saturate_narrow;
mod scaler;
mod support;
mod threading_policy;
mod unsafe_slice;
mod unsharp;

pub use coordinator::CancellationToken;
pub use image_size::{DimensionConstraint, ImageSize};
pub use image_store::{BufferStore, ImageStore, ImageStoreMut, PixelLayout, RowSource};
pub use math::*;
pub use progress::{ListenerId, ProgressListener};
pub use resample_error::{ResampleBufferMismatch, ResampleError};
pub use sampler::{ResamplingFilter, ResamplingFunction};
pub use scaler::{Scaler, Scaling};
pub use support::MIN_DESTINATION_SIZE;
pub use threading_policy::ThreadingPolicy;
pub use unsharp::{Sharpener, UnsharpFilter, UnsharpenMask};
