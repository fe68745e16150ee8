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
use crate::filter_weights::{Contributor, SubsamplingTable};
use crate::resample_error::try_vec;
use crate::{ResampleError, ResamplingFilter};

/// Builds the subsampling table for one axis.
///
/// When downsampling the kernel is widened by the inverse scale so every source
/// sample still contributes. Taps that fall outside the source are reflected
/// back across the edge.
pub(crate) fn make_subsampling(
    filter: &ResamplingFilter,
    source_size: usize,
    destination_size: usize,
) -> Result<SubsamplingTable, ResampleError> {
    if source_size == 0 || destination_size == 0 {
        return Err(ResampleError::ZeroImageDimensions);
    }
    let support = filter.support as f64;
    if !support.is_finite() || support <= 0f64 {
        return Err(ResampleError::InvalidFilterSupport(filter.support));
    }

    let scale = destination_size as f64 / source_size as f64;
    let center_offset = 0.5f64 / scale;

    let (width, norm, num_contributors) = if scale < 1f64 {
        let width = support / scale;
        let norm = 1f64 / (width.ceil() / support);
        (width, Some(norm), (width * 2f64 + 2f64).floor() as usize)
    } else {
        (support, None, (support * 2f64 + 1f64).floor() as usize)
    };

    let table_size = destination_size
        .checked_mul(num_contributors)
        .ok_or(ResampleError::DestinationImageIsTooLarge)?;

    let mut contributors = try_vec![Contributor::default(); table_size];
    let mut counts = try_vec![0usize; destination_size];

    let source_len = source_size as i64;

    for (i, (row, count)) in contributors
        .chunks_exact_mut(num_contributors)
        .zip(counts.iter_mut())
        .enumerate()
    {
        // Distances are measured between pixel centers.
        let center = i as f64 / scale + center_offset - 0.5f64;
        let left = (center - width).floor() as i64;
        let right = (center + width).ceil() as i64;

        let mut n = 0usize;
        let mut weights_sum = 0f64;

        for j in left..=right {
            let distance = center - j as f64;
            let weight = match norm {
                Some(norm) => filter.weight((distance * norm) as f32),
                None => filter.weight(distance as f32),
            };
            if weight == 0f32 {
                continue;
            }

            let mut source = if j < 0 {
                -j
            } else if j >= source_len {
                2 * source_len - 1 - j
            } else {
                j
            };
            let mut weight = weight;
            if source < 0 || source >= source_len {
                weight = 0f32;
                source = source.clamp(0, source_len - 1);
            }

            if n >= num_contributors {
                return Err(ResampleError::KernelSupportExceeded {
                    index: i,
                    capacity: num_contributors,
                });
            }
            row[n] = Contributor::new(source as usize, weight);
            weights_sum += weight as f64;
            n += 1;
        }

        if weights_sum == 0f64 {
            return Err(ResampleError::DegenerateWeights { index: i });
        }

        for contributor in row.iter_mut().take(n) {
            contributor.weight = (contributor.weight as f64 / weights_sum) as f32;
        }
        *count = n;
    }

    Ok(SubsamplingTable::new(contributors, counts, num_contributors))
}
