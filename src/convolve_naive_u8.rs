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
use crate::PixelLayout;
use crate::filter_weights::SubsamplingTable;
use crate::saturate_narrow::SaturateNarrow;
use crate::unsafe_slice::UnsafeSlice;

pub(crate) type HorizontalRowHandler = fn(&SubsamplingTable, &[u8], &mut [u8]);

pub(crate) type VerticalColumnHandler =
    fn(&SubsamplingTable, usize, &[u8], usize, &UnsafeSlice<'_, u8>, usize);

/// Convolves one source row into one work row.
///
/// `dst` holds `destination_size * CN` bytes.
pub(crate) fn convolve_horizontal_row<const CN: usize>(
    table: &SubsamplingTable,
    src: &[u8],
    dst: &mut [u8],
) {
    for (x, dst) in dst.chunks_exact_mut(CN).enumerate() {
        let mut sums = [0f32; CN];
        for contributor in table.row(x) {
            let px = contributor.source * CN;
            for (sum, &v) in sums.iter_mut().zip(src[px..px + CN].iter()) {
                *sum += v as f32 * contributor.weight;
            }
        }
        for (dst, sum) in dst.iter_mut().zip(sums) {
            *dst = sum.saturate_narrow();
        }
    }
}

/// Convolves destination column `x` out of the work buffer.
///
/// Writes only bytes of column `x`, so partitions owning different columns may
/// share `dst`.
pub(crate) fn convolve_vertical_column<const CN: usize>(
    table: &SubsamplingTable,
    x: usize,
    work: &[u8],
    work_stride: usize,
    dst: &UnsafeSlice<'_, u8>,
    dst_stride: usize,
) {
    let px = x * CN;
    for y in 0..table.destination_size() {
        let mut sums = [0f32; CN];
        for contributor in table.row(y) {
            let offset = contributor.source * work_stride + px;
            for (sum, &v) in sums.iter_mut().zip(work[offset..offset + CN].iter()) {
                *sum += v as f32 * contributor.weight;
            }
        }
        let dst_offset = y * dst_stride + px;
        assert!(dst_offset + CN <= dst.len());
        for (c, sum) in sums.into_iter().enumerate() {
            unsafe {
                dst.write(dst_offset + c, sum.saturate_narrow());
            }
        }
    }
}

pub(crate) fn horizontal_handler(layout: PixelLayout) -> HorizontalRowHandler {
    match layout {
        PixelLayout::Gray8 | PixelLayout::Gray16 => convolve_horizontal_row::<1>,
        PixelLayout::Rgb8 => convolve_horizontal_row::<3>,
        PixelLayout::Rgba8 => convolve_horizontal_row::<4>,
    }
}

pub(crate) fn vertical_handler(layout: PixelLayout) -> VerticalColumnHandler {
    match layout {
        PixelLayout::Gray8 | PixelLayout::Gray16 => convolve_vertical_column::<1>,
        PixelLayout::Rgb8 => convolve_vertical_column::<3>,
        PixelLayout::Rgba8 => convolve_vertical_column::<4>,
    }
}
