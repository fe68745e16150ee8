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
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

impl ImageSize {
    pub fn new(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }
}

/// Policy producing a destination size from a source size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DimensionConstraint {
    /// Exact target size, aspect ratio is not kept.
    Absolute(ImageSize),
    /// Both axes multiplied by the same factor.
    Relative(f32),
    /// Largest size with the source aspect ratio that fits into the box.
    /// Sources already inside the box are kept unless `enlarge` is set.
    FitWithin {
        max_width: usize,
        max_height: usize,
        enlarge: bool,
    },
    /// Fixed width, height follows the aspect ratio.
    Width(usize),
    /// Fixed height, width follows the aspect ratio.
    Height(usize),
}

impl DimensionConstraint {
    /// Resolves the destination size, every axis is rounded and kept at least 1.
    pub fn resolve(&self, source: ImageSize) -> ImageSize {
        let width = source.width as f64;
        let height = source.height as f64;
        match *self {
            DimensionConstraint::Absolute(size) => size,
            DimensionConstraint::Relative(factor) => {
                let factor = factor as f64;
                ImageSize::new(round_axis(width * factor), round_axis(height * factor))
            }
            DimensionConstraint::FitWithin {
                max_width,
                max_height,
                enlarge,
            } => {
                if source.width == 0 || source.height == 0 {
                    return ImageSize::new(max_width.max(1), max_height.max(1));
                }
                let scale = (max_width as f64 / width).min(max_height as f64 / height);
                if scale >= 1f64 && !enlarge {
                    return source;
                }
                ImageSize::new(round_axis(width * scale), round_axis(height * scale))
            }
            DimensionConstraint::Width(target) => {
                if source.width == 0 {
                    return ImageSize::new(target.max(1), source.height.max(1));
                }
                let scale = target as f64 / width;
                ImageSize::new(target.max(1), round_axis(height * scale))
            }
            DimensionConstraint::Height(target) => {
                if source.height == 0 {
                    return ImageSize::new(source.width.max(1), target.max(1));
                }
                let scale = target as f64 / height;
                ImageSize::new(round_axis(width * scale), target.max(1))
            }
        }
    }
}

#[inline]
fn round_axis(value: f64) -> usize {
    (value.round() as usize).max(1)
}
