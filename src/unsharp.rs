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
use crate::resample_error::try_vec;
use crate::{ImageStoreMut, ResampleError};

/// Post-resize sharpening strength.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum UnsharpenMask {
    #[default]
    None,
    Soft,
    Normal,
    VerySharp,
    Oversharpened,
}

impl UnsharpenMask {
    /// Amount handed to the [`Sharpener`].
    pub fn amount(&self) -> f32 {
        match self {
            UnsharpenMask::None => 0f32,
            UnsharpenMask::Soft => 0.15f32,
            UnsharpenMask::Normal => 0.3f32,
            UnsharpenMask::VerySharp => 0.45f32,
            UnsharpenMask::Oversharpened => 0.6f32,
        }
    }
}

/// Sharpens a resized image in place.
pub trait Sharpener {
    fn sharpen(&self, image: &mut ImageStoreMut<'_>, amount: f32) -> Result<(), ResampleError>;
}

/// Unsharp mask over a gaussian blur.
///
/// Channels whose difference to the blurred image is below `threshold` are kept,
/// the rest are pushed away from the blur by `4 * amount`. Alpha is never changed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnsharpFilter {
    pub radius: f32,
    pub threshold: u8,
}

impl Default for UnsharpFilter {
    fn default() -> Self {
        UnsharpFilter {
            radius: 2f32,
            threshold: 10,
        }
    }
}

impl UnsharpFilter {
    pub fn new(radius: f32, threshold: u8) -> UnsharpFilter {
        UnsharpFilter { radius, threshold }
    }

    fn make_kernel(&self) -> Vec<f32> {
        let r = self.radius.ceil().max(0f32) as i64;
        let sigma = self.radius / 3f32;
        let sigma22 = 2f32 * sigma * sigma;
        let radius2 = self.radius * self.radius;
        let mut kernel: Vec<f32> = (-r..=r)
            .map(|row| {
                let distance = (row * row) as f32;
                if distance > radius2 || sigma22 <= 0f32 {
                    if row == 0 { 1f32 } else { 0f32 }
                } else {
                    (-distance / sigma22).exp()
                }
            })
            .collect();
        let total: f32 = kernel.iter().sum();
        kernel.iter_mut().for_each(|w| *w /= total);
        kernel
    }
}

fn blur_axis(
    src: &[f32],
    dst: &mut [f32],
    kernel: &[f32],
    len: usize,
    lines: usize,
    step: usize,
    line_step: usize,
    channels: usize,
) {
    let r = (kernel.len() / 2) as i64;
    for line in 0..lines {
        let base = line * line_step;
        for i in 0..len {
            for c in 0..channels {
                let mut sum = 0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let j = (i as i64 + k as i64 - r).clamp(0, len as i64 - 1) as usize;
                    sum += src[base + j * step + c] * w;
                }
                dst[base + i * step + c] = sum;
            }
        }
    }
}

impl Sharpener for UnsharpFilter {
    fn sharpen(&self, image: &mut ImageStoreMut<'_>, amount: f32) -> Result<(), ResampleError> {
        if amount <= 0f32 {
            return Ok(());
        }
        let width = image.width;
        let height = image.height;
        let channels = image.channels();
        let color_channels = if channels == 4 { 3 } else { channels };
        let kernel = self.make_kernel();

        let pixels = image.as_bytes_mut();
        let mut original = try_vec![0f32; pixels.len()];
        for (dst, &src) in original.iter_mut().zip(pixels.iter()) {
            *dst = src as f32;
        }
        let mut horizontal = try_vec![0f32; pixels.len()];
        let mut blurred = try_vec![0f32; pixels.len()];
        let stride = width * channels;
        blur_axis(
            &original,
            &mut horizontal,
            &kernel,
            width,
            height,
            channels,
            stride,
            channels,
        );
        blur_axis(
            &horizontal,
            &mut blurred,
            &kernel,
            height,
            width,
            stride,
            channels,
            channels,
        );

        let a = 4f32 * amount;
        let threshold = self.threshold as i32;
        for (pixel, blur) in pixels
            .chunks_exact_mut(channels)
            .zip(blurred.chunks_exact(channels))
        {
            for (value, &blur) in pixel.iter_mut().zip(blur.iter()).take(color_channels) {
                let orig = *value as i32;
                let blur = (blur + 0.5f32) as i32;
                if (orig - blur).abs() >= threshold {
                    let sharpened = ((a + 1f32) * (orig - blur) as f32 + blur as f32) as i32;
                    *value = sharpened.clamp(0, 255) as u8;
                }
            }
        }
        Ok(())
    }
}
