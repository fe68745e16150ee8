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
use crate::math::sinc::Sinc;
use num_traits::{AsPrimitive, Float};

/// Lanczos window of order `a`.
///
/// Zero crossings at non-zero integers are returned as exact zeros, the
/// subsampling builder relies on that to drop those contributors.
#[inline(always)]
pub fn lanczos_sinc<V: Float + Sinc + 'static>(x: V, a: V) -> V
where
    f32: AsPrimitive<V>,
{
    if x == 0f32.as_() {
        return 1f32.as_();
    }
    if x.abs() >= a || x.fract() == 0f32.as_() {
        return 0f32.as_();
    }
    x.sinc() * (x / a).sinc()
}

#[inline(always)]
pub fn lanczos2<V: Float + Sinc + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    lanczos_sinc(x, 2f32.as_())
}

#[inline(always)]
pub fn lanczos3<V: Float + Sinc + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    lanczos_sinc(x, 3f32.as_())
}

#[inline(always)]
pub fn lanczos4<V: Float + Sinc + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    lanczos_sinc(x, 4f32.as_())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanczos3_values() {
        assert_eq!(lanczos3(0f32), 1f32);
        assert_eq!(lanczos3(1f32), 0f32);
        assert_eq!(lanczos3(-2f32), 0f32);
        assert_eq!(lanczos3(3f32), 0f32);
        assert_eq!(lanczos3(3.5f32), 0f32);
        let expected = {
            let px = std::f32::consts::PI * 0.5f32;
            let px3 = px / 3f32;
            (px.sin() / px) * (px3.sin() / px3)
        };
        assert!((lanczos3(0.5f32) - expected).abs() < 1e-5);
        assert!((lanczos3(-0.5f32) - expected).abs() < 1e-5);
    }

    #[test]
    fn lanczos_has_negative_lobe() {
        assert!(lanczos3(1.5f32) < 0f32);
        assert!(lanczos2(1.5f32) < 0f32);
        assert!(lanczos4(1.5f32) < 0f32);
    }
}
