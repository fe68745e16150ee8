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
use crate::math::mla;
use num_traits::{AsPrimitive, Float};

/// Keys cubic convolution kernel with free parameter `a`, support 2.
#[inline(always)]
pub fn cubic_convolution<V: Float + 'static>(d: V, a: V) -> V
where
    f32: AsPrimitive<V>,
{
    let modulo = d.abs();
    if modulo >= 2f32.as_() {
        return 0f32.as_();
    }
    let floatd = modulo * modulo;
    let triplet = floatd * modulo;
    if modulo <= 1f32.as_() {
        return mla(
            a + 2f32.as_(),
            triplet,
            mla(-(a + 3f32.as_()), floatd, 1f32.as_()),
        );
    }
    mla(
        a,
        triplet,
        mla(-5f32.as_() * a, floatd, mla(8f32.as_() * a, modulo, -4f32.as_() * a)),
    )
}

#[inline(always)]
pub fn bicubic_spline<V: Float + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    cubic_convolution(x, (-0.5f32).as_())
}

/// Sharper variant with `a = -1`.
#[inline(always)]
pub fn bicubic_high_freq_response<V: Float + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    cubic_convolution(x, (-1f32).as_())
}
