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
use crate::support::MAX_CHANNEL_VALUE;

pub(crate) trait SaturateNarrow<J> {
    fn saturate_narrow(self) -> J;
}

impl SaturateNarrow<u8> for f32 {
    /// Clamps into `[0, 255]` and rounds half up.
    #[inline(always)]
    fn saturate_narrow(self) -> u8 {
        if self < 0f32 {
            return 0;
        }
        if self > MAX_CHANNEL_VALUE {
            return u8::MAX;
        }
        (self + 0.5f32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_narrow_clamps() {
        let r: u8 = (-3.7f32).saturate_narrow();
        assert_eq!(r, 0);
        let r: u8 = 755.6532f32.saturate_narrow();
        assert_eq!(r, 255);
        let r: u8 = 255.0001f32.saturate_narrow();
        assert_eq!(r, 255);
    }

    #[test]
    fn saturate_narrow_rounds_half_up() {
        let r: u8 = 0.5f32.saturate_narrow();
        assert_eq!(r, 1);
        let r: u8 = 0.49f32.saturate_narrow();
        assert_eq!(r, 0);
        let r: u8 = 127.4999f32.saturate_narrow();
        assert_eq!(r, 127);
        let r: u8 = 254.5f32.saturate_narrow();
        assert_eq!(r, 255);
    }
}
