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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pic_resample::{
    ImageSize, ImageStore, ImageStoreMut, PixelLayout, ResamplingFunction, Scaler, Scaling,
    ThreadingPolicy,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u16,
    pub src_height: u16,
    pub dst_width: u16,
    pub dst_height: u16,
    pub value: u8,
    pub filter: u8,
    pub threads: u8,
}

fuzz_target!(|data: SrcImage| {
    let sampler = ResamplingFunction::ALL[data.filter as usize % ResamplingFunction::ALL.len()];
    resize_rgba(
        data.value,
        data.src_width as usize,
        data.src_height as usize,
        data.dst_width as usize,
        data.dst_height as usize,
        sampler,
        data.threads as usize % 5,
    )
});

fn resize_rgba(
    value: u8,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    sampler: ResamplingFunction,
    threads: usize,
) {
    if src_width == 0
        || src_width > 2000
        || src_height == 0
        || src_height > 2000
        || dst_width > 512
        || dst_height > 512
    {
        return;
    }

    let src_data = vec![value; src_width * src_height * 4];

    let store = ImageStore::from_slice(&src_data, src_width, src_height, PixelLayout::Rgba8).unwrap();
    let mut scaler = Scaler::new(sampler);
    scaler.set_threading_policy(match threads {
        0 => ThreadingPolicy::Adaptive,
        1 => ThreadingPolicy::Single,
        n => ThreadingPolicy::Fixed(n),
    });
    let target = ImageSize::new(dst_width, dst_height);
    if dst_width < 3 || dst_height < 3 {
        assert!(scaler.resize(&store, target).is_err());
        return;
    }
    let mut destination = ImageStoreMut::alloc(dst_width, dst_height, PixelLayout::Rgba8).unwrap();
    scaler.resize_into(&store, target, &mut destination).unwrap();
    assert!(destination.as_bytes().iter().all(|&v| v == value));
}
