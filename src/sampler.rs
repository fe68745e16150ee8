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
use crate::math::{
    b_spline, bell, bicubic_high_freq_response, bicubic_spline, box_filter, catmull_rom,
    hermite_spline, lanczos2, lanczos3, lanczos4, mitchell_netravalli, triangle,
};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ResamplingFunction {
    Box,
    Bilinear,
    Hermite,
    Bell,
    BSpline,
    MitchellNetravalli,
    CatmullRom,
    Bicubic,
    BicubicHighFreqResponse,
    Lanczos2,
    #[default]
    Lanczos3,
    Lanczos4,
}

/// Kernel used to build subsampling tables.
///
/// `kernel` must return 0 for every `|x| > support` and be free of side effects,
/// it is evaluated concurrently from several threads.
#[derive(Debug, Copy, Clone)]
pub struct ResamplingFilter {
    pub kernel: fn(f32) -> f32,
    pub support: f32,
}

impl ResamplingFilter {
    /// Creates a custom filter from a weight function and its support radius
    pub fn new(kernel: fn(f32) -> f32, support: f32) -> ResamplingFilter {
        ResamplingFilter { kernel, support }
    }

    #[inline(always)]
    pub fn weight(&self, x: f32) -> f32 {
        (self.kernel)(x)
    }
}

impl ResamplingFunction {
    pub const ALL: [ResamplingFunction; 12] = [
        ResamplingFunction::Box,
        ResamplingFunction::Bilinear,
        ResamplingFunction::Hermite,
        ResamplingFunction::Bell,
        ResamplingFunction::BSpline,
        ResamplingFunction::MitchellNetravalli,
        ResamplingFunction::CatmullRom,
        ResamplingFunction::Bicubic,
        ResamplingFunction::BicubicHighFreqResponse,
        ResamplingFunction::Lanczos2,
        ResamplingFunction::Lanczos3,
        ResamplingFunction::Lanczos4,
    ];

    pub fn get_resampling_filter(&self) -> ResamplingFilter {
        match self {
            ResamplingFunction::Box => ResamplingFilter::new(box_filter, 0.5f32),
            ResamplingFunction::Bilinear => ResamplingFilter::new(triangle, 1f32),
            ResamplingFunction::Hermite => ResamplingFilter::new(hermite_spline, 1f32),
            ResamplingFunction::Bell => ResamplingFilter::new(bell, 1.5f32),
            ResamplingFunction::BSpline => ResamplingFilter::new(b_spline, 2f32),
            ResamplingFunction::MitchellNetravalli => {
                ResamplingFilter::new(mitchell_netravalli, 2f32)
            }
            ResamplingFunction::CatmullRom => ResamplingFilter::new(catmull_rom, 2f32),
            ResamplingFunction::Bicubic => ResamplingFilter::new(bicubic_spline, 2f32),
            ResamplingFunction::BicubicHighFreqResponse => {
                ResamplingFilter::new(bicubic_high_freq_response, 2f32)
            }
            ResamplingFunction::Lanczos2 => ResamplingFilter::new(lanczos2, 2f32),
            ResamplingFunction::Lanczos3 => ResamplingFilter::new(lanczos3, 3f32),
            ResamplingFunction::Lanczos4 => ResamplingFilter::new(lanczos4, 4f32),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ResamplingFunction::Box => "box",
            ResamplingFunction::Bilinear => "bilinear",
            ResamplingFunction::Hermite => "hermite",
            ResamplingFunction::Bell => "bell",
            ResamplingFunction::BSpline => "bspline",
            ResamplingFunction::MitchellNetravalli => "mitchell",
            ResamplingFunction::CatmullRom => "catmull-rom",
            ResamplingFunction::Bicubic => "bicubic",
            ResamplingFunction::BicubicHighFreqResponse => "bicubic-high-freq",
            ResamplingFunction::Lanczos2 => "lanczos2",
            ResamplingFunction::Lanczos3 => "lanczos3",
            ResamplingFunction::Lanczos4 => "lanczos4",
        }
    }
}

impl From<ResamplingFunction> for ResamplingFilter {
    fn from(value: ResamplingFunction) -> Self {
        value.get_resampling_filter()
    }
}

impl Display for ResamplingFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResamplingFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        ResamplingFunction::ALL
            .into_iter()
            .find(|function| function.name() == lowered)
            .or(match lowered.as_str() {
                "triangle" => Some(ResamplingFunction::Bilinear),
                "mitchell-netravalli" => Some(ResamplingFunction::MitchellNetravalli),
                "b-spline" => Some(ResamplingFunction::BSpline),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown resampling filter `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_vanish_outside_support() {
        for function in ResamplingFunction::ALL {
            let filter = function.get_resampling_filter();
            for i in 1..=40 {
                let x = filter.support + i as f32 * 0.05f32;
                assert_eq!(filter.weight(x), 0f32, "{function} at {x}");
                assert_eq!(filter.weight(-x), 0f32, "{function} at -{x}");
            }
            assert!(filter.weight(0f32) > 0f32, "{function} at 0");
        }
    }

    #[test]
    fn lanczos3_is_default() {
        let function = ResamplingFunction::default();
        assert_eq!(function, ResamplingFunction::Lanczos3);
        assert_eq!(function.get_resampling_filter().support, 3f32);
        assert_eq!(
            ResamplingFunction::Bilinear.get_resampling_filter().support,
            1f32
        );
    }

    #[test]
    fn parses_names() {
        for function in ResamplingFunction::ALL {
            let parsed: ResamplingFunction = function.to_string().parse().unwrap();
            assert_eq!(parsed, function);
        }
        assert_eq!(
            "Triangle".parse::<ResamplingFunction>(),
            Ok(ResamplingFunction::Bilinear)
        );
        assert!("gaussian".parse::<ResamplingFunction>().is_err());
    }

    #[test]
    fn custom_filter_weight() {
        fn flat(x: f32) -> f32 {
            if x.abs() <= 1f32 { 0.5f32 } else { 0f32 }
        }
        let filter = ResamplingFilter::new(flat, 1f32);
        assert_eq!(filter.weight(0.3f32), 0.5f32);
        assert_eq!(filter.weight(1.3f32), 0f32);
    }
}
