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

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use image::{DynamicImage, GrayImage, ImageBuffer, ImageReader, Luma, RgbImage, RgbaImage};
use pic_resample::{
    DimensionConstraint, ImageSize, ImageStore, ImageStoreMut, PixelLayout, ResamplingFunction,
    Scaler, Scaling, ThreadingPolicy, UnsharpenMask,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resample")]
#[command(author, version, about = "Resize an image with separable convolution filters")]
struct Cli {
    /// Image to read
    input: PathBuf,

    /// Where the result is written, format follows the extension
    output: PathBuf,

    /// Target width, height follows the aspect ratio when omitted
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Target height, width follows the aspect ratio when omitted
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Scale factor, used when neither width nor height is given
    #[arg(short, long)]
    scale: Option<f32>,

    /// Never enlarge, fit into width x height keeping the aspect ratio
    #[arg(long)]
    fit: bool,

    /// Resampling filter
    #[arg(short, long, default_value = "lanczos3")]
    filter: ResamplingFunction,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Worker wait budget in milliseconds (0 = unbounded)
    #[arg(long, default_value = "0")]
    timeout_ms: u64,

    /// Sharpening applied after the resize
    #[arg(long, value_enum, default_value = "none")]
    sharpen: Sharpen,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum Sharpen {
    None,
    Soft,
    Normal,
    VerySharp,
    Oversharpened,
}

impl From<Sharpen> for UnsharpenMask {
    fn from(value: Sharpen) -> Self {
        match value {
            Sharpen::None => UnsharpenMask::None,
            Sharpen::Soft => UnsharpenMask::Soft,
            Sharpen::Normal => UnsharpenMask::Normal,
            Sharpen::VerySharp => UnsharpenMask::VerySharp,
            Sharpen::Oversharpened => UnsharpenMask::Oversharpened,
        }
    }
}

impl Cli {
    fn constraint(&self) -> Result<DimensionConstraint> {
        Ok(match (self.width, self.height, self.scale) {
            (Some(max_width), Some(max_height), _) if self.fit => DimensionConstraint::FitWithin {
                max_width,
                max_height,
                enlarge: false,
            },
            (Some(width), Some(height), _) => {
                DimensionConstraint::Absolute(ImageSize::new(width, height))
            }
            (Some(width), None, _) => DimensionConstraint::Width(width),
            (None, Some(height), _) => DimensionConstraint::Height(height),
            (None, None, Some(scale)) => DimensionConstraint::Relative(scale),
            (None, None, None) => bail!("one of --width, --height or --scale is required"),
        })
    }
}

/// Collapses any decoded layout into one the scaler accepts.
fn normalize(img: &DynamicImage) -> (PixelLayout, Vec<u8>) {
    match img {
        DynamicImage::ImageLuma8(gray) => (PixelLayout::Gray8, gray.as_raw().clone()),
        DynamicImage::ImageLuma16(_) => (PixelLayout::Gray16, img.to_luma8().into_raw()),
        image if image.color().has_alpha() => (PixelLayout::Rgba8, image.to_rgba8().into_raw()),
        image => (PixelLayout::Rgb8, image.to_rgb8().into_raw()),
    }
}

fn save(result: ImageStoreMut<'static>, path: &Path) -> Result<()> {
    let width = u32::try_from(result.width)?;
    let height = u32::try_from(result.height)?;
    match result.layout {
        PixelLayout::Gray8 => GrayImage::from_raw(width, height, result.into_vec())
            .context("gray buffer size")?
            .save(path)?,
        PixelLayout::Gray16 => {
            ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width, height, result.to_u16_plane())
                .context("gray16 buffer size")?
                .save(path)?
        }
        PixelLayout::Rgb8 => RgbImage::from_raw(width, height, result.into_vec())
            .context("rgb buffer size")?
            .save(path)?,
        PixelLayout::Rgba8 => RgbaImage::from_raw(width, height, result.into_vec())
            .context("rgba buffer size")?
            .save(path)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let img = ImageReader::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", cli.input.display()))?;

    let (layout, bytes) = normalize(&img);
    let store = ImageStore::new(bytes, img.width() as usize, img.height() as usize, layout)?;

    let mut scaler = Scaler::new(cli.filter);
    scaler.set_threading_policy(match cli.threads {
        0 => ThreadingPolicy::Adaptive,
        1 => ThreadingPolicy::Single,
        n => ThreadingPolicy::Fixed(n),
    });
    scaler.set_timeout(Duration::from_millis(cli.timeout_ms));
    scaler.set_unsharpen_mask(cli.sharpen.into());
    scaler.add_progress_listener(|fraction: f32| debug!(progress = fraction));

    let constraint = cli.constraint()?;
    let target = constraint.resolve(store.get_size());
    info!(
        "Resizing {}x{} {:?} to {}x{} with {}",
        store.width, store.height, layout, target.width, target.height, cli.filter
    );

    let start_time = Instant::now();
    let resized = scaler.resize(&store, target)?;
    info!("Resized in {:?}", start_time.elapsed());

    save(resized, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    Ok(())
}
