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
use crate::{ImageSize, ResampleBufferMismatch, ResampleError};
use std::borrow::Cow;
use std::fmt::Debug;

/// Interleaved 8-bit layouts the engine works on.
///
/// `Gray16` holds the same single 8-bit channel as `Gray8`, it only records that
/// the image came from a 16-bit gray source so the result can be widened back
/// with [`ImageStoreMut::to_u16_plane`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    #[default]
    Gray8,
    Gray16,
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Gray8 | PixelLayout::Gray16 => 1,
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// Pixel access used by the horizontal pass.
///
/// `read_row` fills `row` with `width * channels` bytes of row `y`. It is called
/// concurrently for different rows.
pub trait RowSource: Sync {
    fn size(&self) -> ImageSize;

    fn layout(&self) -> PixelLayout;

    fn read_row(&self, y: usize, row: &mut [u8]) -> Result<(), ResampleError>;
}

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

fn checked_len(
    width: usize,
    height: usize,
    layout: PixelLayout,
    too_large: ResampleError,
) -> Result<usize, ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::ZeroImageDimensions);
    }
    width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(layout.channels()))
        .ok_or(too_large)
}

fn validate_buffer(
    len: usize,
    width: usize,
    height: usize,
    layout: PixelLayout,
    too_large: ResampleError,
) -> Result<(), ResampleError> {
    let expected = checked_len(width, height, layout, too_large)?;
    if expected != len {
        return Err(ResampleError::BufferMismatch(ResampleBufferMismatch {
            expected,
            width,
            height,
            channels: layout.channels(),
            slice_len: len,
        }));
    }
    Ok(())
}

/// Source image, borrowed or owned.
#[derive(Debug, Clone)]
pub struct ImageStore<'a> {
    buffer: Cow<'a, [u8]>,
    pub layout: PixelLayout,
    pub width: usize,
    pub height: usize,
}

impl ImageStore<'static> {
    pub fn new(
        buffer: Vec<u8>,
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<ImageStore<'static>, ResampleError> {
        validate_buffer(
            buffer.len(),
            width,
            height,
            layout,
            ResampleError::SourceImageIsTooLarge,
        )?;
        Ok(ImageStore {
            buffer: Cow::Owned(buffer),
            layout,
            width,
            height,
        })
    }
}

impl<'a> ImageStore<'a> {
    pub fn from_slice(
        slice_ref: &'a [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<ImageStore<'a>, ResampleError> {
        validate_buffer(
            slice_ref.len(),
            width,
            height,
            layout,
            ResampleError::SourceImageIsTooLarge,
        )?;
        Ok(ImageStore {
            buffer: Cow::Borrowed(slice_ref),
            layout,
            width,
            height,
        })
    }

    pub fn get_size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.channels()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl RowSource for ImageStore<'_> {
    fn size(&self) -> ImageSize {
        self.get_size()
    }

    fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn read_row(&self, y: usize, row: &mut [u8]) -> Result<(), ResampleError> {
        copy_row(self.as_bytes(), self.stride(), self.height, y, row)
    }
}

fn copy_row(
    buffer: &[u8],
    stride: usize,
    height: usize,
    y: usize,
    row: &mut [u8],
) -> Result<(), ResampleError> {
    if y >= height || row.len() != stride {
        return Err(ResampleError::PixelAccess(format!(
            "row {y} of length {} requested from image with {height} rows of {stride} bytes",
            row.len()
        )));
    }
    row.copy_from_slice(&buffer[y * stride..(y + 1) * stride]);
    Ok(())
}

/// Destination image, either a caller slice that gets overwritten or an owned
/// allocation.
#[derive(Debug)]
pub struct ImageStoreMut<'a> {
    pub(crate) buffer: BufferStore<'a, u8>,
    pub layout: PixelLayout,
    pub width: usize,
    pub height: usize,
}

impl ImageStoreMut<'static> {
    pub fn new(
        buffer: Vec<u8>,
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<ImageStoreMut<'static>, ResampleError> {
        validate_buffer(
            buffer.len(),
            width,
            height,
            layout,
            ResampleError::DestinationImageIsTooLarge,
        )?;
        Ok(ImageStoreMut {
            buffer: BufferStore::Owned(buffer),
            layout,
            width,
            height,
        })
    }

    pub fn alloc(
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<ImageStoreMut<'static>, ResampleError> {
        let len = checked_len(
            width,
            height,
            layout,
            ResampleError::DestinationImageIsTooLarge,
        )?;
        let buffer = try_vec![0u8; len];
        Ok(ImageStoreMut {
            buffer: BufferStore::Owned(buffer),
            layout,
            width,
            height,
        })
    }
}

impl<'a> ImageStoreMut<'a> {
    pub fn from_slice(
        slice_ref: &'a mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<ImageStoreMut<'a>, ResampleError> {
        validate_buffer(
            slice_ref.len(),
            width,
            height,
            layout,
            ResampleError::DestinationImageIsTooLarge,
        )?;
        Ok(ImageStoreMut {
            buffer: BufferStore::Borrowed(slice_ref),
            layout,
            width,
            height,
        })
    }

    pub fn get_size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.channels()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.borrow()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.borrow_mut()
    }

    /// Moves the pixels out, a borrowed buffer is copied.
    pub fn into_vec(self) -> Vec<u8> {
        match self.buffer {
            BufferStore::Borrowed(slice) => slice.to_vec(),
            BufferStore::Owned(vec) => vec,
        }
    }

    /// Widens every 8-bit sample to 16 bits, `v * 257` maps 255 onto 65535.
    pub fn to_u16_plane(&self) -> Vec<u16> {
        self.as_bytes().iter().map(|&v| v as u16 * 257).collect()
    }
}

impl RowSource for ImageStoreMut<'_> {
    fn size(&self) -> ImageSize {
        self.get_size()
    }

    fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn read_row(&self, y: usize, row: &mut [u8]) -> Result<(), ResampleError> {
        copy_row(self.as_bytes(), self.stride(), self.height, y, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        let data = vec![0u8; 10];
        match ImageStore::from_slice(&data, 2, 2, PixelLayout::Rgb8) {
            Err(ResampleError::BufferMismatch(mismatch)) => {
                assert_eq!(mismatch.expected, 12);
                assert_eq!(mismatch.slice_len, 10);
                assert_eq!(mismatch.channels, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            ImageStoreMut::alloc(0, 4, PixelLayout::Gray8),
            Err(ResampleError::ZeroImageDimensions)
        ));
        assert!(matches!(
            ImageStore::new(Vec::new(), 3, 0, PixelLayout::Gray8),
            Err(ResampleError::ZeroImageDimensions)
        ));
    }

    #[test]
    fn reads_rows() {
        let data: Vec<u8> = (0..24).collect();
        let store = ImageStore::from_slice(&data, 2, 3, PixelLayout::Rgba8).unwrap();
        let mut row = vec![0u8; 8];
        store.read_row(1, &mut row).unwrap();
        assert_eq!(row, (8..16).collect::<Vec<u8>>());
        assert!(matches!(
            store.read_row(3, &mut row),
            Err(ResampleError::PixelAccess(_))
        ));
    }

    #[test]
    fn widens_gray16() {
        let store = ImageStoreMut::new(vec![0, 1, 255], 3, 1, PixelLayout::Gray16).unwrap();
        assert_eq!(store.to_u16_plane(), vec![0, 257, 65535]);
        assert_eq!(store.channels(), 1);
    }

    #[test]
    fn borrowed_destination_writes_through() {
        let mut data = vec![0u8; 6];
        {
            let mut store = ImageStoreMut::from_slice(&mut data, 2, 1, PixelLayout::Rgb8).unwrap();
            store.as_bytes_mut()[4] = 9;
        }
        assert_eq!(data[4], 9);
    }
}
