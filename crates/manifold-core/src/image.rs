//! Image - multi-channel boundary type
//!
//! `Image` is what filter callers hand in and get back: an interleaved
//! multi-channel raster with 8-bit, 16-bit or `f32` samples. Internally the
//! filter works on planar [`FImg`](crate::FImg) channels, so the important
//! operations here are channel split and merge with the depth conversions
//! that go with them: integer samples are rounded (`v + 0.5`) and clamped
//! to the depth maximum on merge, `f32` samples pass through untouched.

use crate::error::{Error, Result};
use crate::fimg::FImg;

/// Sample depth of an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDepth {
    /// 8-bit unsigned samples
    U8,
    /// 16-bit unsigned samples
    U16,
    /// 32-bit floating-point samples
    F32,
}

impl ImageDepth {
    /// Scale factor that maps this depth's full sample range onto [0, 1]
    ///
    /// Used to normalize integer joint/guide channels; `f32` images are
    /// assumed to already be in range and get a normalizer of 1.
    pub fn normalizer(self) -> f32 {
        match self {
            ImageDepth::U8 => 1.0 / 255.0,
            ImageDepth::U16 => 1.0 / 65535.0,
            ImageDepth::F32 => 1.0,
        }
    }
}

/// Interleaved sample storage
#[derive(Debug, Clone, PartialEq)]
enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

/// Multi-channel raster image
///
/// Samples are interleaved in row-major order: the sample for channel `c`
/// of the pixel at (x, y) is at index `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u32,
    samples: Samples,
}

impl Image {
    fn check_geometry(width: u32, height: u32, channels: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels == 0 {
            return Err(Error::InvalidParameter(
                "channel count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn check_len(width: u32, height: u32, channels: u32, len: usize) -> Result<()> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if len != expected {
            return Err(Error::InvalidParameter(format!(
                "sample count {} doesn't match {}x{}x{} = {}",
                len, width, height, channels, expected
            )));
        }
        Ok(())
    }

    /// Create an image from interleaved 8-bit samples
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the sample count
    /// doesn't match `width * height * channels`.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::check_geometry(width, height, channels)?;
        Self::check_len(width, height, channels, data.len())?;
        Ok(Image {
            width,
            height,
            channels,
            samples: Samples::U8(data),
        })
    }

    /// Create an image from interleaved 16-bit samples
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the sample count
    /// doesn't match `width * height * channels`.
    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Result<Self> {
        Self::check_geometry(width, height, channels)?;
        Self::check_len(width, height, channels, data.len())?;
        Ok(Image {
            width,
            height,
            channels,
            samples: Samples::U16(data),
        })
    }

    /// Create an image from interleaved floating-point samples
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the sample count
    /// doesn't match `width * height * channels`.
    pub fn from_f32(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        Self::check_geometry(width, height, channels)?;
        Self::check_len(width, height, channels, data.len())?;
        Ok(Image {
            width,
            height,
            channels,
            samples: Samples::F32(data),
        })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get the sample depth
    pub fn depth(&self) -> ImageDepth {
        match self.samples {
            Samples::U8(_) => ImageDepth::U8,
            Samples::U16(_) => ImageDepth::U16,
            Samples::F32(_) => ImageDepth::F32,
        }
    }

    /// Get the raw sample value for channel `c` of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates or channel are out
    /// of range.
    pub fn get_sample(&self, x: u32, y: u32, c: u32) -> Result<f32> {
        if x >= self.width || y >= self.height || c >= self.channels {
            let len = (self.width as usize) * (self.height as usize) * (self.channels as usize);
            return Err(Error::IndexOutOfBounds {
                index: ((y as usize) * (self.width as usize) + (x as usize))
                    * (self.channels as usize)
                    + (c as usize),
                len,
            });
        }

        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
            + (c as usize);
        Ok(match &self.samples {
            Samples::U8(d) => d[idx] as f32,
            Samples::U16(d) => d[idx] as f32,
            Samples::F32(d) => d[idx],
        })
    }

    /// Split into planar single-channel buffers with raw sample values
    ///
    /// Integer samples are widened to `f32` without scaling; apply
    /// [`ImageDepth::normalizer`] separately when a [0, 1] range is needed.
    pub fn to_channels(&self) -> Vec<FImg> {
        let w = self.width as usize;
        let h = self.height as usize;
        let cn = self.channels as usize;

        let mut channels: Vec<FImg> = (0..cn)
            .map(|_| FImg::new(self.width, self.height).expect("geometry validated at creation"))
            .collect();

        for (c, chan) in channels.iter_mut().enumerate() {
            let dst = chan.data_mut();
            match &self.samples {
                Samples::U8(d) => {
                    for i in 0..w * h {
                        dst[i] = d[i * cn + c] as f32;
                    }
                }
                Samples::U16(d) => {
                    for i in 0..w * h {
                        dst[i] = d[i * cn + c] as f32;
                    }
                }
                Samples::F32(d) => {
                    for i in 0..w * h {
                        dst[i] = d[i * cn + c];
                    }
                }
            }
        }

        channels
    }

    /// Merge planar channels back into an interleaved image of the given depth
    ///
    /// For integer depths every sample is rounded (`v + 0.5`) and clamped to
    /// the depth's range; negative values clamp to zero. Floating-point
    /// output copies sample values untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `channels` is empty or the buffers disagree in
    /// size.
    pub fn from_channels(channels: &[FImg], depth: ImageDepth) -> Result<Self> {
        let first = channels.first().ok_or(Error::NullInput("channel list"))?;
        for chan in &channels[1..] {
            first.check_same_size(chan)?;
        }

        let (width, height) = first.dimensions();
        let w = width as usize;
        let h = height as usize;
        let cn = channels.len();

        let samples = match depth {
            ImageDepth::U8 => {
                let mut data = vec![0u8; w * h * cn];
                for (c, chan) in channels.iter().enumerate() {
                    let src = chan.data();
                    for i in 0..w * h {
                        data[i * cn + c] = round_clamp(src[i], 255.0) as u8;
                    }
                }
                Samples::U8(data)
            }
            ImageDepth::U16 => {
                let mut data = vec![0u16; w * h * cn];
                for (c, chan) in channels.iter().enumerate() {
                    let src = chan.data();
                    for i in 0..w * h {
                        data[i * cn + c] = round_clamp(src[i], 65535.0) as u16;
                    }
                }
                Samples::U16(data)
            }
            ImageDepth::F32 => {
                let mut data = vec![0f32; w * h * cn];
                for (c, chan) in channels.iter().enumerate() {
                    let src = chan.data();
                    for i in 0..w * h {
                        data[i * cn + c] = src[i];
                    }
                }
                Samples::F32(data)
            }
        };

        Ok(Image {
            width,
            height,
            channels: cn as u32,
            samples,
        })
    }
}

/// Round to nearest and clamp into [0, max]
#[inline]
fn round_clamp(v: f32, max: f32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    (v + 0.5).floor().clamp(0.0, max)
}
