//! Mask - single-channel boolean image
//!
//! A `Mask` marks the set of pixels a computation is restricted to. The
//! manifold tree uses one mask per node: the root mask covers the whole
//! image and every split produces two disjoint child masks that exactly
//! partition their parent.

use crate::error::{Error, Result};

/// Single-channel boolean image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding, one `bool` per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<bool>,
}

impl Mask {
    /// Create a new Mask with all pixels cleared
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Mask {
            width,
            height,
            data: vec![false; size],
        })
    }

    /// Create a new Mask with all pixels set
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn filled(width: u32, height: u32) -> Result<Self> {
        let mut mask = Mask::new(width, height)?;
        mask.data.fill(true);
        Ok(mask)
    }

    /// Get the mask width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the mask dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Test the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// Get raw access to the mask data
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Get mutable access to the mask data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if no pixel is set
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Pixel-wise intersection with another mask
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.check_same_size(other)?;

        let mut result = self.clone();
        for (a, &b) in result.data.iter_mut().zip(other.data.iter()) {
            *a = *a && b;
        }
        Ok(result)
    }

    /// Pixel-wise union with another mask
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn union(&self, other: &Mask) -> Result<Mask> {
        self.check_same_size(other)?;

        let mut result = self.clone();
        for (a, &b) in result.data.iter_mut().zip(other.data.iter()) {
            *a = *a || b;
        }
        Ok(result)
    }

    /// Check that two masks have the same dimensions
    fn check_same_size(&self, other: &Mask) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_creation() {
        let mask = Mask::new(10, 20).unwrap();
        assert_eq!(mask.dimensions(), (10, 20));
        assert!(mask.is_empty());
        assert_eq!(mask.count(), 0);

        let full = Mask::filled(10, 20).unwrap();
        assert_eq!(full.count(), 200);
        assert!(!full.is_empty());
    }

    #[test]
    fn test_mask_invalid_dimensions() {
        assert!(Mask::new(0, 10).is_err());
        assert!(Mask::filled(10, 0).is_err());
    }

    #[test]
    fn test_mask_get_set() {
        let mut mask = Mask::new(5, 5).unwrap();
        assert!(!mask.get(2, 3));

        mask.set(2, 3, true);
        assert!(mask.get(2, 3));
        assert_eq!(mask.count(), 1);

        mask.set(2, 3, false);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_mask_set_algebra() {
        let mut a = Mask::new(4, 1).unwrap();
        let mut b = Mask::new(4, 1).unwrap();
        a.set(0, 0, true);
        a.set(1, 0, true);
        b.set(1, 0, true);
        b.set(2, 0, true);

        let and = a.and(&b).unwrap();
        assert_eq!(and.count(), 1);
        assert!(and.get(1, 0));

        let or = a.union(&b).unwrap();
        assert_eq!(or.count(), 3);
        assert!(!or.get(3, 0));
    }

    #[test]
    fn test_mask_size_mismatch() {
        let a = Mask::new(4, 4).unwrap();
        let b = Mask::new(3, 4).unwrap();
        assert!(a.and(&b).is_err());
        assert!(a.union(&b).is_err());
    }
}
