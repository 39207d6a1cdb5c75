//! FImg - single-channel floating-point image
//!
//! `FImg` is a 2D array of `f32` values and is the working buffer type of
//! the whole filter pipeline: guide channels, weight fields, splat
//! accumulators and transform distances are all `FImg` instances.
//!
//! # Examples
//!
//! ```
//! use manifold_core::FImg;
//!
//! let mut img = FImg::new(100, 100).unwrap();
//! img.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(img.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};

/// Single-channel floating-point image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FImg {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl FImg {
    /// Create a new FImg with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FImg {
            width,
            height,
            data: vec![0.0f32; size],
        })
    }

    /// Create a new FImg with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FImg {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FImg from raw data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FImg {
            width,
            height,
            data,
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

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
        Ok(())
    }

    /// Get the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + (self.width as usize)]
    }

    /// Get a mutable row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let start = (y as usize) * (self.width as usize);
        &mut self.data[start..start + (self.width as usize)]
    }

    /// Set all pixels to the specified value
    pub fn set_all(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Clear all pixels to zero
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Create a template FImg with the same dimensions, zeroed data
    pub fn create_template(&self) -> FImg {
        FImg {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Add two FImg images element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn add(&self, other: &FImg) -> Result<FImg> {
        self.check_same_size(other)?;

        let mut result = self.create_template();
        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            result.data[i] = a + b;
        }

        Ok(result)
    }

    /// Subtract other FImg from this one element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn sub(&self, other: &FImg) -> Result<FImg> {
        self.check_same_size(other)?;

        let mut result = self.create_template();
        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            result.data[i] = a - b;
        }

        Ok(result)
    }

    /// Multiply two FImg images element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn mul(&self, other: &FImg) -> Result<FImg> {
        self.check_same_size(other)?;

        let mut result = self.create_template();
        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            result.data[i] = a * b;
        }

        Ok(result)
    }

    /// Divide this FImg by other element-wise
    ///
    /// Division by zero results in IEEE non-finite values (`inf`, `-inf`
    /// or `NaN`). Callers that divide by fields which can vanish in
    /// masked-out regions are expected to tolerate those values there.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn div(&self, other: &FImg) -> Result<FImg> {
        self.check_same_size(other)?;

        let mut result = self.create_template();
        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            result.data[i] = a / b;
        }

        Ok(result)
    }

    /// Divide this FImg by other element-wise, pinning zero denominators
    ///
    /// Like [`FImg::div`], except that any pixel whose denominator is
    /// exactly zero produces zero instead of an IEEE non-finite value.
    /// Weighted-average normalizations use this so that regions with no
    /// mass stay quiet instead of spreading `NaN`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn div_or_zero(&self, other: &FImg) -> Result<FImg> {
        self.check_same_size(other)?;

        let mut result = self.create_template();
        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            result.data[i] = if b == 0.0 { 0.0 } else { a / b };
        }

        Ok(result)
    }

    /// Add two FImg images element-wise into `self`
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn add_assign(&mut self, other: &FImg) -> Result<()> {
        self.check_same_size(other)?;

        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Multiply by another FImg element-wise in place
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn mul_assign(&mut self, other: &FImg) -> Result<()> {
        self.check_same_size(other)?;

        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a *= b;
        }
        Ok(())
    }

    /// Add a constant to all pixels (in-place)
    pub fn add_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v += value;
        }
    }

    /// Multiply all pixels by a constant (in-place)
    pub fn mul_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v *= value;
        }
    }

    /// Linear combination: result = a * self + b
    pub fn linear_combination(&self, multiplier: f32, addend: f32) -> FImg {
        let mut result = self.clone();
        for v in &mut result.data {
            *v = multiplier * *v + addend;
        }
        result
    }

    /// Replace every pixel by its natural exponential (in-place)
    pub fn exp_in_place(&mut self) {
        for v in &mut self.data {
            *v = v.exp();
        }
    }

    /// Replace every pixel by its square root (in-place)
    ///
    /// Negative inputs produce `NaN`, as with `f32::sqrt`.
    pub fn sqrt_in_place(&mut self) {
        for v in &mut self.data {
            *v = v.sqrt();
        }
    }

    /// Element-wise minimum with another FImg, written into `self`
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn min_assign(&mut self, other: &FImg) -> Result<()> {
        self.check_same_size(other)?;

        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = a.min(b);
        }
        Ok(())
    }

    /// Check that two FImg have the same dimensions
    pub fn check_same_size(&self, other: &FImg) -> Result<()> {
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

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Find the minimum pixel value
    pub fn min_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::min)
    }

    /// Find the maximum pixel value
    pub fn max_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::max)
    }

    /// Calculate the mean (average) of all pixel values
    pub fn mean(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }

        let sum: f32 = self.data.iter().sum();
        Some(sum / self.data.len() as f32)
    }

    /// Calculate the sum of all pixel values
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl std::ops::Add for &FImg {
    type Output = Result<FImg>;

    fn add(self, rhs: Self) -> Self::Output {
        FImg::add(self, rhs)
    }
}

impl std::ops::Sub for &FImg {
    type Output = Result<FImg>;

    fn sub(self, rhs: Self) -> Self::Output {
        FImg::sub(self, rhs)
    }
}

impl std::ops::Mul for &FImg {
    type Output = Result<FImg>;

    fn mul(self, rhs: Self) -> Self::Output {
        FImg::mul(self, rhs)
    }
}

impl std::ops::Div for &FImg {
    type Output = Result<FImg>;

    fn div(self, rhs: Self) -> Self::Output {
        FImg::div(self, rhs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fimg_creation() {
        let img = FImg::new(100, 200).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 200);
        assert_eq!(img.dimensions(), (100, 200));

        for &val in img.data() {
            assert_eq!(val, 0.0);
        }
    }

    #[test]
    fn test_fimg_invalid_dimensions() {
        assert!(FImg::new(0, 100).is_err());
        assert!(FImg::new(100, 0).is_err());
        assert!(FImg::new(0, 0).is_err());
    }

    #[test]
    fn test_fimg_from_data() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let img = FImg::from_data(3, 2, data).unwrap();

        assert_eq!(img.get_pixel(0, 0).unwrap(), 1.0);
        assert_eq!(img.get_pixel(2, 0).unwrap(), 3.0);
        assert_eq!(img.get_pixel(0, 1).unwrap(), 4.0);
        assert_eq!(img.get_pixel(2, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_fimg_from_data_wrong_size() {
        let data = vec![1.0, 2.0, 3.0]; // Wrong size for 3x2
        assert!(FImg::from_data(3, 2, data).is_err());
    }

    #[test]
    fn test_fimg_pixel_access() {
        let mut img = FImg::new(10, 10).unwrap();

        img.set_pixel(5, 5, 1.5).unwrap();
        assert_eq!(img.get_pixel(5, 5).unwrap(), 1.5);

        img.set_pixel(0, 0, -0.5).unwrap();
        assert_eq!(img.get_pixel(0, 0).unwrap(), -0.5);

        assert!(img.get_pixel(10, 0).is_err());
        assert!(img.set_pixel(0, 10, 0.0).is_err());
    }

    #[test]
    fn test_fimg_row_access() {
        let mut img = FImg::new(5, 3).unwrap();

        for x in 0..5 {
            img.set_pixel(x, 1, (x + 1) as f32).unwrap();
        }

        assert_eq!(img.row(1), &[1.0, 2.0, 3.0, 4.0, 5.0]);

        let row_mut = img.row_mut(0);
        row_mut[0] = 10.0;
        assert_eq!(img.get_pixel(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_fimg_arithmetic() {
        let a = FImg::new_with_value(5, 5, 6.0).unwrap();
        let b = FImg::new_with_value(5, 5, 2.0).unwrap();

        assert_eq!(a.add(&b).unwrap().data()[0], 8.0);
        assert_eq!(a.sub(&b).unwrap().data()[0], 4.0);
        assert_eq!(a.mul(&b).unwrap().data()[0], 12.0);
        assert_eq!(a.div(&b).unwrap().data()[0], 3.0);
    }

    #[test]
    fn test_fimg_arithmetic_size_mismatch() {
        let a = FImg::new(10, 10).unwrap();
        let b = FImg::new(5, 5).unwrap();

        assert!(a.add(&b).is_err());
        assert!(a.sub(&b).is_err());
        assert!(a.mul(&b).is_err());
        assert!(a.div(&b).is_err());
    }

    #[test]
    fn test_fimg_div_by_zero_is_nonfinite() {
        let a = FImg::new_with_value(2, 2, 1.0).unwrap();
        let b = FImg::new(2, 2).unwrap();

        let q = a.div(&b).unwrap();
        assert!(q.data().iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_fimg_div_or_zero() {
        let a = FImg::from_data(3, 1, vec![1.0, 0.0, 6.0]).unwrap();
        let b = FImg::from_data(3, 1, vec![0.0, 0.0, 2.0]).unwrap();

        let q = a.div_or_zero(&b).unwrap();
        assert_eq!(q.data(), &[0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_fimg_in_place_ops() {
        let mut a = FImg::new_with_value(4, 4, 2.0).unwrap();
        let b = FImg::new_with_value(4, 4, 3.0).unwrap();

        a.add_assign(&b).unwrap();
        assert_eq!(a.data()[0], 5.0);

        a.mul_assign(&b).unwrap();
        assert_eq!(a.data()[0], 15.0);

        a.add_constant(1.0);
        assert_eq!(a.data()[0], 16.0);

        a.mul_constant(0.5);
        assert_eq!(a.data()[0], 8.0);

        a.min_assign(&b).unwrap();
        assert_eq!(a.data()[0], 3.0);
    }

    #[test]
    fn test_fimg_exp_sqrt() {
        let mut a = FImg::new_with_value(3, 3, 0.0).unwrap();
        a.exp_in_place();
        assert_eq!(a.data()[0], 1.0);

        let mut b = FImg::new_with_value(3, 3, 9.0).unwrap();
        b.sqrt_in_place();
        assert_eq!(b.data()[0], 3.0);
    }

    #[test]
    fn test_fimg_linear_combination() {
        let img = FImg::new_with_value(5, 5, 2.0).unwrap();
        let result = img.linear_combination(3.0, 1.0); // 3*2 + 1 = 7

        for &val in result.data() {
            assert_eq!(val, 7.0);
        }
    }

    #[test]
    fn test_fimg_statistics() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let img = FImg::from_data(2, 2, data).unwrap();

        assert_eq!(img.min_value(), Some(1.0));
        assert_eq!(img.max_value(), Some(4.0));
        assert_eq!(img.mean(), Some(2.5));
        assert_eq!(img.sum(), 10.0);
    }

    #[test]
    fn test_fimg_operator_overloading() {
        let a = FImg::new_with_value(5, 5, 3.0).unwrap();
        let b = FImg::new_with_value(5, 5, 2.0).unwrap();

        assert_eq!((&a + &b).unwrap().data()[0], 5.0);
        assert_eq!((&a - &b).unwrap().data()[0], 1.0);
        assert_eq!((&a * &b).unwrap().data()[0], 6.0);
        assert_eq!((&a / &b).unwrap().data()[0], 1.5);
    }
}
