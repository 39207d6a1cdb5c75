//! Regression test parameters and comparisons

use manifold_core::FImg;

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, a running index
/// (incremented before each comparison) and the collected failures. Tests
/// make a sequence of comparisons and assert on [`RegParams::cleanup`] at
/// the end, so a single run reports every failing index instead of
/// stopping at the first.
pub struct RegParams {
    /// Name of the test (e.g., "manifold")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "manifold")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff.is_nan() || diff > delta {
            self.record_failure(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare a boolean condition
    ///
    /// # Returns
    ///
    /// The condition itself; a false condition is recorded as a failure.
    pub fn compare_bool(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;

        if !condition {
            self.record_failure(format!(
                "Failure in {}_reg: condition for index {}: {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Compare two float images pixel by pixel
    ///
    /// # Arguments
    ///
    /// * `img1` - First image
    /// * `img2` - Second image
    /// * `delta` - Maximum allowed per-pixel difference (0.0 for exact)
    ///
    /// # Returns
    ///
    /// `true` if dimensions match and every pixel pair is within delta.
    pub fn compare_fimg(&mut self, img1: &FImg, img2: &FImg, delta: f32) -> bool {
        self.index += 1;

        if img1.dimensions() != img2.dimensions() {
            self.record_failure(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch \
                 ({:?} vs {:?})",
                self.test_name,
                self.index,
                img1.dimensions(),
                img2.dimensions()
            ));
            return false;
        }

        let (width, height) = img1.dimensions();
        for y in 0..height {
            for x in 0..width {
                let p1 = img1.get_pixel_unchecked(x, y);
                let p2 = img2.get_pixel_unchecked(x, y);
                let diff = (p1 - p2).abs();
                if diff.is_nan() || diff > delta {
                    self.record_failure(format!(
                        "Failure in {}_reg: image comparison for index {} - pixel mismatch \
                         at ({}, {}): {} vs {}",
                        self.test_name, self.index, x, y, p1, p2
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
