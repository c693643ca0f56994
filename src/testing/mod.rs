pub mod correction;
pub mod inference;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// The test statistic value (the sample odds ratio for 2x2 exact tests)
    pub statistic: f64,
    /// The p-value of the test
    pub p_value: f64,
}

impl TestResult {
    /// Create a new test result
    pub fn new(statistic: f64, p_value: f64) -> Self {
        TestResult { statistic, p_value }
    }

    /// Check if the result is statistically significant at the given threshold
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
