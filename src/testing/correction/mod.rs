//! Multiple testing correction across one batch of enrichment tests.
//!
//! Only the Benjamini-Hochberg false discovery rate procedure is offered. It has to see the
//! complete batch at once: adjusting subsets separately does not control the FDR of the whole.

use crate::error::EnrichmentError;
use anyhow::Result;

/// Apply Benjamini-Hochberg (BH) procedure for controlling false discovery rate
///
/// The BH procedure controls the false discovery rate (FDR), which is the expected
/// proportion of false positives among all rejected null hypotheses.
///
/// Adjusted values are returned in the same order as `p_values`. For ranks `i` in ascending
/// p-value order, `q_(i) = min_{j >= i} min(1, p_(j) * n / j)`.
///
/// # Arguments
/// * `p_values` - A slice of p-values to adjust
///
/// # Returns
/// * `Result<Vec<f64>>` - Vector of adjusted p-values
///
/// # Example
/// ```
/// use pathway_ora::testing::correction::benjamini_hochberg_correction;
///
/// let p_values = vec![0.01, 0.04];
/// let adjusted = benjamini_hochberg_correction(&p_values).unwrap();
/// assert!((adjusted[0] - 0.02).abs() < 1e-12);
/// assert!((adjusted[1] - 0.04).abs() < 1e-12);
/// ```
pub fn benjamini_hochberg_correction(p_values: &[f64]) -> Result<Vec<f64>> {
    let n = p_values.len();
    if n == 0 {
        return Err(EnrichmentError::EmptyPValues.into());
    }

    validate_p_values(p_values)?;

    // Stable sort keeps tied p-values in input order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted_p_values = vec![0.0; n];
    let mut current_min: f64 = 1.0;

    // Process from largest to smallest p-value
    for (i, &orig_idx) in order.iter().enumerate().rev() {
        let rank = i + 1;
        let adjustment = (p_values[orig_idx] * n as f64 / rank as f64).min(1.0);
        current_min = adjustment.min(current_min);
        adjusted_p_values[orig_idx] = current_min;
    }

    Ok(adjusted_p_values)
}

fn validate_p_values(p_values: &[f64]) -> Result<()> {
    for (index, &value) in p_values.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(EnrichmentError::InvalidPValue { index, value }.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_relative_eq(a: &[f64], b: &[f64], epsilon: f64) {
        assert_eq!(a.len(), b.len(), "Vectors have different lengths");
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            if (x - y).abs() > epsilon {
                panic!("Vectors differ at index {}: {} != {}", i, x, y);
            }
        }
    }

    #[test]
    fn test_benjamini_hochberg_empty_input() {
        let result = benjamini_hochberg_correction(&[]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Empty p-value array");
    }

    #[test]
    fn test_benjamini_hochberg_invalid_pvalues() {
        let result = benjamini_hochberg_correction(&[0.01, -0.5, 0.03]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid p-value at index 1"));
        assert_eq!(
            err.downcast_ref::<EnrichmentError>(),
            Some(&EnrichmentError::InvalidPValue { index: 1, value: -0.5 })
        );

        let result = benjamini_hochberg_correction(&[0.01, 1.5, 0.03]);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid p-value at index 1")
        );

        // NaN is not within [0, 1]
        assert!(benjamini_hochberg_correction(&[0.2, f64::NAN]).is_err());
    }

    #[test]
    fn test_benjamini_hochberg_two_tests_closed_form() {
        // n = 2: q_(2) = p_(2), q_(1) = min(2 * p_(1), p_(2))
        let adjusted = benjamini_hochberg_correction(&[0.04, 0.01]).unwrap();
        assert_vec_relative_eq(&adjusted, &[0.04, 0.02], 1e-12);

        // Step-up minimum kicks in when 2 * p_(1) exceeds p_(2)
        let adjusted = benjamini_hochberg_correction(&[0.03, 0.035]).unwrap();
        assert_vec_relative_eq(&adjusted, &[0.035, 0.035], 1e-12);
    }

    #[test]
    fn test_benjamini_hochberg_identical_pvalues() {
        let adjusted = benjamini_hochberg_correction(&[0.05, 0.05, 0.05]).unwrap();
        assert_vec_relative_eq(&adjusted, &[0.05, 0.05, 0.05], 1e-10);
    }

    #[test]
    fn test_benjamini_hochberg_unordered_pvalues() {
        let p_values = vec![0.05, 0.01, 0.1, 0.04, 0.02];
        let expected = vec![0.0625, 0.05, 0.1, 0.0625, 0.05];
        let adjusted = benjamini_hochberg_correction(&p_values).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-12);
    }

    #[test]
    fn test_benjamini_hochberg_real_example() {
        let pvalues = vec![0.1, 0.2, 0.3, 0.4, 0.1];
        let expected = [0.25, 0.3333333333333333, 0.375, 0.4, 0.25];
        let adjusted = benjamini_hochberg_correction(&pvalues).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-12);
    }

    #[test]
    fn test_benjamini_hochberg_edge_cases() {
        let adjusted = benjamini_hochberg_correction(&[1e-10, 1e-9, 1e-8]).unwrap();
        assert!(adjusted.iter().all(|&p| p > 0.0 && p < 0.001));

        let adjusted = benjamini_hochberg_correction(&[0.1, 0.2, 1.0]).unwrap();
        assert_relative_eq!(adjusted[2], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_benjamini_hochberg_single_pvalue() {
        let adjusted = benjamini_hochberg_correction(&[0.025]).unwrap();
        assert_relative_eq!(adjusted[0], 0.025, epsilon = 1e-10);
    }
}
