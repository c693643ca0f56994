use crate::enrichment::ContingencyTable;
use crate::testing::TestResult;
use statrs::function::factorial::ln_binomial;

/// Performs a one-sided Fisher exact test (alternative: greater) on a 2x2 contingency table.
///
/// A table with a negative cell is rejected with
/// [`EnrichmentError::InvalidUniverse`](crate::EnrichmentError::InvalidUniverse) instead of
/// being clamped, since it can only come from a universe smaller than the observed genes.
///
/// The returned statistic is the sample odds ratio `(a * d) / (b * c)`.
pub fn fisher_exact_table(table: &ContingencyTable) -> anyhow::Result<TestResult> {
    let [a, b, c, d] = table.counts()?;
    Ok(fisher_exact_greater(a, b, c, d))
}

/// Performs a one-sided Fisher exact test (alternative: greater) on the table `[[a, b], [c, d]]`.
///
/// The p-value is `P(X >= a)` where `X ~ Hypergeometric(N = a + b + c + d, K = a + b, n = a + c)`.
pub fn fisher_exact_greater(a: u64, b: u64, c: u64, d: u64) -> TestResult {
    let population = a + b + c + d;
    let successes = a + b;
    let draws = a + c;

    let p_value = hypergeometric_upper_tail(a, draws, successes, population);

    TestResult::new(odds_ratio(a, b, c, d), p_value)
}

fn odds_ratio(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let numerator = a as f64 * d as f64;
    let denominator = b as f64 * c as f64;

    if denominator == 0.0 {
        if numerator == 0.0 {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        numerator / denominator
    }
}

/// Hypergeometric upper tail `P(X >= k)`, summed in log space.
fn hypergeometric_upper_tail(k: u64, draws: u64, successes: u64, population: u64) -> f64 {
    if k == 0 {
        return 1.0;
    }
    let upper = draws.min(successes);
    if k > upper {
        return 0.0;
    }

    let failures = population - successes;
    let log_denom = ln_binomial(population, draws);

    let log_probs: Vec<f64> = (k..=upper)
        .filter(|&i| draws - i <= failures)
        .map(|i| ln_binomial(successes, i) + ln_binomial(failures, draws - i) - log_denom)
        .collect();

    if log_probs.is_empty() {
        return 0.0;
    }

    // log-sum-exp
    let max_log_prob = log_probs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = log_probs
        .iter()
        .map(|&log_p| (log_p - max_log_prob).exp())
        .sum();

    (sum * max_log_prob.exp()).min(1.0)
}
