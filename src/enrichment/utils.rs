/// Round a corrected p-value to a fixed number of decimals for reporting.
///
/// Rounds the exact binary value of `value`, so `0.01005` (stored slightly below the half-way
/// point) becomes `0.01`, not `0.0101`.
pub fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse::<f64>()
        .unwrap_or(value)
}
