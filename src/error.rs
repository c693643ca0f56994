use thiserror::Error;

/// Failure kinds raised by the enrichment engine.
///
/// Public operations return `anyhow::Result`; callers that need to branch on the
/// kind of failure can `downcast_ref::<EnrichmentError>()` the returned error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichmentError {
    #[error("no pathways to test")]
    EmptyInput,

    #[error(
        "universe size {universe_size} is smaller than the {union_size} genes observed in query and pathway"
    )]
    InvalidUniverse { universe_size: i64, union_size: i64 },

    #[error("Empty p-value array")]
    EmptyPValues,

    #[error("Invalid p-value at index {index}: {value}")]
    InvalidPValue { index: usize, value: f64 },

    #[error("Significance threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Malformed GMT record at line {line}: expected at least 2 tab-separated columns")]
    MalformedGmt { line: usize },

    #[error(
        "No gene sets passed the filtering condition (min_size={min_size}, max_size={max_size}); gene names are case sensitive"
    )]
    NoGeneSetsPassedFilter { min_size: usize, max_size: usize },
}
