//! Over-representation analysis of pathway gene sets.
//!
//! This module determines which pathways are over-represented among a query gene set,
//! relative to a fixed background gene universe.
//!
//! ## Components
//!
//! - **Tables** (`table`): 2x2 overlap tables between the query and one pathway
//! - **ORA** (`ora`): per-pathway Fisher exact tests with batch-wide Benjamini-Hochberg correction
//! - **GMT** (`gmt`): reading and size-filtering pathway gene sets from GMT text
//!
//! ## Quick Example
//!
//! ```rust
//! use std::collections::{HashMap, HashSet};
//! use pathway_ora::enrichment::{run_enrichment, OraConfig};
//!
//! let query: HashSet<String> = ["A", "B", "C"].iter().map(|g| g.to_string()).collect();
//! let mut pathways = HashMap::new();
//! pathways.insert(
//!     "P1".to_string(),
//!     ["A", "B", "X", "Y"].iter().map(|g| g.to_string()).collect::<HashSet<_>>(),
//! );
//!
//! let config = OraConfig::new().with_universe_size(10);
//! let report = run_enrichment(&query, &pathways, &config).unwrap();
//! assert_eq!(report.q_value(&"P1".to_string()), Some(0.3333));
//! ```

use std::collections::{HashMap, HashSet};

pub mod gmt;
pub mod ora;
pub mod table;
pub(crate) mod utils;

/// A set of unique, case-sensitive gene symbols.
pub type GeneSet = HashSet<String>;

/// Pathway identifier to member genes, one entry per pathway under test.
pub type PathwayAnnotation<K> = HashMap<K, GeneSet>;

pub use ora::{
    EnrichmentObserver, EnrichmentReport, OraConfig, adjust_pairs, run_enrichment,
    run_enrichment_observed,
};
pub use table::{ContingencyTable, build_table};
