//! Exact tests feeding the enrichment engine.
//!
//! Only the one-sided ("greater") Fisher exact test on a 2x2 table is provided: it asks
//! whether the top-left cell is larger than independence of rows and columns would predict.

pub mod discrete;

pub use discrete::fisher_exact_greater;
