//! # pathway-ora
//!
//! Over-Representation Analysis (ORA) of pathway gene sets.
//!
//! Given a query gene set and a catalogue of pathway gene sets, this crate determines which
//! pathways are over-represented among the query genes, relative to a fixed background gene
//! universe, and reports Benjamini-Hochberg corrected q-values.
//!
//! ## Core Features
//!
//! - **Contingency Tables**: exact set-overlap counts per pathway
//! - **Exact Testing**: one-sided Fisher exact test (alternative: greater)
//! - **Multiple Testing Correction**: Benjamini-Hochberg FDR over the whole batch of pathways
//! - **GMT Input**: size-filtered gene sets read from GMT text
//!
//! ## Module Organization
//!
//! - **[`testing`]**: The exact test and multiple testing correction
//! - **[`enrichment`]**: Contingency tables, the ORA runner and GMT reading

pub mod enrichment;
pub mod error;
pub mod testing;

pub use error::EnrichmentError;
