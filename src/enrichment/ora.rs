//! Over-representation analysis of pathways against a query gene set.
//!
//! Every pathway is turned into a [`ContingencyTable`], tested with a one-sided Fisher exact
//! test, and the whole batch of p-values is then adjusted with Benjamini-Hochberg in one go.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt::Debug;
use std::hash::Hash;

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use crate::enrichment::table::{ContingencyTable, build_table};
use crate::enrichment::utils::round_to_decimals;
use crate::enrichment::{GeneSet, PathwayAnnotation};
use crate::error::EnrichmentError;
use crate::testing::TestResult;
use crate::testing::correction::benjamini_hochberg_correction;
use crate::testing::inference::discrete::fisher_exact_table;

/// Number of distinct HGNC gene symbols used as the default background.
pub const DEFAULT_UNIVERSE_SIZE: usize = 42609;

pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Decimals kept for reported q-values.
pub const Q_VALUE_DECIMALS: usize = 4;

/// Settings for one enrichment run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OraConfig {
    /// Total number of genes considered possible across all pathways
    pub universe_size: usize,
    /// Drop pathways whose q-value exceeds `threshold` from the report
    pub apply_threshold: bool,
    /// Significance cutoff on the rounded q-value
    pub threshold: f64,
}

impl Default for OraConfig {
    fn default() -> Self {
        OraConfig {
            universe_size: DEFAULT_UNIVERSE_SIZE,
            apply_threshold: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl OraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different background universe size
    pub fn with_universe_size(mut self, universe_size: usize) -> Self {
        self.universe_size = universe_size;
        self
    }

    /// Keep only pathways with a q-value at or below `threshold`
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.apply_threshold = true;
        self.threshold = threshold;
        self
    }

    /// The threshold is only checked when it is applied.
    pub fn validate(&self) -> Result<()> {
        if self.apply_threshold
            && (!self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold))
        {
            return Err(EnrichmentError::InvalidThreshold(self.threshold).into());
        }
        Ok(())
    }
}

/// Receives progress from an enrichment run.
///
/// `pathway_tested` is called from rayon worker threads in no particular order.
/// Observers never influence the computed report.
pub trait EnrichmentObserver<K>: Sync {
    fn pathway_tested(&self, _pathway: &K, _table: &ContingencyTable, _result: &TestResult) {}

    fn batch_corrected(&self, _n_tested: usize) {}
}

impl<K> EnrichmentObserver<K> for () {}

/// Corrected q-values per pathway, rounded to [`Q_VALUE_DECIMALS`] decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentReport<K>
where
    K: Eq + Hash,
{
    q_values: HashMap<K, f64>,
}

impl<K> EnrichmentReport<K>
where
    K: Eq + Hash,
{
    pub fn q_value(&self, pathway: &K) -> Option<f64> {
        self.q_values.get(pathway).copied()
    }

    pub fn contains(&self, pathway: &K) -> bool {
        self.q_values.contains_key(pathway)
    }

    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, f64> {
        self.q_values.iter()
    }

    /// Pathways ordered by ascending q-value
    pub fn ranked(&self) -> Vec<(&K, f64)> {
        let mut ranked: Vec<(&K, f64)> = self.q_values.iter().map(|(k, &q)| (k, q)).collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    pub fn into_inner(self) -> HashMap<K, f64> {
        self.q_values
    }
}

impl<K> EnrichmentReport<K>
where
    K: Eq + Hash + Clone,
{
    /// Derive a new report holding only pathways with `q <= threshold`.
    pub fn filter_by_threshold(&self, threshold: f64) -> Self {
        let q_values = self
            .q_values
            .iter()
            .filter(|&(_, &q)| q <= threshold)
            .map(|(k, &q)| (k.clone(), q))
            .collect();
        EnrichmentReport { q_values }
    }
}

impl<K> FromIterator<(K, f64)> for EnrichmentReport<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        EnrichmentReport {
            q_values: iter.into_iter().collect(),
        }
    }
}

impl<K> IntoIterator for EnrichmentReport<K>
where
    K: Eq + Hash,
{
    type Item = (K, f64);
    type IntoIter = hash_map::IntoIter<K, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.q_values.into_iter()
    }
}

/// Adjust a batch of `(pathway, p-value)` pairs with Benjamini-Hochberg.
///
/// Each q-value is written back into the pair its p-value came from, so pathway attribution
/// does not depend on two separately derived orderings.
pub fn adjust_pairs<K>(pairs: Vec<(K, f64)>) -> Result<Vec<(K, f64)>> {
    let p_values: Vec<f64> = pairs.iter().map(|&(_, p)| p).collect();
    let q_values = benjamini_hochberg_correction(&p_values)?;

    Ok(pairs
        .into_iter()
        .zip(q_values)
        .map(|((pathway, _), q)| (pathway, q))
        .collect())
}

/// Run over-representation analysis of `query` against every pathway in `annotation`.
///
/// Fails with [`EnrichmentError::EmptyInput`] when there is nothing to test, and with
/// [`EnrichmentError::InvalidUniverse`] when `config.universe_size` is smaller than the union of
/// the query and any pathway.
pub fn run_enrichment<K>(
    query: &GeneSet,
    annotation: &PathwayAnnotation<K>,
    config: &OraConfig,
) -> Result<EnrichmentReport<K>>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    run_enrichment_observed(query, annotation, config, &())
}

/// Same as [`run_enrichment`], reporting progress to `observer`.
pub fn run_enrichment_observed<K, O>(
    query: &GeneSet,
    annotation: &PathwayAnnotation<K>,
    config: &OraConfig,
    observer: &O,
) -> Result<EnrichmentReport<K>>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
    O: EnrichmentObserver<K> + ?Sized,
{
    if annotation.is_empty() {
        return Err(EnrichmentError::EmptyInput.into());
    }
    config.validate()?;

    let pathways: Vec<(&K, &GeneSet)> = annotation.iter().collect();

    let raw_p_values: Vec<(&K, f64)> = pathways
        .into_par_iter()
        .map(|(pathway, genes)| {
            let table = build_table(query, genes, config.universe_size);
            let result = fisher_exact_table(&table)
                .with_context(|| format!("Failed to test pathway {:?}", pathway))?;

            debug!(
                "Pathway {:?}: table={:?}, odds_ratio={}, p={}",
                pathway,
                table.as_array().as_slice().unwrap_or_default(),
                result.statistic,
                result.p_value
            );
            observer.pathway_tested(pathway, &table, &result);

            Ok::<_, anyhow::Error>((pathway, result.p_value))
        })
        .collect::<Result<Vec<_>>>()?;

    let q_values = adjust_pairs(raw_p_values)?;
    observer.batch_corrected(q_values.len());

    let report: EnrichmentReport<K> = q_values
        .into_iter()
        .map(|(pathway, q)| (pathway.clone(), round_to_decimals(q, Q_VALUE_DECIMALS)))
        .collect();

    if !config.apply_threshold {
        info!(
            "Tested {} pathways against {} query genes",
            report.len(),
            query.len()
        );
        return Ok(report);
    }

    let filtered = report.filter_by_threshold(config.threshold);
    info!(
        "Tested {} pathways against {} query genes, {} with q <= {}",
        report.len(),
        query.len(),
        filtered.len(),
        config.threshold
    );
    Ok(filtered)
}
