//! Reader for gene sets in GMT format.
//!
//! Each non-blank line holds tab-separated fields: the gene set name, a second column (a
//! description, or the pathway resource for resource-qualified collections) and the member
//! genes. Gene sets are size-filtered before they are handed to the enrichment engine.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::BufRead;

use anyhow::{Context, Result};
use log::{error, info};

use crate::enrichment::{GeneSet, PathwayAnnotation};
use crate::error::EnrichmentError;

pub const DEFAULT_MIN_SIZE: usize = 3;
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Size filters applied while reading a GMT collection.
///
/// Sizes count distinct genes: a symbol listed twice on one GMT line counts once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmtOptions {
    /// Smallest gene set kept (inclusive)
    pub min_size: usize,
    /// Largest gene set kept (inclusive)
    pub max_size: usize,
    /// When set, gene sets are also filtered on their overlap with these genes
    pub gene_list: Option<GeneSet>,
}

impl Default for GmtOptions {
    fn default() -> Self {
        GmtOptions {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            gene_list: None,
        }
    }
}

impl GmtOptions {
    pub fn with_size_bounds(mut self, min_size: usize, max_size: usize) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    pub fn with_gene_list(mut self, gene_list: GeneSet) -> Self {
        self.gene_list = Some(gene_list);
        self
    }

    fn within_bounds(&self, size: usize) -> bool {
        size >= self.min_size && size <= self.max_size
    }

    // Overlap bounds are exclusive on both ends
    fn overlap_within_bounds(&self, genes: &GeneSet) -> bool {
        match &self.gene_list {
            Some(gene_list) => {
                let overlap = genes.intersection(gene_list).count();
                overlap > self.min_size && overlap < self.max_size
            }
            None => true,
        }
    }
}

/// Read a GMT collection keyed by gene set name.
pub fn read_gmt<R: BufRead>(reader: R, options: &GmtOptions) -> Result<PathwayAnnotation<String>> {
    let records = read_records(reader)?
        .into_iter()
        .map(|(name, _, genes)| (name, genes));
    filter_gene_sets(records, options)
}

/// Read a GMT collection keyed by `(name, resource)`, taking the resource from the second column.
pub fn read_gmt_with_resource<R: BufRead>(
    reader: R,
    options: &GmtOptions,
) -> Result<PathwayAnnotation<(String, String)>> {
    let records = read_records(reader)?
        .into_iter()
        .map(|(name, resource, genes)| ((name, resource), genes));
    filter_gene_sets(records, options)
}

fn read_records<R: BufRead>(reader: R) -> Result<Vec<(String, String, GeneSet)>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.with_context(|| format!("Failed to read GMT line {}", line_number))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(name), Some(second)) = (fields.next(), fields.next()) else {
            return Err(EnrichmentError::MalformedGmt { line: line_number }.into());
        };
        let genes: GeneSet = fields
            .filter(|gene| !gene.is_empty())
            .map(str::to_string)
            .collect();

        records.push((name.to_string(), second.to_string(), genes));
    }

    Ok(records)
}

fn filter_gene_sets<K, I>(records: I, options: &GmtOptions) -> Result<PathwayAnnotation<K>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, GeneSet)>,
{
    // Later records replace earlier ones with the same key
    let gene_sets: HashMap<K, GeneSet> = records.into_iter().collect();
    let n_read = gene_sets.len();

    let filtered: PathwayAnnotation<K> = gene_sets
        .into_iter()
        .filter(|(_, genes)| options.within_bounds(genes.len()))
        .filter(|(_, genes)| options.overlap_within_bounds(genes))
        .collect();

    let n_removed = n_read - filtered.len();
    info!(
        "{:04} gene sets have been filtered out when max_size={} and min_size={}",
        n_removed, options.max_size, options.min_size
    );

    if filtered.is_empty() {
        error!("No gene sets passed the filtering condition; gene names are case sensitive");
        return Err(EnrichmentError::NoGeneSetsPassedFilter {
            min_size: options.min_size,
            max_size: options.max_size,
        }
        .into());
    }

    Ok(filtered)
}
