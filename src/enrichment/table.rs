use crate::error::EnrichmentError;
use crate::enrichment::GeneSet;
use ndarray::{Array2, array};

/// A 2x2 overlap table between a query gene set and a pathway gene set.
///
/// ```text
///                 in pathway         not in pathway
/// in query        |Q ∩ P|            |Q \ P|
/// not in query    |P \ Q|            N - |Q ∪ P|
/// ```
///
/// The bottom-right cell goes negative when the universe size `N` is smaller than the
/// union of both sets. Such a table is kept as is and rejected by [`ContingencyTable::counts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    cells: Array2<i64>,
}

impl ContingencyTable {
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> Self {
        ContingencyTable {
            cells: array![[a, b], [c, d]],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> i64 {
        self.cells[[row, col]]
    }

    pub fn as_array(&self) -> &Array2<i64> {
        &self.cells
    }

    /// Sum of all four cells, equal to the universe size the table was built with.
    pub fn total(&self) -> i64 {
        self.cells.sum()
    }

    /// Number of genes in query or pathway.
    pub fn union_size(&self) -> i64 {
        self.cell(0, 0) + self.cell(0, 1) + self.cell(1, 0)
    }

    /// Cells in row-major order as non-negative counts.
    pub fn counts(&self) -> anyhow::Result<[u64; 4]> {
        if self.cells.iter().any(|&cell| cell < 0) {
            return Err(EnrichmentError::InvalidUniverse {
                universe_size: self.total(),
                union_size: self.union_size(),
            }
            .into());
        }
        Ok([
            self.cell(0, 0) as u64,
            self.cell(0, 1) as u64,
            self.cell(1, 0) as u64,
            self.cell(1, 1) as u64,
        ])
    }
}

/// Build the overlap table for one pathway against the query.
///
/// No validation happens here: an undersized universe shows up as a negative bottom-right cell.
pub fn build_table(query: &GeneSet, pathway: &GeneSet, universe_size: usize) -> ContingencyTable {
    let overlap = query.intersection(pathway).count() as i64;
    let query_only = query.len() as i64 - overlap;
    let pathway_only = pathway.len() as i64 - overlap;
    let union = overlap + query_only + pathway_only;

    ContingencyTable::new(
        overlap,
        query_only,
        pathway_only,
        universe_size as i64 - union,
    )
}
