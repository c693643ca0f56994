// Integration tests for the pathway_ora crate
// End-to-end runs from GMT text through enrichment to the filtered report.

#[cfg(test)]
mod integration_tests {
    use std::io::Cursor;

    use approx::assert_relative_eq;
    use pathway_ora::EnrichmentError;
    use pathway_ora::enrichment::gmt::{GmtOptions, read_gmt, read_gmt_with_resource};
    use pathway_ora::enrichment::{GeneSet, OraConfig, run_enrichment};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn gene_set(genes: &[&str]) -> GeneSet {
        genes.iter().map(|g| g.to_string()).collect()
    }

    const GMT: &str = "\
DNA_REPAIR\treactome\tBRCA1\tBRCA2\tATM\tATR\tRAD51\tCHEK1\tCHEK2\tTP53
GLYCOLYSIS\tkegg\tHK1\tHK2\tGCK\tPFKL\tPFKM\tALDOA\tGAPDH\tPGK1\tENO1\tPKM
TCA_CYCLE\tkegg\tCS\tACO2\tIDH2\tOGDH\tSUCLA2\tSDHA\tFH\tMDH2
";

    #[test]
    fn test_gmt_to_report() {
        init_logging();

        let pathways = read_gmt(Cursor::new(GMT), &GmtOptions::default()).unwrap();
        let query = gene_set(&["BRCA1", "BRCA2", "ATM", "RAD51", "CHEK2", "GAPDH"]);

        let report = run_enrichment(&query, &pathways, &OraConfig::default()).unwrap();
        assert_eq!(report.len(), 3);

        let repair = report.q_value(&"DNA_REPAIR".to_string()).unwrap();
        let glycolysis = report.q_value(&"GLYCOLYSIS".to_string()).unwrap();
        let tca = report.q_value(&"TCA_CYCLE".to_string()).unwrap();

        assert!(repair < 0.001, "DNA repair should be enriched, got q={}", repair);
        assert!(glycolysis > repair);
        assert_relative_eq!(tca, 1.0);

        let ranked = report.ranked();
        assert_eq!(ranked[0].0, "DNA_REPAIR");

        // GLYCOLYSIS shares a single gene with the query, q is roughly 0.0021
        let significant =
            run_enrichment(&query, &pathways, &OraConfig::default().with_threshold(0.001)).unwrap();
        assert_eq!(significant.len(), 1);
        assert!(significant.contains(&"DNA_REPAIR".to_string()));
    }

    #[test]
    fn test_resource_qualified_keys() {
        init_logging();

        let pathways = read_gmt_with_resource(Cursor::new(GMT), &GmtOptions::default()).unwrap();
        let query = gene_set(&["CS", "ACO2", "IDH2", "OGDH"]);

        let report = run_enrichment(&query, &pathways, &OraConfig::default()).unwrap();
        let key = ("TCA_CYCLE".to_string(), "kegg".to_string());
        assert!(report.q_value(&key).unwrap() < 0.001);
    }

    #[test]
    fn test_universe_smaller_than_gene_sets() {
        init_logging();

        let pathways = read_gmt(Cursor::new(GMT), &GmtOptions::default()).unwrap();
        let query = gene_set(&["BRCA1", "HK1"]);
        let config = OraConfig::new().with_universe_size(5);

        let err = run_enrichment(&query, &pathways, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EnrichmentError>(),
            Some(EnrichmentError::InvalidUniverse { .. })
        ));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        init_logging();

        let pathways = read_gmt(Cursor::new(GMT), &GmtOptions::default()).unwrap();
        let query = gene_set(&["HK1", "HK2", "GCK", "PFKL", "TP53"]);
        let config = OraConfig::default();

        let first = run_enrichment(&query, &pathways, &config).unwrap();
        let second = run_enrichment(&query, &pathways, &config).unwrap();
        assert_eq!(first, second);
    }
}
