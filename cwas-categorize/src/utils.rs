use log::{debug, info};

use std::path::PathBuf;

use cwas_pack::GeneMatrix;

use crate::domain::{Domain, DomainConfig, DomainError, DomainRegistry};

/// built-in domains + gene matrix categories + optional JSON config
///
/// Gene-list terms repeated in the config are taken from the matrix only.
pub fn build_registry(
    matrix: &GeneMatrix,
    domains: Option<&PathBuf>,
) -> Result<DomainRegistry, DomainError> {
    let mut builder =
        DomainRegistry::builder().extend(Domain::GeneList, matrix.categories().iter().cloned());

    if let Some(path) = domains {
        let mut config = DomainConfig::from_path(path)?;
        config.gene_list.retain(|term| {
            let known = matrix.categories().contains(term);
            if known {
                debug!("Gene list {:?} already comes from the gene matrix", term);
            }
            !known
        });

        builder = builder.apply(&config);
    }

    let registry = builder.build()?;

    info!(
        "Domains: {}",
        Domain::ORDER
            .iter()
            .map(|domain| format!("{}={}", domain, registry.terms(*domain).len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry_from_matrix_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let domains = dir.path().join("domains.json");
        std::fs::write(
            &domains,
            r#"{"gene_list": ["ProteinCoding", "Extra"], "region": ["EncodeDHS"]}"#,
        )
        .unwrap();

        let matrix = GeneMatrix::from_memberships([("BRCA1", vec!["ProteinCoding", "ASD"])]);
        let registry = build_registry(&matrix, Some(&domains)).unwrap();

        assert_eq!(
            registry.terms(Domain::GeneList),
            &["Any", "ProteinCoding", "ASD", "Extra"]
        );
        assert_eq!(registry.terms(Domain::Region), &["Any", "EncodeDHS"]);
    }

    #[test]
    fn test_build_registry_without_config() {
        let matrix = GeneMatrix::from_memberships([("LINC1", vec!["lincRNA"])]);
        let registry = build_registry(&matrix, None).unwrap();

        assert_eq!(registry.terms(Domain::GeneList), &["Any", "lincRNA"]);
        assert_eq!(registry.redundant_pairs(), 19);
    }

    #[test]
    fn test_build_registry_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let domains = dir.path().join("domains.json");
        std::fs::write(&domains, "{not json").unwrap();

        let err = build_registry(&GeneMatrix::default(), Some(&domains)).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
