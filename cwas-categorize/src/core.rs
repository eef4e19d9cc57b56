use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use config::{get_progress_bar, write_collection, CATEGORIZATION_RESULT, INTERSECTION_MATRIX};
use cwas_pack::{reader, split_table, ColumnLayout, GeneMatrix};

use crate::aggregate::{Accumulate, CategoryCounts, CooccurrenceCounts, SampleCounts};
use crate::classify::Categorizer;
use crate::cli::Args;
use crate::combine::Combinator;
use crate::domain::{Domain, DomainRegistry};
use crate::utils::build_registry;

/// what to aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Count,
    Intersection,
}

/// finalized aggregate of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Categorization {
    /// cohort-wide counts, for tables without a SAMPLE column
    Counts(CategoryCounts),
    Samples(SampleCounts),
    Intersection(CooccurrenceCounts),
}

impl Categorization {
    pub fn to_rows(&self, registry: &DomainRegistry) -> Vec<String> {
        match self {
            Categorization::Counts(counts) => counts.to_rows(registry),
            Categorization::Samples(samples) => samples.to_rows(registry),
            Categorization::Intersection(matrix) => matrix.to_rows(registry),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Categorization::Intersection(_) => INTERSECTION_MATRIX,
            _ => CATEGORIZATION_RESULT,
        }
    }

    /// cohort-wide counts regardless of mode
    pub fn counts(&self) -> CategoryCounts {
        match self {
            Categorization::Counts(counts) => counts.clone(),
            Categorization::Samples(samples) => samples.total(),
            Categorization::Intersection(matrix) => matrix.diagonal(),
        }
    }
}

/// read inputs, categorize and write the result table
pub fn run(args: Args) -> Result<PathBuf> {
    info!("Reading gene matrix from {:?}...", args.gene_matrix);
    let matrix = GeneMatrix::from_path(&args.gene_matrix)?;
    let registry = build_registry(&matrix, args.domains.as_ref())?;

    info!("Reading variants from {:?}...", args.input);
    let contents = reader(&args.input)?;

    let mode = if args.intersection {
        Mode::Intersection
    } else {
        Mode::Count
    };
    let result = categorize(&contents, &registry, &matrix, mode)?;

    std::fs::create_dir_all(&args.outdir)?;
    let path = args.outdir.join(result.file_name());
    write_collection(&result.to_rows(&registry), &path)?;

    info!("Categorization written to {:?}", path);
    Ok(path)
}

/// classify, combine and aggregate every row of an annotated table
///
/// Indicator columns for every conservation and region term must be in
/// the header; a missing one fails before any row is touched. Rows that
/// cannot be parsed are skipped and reported.
pub fn categorize(
    contents: &str,
    registry: &DomainRegistry,
    matrix: &GeneMatrix,
    mode: Mode,
) -> Result<Categorization> {
    let (header, body) = split_table(contents)?;
    let layout = ColumnLayout::new(
        header,
        registry.terms(Domain::Conservation),
        registry.terms(Domain::Region),
    )?;

    let categorizer = Categorizer::new(registry, matrix);
    let combinator = Combinator::new(registry);

    info!(
        "Categorizing {} variants over {} redundant pairs...",
        body.len(),
        registry.redundant_pairs()
    );

    let result = match mode {
        Mode::Intersection => {
            Categorization::Intersection(aggregate(&body, &layout, &categorizer, &combinator))
        }
        Mode::Count if layout.has_sample() => {
            Categorization::Samples(aggregate(&body, &layout, &categorizer, &combinator))
        }
        Mode::Count => Categorization::Counts(aggregate(&body, &layout, &categorizer, &combinator)),
    };

    Ok(result)
}

fn aggregate<A: Accumulate>(
    body: &[(usize, &str)],
    layout: &ColumnLayout,
    categorizer: &Categorizer,
    combinator: &Combinator,
) -> A {
    let pb = get_progress_bar(body.len() as u64, "Categorizing variants...");
    let skipped = AtomicUsize::new(0);

    let acc = body
        .par_iter()
        .fold(
            || (A::default(), Vec::new()),
            |(mut acc, mut combinations), (line_no, line)| {
                match layout.parse(line, *line_no) {
                    Ok(record) => {
                        let ints = categorizer.annotate(&record);
                        combinator.combinations_into(&ints, &mut combinations);
                        acc.add_variant(&record, &combinations);
                    }
                    Err(e) => {
                        debug!("{}", e);
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }

                pb.inc(1);
                (acc, combinations)
            },
        )
        .map(|(acc, _)| acc)
        .reduce(A::default, A::merged);

    pb.finish_and_clear();

    let skipped = skipped.into_inner();
    if skipped > 0 {
        warn!("Skipped {} malformed rows out of {}", skipped, body.len());
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::CategoryKey;
    use config::NUM_DOMAINS;
    use cwas_pack::PackError;

    const TABLE: &str = "##annotated\n\
#REF\tALT\tConsequence\tSYMBOL\tNEAREST\tLoF\tLoF_flags\tMPC\tphyloP\n\
A\tT\tmissense_variant\tBRCA1\tBRCA1\t\t\t2.5\t1\n\
AT\tA\tframeshift_variant\tBRCA1\tBRCA1\tHC\t\tNA\t0\n\
G\tA\tintron_variant\tORPHAN\tORPHAN\t\t\tNA\t0\n\
short\trow\n";

    fn registry() -> DomainRegistry {
        DomainRegistry::builder()
            .extend(Domain::GeneList, ["ProteinCoding", "lincRNA"])
            .extend(Domain::Conservation, ["phyloP"])
            .build()
            .unwrap()
    }

    fn matrix() -> GeneMatrix {
        GeneMatrix::from_memberships([
            ("BRCA1", vec!["ProteinCoding"]),
            ("LINC1", vec!["lincRNA"]),
        ])
    }

    fn key(registry: &DomainRegistry, name: &str) -> CategoryKey {
        let mut positions = [0; NUM_DOMAINS];
        for (domain, term) in Domain::ORDER.into_iter().zip(name.split('_')) {
            positions[domain.index()] = registry.position(domain, term).unwrap();
        }
        CategoryKey(positions)
    }

    #[test]
    fn test_categorize_counts() {
        let registry = registry();
        let matrix = matrix();

        let Categorization::Counts(counts) =
            categorize(TABLE, &registry, &matrix, Mode::Count).unwrap()
        else {
            panic!("expected cohort-wide counts");
        };

        assert_eq!(counts.get(&key(&registry, "All_Any_All_Any_Any")), 3);
        assert_eq!(
            counts.get(&key(&registry, "SNV_ProteinCoding_phyloP_DamagingMissenseRegion_Any")),
            1
        );
        assert_eq!(
            counts.get(&key(&registry, "Indel_ProteinCoding_All_FrameshiftRegion_Any")),
            1
        );
        assert_eq!(
            counts.get(&key(&registry, "All_Any_All_IntronRegion_Any")),
            1
        );
        assert_eq!(
            counts.get(&key(&registry, "SNV_ProteinCoding_All_FrameshiftRegion_Any")),
            0
        );
    }

    #[test]
    fn test_intersection_diagonal_matches_counts() {
        let registry = registry();
        let matrix = matrix();

        let counts = categorize(TABLE, &registry, &matrix, Mode::Count).unwrap();
        let intersection = categorize(TABLE, &registry, &matrix, Mode::Intersection).unwrap();

        assert_eq!(intersection.file_name(), INTERSECTION_MATRIX);
        assert_eq!(intersection.counts(), counts.counts());
    }

    #[test]
    fn test_categorize_by_sample() {
        let registry = registry();
        let matrix = matrix();
        let table = "SAMPLE\tREF\tALT\tConsequence\tSYMBOL\tNEAREST\tLoF\tLoF_flags\tMPC\tphyloP\n\
S1\tA\tT\tmissense_variant\tBRCA1\tBRCA1\t\t\t2.5\t1\n\
S2\tG\tA\tintron_variant\tORPHAN\tORPHAN\t\t\tNA\t0\n\
S1\tG\tA\tintron_variant\tLINC1\tLINC1\t\t\tNA\t0\n";

        let Categorization::Samples(samples) =
            categorize(table, &registry, &matrix, Mode::Count).unwrap()
        else {
            panic!("expected per-sample counts");
        };

        let any = key(&registry, "All_Any_All_Any_Any");
        assert_eq!(samples.samples(), ["S1", "S2"]);
        assert_eq!(samples.get("S1").map(|c| c.get(&any)), Some(2));
        assert_eq!(samples.get("S2").map(|c| c.get(&any)), Some(1));
        assert_eq!(samples.total().get(&any), 3);
    }

    #[test]
    fn test_missing_indicator_column_fails_fast() {
        let registry = DomainRegistry::builder()
            .extend(Domain::Conservation, ["phyloP"])
            .extend(Domain::Region, ["EncodeDHS"])
            .build()
            .unwrap();

        let err = categorize(TABLE, &registry, &matrix(), Mode::Count).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::MissingColumn(name)) if name == "EncodeDHS"
        ));
    }

    #[test]
    fn test_run_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("variants.tsv");
        let gene_matrix = dir.path().join("genes.tsv");
        let domains = dir.path().join("domains.json");

        std::fs::write(&input, TABLE).unwrap();
        std::fs::write(&gene_matrix, "gene_name\tProteinCoding\nBRCA1\t1\n").unwrap();
        std::fs::write(&domains, r#"{"conservation": ["phyloP"]}"#).unwrap();

        let args = Args {
            input,
            gene_matrix,
            domains: Some(domains),
            outdir: dir.path().join("out"),
            intersection: false,
            threads: 1,
        };

        let path = run(args).unwrap();
        assert_eq!(path, dir.path().join("out").join(CATEGORIZATION_RESULT));

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Category\tCount"));
        assert!(contents.contains("All_Any_All_Any_Any\t3\n"));
        assert!(contents.contains("SNV_ProteinCoding_phyloP_DamagingMissenseRegion_Any\t1\n"));
    }
}
