//! Annotation domains and the registry that freezes them
//! Alejandro Gonzales-Irribarren, 2025
//!
//! A domain is an ordered list of annotation terms; a term's position is
//! its bit in the domain's annotation int. The registry is built once per
//! run from the built-in defaults plus externally supplied terms (score
//! keys, gene-list categories, custom region keys) and is read-only from
//! then on. Building resolves everything the hot path needs: term
//! positions, the masks of the fixed terms the classifiers address, and
//! the redundant pairs as per-rule bit matrices.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{ANNOTATION_INT_BITS, CATEGORY_SEPARATOR, NUM_DOMAINS};
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combine::{CategoryKey, TermLists};

pub type AnnotationInt = u64;

/// mask of the catch-all term, always at position 0
pub const CATCH_ALL: AnnotationInt = 1;

pub const ALL: &str = "All";
pub const ANY: &str = "Any";

const VARIANT_TYPE_TERMS: [&str; 3] = [ALL, "SNV", "Indel"];
const GENCODE_TERMS: [&str; 16] = [
    ANY,
    "CodingRegion",
    "FrameshiftRegion",
    "InFrameRegion",
    "SilentRegion",
    "LoFRegion",
    "DamagingMissenseRegion",
    "MissenseRegion",
    "NoncodingRegion",
    "SpliceSiteNoncanonRegion",
    "IntronRegion",
    "PromoterRegion",
    "IntergenicRegion",
    "UTRsRegion",
    "lincRnaRegion",
    "OtherTranscriptRegion",
];

const REDUNDANT_VARIANT_TYPE_GENCODE: [(&str, &str); 10] = [
    (ALL, "FrameshiftRegion"),
    (ALL, "InFrameRegion"),
    (ALL, "DamagingMissenseRegion"),
    (ALL, "MissenseRegion"),
    (ALL, "SilentRegion"),
    ("Indel", "DamagingMissenseRegion"),
    ("Indel", "MissenseRegion"),
    ("Indel", "SilentRegion"),
    ("SNV", "FrameshiftRegion"),
    ("SNV", "InFrameRegion"),
];

const REDUNDANT_GENE_LIST_GENCODE: [(&str, &str); 9] = [
    (ANY, "CodingRegion"),
    (ANY, "FrameshiftRegion"),
    (ANY, "InFrameRegion"),
    (ANY, "LoFRegion"),
    (ANY, "DamagingMissenseRegion"),
    (ANY, "MissenseRegion"),
    (ANY, "SilentRegion"),
    (ANY, "lincRnaRegion"),
    ("lincRNA", ANY),
];

/// the five annotation domains, in combination order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    VariantType,
    GeneList,
    Conservation,
    Gencode,
    Region,
}

impl Domain {
    pub const ORDER: [Domain; NUM_DOMAINS] = [
        Domain::VariantType,
        Domain::GeneList,
        Domain::Conservation,
        Domain::Gencode,
        Domain::Region,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::VariantType => "variant_type",
            Domain::GeneList => "gene_list",
            Domain::Conservation => "conservation",
            Domain::Gencode => "gencode",
            Domain::Region => "region",
        }
    }

    /// term every variant carries in this domain
    pub fn catch_all(self) -> &'static str {
        match self {
            Domain::VariantType | Domain::Conservation => ALL,
            Domain::GeneList | Domain::Gencode | Domain::Region => ANY,
        }
    }

    fn default_terms(self) -> &'static [&'static str] {
        match self {
            Domain::VariantType => &VARIANT_TYPE_TERMS,
            Domain::Gencode => &GENCODE_TERMS,
            Domain::Conservation => &[ALL],
            Domain::GeneList | Domain::Region => &[ANY],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ORDER
            .into_iter()
            .find(|domain| domain.name() == s)
            .ok_or_else(|| DomainError::UnknownDomain(s.to_string()))
    }
}

/// configuration errors, all raised before any row is classified
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("ERROR: unknown domain {0:?}")]
    UnknownDomain(String),
    #[error("ERROR: domain {0} has no terms")]
    EmptyDomain(Domain),
    #[error("ERROR: domain {domain} has {count} terms, an annotation int holds at most {max}")]
    TooManyTerms {
        domain: Domain,
        count: usize,
        max: usize,
    },
    #[error("ERROR: term {term:?} appears more than once in domain {domain}")]
    DuplicateTerm { domain: Domain, term: String },
    #[error("ERROR: domain {domain} must start with {expected:?}, found {found:?}")]
    MissingCatchAll {
        domain: Domain,
        expected: &'static str,
        found: String,
    },
    #[error("ERROR: domain {domain} is missing the term {term:?}")]
    MissingTerm { domain: Domain, term: String },
    #[error("ERROR: redundant pairs must span two domains, got {0} on both sides")]
    SameDomainPair(Domain),
    #[error("ERROR: invalid domain configuration: {0}")]
    Config(String),
}

/// masks of the variant-type terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantTypeBits {
    pub all: AnnotationInt,
    pub snv: AnnotationInt,
    pub indel: AnnotationInt,
}

/// masks of the GENCODE terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GencodeBits {
    pub any: AnnotationInt,
    pub coding: AnnotationInt,
    pub frameshift: AnnotationInt,
    pub inframe: AnnotationInt,
    pub silent: AnnotationInt,
    pub lof: AnnotationInt,
    pub damaging_missense: AnnotationInt,
    pub missense: AnnotationInt,
    pub noncoding: AnnotationInt,
    pub splice_site_noncanon: AnnotationInt,
    pub intron: AnnotationInt,
    pub promoter: AnnotationInt,
    pub intergenic: AnnotationInt,
    pub utrs: AnnotationInt,
    pub linc_rna: AnnotationInt,
    pub other_transcript: AnnotationInt,
}

/// redundant term pairs between two domains;
/// bit `j` of `matrix[i]` marks (first:i, second:j)
#[derive(Debug, Clone, PartialEq, Eq)]
struct RedundantRule {
    first: Domain,
    second: Domain,
    matrix: Vec<AnnotationInt>,
}

impl RedundantRule {
    fn mark(&mut self, a: (Domain, u8), b: (Domain, u8)) {
        let (first, second) = if a.0 == self.first { (a.1, b.1) } else { (b.1, a.1) };
        self.matrix[first as usize] |= 1 << second;
    }

    #[inline(always)]
    fn matches(&self, key: &CategoryKey) -> bool {
        self.matrix
            .get(key.term(self.first) as usize)
            .is_some_and(|row| (row >> key.term(self.second)) & 1 == 1)
    }

    fn len(&self) -> usize {
        self.matrix.iter().map(|row| row.count_ones() as usize).sum()
    }
}

#[derive(Debug, Clone)]
pub struct DomainRegistryBuilder {
    terms: [Vec<String>; NUM_DOMAINS],
    redundant: Vec<(Domain, Domain, Vec<(String, String)>)>,
}

impl Default for DomainRegistryBuilder {
    fn default() -> Self {
        let mut builder = Self::empty();
        for domain in Domain::ORDER {
            builder = builder.extend(domain, domain.default_terms().iter().copied());
        }

        builder
            .redundant(
                Domain::VariantType,
                Domain::Gencode,
                REDUNDANT_VARIANT_TYPE_GENCODE,
            )
            .redundant(Domain::GeneList, Domain::Gencode, REDUNDANT_GENE_LIST_GENCODE)
    }
}

impl DomainRegistryBuilder {
    /// a builder with no terms and no redundant pairs at all
    pub fn empty() -> Self {
        Self {
            terms: Default::default(),
            redundant: Vec::new(),
        }
    }

    /// append terms to a domain, keeping their order
    pub fn extend<I, S>(mut self, domain: Domain, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms[domain.index()].extend(terms.into_iter().map(Into::into));
        self
    }

    /// declare (a-term, b-term) pairs redundant
    pub fn redundant<I, A, B>(mut self, a: Domain, b: Domain, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(ta, tb)| (ta.into(), tb.into()))
            .collect();
        self.redundant.push((a, b, pairs));
        self
    }

    pub fn apply(self, config: &DomainConfig) -> Self {
        let mut builder = self
            .extend(Domain::Conservation, config.conservation.iter().cloned())
            .extend(Domain::GeneList, config.gene_list.iter().cloned())
            .extend(Domain::Region, config.region.iter().cloned());

        for rule in config.redundant.iter() {
            builder = builder.redundant(
                rule.domains[0],
                rule.domains[1],
                rule.pairs.iter().map(|[a, b]| (a.clone(), b.clone())),
            );
        }

        builder
    }

    pub fn build(self) -> Result<DomainRegistry, DomainError> {
        let mut positions: [HashMap<String, u8>; NUM_DOMAINS] = Default::default();

        for domain in Domain::ORDER {
            let terms = &self.terms[domain.index()];

            if terms.is_empty() {
                return Err(DomainError::EmptyDomain(domain));
            }
            if terms.len() > ANNOTATION_INT_BITS {
                return Err(DomainError::TooManyTerms {
                    domain,
                    count: terms.len(),
                    max: ANNOTATION_INT_BITS,
                });
            }
            if terms[0] != domain.catch_all() {
                return Err(DomainError::MissingCatchAll {
                    domain,
                    expected: domain.catch_all(),
                    found: terms[0].clone(),
                });
            }

            for (pos, term) in terms.iter().enumerate() {
                if positions[domain.index()]
                    .insert(term.clone(), pos as u8)
                    .is_some()
                {
                    return Err(DomainError::DuplicateTerm {
                        domain,
                        term: term.clone(),
                    });
                }
            }
        }

        let mask = |domain: Domain, term: &str| -> Result<AnnotationInt, DomainError> {
            positions[domain.index()]
                .get(term)
                .map(|pos| 1 << *pos)
                .ok_or_else(|| DomainError::MissingTerm {
                    domain,
                    term: term.to_string(),
                })
        };

        let variant_type = VariantTypeBits {
            all: mask(Domain::VariantType, ALL)?,
            snv: mask(Domain::VariantType, "SNV")?,
            indel: mask(Domain::VariantType, "Indel")?,
        };

        let gencode = |term: &str| mask(Domain::Gencode, term);
        let gencode = GencodeBits {
            any: gencode(ANY)?,
            coding: gencode("CodingRegion")?,
            frameshift: gencode("FrameshiftRegion")?,
            inframe: gencode("InFrameRegion")?,
            silent: gencode("SilentRegion")?,
            lof: gencode("LoFRegion")?,
            damaging_missense: gencode("DamagingMissenseRegion")?,
            missense: gencode("MissenseRegion")?,
            noncoding: gencode("NoncodingRegion")?,
            splice_site_noncanon: gencode("SpliceSiteNoncanonRegion")?,
            intron: gencode("IntronRegion")?,
            promoter: gencode("PromoterRegion")?,
            intergenic: gencode("IntergenicRegion")?,
            utrs: gencode("UTRsRegion")?,
            linc_rna: gencode("lincRnaRegion")?,
            other_transcript: gencode("OtherTranscriptRegion")?,
        };

        let mut rules: Vec<RedundantRule> = Vec::new();
        for (a, b, pairs) in self.redundant {
            if a == b {
                return Err(DomainError::SameDomainPair(a));
            }

            let idx = match rules
                .iter()
                .position(|r| (r.first, r.second) == (a, b) || (r.first, r.second) == (b, a))
            {
                Some(idx) => idx,
                None => {
                    rules.push(RedundantRule {
                        first: a,
                        second: b,
                        matrix: vec![0; self.terms[a.index()].len()],
                    });
                    rules.len() - 1
                }
            };

            for (ta, tb) in pairs {
                match (
                    positions[a.index()].get(&ta),
                    positions[b.index()].get(&tb),
                ) {
                    (Some(&pa), Some(&pb)) => rules[idx].mark((a, pa), (b, pb)),
                    _ => debug!(
                        "Redundant pair ({}:{}, {}:{}) names an unregistered term. Skipping...",
                        a, ta, b, tb
                    ),
                }
            }
        }
        rules.retain(|rule| rule.len() > 0);

        Ok(DomainRegistry {
            terms: self.terms,
            positions,
            variant_type,
            gencode,
            rules,
        })
    }
}

/// immutable, validated set of annotation domains
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    terms: [Vec<String>; NUM_DOMAINS],
    positions: [HashMap<String, u8>; NUM_DOMAINS],
    variant_type: VariantTypeBits,
    gencode: GencodeBits,
    rules: Vec<RedundantRule>,
}

impl DomainRegistry {
    /// builder seeded with the built-in domains and redundant pairs
    pub fn builder() -> DomainRegistryBuilder {
        DomainRegistryBuilder::default()
    }

    pub fn terms(&self, domain: Domain) -> &[String] {
        &self.terms[domain.index()]
    }

    pub fn term(&self, domain: Domain, pos: u8) -> Option<&str> {
        self.terms[domain.index()]
            .get(pos as usize)
            .map(String::as_str)
    }

    pub fn position(&self, domain: Domain, term: &str) -> Option<u8> {
        self.positions[domain.index()].get(term).copied()
    }

    pub fn mask(&self, domain: Domain, term: &str) -> Option<AnnotationInt> {
        self.position(domain, term).map(|pos| 1 << pos)
    }

    pub fn variant_type_bits(&self) -> &VariantTypeBits {
        &self.variant_type
    }

    pub fn gencode_bits(&self) -> &GencodeBits {
        &self.gencode
    }

    /// number of registered redundant pairs across all domain pairs
    pub fn redundant_pairs(&self) -> usize {
        self.rules.iter().map(RedundantRule::len).sum()
    }

    /// true when any registered redundant pair matches the key
    #[inline(always)]
    pub fn is_redundant(&self, key: &CategoryKey) -> bool {
        self.rules.iter().any(|rule| rule.matches(key))
    }

    /// category name, one term per domain joined by `_`
    pub fn render(&self, key: &CategoryKey) -> String {
        Domain::ORDER
            .iter()
            .map(|domain| self.term(*domain, key.term(*domain)).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(CATEGORY_SEPARATOR)
    }

    /// every non-redundant category, in Cartesian order
    pub fn category_keys(&self) -> Vec<CategoryKey> {
        let lists = TermLists::full(self);
        lists
            .product()
            .filter(|key| !self.is_redundant(key))
            .collect()
    }

    pub fn category_names(&self) -> Vec<String> {
        self.category_keys()
            .iter()
            .map(|key| self.render(key))
            .collect()
    }
}

/// externally supplied domain terms and extra redundant pairs
///
/// ```json
/// {
///   "conservation": ["phyloP46wayVt", "phastCons46wayVt"],
///   "region": ["EncodeDHS"],
///   "redundant": [{ "domains": ["gene_list", "region"], "pairs": [["Any", "EncodeDHS"]] }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub conservation: Vec<String>,
    pub gene_list: Vec<String>,
    pub region: Vec<String>,
    pub redundant: Vec<RedundantPairs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundantPairs {
    pub domains: [Domain; 2],
    pub pairs: Vec<[String; 2]>,
}

impl DomainConfig {
    pub fn from_json(contents: &str) -> Result<Self, DomainError> {
        serde_json::from_str(contents).map_err(|e| DomainError::Config(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DomainError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(registry: &DomainRegistry, terms: [&str; NUM_DOMAINS]) -> CategoryKey {
        let mut positions = [0; NUM_DOMAINS];
        for (domain, term) in Domain::ORDER.into_iter().zip(terms) {
            positions[domain.index()] = registry.position(domain, term).unwrap();
        }
        CategoryKey(positions)
    }

    #[test]
    fn test_default_registry_layout() {
        let registry = DomainRegistry::builder().build().unwrap();

        assert_eq!(registry.terms(Domain::VariantType), &["All", "SNV", "Indel"]);
        assert_eq!(registry.terms(Domain::Gencode).len(), 16);
        assert_eq!(registry.terms(Domain::Conservation), &["All"]);
        assert_eq!(registry.position(Domain::Gencode, "MissenseRegion"), Some(7));
        assert_eq!(registry.variant_type_bits().snv, 0b10);
        assert_eq!(registry.gencode_bits().coding, 0b10);
        assert_eq!(registry.gencode_bits().other_transcript, 1 << 15);
        for domain in Domain::ORDER {
            assert_eq!(registry.mask(domain, domain.catch_all()), Some(CATCH_ALL));
        }
    }

    #[test]
    fn test_unregistered_redundant_terms_are_dropped() {
        // ("lincRNA", "Any") only lands once lincRNA is a gene list
        let registry = DomainRegistry::builder().build().unwrap();
        assert_eq!(registry.redundant_pairs(), 18);

        let registry = DomainRegistry::builder()
            .extend(Domain::GeneList, ["ProteinCoding", "lincRNA"])
            .build()
            .unwrap();
        assert_eq!(registry.redundant_pairs(), 19);
        assert!(registry.is_redundant(&key(
            &registry,
            ["SNV", "lincRNA", "All", "Any", "Any"]
        )));
    }

    #[test]
    fn test_redundant_pairs_match_exactly() {
        let registry = DomainRegistry::builder()
            .extend(Domain::GeneList, ["ProteinCoding"])
            .build()
            .unwrap();

        let snv_frameshift = key(
            &registry,
            ["SNV", "ProteinCoding", "All", "FrameshiftRegion", "Any"],
        );
        let indel_frameshift = key(
            &registry,
            ["Indel", "ProteinCoding", "All", "FrameshiftRegion", "Any"],
        );
        let any_coding = key(&registry, ["Indel", "Any", "All", "CodingRegion", "Any"]);

        assert!(registry.is_redundant(&snv_frameshift));
        assert!(!registry.is_redundant(&indel_frameshift));
        assert!(registry.is_redundant(&any_coding));
    }

    #[test]
    fn test_reversed_domain_pair_merges_into_one_rule() {
        let registry = DomainRegistry::builder()
            .extend(Domain::GeneList, ["ProteinCoding"])
            .redundant(Domain::Gencode, Domain::VariantType, [("LoFRegion", "SNV")])
            .build()
            .unwrap();

        assert_eq!(registry.redundant_pairs(), 19);
        assert!(registry.is_redundant(&key(
            &registry,
            ["SNV", "ProteinCoding", "All", "LoFRegion", "Any"]
        )));
        assert!(!registry.is_redundant(&key(
            &registry,
            ["Indel", "ProteinCoding", "All", "LoFRegion", "Any"]
        )));
    }

    #[test]
    fn test_render_category_name() {
        let registry = DomainRegistry::builder().build().unwrap();
        let key = key(&registry, ["All", "Any", "All", "CodingRegion", "Any"]);

        assert_eq!(registry.render(&key), "All_Any_All_CodingRegion_Any");
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let err = DomainRegistry::builder()
            .extend(Domain::Region, ["EncodeDHS", "EncodeDHS"])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateTerm {
                domain: Domain::Region,
                term: "EncodeDHS".to_string()
            }
        );
    }

    #[test]
    fn test_build_rejects_overflowing_domain() {
        let terms = (0..ANNOTATION_INT_BITS).map(|i| format!("region{i}"));
        let err = DomainRegistry::builder()
            .extend(Domain::Region, terms)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::TooManyTerms {
                domain: Domain::Region,
                count: ANNOTATION_INT_BITS + 1,
                max: ANNOTATION_INT_BITS
            }
        );
    }

    #[test]
    fn test_build_accepts_full_width_domain() {
        let terms = (1..ANNOTATION_INT_BITS).map(|i| format!("region{i}"));
        let registry = DomainRegistry::builder()
            .extend(Domain::Region, terms)
            .build()
            .unwrap();

        assert_eq!(registry.mask(Domain::Region, "region63"), Some(1 << 63));
    }

    #[test]
    fn test_build_rejects_missing_fixed_terms() {
        let err = DomainRegistryBuilder::empty()
            .extend(Domain::VariantType, ["All", "SNV"])
            .extend(Domain::Conservation, ["All"])
            .extend(Domain::GeneList, ["Any"])
            .extend(Domain::Gencode, ["Any"])
            .extend(Domain::Region, ["Any"])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::MissingTerm {
                domain: Domain::VariantType,
                term: "Indel".to_string()
            }
        );

        let err = DomainRegistryBuilder::empty().build().unwrap_err();
        assert_eq!(err, DomainError::EmptyDomain(Domain::VariantType));
    }

    #[test]
    fn test_build_rejects_misplaced_catch_all() {
        let err = DomainRegistryBuilder::empty()
            .extend(Domain::VariantType, ["SNV", "All", "Indel"])
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::MissingCatchAll {
                domain: Domain::VariantType,
                ..
            }
        ));
    }

    #[test]
    fn test_build_rejects_single_domain_pair() {
        let err = DomainRegistry::builder()
            .redundant(Domain::Region, Domain::Region, [("Any", "Any")])
            .build()
            .unwrap_err();

        assert_eq!(err, DomainError::SameDomainPair(Domain::Region));
    }

    #[test]
    fn test_category_keys_exclude_redundant() {
        let registry = DomainRegistry::builder().build().unwrap();
        let keys = registry.category_keys();

        // with gene list Any only, the eight coding GENCODE terms are all
        // redundant, which also covers every variant_type/gencode pair
        assert_eq!(keys.len(), 3 * (16 - 8));
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert!(keys.iter().all(|key| !registry.is_redundant(key)));

        let names = registry.category_names();
        assert_eq!(names.first().map(String::as_str), Some("All_Any_All_Any_Any"));
        assert!(!names.contains(&"SNV_Any_All_CodingRegion_Any".to_string()));
    }

    #[test]
    fn test_domain_config_from_json() {
        let config = DomainConfig::from_json(
            r#"{
                "conservation": ["phyloP"],
                "region": ["EncodeDHS", "Enhancer"],
                "redundant": [{"domains": ["gene_list", "region"], "pairs": [["Any", "Enhancer"]]}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.gene_list, Vec::<String>::new());
        assert_eq!(config.redundant[0].domains, [Domain::GeneList, Domain::Region]);

        let registry = DomainRegistry::builder().apply(&config).build().unwrap();
        assert_eq!(registry.terms(Domain::Region), &["Any", "EncodeDHS", "Enhancer"]);
        assert_eq!(registry.terms(Domain::Conservation), &["All", "phyloP"]);
        assert!(registry.is_redundant(&key(
            &registry,
            ["All", "Any", "All", "Any", "Enhancer"]
        )));
    }

    #[test]
    fn test_domain_config_rejects_unknown_domain() {
        let err = DomainConfig::from_json(
            r#"{"redundant": [{"domains": ["gene_list", "tissue"], "pairs": []}]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::Config(_)));
        assert_eq!(
            "tissue".parse::<Domain>(),
            Err(DomainError::UnknownDomain("tissue".to_string()))
        );
        assert_eq!("gencode".parse::<Domain>(), Ok(Domain::Gencode));
    }
}
