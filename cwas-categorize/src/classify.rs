//! Per-domain classifiers
//!
//! Each classifier turns one variant into the annotation int of a single
//! domain. All of them are pure: they read the record, the frozen
//! registry and the gene profiles, and always set the catch-all bit.

use config::{
    CODING_CONSEQUENCES, DAMAGING_MISSENSE_THRESHOLD, FRAMESHIFT_CONSEQUENCE, HIGH_CONFIDENCE_LOF,
    INFRAME_CONSEQUENCES, INTERGENIC_CONSEQUENCES, INTRON_CONSEQUENCE, LINC_RNA,
    LOF_CONSEQUENCES, MISSENSE_CONSEQUENCES, MISSING_VALUE, NUM_DOMAINS, PROTEIN_CODING,
    SINGLE_EXON_FLAG, SPLICE_REGION_CONSEQUENCE, SYNONYMOUS_CONSEQUENCE, UPSTREAM_CONSEQUENCE,
    UTR_CONSEQUENCE,
};
use cwas_pack::{GeneMatrix, IndicatorFlags, VariantRecord};
use hashbrown::HashMap;

use crate::domain::{
    AnnotationInt, Domain, DomainRegistry, GencodeBits, VariantTypeBits, CATCH_ALL,
};

const UNKNOWN_GENE: GeneProfile = GeneProfile {
    gene_list: 0,
    protein_coding: false,
    linc_rna: false,
};

/// one annotation int per domain, indexed by `Domain::index`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnnotationInts(pub [AnnotationInt; NUM_DOMAINS]);

impl AnnotationInts {
    #[inline(always)]
    pub fn get(&self, domain: Domain) -> AnnotationInt {
        self.0[domain.index()]
    }

    /// OR `mask` into the domain's int
    #[inline(always)]
    pub fn insert(&mut self, domain: Domain, mask: AnnotationInt) {
        self.0[domain.index()] |= mask;
    }

    pub fn contains(&self, domain: Domain, mask: AnnotationInt) -> bool {
        self.get(domain) & mask == mask
    }
}

/// what the classifiers need to know about a gene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneProfile {
    /// gene-list bits of every registered category the gene belongs to
    pub gene_list: AnnotationInt,
    pub protein_coding: bool,
    pub linc_rna: bool,
}

/// classifies records against a registry and a gene matrix
#[derive(Debug, Clone)]
pub struct Categorizer<'a> {
    registry: &'a DomainRegistry,
    profiles: HashMap<String, GeneProfile>,
    conservation_mask: AnnotationInt,
    region_mask: AnnotationInt,
}

impl<'a> Categorizer<'a> {
    pub fn new(registry: &'a DomainRegistry, matrix: &GeneMatrix) -> Self {
        let profiles = matrix
            .iter()
            .map(|(gene, memberships)| {
                let gene_list = memberships
                    .iter()
                    .filter_map(|category| registry.mask(Domain::GeneList, category))
                    .fold(0, |acc, mask| acc | mask);

                let profile = GeneProfile {
                    gene_list,
                    protein_coding: memberships.contains(PROTEIN_CODING),
                    linc_rna: memberships.contains(LINC_RNA),
                };

                (gene.clone(), profile)
            })
            .collect();

        Self {
            registry,
            profiles,
            conservation_mask: width_mask(registry.terms(Domain::Conservation).len()),
            region_mask: width_mask(registry.terms(Domain::Region).len()),
        }
    }

    /// profile of a gene; unknown genes have no memberships
    #[inline(always)]
    pub fn profile(&self, gene: &str) -> &GeneProfile {
        self.profiles.get(gene).unwrap_or(&UNKNOWN_GENE)
    }

    /// run all five classifiers on one record
    #[inline(always)]
    pub fn annotate(&self, record: &VariantRecord) -> AnnotationInts {
        let profile = self.profile(acting_gene(record));
        let mut ints = AnnotationInts::default();

        ints.insert(
            Domain::VariantType,
            annotate_variant_type(record, self.registry.variant_type_bits()),
        );
        ints.insert(Domain::GeneList, annotate_gene_list(profile));
        ints.insert(
            Domain::Conservation,
            annotate_indicators(record.conservation, self.conservation_mask),
        );
        ints.insert(
            Domain::Gencode,
            annotate_gencode(record, profile, self.registry.gencode_bits()),
        );
        ints.insert(
            Domain::Region,
            annotate_indicators(record.region, self.region_mask),
        );

        ints
    }
}

/// bits available to a domain with `n_terms` terms
fn width_mask(n_terms: usize) -> AnnotationInt {
    if n_terms >= AnnotationInt::BITS as usize {
        AnnotationInt::MAX
    } else {
        (1 << n_terms) - 1
    }
}

#[inline(always)]
fn contains_any(consequence: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| consequence.contains(token))
}

/// nearest gene for downstream/intergenic variants, own symbol otherwise
#[inline(always)]
pub fn acting_gene<'a>(record: &VariantRecord<'a>) -> &'a str {
    if contains_any(record.consequence, &INTERGENIC_CONSEQUENCES) {
        record.nearest.trim()
    } else {
        record.symbol.trim()
    }
}

#[inline(always)]
pub fn annotate_variant_type(record: &VariantRecord, bits: &VariantTypeBits) -> AnnotationInt {
    let is_snv = record.ref_allele.trim().len() == 1 && record.alt_allele.trim().len() == 1;
    bits.all | if is_snv { bits.snv } else { bits.indel }
}

/// additive indicator classifier shared by conservation and region
#[inline(always)]
pub fn annotate_indicators(flags: IndicatorFlags, mask: AnnotationInt) -> AnnotationInt {
    (flags.0 & mask) | CATCH_ALL
}

pub fn annotate_conservation(record: &VariantRecord, registry: &DomainRegistry) -> AnnotationInt {
    annotate_indicators(
        record.conservation,
        width_mask(registry.terms(Domain::Conservation).len()),
    )
}

pub fn annotate_region(record: &VariantRecord, registry: &DomainRegistry) -> AnnotationInt {
    annotate_indicators(
        record.region,
        width_mask(registry.terms(Domain::Region).len()),
    )
}

#[inline(always)]
pub fn annotate_gene_list(profile: &GeneProfile) -> AnnotationInt {
    profile.gene_list | CATCH_ALL
}

/// high-confidence LoF call with an empty or single-exon flag
#[inline(always)]
fn is_lof(record: &VariantRecord) -> bool {
    let flags = record.lof_flags.trim();
    record.lof.trim() == HIGH_CONFIDENCE_LOF && (flags.is_empty() || flags == SINGLE_EXON_FLAG)
}

/// MPC at or above the damaging threshold; empty, NA and unparsable
/// scores are absent
#[inline(always)]
pub fn is_damaging(mpc: &str) -> bool {
    let mpc = mpc.trim();
    if mpc.is_empty() || mpc == MISSING_VALUE {
        return false;
    }

    mpc.parse::<f64>()
        .is_ok_and(|score| score >= DAMAGING_MISSENSE_THRESHOLD)
}

/// GENCODE classifier
///
/// Coding sub-regions follow a first-match precedence: LoF, frameshift
/// LoF, missense, in-frame, silent. A protein-coding hit whose
/// consequence carries no coding token at all is reclassified as
/// non-coding and loses every bit set so far.
pub fn annotate_gencode(
    record: &VariantRecord,
    profile: &GeneProfile,
    bits: &GencodeBits,
) -> AnnotationInt {
    let consequence = record.consequence;
    let mut int = 0;
    let mut coding = false;

    if profile.protein_coding {
        coding = true;
        int |= bits.coding;

        let lof = is_lof(record);
        if lof && contains_any(consequence, &LOF_CONSEQUENCES) {
            int |= bits.lof;
        } else if lof && consequence.contains(FRAMESHIFT_CONSEQUENCE) {
            int |= bits.lof | bits.frameshift;
        } else if contains_any(consequence, &MISSENSE_CONSEQUENCES) {
            int |= bits.missense;
            if is_damaging(record.mpc) {
                int |= bits.damaging_missense;
            }
        } else if contains_any(consequence, &INFRAME_CONSEQUENCES) {
            int |= bits.inframe;
        } else if consequence.contains(SYNONYMOUS_CONSEQUENCE) {
            int |= bits.silent;
        } else if !contains_any(consequence, &CODING_CONSEQUENCES) {
            int = 0;
            coding = false;
        }
    }

    if !coding {
        int |= bits.noncoding;

        if consequence.contains(UTR_CONSEQUENCE) {
            int |= bits.utrs;
        } else if consequence.contains(UPSTREAM_CONSEQUENCE) {
            int |= bits.promoter;
        } else if consequence.contains(INTRON_CONSEQUENCE) {
            int |= bits.intron;
        } else if consequence.contains(SPLICE_REGION_CONSEQUENCE) {
            int |= bits.splice_site_noncanon;
        } else if contains_any(consequence, &INTERGENIC_CONSEQUENCES) {
            int |= bits.intergenic;
        } else if !profile.protein_coding {
            int |= if profile.linc_rna {
                bits.linc_rna
            } else {
                bits.other_transcript
            };
        }
    }

    int | bits.any
}
