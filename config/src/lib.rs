//! Shared configuration for the cwas tools
//! Alejandro Gonzales-Irribarren, 2025
//!
//! Universal constants (column names, consequence tokens, output file
//! names) and the small helpers every tool in the workspace leans on:
//! progress bars, plain-text writers and argument validation.

pub mod fns;
pub use fns::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// numeric values
pub const ANNOTATION_INT_BITS: usize = u64::BITS as usize;
pub const NUM_DOMAINS: usize = 5;
pub const DAMAGING_MISSENSE_THRESHOLD: f64 = 2.0;

// separators and tokens
pub const CATEGORY_SEPARATOR: &str = "_";
pub const FIELD_SEPARATOR: char = '\t';
pub const COMMENT: &str = "#";
pub const MISSING_VALUE: &str = "NA";
pub const HIGH_CONFIDENCE_LOF: &str = "HC";
pub const SINGLE_EXON_FLAG: &str = "SINGLE_EXON";

// consequence tokens, matched as substrings of the Consequence field
pub const LOF_CONSEQUENCES: [&str; 3] = ["stop_gained", "splice_donor", "splice_acceptor"];
pub const FRAMESHIFT_CONSEQUENCE: &str = "frameshift_variant";
pub const MISSENSE_CONSEQUENCES: [&str; 4] = [
    "missense_variant",
    "protein_altering_variant",
    "start_lost",
    "stop_lost",
];
pub const INFRAME_CONSEQUENCES: [&str; 2] = ["inframe_deletion", "inframe_insertion"];
pub const SYNONYMOUS_CONSEQUENCE: &str = "synonymous_variant";
pub const CODING_CONSEQUENCES: [&str; 8] = [
    "stop_retained_variant",
    "incomplete_terminal_codon_variant",
    "protein_altering_variant",
    "coding_sequence_variant",
    "stop_gained",
    "splice_donor",
    "splice_acceptor",
    "frameshift_variant",
];
pub const UTR_CONSEQUENCE: &str = "_UTR_";
pub const UPSTREAM_CONSEQUENCE: &str = "upstream_gene_variant";
pub const INTRON_CONSEQUENCE: &str = "intron_variant";
pub const SPLICE_REGION_CONSEQUENCE: &str = "splice_region_variant";
pub const INTERGENIC_CONSEQUENCES: [&str; 2] = ["downstream_gene_variant", "intergenic_variant"];

// gene matrix categories read by the GENCODE classifier
pub const PROTEIN_CODING: &str = "ProteinCoding";
pub const LINC_RNA: &str = "lincRNA";

// variant table columns
pub const SAMPLE: &str = "SAMPLE";
pub const REF: &str = "REF";
pub const ALT: &str = "ALT";
pub const CONSEQUENCE: &str = "Consequence";
pub const SYMBOL: &str = "SYMBOL";
pub const NEAREST: &str = "NEAREST";
pub const LOF: &str = "LoF";
pub const LOF_FLAGS: &str = "LoF_flags";
pub const MPC: &str = "MPC";

// gene matrix columns
pub const GENE_NAME: &str = "gene_name";
pub const GENE_ID: &str = "gene_id";

// file names
pub const CATEGORIZATION_RESULT: &str = "categorization_result.tsv";
pub const INTERSECTION_MATRIX: &str = "intersection_matrix.tsv";

// accepted extensions
pub const TABLE_EXTENSIONS: [&str; 3] = ["tsv", "txt", "tab"];
pub const DOMAIN_EXTENSIONS: [&str; 1] = ["json"];
