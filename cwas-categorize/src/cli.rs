use clap::{ArgAction, Parser};
use config::ArgCheck;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        required = true,
        value_name = "PATH",
        help = "Path to the annotated, tab-separated variant table"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'g',
        long = "gene-matrix",
        required = true,
        value_name = "PATH",
        help = "Path to the gene matrix [gene symbol x gene-list category, 0/1]"
    )]
    pub gene_matrix: PathBuf,

    #[arg(
        short = 'd',
        long = "domains",
        required = false,
        value_name = "PATH",
        help = "Path to a JSON file with extra domain terms and redundant pairs"
    )]
    pub domains: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "outdir",
        required = false,
        value_name = "PATH",
        default_value = ".",
        help = "Output directory"
    )]
    pub outdir: PathBuf,

    #[arg(
        short = 'x',
        long = "intersection",
        help = "Flag to count category co-occurrences instead of categories",
        value_name = "FLAG",
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set,
    )]
    pub intersection: bool,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = num_cpus::get()
    )]
    pub threads: usize,
}

impl ArgCheck for Args {
    fn get_variants(&self) -> &PathBuf {
        &self.input
    }

    fn get_gene_matrix(&self) -> &PathBuf {
        &self.gene_matrix
    }

    fn get_domains(&self) -> Option<&PathBuf> {
        self.domains.as_ref()
    }

    fn get_outdir(&self) -> &PathBuf {
        &self.outdir
    }
}

impl Args {
    /// parse a raw argument list, program name excluded
    pub fn from(args: Vec<String>) -> Result<Self, clap::Error> {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::try_parse_from(full_args)
    }
}
