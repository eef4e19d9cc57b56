use std::fmt::Debug;
use std::path::Path;

use config::{FIELD_SEPARATOR, GENE_ID, GENE_NAME};
use hashbrown::{HashMap, HashSet};
use log::info;
use rayon::prelude::*;

use crate::{is_truthy, reader, split_table, PackError};

pub type Memberships = HashSet<String>;

/// gene symbol -> gene-list categories it belongs to
///
/// Read-only once built. Genes absent from the matrix simply have no
/// memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneMatrix {
    categories: Vec<String>,
    genes: HashMap<String, Memberships>,
}

impl GeneMatrix {
    pub fn from_path<P: AsRef<Path> + Debug>(path: P) -> Result<Self, PackError> {
        let contents = reader(path)?;
        Self::parse(&contents)
    }

    /// parse a tab-separated 0/1 matrix
    ///
    /// The `gene_name` column (or the first column when there is none)
    /// holds the symbol, a `gene_id` column is ignored and every other
    /// column is a category.
    pub fn parse(contents: &str) -> Result<Self, PackError> {
        let (header, body) = split_table(contents)?;
        let columns: Vec<&str> = header.split(FIELD_SEPARATOR).map(str::trim).collect();

        let symbol_idx = columns.iter().position(|c| *c == GENE_NAME).unwrap_or(0);
        let category_idx: Vec<(usize, &str)> = columns
            .iter()
            .enumerate()
            .filter(|(idx, name)| *idx != symbol_idx && **name != GENE_ID && !name.is_empty())
            .map(|(idx, name)| (idx, *name))
            .collect();

        if category_idx.is_empty() {
            return Err(PackError::NoCategories);
        }

        let genes = body
            .par_iter()
            .fold(HashMap::new, |mut acc: HashMap<String, Memberships>, (_, line)| {
                let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
                let Some(symbol) = fields.get(symbol_idx).map(|s| s.trim()) else {
                    return acc;
                };
                if symbol.is_empty() {
                    return acc;
                }

                let entry = acc.entry_ref(symbol).or_default();
                for (idx, category) in category_idx.iter() {
                    if fields.get(*idx).is_some_and(|v| is_truthy(v)) {
                        entry.insert(category.to_string());
                    }
                }
                acc
            })
            .reduce(HashMap::new, |mut acc, map| {
                for (gene, memberships) in map {
                    acc.entry(gene).or_default().extend(memberships);
                }
                acc
            });

        info!(
            "Gene matrix parsed: {} genes across {} categories",
            genes.len(),
            category_idx.len()
        );

        Ok(Self {
            categories: category_idx
                .into_iter()
                .map(|(_, name)| name.to_string())
                .collect(),
            genes,
        })
    }

    /// build a matrix from (gene, categories) pairs; category order
    /// follows first appearance
    pub fn from_memberships<I, G, C, S>(memberships: I) -> Self
    where
        I: IntoIterator<Item = (G, C)>,
        G: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matrix = Self::default();
        let mut seen = HashSet::new();

        for (gene, categories) in memberships {
            let entry = matrix.genes.entry(gene.into()).or_default();
            for category in categories {
                let category = category.into();
                if seen.insert(category.clone()) {
                    matrix.categories.push(category.clone());
                }
                entry.insert(category);
            }
        }

        matrix
    }

    /// category names in column order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn memberships(&self, gene: &str) -> Option<&Memberships> {
        self.genes.get(gene)
    }

    pub fn is_member(&self, gene: &str, category: &str) -> bool {
        self.genes
            .get(gene)
            .is_some_and(|memberships| memberships.contains(category))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Memberships)> {
        self.genes.iter()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
