//! Expansion of per-domain annotation ints into categories
//!
//! A variant belongs to every combination of one on-term per domain. The
//! combinations are walked lazily as an odometer over five small term
//! lists (last domain fastest, so keys come out in Cartesian order) and
//! anything containing a registered redundant pair is dropped before it
//! ever reaches an aggregate.

use config::{ANNOTATION_INT_BITS, NUM_DOMAINS};

use crate::classify::AnnotationInts;
use crate::domain::{Domain, DomainRegistry};

/// one category: the term position chosen in each domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryKey(pub [u8; NUM_DOMAINS]);

impl CategoryKey {
    #[inline(always)]
    pub fn term(&self, domain: Domain) -> u8 {
        self.0[domain.index()]
    }
}

/// on-term positions per domain, in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLists {
    terms: [[u8; ANNOTATION_INT_BITS]; NUM_DOMAINS],
    lens: [usize; NUM_DOMAINS],
}

impl TermLists {
    fn empty() -> Self {
        Self {
            terms: [[0; ANNOTATION_INT_BITS]; NUM_DOMAINS],
            lens: [0; NUM_DOMAINS],
        }
    }

    #[inline(always)]
    fn push(&mut self, domain: Domain, pos: u8) {
        let idx = domain.index();
        self.terms[idx][self.lens[idx]] = pos;
        self.lens[idx] += 1;
    }

    pub fn from_ints(ints: &AnnotationInts) -> Self {
        let mut lists = Self::empty();
        for domain in Domain::ORDER {
            let mut int = ints.get(domain);
            while int != 0 {
                lists.push(domain, int.trailing_zeros() as u8);
                int &= int - 1;
            }
        }
        lists
    }

    /// every term of every domain
    pub fn full(registry: &DomainRegistry) -> Self {
        let mut lists = Self::empty();
        for domain in Domain::ORDER {
            for pos in 0..registry.terms(domain).len() {
                lists.push(domain, pos as u8);
            }
        }
        lists
    }

    pub fn get(&self, domain: Domain) -> &[u8] {
        let idx = domain.index();
        &self.terms[idx][..self.lens[idx]]
    }

    /// number of combinations before redundancy filtering
    pub fn product_len(&self) -> usize {
        self.lens.iter().product()
    }

    pub fn product(&self) -> Product<'_> {
        Product {
            lists: self,
            cursor: [0; NUM_DOMAINS],
            exhausted: self.lens.contains(&0),
        }
    }
}

/// lazy Cartesian product over `TermLists`
#[derive(Debug, Clone)]
pub struct Product<'a> {
    lists: &'a TermLists,
    cursor: [usize; NUM_DOMAINS],
    exhausted: bool,
}

impl Iterator for Product<'_> {
    type Item = CategoryKey;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let mut key = [0; NUM_DOMAINS];
        for (idx, slot) in key.iter_mut().enumerate() {
            *slot = self.lists.terms[idx][self.cursor[idx]];
        }

        let mut idx = NUM_DOMAINS;
        loop {
            if idx == 0 {
                self.exhausted = true;
                break;
            }
            idx -= 1;

            self.cursor[idx] += 1;
            if self.cursor[idx] < self.lists.lens[idx] {
                break;
            }
            self.cursor[idx] = 0;
        }

        Some(CategoryKey(key))
    }
}

/// expands annotation ints into non-redundant categories
#[derive(Debug, Clone, Copy)]
pub struct Combinator<'a> {
    registry: &'a DomainRegistry,
}

impl<'a> Combinator<'a> {
    pub fn new(registry: &'a DomainRegistry) -> Self {
        Self { registry }
    }

    /// non-redundant combinations of `lists`, lazily
    pub fn valid<'l>(&'l self, lists: &'l TermLists) -> impl Iterator<Item = CategoryKey> + 'l {
        let registry: &'l DomainRegistry = self.registry;
        lists.product().filter(move |key| !registry.is_redundant(key))
    }

    pub fn combinations(&self, ints: &AnnotationInts) -> Vec<CategoryKey> {
        let mut combinations = Vec::new();
        self.combinations_into(ints, &mut combinations);
        combinations
    }

    /// refill `buf` with the valid combinations of one variant
    #[inline(always)]
    pub fn combinations_into(&self, ints: &AnnotationInts, buf: &mut Vec<CategoryKey>) {
        buf.clear();
        let lists = TermLists::from_ints(ints);
        buf.extend(self.valid(&lists));
    }
}
