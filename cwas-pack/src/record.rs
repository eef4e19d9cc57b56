use config::{
    ALT, ANNOTATION_INT_BITS, CONSEQUENCE, FIELD_SEPARATOR, LOF, LOF_FLAGS, MPC, NEAREST, REF,
    SAMPLE, SYMBOL,
};
use hashbrown::HashMap;

use crate::{is_truthy, PackError};

const REQUIRED: [(&str, Slot); 8] = [
    (REF, Slot::Ref),
    (ALT, Slot::Alt),
    (CONSEQUENCE, Slot::Consequence),
    (SYMBOL, Slot::Symbol),
    (NEAREST, Slot::Nearest),
    (LOF, Slot::Lof),
    (LOF_FLAGS, Slot::LofFlags),
    (MPC, Slot::Mpc),
];

/// indicator values of one row, bit i mirroring term position i
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndicatorFlags(pub u64);

impl IndicatorFlags {
    pub fn from_positions<I: IntoIterator<Item = u8>>(positions: I) -> Self {
        let mut flags = Self::default();
        for pos in positions {
            flags.set(pos);
        }
        flags
    }

    #[inline(always)]
    pub fn set(&mut self, pos: u8) {
        self.0 |= 1 << pos;
    }

    #[inline(always)]
    pub fn is_set(&self, pos: u8) -> bool {
        (self.0 >> pos) & 1 == 1
    }
}

/// one annotated variant, borrowed from its table line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantRecord<'a> {
    pub sample: Option<&'a str>,
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
    pub consequence: &'a str,
    pub symbol: &'a str,
    pub nearest: &'a str,
    pub lof: &'a str,
    pub lof_flags: &'a str,
    pub mpc: &'a str,
    pub conservation: IndicatorFlags,
    pub region: IndicatorFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Skip,
    Sample,
    Ref,
    Alt,
    Consequence,
    Symbol,
    Nearest,
    Lof,
    LofFlags,
    Mpc,
    /// one column may back a conservation and a region term at once
    Indicator {
        conservation: Option<u8>,
        region: Option<u8>,
    },
}

/// column positions resolved once from a table header
///
/// Term position 0 of the conservation and region domains is the catch-all
/// and never has a column; every other term must be present as a column
/// named after it. A conservation and a region term may share a column,
/// but no term may reuse a required or SAMPLE column.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    slots: Vec<Slot>,
    width: usize,
    has_sample: bool,
}

impl ColumnLayout {
    pub fn new<S: AsRef<str>>(
        header: &str,
        conservation: &[S],
        region: &[S],
    ) -> Result<Self, PackError> {
        for terms in [conservation, region] {
            if terms.len() > ANNOTATION_INT_BITS {
                return Err(PackError::TooManyIndicators {
                    count: terms.len(),
                    max: ANNOTATION_INT_BITS,
                });
            }
        }

        let columns = header.split(FIELD_SEPARATOR).map(str::trim).enumerate().fold(
            HashMap::new(),
            |mut acc, (idx, name)| {
                acc.entry(name).or_insert(idx);
                acc
            },
        );

        let mut slots = vec![Slot::Skip; columns.values().max().map_or(0, |max| max + 1)];
        let mut width = 0;

        let mut resolve = |name: &str| -> Result<usize, PackError> {
            let idx = *columns
                .get(name)
                .ok_or_else(|| PackError::MissingColumn(name.to_string()))?;
            width = width.max(idx + 1);
            Ok(idx)
        };

        for (name, slot) in REQUIRED {
            let idx = resolve(name)?;
            slots[idx] = slot;
        }

        let has_sample = columns.contains_key(SAMPLE);
        if has_sample {
            let idx = resolve(SAMPLE)?;
            slots[idx] = Slot::Sample;
        }

        for (pos, term) in conservation.iter().enumerate().skip(1) {
            let idx = resolve(term.as_ref())?;
            slots[idx] = match slots[idx] {
                Slot::Skip => Slot::Indicator {
                    conservation: Some(pos as u8),
                    region: None,
                },
                _ => return Err(PackError::ColumnClash(term.as_ref().to_string())),
            };
        }

        for (pos, term) in region.iter().enumerate().skip(1) {
            let idx = resolve(term.as_ref())?;
            slots[idx] = match slots[idx] {
                Slot::Skip => Slot::Indicator {
                    conservation: None,
                    region: Some(pos as u8),
                },
                Slot::Indicator {
                    conservation: held,
                    region: None,
                } => Slot::Indicator {
                    conservation: held,
                    region: Some(pos as u8),
                },
                _ => return Err(PackError::ColumnClash(term.as_ref().to_string())),
            };
        }

        Ok(Self {
            slots,
            width,
            has_sample,
        })
    }

    pub fn has_sample(&self) -> bool {
        self.has_sample
    }

    /// minimum number of fields a row needs
    pub fn width(&self) -> usize {
        self.width
    }

    /// parse one data line; `line_no` is only used for error reporting
    pub fn parse<'a>(&self, line: &'a str, line_no: usize) -> Result<VariantRecord<'a>, PackError> {
        let mut record = VariantRecord::default();
        let mut found = 0;

        for (field, slot) in line.split(FIELD_SEPARATOR).zip(self.slots.iter()) {
            found += 1;
            match *slot {
                Slot::Skip => {}
                Slot::Sample => {
                    let field = field.trim();
                    if !field.is_empty() {
                        record.sample = Some(field);
                    }
                }
                Slot::Ref => record.ref_allele = field,
                Slot::Alt => record.alt_allele = field,
                Slot::Consequence => record.consequence = field,
                Slot::Symbol => record.symbol = field,
                Slot::Nearest => record.nearest = field,
                Slot::Lof => record.lof = field,
                Slot::LofFlags => record.lof_flags = field,
                Slot::Mpc => record.mpc = field,
                Slot::Indicator {
                    conservation,
                    region,
                } => {
                    if is_truthy(field) {
                        if let Some(pos) = conservation {
                            record.conservation.set(pos);
                        }
                        if let Some(pos) = region {
                            record.region.set(pos);
                        }
                    }
                }
            }
        }

        if found < self.width {
            return Err(PackError::ShortRow {
                line: line_no,
                found,
                expected: self.width,
            });
        }

        Ok(record)
    }
}
