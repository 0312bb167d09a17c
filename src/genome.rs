//! Chromosome lengths read from a fasta index.
//!
//! Any tab separated file works as long as the first column holds the
//! chromosome name and the second its length (e.g. a `.fai` or `.genome`
//! file). Row order is kept for index-file sorting.

use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::bed::{BedError, Result};
use crate::compare::ChromOrder;

const NAME_COL: usize = 0;
const SIZE_COL: usize = 1;

/// Chromosome lengths plus the order the chromosomes were listed in.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    /// Map of chromosome name to length
    sizes: FxHashMap<String, i64>,
    /// Chromosome order (preserves input file order)
    order: Vec<String>,
    /// File the genome was read from
    source: Option<PathBuf>,
}

impl Genome {
    /// Create an empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a genome from an index file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut genome = Self::from_reader(file)?;
        genome.source = Some(path.as_ref().to_path_buf());
        Ok(genome)
    }

    /// Load a genome from any reader. An input without any rows is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut genome = Self::new();
        let mut rows = 0;

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            rows += 1;

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() <= SIZE_COL {
                return Err(BedError::Parse {
                    line: line_num + 1,
                    message: format!(
                        "expected at least {} columns got {}: {}",
                        SIZE_COL + 1,
                        fields.len(),
                        line
                    ),
                });
            }

            let chrom = fields[NAME_COL];
            let size: i64 = fields[SIZE_COL].parse().map_err(|_| BedError::Parse {
                line: line_num + 1,
                message: format!("non-int size for chr {}: {}", chrom, fields[SIZE_COL]),
            })?;
            genome.insert(chrom.to_string(), size);
        }

        if rows == 0 {
            return Err(BedError::InvalidFormat("fasta index file is empty".to_string()));
        }
        Ok(genome)
    }

    /// Length of a chromosome, matched exactly.
    #[inline]
    pub fn chrom_size(&self, chrom: &str) -> Option<i64> {
        self.sizes.get(chrom).copied()
    }

    /// Check if a chromosome exists.
    #[inline]
    pub fn has_chrom(&self, chrom: &str) -> bool {
        self.sizes.contains_key(chrom)
    }

    /// Get all chromosome names in order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Rank map following the row order of the index.
    pub fn chrom_order(&self) -> ChromOrder {
        ChromOrder::from_names(&self.order)
    }

    /// File this genome was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get number of chromosomes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Insert a chromosome length (appends to order if new, a repeated name
    /// takes the latest length).
    pub fn insert(&mut self, chrom: String, size: i64) {
        if !self.sizes.contains_key(&chrom) {
            self.order.push(chrom.clone());
        }
        self.sizes.insert(chrom, size);
    }
}
