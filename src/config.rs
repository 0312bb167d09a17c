//! Run configuration.
//!
//! [`Options`] holds the user-facing settings (one-based columns, names of
//! sort types and policies). They can be overlaid by a TOML [`ConfigFile`]
//! and are validated into an immutable [`FusionConfig`] before any input is
//! read.

use crate::bed::{BedError, ColumnSpec, Result};
use crate::commands::pad::{FirstBase, PaddingPolicy};
use crate::commands::sort::SortType;
use crate::compare::ChromOrder;
use crate::genome::Genome;
use crate::interval::STOP_IDX;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

pub const DEFAULT_SORT_TYPE: &str = "lex";
pub const DEFAULT_PADDING_TYPE: &str = "err";
pub const DEFAULT_SPLIT_SIZE: i64 = 100;
pub const DEFAULT_FIRST_BASE: i64 = 1;

/// User-facing settings, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub fasta_idx: Option<PathBuf>,
    /// One-based, 0 means unset
    pub strand_col: usize,
    /// One-based, 0 means unset
    pub feat_col: usize,
    pub sort_type: String,
    pub chr_order: Vec<String>,
    pub deduplicate: bool,
    pub no_merge: bool,
    pub overlap: i64,
    pub padding: i64,
    pub padding_type: String,
    pub first_base: i64,
    pub fission: bool,
    pub split_size: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            fasta_idx: None,
            strand_col: 0,
            feat_col: 0,
            sort_type: DEFAULT_SORT_TYPE.to_string(),
            chr_order: Vec::new(),
            deduplicate: false,
            no_merge: false,
            overlap: 0,
            padding: 0,
            padding_type: DEFAULT_PADDING_TYPE.to_string(),
            first_base: DEFAULT_FIRST_BASE,
            fission: false,
            split_size: DEFAULT_SPLIT_SIZE,
        }
    }
}

/// Settings read from a TOML file. Keys mirror the long command-line flags.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub output: Option<PathBuf>,
    pub fasta_idx: Option<PathBuf>,
    pub strand_col: Option<usize>,
    pub feat_col: Option<usize>,
    pub sort_type: Option<String>,
    pub chr_order: Option<Vec<String>>,
    pub deduplicate: Option<bool>,
    pub no_merge: Option<bool>,
    pub overlap: Option<i64>,
    pub padding: Option<i64>,
    pub padding_type: Option<String>,
    pub first_base: Option<i64>,
    pub fission: Option<bool>,
    pub split_size: Option<i64>,
}

impl ConfigFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay file values onto `options`. Settings for which `explicit`
    /// returns true (given on the command line) are kept as they are.
    pub fn apply(self, options: &mut Options, explicit: impl Fn(&str) -> bool) {
        let ConfigFile {
            output,
            fasta_idx,
            strand_col,
            feat_col,
            sort_type,
            chr_order,
            deduplicate,
            no_merge,
            overlap,
            padding,
            padding_type,
            first_base,
            fission,
            split_size,
        } = self;

        macro_rules! overlay {
            ($field:ident) => {
                if let Some(value) = $field {
                    if !explicit(stringify!($field)) {
                        options.$field = value;
                    }
                }
            };
            ($field:ident, optional) => {
                if let Some(value) = $field {
                    if !explicit(stringify!($field)) {
                        options.$field = Some(value);
                    }
                }
            };
        }
        overlay!(output, optional);
        overlay!(fasta_idx, optional);
        overlay!(strand_col);
        overlay!(feat_col);
        overlay!(sort_type);
        overlay!(chr_order);
        overlay!(deduplicate);
        overlay!(no_merge);
        overlay!(overlap);
        overlay!(padding);
        overlay!(padding_type);
        overlay!(first_base);
        overlay!(fission);
        overlay!(split_size);
    }
}

/// Validated, immutable run configuration. Columns are zero-based.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub fasta_idx: Option<PathBuf>,
    pub columns: ColumnSpec,
    pub sort_type: SortType,
    /// Custom order for `ccs` sorting
    pub chr_order: Vec<String>,
    pub deduplicate: bool,
    pub merge: bool,
    pub overlap: i64,
    pub padding: i64,
    pub padding_policy: PaddingPolicy,
    pub first_base: FirstBase,
    /// Set when fission is on
    pub split_size: Option<i64>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            fasta_idx: None,
            columns: ColumnSpec::default(),
            sort_type: SortType::default(),
            chr_order: Vec::new(),
            deduplicate: false,
            merge: true,
            overlap: 0,
            padding: 0,
            padding_policy: PaddingPolicy::default(),
            first_base: FirstBase::default(),
            split_size: None,
        }
    }
}

impl FusionConfig {
    /// Rank map for the configured sort type. `fidx` needs the genome read
    /// from the fasta index.
    pub fn chrom_order(&self, genome: Option<&Genome>) -> ChromOrder {
        match self.sort_type {
            SortType::CustomOrder if self.chr_order.is_empty() => ChromOrder::human(),
            SortType::CustomOrder => ChromOrder::from_names(&self.chr_order),
            SortType::IndexOrder => genome.map(Genome::chrom_order).unwrap_or_default(),
            SortType::Lexicographic | SortType::Natural => ChromOrder::default(),
        }
    }
}

/// Convert a one-based grouping column to zero-based, rejecting the
/// coordinate columns.
fn grouping_column(col: usize, what: &str) -> Result<Option<usize>> {
    match col {
        0 => Ok(None),
        c if c <= STOP_IDX + 1 => Err(BedError::Config(format!(
            "{} column is at position less than {}: {}",
            what,
            STOP_IDX + 2,
            c
        ))),
        c => Ok(Some(c - 1)),
    }
}

impl Options {
    /// Validate every setting. Nothing is read from disk.
    pub fn validate(self) -> Result<FusionConfig> {
        if self.strand_col != 0 && self.strand_col == self.feat_col {
            return Err(BedError::Config(format!(
                "same column for strand and feature: {} == {}",
                self.strand_col, self.feat_col
            )));
        }
        let columns = ColumnSpec {
            strand: grouping_column(self.strand_col, "strand")?,
            feat: grouping_column(self.feat_col, "feature")?,
        };

        let sort_type: SortType = self.sort_type.parse()?;
        let padding_policy: PaddingPolicy = self.padding_type.parse()?;
        let first_base = FirstBase::try_from(self.first_base)?;

        if self.padding < 0 {
            return Err(BedError::Config(format!(
                "padding must be >= 0: {}",
                self.padding
            )));
        }
        if self.padding != 0 && padding_policy != PaddingPolicy::Force && self.fasta_idx.is_none() {
            return Err(BedError::Config(format!(
                "--padding-type={} must be used together with --fasta-idx",
                padding_policy
            )));
        }
        if sort_type == SortType::IndexOrder && self.fasta_idx.is_none() {
            return Err(BedError::Config(
                "--sort-type=fidx must be used together with --fasta-idx".to_string(),
            ));
        }

        let split_size = if self.fission {
            if self.split_size <= 0 {
                return Err(BedError::Config(format!(
                    "split size must be > 0: {}",
                    self.split_size
                )));
            }
            Some(self.split_size)
        } else {
            if self.split_size <= 0 {
                log::warn!("split size is <= 0: {}", self.split_size);
            }
            None
        };

        Ok(FusionConfig {
            inputs: self.inputs,
            output: self.output,
            fasta_idx: self.fasta_idx,
            columns,
            sort_type,
            chr_order: self.chr_order,
            deduplicate: self.deduplicate,
            merge: !self.no_merge,
            overlap: self.overlap,
            padding: self.padding,
            padding_policy,
            first_base,
            split_size,
        })
    }
}
