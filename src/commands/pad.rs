//! Pad command implementation.
//!
//! Extends intervals by a fixed number of bases on both sides, clamping the
//! start to the first base and the stop to the chromosome length when the
//! chromosome is in the index. What happens to chromosomes missing from the
//! index is decided by the [`PaddingPolicy`].

use crate::bed::{BedError, Result};
use crate::compare::natural_compare;
use crate::genome::Genome;
use crate::interval::Line;
use rustc_hash::FxHashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What to do with lines whose chromosome is not in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Leave the line unpadded and warn once.
    Warn,
    /// Pad without an upper bound, warning when an index was given.
    Force,
}

impl FromStr for PaddingPolicy {
    type Err = BedError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "err" | "fail" => Ok(PaddingPolicy::Fail),
            "warn" => Ok(PaddingPolicy::Warn),
            "force" => Ok(PaddingPolicy::Force),
            _ => Err(BedError::UnknownPaddingPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaddingPolicy::Fail => "err",
            PaddingPolicy::Warn => "warn",
            PaddingPolicy::Force => "force",
        })
    }
}

/// Lowest coordinate a padded start may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstBase {
    Zero,
    #[default]
    One,
}

impl FirstBase {
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            FirstBase::Zero => 0,
            FirstBase::One => 1,
        }
    }
}

impl TryFrom<i64> for FirstBase {
    type Error = BedError;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(FirstBase::Zero),
            1 => Ok(FirstBase::One),
            _ => Err(BedError::Config(format!(
                "first base must be 0 or 1: {}",
                value
            ))),
        }
    }
}

/// Non-fatal padding outcome reported once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaddingWarning {
    /// Chromosomes absent from the index, naturally sorted and deduplicated.
    MissingChromosomes {
        chroms: Vec<String>,
        index: Option<PathBuf>,
    },
    /// Forced padding without any index to bound the stop.
    Unbounded,
}

impl fmt::Display for PaddingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingWarning::MissingChromosomes { chroms, index } => {
                let index = index
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                write!(
                    f,
                    "chromosomes not in fasta index file {}: {}",
                    index,
                    chroms.join(", ")
                )
            }
            PaddingWarning::Unbounded => f.write_str(
                "padding without bounds: no fasta index file given, stop positions are not clamped",
            ),
        }
    }
}

/// Pad one line. Returns the padded copy and whether its chromosome was
/// found in the genome.
pub fn pad_line(
    line: &Line,
    padding: i64,
    genome: Option<&Genome>,
    first_base: FirstBase,
) -> (Line, bool) {
    let mut padded = line.clone();
    let chrom_size = genome.and_then(|g| g.chrom_size(&line.chr));

    let mut start = line.start.saturating_sub(padding);
    let mut stop = line.stop.saturating_add(padding);
    if start < first_base.value() {
        start = first_base.value();
    }
    if let Some(size) = chrom_size {
        stop = stop.min(size);
    }
    padded.set_start(start);
    padded.set_stop(stop);

    (padded, chrom_size.is_some())
}

/// Pad command configuration and per-run state.
#[derive(Debug, Clone)]
pub struct PadCommand<'a> {
    /// Number of bases added on each side
    pub padding: i64,
    pub policy: PaddingPolicy,
    pub first_base: FirstBase,
    genome: Option<&'a Genome>,
    missing: FxHashSet<String>,
}

impl<'a> PadCommand<'a> {
    pub fn new(padding: i64, policy: PaddingPolicy) -> Self {
        Self {
            padding,
            policy,
            first_base: FirstBase::One,
            genome: None,
            missing: FxHashSet::default(),
        }
    }

    /// Bound padding by the chromosome lengths of a genome.
    pub fn with_genome(mut self, genome: &'a Genome) -> Self {
        self.genome = Some(genome);
        self
    }

    pub fn with_first_base(mut self, first_base: FirstBase) -> Self {
        self.first_base = first_base;
        self
    }

    /// Pad one line according to the policy.
    pub fn apply(&mut self, line: Line) -> Result<Line> {
        let (padded, found) = pad_line(&line, self.padding, self.genome, self.first_base);
        if found {
            return Ok(padded);
        }
        match self.policy {
            PaddingPolicy::Fail => Err(BedError::ChromNotInIndex {
                chrom: line.chr,
                index: self
                    .genome
                    .and_then(Genome::source)
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            }),
            PaddingPolicy::Warn => {
                self.note_missing(&line.chr);
                Ok(line)
            }
            PaddingPolicy::Force => {
                if self.genome.is_some() {
                    self.note_missing(&line.chr);
                }
                Ok(padded)
            }
        }
    }

    fn note_missing(&mut self, chr: &str) {
        if !self.missing.contains(chr) {
            self.missing.insert(chr.to_string());
        }
    }

    /// Pad every line, stopping at the first error.
    pub fn pad(&mut self, lines: Vec<Line>) -> Result<Vec<Line>> {
        lines.into_iter().map(|line| self.apply(line)).collect()
    }

    /// The warning to report after all lines went through [`apply`](Self::apply).
    pub fn finish(self) -> Option<PaddingWarning> {
        if self.policy == PaddingPolicy::Force && self.genome.is_none() {
            return Some(PaddingWarning::Unbounded);
        }
        if self.missing.is_empty() {
            return None;
        }
        let mut chroms: Vec<String> = self.missing.into_iter().collect();
        chroms.sort_by(|a, b| natural_compare(a, b));
        Some(PaddingWarning::MissingChromosomes {
            chroms,
            index: self
                .genome
                .and_then(Genome::source)
                .map(|p| p.to_path_buf()),
        })
    }
}
