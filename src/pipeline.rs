//! Pipeline driver.
//!
//! Runs the stages strictly in order, each on the full output of the
//! previous one:
//!
//! 1. pad (only when merging is off)
//! 2. merge, padding each line on the way in
//! 3. split
//! 4. deduplicate (when merging did not already)
//! 5. sort
//!
//! The first failing stage stops the run. Warnings are returned as data.

use crate::bed::Result;
use crate::commands::dedupe::dedupe_seen;
use crate::commands::merge::MergeCommand;
use crate::commands::pad::{PadCommand, PaddingWarning};
use crate::commands::sort::SortCommand;
use crate::commands::split::SplitCommand;
use crate::config::FusionConfig;
use crate::genome::Genome;
use crate::interval::Line;

/// Result of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fused {
    pub lines: Vec<Line>,
    pub warnings: Vec<PaddingWarning>,
}

/// True when merging with this overlap already collapses identical lines.
///
/// An identical pair has the same grouping keys and `stop >= start`, so it
/// joins whenever `stop + overlap >= start - 1` holds for `overlap >= -1`.
/// Below that, short duplicates can stay apart.
fn merge_removes_duplicates(config: &FusionConfig) -> bool {
    config.merge && config.overlap >= -1
}

/// Run every configured stage over `lines`.
pub fn run(config: &FusionConfig, lines: Vec<Line>, genome: Option<&Genome>) -> Result<Fused> {
    let mut warnings = Vec::new();
    let mut lines = lines;
    log::debug!("pipeline input: {} lines", lines.len());

    let padder = if config.padding != 0 {
        let mut padder = PadCommand::new(config.padding, config.padding_policy)
            .with_first_base(config.first_base);
        if let Some(genome) = genome {
            padder = padder.with_genome(genome);
        }
        Some(padder)
    } else {
        None
    };

    if config.merge {
        let merger = MergeCommand::new().with_overlap(config.overlap);
        lines = match padder {
            Some(mut padder) => {
                let merged = merger.merge_and_pad(lines, &mut padder)?;
                warnings.extend(padder.finish());
                merged
            }
            None => merger.merge(lines),
        };
        log::debug!("after merge: {} lines", lines.len());
    } else if let Some(mut padder) = padder {
        lines = padder.pad(lines)?;
        warnings.extend(padder.finish());
    }

    if let Some(size) = config.split_size {
        lines = SplitCommand::new(size)?.split(lines);
        log::debug!("after split: {} lines", lines.len());
    }

    // Sort keys ignore auxiliary columns, so identical lines are not
    // guaranteed to end up adjacent.
    if config.deduplicate && !merge_removes_duplicates(config) {
        lines = dedupe_seen(lines);
        log::debug!("after deduplication: {} lines", lines.len());
    }

    let sorter = SortCommand::new(config.sort_type).with_chrom_order(config.chrom_order(genome));
    lines = sorter.sort(lines);

    Ok(Fused { lines, warnings })
}
