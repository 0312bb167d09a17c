//! Merge command implementation.
//!
//! Sorts with the merge order (feature, chromosome, strand, start, stop) so
//! mergeable lines are adjacent, then folds them in a single sweep. Values of
//! auxiliary columns are unioned into comma separated lists.

use crate::bed::Result;
use crate::commands::pad::PadCommand;
use crate::compare::merge_order;
use crate::interval::{Line, AUX_START};

/// Separator of unioned column values.
pub const VALUE_DELIMITER: char = ',';

/// Merge command configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeCommand {
    /// Allowed gap between merged lines. 0 merges touching lines, -1 only
    /// merges lines that overlap, larger values bridge gaps of that size.
    pub overlap: i64,
}

impl MergeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge overlap.
    pub fn with_overlap(mut self, overlap: i64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Merge lines.
    pub fn merge(&self, lines: Vec<Line>) -> Vec<Line> {
        let mut merged = Vec::with_capacity(lines.len());
        let mut current: Option<Line> = None;
        for line in sorted_for_merge(lines) {
            self.fold(&mut current, line, &mut merged);
        }
        merged.extend(current);
        merged
    }

    /// Merge lines, padding each one right before it is tested for adjacency
    /// so merge decisions see padded coordinates.
    pub fn merge_and_pad(
        &self,
        lines: Vec<Line>,
        padder: &mut PadCommand<'_>,
    ) -> Result<Vec<Line>> {
        let mut merged = Vec::with_capacity(lines.len());
        let mut current: Option<Line> = None;
        for line in sorted_for_merge(lines) {
            let line = padder.apply(line)?;
            self.fold(&mut current, line, &mut merged);
        }
        merged.extend(current);
        Ok(merged)
    }

    /// True when `line` joins the accumulator `acc`.
    #[inline]
    pub fn joins(&self, acc: &Line, line: &Line) -> bool {
        acc.chr == line.chr
            && acc.strand == line.strand
            && acc.feat == line.feat
            && acc.stop.saturating_add(self.overlap) >= line.start.saturating_sub(1)
    }

    fn fold(&self, current: &mut Option<Line>, line: Line, out: &mut Vec<Line>) {
        if let Some(acc) = current.as_mut() {
            if self.joins(acc, &line) {
                absorb(acc, &line);
                return;
            }
        }
        if let Some(done) = current.replace(line) {
            out.push(done);
        }
    }
}

fn sorted_for_merge(mut lines: Vec<Line>) -> Vec<Line> {
    lines.sort_by(merge_order);
    lines
}

/// Extend `acc` by `line`: stop becomes the larger of the two, and every
/// auxiliary value of `line` not already listed is appended to its column.
fn absorb(acc: &mut Line, line: &Line) {
    if line.stop > acc.stop {
        acc.set_stop(line.stop);
    }
    for (offset, value) in line.aux().iter().enumerate() {
        let Some(column) = acc.full.get_mut(AUX_START + offset) else {
            break;
        };
        if !column.split(VALUE_DELIMITER).any(|v| v == value) {
            column.push(VALUE_DELIMITER);
            column.push_str(value);
        }
    }
}

/// Merge lines with the given overlap.
pub fn merge(lines: Vec<Line>, overlap: i64) -> Vec<Line> {
    MergeCommand::new().with_overlap(overlap).merge(lines)
}
