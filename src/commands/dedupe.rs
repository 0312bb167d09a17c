//! Removal of duplicated lines.
//!
//! Two lines are duplicates when all their columns are identical. Columns
//! never contain tabs, so this is the same as comparing the tab-joined text.

use crate::interval::Line;
use rustc_hash::FxHashSet;

/// Keep the first occurrence of every distinct line. Works on any order.
pub fn dedupe_seen(lines: Vec<Line>) -> Vec<Line> {
    let keep: Vec<bool> = {
        let mut seen: FxHashSet<&[String]> = FxHashSet::default();
        lines.iter().map(|l| seen.insert(l.full.as_slice())).collect()
    };
    lines
        .into_iter()
        .zip(keep)
        .filter_map(|(line, keep)| keep.then_some(line))
        .collect()
}

/// Drop lines equal to their predecessor.
///
/// Only removes every duplicate when identical lines are adjacent, which a
/// sort guarantees. Duplicates further apart are left in place.
pub fn dedupe_sorted(mut lines: Vec<Line>) -> Vec<Line> {
    lines.dedup_by(|b, a| a.full == b.full);
    lines
}
