//! Orderings over chromosome names and BED lines.
//!
//! Every user-facing line ordering applies the same key hierarchy:
//! chromosome, start, stop, strand, feature. Chromosome and feature use the
//! selected string rule, the other keys compare plainly. All orderings are
//! meant for stable sorts, so fully equal keys keep their input order.

use crate::interval::Line;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Default custom order (lowercase), used when custom chromosome sorting is
/// selected without an explicit list.
pub const HUMAN_CHR_ORDER: &[&str] = &[
    "1", "chr1", "2", "chr2", "3", "chr3", "4", "chr4", "5", "chr5", "6", "chr6", "7", "chr7",
    "8", "chr8", "9", "chr9", "10", "chr10", "11", "chr11", "12", "chr12", "13", "chr13", "14",
    "chr14", "15", "chr15", "16", "chr16", "17", "chr17", "18", "chr18", "19", "chr19", "20",
    "chr20", "21", "chr21", "x", "chrx", "y", "chry", "m", "chrm", "mt", "chrmt",
];

/// Case-insensitive plain string comparison (`chr10 < chr2`).
#[inline]
pub fn lexicographic_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive natural comparison (`chr2 < chr10`).
///
/// Both strings are split into runs of ASCII digits and runs of everything
/// else. Digit runs compare by numeric value, any other pair of runs compares
/// as text. Strings that only differ in leading zeros are ordered textually
/// so that only case-folded equal strings compare equal.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return Ordering::Equal;
    }

    let mut a_chunks = chunks(&a);
    let mut b_chunks = chunks(&b);
    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return a.cmp(&b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = if is_digits(x) && is_digits(y) {
                    compare_digits(x, y)
                } else {
                    x.cmp(y)
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Split a string into alternating digit and non-digit runs.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let digit = rest.chars().next()?.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

#[inline]
fn is_digits(chunk: &str) -> bool {
    chunk.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Compare two digit runs by value without parsing, so arbitrarily long runs
/// cannot overflow.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Chromosome name to 1-based rank.
///
/// Built once per run, either from a user list, the built-in human order or
/// the row order of an index file. Lookups are case-insensitive. Names absent
/// from the map sort after every present name, naturally among themselves.
#[derive(Debug, Clone, Default)]
pub struct ChromOrder {
    ranks: FxHashMap<String, u32>,
}

impl ChromOrder {
    /// Build from names in rank order. A name's rank is its 1-based position
    /// in `names`; a name listed twice takes the position of its last entry.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = FxHashMap::default();
        for (idx, name) in names.into_iter().enumerate() {
            ranks.insert(name.as_ref().to_lowercase(), idx as u32 + 1);
        }
        Self { ranks }
    }

    /// The built-in human karyotype order.
    pub fn human() -> Self {
        Self::from_names(HUMAN_CHR_ORDER)
    }

    /// Rank of a chromosome, `None` when it is not part of the order.
    #[inline]
    pub fn rank(&self, chr: &str) -> Option<u32> {
        self.ranks.get(&chr.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Compare two chromosome names by rank.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => natural_compare(a, b),
        }
    }
}

/// Shared tail of the user-facing hierarchy: start, stop, strand, then feature.
#[inline]
fn then_coords(
    chr: Ordering,
    a: &Line,
    b: &Line,
    feat: impl FnOnce(&str, &str) -> Ordering,
) -> Ordering {
    chr.then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.stop.cmp(&b.stop))
        .then_with(|| a.strand.cmp(&b.strand))
        .then_with(|| feat(&a.feat, &b.feat))
}

/// Lexicographic line ordering (`1 < 10 < 2 < MT < X`).
pub fn lexicographic_order(a: &Line, b: &Line) -> Ordering {
    then_coords(
        lexicographic_compare(&a.chr, &b.chr),
        a,
        b,
        lexicographic_compare,
    )
}

/// Natural line ordering (`1 < 2 < 10 < MT < X`).
pub fn natural_order(a: &Line, b: &Line) -> Ordering {
    then_coords(natural_compare(&a.chr, &b.chr), a, b, natural_compare)
}

/// Rank-map line ordering, used for both custom and index-file order.
/// Features compare naturally.
pub fn ranked_order(order: &ChromOrder, a: &Line, b: &Line) -> Ordering {
    then_coords(order.compare(&a.chr, &b.chr), a, b, natural_compare)
}

/// Ordering that makes mergeable lines adjacent: feature, chromosome, strand,
/// start, stop, all compared plainly. Only used by the merger.
pub(crate) fn merge_order(a: &Line, b: &Line) -> Ordering {
    a.feat
        .cmp(&b.feat)
        .then_with(|| a.chr.cmp(&b.chr))
        .then_with(|| a.strand.cmp(&b.strand))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.stop.cmp(&b.stop))
}
