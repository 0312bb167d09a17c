//! Core record type for one BED line.

use std::fmt;

/// Column holding the chromosome name.
pub const CHR_IDX: usize = 0;
/// Column holding the start coordinate.
pub const START_IDX: usize = 1;
/// Column holding the stop coordinate.
pub const STOP_IDX: usize = 2;
/// First auxiliary column. Everything from here on is addressed positionally
/// when lines are merged.
pub const AUX_START: usize = STOP_IDX + 1;

/// One genomic interval together with every column it was read with.
///
/// `full[CHR_IDX..=STOP_IDX]` always mirror `chr`, `start` and `stop`; the
/// setters below keep the textual columns in sync with the numeric fields.
/// `strand` and `feat` are empty unless the corresponding column was
/// configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub chr: String,
    pub start: i64,
    pub stop: i64,
    pub strand: String,
    pub feat: String,
    pub full: Vec<String>,
}

impl Line {
    /// Build a line from its tokenized columns.
    ///
    /// The caller is responsible for `full` having at least three columns
    /// and for those columns agreeing with `chr`, `start` and `stop`.
    pub fn new(chr: impl Into<String>, start: i64, stop: i64, full: Vec<String>) -> Self {
        Self {
            chr: chr.into(),
            start,
            stop,
            strand: String::new(),
            feat: String::new(),
            full,
        }
    }

    /// Build a BED3 line, mostly useful in tests.
    pub fn bed3(chr: &str, start: i64, stop: i64) -> Self {
        let full = vec![chr.to_string(), format_coord(start), format_coord(stop)];
        Self::new(chr, start, stop, full)
    }

    /// Builder-style strand setter.
    pub fn with_strand(mut self, strand: impl Into<String>) -> Self {
        self.strand = strand.into();
        self
    }

    /// Builder-style feature setter.
    pub fn with_feat(mut self, feat: impl Into<String>) -> Self {
        self.feat = feat.into();
        self
    }

    /// Set the start coordinate and rewrite its column.
    #[inline]
    pub fn set_start(&mut self, start: i64) {
        self.start = start;
        self.full[START_IDX] = format_coord(start);
    }

    /// Set the stop coordinate and rewrite its column.
    #[inline]
    pub fn set_stop(&mut self, stop: i64) {
        self.stop = stop;
        self.full[STOP_IDX] = format_coord(stop);
    }

    /// Copy of this line with new coordinates. Every other column is kept.
    pub fn with_bounds(&self, start: i64, stop: i64) -> Line {
        let mut line = self.clone();
        line.set_start(start);
        line.set_stop(stop);
        line
    }

    /// Columns after the stop column.
    #[inline]
    pub fn aux(&self) -> &[String] {
        self.full.get(AUX_START..).unwrap_or(&[])
    }

    /// Interval width as stored (stop - start).
    #[inline]
    pub fn len(&self) -> i64 {
        self.stop - self.start
    }

    /// True for zero-width lines (start == stop).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cols = self.full.iter();
        if let Some(first) = cols.next() {
            f.write_str(first)?;
        }
        for col in cols {
            write!(f, "\t{}", col)?;
        }
        Ok(())
    }
}

/// Serialize a coordinate the way it is written back into `Line::full`.
#[inline]
pub fn format_coord(value: i64) -> String {
    itoa::Buffer::new().format(value).to_owned()
}
